use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("countdown must be at least 1 second (got {0})")]
    InvalidCountdown(u32),
}

pub type Result<T> = std::result::Result<T, CoreError>;
