use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The server was reachable but refused the request (non-2xx status).
    /// `message` is the body-provided detail when present, else the
    /// canonical reason phrase for the status.
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid hallway status '{0}': expected 'available' or 'under_construction'")]
    InvalidStatus(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BackendError>;
