use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use theia_core::AlertRequest;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Client-side configuration: where the backend lives and what the alert
/// payload says about this device's user. Every field has a default, so a
/// missing config file is not an error — the prototype's hardcoded test
/// subject, moved into YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_subject_id")]
    pub subject_id: i64,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_countdown_seconds")]
    pub countdown_seconds: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_server() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_subject_id() -> i64 {
    1
}

fn default_latitude() -> f64 {
    47.1234
}

fn default_longitude() -> f64 {
    -122.5678
}

fn default_source() -> String {
    "theia-cli".to_string()
}

fn default_countdown_seconds() -> u32 {
    5
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            subject_id: default_subject_id(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            source: default_source(),
            countdown_seconds: default_countdown_seconds(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ClientConfig {
    /// Resolve the effective configuration: an explicit `--config` path must
    /// exist; otherwise the default path is used if present, else built-in
    /// defaults. A `--server` / `THEIA_SERVER` override wins over the file.
    pub fn resolve(
        explicit_path: Option<&Path>,
        server_override: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::load(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::load(&path)?,
                _ => Self::default(),
            },
        };

        if let Some(server) = server_override {
            config.server = server.to_string();
        }
        config.server = config.server.trim_end_matches('/').to_string();

        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: ClientConfig = serde_yaml::from_str(&data)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.trim().is_empty() {
            anyhow::bail!("config: server must not be empty");
        }
        if self.countdown_seconds == 0 {
            anyhow::bail!("config: countdown_seconds must be at least 1");
        }
        if self.timeout_seconds == 0 {
            anyhow::bail!("config: timeout_seconds must be at least 1");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The alert payload this device sends, as configured.
    pub fn alert_request(&self) -> AlertRequest {
        AlertRequest::new(
            self.subject_id,
            self.latitude,
            self.longitude,
            self.source.clone(),
        )
    }
}

fn default_path() -> Option<PathBuf> {
    home::home_dir().map(|dir| dir.join(".config").join("theia").join("config.yaml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
