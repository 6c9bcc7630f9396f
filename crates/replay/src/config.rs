use std::path::PathBuf;

/// Default inference server when `LAMBDA_API_URL` is unset.
pub const DEFAULT_LAMBDA_API_URL: &str = "http://localhost:8080";

/// Default capacity of the canvas event bus.
pub const DEFAULT_CANVAS_EVENT_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Replay configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Base URL of the inference server.
    pub lambda_api_url: String,
    /// Path of the JSON session script to replay.
    pub session_script: PathBuf,
    /// Capacity of the canvas event bus.
    pub canvas_event_capacity: usize,
}

impl ReplayConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `LAMBDA_API_URL`        | `http://localhost:8080` |
    /// | `SESSION_SCRIPT`        | required                |
    /// | `CANVAS_EVENT_CAPACITY` | `64`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lambda_api_url = lookup("LAMBDA_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LAMBDA_API_URL.into());

        let session_script = lookup("SESSION_SCRIPT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("SESSION_SCRIPT"))?;

        let canvas_event_capacity = match lookup("CANVAS_EVENT_CAPACITY") {
            None => DEFAULT_CANVAS_EVENT_CAPACITY,
            Some(value) => {
                let parsed = value.trim().parse::<usize>();
                match parsed {
                    Ok(capacity) if capacity > 0 => capacity,
                    _ => {
                        return Err(ConfigError::Invalid {
                            name: "CANVAS_EVENT_CAPACITY",
                            expected: "a positive integer",
                            value,
                        })
                    }
                }
            }
        };

        Ok(Self {
            lambda_api_url,
            session_script,
            canvas_event_capacity,
        })
    }
}
