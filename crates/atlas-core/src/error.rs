use thiserror::Error;

/// Errors raised while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable the active configuration requires was not set.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A variable was set but its value could not be used.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
