use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or does not match the expected shape.
    #[error("failed to load spindle configuration: {0}")]
    Figment(#[from] figment::Error),

    /// API calls need the `[bitbucket]` user and app password.
    #[error(
        "Bitbucket credentials are not configured (missing {}); set them in [bitbucket] or SPINDLE_BITBUCKET__*",
        missing.join(", ")
    )]
    MissingCredentials { missing: Vec<&'static str> },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
