#[derive(thiserror::Error, Debug)]
pub enum EnvError {
    /// An action outside the action space, or a bad construction parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown environment '{id}'. Available: {available}.")]
    UnknownEnv { id: String, available: String },

    #[error("Invalid environment kwargs: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;
