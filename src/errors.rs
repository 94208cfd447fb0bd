use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Credential Decode Error: {0}")]
    Decode(String),

    #[error("Settings Parse Error: {0}")]
    Parse(String),

    #[error("Error saving settings: {0}")]
    Persist(String),

    #[error("Device Discovery Error: {0}")]
    Discovery(String),

    #[error("Authentication Failed for {username}: {details}")]
    Authentication { username: String, details: String },

    #[error("Operator Input Error: {0}")]
    Input(String),

    #[error("File I/O Error: {0}")]
    Io(String),
}

// Allow conversion from std::io::Error to AppError::Io
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}
