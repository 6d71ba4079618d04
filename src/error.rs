use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("input thread read failed: {0}")]
    Input(String),

    #[error("input channel disconnected")]
    InputDisconnected,
}

pub type AppResult<T> = Result<T, AppError>;
