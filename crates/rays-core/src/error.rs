use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaysError {
    #[error("invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),
    #[error("unknown rays origin {0:?}")]
    UnknownOrigin(String),
    #[error("config parse error: {0}")]
    Config(String),
    #[error("surface init failed: {0}")]
    Init(String),
    #[error("draw failed: {0}")]
    Draw(String),
    #[error("frame scheduling failed: {0}")]
    Schedule(String),
}

impl From<serde_json::Error> for RaysError {
    fn from(e: serde_json::Error) -> Self {
        RaysError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RaysError>;
