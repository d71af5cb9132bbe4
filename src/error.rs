//! Error types for session construction and config loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("scene node not found: {0}")]
    MissingNode(String),

    #[error("expecting scene to have exactly one camera, but it has {0}")]
    CameraCount(usize),

    #[error("scene parse error: {0}")]
    SceneParse(#[source] serde_json::Error),

    #[error("settings parse error: {0}")]
    SettingsParse(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
