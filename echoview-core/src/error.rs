use thiserror::Error;

/// All errors produced by echoview-core.
#[derive(Debug, Error)]
pub enum EchoViewError {
    #[error("failed to spawn transcriber: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("display error: {0}")]
    Display(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EchoViewError>;
