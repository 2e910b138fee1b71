use std::io;

/// Failure of an external collaborator (cluster tooling, scenario engine, completion store).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("scenario not found: {0}")]
    UnknownScenario(String),
    #[error("no scenario is running")]
    NoActiveScenario,
    #[error("not connected to a cluster")]
    NotConnected,
    #[error("state file {path}: {source}")]
    State {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
