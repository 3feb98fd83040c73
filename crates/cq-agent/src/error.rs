use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("learning configuration error: {0}")]
    Config(String),

    #[error("failed to spawn training thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
