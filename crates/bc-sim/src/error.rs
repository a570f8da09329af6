use bc_core::ParkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ParkError),

    #[error("{agent} thread panicked")]
    AgentPanicked {
        agent: String,
    },
}

pub type SimResult<T> = Result<T, SimError>;
