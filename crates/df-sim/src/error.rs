use df_core::DfError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// The chosen agent has nobody to interact with.
    #[error("agent {agent} has no interaction partner")]
    IsolatedAgent { agent: usize },

    #[error("cannot step an empty population")]
    EmptyPopulation,

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] DfError),
}

pub type SimResult<T> = Result<T, SimError>;
