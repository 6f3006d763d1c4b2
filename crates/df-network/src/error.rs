use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("agent {agent} is not a vertex of a network of order {order}")]
    AgentOutOfRange { agent: usize, order: usize },

    #[error("edge probability {0} not in [0, 1]")]
    InvalidProbability(f64),

    #[error("network too large: {0} vertices exceed u32 ids")]
    TooLarge(usize),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
