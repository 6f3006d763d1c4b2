use df_core::DfError;
use df_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("snapshot {step} has no agents")]
    EmptySnapshot { step: usize },

    #[error("cannot summarize an empty sample")]
    EmptySample,

    #[error(transparent)]
    Core(#[from] DfError),

    #[error("simulation failed: {0}")]
    Sim(#[from] SimError),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
