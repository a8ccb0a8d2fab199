//! Errores del motor y del ciclo de vida de jobs.

use circuit_domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::job::JobStatus;

#[derive(Debug, Error, PartialEq, Clone, Serialize, Deserialize)]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("design not found: {0}")]
    DesignNotFound(String),
    #[error("simulation job not found: {0}")]
    JobNotFound(Uuid),
    #[error("computation failure: {0}")]
    ComputationFailure(String),
    #[error("cannot aggregate statistics over an empty series")]
    EmptySeries,
    #[error("simulation cancelled")]
    Cancelled,
    #[error("invalid job transition {from} -> {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
    #[error("simulation job {0} is running")]
    JobRunning(Uuid),
}

impl From<DomainError> for SimulationError {
    fn from(e: DomainError) -> Self {
        SimulationError::ComputationFailure(e.to_string())
    }
}
