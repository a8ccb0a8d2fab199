//! Tipos de evento del ciclo de vida de un job.
//!
//! Cada transición emite un evento; la secuencia de un `job_id` permite
//! auditar cuándo y con qué semilla corrió una simulación.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::job::SimulationMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobEventKind {
    /// Primer evento de un job. Fija diseño, método y tamaño de la malla.
    JobCreated {
        design_id: String,
        method: SimulationMethod,
        time_points: usize,
    },
    /// El job pasó a `running`.
    JobStarted,
    JobCompleted {
        results_fingerprint: String,
        seed: u64,
        time_points: usize,
    },
    JobFailed { error: String },
    JobDeleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEvent {
    pub seq: u64, // orden de append dentro del job
    pub job_id: Uuid,
    pub kind: JobEventKind,
    pub ts: DateTime<Utc>,
}
