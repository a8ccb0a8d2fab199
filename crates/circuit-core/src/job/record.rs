use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{JobRequest, JobStatus, SimulationMethod};
use crate::errors::SimulationError;
use crate::model::SimulationResults;
use crate::series::TimeGrid;

/// Registro persistido de un job.
///
/// El job referencia su diseño sólo por id (`design_id`); nunca es dueño del
/// grafo. `status`, `results` y `error` sólo cambian a través de las
/// transiciones (`start`, `complete`, `fail`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationJob {
    pub id: Uuid,
    pub design_id: String,
    pub name: String,
    pub description: String,
    status: JobStatus,
    pub method: SimulationMethod,
    pub duration: f64,
    pub time_step: f64,
    results: SimulationResults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Semilla efectivamente usada por el ruido (para replay).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_fingerprint: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl SimulationJob {
    /// Crea el job en `pending`. Falla con `InvalidInput` si la petición no
    /// es válida; en ese caso no existe registro alguno.
    pub fn create(request: &JobRequest, max_time_points: usize) -> Result<Self, SimulationError> {
        request.validate(max_time_points)?;
        let design_id = request.design_id()?.to_string();
        let name = request
            .name
            .clone()
            .unwrap_or_else(|| format!("Simulation of {design_id}"));
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description: request.description.clone().unwrap_or_default(),
            design_id,
            status: JobStatus::Pending,
            method: request.method,
            duration: request.duration,
            time_step: request.time_step,
            results: SimulationResults::default(),
            error: None,
            seed: request.seed,
            design_hash: None,
            results_fingerprint: None,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        })
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn results(&self) -> &SimulationResults {
        &self.results
    }

    /// Presente sólo si el job terminó en `failed`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn grid(&self, max_time_points: usize) -> Result<TimeGrid, SimulationError> {
        TimeGrid::new(self.duration, self.time_step, max_time_points)
    }

    /// Petición equivalente, para relanzar el job como uno nuevo.
    pub fn to_request(&self) -> JobRequest {
        JobRequest {
            design_id: Some(self.design_id.clone()),
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            duration: self.duration,
            time_step: self.time_step,
            method: self.method,
            seed: None,
        }
    }

    /// `pending -> running`, justo antes de empezar a computar.
    pub fn start(&mut self) -> Result<(), SimulationError> {
        self.transition(JobStatus::Running)?;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// `running -> completed` guardando resultados y su fingerprint.
    pub fn complete(
        &mut self,
        results: SimulationResults,
        fingerprint: String,
    ) -> Result<(), SimulationError> {
        self.transition(JobStatus::Completed)?;
        self.results = results;
        self.results_fingerprint = Some(fingerprint);
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    /// `running -> failed` guardando el mensaje de error.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), SimulationError> {
        self.transition(JobStatus::Failed)?;
        let message = message.into();
        self.error = Some(if message.is_empty() {
            "unknown error".to_string()
        } else {
            message
        });
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), SimulationError> {
        if !self.status.can_transition_to(next) {
            return Err(SimulationError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
