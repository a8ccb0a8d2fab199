use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::{JobEvent, JobEventKind};

/// Almacenamiento de eventos append-only, compartible entre hilos.
pub trait JobEventStore: Send + Sync {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con seq y ts).
    fn append_kind(&self, job_id: Uuid, kind: JobEventKind) -> JobEvent;
    /// Eventos de un job en orden ascendente de seq.
    fn list(&self, job_id: Uuid) -> Vec<JobEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryJobEventStore {
    inner: DashMap<Uuid, Vec<JobEvent>>,
}

impl InMemoryJobEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobEventStore for InMemoryJobEventStore {
    fn append_kind(&self, job_id: Uuid, kind: JobEventKind) -> JobEvent {
        let mut events = self.inner.entry(job_id).or_default();
        let ev = JobEvent {
            seq: events.len() as u64,
            job_id,
            kind,
            ts: Utc::now(),
        };
        events.push(ev.clone());
        ev
    }

    fn list(&self, job_id: Uuid) -> Vec<JobEvent> {
        self.inner
            .get(&job_id)
            .map(|v| v.value().clone())
            .unwrap_or_default()
    }
}
