//! Orquestación del ciclo de vida de jobs sobre los colaboradores externos.
//!
//! `SimulationService` lee el diseño, persiste el job en cada transición y
//! registra un evento por transición. El cómputo corre sobre una copia del
//! grafo tomada al crear el job: ediciones posteriores del diseño no afectan
//! a una corrida en curso.

use circuit_domain::RegulatoryGraph;
use dashmap::DashMap;
use log::info;
use rayon::prelude::*;
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::config::EngineConfig;
use crate::errors::SimulationError;
use crate::event::{InMemoryJobEventStore, JobEvent, JobEventKind, JobEventStore};
use crate::job::{JobRequest, JobStatus, RunOptions, SimulationJob};
use crate::repo::{
    DesignSource, InMemoryDesignSource, InMemoryJobRepository, JobQuery, JobRepository, Page,
};

#[derive(Debug)]
pub struct SimulationService<D, R, E>
where
    D: DesignSource,
    R: JobRepository,
    E: JobEventStore,
{
    designs: D,
    jobs: R,
    events: E,
    config: EngineConfig,
    /// Tokens de los jobs en curso (desde su creación hasta el estado
    /// terminal), para `cancel_job` y `delete_job`.
    running: DashMap<Uuid, CancellationToken>,
}

impl SimulationService<InMemoryDesignSource, InMemoryJobRepository, InMemoryJobEventStore> {
    /// Servicio con stores en memoria.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(
            InMemoryDesignSource::new(),
            InMemoryJobRepository::new(),
            InMemoryJobEventStore::new(),
            config,
        )
    }
}

impl<D, R, E> SimulationService<D, R, E>
where
    D: DesignSource,
    R: JobRepository,
    E: JobEventStore,
{
    pub fn new(designs: D, jobs: R, events: E, config: EngineConfig) -> Self {
        Self {
            designs,
            jobs,
            events,
            config,
            running: DashMap::new(),
        }
    }

    pub fn designs(&self) -> &D {
        &self.designs
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn events_for(&self, job_id: Uuid) -> Vec<JobEvent> {
        self.events.list(job_id)
    }

    /// Crea el job y lo ejecuta hasta un estado terminal.
    ///
    /// `Err` sólo si la petición es inválida o el diseño no existe; en ambos
    /// casos no se crea ningún registro. Un fallo de cómputo devuelve `Ok`
    /// con el job en `failed`.
    pub fn create_and_run(&self, request: JobRequest) -> Result<SimulationJob, SimulationError> {
        self.create_and_run_with_cancel(request, CancellationToken::new())
    }

    pub fn create_and_run_with_cancel(
        &self,
        request: JobRequest,
        cancel: CancellationToken,
    ) -> Result<SimulationJob, SimulationError> {
        request.validate(self.config.max_time_points)?;
        let design_id = request.design_id()?;
        let design = self
            .designs
            .fetch_design(design_id)
            .ok_or_else(|| SimulationError::DesignNotFound(design_id.to_string()))?;
        let request = request.with_design_defaults(&design.name);

        let mut job = SimulationJob::create(&request, self.config.max_time_points)?;
        let grid_len = job.grid(self.config.max_time_points)?.len();
        // registrado antes del primer save: un job visible nunca está fuera del registro
        self.running.insert(job.id, cancel.clone());
        let outcome = self.track(&mut job, &design.graph, grid_len, cancel);
        self.running.remove(&job.id);
        outcome.map(|()| job)
    }

    /// Persiste y registra cada transición de un job recién creado hasta su
    /// estado terminal.
    fn track(
        &self,
        job: &mut SimulationJob,
        graph: &RegulatoryGraph,
        grid_len: usize,
        cancel: CancellationToken,
    ) -> Result<(), SimulationError> {
        self.jobs.save(job);
        let created = JobEventKind::JobCreated {
            design_id: job.design_id.clone(),
            method: job.method,
            time_points: grid_len,
        };
        self.events.append_kind(job.id, created);
        info!(
            "simulation {} created for design {} ({} time points)",
            job.id, job.design_id, grid_len
        );

        job.start()?;
        self.jobs.save(job);
        self.events.append_kind(job.id, JobEventKind::JobStarted);

        let options = RunOptions {
            engine: self.config.engine_options(),
            seed: self.config.seed,
            max_time_points: self.config.max_time_points,
            cancel,
        };
        job.execute(graph, &options)?;

        self.jobs.save(job);
        self.events.append_kind(job.id, terminal_event(job));
        Ok(())
    }

    pub fn get_job(&self, id: Uuid) -> Result<SimulationJob, SimulationError> {
        self.jobs.get(id).ok_or(SimulationError::JobNotFound(id))
    }

    pub fn list_jobs(&self, query: &JobQuery) -> Page<SimulationJob> {
        self.jobs.list(query)
    }

    pub fn list_jobs_for_design(
        &self,
        design_id: &str,
        page: usize,
        limit: usize,
    ) -> Page<SimulationJob> {
        self.jobs.list_by_design(design_id, page, limit)
    }

    /// Borra un job terminado. Rechazado mientras el job está en curso
    /// (`pending` o `running`): el runner volvería a guardarlo.
    pub fn delete_job(&self, id: Uuid) -> Result<SimulationJob, SimulationError> {
        let job = self.get_job(id)?;
        if self.in_flight(&job) {
            return Err(SimulationError::JobRunning(id));
        }
        let removed = self.jobs.delete(id).ok_or(SimulationError::JobNotFound(id))?;
        self.events.append_kind(id, JobEventKind::JobDeleted);
        info!("simulation {id} deleted");
        Ok(removed)
    }

    /// Relanza un job como uno nuevo con el mismo diseño y parámetros. El
    /// diseño se vuelve a leer: la nueva corrida ve la versión actual.
    pub fn rerun_job(&self, id: Uuid) -> Result<SimulationJob, SimulationError> {
        let job = self.get_job(id)?;
        if self.in_flight(&job) {
            return Err(SimulationError::JobRunning(id));
        }
        self.create_and_run(job.to_request())
    }

    /// Pide la cancelación cooperativa de un job en curso.
    pub fn cancel_job(&self, id: Uuid) -> Result<(), SimulationError> {
        if let Some(token) = self.running.get(&id) {
            token.cancel();
            return Ok(());
        }
        let job = self.get_job(id)?;
        Err(SimulationError::InvalidTransition {
            from: job.status(),
            to: JobStatus::Failed,
        })
    }

    /// Ejecuta peticiones independientes en paralelo. Cada job tiene su propio
    /// buffer de resultados; el orden de salida es el de entrada.
    pub fn run_many(
        &self,
        requests: Vec<JobRequest>,
    ) -> Vec<Result<SimulationJob, SimulationError>> {
        requests
            .into_par_iter()
            .map(|r| self.create_and_run(r))
            .collect()
    }

    fn in_flight(&self, job: &SimulationJob) -> bool {
        self.running.contains_key(&job.id) || !job.is_terminal()
    }
}

fn terminal_event(job: &SimulationJob) -> JobEventKind {
    match (job.status(), &job.results_fingerprint) {
        (JobStatus::Completed, Some(fp)) => JobEventKind::JobCompleted {
            results_fingerprint: fp.clone(),
            seed: job.seed.unwrap_or_default(),
            time_points: job.results().time_points.len(),
        },
        _ => JobEventKind::JobFailed {
            error: job.error().unwrap_or("unknown error").to_string(),
        },
    }
}
