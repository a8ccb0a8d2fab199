use dashmap::DashMap;
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::constants::DEFAULT_PAGE_LIMIT;
use crate::job::SimulationJob;

/// Filtro y paginación para listar jobs (páginas desde 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    pub design_id: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            design_id: None,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl JobQuery {
    pub fn for_design(design_id: impl Into<String>) -> Self {
        Self {
            design_id: Some(design_id.into()),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: usize, limit: usize) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Persistencia de registros de job. Cada job se guarda en cada transición.
pub trait JobRepository: Send + Sync {
    fn save(&self, job: &SimulationJob);
    fn get(&self, id: Uuid) -> Option<SimulationJob>;
    /// Más recientes primero.
    fn list(&self, query: &JobQuery) -> Page<SimulationJob>;
    fn list_by_design(&self, design_id: &str, page: usize, limit: usize) -> Page<SimulationJob> {
        self.list(&JobQuery::for_design(design_id).page(page, limit))
    }
    fn delete(&self, id: Uuid) -> Option<SimulationJob>;
}

#[derive(Debug, Default)]
pub struct InMemoryJobRepository {
    jobs: DashMap<Uuid, (u64, SimulationJob)>,
    next_seq: AtomicU64,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    fn insertion_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }
}

fn newest_first(a: &(u64, SimulationJob), b: &(u64, SimulationJob)) -> CmpOrdering {
    b.1.created_at.cmp(&a.1.created_at).then(b.0.cmp(&a.0))
}

impl JobRepository for InMemoryJobRepository {
    fn save(&self, job: &SimulationJob) {
        // el seq de inserción desempata jobs creados en el mismo instante
        let mut entry = self
            .jobs
            .entry(job.id)
            .or_insert_with(|| (self.insertion_seq(), job.clone()));
        entry.1 = job.clone();
    }

    fn get(&self, id: Uuid) -> Option<SimulationJob> {
        self.jobs.get(&id).map(|e| e.value().1.clone())
    }

    fn list(&self, query: &JobQuery) -> Page<SimulationJob> {
        let wanted = query.design_id.as_deref();
        let mut matching: Vec<(u64, SimulationJob)> = self
            .jobs
            .iter()
            .filter(|e| wanted.map_or(true, |d| e.value().1.design_id == d))
            .map(|e| e.value().clone())
            .collect();
        matching.sort_by(newest_first);

        let limit = query.limit.max(1);
        let page = query.page.max(1);
        let total = matching.len();
        let items = matching
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .map(|(_, job)| job)
            .collect();
        Page {
            items,
            total,
            page,
            total_pages: total.div_ceil(limit),
        }
    }

    fn delete(&self, id: Uuid) -> Option<SimulationJob> {
        self.jobs.remove(&id).map(|(_, (_, job))| job)
    }
}
