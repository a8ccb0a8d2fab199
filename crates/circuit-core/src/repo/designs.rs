use circuit_domain::RegulatoryGraph;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Vista mínima del documento de diseño que necesita el motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub graph: RegulatoryGraph,
}

impl Design {
    pub fn new(id: impl Into<String>, name: impl Into<String>, graph: RegulatoryGraph) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            graph,
        }
    }
}

/// Lectura de diseños por id. `None` equivale a un 404 del CRUD externo.
pub trait DesignSource: Send + Sync {
    fn fetch_design(&self, design_id: &str) -> Option<Design>;
}

#[derive(Debug, Default)]
pub struct InMemoryDesignSource {
    designs: DashMap<String, Design>,
}

impl InMemoryDesignSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta o reemplaza un diseño (el editor guardó cambios).
    pub fn insert(&self, design: Design) {
        self.designs.insert(design.id.clone(), design);
    }

    pub fn remove(&self, design_id: &str) -> Option<Design> {
        self.designs.remove(design_id).map(|(_, d)| d)
    }
}

impl DesignSource for InMemoryDesignSource {
    fn fetch_design(&self, design_id: &str) -> Option<Design> {
        self.designs.get(design_id).map(|d| d.value().clone())
    }
}
