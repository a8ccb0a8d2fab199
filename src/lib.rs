//! GenCircuit Rust Library
//!
//! Fachada sobre los crates del workspace:
//! - `circuit_domain`: partes genéticas, grafo regulatorio y su validación.
//! - `circuit_core`: motor de expresión, jobs de simulación, sesión interactiva.
//!
//! `prelude` reúne lo necesario para simular un diseño desde un binario.

pub use circuit_core;
pub use circuit_domain;

pub mod prelude {
    pub use circuit_core::{
        CancellationToken, Design, EngineConfig, JobQuery, JobRequest, JobStatus, LiveSession,
        SeededNoise, SimulationError, SimulationJob, SimulationService,
    };
    pub use circuit_domain::{Edge, Node, NodeData, PartKind, RegulatoryGraph};
}
