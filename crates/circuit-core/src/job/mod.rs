//! Ciclo de vida de un job de simulación.
//!
//! `pending -> running -> {completed | failed}`. Los estados terminales no se
//! abandonan; el registro del job se conserva en ambos desenlaces.

mod record;
mod request;
mod runner;
mod status;

pub use record::SimulationJob;
pub use request::{JobRequest, SimulationMethod};
pub use runner::RunOptions;
pub use status::JobStatus;
