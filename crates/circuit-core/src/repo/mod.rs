//! Colaboradores de persistencia: fuente de diseños y repositorio de jobs.

mod designs;
mod jobs;

pub use designs::{Design, DesignSource, InMemoryDesignSource};
pub use jobs::{InMemoryJobRepository, JobQuery, JobRepository, Page};
