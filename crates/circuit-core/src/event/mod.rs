//! Bitácora append-only de transiciones de jobs.

mod store;
mod types;

pub use store::{InMemoryJobEventStore, JobEventStore};
pub use types::{JobEvent, JobEventKind};
