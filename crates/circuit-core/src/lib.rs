//! circuit-core: motor de expresión génica y ciclo de vida de simulaciones
pub mod cancel;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod job;
pub mod live;
pub mod model;
pub mod noise;
pub mod repo;
pub mod series;
pub mod service;
pub mod stats;

pub use cancel::CancellationToken;
pub use config::EngineConfig;
pub use engine::{evaluate, EngineOptions, ExpressionEngine, ReporterReading, Simulator};
pub use errors::SimulationError;
pub use event::{InMemoryJobEventStore, JobEvent, JobEventKind, JobEventStore};
pub use job::{JobRequest, JobStatus, RunOptions, SimulationJob, SimulationMethod};
pub use live::LiveSession;
pub use model::{SimulationResults, TimePoint};
pub use noise::{FixedNoise, NoiseSource, SeededNoise};
pub use repo::{
    Design, DesignSource, InMemoryDesignSource, InMemoryJobRepository, JobQuery, JobRepository,
    Page,
};
pub use series::{FullSeries, RollingWindow, SeriesSink, TimeGrid};
pub use service::SimulationService;
pub use stats::{ReporterStats, Statistics, StatisticsAggregator};
