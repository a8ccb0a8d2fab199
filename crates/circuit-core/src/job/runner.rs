//! Ejecución batch de un job sobre un snapshot del grafo.
use circuit_domain::RegulatoryGraph;
use log::{info, warn};
use serde_json::json;

use super::{JobStatus, SimulationJob};
use crate::cancel::CancellationToken;
use crate::constants::{DEFAULT_MAX_TIME_POINTS, ENGINE_VERSION};
use crate::engine::{EngineOptions, ExpressionEngine, Simulator};
use crate::errors::SimulationError;
use crate::hashing::fingerprint_of;
use crate::model::{SimulationResults, TimePoint};
use crate::noise::SeededNoise;
use crate::series::FullSeries;
use crate::stats::StatisticsAggregator;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub engine: EngineOptions,
    /// Semilla de respaldo si el job no trae una propia.
    pub seed: Option<u64>,
    pub max_time_points: usize,
    pub cancel: CancellationToken,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            engine: EngineOptions::default(),
            seed: None,
            max_time_points: DEFAULT_MAX_TIME_POINTS,
            cancel: CancellationToken::new(),
        }
    }
}

impl SimulationJob {
    /// `start` + `execute`.
    pub fn run(
        &mut self,
        graph: &RegulatoryGraph,
        options: &RunOptions,
    ) -> Result<(), SimulationError> {
        self.start()?;
        self.execute(graph, options)
    }

    /// Computa la serie completa para un job en `running` y lo deja en
    /// `completed` o `failed`. Un fallo de cómputo no es un `Err`: queda
    /// registrado en el job. `Err` sólo indica una transición ilegal.
    pub fn execute(
        &mut self,
        graph: &RegulatoryGraph,
        options: &RunOptions,
    ) -> Result<(), SimulationError> {
        if self.status() != JobStatus::Running {
            return Err(SimulationError::InvalidTransition {
                from: self.status(),
                to: JobStatus::Completed,
            });
        }
        let noise = match self.seed.or(options.seed) {
            Some(seed) => SeededNoise::new(seed),
            None => SeededNoise::from_entropy(),
        };
        self.seed = Some(noise.seed());

        match self.compute(graph, options, noise) {
            Ok((results, fingerprint)) => {
                info!(
                    "simulation {} completed: {} time points, {} reporters",
                    self.id,
                    results.time_points.len(),
                    results.statistics.reporters.len()
                );
                self.complete(results, fingerprint)
            }
            Err(e) => {
                warn!("simulation {} failed: {e}", self.id);
                let message = match e {
                    SimulationError::ComputationFailure(m) => m,
                    other => other.to_string(),
                };
                self.fail(message)
            }
        }
    }

    fn compute(
        &mut self,
        graph: &RegulatoryGraph,
        options: &RunOptions,
        noise: SeededNoise,
    ) -> Result<(SimulationResults, String), SimulationError> {
        let grid = self.grid(options.max_time_points)?;
        self.design_hash = Some(fingerprint_of(graph)?);
        let mut simulator = Simulator::new(ExpressionEngine::new(options.engine), graph, noise)?;
        let mut series = FullSeries::with_capacity(grid.len());
        simulator.drive(&grid, &mut series, &options.cancel)?;

        let reporter_names = simulator.network().reporter_names();
        let time_points = series.into_points();
        let statistics = StatisticsAggregator::aggregate(&time_points, &reporter_names)?;
        let fingerprint = self.results_fingerprint_for(&time_points)?;
        let results = SimulationResults {
            time_points,
            statistics,
        };
        Ok((results, fingerprint))
    }

    fn results_fingerprint_for(
        &self,
        time_points: &[TimePoint],
    ) -> Result<String, SimulationError> {
        fingerprint_of(&json!({
            "engine_version": ENGINE_VERSION,
            "seed": self.seed,
            "duration": self.duration,
            "time_step": self.time_step,
            "time_points": time_points,
        }))
    }
}
