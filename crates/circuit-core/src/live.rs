//! Sesión interactiva: un reloj externo entrega instantes crecientes y cada
//! tick evalúa el modelo una vez sobre el mismo `Simulator` que usa el job
//! batch. Sólo se retiene una ventana acotada de puntos.

use circuit_domain::RegulatoryGraph;

use crate::constants::DEFAULT_REPORTER_COLOR;
use crate::engine::{
    time_point, EngineOptions, ExpressionEngine, ReporterReading, Simulator,
};
use crate::errors::SimulationError;
use crate::model::TimePoint;
use crate::noise::NoiseSource;
use crate::series::{RollingWindow, SeriesSink};

#[derive(Debug)]
pub struct LiveSession<N: NoiseSource> {
    simulator: Simulator<N>,
    window: RollingWindow,
    last_time: Option<f64>,
    latest: Vec<ReporterReading>,
}

impl<N: NoiseSource> LiveSession<N> {
    pub fn new(
        graph: &RegulatoryGraph,
        options: EngineOptions,
        noise: N,
        capacity: usize,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            simulator: Simulator::new(ExpressionEngine::new(options), graph, noise)?,
            window: RollingWindow::new(capacity),
            last_time: None,
            latest: Vec::new(),
        })
    }

    /// Evalúa un tick. `time` debe ser estrictamente mayor que el del tick
    /// anterior.
    pub fn on_tick(&mut self, time: f64) -> Result<&TimePoint, SimulationError> {
        if let Some(prev) = self.last_time {
            if !(time > prev) {
                return Err(SimulationError::InvalidInput(format!(
                    "tick time {time} must be greater than previous tick {prev}"
                )));
            }
        }
        let mut readings = self.simulator.readings_at(time)?;
        for r in readings.iter_mut() {
            r.color.get_or_insert_with(|| DEFAULT_REPORTER_COLOR.to_string());
        }
        self.window.accept(time_point(time, &readings));
        self.latest = readings;
        self.last_time = Some(time);
        self.window.latest().ok_or_else(|| {
            SimulationError::ComputationFailure("rolling window is empty after a tick".into())
        })
    }

    /// Lecturas del último tick; `color` siempre presente.
    pub fn latest_readings(&self) -> &[ReporterReading] {
        &self.latest
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    /// El diseño cambió: los ticks siguientes usan el nuevo grafo. La ventana
    /// se conserva.
    pub fn replace_graph(&mut self, graph: &RegulatoryGraph) -> Result<(), SimulationError> {
        self.simulator.replace_graph(graph)
    }

    /// Vuelve al estado inicial (la vista se detuvo y se reinicia).
    pub fn reset(&mut self) {
        self.window.clear();
        self.latest.clear();
        self.last_time = None;
    }
}
