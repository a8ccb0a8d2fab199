use circuit_domain::{RegulatoryGraph, RegulatoryNetwork};
use log::debug;

use super::expression::time_point;
use super::{ExpressionEngine, ReporterReading};
use crate::cancel::CancellationToken;
use crate::errors::SimulationError;
use crate::model::TimePoint;
use crate::noise::NoiseSource;
use crate::series::{SeriesSink, TimeGrid};

/// Red (snapshot) + motor + fuente de ruido.
///
/// Es el único punto que evalúa el modelo: el job batch lo recorre sobre una
/// `TimeGrid` y la sesión interactiva lo llama una vez por tick.
#[derive(Debug)]
pub struct Simulator<N: NoiseSource> {
    engine: ExpressionEngine,
    network: RegulatoryNetwork,
    noise: N,
}

impl<N: NoiseSource> Simulator<N> {
    pub fn new(
        engine: ExpressionEngine,
        graph: &RegulatoryGraph,
        noise: N,
    ) -> Result<Self, SimulationError> {
        let network = engine.prepare(graph)?;
        Ok(Self {
            engine,
            network,
            noise,
        })
    }

    pub fn network(&self) -> &RegulatoryNetwork {
        &self.network
    }

    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    /// Reemplaza el snapshot (el diseño cambió mientras la vista corría).
    pub fn replace_graph(&mut self, graph: &RegulatoryGraph) -> Result<(), SimulationError> {
        self.network = self.engine.prepare(graph)?;
        Ok(())
    }

    pub fn readings_at(&mut self, time: f64) -> Result<Vec<ReporterReading>, SimulationError> {
        self.engine.readings(&self.network, time, &mut self.noise)
    }

    pub fn tick(&mut self, time: f64) -> Result<TimePoint, SimulationError> {
        let readings = self.readings_at(time)?;
        Ok(time_point(time, &readings))
    }

    /// Recorre la malla completa entregando cada punto al sumidero. La
    /// cancelación se consulta antes de cada paso.
    pub fn drive<S: SeriesSink + ?Sized>(
        &mut self,
        grid: &TimeGrid,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> Result<(), SimulationError> {
        debug!(
            "driving {} time points over {} reporters",
            grid.len(),
            self.network.reporters().count()
        );
        for t in grid.times() {
            cancel.check()?;
            sink.accept(self.tick(t)?);
        }
        Ok(())
    }
}
