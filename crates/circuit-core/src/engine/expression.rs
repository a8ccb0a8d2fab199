use circuit_domain::{Node, PartKind, RegulatoryGraph, RegulatoryNetwork, Strength};
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{
    LEVEL_MAX, LEVEL_MIN, NOISE_AMPLITUDE, NOISE_FREQUENCY, NOISE_JITTER_MAX, REPRESSION_FACTOR,
};
use crate::errors::SimulationError;
use crate::model::TimePoint;
use crate::noise::NoiseSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Con `strict`, el grafo se valida antes de evaluar y cualquier atributo
    /// no reconocido es un error. Sin él, la fuerza desconocida cae a
    /// `medium` y sólo se registra un warning.
    pub strict: bool,
}

/// Lectura de un reporter en un instante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterReading {
    pub node_id: String,
    pub name: String,
    pub color: Option<String>,
    pub level: f64,
    /// Nodo del promotor conectado, si lo hay.
    pub promoter: Option<String>,
    pub repressed: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionEngine {
    options: EngineOptions,
}

impl ExpressionEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Toma un snapshot del grafo y lo indexa. En modo estricto valida la
    /// estructura completa; en modo laxo avisa de fuerzas no reconocidas.
    pub fn prepare(&self, graph: &RegulatoryGraph) -> Result<RegulatoryNetwork, SimulationError> {
        if self.options.strict {
            graph.validate()?;
        } else {
            for p in graph.nodes.iter().filter(|n| n.kind() == PartKind::Promoter) {
                if let Err(e) = p.strength() {
                    warn!("{e}; falling back to '{}'", Strength::DEFAULT.label());
                }
            }
        }
        Ok(RegulatoryNetwork::from_graph(graph))
    }

    /// Lecturas por reporter en orden de declaración. Consume exactamente una
    /// muestra de ruido por reporter conectado a un promotor.
    pub fn readings(
        &self,
        network: &RegulatoryNetwork,
        time: f64,
        noise: &mut dyn NoiseSource,
    ) -> Result<Vec<ReporterReading>, SimulationError> {
        if !time.is_finite() || time < 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "time must be a non-negative number, got {time}"
            )));
        }
        network
            .reporters()
            .map(|r| self.read_reporter(network, r, time, noise))
            .collect()
    }

    /// Niveles por nombre de reporter. Nombres repetidos: gana el último.
    pub fn evaluate(
        &self,
        network: &RegulatoryNetwork,
        time: f64,
        noise: &mut dyn NoiseSource,
    ) -> Result<IndexMap<String, f64>, SimulationError> {
        Ok(levels_by_name(self.readings(network, time, noise)?.iter()))
    }

    fn read_reporter(
        &self,
        network: &RegulatoryNetwork,
        reporter: &Node,
        time: f64,
        noise: &mut dyn NoiseSource,
    ) -> Result<ReporterReading, SimulationError> {
        let mut reading = ReporterReading {
            node_id: reporter.id().to_string(),
            name: reporter.display_name().to_string(),
            color: reporter.color().map(str::to_string),
            level: 0.0,
            promoter: None,
            repressed: false,
        };
        let sources = network.sources_targeting(reporter.id());
        // primer promotor en orden de la lista de promotores, no de aristas
        let Some(promoter) = network
            .promoters()
            .find(|p| sources.iter().any(|s| s == p.id()))
        else {
            return Ok(reading);
        };

        let strength = self.strength_of(promoter)?;
        let jitter = (time * NOISE_FREQUENCY).sin() * NOISE_AMPLITUDE
            + noise.uniform(0.0, NOISE_JITTER_MAX);
        let mut level = strength.base_level() + jitter;

        if promoter.is_inducible() && is_repressed(network, promoter) {
            level *= REPRESSION_FACTOR;
            reading.repressed = true;
        }

        reading.level = level.clamp(LEVEL_MIN, LEVEL_MAX);
        reading.promoter = Some(promoter.id().to_string());
        Ok(reading)
    }

    fn strength_of(&self, promoter: &Node) -> Result<Strength, SimulationError> {
        match promoter.strength() {
            Ok(s) => Ok(s.unwrap_or(Strength::DEFAULT)),
            Err(e) if self.options.strict => Err(e.into()),
            Err(_) => Ok(Strength::DEFAULT),
        }
    }
}

/// Un represor reprime si su `targets` contiene el id lógico (`data.id`) del
/// promotor. Un promotor sin id lógico nunca queda reprimido.
fn is_repressed(network: &RegulatoryNetwork, promoter: &Node) -> bool {
    let Some(logical_id) = promoter.logical_id() else {
        return false;
    };
    network
        .repressors()
        .any(|r| r.targets().iter().any(|t| t == logical_id))
}

pub(crate) fn levels_by_name<'a, I>(readings: I) -> IndexMap<String, f64>
where
    I: IntoIterator<Item = &'a ReporterReading>,
{
    let mut values = IndexMap::new();
    for r in readings {
        values.insert(r.name.clone(), r.level);
    }
    values
}

pub(crate) fn time_point(time: f64, readings: &[ReporterReading]) -> TimePoint {
    TimePoint {
        time,
        values: levels_by_name(readings),
    }
}

/// Evaluación directa sobre un grafo con opciones por defecto.
pub fn evaluate(
    graph: &RegulatoryGraph,
    time: f64,
    noise: &mut dyn NoiseSource,
) -> Result<IndexMap<String, f64>, SimulationError> {
    let engine = ExpressionEngine::default();
    let network = engine.prepare(graph)?;
    engine.evaluate(&network, time, noise)
}
