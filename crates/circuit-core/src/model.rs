//! Forma persistida de los resultados de una simulación.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::stats::Statistics;

/// Niveles de expresión por nombre de reporter en un instante.
///
/// Los nombres de reporter no son únicos entre nodos: si dos reporters
/// comparten nombre, el último declarado sobrescribe al anterior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub time: f64,
    pub values: IndexMap<String, f64>,
}

impl TimePoint {
    pub fn new(time: f64) -> Self {
        Self {
            time,
            values: IndexMap::new(),
        }
    }

    pub fn level(&self, reporter: &str) -> Option<f64> {
        self.values.get(reporter).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResults {
    pub time_points: Vec<TimePoint>,
    pub statistics: Statistics,
}

impl SimulationResults {
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }
}
