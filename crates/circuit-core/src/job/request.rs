use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_DURATION, DEFAULT_TIME_STEP};
use crate::errors::SimulationError;
use crate::series::TimeGrid;

/// Método de simulación. Sólo `Stochastic` está implementado; los demás
/// están reservados.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMethod {
    #[default]
    Stochastic,
    Deterministic,
    Hybrid,
}

impl SimulationMethod {
    pub fn is_implemented(&self) -> bool {
        matches!(self, SimulationMethod::Stochastic)
    }
}

impl fmt::Display for SimulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SimulationMethod::Stochastic => "stochastic",
            SimulationMethod::Deterministic => "deterministic",
            SimulationMethod::Hybrid => "hybrid",
        };
        f.write_str(s)
    }
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_time_step() -> f64 {
    DEFAULT_TIME_STEP
}

/// Petición de creación de un job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    #[serde(default)]
    pub design_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    #[serde(default)]
    pub method: SimulationMethod,
    /// Semilla del ruido; si falta se usa la de configuración o entropía.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for JobRequest {
    fn default() -> Self {
        Self {
            design_id: None,
            name: None,
            description: None,
            duration: DEFAULT_DURATION,
            time_step: DEFAULT_TIME_STEP,
            method: SimulationMethod::default(),
            seed: None,
        }
    }
}

impl JobRequest {
    pub fn for_design(design_id: impl Into<String>) -> Self {
        Self {
            design_id: Some(design_id.into()),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_method(mut self, method: SimulationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Id de diseño no vacío.
    pub fn design_id(&self) -> Result<&str, SimulationError> {
        match self.design_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(SimulationError::InvalidInput("designId is required".to_string())),
        }
    }

    /// Valida la petición completa y devuelve la malla temporal resultante.
    pub fn validate(&self, max_time_points: usize) -> Result<TimeGrid, SimulationError> {
        self.design_id()?;
        if !self.method.is_implemented() {
            return Err(SimulationError::InvalidInput(format!(
                "method '{}' is reserved and not implemented",
                self.method
            )));
        }
        TimeGrid::new(self.duration, self.time_step, max_time_points)
    }

    /// Completa nombre y descripción con los del diseño si no vinieron.
    pub fn with_design_defaults(mut self, design_name: &str) -> Self {
        self.name
            .get_or_insert_with(|| format!("Simulation of {design_name}"));
        self.description.get_or_insert_with(|| {
            format!("Stochastic simulation of gene expression in {design_name}")
        });
        self
    }
}
