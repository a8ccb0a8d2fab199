//! Configuración del motor desde variables de entorno.
//!
//! Convención `GENCIRCUIT_*`. El archivo `.env` se carga una sola vez y de
//! forma perezosa; si no existe se ignora.

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

use crate::constants::{DEFAULT_LIVE_WINDOW, DEFAULT_MAX_TIME_POINTS};
use crate::engine::EngineOptions;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv();
});

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Máximo de TimePoints aceptado por corrida batch.
    pub max_time_points: usize,
    /// Capacidad de la ventana de la sesión interactiva.
    pub live_window: usize,
    /// Validación estricta de atributos y forma del grafo.
    pub strict: bool,
    /// Semilla fija para todas las corridas (reproducibilidad / auditoría).
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_time_points: DEFAULT_MAX_TIME_POINTS,
            live_window: DEFAULT_LIVE_WINDOW,
            strict: false,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let max_time_points = env::var("GENCIRCUIT_MAX_TIME_POINTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.max_time_points);
        let live_window = env::var("GENCIRCUIT_LIVE_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.live_window);
        let strict = env::var("GENCIRCUIT_STRICT")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let seed = env::var("GENCIRCUIT_SEED").ok().and_then(|v| v.parse().ok());
        Self {
            max_time_points,
            live_window,
            strict,
            seed,
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            strict: self.strict,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
