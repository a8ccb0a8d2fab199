//! Constantes del motor de expresión.
//!
//! `ENGINE_VERSION` entra en el fingerprint de resultados: cambiarla invalida
//! la comparación entre corridas de versiones distintas aunque la semilla y
//! el grafo coincidan.

pub const ENGINE_VERSION: &str = "E1.0";

/// Frecuencia (rad por unidad de tiempo) de la componente sinusoidal del ruido.
pub const NOISE_FREQUENCY: f64 = 0.1;
/// Amplitud de la componente sinusoidal.
pub const NOISE_AMPLITUDE: f64 = 10.0;
/// Cota superior (exclusiva) del jitter uniforme.
pub const NOISE_JITTER_MAX: f64 = 5.0;

/// Factor aplicado a un promotor inducible con represor activo.
pub const REPRESSION_FACTOR: f64 = 0.3;

pub const LEVEL_MIN: f64 = 0.0;
pub const LEVEL_MAX: f64 = 100.0;

pub const DEFAULT_DURATION: f64 = 100.0;
pub const DEFAULT_TIME_STEP: f64 = 0.1;

/// Tope de puntos por corrida batch (acota la memoria de `results`).
pub const DEFAULT_MAX_TIME_POINTS: usize = 1_000_000;
/// Puntos retenidos por la vista interactiva.
pub const DEFAULT_LIVE_WINDOW: usize = 100;

pub const DEFAULT_REPORTER_COLOR: &str = "green";
pub const DEFAULT_PAGE_LIMIT: usize = 20;
