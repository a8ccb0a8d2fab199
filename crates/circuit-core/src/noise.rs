//! Fuentes de ruido inyectables.
//!
//! El término aleatorio del modelo de expresión se obtiene siempre de un
//! `NoiseSource` explícito: con la misma semilla dos corridas producen la
//! misma serie.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait NoiseSource {
    /// Muestra uniforme en `[low, high)`. Si el rango es vacío devuelve `low`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

/// Generador sembrado; conserva la semilla para poder reproducir la corrida.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    seed: u64,
    rng: StdRng,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Semilla tomada de la entropía del sistema (y registrada).
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl NoiseSource for SeededNoise {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if !(high > low) {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}

/// Mayor fracción representable por debajo de 1; mantiene el rango semiabierto.
const MAX_FRACTION: f64 = 1.0 - f64::EPSILON;

/// Ruido constante: devuelve siempre la misma fracción del rango pedido.
///
/// La fracción se acota a `[0, 1)`, así que `high` nunca se alcanza.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise {
    fraction: f64,
}

impl FixedNoise {
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction: fraction.clamp(0.0, MAX_FRACTION),
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0)
    }
}

impl NoiseSource for FixedNoise {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.fraction
    }
}
