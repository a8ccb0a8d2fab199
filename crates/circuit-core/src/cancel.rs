//! Cancelación cooperativa de corridas largas.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::SimulationError;

/// Bandera compartida; el loop de simulación la consulta antes de cada paso.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), SimulationError> {
        if self.is_cancelled() {
            Err(SimulationError::Cancelled)
        } else {
            Ok(())
        }
    }
}
