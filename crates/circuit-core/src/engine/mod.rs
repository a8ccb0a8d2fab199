//! Motor de expresión génica.
//!
//! - `ExpressionEngine`: función pura (red, tiempo, ruido) -> niveles por
//!   reporter.
//! - `Simulator`: red + motor + ruido; produce un `TimePoint` por tick y lo
//!   entrega a un `SeriesSink`.

mod expression;
mod simulator;

pub use expression::{evaluate, EngineOptions, ExpressionEngine, ReporterReading};
pub use simulator::Simulator;

pub(crate) use expression::time_point;
