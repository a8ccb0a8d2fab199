//! Malla temporal y sumideros de serie.
//!
//! Batch e interactivo comparten el mismo `Simulator`; sólo difieren en cómo
//! avanzan el tiempo y en cuánto historial retienen (`FullSeries` vs
//! `RollingWindow`).
use std::collections::VecDeque;

use crate::errors::SimulationError;
use crate::model::TimePoint;

/// Instantes `i * time_step` para `i = 0..=steps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    time_step: f64,
    steps: usize,
}

impl TimeGrid {
    /// Valida duración y paso y acota la cantidad de puntos a `max_points`.
    pub fn new(duration: f64, time_step: f64, max_points: usize) -> Result<Self, SimulationError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "duration must be a positive number, got {duration}"
            )));
        }
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "timeStep must be a positive number, got {time_step}"
            )));
        }
        let steps = (duration / time_step).floor();
        if !steps.is_finite() || steps + 1.0 > max_points as f64 {
            return Err(SimulationError::InvalidInput(format!(
                "duration/timeStep yields {} time points, limit is {max_points}",
                steps + 1.0
            )));
        }
        Ok(Self {
            time_step,
            steps: steps as usize,
        })
    }

    /// Cantidad de puntos (`steps + 1`).
    pub fn len(&self) -> usize {
        self.steps + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.steps).map(move |i| i as f64 * self.time_step)
    }
}

/// Consumidor de puntos producidos por el simulador.
pub trait SeriesSink {
    fn accept(&mut self, point: TimePoint);
}

/// Retiene todos los puntos (corrida batch).
#[derive(Debug, Clone, Default)]
pub struct FullSeries {
    points: Vec<TimePoint>,
}

impl FullSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<TimePoint> {
        self.points
    }
}

impl SeriesSink for FullSeries {
    fn accept(&mut self, point: TimePoint) {
        self.points.push(point);
    }
}

/// Ventana acotada con los `capacity` puntos más recientes.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    points: VecDeque<TimePoint>,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&TimePoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimePoint> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<TimePoint> {
        self.points.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl SeriesSink for RollingWindow {
    fn accept(&mut self, point: TimePoint) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }
}
