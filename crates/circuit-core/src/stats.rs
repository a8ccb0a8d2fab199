//! Reducción de una serie temporal a media/mín/máx por reporter.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;
use crate::model::TimePoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReporterStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub reporters: IndexMap<String, ReporterStats>,
}

pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// Agrega la serie completa. Un reporter ausente en un punto cuenta como
    /// nivel 0. Serie vacía -> `EmptySeries`.
    pub fn aggregate(
        points: &[TimePoint],
        reporter_names: &[String],
    ) -> Result<Statistics, SimulationError> {
        if points.is_empty() {
            return Err(SimulationError::EmptySeries);
        }
        let mut reporters = IndexMap::with_capacity(reporter_names.len());
        for name in reporter_names {
            reporters.insert(name.clone(), Self::reduce(points, name));
        }
        Ok(Statistics { reporters })
    }

    fn reduce(points: &[TimePoint], name: &str) -> ReporterStats {
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for p in points {
            let v = p.level(name).unwrap_or(0.0);
            sum += v;
            max = max.max(v);
            min = min.min(v);
        }
        // el redondeo de la suma puede sacar la media un ulp fuera de [min, max]
        let mean = (sum / points.len() as f64).clamp(min, max);
        ReporterStats { mean, max, min }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: f64, values: &[(&str, f64)]) -> TimePoint {
        let mut p = TimePoint::new(time);
        for (k, v) in values {
            p.values.insert(k.to_string(), *v);
        }
        p
    }

    #[test]
    fn mean_min_max_over_series() {
        let pts = vec![
            point(0.0, &[("GFP", 10.0)]),
            point(1.0, &[("GFP", 30.0)]),
            point(2.0, &[("GFP", 20.0)]),
        ];
        let stats = StatisticsAggregator::aggregate(&pts, &["GFP".to_string()]).unwrap();
        let gfp = stats.reporters["GFP"];
        assert_eq!(
            gfp,
            ReporterStats {
                mean: 20.0,
                max: 30.0,
                min: 10.0,
            }
        );
    }

    #[test]
    fn missing_values_count_as_zero() {
        let pts = vec![point(0.0, &[("GFP", 10.0)]), point(1.0, &[])];
        let stats = StatisticsAggregator::aggregate(&pts, &["GFP".to_string()]).unwrap();
        assert_eq!(stats.reporters["GFP"].min, 0.0);
        assert_eq!(stats.reporters["GFP"].mean, 5.0);
    }

    #[test]
    fn empty_series_fails() {
        let err = StatisticsAggregator::aggregate(&[], &["GFP".to_string()]).unwrap_err();
        assert_eq!(err, SimulationError::EmptySeries);
    }

    #[test]
    fn no_reporters_yields_empty_map() {
        let stats = StatisticsAggregator::aggregate(&[point(0.0, &[])], &[]).unwrap();
        assert!(stats.reporters.is_empty());
    }

    #[test]
    fn constant_series_mean_stays_within_bounds() {
        let pts: Vec<TimePoint> = (0..7).map(|i| point(i as f64, &[("R", 0.1)])).collect();
        let s = StatisticsAggregator::aggregate(&pts, &["R".to_string()])
            .unwrap()
            .reporters["R"];
        assert!(s.min <= s.mean && s.mean <= s.max);
    }
}
