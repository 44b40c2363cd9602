//! Aggregate statistics over a run's records

use serde::Serialize;

use super::PipelineRecord;

/// Rates are over all records, errored ones included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub errors: usize,
    pub fallback_count: usize,
    pub fallback_rate: f64,
    pub contradiction_count: usize,
    pub contradiction_rate: f64,
    /// Mean over records that have an entropy
    pub avg_entropy: Option<f64>,
    pub avg_latency: Option<f64>,
}

impl RunSummary {
    pub fn from_records(records: &[PipelineRecord]) -> Self {
        let total = records.len();
        if total == 0 {
            return Self::default();
        }

        let errors = records.iter().filter(|r| r.is_error()).count();
        let fallback_count = records
            .iter()
            .filter(|r| r.routing_decision.is_fallback())
            .count();
        let contradiction_count = records.iter().filter(|r| r.contradiction_flag).count();

        Self {
            total,
            errors,
            fallback_count,
            fallback_rate: fallback_count as f64 / total as f64,
            contradiction_count,
            contradiction_rate: contradiction_count as f64 / total as f64,
            avg_entropy: mean(records.iter().filter_map(|r| r.entropy)),
            avg_latency: mean(records.iter().map(|r| r.latency)),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
