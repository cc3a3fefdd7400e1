//! Valuation metrics
//!
//! Emitted through the `metrics` facade; they are no-ops until the host
//! application installs a recorder.

use crate::valuation::{ValuationError, ValuationResult};
use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    /// Valuations that produced a result
    ValuationsComputed,
    /// Requests rejected by input validation
    ValidationFailures,
    /// Requests that failed on an arithmetic invariant
    ComputationFailures,
}

impl CounterMetric {
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::ValuationsComputed => "bizval_valuations_total",
            CounterMetric::ValidationFailures => "bizval_validation_failures_total",
            CounterMetric::ComputationFailures => "bizval_computation_failures_total",
        }
    }
}

const DURATION_METRIC: &str = "bizval_valuation_duration_us";

/// Record the outcome and latency of one valuation call
pub fn record_valuation(outcome: &Result<ValuationResult, ValuationError>, elapsed: Duration) {
    let counter = match outcome {
        Ok(_) => CounterMetric::ValuationsComputed,
        Err(ValuationError::Validation(_)) => CounterMetric::ValidationFailures,
        Err(ValuationError::Computation { .. }) => CounterMetric::ComputationFailures,
    };

    metrics::counter!(counter.name()).increment(1);
    metrics::histogram!(DURATION_METRIC).record(elapsed.as_secs_f64() * 1_000_000.0);

    tracing::trace!(
        metric = counter.name(),
        elapsed_us = elapsed.as_micros() as u64,
        "Recorded valuation"
    );
}
