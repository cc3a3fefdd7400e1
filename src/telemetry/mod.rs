//! Telemetry module
//!
//! Structured logging and valuation metrics

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{record_valuation, CounterMetric};

use crate::config::{LogFormatConfig, TelemetryConfig};

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let format = match config.log_format {
        LogFormatConfig::Pretty => LogFormat::Pretty,
        LogFormatConfig::Json => LogFormat::Json,
    };
    init_logging(&config.log_level, format)?;

    Ok(TelemetryGuard { _priv: () })
}
