//! Configuration types for bizval
//!
//! Every tunable constant of the valuation engine lives here so it can be
//! reviewed and versioned separately from the code. All sections are
//! optional in the TOML file; omitted values fall back to the defaults.

use crate::valuation::{IndustryMultipleEntry, IndustryTable, ValuationEngine};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is outside its allowed range
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Industry entries merged over the built-in reference table
    #[serde(default)]
    pub industries: Vec<IndustryMultipleEntry>,
}

/// Valuation engine tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub growth: GrowthConfig,
    #[serde(default)]
    pub position: PositionConfig,
    #[serde(default)]
    pub profitability: ProfitabilityConfig,
    #[serde(default)]
    pub recurring: RecurringConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub income: IncomeConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub confidence: ConfidenceConfig,
}

/// Growth step function, thresholds in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    pub high_threshold_pct: Decimal,
    pub high_factor: Decimal,
    pub moderate_threshold_pct: Decimal,
    pub moderate_factor: Decimal,
    pub decline_threshold_pct: Decimal,
    pub decline_factor: Decimal,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            high_threshold_pct: dec!(20),
            high_factor: dec!(1.3),
            moderate_threshold_pct: dec!(10),
            moderate_factor: dec!(1.15),
            decline_threshold_pct: dec!(-5),
            decline_factor: dec!(0.8),
        }
    }
}

/// Multiplier per market position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    pub leader: Decimal,
    pub strong: Decimal,
    pub average: Decimal,
    pub emerging: Decimal,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            leader: dec!(1.2),
            strong: dec!(1.1),
            average: dec!(1.0),
            emerging: dec!(0.9),
        }
    }
}

/// EBITDA margin bands, thresholds as fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitabilityConfig {
    pub high_margin_threshold: Decimal,
    pub high_margin_factor: Decimal,
    pub low_margin_threshold: Decimal,
    pub low_margin_factor: Decimal,
}

impl Default for ProfitabilityConfig {
    fn default() -> Self {
        Self {
            high_margin_threshold: dec!(0.25),
            high_margin_factor: dec!(1.15),
            low_margin_threshold: dec!(0.10),
            low_margin_factor: dec!(0.9),
        }
    }
}

/// Recurring revenue share bands, thresholds as fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurringConfig {
    pub high_share_threshold: Decimal,
    pub high_share_factor: Decimal,
    pub moderate_share_threshold: Decimal,
    pub moderate_share_factor: Decimal,
}

impl Default for RecurringConfig {
    fn default() -> Self {
        Self {
            high_share_threshold: dec!(0.5),
            high_share_factor: dec!(1.2),
            moderate_share_threshold: dec!(0.3),
            moderate_share_factor: dec!(1.1),
        }
    }
}

/// First-match risk discounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub concentration_threshold_pct: Decimal,
    pub concentration_factor: Decimal,
    pub key_person_factor: Decimal,
    pub market_risk_factor: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            concentration_threshold_pct: dec!(50),
            concentration_factor: dec!(0.85),
            key_person_factor: dec!(0.9),
            market_risk_factor: dec!(0.88),
        }
    }
}

/// Single-period income capitalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeConfig {
    pub terminal_multiple: Decimal,
    pub discount_rate: Decimal,
}

impl Default for IncomeConfig {
    fn default() -> Self {
        Self {
            terminal_multiple: dec!(10),
            discount_rate: dec!(0.10),
        }
    }
}

/// Blend weights and the asset floor haircut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub market_weight: Decimal,
    pub income_weight: Decimal,
    pub asset_floor_haircut: Decimal,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            market_weight: dec!(0.7),
            income_weight: dec!(0.3),
            asset_floor_haircut: dec!(0.8),
        }
    }
}

/// Revenue thresholds for the confidence classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub high_revenue_threshold: Decimal,
    pub low_revenue_threshold: Decimal,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            high_revenue_threshold: dec!(500000),
            low_revenue_threshold: dec!(100000),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormatConfig,
}

/// Log output format as written in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatConfig {
    #[default]
    Pretty,
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormatConfig::Pretty,
        }
    }
}

impl EngineConfig {
    /// Reject values that would break the engine's invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = [
            ("growth.high_factor", self.growth.high_factor),
            ("growth.moderate_factor", self.growth.moderate_factor),
            ("growth.decline_factor", self.growth.decline_factor),
            ("position.leader", self.position.leader),
            ("position.strong", self.position.strong),
            ("position.average", self.position.average),
            ("position.emerging", self.position.emerging),
            ("profitability.high_margin_factor", self.profitability.high_margin_factor),
            ("profitability.low_margin_factor", self.profitability.low_margin_factor),
            ("recurring.high_share_factor", self.recurring.high_share_factor),
            ("recurring.moderate_share_factor", self.recurring.moderate_share_factor),
            ("risk.concentration_factor", self.risk.concentration_factor),
            ("risk.key_person_factor", self.risk.key_person_factor),
            ("risk.market_risk_factor", self.risk.market_risk_factor),
            ("income.terminal_multiple", self.income.terminal_multiple),
        ];
        for (field, value) in factors {
            if value <= Decimal::ZERO {
                return Err(ConfigError::invalid(field, format!("must be positive, got {}", value)));
            }
        }

        if self.growth.moderate_threshold_pct > self.growth.high_threshold_pct {
            return Err(ConfigError::invalid(
                "growth.moderate_threshold_pct",
                "must not exceed growth.high_threshold_pct",
            ));
        }
        if self.profitability.low_margin_threshold > self.profitability.high_margin_threshold {
            return Err(ConfigError::invalid(
                "profitability.low_margin_threshold",
                "must not exceed profitability.high_margin_threshold",
            ));
        }
        if self.recurring.moderate_share_threshold > self.recurring.high_share_threshold {
            return Err(ConfigError::invalid(
                "recurring.moderate_share_threshold",
                "must not exceed recurring.high_share_threshold",
            ));
        }
        if self.income.discount_rate <= dec!(-1) {
            return Err(ConfigError::invalid("income.discount_rate", "must be greater than -1"));
        }

        let synthesis = &self.synthesis;
        if synthesis.market_weight < Decimal::ZERO || synthesis.income_weight < Decimal::ZERO {
            return Err(ConfigError::invalid("synthesis", "blend weights must not be negative"));
        }
        if synthesis.market_weight + synthesis.income_weight != Decimal::ONE {
            return Err(ConfigError::invalid("synthesis", "blend weights must sum to 1"));
        }
        if synthesis.asset_floor_haircut < Decimal::ZERO || synthesis.asset_floor_haircut > Decimal::ONE {
            return Err(ConfigError::invalid(
                "synthesis.asset_floor_haircut",
                "must be between 0 and 1",
            ));
        }

        if self.confidence.low_revenue_threshold > self.confidence.high_revenue_threshold {
            return Err(ConfigError::invalid(
                "confidence.low_revenue_threshold",
                "must not exceed confidence.high_revenue_threshold",
            ));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        for entry in &self.industries {
            if entry.industry_key.trim().is_empty() {
                return Err(ConfigError::invalid("industries.industryKey", "must not be empty"));
            }
            if entry.revenue_multiple <= Decimal::ZERO || entry.ebitda_multiple <= Decimal::ZERO {
                return Err(ConfigError::invalid(
                    format!("industries.{}", entry.industry_key),
                    "multiples must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Built-in reference table with this config's overrides applied
    pub fn industry_table(&self) -> IndustryTable {
        IndustryTable::default().with_overrides(self.industries.iter().cloned())
    }

    /// Engine wired with this config
    pub fn build_engine(&self) -> ValuationEngine {
        ValuationEngine::new(self.industry_table(), self.engine.clone())
    }
}
