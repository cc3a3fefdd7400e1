//! Valuation methods
//!
//! Each method produces an independent raw value from validated input and
//! the resolved industry entry. Earnings-based methods never go below zero;
//! the asset method is a liquidation floor rather than a blended input.

use super::error::ValuationError;
use super::industry::IndustryMultipleEntry;
use super::types::ValidatedFinancials;
use crate::config::{IncomeConfig, SynthesisConfig};
use rust_decimal::Decimal;

/// Everything a method may look at
#[derive(Debug, Clone)]
pub struct MethodInputs<'a> {
    pub financials: &'a ValidatedFinancials,
    pub industry: &'a IndustryMultipleEntry,
    /// Industry revenue multiple after growth/position/margin/recurring factors
    pub adjusted_revenue_multiple: Decimal,
}

/// Trait for valuation method implementations
pub trait ValuationMethod: Send + Sync {
    /// Short method name, used in logs
    fn name(&self) -> &'static str;
    /// Raw value for the given inputs
    fn value(&self, inputs: &MethodInputs<'_>) -> Result<Decimal, ValuationError>;
}

fn mul(a: Decimal, b: Decimal, stage: &'static str) -> Result<Decimal, ValuationError> {
    a.checked_mul(b).ok_or_else(|| ValuationError::overflow(stage))
}

/// Revenue times the adjusted industry multiple
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketMultipleMethod;

impl ValuationMethod for MarketMultipleMethod {
    fn name(&self) -> &'static str {
        "market multiple"
    }

    fn value(&self, inputs: &MethodInputs<'_>) -> Result<Decimal, ValuationError> {
        let value = mul(
            inputs.financials.annual_revenue,
            inputs.adjusted_revenue_multiple,
            self.name(),
        )?;
        Ok(value.max(Decimal::ZERO))
    }
}

/// EBITDA times the industry EBITDA multiple
///
/// The built-in table derives EBITDA multiples as three times the revenue
/// multiple, which is a rough heuristic rather than market data.
#[derive(Debug, Clone, Copy, Default)]
pub struct EbitdaMultipleMethod;

impl ValuationMethod for EbitdaMultipleMethod {
    fn name(&self) -> &'static str {
        "ebitda multiple"
    }

    fn value(&self, inputs: &MethodInputs<'_>) -> Result<Decimal, ValuationError> {
        let value = mul(
            inputs.financials.ebitda,
            inputs.industry.ebitda_multiple,
            self.name(),
        )?;
        Ok(value.max(Decimal::ZERO))
    }
}

/// Income-style single-period capitalization
///
/// EBITDA grown one period at the industry rate, capitalized at a fixed
/// terminal multiple and discounted one period. Not a multi-year DCF.
#[derive(Debug, Clone)]
pub struct IncomeMethod {
    pub terminal_multiple: Decimal,
    pub discount_rate: Decimal,
}

impl IncomeMethod {
    pub fn new(terminal_multiple: Decimal, discount_rate: Decimal) -> Self {
        Self {
            terminal_multiple,
            discount_rate,
        }
    }

    pub fn from_config(config: &IncomeConfig) -> Self {
        Self::new(config.terminal_multiple, config.discount_rate)
    }
}

impl ValuationMethod for IncomeMethod {
    fn name(&self) -> &'static str {
        "income capitalization"
    }

    fn value(&self, inputs: &MethodInputs<'_>) -> Result<Decimal, ValuationError> {
        let projected = mul(
            inputs.financials.ebitda,
            Decimal::ONE + inputs.industry.growth_rate,
            self.name(),
        )?;
        let capitalized = mul(projected, self.terminal_multiple, self.name())?;
        let value = capitalized
            .checked_div(Decimal::ONE + self.discount_rate)
            .ok_or_else(|| ValuationError::overflow(self.name()))?;
        Ok(value.max(Decimal::ZERO))
    }
}

/// Net assets after a liquidation haircut, clamped at zero
#[derive(Debug, Clone)]
pub struct AssetFloorMethod {
    pub haircut: Decimal,
}

impl AssetFloorMethod {
    pub fn new(haircut: Decimal) -> Self {
        Self { haircut }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.asset_floor_haircut)
    }
}

impl ValuationMethod for AssetFloorMethod {
    fn name(&self) -> &'static str {
        "asset floor"
    }

    fn value(&self, inputs: &MethodInputs<'_>) -> Result<Decimal, ValuationError> {
        let net_assets = inputs.financials.net_assets()?;
        let floor = mul(net_assets, self.haircut, self.name())?;
        Ok(floor.max(Decimal::ZERO))
    }
}
