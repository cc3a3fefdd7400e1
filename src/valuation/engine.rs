//! Valuation engine facade

use super::adjustments::ResolvedAdjustments;
use super::error::ValuationError;
use super::industry::IndustryTable;
use super::methods::{
    AssetFloorMethod, EbitdaMultipleMethod, IncomeMethod, MarketMultipleMethod, MethodInputs,
    ValuationMethod,
};
use super::synthesis::{
    blend, classify_confidence, key_drivers, point_estimate, round_money, valuation_range,
};
use super::types::{
    BusinessFinancials, MethodBreakdown, Multiples, ValidatedFinancials, ValuationResult,
};
use super::validator::validate;
use crate::config::EngineConfig;
use crate::telemetry;
use std::time::Instant;

/// Stateless valuation engine
///
/// Holds only the read-only industry table and tunables, so one instance
/// can be shared across threads and called concurrently.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    table: IndustryTable,
    config: EngineConfig,
}

impl ValuationEngine {
    /// Create an engine from an explicit table and config
    pub fn new(table: IndustryTable, config: EngineConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &IndustryTable {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate input and compute a full valuation
    ///
    /// Returns either a complete result or an error, never a partial one.
    pub fn compute_valuation(
        &self,
        input: BusinessFinancials,
    ) -> Result<ValuationResult, ValuationError> {
        let started = Instant::now();

        let outcome = match validate(&input) {
            Ok(financials) => self.value_validated(&financials),
            Err(errors) => {
                tracing::debug!(
                    industry = %input.industry,
                    fields = errors.len(),
                    "Valuation input rejected"
                );
                Err(ValuationError::Validation(errors))
            }
        };

        if let Err(ValuationError::Computation { stage, reason }) = &outcome {
            tracing::error!(stage = %stage, reason = %reason, "Valuation computation failed");
        }
        telemetry::record_valuation(&outcome, started.elapsed());

        outcome
    }

    /// Compute a valuation for input that already passed validation
    pub fn value_validated(
        &self,
        financials: &ValidatedFinancials,
    ) -> Result<ValuationResult, ValuationError> {
        let (industry, matched) = self.table.resolve(&financials.industry);
        if !matched {
            tracing::debug!(
                industry = %financials.industry,
                fallback = %industry.industry_key,
                "Industry not in reference table, using fallback"
            );
        }

        let adjustments = ResolvedAdjustments::resolve(financials, &self.config)?;
        let adjusted_revenue_multiple = adjustments.adjust_multiple(industry.revenue_multiple)?;

        let inputs = MethodInputs {
            financials,
            industry,
            adjusted_revenue_multiple,
        };
        let market = MarketMultipleMethod.value(&inputs)?;
        let ebitda = EbitdaMultipleMethod.value(&inputs)?;
        let income = IncomeMethod::from_config(&self.config.income).value(&inputs)?;
        let asset_floor = AssetFloorMethod::from_config(&self.config.synthesis).value(&inputs)?;

        let risk = adjustments.factors.risk;
        let blended = blend(market, income, &self.config.synthesis)?;
        let point = round_money(point_estimate(blended, risk, asset_floor)?);
        let range = valuation_range(&[market, income, asset_floor], risk)?;

        if !range.is_ordered() {
            return Err(ValuationError::Computation {
                stage: "synthesis",
                reason: format!(
                    "unordered range {}..{}..{}",
                    range.low, range.median, range.high
                ),
            });
        }
        let drivers = key_drivers(financials, industry, matched, &adjustments)?;

        let result = ValuationResult {
            point_estimate: point,
            range,
            method_breakdown: MethodBreakdown {
                market_multiple: round_money(market),
                ebitda_multiple: round_money(ebitda),
                income_based: round_money(income),
                asset_based: round_money(asset_floor),
            },
            multiples: Multiples {
                revenue_multiple: adjusted_revenue_multiple,
                ebitda_multiple: industry.ebitda_multiple,
                industry_baseline: industry.revenue_multiple,
            },
            adjustments: adjustments.factors,
            confidence_level: classify_confidence(financials, &self.config.confidence),
            key_drivers: drivers,
        };

        tracing::debug!(
            industry = %industry.industry_key,
            point_estimate = %result.point_estimate,
            confidence = %result.confidence_level,
            "Valuation computed"
        );

        Ok(result)
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(IndustryTable::default(), EngineConfig::default())
    }
}

/// Compute a valuation with the built-in table and default tunables
pub fn compute_valuation(input: BusinessFinancials) -> Result<ValuationResult, ValuationError> {
    ValuationEngine::default().compute_valuation(input)
}
