//! Synthesis of method outputs into the final estimate
//!
//! The range comes from dispersion across the market, income and asset
//! methods. Confidence is a data-quality signal and ignores how wide the range is.

use super::adjustments::ResolvedAdjustments;
use super::error::ValuationError;
use super::industry::IndustryMultipleEntry;
use super::types::{ConfidenceLevel, ValidatedFinancials, ValuationRange};
use crate::config::{ConfidenceConfig, SynthesisConfig};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Decimal places kept on monetary outputs
pub const MONEY_DP: u32 = 2;

/// Round a monetary value to cents
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp(MONEY_DP)
}

/// Weighted blend of the market-multiple and income values
pub fn blend(
    market: Decimal,
    income: Decimal,
    config: &SynthesisConfig,
) -> Result<Decimal, ValuationError> {
    let market_part = market
        .checked_mul(config.market_weight)
        .ok_or_else(|| ValuationError::overflow("blend"))?;
    let income_part = income
        .checked_mul(config.income_weight)
        .ok_or_else(|| ValuationError::overflow("blend"))?;
    market_part
        .checked_add(income_part)
        .ok_or_else(|| ValuationError::overflow("blend"))
}

/// Risk-adjusted point estimate, never below the asset floor
pub fn point_estimate(
    blended: Decimal,
    risk_factor: Decimal,
    asset_floor: Decimal,
) -> Result<Decimal, ValuationError> {
    let adjusted = blended
        .checked_mul(risk_factor)
        .ok_or_else(|| ValuationError::overflow("risk discount"))?;
    Ok(adjusted.max(asset_floor))
}

/// Range across method values
///
/// `low`/`high` are the min/max method value after the risk discount and
/// `median` is their midpoint. Values are rounded to cents, which keeps the
/// ordering intact.
pub fn valuation_range(
    method_values: &[Decimal],
    risk_factor: Decimal,
) -> Result<ValuationRange, ValuationError> {
    let min = method_values.iter().copied().min().unwrap_or(Decimal::ZERO);
    let max = method_values.iter().copied().max().unwrap_or(Decimal::ZERO);

    let discount = |value: Decimal| {
        value
            .checked_mul(risk_factor)
            .map(round_money)
            .ok_or_else(|| ValuationError::overflow("range"))
    };
    let low = discount(min)?;
    let high = discount(max)?;
    let median = low
        .checked_add(high)
        .map(|sum| round_money(sum / dec!(2)))
        .ok_or_else(|| ValuationError::overflow("range"))?;

    Ok(ValuationRange { low, median, high })
}

/// Classify input quality
///
/// `High` needs meaningful revenue, positive EBITDA and positive growth.
/// `Low` covers tiny revenue or losses. Everything else is `Medium`.
pub fn classify_confidence(
    financials: &ValidatedFinancials,
    config: &ConfidenceConfig,
) -> ConfidenceLevel {
    if financials.annual_revenue > config.high_revenue_threshold
        && financials.ebitda > Decimal::ZERO
        && financials.revenue_growth_rate_percent > Decimal::ZERO
    {
        ConfidenceLevel::High
    } else if financials.annual_revenue < config.low_revenue_threshold
        || financials.ebitda < Decimal::ZERO
    {
        ConfidenceLevel::Low
    } else {
        ConfidenceLevel::Medium
    }
}

fn one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn percent(fraction: Decimal) -> Result<Decimal, ValuationError> {
    fraction
        .checked_mul(dec!(100))
        .map(one_decimal)
        .ok_or_else(|| ValuationError::overflow("key drivers"))
}

/// Explanation strings in fixed order
///
/// industry multiple, growth, position, margin, recurring share, and a
/// trailing risk line only when a discount applied.
pub fn key_drivers(
    financials: &ValidatedFinancials,
    industry: &IndustryMultipleEntry,
    industry_matched: bool,
    adjustments: &ResolvedAdjustments,
) -> Result<Vec<String>, ValuationError> {
    let industry_line = if industry_matched {
        format!(
            "Industry multiple: {}x revenue ({})",
            industry.revenue_multiple.normalize(),
            industry.industry_key
        )
    } else {
        format!(
            "Industry multiple: {}x revenue ({} baseline, '{}' not in reference table)",
            industry.revenue_multiple.normalize(),
            industry.industry_key,
            financials.industry
        )
    };

    let mut drivers = vec![
        industry_line,
        format!(
            "Revenue growth: {:.1}%",
            one_decimal(financials.revenue_growth_rate_percent)
        ),
        format!("Market position: {}", financials.market_position),
        format!("EBITDA margin: {:.1}%", percent(adjustments.ebitda_margin)?),
        format!(
            "Recurring revenue: {:.1}% of revenue",
            percent(adjustments.recurring_share)?
        ),
    ];

    if let Some(discount) = adjustments.risk_discount {
        drivers.push(format!(
            "Risk discount: x{} ({})",
            adjustments.factors.risk.normalize(),
            discount.describe()
        ));
    }

    Ok(drivers)
}
