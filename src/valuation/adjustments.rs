//! Adjustment factors
//!
//! Growth, market position, profitability and recurring revenue scale the
//! industry revenue multiple. The risk discount is applied later to the
//! final range and point estimate, and only the first matching risk counts.

use super::error::ValuationError;
use super::types::{AdjustmentFactors, MarketPosition, RiskLevel, ValidatedFinancials};
use crate::config::{
    EngineConfig, GrowthConfig, PositionConfig, ProfitabilityConfig, RecurringConfig, RiskConfig,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which risk discount applied, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDiscount {
    CustomerConcentration,
    KeyPersonDependency,
    MarketRisk,
}

impl RiskDiscount {
    pub fn describe(&self) -> &'static str {
        match self {
            RiskDiscount::CustomerConcentration => "customer concentration",
            RiskDiscount::KeyPersonDependency => "key person dependency",
            RiskDiscount::MarketRisk => "market risk",
        }
    }
}

impl GrowthConfig {
    /// Step factor for year-over-year growth in percent
    pub fn factor(&self, growth_pct: Decimal) -> Decimal {
        if growth_pct > self.high_threshold_pct {
            self.high_factor
        } else if growth_pct > self.moderate_threshold_pct {
            self.moderate_factor
        } else if growth_pct < self.decline_threshold_pct {
            self.decline_factor
        } else {
            Decimal::ONE
        }
    }
}

impl PositionConfig {
    pub fn factor(&self, position: MarketPosition) -> Decimal {
        match position {
            MarketPosition::Leader => self.leader,
            MarketPosition::Strong => self.strong,
            MarketPosition::Average => self.average,
            MarketPosition::Emerging => self.emerging,
        }
    }
}

impl ProfitabilityConfig {
    /// Factor for an EBITDA margin expressed as a fraction
    pub fn factor(&self, margin: Decimal) -> Decimal {
        if margin > self.high_margin_threshold {
            self.high_margin_factor
        } else if margin < self.low_margin_threshold {
            self.low_margin_factor
        } else {
            Decimal::ONE
        }
    }
}

impl RecurringConfig {
    /// Factor for the recurring share of revenue as a fraction
    pub fn factor(&self, share: Decimal) -> Decimal {
        if share > self.high_share_threshold {
            self.high_share_factor
        } else if share > self.moderate_share_threshold {
            self.moderate_share_factor
        } else {
            Decimal::ONE
        }
    }
}

impl RiskConfig {
    /// First matching risk discount
    ///
    /// Concentration beats key-person dependency beats market risk.
    /// Discounts never stack.
    pub fn discount(&self, financials: &ValidatedFinancials) -> (Decimal, Option<RiskDiscount>) {
        if financials.customer_concentration_percent > self.concentration_threshold_pct {
            (self.concentration_factor, Some(RiskDiscount::CustomerConcentration))
        } else if financials.key_person_dependency == RiskLevel::High {
            (self.key_person_factor, Some(RiskDiscount::KeyPersonDependency))
        } else if financials.market_risk == RiskLevel::High {
            (self.market_risk_factor, Some(RiskDiscount::MarketRisk))
        } else {
            (Decimal::ONE, None)
        }
    }
}

/// Factors resolved for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAdjustments {
    pub factors: AdjustmentFactors,
    pub risk_discount: Option<RiskDiscount>,
    /// EBITDA / revenue
    pub ebitda_margin: Decimal,
    /// Recurring revenue / revenue
    pub recurring_share: Decimal,
}

impl ResolvedAdjustments {
    /// Evaluate every factor for validated input
    pub fn resolve(
        financials: &ValidatedFinancials,
        config: &EngineConfig,
    ) -> Result<Self, ValuationError> {
        let ebitda_margin = financials.ebitda_margin()?;
        let recurring_share = financials.recurring_share()?;
        let (risk, risk_discount) = config.risk.discount(financials);

        Ok(Self {
            factors: AdjustmentFactors {
                growth: config.growth.factor(financials.revenue_growth_rate_percent),
                market_position: config.position.factor(financials.market_position),
                profitability: config.profitability.factor(ebitda_margin),
                recurring_revenue: config.recurring.factor(recurring_share),
                risk,
            },
            risk_discount,
            ebitda_margin,
            recurring_share,
        })
    }

    /// Apply the multiple-level factors to a base revenue multiple
    pub fn adjust_multiple(&self, base: Decimal) -> Result<Decimal, ValuationError> {
        let f = &self.factors;
        [f.growth, f.market_position, f.profitability, f.recurring_revenue]
            .into_iter()
            .try_fold(base, |acc, factor| acc.checked_mul(factor))
            .ok_or_else(|| ValuationError::overflow("multiple adjustment"))
    }
}
