//! Valuation input and output types

use super::error::{ParseLabelError, ValuationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Competitive standing of the business in its market
///
/// Callers use either a four-step scale (leader/strong/average/emerging)
/// or a three-step one (leader/competitor/follower). Both map onto this
/// enum: `competitor` is `Strong`, `follower` is `Emerging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketPosition {
    Leader,
    #[serde(alias = "competitor")]
    Strong,
    #[default]
    Average,
    #[serde(alias = "follower")]
    Emerging,
}

impl MarketPosition {
    /// Canonical lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketPosition::Leader => "leader",
            MarketPosition::Strong => "strong",
            MarketPosition::Average => "average",
            MarketPosition::Emerging => "emerging",
        }
    }

    /// Resolve a canonical or legacy label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "leader" => Some(MarketPosition::Leader),
            "strong" | "competitor" => Some(MarketPosition::Strong),
            "average" => Some(MarketPosition::Average),
            "emerging" | "follower" => Some(MarketPosition::Emerging),
            _ => None,
        }
    }
}

impl fmt::Display for MarketPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketPosition {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ParseLabelError {
            kind: "market position",
            label: s.to_string(),
        })
    }
}

/// Three-level qualitative risk rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(ParseLabelError {
                kind: "risk level",
                label: s.to_string(),
            }),
        }
    }
}

/// Raw valuation request as collected from a form
///
/// Every numeric field is optional here so the validator can report
/// missing required fields alongside invalid ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFinancials {
    /// Industry label, matched exactly against the reference table
    #[serde(default)]
    pub industry: String,
    pub annual_revenue: Option<Decimal>,
    pub ebitda: Option<Decimal>,
    pub total_assets: Option<Decimal>,
    pub total_liabilities: Option<Decimal>,
    /// Year-over-year growth in percent (15 = 15%)
    pub revenue_growth_rate_percent: Option<Decimal>,
    pub market_position: Option<MarketPosition>,
    pub recurring_revenue: Option<Decimal>,
    /// Share of revenue from the largest customers, in percent
    pub customer_concentration_percent: Option<Decimal>,
    pub key_person_dependency: Option<RiskLevel>,
    pub market_risk: Option<RiskLevel>,
}

impl BusinessFinancials {
    /// Start a request with the two required figures
    pub fn new(industry: impl Into<String>, annual_revenue: Decimal, ebitda: Decimal) -> Self {
        Self {
            industry: industry.into(),
            annual_revenue: Some(annual_revenue),
            ebitda: Some(ebitda),
            ..Default::default()
        }
    }

    pub fn with_assets(mut self, total_assets: Decimal, total_liabilities: Decimal) -> Self {
        self.total_assets = Some(total_assets);
        self.total_liabilities = Some(total_liabilities);
        self
    }

    pub fn with_growth(mut self, percent: Decimal) -> Self {
        self.revenue_growth_rate_percent = Some(percent);
        self
    }

    pub fn with_position(mut self, position: MarketPosition) -> Self {
        self.market_position = Some(position);
        self
    }

    pub fn with_recurring_revenue(mut self, recurring: Decimal) -> Self {
        self.recurring_revenue = Some(recurring);
        self
    }

    pub fn with_customer_concentration(mut self, percent: Decimal) -> Self {
        self.customer_concentration_percent = Some(percent);
        self
    }

    pub fn with_key_person_dependency(mut self, level: RiskLevel) -> Self {
        self.key_person_dependency = Some(level);
        self
    }

    pub fn with_market_risk(mut self, level: RiskLevel) -> Self {
        self.market_risk = Some(level);
        self
    }
}

/// Fully-defaulted input that passed validation
///
/// Only the validator constructs this, so `annual_revenue > 0` holds
/// and ratio helpers never divide by zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ValidatedFinancials {
    pub industry: String,
    pub annual_revenue: Decimal,
    pub ebitda: Decimal,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub revenue_growth_rate_percent: Decimal,
    pub market_position: MarketPosition,
    pub recurring_revenue: Decimal,
    pub customer_concentration_percent: Decimal,
    pub key_person_dependency: RiskLevel,
    pub market_risk: RiskLevel,
}

impl ValidatedFinancials {
    /// EBITDA / revenue as a fraction
    pub fn ebitda_margin(&self) -> Result<Decimal, ValuationError> {
        self.ebitda
            .checked_div(self.annual_revenue)
            .ok_or_else(|| ValuationError::overflow("ebitda margin"))
    }

    /// Recurring revenue / revenue as a fraction
    pub fn recurring_share(&self) -> Result<Decimal, ValuationError> {
        self.recurring_revenue
            .checked_div(self.annual_revenue)
            .ok_or_else(|| ValuationError::overflow("recurring revenue share"))
    }

    /// Total assets minus total liabilities; negative when insolvent
    pub fn net_assets(&self) -> Result<Decimal, ValuationError> {
        self.total_assets
            .checked_sub(self.total_liabilities)
            .ok_or_else(|| ValuationError::overflow("net assets"))
    }
}

/// Data-quality classification of an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        })
    }
}

/// Low / median / high valuation band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationRange {
    pub low: Decimal,
    pub median: Decimal,
    pub high: Decimal,
}

impl ValuationRange {
    /// `low <= median <= high`
    pub fn is_ordered(&self) -> bool {
        self.low <= self.median && self.median <= self.high
    }
}

/// Raw value produced by each method, before the risk discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodBreakdown {
    pub market_multiple: Decimal,
    pub ebitda_multiple: Decimal,
    pub income_based: Decimal,
    /// Liquidation floor (net assets after haircut, never negative)
    pub asset_based: Decimal,
}

/// Multiples used by the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Multiples {
    /// Industry baseline after every multiple-level adjustment
    pub revenue_multiple: Decimal,
    pub ebitda_multiple: Decimal,
    /// Unadjusted industry revenue multiple
    pub industry_baseline: Decimal,
}

/// Factors applied on the way to the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentFactors {
    pub growth: Decimal,
    pub market_position: Decimal,
    pub profitability: Decimal,
    pub recurring_revenue: Decimal,
    /// Discount applied to the final range and point estimate
    pub risk: Decimal,
}

/// Complete valuation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub point_estimate: Decimal,
    pub range: ValuationRange,
    pub method_breakdown: MethodBreakdown,
    pub multiples: Multiples,
    pub adjustments: AdjustmentFactors,
    pub confidence_level: ConfidenceLevel,
    pub key_drivers: Vec<String>,
}
