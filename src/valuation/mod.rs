//! Business valuation engine
//!
//! Turns self-reported financials into an estimated value, a range, a
//! confidence level and the drivers behind the number. The pipeline is
//! validate → adjust multiples → run methods → synthesize, with every stage
//! a pure function of its inputs.

mod adjustments;
mod engine;
mod error;
mod industry;
mod methods;
mod synthesis;
mod types;
mod validator;

pub use adjustments::{ResolvedAdjustments, RiskDiscount};
pub use engine::{compute_valuation, ValuationEngine};
pub use error::{FieldError, ParseLabelError, ValuationError};
pub use industry::{IndustryMultipleEntry, IndustryTable, OTHER_INDUSTRY};
pub use methods::{
    AssetFloorMethod, EbitdaMultipleMethod, IncomeMethod, MarketMultipleMethod, MethodInputs,
    ValuationMethod,
};
pub use synthesis::{classify_confidence, MONEY_DP};
pub use types::{
    AdjustmentFactors, BusinessFinancials, ConfidenceLevel, MarketPosition, MethodBreakdown,
    Multiples, RiskLevel, ValidatedFinancials, ValuationRange, ValuationResult,
};
pub use validator::validate;
