//! Input validation
//!
//! Checks every field of a [`BusinessFinancials`] candidate and collects
//! all violations at once so a form can highlight them together.

use super::error::FieldError;
use super::types::{BusinessFinancials, ValidatedFinancials};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CONCENTRATION_MIN: Decimal = dec!(0);
const CONCENTRATION_MAX: Decimal = dec!(100);

/// Validate a candidate and apply neutral defaults to omitted fields
pub fn validate(input: &BusinessFinancials) -> Result<ValidatedFinancials, Vec<FieldError>> {
    let mut errors = Vec::new();

    let annual_revenue = match input.annual_revenue {
        None => {
            errors.push(FieldError::required("annualRevenue"));
            Decimal::ZERO
        }
        Some(revenue) => {
            if revenue <= Decimal::ZERO {
                errors.push(FieldError::not_positive("annualRevenue", revenue));
            }
            revenue
        }
    };

    // Any sign is fine, it just has to be there
    let ebitda = match input.ebitda {
        None => {
            errors.push(FieldError::required("ebitda"));
            Decimal::ZERO
        }
        Some(ebitda) => ebitda,
    };

    let total_assets = non_negative(input.total_assets, "totalAssets", &mut errors);
    let total_liabilities = non_negative(input.total_liabilities, "totalLiabilities", &mut errors);
    let recurring_revenue = non_negative(input.recurring_revenue, "recurringRevenue", &mut errors);

    let customer_concentration_percent = input.customer_concentration_percent.unwrap_or_default();
    if customer_concentration_percent < CONCENTRATION_MIN
        || customer_concentration_percent > CONCENTRATION_MAX
    {
        errors.push(FieldError::out_of_range(
            "customerConcentrationPercent",
            CONCENTRATION_MIN,
            CONCENTRATION_MAX,
            customer_concentration_percent,
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedFinancials {
        industry: input.industry.trim().to_string(),
        annual_revenue,
        ebitda,
        total_assets,
        total_liabilities,
        revenue_growth_rate_percent: input.revenue_growth_rate_percent.unwrap_or_default(),
        market_position: input.market_position.unwrap_or_default(),
        recurring_revenue,
        customer_concentration_percent,
        key_person_dependency: input.key_person_dependency.unwrap_or_default(),
        market_risk: input.market_risk.unwrap_or_default(),
    })
}

fn non_negative(value: Option<Decimal>, field: &str, errors: &mut Vec<FieldError>) -> Decimal {
    let value = value.unwrap_or_default();
    if value < Decimal::ZERO {
        errors.push(FieldError::negative(field, value));
    }
    value
}
