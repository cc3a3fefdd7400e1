//! Property tests for valuation invariants

use bizval::valuation::{
    validate, BusinessFinancials, ConfidenceLevel, IndustryTable, MarketMultipleMethod,
    MarketPosition, MethodInputs, RiskLevel, ValidatedFinancials, ValuationEngine, ValuationMethod,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const INDUSTRIES: &[&str] = &[
    "Technology",
    "Healthcare",
    "Financial Services",
    "Real Estate",
    "Manufacturing",
    "Retail",
    "Food & Beverage",
    "Consulting",
    "Marketing & Advertising",
    "Transportation",
    "Construction",
    "Other",
    "Underwater Basket Weaving",
];

fn money(max: i64) -> impl Strategy<Value = Decimal> {
    (0..=max).prop_map(Decimal::from)
}

fn position() -> impl Strategy<Value = MarketPosition> {
    prop::sample::select(vec![
        MarketPosition::Leader,
        MarketPosition::Strong,
        MarketPosition::Average,
        MarketPosition::Emerging,
    ])
}

fn risk_level() -> impl Strategy<Value = RiskLevel> {
    prop::sample::select(vec![RiskLevel::Low, RiskLevel::Medium, RiskLevel::High])
}

prop_compose! {
    fn financials()(
        industry in prop::sample::select(INDUSTRIES.to_vec()),
        revenue in (1i64..=1_000_000_000).prop_map(Decimal::from),
        ebitda in (-100_000_000i64..=300_000_000).prop_map(Decimal::from),
        assets in money(1_000_000_000),
        liabilities in money(1_000_000_000),
        growth in (-500i64..=1500).prop_map(|g| Decimal::new(g, 1)),
        position in position(),
        recurring_pct in 0u32..=100,
        concentration in (0i64..=1000).prop_map(|c| Decimal::new(c, 1)),
        key_person in risk_level(),
        market_risk in risk_level(),
    ) -> BusinessFinancials {
        let recurring = (revenue * Decimal::from(recurring_pct) / dec!(100)).round();
        BusinessFinancials::new(industry, revenue, ebitda)
            .with_assets(assets, liabilities)
            .with_growth(growth)
            .with_position(position)
            .with_recurring_revenue(recurring)
            .with_customer_concentration(concentration)
            .with_key_person_dependency(key_person)
            .with_market_risk(market_risk)
    }
}

proptest! {
    #[test]
    fn point_estimate_respects_asset_floor(input in financials()) {
        let engine = ValuationEngine::default();
        let net_assets = input.total_assets.unwrap() - input.total_liabilities.unwrap();
        let result = engine.compute_valuation(input).unwrap();

        prop_assert!(result.point_estimate >= net_assets * dec!(0.8));
        prop_assert!(result.point_estimate >= Decimal::ZERO);
    }

    #[test]
    fn range_is_ordered_below_estimate(input in financials()) {
        let result = ValuationEngine::default().compute_valuation(input).unwrap();

        prop_assert!(result.range.low <= result.range.median);
        prop_assert!(result.range.median <= result.range.high);
        prop_assert!(result.range.low <= result.point_estimate);
        prop_assert!(result.range.low >= Decimal::ZERO);
    }

    #[test]
    fn outputs_are_non_negative(input in financials()) {
        let result = ValuationEngine::default().compute_valuation(input).unwrap();
        let m = result.method_breakdown;

        for value in [m.market_multiple, m.ebitda_multiple, m.income_based, m.asset_based] {
            prop_assert!(value >= Decimal::ZERO);
        }
        prop_assert!(result.multiples.revenue_multiple > Decimal::ZERO);
    }

    #[test]
    fn confidence_follows_data_quality_rules(input in financials()) {
        let revenue = input.annual_revenue.unwrap();
        let ebitda = input.ebitda.unwrap();
        let growth = input.revenue_growth_rate_percent.unwrap();
        let result = ValuationEngine::default().compute_valuation(input).unwrap();

        let expected = if revenue > dec!(500000) && ebitda > Decimal::ZERO && growth > Decimal::ZERO {
            ConfidenceLevel::High
        } else if revenue < dec!(100000) || ebitda < Decimal::ZERO {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::Medium
        };
        prop_assert_eq!(result.confidence_level, expected);
    }

    #[test]
    fn valuation_is_deterministic(input in financials()) {
        let engine = ValuationEngine::default();
        let first = engine.compute_valuation(input.clone()).unwrap();
        let second = engine.compute_valuation(input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn market_method_monotonic_in_revenue(
        revenue in 1i64..=1_000_000_000,
        extra in 0i64..=1_000_000_000,
        multiple in (1i64..=100).prop_map(|m| Decimal::new(m, 1)),
    ) {
        let table = IndustryTable::default();
        let lower = validate(&BusinessFinancials::new("Retail", Decimal::from(revenue), dec!(0))).unwrap();
        let higher = validate(&BusinessFinancials::new("Retail", Decimal::from(revenue + extra), dec!(0))).unwrap();

        let value = |financials: &ValidatedFinancials| {
            MarketMultipleMethod
                .value(&MethodInputs {
                    financials,
                    industry: table.lookup("Retail"),
                    adjusted_revenue_multiple: multiple,
                })
                .unwrap()
        };
        prop_assert!(value(&higher) >= value(&lower));
    }

    #[test]
    fn end_to_end_market_value_monotonic_without_ratio_breakpoints(
        revenue in 1i64..=1_000_000_000,
        extra in 0i64..=1_000_000_000,
        industry in prop::sample::select(INDUSTRIES.to_vec()),
        growth in (-500i64..=1500).prop_map(|g| Decimal::new(g, 1)),
        position in position(),
    ) {
        // Zero EBITDA and recurring revenue keep margin and recurring factors constant
        let engine = ValuationEngine::default();
        let request = |revenue: i64| {
            BusinessFinancials::new(industry, Decimal::from(revenue), dec!(0))
                .with_growth(growth)
                .with_position(position)
        };

        let lower = engine.compute_valuation(request(revenue)).unwrap();
        let higher = engine.compute_valuation(request(revenue + extra)).unwrap();
        prop_assert!(
            higher.method_breakdown.market_multiple >= lower.method_breakdown.market_multiple
        );
    }
}

#[test]
fn ratio_breakpoint_can_lower_market_value() {
    // Revenue growth pushes the margin from 26% to 25%, losing the margin bonus
    let engine = ValuationEngine::default();
    let lower = engine
        .compute_valuation(BusinessFinancials::new("Retail", dec!(100000), dec!(26000)))
        .unwrap();
    let higher = engine
        .compute_valuation(BusinessFinancials::new("Retail", dec!(104000), dec!(26000)))
        .unwrap();

    assert!(higher.method_breakdown.market_multiple < lower.method_breakdown.market_multiple);
}
