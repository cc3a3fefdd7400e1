//! End-to-end tests for the valuation engine

use bizval::valuation::{
    compute_valuation, BusinessFinancials, ConfidenceLevel, MarketPosition, RiskLevel,
    ValuationEngine, ValuationError, ValuationResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;

#[test]
fn test_technology_scenario_from_json() {
    let json = r#"{
        "industry": "Technology",
        "annualRevenue": 1000000,
        "ebitda": 250000,
        "totalAssets": 500000,
        "totalLiabilities": 100000,
        "revenueGrowthRatePercent": 15,
        "marketPosition": "strong",
        "recurringRevenue": 400000,
        "customerConcentrationPercent": 20,
        "keyPersonDependency": "medium",
        "marketRisk": "low"
    }"#;

    let input: BusinessFinancials = serde_json::from_str(json).unwrap();
    let result = compute_valuation(input).unwrap();

    assert_eq!(result.multiples.revenue_multiple, dec!(6.26175));
    assert_eq!(result.method_breakdown.market_multiple, dec!(6261750));
    assert_eq!(result.confidence_level, ConfidenceLevel::High);
    assert_eq!(
        result.key_drivers,
        vec![
            "Industry multiple: 4.5x revenue (Technology)",
            "Revenue growth: 15.0%",
            "Market position: strong",
            "EBITDA margin: 25.0%",
            "Recurring revenue: 40.0% of revenue",
        ]
    );
}

#[test]
fn test_small_loss_making_scenario() {
    let input = BusinessFinancials::new("Food & Beverage", dec!(50000), dec!(-5000))
        .with_assets(dec!(30000), dec!(5000));
    let result = compute_valuation(input).unwrap();

    assert_eq!(result.confidence_level, ConfidenceLevel::Low);
    assert_eq!(result.method_breakdown.income_based, Decimal::ZERO);
    assert!(result.point_estimate >= dec!(20000));
}

#[test]
fn test_legacy_three_way_scale() {
    let json = r#"{"industry": "Consulting", "annualRevenue": 200000, "ebitda": 30000, "marketPosition": "competitor"}"#;
    let legacy: BusinessFinancials = serde_json::from_str(json).unwrap();
    let canonical = BusinessFinancials::new("Consulting", dec!(200000), dec!(30000))
        .with_position(MarketPosition::Strong);

    assert_eq!(
        compute_valuation(legacy).unwrap(),
        compute_valuation(canonical).unwrap()
    );
}

#[test]
fn test_unknown_industry_uses_other() {
    let result = compute_valuation(BusinessFinancials::new("Vintage Synths", dec!(300000), dec!(45000))).unwrap();
    assert_eq!(result.multiples.industry_baseline, dec!(2.5));
    assert_eq!(result.multiples.ebitda_multiple, dec!(7.5));
    assert!(result.key_drivers[0].contains("'Vintage Synths' not in reference table"));
}

#[test]
fn test_validation_reports_all_fields_and_no_result() {
    let json = r#"{"industry": "Retail", "annualRevenue": -10, "totalLiabilities": -1, "customerConcentrationPercent": 120}"#;
    let input: BusinessFinancials = serde_json::from_str(json).unwrap();

    match compute_valuation(input) {
        Err(ValuationError::Validation(errors)) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(
                fields,
                vec![
                    "annualRevenue",
                    "ebitda",
                    "totalLiabilities",
                    "customerConcentrationPercent"
                ]
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_first_match_risk_policy_end_to_end() {
    let base = BusinessFinancials::new("Manufacturing", dec!(800000), dec!(120000)).with_growth(dec!(5));
    let concentrated = base
        .clone()
        .with_customer_concentration(dec!(80))
        .with_key_person_dependency(RiskLevel::High)
        .with_market_risk(RiskLevel::High);

    let plain = compute_valuation(base).unwrap();
    let risky = compute_valuation(concentrated).unwrap();

    assert_eq!(risky.adjustments.risk, dec!(0.85));
    assert_eq!(risky.range.high, (plain.range.high * dec!(0.85)).round_dp(2));
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = Arc::new(ValuationEngine::default());
    let expected = engine
        .compute_valuation(BusinessFinancials::new("Healthcare", dec!(900000), dec!(150000)))
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .compute_valuation(BusinessFinancials::new("Healthcare", dec!(900000), dec!(150000)))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let result: ValuationResult = handle.join().unwrap();
        assert_eq!(result, expected);
    }
}

#[test]
fn test_result_json_shape() {
    let result = compute_valuation(BusinessFinancials::new("Retail", dec!(150000), dec!(12000))).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    for key in [
        "pointEstimate",
        "range",
        "methodBreakdown",
        "multiples",
        "adjustments",
        "confidenceLevel",
        "keyDrivers",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert!(json["methodBreakdown"].get("incomeBased").is_some());
    assert!(json["multiples"].get("industryBaseline").is_some());

    let back: ValuationResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}
