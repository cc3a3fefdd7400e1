//! Integration tests for configuration loading

use bizval::config::{Config, LogFormatConfig};
use bizval::valuation::BusinessFinancials;
use rust_decimal_macros::dec;
use std::io::Write;

#[test]
fn test_example_config_loads() {
    let config = Config::from_toml(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.telemetry.log_level, "info");
    assert_eq!(config.telemetry.log_format, LogFormatConfig::Pretty);
    assert_eq!(config.engine.risk.concentration_threshold_pct, dec!(50));
    assert!(config.industries.is_empty());
}

#[test]
fn test_load_from_file_and_build_engine() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[engine.synthesis]
market_weight = 0.5
income_weight = 0.5
asset_floor_haircut = 0.75

[[industries]]
industryKey = "Technology"
revenueMultiple = 2
ebitdaMultiple = 6
growthRate = 0
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    let engine = config.build_engine();

    let input = BusinessFinancials::new("Technology", dec!(100000), dec!(15000))
        .with_assets(dec!(400000), dec!(0));
    let result = engine.compute_valuation(input).unwrap();

    assert_eq!(result.multiples.industry_baseline, dec!(2));
    // 400000 * 0.75
    assert_eq!(result.method_breakdown.asset_based, dec!(300000));
    assert_eq!(result.point_estimate, dec!(300000));
}

#[test]
fn test_invalid_config_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine.income]\nterminal_multiple = -1").unwrap();
    assert!(Config::load(file.path()).is_err());
}
