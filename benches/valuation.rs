//! Benchmarks for valuation computation

use bizval::valuation::{BusinessFinancials, MarketPosition, RiskLevel, ValuationEngine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;

fn benchmark_full_valuation(c: &mut Criterion) {
    let engine = ValuationEngine::default();

    let input = BusinessFinancials::new("Technology", dec!(1000000), dec!(250000))
        .with_assets(dec!(500000), dec!(100000))
        .with_growth(dec!(15))
        .with_position(MarketPosition::Strong)
        .with_recurring_revenue(dec!(400000))
        .with_customer_concentration(dec!(20))
        .with_market_risk(RiskLevel::Low);

    c.bench_function("compute_valuation", |b| {
        b.iter(|| engine.compute_valuation(black_box(input.clone())))
    });
}

fn benchmark_rejected_input(c: &mut Criterion) {
    let engine = ValuationEngine::default();
    let input = BusinessFinancials::default();

    c.bench_function("compute_valuation_invalid", |b| {
        b.iter(|| engine.compute_valuation(black_box(input.clone())))
    });
}

criterion_group!(benches, benchmark_full_valuation, benchmark_rejected_input);
criterion_main!(benches);
