//! Value command implementation

use super::OutputFormat;
use crate::report::ValuationReport;
use crate::valuation::{
    BusinessFinancials, MarketPosition, RiskLevel, ValuationEngine, ValuationError,
};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValueArgs {
    /// JSON file with the valuation request (camelCase fields)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Industry label, e.g. "Technology"
    #[arg(long)]
    pub industry: Option<String>,

    /// Annual revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// EBITDA, may be negative
    #[arg(long, allow_hyphen_values = true)]
    pub ebitda: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub assets: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub liabilities: Option<Decimal>,

    /// Year-over-year revenue growth in percent
    #[arg(long, allow_hyphen_values = true)]
    pub growth: Option<Decimal>,

    /// Market position: leader, strong, average, emerging (or competitor, follower)
    #[arg(long)]
    pub position: Option<MarketPosition>,

    /// Recurring revenue
    #[arg(long)]
    pub recurring: Option<Decimal>,

    /// Revenue share of the largest customers in percent
    #[arg(long)]
    pub concentration: Option<Decimal>,

    /// Key person dependency: low, medium, high
    #[arg(long)]
    pub key_person: Option<RiskLevel>,

    /// Market risk: low, medium, high
    #[arg(long)]
    pub market_risk: Option<RiskLevel>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ValueArgs {
    /// Request from the input file, with command-line flags taking precedence
    pub fn build_input(&self) -> anyhow::Result<BusinessFinancials> {
        let mut input = match &self.input {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str::<BusinessFinancials>(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            None => BusinessFinancials::default(),
        };

        if let Some(industry) = &self.industry {
            input.industry = industry.clone();
        }
        input.annual_revenue = self.revenue.or(input.annual_revenue);
        input.ebitda = self.ebitda.or(input.ebitda);
        input.total_assets = self.assets.or(input.total_assets);
        input.total_liabilities = self.liabilities.or(input.total_liabilities);
        input.revenue_growth_rate_percent = self.growth.or(input.revenue_growth_rate_percent);
        input.market_position = self.position.or(input.market_position);
        input.recurring_revenue = self.recurring.or(input.recurring_revenue);
        input.customer_concentration_percent =
            self.concentration.or(input.customer_concentration_percent);
        input.key_person_dependency = self.key_person.or(input.key_person_dependency);
        input.market_risk = self.market_risk.or(input.market_risk);

        Ok(input)
    }

    pub fn execute(&self, engine: &ValuationEngine) -> anyhow::Result<()> {
        let input = self.build_input()?;
        let industry = input.industry.clone();

        let result = match engine.compute_valuation(input) {
            Ok(result) => result,
            Err(ValuationError::Validation(errors)) => {
                for error in &errors {
                    eprintln!("  {}", error);
                }
                anyhow::bail!("Valuation input has {} invalid field(s)", errors.len());
            }
            Err(err) => return Err(err.into()),
        };

        let report = ValuationReport::new(industry, result);
        tracing::info!(
            id = %report.id,
            point_estimate = %report.result.point_estimate,
            "Valuation complete"
        );

        match self.format {
            OutputFormat::Table => print!("{}", report.render_table()),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        Ok(())
    }
}
