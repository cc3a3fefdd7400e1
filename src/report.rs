//! Valuation reports
//!
//! Wraps an engine result with an id and timestamp for callers that store
//! or display it. The engine itself never touches ids or clocks.

use crate::valuation::{FieldError, ValuationError, ValuationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A stored or rendered valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub industry: String,
    pub result: ValuationResult,
}

impl ValuationReport {
    /// Create a new report
    pub fn new(industry: impl Into<String>, result: ValuationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            industry: industry.into(),
            result,
        }
    }

    /// Plain-text table for terminals
    pub fn render_table(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValuationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;

        writeln!(f, "Valuation {} ({})", self.id, self.generated_at.to_rfc3339())?;
        writeln!(f, "Industry:          {}", self.industry)?;
        writeln!(f, "Estimate:          {}", r.point_estimate)?;
        writeln!(
            f,
            "Range:             {} / {} / {}",
            r.range.low, r.range.median, r.range.high
        )?;
        writeln!(f, "Confidence:        {}", r.confidence_level)?;
        writeln!(f)?;
        writeln!(f, "Methods")?;
        writeln!(f, "  Market multiple: {}", r.method_breakdown.market_multiple)?;
        writeln!(f, "  EBITDA multiple: {}", r.method_breakdown.ebitda_multiple)?;
        writeln!(f, "  Income-based:    {}", r.method_breakdown.income_based)?;
        writeln!(f, "  Asset floor:     {}", r.method_breakdown.asset_based)?;
        writeln!(f)?;
        writeln!(f, "Multiples")?;
        writeln!(f, "  Baseline:        {}x", r.multiples.industry_baseline.normalize())?;
        writeln!(f, "  Adjusted:        {}x", r.multiples.revenue_multiple.normalize())?;
        writeln!(f, "  EBITDA:          {}x", r.multiples.ebitda_multiple.normalize())?;
        writeln!(f)?;
        writeln!(f, "Key drivers")?;
        for driver in &r.key_drivers {
            writeln!(f, "  - {}", driver)?;
        }
        Ok(())
    }
}

/// One line of `batch` output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// Valuation succeeded
    Ok {
        line: usize,
        report: ValuationReport,
    },
    /// Input was rejected
    Invalid {
        line: usize,
        errors: Vec<FieldError>,
    },
    /// Input could not be parsed or valued
    Failed { line: usize, reason: String },
}

impl BatchOutcome {
    /// Build an outcome from an engine result
    pub fn from_result(
        line: usize,
        industry: &str,
        result: Result<ValuationResult, ValuationError>,
    ) -> Self {
        match result {
            Ok(result) => BatchOutcome::Ok {
                line,
                report: ValuationReport::new(industry, result),
            },
            Err(ValuationError::Validation(errors)) => BatchOutcome::Invalid { line, errors },
            Err(err) => BatchOutcome::Failed {
                line,
                reason: err.to_string(),
            },
        }
    }

    pub fn line(&self) -> usize {
        match self {
            BatchOutcome::Ok { line, .. }
            | BatchOutcome::Invalid { line, .. }
            | BatchOutcome::Failed { line, .. } => *line,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, BatchOutcome::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::{compute_valuation, BusinessFinancials};
    use rust_decimal_macros::dec;

    fn sample_result() -> ValuationResult {
        compute_valuation(
            BusinessFinancials::new("Consulting", dec!(400000), dec!(60000)).with_growth(dec!(12)),
        )
        .unwrap()
    }

    #[test]
    fn test_report_has_unique_ids() {
        let a = ValuationReport::new("Consulting", sample_result());
        let b = ValuationReport::new("Consulting", sample_result());
        assert_ne!(a.id, b.id);
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_render_table_lists_drivers() {
        let report = ValuationReport::new("Consulting", sample_result());
        let table = report.render_table();
        assert!(table.contains("Industry:          Consulting"));
        assert!(table.contains("Baseline:        2x"));
        assert!(table.contains("  - Revenue growth: 12.0%"));
        assert!(table.contains("Confidence:        medium"));
        assert!(table.ends_with(&format!("  - {}\n", report.result.key_drivers.last().unwrap())));
        assert_eq!(table, format!("{}", report));
    }

    #[test]
    fn test_report_json_is_camel_case() {
        let report = ValuationReport::new("Consulting", sample_result());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("generatedAt").is_some());
        assert!(json["result"].get("pointEstimate").is_some());
        assert_eq!(json["result"]["confidenceLevel"], "medium");
    }

    #[test]
    fn test_batch_outcome_tags() {
        let invalid = BatchOutcome::from_result(
            3,
            "Retail",
            Err(ValuationError::Validation(vec![FieldError::required("ebitda")])),
        );
        assert_eq!(invalid.line(), 3);
        assert!(!invalid.is_ok());

        let json = serde_json::to_value(&invalid).unwrap();
        assert_eq!(json["status"], "invalid");
        assert_eq!(json["errors"][0]["field"], "ebitda");

        let ok = BatchOutcome::from_result(1, "Consulting", Ok(sample_result()));
        assert!(ok.is_ok());
        assert_eq!(serde_json::to_value(&ok).unwrap()["status"], "ok");
    }
}
