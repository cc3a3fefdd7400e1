//! Valuation error types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Input field name, as the caller submitted it (camelCase)
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field was required but missing
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }

    /// Field must be strictly positive
    pub fn not_positive(field: impl Into<String>, actual: Decimal) -> Self {
        Self::new(field, format!("must be greater than 0, got {}", actual))
    }

    /// Field must not be negative
    pub fn negative(field: impl Into<String>, actual: Decimal) -> Self {
        Self::new(field, format!("must not be negative, got {}", actual))
    }

    /// Field must lie within an inclusive range
    pub fn out_of_range(
        field: impl Into<String>,
        min: Decimal,
        max: Decimal,
        actual: Decimal,
    ) -> Self {
        Self::new(
            field,
            format!("must be between {} and {}, got {}", min, max, actual),
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Errors returned by the valuation engine
///
/// Validation failures are routine and carry every offending field.
/// Computation failures mean an arithmetic invariant broke and no
/// result can be trusted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// One or more input fields were invalid
    #[error("Invalid input: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
    /// Arithmetic produced a value that cannot be represented
    #[error("Computation failed during {stage}: {reason}")]
    Computation {
        stage: &'static str,
        reason: String,
    },
}

impl ValuationError {
    /// Overflow in a checked decimal operation
    pub(crate) fn overflow(stage: &'static str) -> Self {
        ValuationError::Computation {
            stage,
            reason: "decimal overflow".to_string(),
        }
    }

    /// Field errors, empty for computation failures
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValuationError::Validation(errors) => errors,
            ValuationError::Computation { .. } => &[],
        }
    }

    /// Whether this is a routine validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, ValuationError::Validation(_))
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unknown label for a qualitative enum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{label}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}
