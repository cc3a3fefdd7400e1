//! bizval: Business valuation engine for marketplace listings
//!
//! This library provides:
//! - Input validation with field-level errors
//! - An industry reference table of baseline multiples
//! - Market-multiple, EBITDA-multiple, income-style and asset-floor methods
//! - Growth, position, profitability, recurring revenue and risk adjustments
//! - Range synthesis, confidence classification and key drivers
//! - TOML configuration for every tunable constant
//! - Logging and metrics

pub mod cli;
pub mod config;
pub mod report;
pub mod telemetry;
pub mod valuation;
