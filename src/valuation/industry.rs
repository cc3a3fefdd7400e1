//! Industry reference table
//!
//! Baseline multiples per industry. Lookups are exact and case-sensitive;
//! anything unrecognised resolves to the `Other` entry, since free-text
//! industry labels are expected.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key of the fallback entry
pub const OTHER_INDUSTRY: &str = "Other";

/// Revenue-multiple to EBITDA-multiple conversion used by the built-in table
const EBITDA_CONVERSION: Decimal = dec!(3);

/// Baseline multiples for one industry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryMultipleEntry {
    pub industry_key: String,
    pub revenue_multiple: Decimal,
    pub ebitda_multiple: Decimal,
    /// Expected one-period EBITDA growth (0.05 = 5%)
    #[serde(default = "default_growth_rate")]
    pub growth_rate: Decimal,
}

fn default_growth_rate() -> Decimal {
    dec!(0.05)
}

impl IndustryMultipleEntry {
    /// Build an entry whose EBITDA multiple is derived from the revenue multiple
    pub fn from_revenue_multiple(
        industry_key: impl Into<String>,
        revenue_multiple: Decimal,
        growth_rate: Decimal,
    ) -> Self {
        Self {
            industry_key: industry_key.into(),
            revenue_multiple,
            ebitda_multiple: revenue_multiple * EBITDA_CONVERSION,
            growth_rate,
        }
    }
}

/// Read-only industry lookup
#[derive(Debug, Clone)]
pub struct IndustryTable {
    entries: HashMap<String, IndustryMultipleEntry>,
    fallback: IndustryMultipleEntry,
}

impl IndustryTable {
    /// Create a table from entries and an explicit fallback
    pub fn new(
        entries: impl IntoIterator<Item = IndustryMultipleEntry>,
        fallback: IndustryMultipleEntry,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.industry_key.clone(), entry))
            .collect();
        Self { entries, fallback }
    }

    /// Entry for `industry_key`, or the fallback
    pub fn lookup(&self, industry_key: &str) -> &IndustryMultipleEntry {
        self.resolve(industry_key).0
    }

    /// Entry for `industry_key` and whether it matched a real entry
    pub fn resolve(&self, industry_key: &str) -> (&IndustryMultipleEntry, bool) {
        match self.entries.get(industry_key) {
            Some(entry) => (entry, true),
            None => (&self.fallback, industry_key == self.fallback.industry_key),
        }
    }

    /// The fallback entry
    pub fn fallback(&self) -> &IndustryMultipleEntry {
        &self.fallback
    }

    /// Merge entries over the table, replacing same-keyed ones
    ///
    /// An entry keyed `Other` replaces the fallback.
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = IndustryMultipleEntry>) -> Self {
        for entry in overrides {
            if entry.industry_key == OTHER_INDUSTRY {
                self.fallback = entry;
            } else {
                self.entries.insert(entry.industry_key.clone(), entry);
            }
        }
        self
    }

    /// All entries sorted by key, fallback last
    pub fn entries(&self) -> Vec<&IndustryMultipleEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.industry_key.cmp(&b.industry_key));
        entries.push(&self.fallback);
        entries
    }

    /// Number of entries, counting the fallback
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    /// Always `false`: the fallback entry is part of every table
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for IndustryTable {
    fn default() -> Self {
        let entry = IndustryMultipleEntry::from_revenue_multiple;
        Self::new(
            [
                entry("Technology", dec!(4.5), dec!(0.12)),
                entry("Healthcare", dec!(3.2), dec!(0.08)),
                entry("Financial Services", dec!(3.0), dec!(0.06)),
                entry("Real Estate", dec!(2.8), dec!(0.05)),
                entry("Manufacturing", dec!(1.8), dec!(0.04)),
                entry("Retail", dec!(1.2), dec!(0.03)),
                entry("Food & Beverage", dec!(1.5), dec!(0.04)),
                entry("Consulting", dec!(2.0), dec!(0.06)),
                entry("Marketing & Advertising", dec!(2.2), dec!(0.07)),
                entry("Transportation", dec!(1.6), dec!(0.04)),
                entry("Construction", dec!(1.4), dec!(0.05)),
            ],
            entry(OTHER_INDUSTRY, dec!(2.5), dec!(0.05)),
        )
    }
}
