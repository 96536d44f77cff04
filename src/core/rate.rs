//! Rate entries and the immutable per-session rate table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// A single currency quoted against the base currency.
///
/// `mid` is the number of base units per one unit of this currency. Field
/// names match the NBP payload so the same type round-trips through the
/// snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub currency: String,
    pub code: String,
    pub mid: f64,
}

impl RateEntry {
    pub fn new(code: &str, currency: &str, mid: f64) -> Self {
        Self {
            currency: currency.to_string(),
            code: code.to_string(),
            mid,
        }
    }

    /// Label shown to the user, e.g. `USD dolar amerykański`.
    pub fn display_label(&self) -> String {
        format!("{} {}", self.code, self.currency)
    }
}

/// The currency every rate is expressed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseCurrency {
    pub code: String,
    pub name: String,
}

impl Default for BaseCurrency {
    fn default() -> Self {
        Self {
            code: "PLN".to_string(),
            name: "złoty polski".to_string(),
        }
    }
}

impl BaseCurrency {
    fn sentinel(&self) -> RateEntry {
        RateEntry::new(&self.code, &self.name, 1.0)
    }
}

/// Where the rates of a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOrigin {
    Live,
    Cache,
}

/// Publication details that only the live source carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInfo {
    pub number: Option<String>,
    pub effective_date: Option<NaiveDate>,
}

/// Snapshot of all rates for one session.
///
/// The base currency is stored as the first entry with a mid of exactly 1.0,
/// so lookups never special-case it.
#[derive(Debug, Clone)]
pub struct RateTable {
    entries: Vec<RateEntry>,
    origin: RateOrigin,
    info: TableInfo,
}

impl RateTable {
    pub fn new(base: &BaseCurrency, rates: Vec<RateEntry>, origin: RateOrigin) -> Self {
        Self::with_info(base, rates, origin, TableInfo::default())
    }

    pub fn with_info(
        base: &BaseCurrency,
        rates: Vec<RateEntry>,
        origin: RateOrigin,
        info: TableInfo,
    ) -> Self {
        let mut seen = HashSet::new();
        seen.insert(base.code.to_ascii_uppercase());

        let mut entries = Vec::with_capacity(rates.len() + 1);
        entries.push(base.sentinel());

        for entry in rates {
            if entry.code.eq_ignore_ascii_case(&base.code) {
                warn!(code = %entry.code, "Ignoring quoted rate for the base currency");
                continue;
            }
            if !entry.mid.is_finite() || entry.mid <= 0.0 {
                warn!(code = %entry.code, mid = entry.mid, "Dropping entry with invalid mid rate");
                continue;
            }
            if !seen.insert(entry.code.to_ascii_uppercase()) {
                warn!(code = %entry.code, "Dropping duplicate currency code");
                continue;
            }
            entries.push(entry);
        }

        Self {
            entries,
            origin,
            info,
        }
    }

    pub fn base(&self) -> &RateEntry {
        &self.entries[0]
    }

    /// All entries, base first, in the order they were loaded.
    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    pub fn origin(&self) -> RateOrigin {
        self.origin
    }

    pub fn info(&self) -> &TableInfo {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn find_by_label(&self, label: &str) -> Option<&RateEntry> {
        self.entries.iter().find(|e| e.display_label() == label)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&RateEntry> {
        self.entries
            .iter()
            .find(|e| e.code.eq_ignore_ascii_case(code))
    }

    /// Display labels with the base currency first and the rest sorted.
    pub fn labels(&self) -> Vec<String> {
        let mut rest: Vec<String> = self.entries[1..]
            .iter()
            .map(RateEntry::display_label)
            .collect();
        rest.sort();

        let mut labels = Vec::with_capacity(rest.len() + 1);
        labels.push(self.base().display_label());
        labels.extend(rest);
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> RateEntry {
        RateEntry::new("USD", "dolar amerykański", 4.0)
    }

    #[test]
    fn test_base_entry_is_always_present() {
        let table = RateTable::new(&BaseCurrency::default(), vec![], RateOrigin::Cache);
        assert_eq!(table.len(), 1);
        assert_eq!(table.base().code, "PLN");
        assert_eq!(table.base().mid, 1.0);
        assert_eq!(table.base().display_label(), "PLN złoty polski");
    }

    #[test]
    fn test_quoted_base_rate_is_ignored() {
        let rates = vec![RateEntry::new("PLN", "złoty", 2.0), usd()];
        let table = RateTable::new(&BaseCurrency::default(), rates, RateOrigin::Live);
        assert_eq!(table.len(), 2);
        assert_eq!(table.find_by_code("PLN").unwrap().mid, 1.0);
    }

    #[test]
    fn test_invalid_and_duplicate_entries_are_dropped() {
        let rates = vec![
            usd(),
            RateEntry::new("USD", "dolar", 9.0),
            RateEntry::new("EUR", "euro", 0.0),
            RateEntry::new("GBP", "funt szterling", -1.0),
            RateEntry::new("CHF", "frank szwajcarski", f64::NAN),
        ];
        let table = RateTable::new(&BaseCurrency::default(), rates, RateOrigin::Live);
        assert_eq!(table.len(), 2);
        assert_eq!(table.find_by_code("usd").unwrap().mid, 4.0);
        assert!(table.find_by_code("EUR").is_none());
    }

    #[test]
    fn test_duplicate_codes_ignore_case() {
        let rates = vec![
            usd(),
            RateEntry::new("usd", "dolar", 3.0),
            RateEntry::new("pln", "złoty", 2.0),
        ];
        let table = RateTable::new(&BaseCurrency::default(), rates, RateOrigin::Live);
        assert_eq!(table.len(), 2);
        assert_eq!(table.find_by_code("usd").unwrap().mid, 4.0);
        assert_eq!(table.find_by_code("PLN").unwrap().mid, 1.0);
    }

    #[test]
    fn test_labels_put_base_first_then_sorted() {
        let rates = vec![
            usd(),
            RateEntry::new("EUR", "euro", 4.3),
            RateEntry::new("CHF", "frank szwajcarski", 4.5),
        ];
        let table = RateTable::new(&BaseCurrency::default(), rates, RateOrigin::Live);
        assert_eq!(
            table.labels(),
            vec![
                "PLN złoty polski",
                "CHF frank szwajcarski",
                "EUR euro",
                "USD dolar amerykański"
            ]
        );
        assert_eq!(table.find_by_label("EUR euro").unwrap().mid, 4.3);
        assert!(table.find_by_label("EUR").is_none());
    }

    #[test]
    fn test_entry_uses_nbp_field_names() {
        let json = r#"{"currency":"dolar amerykański","code":"USD","mid":4.00}"#;
        let entry: RateEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, usd());
    }
}
