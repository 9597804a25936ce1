//! MCU capability table (`pin-af-table.csv`) loading.
//!
//! Each kept row describes one physical pin: its port-bank id followed by the
//! EIC channel, the ADC channel(s) and the remaining peripheral capability
//! bytes. Row order is significant and preserved.

use std::path::Path;

use crate::error::{read_table, Result};
use crate::record;

/// Port-bank prefixes accepted as physical pin ids.
pub const PORT_PREFIXES: [&str; 4] = ["PA", "PB", "PC", "PD"];

/// Prefix of every generated pin symbol (`PIN_PA01`).
pub const PIN_PREFIX: &str = "PIN_";

/// One physical pin from the capability table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRow {
    pin_id: String,
    fields: Vec<String>,
}

impl CapabilityRow {
    /// Build a row from a split record, or `None` if its first field is not a
    /// port-bank pin id.
    pub fn from_record(mut record: Vec<String>) -> Option<Self> {
        if record.is_empty() || !is_port_pin(&record[0]) {
            return None;
        }
        let fields = record.split_off(1);
        let pin_id = record[0].trim().to_string();
        Some(Self { pin_id, fields })
    }

    /// The pin id as written in the table (surrounding whitespace removed).
    pub fn pin_id(&self) -> &str {
        &self.pin_id
    }

    /// All cells following the pin id, in table order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The cell at `index` past the pin id, if the row is long enough.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Canonical CPU name, e.g. `PA01`.
    pub fn cpu_name(&self) -> String {
        self.pin_id.to_uppercase()
    }

    /// Derived pin symbol, e.g. `PIN_PA01`.
    pub fn symbol(&self) -> String {
        format!("{PIN_PREFIX}{}", self.cpu_name())
    }
}

/// Whether `id` starts with one of the port-bank prefixes, ignoring case and
/// surrounding whitespace.
pub fn is_port_pin(id: &str) -> bool {
    let head: String = id.trim().to_uppercase().chars().take(2).collect();
    PORT_PREFIXES.contains(&head.as_str())
}

/// Parse capability rows from table text, dropping non-pin records.
pub fn capabilities_from_str(text: &str) -> Vec<CapabilityRow> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for rec in record::records(text, false) {
        match CapabilityRow::from_record(rec) {
            Some(row) => rows.push(row),
            None => skipped += 1,
        }
    }
    tracing::debug!(kept = rows.len(), skipped, "parsed capability records");
    rows
}

/// Load the capability table at `path`.
pub fn parse_capabilities(path: &Path) -> Result<Vec<CapabilityRow>> {
    let text = read_table(path)?;
    let rows = capabilities_from_str(&text);
    tracing::info!(path = %path.display(), pins = rows.len(), "loaded capability table");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_port_pins() {
        let text = "\
Pin,EIC,ADC,SERCOM1,SERCOM2
PA00,0,,,10
XYZ99,1,2,3
# comment
pb10,a,2,23
PD21,1
";
        let rows = capabilities_from_str(text);
        let ids: Vec<_> = rows.iter().map(CapabilityRow::pin_id).collect();
        assert_eq!(ids, vec!["PA00", "pb10", "PD21"]);
    }

    #[test]
    fn prefix_check_ignores_case_and_space() {
        assert!(is_port_pin("pa01"));
        assert!(is_port_pin("  PC05"));
        assert!(!is_port_pin("PE00"));
        assert!(!is_port_pin("P"));
        assert!(!is_port_pin(""));
    }

    #[test]
    fn preserves_file_order() {
        let rows = capabilities_from_str("PB02,1\nPA01,2\nPA00,3\n");
        let symbols: Vec<_> = rows.iter().map(CapabilityRow::symbol).collect();
        assert_eq!(symbols, vec!["PIN_PB02", "PIN_PA01", "PIN_PA00"]);
    }

    #[test]
    fn short_rows_are_kept() {
        let rows = capabilities_from_str("PA07\n");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].fields().is_empty());
        assert_eq!(rows[0].field(0), None);
    }

    #[test]
    fn derived_names_are_uppercased() {
        let rows = capabilities_from_str("pa01,1A,3\n");
        assert_eq!(rows[0].cpu_name(), "PA01");
        assert_eq!(rows[0].symbol(), "PIN_PA01");
        assert_eq!(rows[0].field(0), Some("1A"));
        assert_eq!(rows[0].field(1), Some("3"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pin-af-table.csv");
        std::fs::write(&path, "PA01,1A,3\nPA02,2,4\n").unwrap();
        let rows = parse_capabilities(&path).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = parse_capabilities(&path).unwrap_err();
        assert!(matches!(err, crate::TableError::FileAccess { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }
}
