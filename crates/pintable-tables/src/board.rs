//! Board pin table (`pins.csv`) loading.
//!
//! A board table renames physical pins: `PIN_PA17,LED` exposes `PIN_PA17` as
//! `LED`. Older boards key rows with `LED_` instead of `PIN_`; both spellings
//! land in the same key space.

use std::collections::HashMap;
use std::path::Path;

use crate::capability::PIN_PREFIX;
use crate::error::{read_table, Result};
use crate::record;

/// Legacy key prefix rewritten to [`PIN_PREFIX`].
pub const LEGACY_PREFIX: &str = "LED_";

/// Object type annotation attached to every board pin.
pub const DEFAULT_TYPE_TAG: &str = "{&machine_pin_type}";

/// A board-specific name for one physical pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideEntry {
    /// Name exposed to the runtime.
    pub display_name: String,
    /// Object type annotation.
    pub type_tag: String,
}

impl OverrideEntry {
    /// An entry carrying the default type tag.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            type_tag: DEFAULT_TYPE_TAG.to_string(),
        }
    }
}

/// Board overrides keyed by pin symbol.
#[derive(Debug, Clone, Default)]
pub struct BoardPins {
    entries: HashMap<String, OverrideEntry>,
}

impl BoardPins {
    /// Create an empty override map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an override, replacing any earlier entry for the same symbol.
    pub fn insert(&mut self, symbol: impl Into<String>, entry: OverrideEntry) -> Option<OverrideEntry> {
        self.entries.insert(symbol.into(), entry)
    }

    /// Look up the override for a pin symbol.
    pub fn get(&self, symbol: &str) -> Option<&OverrideEntry> {
        self.entries.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rewrite a legacy `LED_` key to its `PIN_` spelling.
pub fn normalize_key(key: &str) -> String {
    match key.strip_prefix(LEGACY_PREFIX) {
        Some(rest) => format!("{PIN_PREFIX}{rest}"),
        None => key.to_string(),
    }
}

/// Parse board overrides from table text.
pub fn overrides_from_str(text: &str) -> BoardPins {
    let mut pins = BoardPins::new();
    for rec in record::records(text, true) {
        let key = normalize_key(&rec[0]);
        let Some(bare) = key.strip_prefix(PIN_PREFIX) else {
            continue;
        };
        let display_name = match rec.get(1) {
            Some(name) => name.clone(),
            None => bare.to_string(),
        };
        if let Some(previous) = pins.insert(key.clone(), OverrideEntry::new(display_name)) {
            tracing::debug!(%key, replaced = %previous.display_name, "later board row wins");
        }
    }
    pins
}

/// Load the board pin table at `path`.
pub fn parse_overrides(path: &Path) -> Result<BoardPins> {
    let text = read_table(path)?;
    let pins = overrides_from_str(&text);
    tracing::info!(path = %path.display(), pins = pins.len(), "loaded board pin table");
    Ok(pins)
}
