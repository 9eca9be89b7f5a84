//! Enum canonicalization
//!
//! The registry collects every value table that shows up during a conversion
//! run (the matrix's global tables plus per-signal inline tables), assigns
//! each a single canonical name and hands out those names to the bus builder.
//! Label sanitization happens once, at export time, so registration stays a
//! cheap equality lookup.

use crate::document::{EnumEntry, EnumValue};
use crate::types::ValueTable;

/// Reserved suffix every canonical enum name carries
pub const ENUM_SUFFIX: &str = "_enum";

/// Prefix forced onto labels that would start with a digit
const DIGIT_GUARD_PREFIX: &str = "E_";

/// Label marker emitted by matrix editors for unset descriptions
const PLACEHOLDER_LABEL_PREFIX: &str = "Description for the value";

/// Registry of distinct value tables seen during one conversion run
///
/// Owned by the conversion pipeline and passed by mutable reference into the
/// bus builder, so canonicalization for a given document is reproducible in
/// isolation. Never fails: every lookup either aliases an existing table or
/// registers a new one.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    /// Configured name prefix (from per-input configuration)
    prefix: Option<String>,
    /// Canonical name -> table content, in registration order
    tables: Vec<(String, ValueTable)>,
    /// Canonical names referenced by at least one signal, in first-use order
    exported: Vec<String>,
}

impl EnumRegistry {
    /// Create an empty registry
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix,
            tables: Vec::new(),
            exported: Vec::new(),
        }
    }

    /// Create a registry seeded with the matrix's global named value tables
    ///
    /// Table names are canonicalized at insertion; the tables themselves are
    /// only exported once a signal references them. A table whose content is
    /// already registered is skipped so later lookups alias the first copy.
    pub fn with_named_tables<I>(prefix: Option<String>, named: I) -> Self
    where
        I: IntoIterator<Item = (String, ValueTable)>,
    {
        let mut registry = Self::new(prefix);
        for (name, table) in named {
            if registry.tables.iter().any(|(_, t)| t == &table) {
                log::debug!("Value table '{}' duplicates an earlier table", name);
                continue;
            }
            let canonical = registry.unique_name(&name);
            log::debug!("Registering value table '{}' as '{}'", name, canonical);
            registry.tables.push((canonical, table));
        }
        registry
    }

    /// Apply the canonical-name rule: reserved suffix, then configured prefix
    ///
    /// Idempotent: an already-suffixed, already-prefixed name is returned
    /// unchanged.
    pub fn canonical_name(&self, raw: &str) -> String {
        let mut name = if raw.ends_with(ENUM_SUFFIX) {
            raw.to_string()
        } else {
            format!("{}{}", raw, ENUM_SUFFIX)
        };
        if let Some(prefix) = &self.prefix {
            if !prefix.is_empty() && !name.starts_with(prefix.as_str()) {
                name = format!("{}{}", prefix, name);
            }
        }
        name
    }

    /// Resolve a signal's inline value table to a canonical enum name
    ///
    /// Aliasing is by full content equality: a table identical to one already
    /// registered reuses that table's name, otherwise the table is registered
    /// under a name derived from the signal's own name. When that name is
    /// already taken by a table with different content, a numeric counter is
    /// appended so the two never collide. The returned name is marked for
    /// export (at most once per name).
    pub fn resolve(&mut self, signal_name: &str, table: &ValueTable) -> String {
        let name = match self.tables.iter().find(|(_, t)| t == table) {
            Some((existing, _)) => existing.clone(),
            None => {
                let canonical = self.unique_name(signal_name);
                log::debug!(
                    "Signal '{}' carries a new value table, registering '{}'",
                    signal_name,
                    canonical
                );
                self.tables.push((canonical.clone(), table.clone()));
                canonical
            }
        };
        if !self.exported.contains(&name) {
            self.exported.push(name.clone());
        }
        name
    }

    /// Canonicalize a raw name and disambiguate it against registered tables
    fn unique_name(&self, raw: &str) -> String {
        let mut candidate = self.canonical_name(raw);
        let mut counter = 1;
        while self.tables.iter().any(|(n, _)| *n == candidate) {
            candidate = self.canonical_name(&format!("{}_{}", raw, counter));
            counter += 1;
        }
        candidate
    }

    /// Number of referenced enum types so far
    pub fn exported_count(&self) -> usize {
        self.exported.len()
    }

    /// Consume the registry and emit the referenced enum entries
    ///
    /// Entries come out in first-reference order with sanitized labels and
    /// values ordered ascending by code.
    pub fn into_entries(self) -> Vec<EnumEntry> {
        let tables = self.tables;
        self.exported
            .into_iter()
            .filter_map(|name| {
                let table = tables.iter().find(|(n, _)| *n == name).map(|(_, t)| t)?;
                let values = table
                    .iter()
                    .map(|(&code, label)| EnumValue {
                        name: sanitize_label(code, label),
                        value: code,
                        description: String::new(),
                    })
                    .collect();
                Some(EnumEntry { name, values })
            })
            .collect()
    }
}

/// Turn a raw value-table label into an identifier-safe string
///
/// Empty, whitespace-only, `None` and editor-placeholder labels collapse to
/// `VALUE_<code>`. Every character outside `[A-Za-z0-9_]` becomes `_`, and a
/// leading digit gets a letter prefix. Always terminates with a valid
/// identifier.
pub fn sanitize_label(code: i64, label: &str) -> String {
    let base = if label.trim().is_empty()
        || label == "None"
        || label.starts_with(PLACEHOLDER_LABEL_PREFIX)
    {
        format!("VALUE_{}", code)
    } else {
        label.to_string()
    };

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", DIGIT_GUARD_PREFIX, cleaned)
    } else {
        cleaned
    }
}
