//! Core types for the SLDD generator library
//!
//! This module defines the descriptor types that the source adapters emit and
//! the error taxonomy shared by the whole pipeline. The descriptors are a
//! deliberately narrow interface: the entry model builder never touches the
//! upstream parser's own representation.

use std::collections::BTreeMap;

/// Value table: integer code -> human-readable label, ordered by code
pub type ValueTable = BTreeMap<i64, String>;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, SlddError>;

/// A single CAN signal as seen by the generator
///
/// Immutable once produced by the source adapter. Only the fields that drive
/// type inference and bus element construction are carried.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalDescriptor {
    /// Signal name
    pub name: String,
    /// Length in bits
    pub bit_length: u16,
    /// True for signed physical encoding
    pub is_signed: bool,
    /// Scale factor to convert raw value to physical value
    pub factor: f64,
    /// Offset to add after scaling
    pub offset: f64,
    /// Signal comment (if present upstream)
    pub comment: Option<String>,
    /// Engineering unit (if present upstream)
    pub unit: Option<String>,
    /// Inline value table for enum-like signals
    pub value_table: Option<ValueTable>,
}

/// A named CAN frame with its signals, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDescriptor {
    /// Frame/message name
    pub name: String,
    /// Signals belonging to this frame
    pub signals: Vec<SignalDescriptor>,
}

/// Everything a network matrix contributes to one conversion run
#[derive(Debug, Clone, Default)]
pub struct SignalSet {
    /// Frames in matrix order
    pub frames: Vec<FrameDescriptor>,
    /// Globally defined named value tables
    pub value_tables: Vec<(String, ValueTable)>,
}

/// One row of the tabular parameter source
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRow {
    /// Parameter name
    pub name: String,
    /// Declared two-dimensional shape (rows, cols)
    pub dims: (usize, usize),
    /// Flattened values, populated slots only
    pub values: Vec<f64>,
    /// Engineering unit
    pub unit: String,
    /// Free-text description
    pub description: String,
    /// Declared data type (defaults to double downstream)
    pub data_type: Option<String>,
    /// Minimum bound
    pub min: Option<f64>,
    /// Maximum bound
    pub max: Option<f64>,
}

/// Errors that can occur while generating a data dictionary
#[derive(Debug, thiserror::Error)]
pub enum SlddError {
    #[error("Failed to parse DBC file: {0}")]
    DbcParse(String),

    #[error("Failed to read parameter table: {0}")]
    ParameterTable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown coder profile: {0}")]
    UnknownProfile(String),

    #[error("Failed to serialize dictionary: {0}")]
    Serialize(String),

    #[error("Failed to package archive: {0}")]
    Package(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_table_ordering() {
        let mut table = ValueTable::new();
        table.insert(3, "Three".to_string());
        table.insert(1, "One".to_string());
        table.insert(2, "Two".to_string());

        let codes: Vec<i64> = table.keys().copied().collect();
        assert_eq!(codes, vec![1, 2, 3]);
    }

    #[test]
    fn test_error_display() {
        let err = SlddError::Validation("value count mismatch".to_string());
        assert!(err.to_string().contains("value count mismatch"));
    }
}
