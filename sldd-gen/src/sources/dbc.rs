//! DBC file adapter
//!
//! Parses Vector DBC files with the can-dbc crate and converts frames,
//! signal comments, inline value descriptions and global value tables into
//! the generator's descriptor types.

use crate::types::{FrameDescriptor, Result, SignalDescriptor, SignalSet, SlddError, ValueTable};
use std::path::Path;

/// Parse a DBC file into a signal set
pub fn load_signal_set(path: &Path) -> Result<SignalSet> {
    log::info!("Parsing DBC file: {:?}", path);

    // Read the DBC file as bytes first (handle non-UTF8 encodings)
    let bytes = std::fs::read(path)
        .map_err(|e| SlddError::DbcParse(format!("Failed to read file {:?}: {}", path, e)))?;

    // Try UTF-8 first, then fall back to Latin-1 (compatible with Windows-1252)
    let content = String::from_utf8(bytes.clone()).unwrap_or_else(|_| {
        log::warn!("DBC file is not UTF-8, trying Latin-1 encoding");
        bytes.iter().map(|&b| b as char).collect()
    });

    let dbc = can_dbc::DBC::from_slice(content.as_bytes())
        .map_err(|e| SlddError::DbcParse(format!("Failed to parse DBC file {:?}: {:?}", path, e)))?;

    let frames: Vec<FrameDescriptor> = dbc
        .messages()
        .iter()
        .map(|message| convert_message(&dbc, message))
        .collect();

    let value_tables: Vec<(String, ValueTable)> = dbc
        .value_tables()
        .iter()
        .map(|table| {
            (
                table.value_table_name().clone(),
                convert_descriptions(table.value_descriptions()),
            )
        })
        .collect();

    log::info!(
        "Parsed {} frames and {} global value tables from {:?}",
        frames.len(),
        value_tables.len(),
        path
    );

    Ok(SignalSet {
        frames,
        value_tables,
    })
}

/// Convert one can-dbc message to a frame descriptor
fn convert_message(dbc: &can_dbc::DBC, message: &can_dbc::Message) -> FrameDescriptor {
    let signals = message
        .signals()
        .iter()
        .map(|signal| convert_signal(dbc, message, signal))
        .collect();

    FrameDescriptor {
        name: message.message_name().clone(),
        signals,
    }
}

/// Convert one can-dbc signal to a signal descriptor
fn convert_signal(
    dbc: &can_dbc::DBC,
    message: &can_dbc::Message,
    signal: &can_dbc::Signal,
) -> SignalDescriptor {
    let is_signed = matches!(*signal.value_type(), can_dbc::ValueType::Signed);

    let comment = dbc.comments().iter().find_map(|c| match c {
        can_dbc::Comment::Signal {
            message_id,
            signal_name,
            comment,
        } if message_id == message.message_id() && signal_name == signal.name() => {
            Some(comment.clone())
        }
        _ => None,
    });

    let value_table = dbc.value_descriptions().iter().find_map(|vd| match vd {
        can_dbc::ValueDescription::Signal {
            message_id,
            signal_name,
            value_descriptions,
        } if message_id == message.message_id() && signal_name == signal.name() => {
            Some(convert_descriptions(value_descriptions))
        }
        _ => None,
    });

    SignalDescriptor {
        name: signal.name().clone(),
        bit_length: *signal.signal_size() as u16,
        is_signed,
        factor: *signal.factor(),
        offset: *signal.offset(),
        comment,
        unit: if signal.unit().is_empty() {
            None
        } else {
            Some(signal.unit().clone())
        },
        value_table: value_table.filter(|t| !t.is_empty()),
    }
}

/// Convert can-dbc value descriptions into a value table
fn convert_descriptions(descriptions: &[can_dbc::ValDescription]) -> ValueTable {
    descriptions
        .iter()
        .map(|d| (*d.a() as i64, d.b().clone()))
        .collect()
}
