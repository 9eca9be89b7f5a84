//! One-shot conversion pipelines
//!
//! Each function runs the whole pipeline for one input file: adapter,
//! canonicalization, entry building, codec. A run either completes
//! deterministically or fails fast; no archive is written after any failure.

use crate::build;
use crate::codec;
use crate::config::{load_convert_config, ConvertConfig};
use crate::document::{Document, Entry, ParameterKind};
use crate::enums::EnumRegistry;
use crate::sources;
use crate::types::Result;
use std::path::{Path, PathBuf};

/// Output extension of the packaged dictionary
const OUTPUT_EXTENSION: &str = "sldd";

/// Convert a DBC network matrix into a data dictionary
///
/// Picks up an optional `generate.yml` next to the input, builds one bus per
/// frame and appends every referenced enum type. Returns the written archive
/// path (input path with the extension replaced).
pub fn dbc_to_sldd(input: &Path) -> Result<PathBuf> {
    let config = load_convert_config(input)?.unwrap_or_default();
    let set = sources::dbc::load_signal_set(input)?;

    let mut registry =
        EnumRegistry::with_named_tables(config.enum_prefix.clone(), set.value_tables.clone());
    let buses = build::build_bus_entries(&set.frames, &config, &mut registry);
    log::info!(
        "Assembled {} buses and {} enum types",
        buses.len(),
        registry.exported_count()
    );

    let mut document = Document::new();
    for bus in buses {
        document.push(Entry::Bus(bus));
    }
    for entry in registry.into_entries() {
        document.push(Entry::Enum(entry));
    }

    let output = input.with_extension(OUTPUT_EXTENSION);
    codec::write_document(&document, &output)?;
    Ok(output)
}

/// Convert a tabular parameter sheet into a data dictionary
///
/// All rows share the coder metadata profile selected by `kind`. The first
/// row failing validation aborts the run before any archive is written.
pub fn params_to_sldd(input: &Path, kind: ParameterKind) -> Result<PathBuf> {
    let rows = sources::params::load_parameter_rows(input)?;
    let entries = build::build_parameter_entries(&rows, kind)?;

    let mut document = Document::new();
    for entry in entries {
        document.push(Entry::Parameter(entry));
    }

    let output = input.with_extension(OUTPUT_EXTENSION);
    codec::write_document(&document, &output)?;
    Ok(output)
}

/// Convert a signal set that has already been adapted
///
/// Entry point for embedding callers that bring their own source adapter but
/// want the standard canonicalization, assembly and codec behavior.
pub fn signal_set_to_sldd(
    set: &crate::types::SignalSet,
    config: &ConvertConfig,
    output: &Path,
) -> Result<()> {
    let mut registry =
        EnumRegistry::with_named_tables(config.enum_prefix.clone(), set.value_tables.clone());
    let buses = build::build_bus_entries(&set.frames, config, &mut registry);

    let mut document = Document::new();
    for bus in buses {
        document.push(Entry::Bus(bus));
    }
    for entry in registry.into_entries() {
        document.push(Entry::Enum(entry));
    }

    codec::write_document(&document, output)
}
