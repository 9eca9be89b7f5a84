//! SLDD Generator Library
//!
//! Converts CAN network matrices (DBC) and tabular calibration-parameter
//! sheets into Simulink Data Dictionary (.sldd) archives.
//!
//! # Architecture
//!
//! The pipeline runs strictly forward, one input set at a time:
//! - Source adapters read the upstream formats into narrow descriptor types
//! - Type inference maps each signal's encoding to a canonical scalar type
//! - The enum registry canonicalizes and deduplicates value tables
//! - The entry builders assemble bus, parameter and enum entries
//! - The codec serializes the document into the packaged-XML archive
//!
//! The library does NOT:
//! - Validate physical units or signal ranges
//! - Post-process the produced artifact
//! - Run conversions concurrently (callers serialize runs themselves)
//!
//! # Example Usage
//!
//! ```no_run
//! use sldd_gen::{dbc_to_sldd, params_to_sldd, ParameterKind};
//! use std::path::Path;
//!
//! // One bus per CAN message, plus every referenced enum type
//! let archive = dbc_to_sldd(Path::new("powertrain.dbc")).unwrap();
//! println!("Dictionary written to {:?}", archive);
//!
//! // Calibration parameters with the import-from-file coder profile
//! params_to_sldd(Path::new("params.csv"), ParameterKind::ImportFromFile).unwrap();
//! ```

// Public modules
pub mod build;
pub mod codec;
pub mod config;
pub mod convert;
pub mod document;
pub mod enums;
pub mod infer;
pub mod sources;
pub mod types;

// Re-export main types for convenience
pub use config::ConvertConfig;
pub use convert::{dbc_to_sldd, params_to_sldd, signal_set_to_sldd};
pub use document::{
    BusElement, BusEntry, Document, Entry, EnumEntry, ParameterEntry, ParameterKind,
};
pub use enums::EnumRegistry;
pub use infer::{infer_scalar_type, ScalarType};
pub use types::{
    FrameDescriptor, ParameterRow, Result, SignalDescriptor, SignalSet, SlddError, ValueTable,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
