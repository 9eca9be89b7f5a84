//! Document codec
//!
//! Serializes an assembled [`Document`] into the packaged-XML archive the
//! consuming tool expects. Rendering and packaging are separate steps so a
//! serialization failure never leaves a partial archive behind.

pub mod model;
pub mod package;

use crate::document::Document;
use crate::types::Result;
use std::path::Path;

/// Serialize a document and package it at `output`
pub fn write_document(document: &Document, output: &Path) -> Result<()> {
    log::info!(
        "Serializing dictionary with {} entries to {:?}",
        document.len(),
        output
    );
    let chunk = model::render_chunk(document)?;
    package::package_archive(&chunk, output)
}
