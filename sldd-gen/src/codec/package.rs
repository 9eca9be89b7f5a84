//! Archive packaging
//!
//! Stages the two fixed manifests and the rendered chunk in a scoped
//! temporary directory, then packages exactly those three files into a
//! deflate ZIP at their fixed internal paths. The staging directory is
//! removed on every exit path when the [`tempfile::TempDir`] guard drops.

use crate::types::{Result, SlddError};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Internal archive paths dictated by the consuming tool
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const RELATIONSHIPS_PATH: &str = "_rels/.rels";
pub const CHUNK_PATH: &str = "data/chunk0.xml";

/// Fixed content-types manifest
const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default ContentType="application/vnd.openxmlformats-package.relationships+xml" Extension="rels"/>
  <Default ContentType="application/vnd.mathworks.simulink.data.dictionaryChunk+xml" Extension="xml"/>
</Types>
"#;

/// Fixed relationships manifest pointing at the chunk payload
const RELATIONSHIPS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Target="data/chunk0.xml" Type="http://schemas.mathworks.com/simulink/2010/relationships/dictionaryChunk"/>
</Relationships>
"#;

/// Stage and package one rendered chunk into the output archive
///
/// The ZIP is written to a temporary sibling of the output and renamed into
/// place only after a clean finish, so a failure mid-packaging never leaves a
/// truncated archive at the output path.
pub fn package_archive(chunk: &str, output: &Path) -> Result<()> {
    let staging = tempfile::Builder::new()
        .prefix("sldd-stage-")
        .tempdir()?;
    let root = staging.path();
    log::debug!("Staging archive content in {:?}", root);

    fs::create_dir_all(root.join("_rels"))?;
    fs::create_dir_all(root.join("data"))?;
    fs::write(root.join(CONTENT_TYPES_PATH), CONTENT_TYPES_XML)?;
    fs::write(root.join(RELATIONSHIPS_PATH), RELATIONSHIPS_XML)?;
    fs::write(root.join(CHUNK_PATH), chunk)?;

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let archive = tempfile::Builder::new()
        .prefix("sldd-")
        .suffix(".partial")
        .tempfile_in(parent)?;
    let mut writer = zip::ZipWriter::new(archive);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for path in [CONTENT_TYPES_PATH, RELATIONSHIPS_PATH, CHUNK_PATH] {
        writer
            .start_file(path, options)
            .map_err(|e| SlddError::Package(format!("{}: {}", path, e)))?;
        let bytes = fs::read(root.join(path))?;
        writer.write_all(&bytes)?;
    }
    let archive = writer
        .finish()
        .map_err(|e| SlddError::Package(e.to_string()))?;
    archive.persist(output).map_err(|e| e.error)?;

    log::info!("Archive written to {:?}", output);
    Ok(())
}
