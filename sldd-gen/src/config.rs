//! Per-input conversion configuration
//!
//! A `generate.yml` sitting next to the input file can tune one conversion: an
//! enum name prefix and an allow-list of message names. The file is keyed by
//! input file name so one configuration can serve a directory of matrices.
//! A missing file or missing key is not an error; the conversion proceeds
//! with defaults.

use crate::types::{Result, SlddError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// File name searched for next to the conversion input
pub const CONFIG_FILE_NAME: &str = "generate.yml";

/// Configuration applied to one conversion run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Prefix prepended to canonical enum names
    #[serde(default)]
    pub enum_prefix: Option<String>,

    /// Message allow-list; empty or absent means no filtering
    #[serde(default)]
    pub msgs: Option<Vec<String>>,
}

impl ConvertConfig {
    /// Whether a message passes the allow-list
    pub fn allows_message(&self, name: &str) -> bool {
        match &self.msgs {
            Some(msgs) if !msgs.is_empty() => msgs.iter().any(|m| m == name),
            _ => true,
        }
    }
}

/// Load the configuration entry for an input file, if any
///
/// Looks for [`CONFIG_FILE_NAME`] in the input's directory and picks the
/// mapping keyed by the input's file name. Returns `Ok(None)` when the file
/// or the key is absent; malformed YAML is a hard error.
pub fn load_convert_config(input: &Path) -> Result<Option<ConvertConfig>> {
    let dir = input.parent().unwrap_or_else(|| Path::new("."));
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        log::debug!("No configuration file at {:?}", config_path);
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path)?;
    let mut by_file: HashMap<String, ConvertConfig> =
        serde_yaml::from_str(&content).map_err(|e| {
            SlddError::Config(format!("failed to parse {:?}: {}", config_path, e))
        })?;

    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    match by_file.remove(file_name) {
        Some(config) => {
            log::info!("Using configuration for '{}' from {:?}", file_name, config_path);
            Ok(Some(config))
        }
        None => {
            log::debug!("No configuration entry for '{}'", file_name);
            Ok(None)
        }
    }
}
