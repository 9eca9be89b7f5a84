//! In-memory document model
//!
//! Entries (buses, parameters, enum types) assembled by the builders, owned as
//! a whole until handed to the codec for one-shot serialization. No entry is
//! mutated after being added to the document.

use crate::types::{Result, SlddError};

/// Namespace identifier shared by every entry in a dictionary
pub const NAMESPACE: &str = "dacaf35e-55a5-454d-a7c1-93db038a210e";

/// Author marker written into every entry's identity block
pub const AUTHOR_MARKER: &str = "robot";

/// Name of the synthetic message-availability element
pub const AVAILABILITY_SIGNAL: &str = "IsMsgAvl";

/// One field of a bus type
#[derive(Debug, Clone, PartialEq)]
pub struct BusElement {
    /// Element name, unique within its owning bus
    pub name: String,
    /// Canonical data type (`boolean`, integer widths, `single`/`double`,
    /// or an `Enum: <name>` reference)
    pub data_type: String,
    /// Dimension count (scalar = 1)
    pub dimensions: u32,
    /// Element description, empty when absent upstream
    pub description: String,
    /// Engineering unit, empty when absent upstream
    pub units: String,
}

/// A bus type derived from one CAN frame
#[derive(Debug, Clone, PartialEq)]
pub struct BusEntry {
    /// Bus type name (fixed template around the frame name)
    pub name: String,
    /// Elements: availability element first, remainder ascending by name
    pub elements: Vec<BusElement>,
}

/// One enumeral of an exported enum type
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    /// Sanitized, identifier-safe label
    pub name: String,
    /// Integer code
    pub value: i64,
    /// Enumeral description (unused by the matrix sources)
    pub description: String,
}

/// An exported enumerated type
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
    /// Canonical name, unique within the document
    pub name: String,
    /// Enumerals ordered ascending by value
    pub values: Vec<EnumValue>,
}

impl EnumEntry {
    /// Default value of the type: the lowest-valued enumeral
    pub fn default_value(&self) -> Option<&str> {
        self.values
            .iter()
            .min_by_key(|v| v.value)
            .map(|v| v.name.as_str())
    }
}

/// Parameter kind selecting the coder metadata profile
///
/// A closed set: the reference tooling knows exactly two storage-class
/// families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Parameter imported from a generated header file
    ImportFromFile,
    /// Calibration parameter managed by the EcoObj package
    Calibration,
}

impl ParameterKind {
    /// Look up a kind by its profile name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "import_from_file" => Ok(ParameterKind::ImportFromFile),
            "eco" => Ok(ParameterKind::Calibration),
            other => Err(SlddError::UnknownProfile(other.to_string())),
        }
    }

    /// The coder metadata profile for this kind
    pub fn profile(&self) -> CoderProfile {
        match self {
            ParameterKind::ImportFromFile => CoderProfile {
                element_class: "Simulink.Parameter",
                storage_class: Some("Custom"),
                type_qualifier: Some(""),
                alias: Some(""),
                alignment: Some(-1.0),
                csc_package_name: "Simulink",
                parameter_or_signal: "Parameter",
                custom_storage_class: "ImportFromFile",
                custom_attributes: Some(CustomAttributes {
                    header_file: "generated_params.h",
                    concurrent_access: false,
                }),
            },
            ParameterKind::Calibration => CoderProfile {
                element_class: "EcoObj.Parameter",
                storage_class: None,
                type_qualifier: None,
                alias: None,
                alignment: None,
                csc_package_name: "EcoObj",
                parameter_or_signal: "Parameter",
                custom_storage_class: "Calibration",
                custom_attributes: None,
            },
        }
    }
}

/// Coder metadata profile attached to every parameter of one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct CoderProfile {
    /// XML element class of the parameter payload
    pub element_class: &'static str,
    pub storage_class: Option<&'static str>,
    pub type_qualifier: Option<&'static str>,
    pub alias: Option<&'static str>,
    pub alignment: Option<f64>,
    pub csc_package_name: &'static str,
    pub parameter_or_signal: &'static str,
    pub custom_storage_class: &'static str,
    pub custom_attributes: Option<CustomAttributes>,
}

impl CoderProfile {
    /// Composite type tag keying the custom-attributes sub-block
    pub fn attribute_class(&self) -> String {
        format!(
            "SimulinkCSC.AttribClass_{}_{}",
            self.csc_package_name, self.custom_storage_class
        )
    }
}

/// Custom storage-class attributes (import-from-file profile only)
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributes {
    pub header_file: &'static str,
    pub concurrent_access: bool,
}

/// A calibration or file-imported parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub name: String,
    /// Declared shape (rows, cols)
    pub dims: (usize, usize),
    /// Flattened values, length = rows * cols
    pub values: Vec<f64>,
    pub units: String,
    pub description: String,
    pub data_type: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub coder: CoderProfile,
}

impl ParameterEntry {
    /// Construct a parameter, validating shape and value content
    ///
    /// Fails when the flattened value count differs from rows * cols, or when
    /// any value is non-finite (a NaN marker from the source must never reach
    /// the serialized artifact).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        dims: (usize, usize),
        values: Vec<f64>,
        units: String,
        description: String,
        data_type: Option<String>,
        min: Option<f64>,
        max: Option<f64>,
        coder: CoderProfile,
    ) -> Result<Self> {
        let expected = dims.0 * dims.1;
        if values.len() != expected {
            return Err(SlddError::Validation(format!(
                "parameter '{}': {} values for declared dimensions {}x{} (expected {})",
                name,
                values.len(),
                dims.0,
                dims.1,
                expected
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(SlddError::Validation(format!(
                "parameter '{}': non-finite value {}",
                name, bad
            )));
        }
        Ok(Self {
            name,
            dims,
            values,
            units,
            description,
            data_type: data_type.unwrap_or_else(|| "double".to_string()),
            min,
            max,
            coder,
        })
    }
}

/// A single document entry
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Bus(BusEntry),
    Parameter(ParameterEntry),
    Enum(EnumEntry),
}

impl Entry {
    /// Name of the entry, as written into its identity block
    pub fn name(&self) -> &str {
        match self {
            Entry::Bus(bus) => &bus.name,
            Entry::Parameter(param) => &param.name,
            Entry::Enum(enm) => &enm.name,
        }
    }
}

/// The in-memory data dictionary: an ordered sequence of entries
///
/// Created fresh per conversion run and handed to the codec as a whole; never
/// persisted except as the final serialized artifact.
#[derive(Debug, Default)]
pub struct Document {
    entries: Vec<Entry>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; entries keep insertion order
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
