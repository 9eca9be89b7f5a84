//! Dictionary chunk XML model
//!
//! Serde model structs mirroring the externally dictated chunk layout, plus
//! the conversions from document entries. The model is serialized with
//! quick-xml's serde support; attribute fields are `@`-prefixed, text content
//! is `$text`.

use crate::document::{
    BusElement, BusEntry, CoderProfile, Document, Entry, EnumEntry, ParameterEntry,
    AUTHOR_MARKER, NAMESPACE,
};
use crate::types::{Result, SlddError};
use serde::Serialize;
use uuid::Uuid;

/// Root attributes dictated by the consuming tool
const FORMAT_VERSION: &str = "1";
const MIN_RELEASE: &str = "R2014a";
const ARCH: &str = "win64";

/// Root node of `data/chunk0.xml`
#[derive(Debug, Serialize)]
#[serde(rename = "DataSource")]
pub struct DataSource {
    #[serde(rename = "@FormatVersion")]
    format_version: &'static str,
    #[serde(rename = "@MinRelease")]
    min_release: &'static str,
    #[serde(rename = "@Arch")]
    arch: &'static str,
    #[serde(rename = "Object")]
    objects: Vec<ObjectNode>,
}

/// A top-level `Object` node (entry or dictionary metadata)
#[derive(Debug, Serialize)]
pub struct ObjectNode {
    #[serde(rename = "@Class")]
    class: String,
    #[serde(rename = "P")]
    props: Vec<Prop>,
}

/// A `P` property node: named, optionally classed, with either text content
/// or nested `Element` children
#[derive(Debug, Serialize)]
pub struct Prop {
    #[serde(rename = "@Name")]
    name: String,
    #[serde(rename = "@Class", skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(rename = "@Dimension", skip_serializing_if = "Option::is_none")]
    dimension: Option<String>,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "Element", skip_serializing_if = "Vec::is_empty")]
    elements: Vec<ElementNode>,
}

/// A typed `Element` payload node
#[derive(Debug, Serialize)]
pub struct ElementNode {
    #[serde(rename = "@Class")]
    class: String,
    #[serde(rename = "P")]
    props: Vec<Prop>,
}

impl Prop {
    fn new(name: &str, class: Option<&str>, dimension: Option<String>, text: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            class: class.map(|c| c.to_string()),
            dimension,
            text,
            elements: Vec::new(),
        }
    }

    /// Character property; empty text collapses to a self-closing node
    fn char(name: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(name, Some("char"), None, (!text.is_empty()).then_some(text))
    }

    fn double(name: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(name, Some("double"), None, (!text.is_empty()).then_some(text))
    }

    fn logical(name: &str, text: &str) -> Self {
        Self::new(name, Some("logical"), None, Some(text.to_string()))
    }

    /// Dimensioned placeholder with no content (min/max internals)
    fn placeholder(name: &str, class: &str, dimension: &str) -> Self {
        Self::new(name, Some(class), Some(dimension.to_string()), None)
    }

    /// Property wrapping nested element nodes
    fn container(name: &str, dimension: Option<String>, elements: Vec<ElementNode>) -> Self {
        Self {
            name: name.to_string(),
            class: None,
            dimension,
            text: None,
            elements,
        }
    }
}

/// Render a document into the chunk XML text
///
/// XML declaration, two-space indentation, trailing newline. Entry identity
/// blocks receive a fresh UUID and the current local timestamp; everything
/// else is a pure function of the document.
pub fn render_chunk(document: &Document) -> Result<String> {
    let source = DataSource::from_document(document);
    let mut buffer = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 2);
    source
        .serialize(serializer)
        .map_err(|e| SlddError::Serialize(e.to_string()))?;
    buffer.push('\n');
    Ok(buffer)
}

impl DataSource {
    fn from_document(document: &Document) -> Self {
        let mut objects: Vec<ObjectNode> =
            document.entries().iter().map(entry_object).collect();
        objects.push(dictionary_object());
        Self {
            format_version: FORMAT_VERSION,
            min_release: MIN_RELEASE,
            arch: ARCH,
            objects,
        }
    }
}

/// Identity block wrapping one entry's payload
fn entry_object(entry: &Entry) -> ObjectNode {
    let payload = match entry {
        Entry::Bus(bus) => bus_node(bus),
        Entry::Parameter(param) => parameter_node(param),
        Entry::Enum(enm) => enum_node(enm),
    };
    ObjectNode {
        class: "DD.ENTRY".to_string(),
        props: vec![
            Prop::char("Name", entry.name()),
            Prop::char("UUID", Uuid::new_v4().to_string()),
            Prop::char("Namespace", NAMESPACE),
            Prop::char("LastMod", timestamp()),
            Prop::char("LastModBy", AUTHOR_MARKER),
            Prop::char("IsDerived", "0"),
            Prop::container("Value", None, vec![payload]),
        ],
    }
}

/// Trailing document-level metadata node
fn dictionary_object() -> ObjectNode {
    ObjectNode {
        class: "DD.Dictionary".to_string(),
        props: vec![Prop::logical("AccessBaseWorkspace", "0")],
    }
}

fn bus_node(bus: &BusEntry) -> ElementNode {
    let members: Vec<ElementNode> = bus.elements.iter().map(bus_member_node).collect();
    ElementNode {
        class: "Simulink.Bus".to_string(),
        props: vec![
            Prop::double("Alignment", "-1.0"),
            Prop::logical("PreserveElementDimensions", "0"),
            Prop::container(
                "Elements_internal",
                Some(format!("{}*1", bus.elements.len())),
                members,
            ),
            Prop::char("Description", ""),
            Prop::char("DataScope", "Auto"),
            Prop::char("HeaderFile", ""),
        ],
    }
}

fn bus_member_node(element: &BusElement) -> ElementNode {
    ElementNode {
        class: "Simulink.BusElement".to_string(),
        props: vec![
            Prop::placeholder("Min_internal", "double", "0*0"),
            Prop::placeholder("Max_internal", "double", "0*0"),
            Prop::char("DimensionsMode", "Fixed"),
            Prop::char("SamplingMode", "Sample based"),
            Prop::double("SampleTime", "-1.0"),
            Prop::char("Description", element.description.as_str()),
            Prop::char("DocUnits", element.units.as_str()),
            Prop::char("Name", element.name.as_str()),
            Prop::char("DataType_internal", element.data_type.as_str()),
            Prop::char("Complexity", "real"),
            Prop::double("Dimensions", element.dimensions.to_string()),
        ],
    }
}

fn parameter_node(param: &ParameterEntry) -> ElementNode {
    let (rows, cols) = param.dims;
    let joined = param
        .values
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(" ");
    ElementNode {
        class: param.coder.element_class.to_string(),
        props: vec![
            Prop {
                name: "Value".to_string(),
                class: Some("double".to_string()),
                dimension: Some(format!("{}*{}", rows, cols)),
                text: (!joined.is_empty()).then_some(joined),
                elements: Vec::new(),
            },
            Prop::char("Complexity", "real"),
            Prop {
                name: "Dimensions".to_string(),
                class: Some("double".to_string()),
                dimension: Some("1*2".to_string()),
                text: Some(format!("{} {}", rows, cols)),
                elements: Vec::new(),
            },
            Prop::char("Description", param.description.as_str()),
            Prop::char("DataType", param.data_type.as_str()),
            Prop::double("Min", param.min.map(format_number).unwrap_or_default()),
            Prop::double("Max", param.max.map(format_number).unwrap_or_default()),
            Prop::char("DocUnits", param.units.as_str()),
            Prop::container("CoderInfo", None, vec![coder_info_node(&param.coder)]),
        ],
    }
}

fn coder_info_node(profile: &CoderProfile) -> ElementNode {
    let mut props = Vec::new();
    if let Some(v) = profile.storage_class {
        props.push(Prop::char("StorageClass", v));
    }
    if let Some(v) = profile.type_qualifier {
        props.push(Prop::char("TypeQualifier", v));
    }
    if let Some(v) = profile.alias {
        props.push(Prop::char("Alias", v));
    }
    if let Some(v) = profile.alignment {
        props.push(Prop::double("Alignment", format_number(v)));
    }
    props.push(Prop::char("CSCPackageName", profile.csc_package_name));
    props.push(Prop::char("ParameterOrSignal", profile.parameter_or_signal));
    props.push(Prop::char("CustomStorageClass", profile.custom_storage_class));
    if let Some(attrs) = &profile.custom_attributes {
        props.push(Prop::container(
            "CustomAttributes",
            None,
            vec![ElementNode {
                class: profile.attribute_class(),
                props: vec![
                    Prop::char("HeaderFile", attrs.header_file),
                    Prop::logical(
                        "ConcurrentAccess",
                        if attrs.concurrent_access { "1" } else { "0" },
                    ),
                ],
            }],
        ));
    }
    ElementNode {
        class: "Simulink.CoderInfo".to_string(),
        props,
    }
}

fn enum_node(entry: &EnumEntry) -> ElementNode {
    let enumerals: Vec<ElementNode> = entry
        .values
        .iter()
        .map(|v| ElementNode {
            class: "Simulink.data.dictionary.EnumValue".to_string(),
            props: vec![
                Prop::char("Name", v.name.as_str()),
                Prop::double("Value", format_number(v.value as f64)),
                Prop::char("Description", v.description.as_str()),
            ],
        })
        .collect();
    ElementNode {
        class: "Simulink.data.dictionary.EnumTypeDefinition".to_string(),
        props: vec![
            Prop::container(
                "Enumerals",
                Some(format!("{}*1", entry.values.len())),
                enumerals,
            ),
            Prop::char("DefaultValue", entry.default_value().unwrap_or_default()),
            Prop::char("Description", ""),
            Prop::char("DataScope", "Auto"),
            Prop::char("HeaderFile", ""),
            Prop::char("StorageType", ""),
            Prop::logical("AddClassNameToEnumNames", "0"),
        ],
    }
}

/// Current local time at microsecond precision
fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%dT%H%M%S%.6f").to_string()
}

/// Match the reference tooling's float rendering: whole numbers keep one
/// fractional digit
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EnumValue, ParameterKind};

    fn sample_document() -> Document {
        let mut document = Document::new();
        document.push(Entry::Bus(BusEntry {
            name: "CAN_MSG_EngineData_t".to_string(),
            elements: vec![BusElement {
                name: "IsMsgAvl".to_string(),
                data_type: "boolean".to_string(),
                dimensions: 1,
                description: "Is Message Available".to_string(),
                units: String::new(),
            }],
        }));
        document.push(Entry::Enum(EnumEntry {
            name: "LampState_enum".to_string(),
            values: vec![
                EnumValue {
                    name: "Off".to_string(),
                    value: 0,
                    description: String::new(),
                },
                EnumValue {
                    name: "On".to_string(),
                    value: 1,
                    description: String::new(),
                },
            ],
        }));
        document
    }

    #[test]
    fn test_chunk_has_declaration_and_root_attributes() {
        let chunk = render_chunk(&sample_document()).unwrap();
        assert!(chunk.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(chunk.contains("<DataSource FormatVersion=\"1\" MinRelease=\"R2014a\" Arch=\"win64\">"));
        assert!(chunk.ends_with("</DataSource>\n"));
    }

    #[test]
    fn test_chunk_carries_identity_blocks_and_payloads() {
        let chunk = render_chunk(&sample_document()).unwrap();
        assert!(chunk.contains("Object Class=\"DD.ENTRY\""));
        assert!(chunk.contains("<P Name=\"Namespace\" Class=\"char\">dacaf35e-55a5-454d-a7c1-93db038a210e</P>"));
        assert!(chunk.contains("<P Name=\"LastModBy\" Class=\"char\">robot</P>"));
        assert!(chunk.contains("Element Class=\"Simulink.Bus\""));
        assert!(chunk.contains("<P Name=\"DataType_internal\" Class=\"char\">boolean</P>"));
        assert!(chunk.contains("Element Class=\"Simulink.data.dictionary.EnumTypeDefinition\""));
        // Enumeral values carry the same float rendering as every other double
        assert!(chunk.contains("<P Name=\"Value\" Class=\"double\">1.0</P>"));
        assert!(chunk.contains("<P Name=\"DefaultValue\" Class=\"char\">Off</P>"));
        // Trailing metadata node
        assert!(chunk.contains("Object Class=\"DD.Dictionary\""));
        assert!(chunk.contains("<P Name=\"AccessBaseWorkspace\" Class=\"logical\">0</P>"));
    }

    #[test]
    fn test_parameter_payload_with_coder_info() {
        let mut document = Document::new();
        let param = ParameterEntry::new(
            "InputRange".to_string(),
            (1, 2),
            vec![0.0, 5.0],
            "V".to_string(),
            "Input range".to_string(),
            None,
            Some(0.0),
            Some(12.0),
            ParameterKind::ImportFromFile.profile(),
        )
        .unwrap();
        document.push(Entry::Parameter(param));

        let chunk = render_chunk(&document).unwrap();
        assert!(chunk.contains("Element Class=\"Simulink.Parameter\""));
        assert!(chunk.contains(">0.0 5.0</P>"));
        assert!(chunk.contains("<P Name=\"Dimensions\" Class=\"double\" Dimension=\"1*2\">1 2</P>"));
        assert!(chunk.contains("Element Class=\"Simulink.CoderInfo\""));
        assert!(chunk.contains("<P Name=\"CustomStorageClass\" Class=\"char\">ImportFromFile</P>"));
        assert!(chunk.contains("Element Class=\"SimulinkCSC.AttribClass_Simulink_ImportFromFile\""));
        assert!(chunk.contains("<P Name=\"HeaderFile\" Class=\"char\">generated_params.h</P>"));
        assert!(chunk.contains("<P Name=\"ConcurrentAccess\" Class=\"logical\">0</P>"));
    }

    #[test]
    fn test_calibration_profile_has_no_custom_attributes() {
        let mut document = Document::new();
        let param = ParameterEntry::new(
            "Threshold".to_string(),
            (1, 1),
            vec![2.5],
            String::new(),
            String::new(),
            None,
            None,
            None,
            ParameterKind::Calibration.profile(),
        )
        .unwrap();
        document.push(Entry::Parameter(param));

        let chunk = render_chunk(&document).unwrap();
        assert!(chunk.contains("Element Class=\"EcoObj.Parameter\""));
        assert!(chunk.contains("<P Name=\"CustomStorageClass\" Class=\"char\">Calibration</P>"));
        assert!(!chunk.contains("CustomAttributes"));
        // Absent bounds serialize as empty properties
        assert!(chunk.contains("<P Name=\"Min\" Class=\"double\"/>"));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(-1.0), "-1.0");
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.125), "0.125");
    }
}
