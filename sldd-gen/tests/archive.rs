//! End-to-end archive tests
//!
//! Drives the pipeline from descriptors to a packaged archive and inspects
//! the result through a ZIP reader, the way the consuming tool would.

use sldd_gen::{signal_set_to_sldd, ConvertConfig, FrameDescriptor, SignalDescriptor, SignalSet};
use std::io::Read;

fn signal(name: &str, bit_length: u16, factor: f64) -> SignalDescriptor {
    SignalDescriptor {
        name: name.to_string(),
        bit_length,
        is_signed: false,
        factor,
        offset: 0.0,
        comment: None,
        unit: None,
        value_table: None,
    }
}

fn sample_set() -> SignalSet {
    let mut lamp = signal("LampState", 2, 1.0);
    lamp.value_table = Some(
        [(0, "Off".to_string()), (1, "On".to_string())]
            .into_iter()
            .collect(),
    );
    SignalSet {
        frames: vec![FrameDescriptor {
            name: "BodyControl".to_string(),
            signals: vec![signal("Speed", 12, 1.0), signal("Temp", 8, 0.5), lamp],
        }],
        value_tables: Vec::new(),
    }
}

fn read_archive(path: &std::path::Path) -> (Vec<String>, String) {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    let mut chunk = String::new();
    archive
        .by_name("data/chunk0.xml")
        .unwrap()
        .read_to_string(&mut chunk)
        .unwrap();
    (names, chunk)
}

#[test]
fn archive_has_fixed_layout_and_well_formed_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("body.sldd");
    signal_set_to_sldd(&sample_set(), &ConvertConfig::default(), &output).unwrap();

    let (names, chunk) = read_archive(&output);
    assert_eq!(
        names,
        vec!["[Content_Types].xml", "_rels/.rels", "data/chunk0.xml"]
    );

    // The chunk parses as well-formed XML with the fixed root attributes
    let mut reader = quick_xml::Reader::from_str(&chunk);
    let mut depth = 0usize;
    let mut root_checked = false;
    loop {
        match reader.read_event().unwrap() {
            quick_xml::events::Event::Start(e) => {
                if depth == 0 {
                    assert_eq!(e.name().as_ref(), b"DataSource");
                    let attrs: Vec<(String, String)> = e
                        .attributes()
                        .map(|a| {
                            let a = a.unwrap();
                            (
                                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                                String::from_utf8(a.value.to_vec()).unwrap(),
                            )
                        })
                        .collect();
                    assert!(attrs.contains(&("FormatVersion".to_string(), "1".to_string())));
                    assert!(attrs.contains(&("MinRelease".to_string(), "R2014a".to_string())));
                    assert!(attrs.contains(&("Arch".to_string(), "win64".to_string())));
                    root_checked = true;
                }
                depth += 1;
            }
            quick_xml::events::Event::End(_) => depth -= 1,
            quick_xml::events::Event::Eof => break,
            _ => {}
        }
    }
    assert!(root_checked);

    // Inferred types and the aliased enum reference show up in the payload
    assert!(chunk.contains("CAN_MSG_BodyControl_t"));
    assert!(chunk.contains(">uint16</P>"));
    assert!(chunk.contains(">single</P>"));
    assert!(chunk.contains(">Enum: LampState_enum</P>"));
    assert!(chunk.contains(">IsMsgAvl</P>"));
}

#[test]
fn conversion_is_deterministic_modulo_identity() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.sldd");
    let second = dir.path().join("second.sldd");
    let set = sample_set();
    let config = ConvertConfig::default();
    signal_set_to_sldd(&set, &config, &first).unwrap();
    signal_set_to_sldd(&set, &config, &second).unwrap();

    let (_, chunk_a) = read_archive(&first);
    let (_, chunk_b) = read_archive(&second);

    // Identical except for generated UUIDs and timestamps
    let strip = |chunk: &str| -> Vec<String> {
        chunk
            .lines()
            .filter(|line| !line.contains("\"UUID\"") && !line.contains("\"LastMod\""))
            .map(|line| line.to_string())
            .collect()
    };
    assert_eq!(strip(&chunk_a), strip(&chunk_b));
    assert_ne!(chunk_a, chunk_b);
}

#[test]
fn enum_prefix_from_config_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("prefixed.sldd");
    let config = ConvertConfig {
        enum_prefix: Some("VEH_".to_string()),
        msgs: None,
    };
    signal_set_to_sldd(&sample_set(), &config, &output).unwrap();

    let (_, chunk) = read_archive(&output);
    assert!(chunk.contains(">Enum: VEH_LampState_enum</P>"));
    assert!(chunk.contains("VEH_LampState_enum"));
}
