//! Bus assembly
//!
//! One bus entry per CAN frame: a synthetic availability element first, the
//! frame's signals after it in ascending name order. Placeholder frames and
//! frames outside the configured allow-list are skipped.

use crate::config::ConvertConfig;
use crate::document::{BusElement, BusEntry, AVAILABILITY_SIGNAL};
use crate::enums::EnumRegistry;
use crate::infer::infer_scalar_type;
use crate::types::{FrameDescriptor, SignalDescriptor};

/// Prefix of internal-only placeholder frames emitted by matrix editors
const PLACEHOLDER_FRAME_PREFIX: &str = "VECTOR__INDEPENDENT_SIG";

/// Naming template applied to every bus
fn bus_name(frame_name: &str) -> String {
    format!("CAN_MSG_{}_t", frame_name)
}

/// Build bus entries for a set of frames
///
/// Enum-typed signals are resolved through the registry, which records every
/// referenced table for later export. Frame order is preserved; element order
/// within a bus is availability-first, then ascending by name.
pub fn build_bus_entries(
    frames: &[FrameDescriptor],
    config: &ConvertConfig,
    registry: &mut EnumRegistry,
) -> Vec<BusEntry> {
    let mut buses = Vec::new();

    for frame in frames {
        if frame.name.starts_with(PLACEHOLDER_FRAME_PREFIX) {
            log::debug!("Skipping placeholder frame '{}'", frame.name);
            continue;
        }
        if !config.allows_message(&frame.name) {
            log::debug!("Frame '{}' not in allow-list, skipping", frame.name);
            continue;
        }

        let mut elements: Vec<BusElement> = frame
            .signals
            .iter()
            .map(|signal| build_element(signal, registry))
            .collect();

        elements.sort_by(|a, b| a.name.cmp(&b.name));

        if !elements.iter().any(|e| e.name == AVAILABILITY_SIGNAL) {
            elements.insert(0, availability_element());
        }

        log::debug!(
            "Built bus '{}' with {} elements",
            frame.name,
            elements.len()
        );
        buses.push(BusEntry {
            name: bus_name(&frame.name),
            elements,
        });
    }

    buses
}

/// Build one bus element from a signal descriptor
fn build_element(signal: &SignalDescriptor, registry: &mut EnumRegistry) -> BusElement {
    let data_type = match &signal.value_table {
        Some(table) if !table.is_empty() => {
            format!("Enum: {}", registry.resolve(&signal.name, table))
        }
        _ => infer_scalar_type(
            signal.bit_length,
            signal.is_signed,
            signal.factor,
            signal.offset,
        )
        .name()
        .to_string(),
    };

    BusElement {
        name: signal.name.clone(),
        data_type,
        dimensions: 1,
        description: signal.comment.clone().unwrap_or_default(),
        units: signal.unit.clone().unwrap_or_default(),
    }
}

/// The synthetic boolean availability element inserted at position 0
fn availability_element() -> BusElement {
    BusElement {
        name: AVAILABILITY_SIGNAL.to_string(),
        data_type: "boolean".to_string(),
        dimensions: 1,
        description: "Is Message Available".to_string(),
        units: String::new(),
    }
}
