//! Parameter assembly
//!
//! One parameter entry per table row, all rows of a run sharing the coder
//! metadata profile selected by the caller's parameter kind. The first row
//! that fails validation aborts the run; no partial artifact is written.

use crate::document::{ParameterEntry, ParameterKind};
use crate::types::{ParameterRow, Result};

/// Build parameter entries for a set of rows
pub fn build_parameter_entries(
    rows: &[ParameterRow],
    kind: ParameterKind,
) -> Result<Vec<ParameterEntry>> {
    let profile = kind.profile();
    log::info!(
        "Building {} parameter entries with profile '{}'",
        rows.len(),
        profile.element_class
    );

    rows.iter()
        .map(|row| {
            ParameterEntry::new(
                row.name.clone(),
                row.dims,
                row.values.clone(),
                row.unit.clone(),
                row.description.clone(),
                row.data_type.clone(),
                row.min,
                row.max,
                profile.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SlddError;

    fn row(name: &str, dims: (usize, usize), values: Vec<f64>) -> ParameterRow {
        ParameterRow {
            name: name.to_string(),
            dims,
            values,
            unit: "V".to_string(),
            description: String::new(),
            data_type: Some("single".to_string()),
            min: Some(0.0),
            max: Some(12.0),
        }
    }

    #[test]
    fn test_rows_become_entries_with_selected_profile() {
        let rows = vec![
            row("InputRange", (1, 2), vec![0.0, 5.0]),
            row("Threshold", (1, 1), vec![2.5]),
        ];
        let entries = build_parameter_entries(&rows, ParameterKind::Calibration).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].coder.element_class, "EcoObj.Parameter");
        assert_eq!(entries[1].values, vec![2.5]);
        assert_eq!(entries[0].data_type, "single");
    }

    #[test]
    fn test_dimension_mismatch_aborts_the_run() {
        let rows = vec![
            row("Good", (1, 1), vec![1.0]),
            row("Bad", (1, 2), vec![1.0, 2.0, 3.0]),
        ];
        let result = build_parameter_entries(&rows, ParameterKind::ImportFromFile);
        assert!(matches!(result, Err(SlddError::Validation(_))));
    }
}
