//! Tabular parameter adapter
//!
//! Reads a CSV export of the calibration parameter sheet. Header names are
//! normalized by stripping spaces, so "Dimensions_1" and "Dimensions _1" are
//! the same column. A malformed numeric value fails the row hard; silently
//! carrying a NaN into the artifact is never acceptable.

use crate::types::{ParameterRow, Result, SlddError};
use std::path::Path;

/// Number of positional value slots in the sheet
pub const VALUE_SLOTS: usize = 10;

/// Parse a parameter sheet into rows
pub fn load_parameter_rows(path: &Path) -> Result<Vec<ParameterRow>> {
    log::info!("Reading parameter table: {:?}", path);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SlddError::ParameterTable(format!("{:?}: {}", path, e)))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SlddError::ParameterTable(e.to_string()))?
        .iter()
        .map(|h| h.replace(' ', ""))
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let required = |name: &str| {
        column(name).ok_or_else(|| {
            SlddError::ParameterTable(format!("missing column '{}' in {:?}", name, path))
        })
    };

    let name_col = required("Name")?;
    let dim1_col = required("Dimensions_1")?;
    let dim2_col = required("Dimensions_2")?;
    let unit_col = column("Unit");
    let description_col = column("Description");
    let data_type_col = column("DataType");
    let min_col = column("Min");
    let max_col = column("Max");
    let value_cols: Vec<Option<usize>> = (1..=VALUE_SLOTS)
        .map(|i| column(&format!("Value_{}", i)))
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| SlddError::ParameterTable(e.to_string()))?;
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

        let name = field(Some(name_col)).to_string();
        if name.is_empty() {
            log::debug!("Skipping unnamed row {}", index + 1);
            continue;
        }

        let dims = (
            parse_dimension(&name, "Dimensions_1", field(Some(dim1_col)))?,
            parse_dimension(&name, "Dimensions_2", field(Some(dim2_col)))?,
        );

        // Populated slots only; empty trailing slots are not values
        let mut values = Vec::new();
        for col in &value_cols {
            let raw = field(*col);
            if raw.is_empty() {
                continue;
            }
            values.push(parse_value(&name, raw)?);
        }

        rows.push(ParameterRow {
            name,
            dims,
            values,
            unit: field(unit_col).to_string(),
            description: field(description_col).to_string(),
            data_type: non_empty(field(data_type_col)),
            min: parse_optional(field(min_col))?,
            max: parse_optional(field(max_col))?,
        });
    }

    log::info!("Read {} parameter rows from {:?}", rows.len(), path);
    Ok(rows)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn parse_dimension(row: &str, column: &str, raw: &str) -> Result<usize> {
    raw.parse().map_err(|_| {
        SlddError::Validation(format!(
            "parameter '{}': {} is not a valid dimension: '{}'",
            row, column, raw
        ))
    })
}

fn parse_value(row: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| {
        SlddError::Validation(format!(
            "parameter '{}': malformed numeric value '{}'",
            row, raw
        ))
    })?;
    if !value.is_finite() {
        return Err(SlddError::Validation(format!(
            "parameter '{}': non-finite value '{}'",
            row, raw
        )));
    }
    Ok(value)
}

fn parse_optional(raw: &str) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| SlddError::Validation(format!("malformed numeric bound '{}'", raw)))?;
    if !value.is_finite() {
        return Err(SlddError::Validation(format!(
            "non-finite numeric bound '{}'",
            raw
        )));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const HEADER: &str = "Name,Dimensions_1,Dimensions_2,Value_1,Value_2,Value_3,Value_4,Value_5,Value_6,Value_7,Value_8,Value_9,Value_10,Unit,Description,DataType,Min,Max\n";

    #[test]
    fn test_rows_parsed_with_populated_slots_only() {
        let file = write_csv(&format!(
            "{}InputRange,1,2,0.0,5.0,,,,,,,,,V,Input range,single,0,12\n",
            HEADER
        ));
        let rows = load_parameter_rows(file.path()).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.name, "InputRange");
        assert_eq!(row.dims, (1, 2));
        assert_eq!(row.values, vec![0.0, 5.0]);
        assert_eq!(row.unit, "V");
        assert_eq!(row.data_type.as_deref(), Some("single"));
        assert_eq!(row.min, Some(0.0));
        assert_eq!(row.max, Some(12.0));
    }

    #[test]
    fn test_headers_normalized_by_stripping_spaces() {
        let file = write_csv(
            "Name,Dimensions _1,Dimensions _2,Value_1,Unit,Description,DataType,Min,Max\nGain,1,1,2.5,,,,,\n",
        );
        let rows = load_parameter_rows(file.path()).unwrap();
        assert_eq!(rows[0].dims, (1, 1));
        assert_eq!(rows[0].values, vec![2.5]);
        assert_eq!(rows[0].data_type, None);
        assert_eq!(rows[0].min, None);
    }

    #[test]
    fn test_malformed_value_fails_the_row() {
        let file = write_csv(&format!(
            "{}Broken,1,1,abc,,,,,,,,,,,,,,\n",
            HEADER
        ));
        let result = load_parameter_rows(file.path());
        assert!(matches!(result, Err(SlddError::Validation(_))));
    }

    #[test]
    fn test_nan_marker_fails_the_row() {
        let file = write_csv(&format!(
            "{}Broken,1,1,NaN,,,,,,,,,,,,,,\n",
            HEADER
        ));
        let result = load_parameter_rows(file.path());
        assert!(matches!(result, Err(SlddError::Validation(_))));
    }

    #[test]
    fn test_non_finite_bound_fails_the_row() {
        let file = write_csv(&format!(
            "{}Gain,1,1,2.5,,,,,,,,,,,,,NaN,inf\n",
            HEADER
        ));
        let result = load_parameter_rows(file.path());
        assert!(matches!(result, Err(SlddError::Validation(_))));
    }

    #[test]
    fn test_missing_required_column_is_rejected() {
        let file = write_csv("Name,Dimensions_1,Value_1\nGain,1,2.5\n");
        let result = load_parameter_rows(file.path());
        assert!(matches!(result, Err(SlddError::ParameterTable(_))));
    }
}
