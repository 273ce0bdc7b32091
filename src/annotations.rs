use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::color::Color;
use crate::error::{PlateMapError, PlateMapResult};
use crate::plate::WellId;
use crate::scene::unescape_newlines;

/// Per-well metadata supplied via the input file.
#[derive(Clone, Debug, PartialEq)]
pub struct WellAnnotation {
    /// Text drawn centered in the well. May contain newlines.
    pub label: String,
    /// Well fill color. `None` leaves the well unfilled.
    pub fill: Option<Color>,
    /// Label text color. `None` means black.
    pub label_color: Option<Color>,
}

/// Raw CSV row shape. `well` and `label` are required columns, the color
/// columns are optional.
#[derive(Debug, Deserialize)]
struct AnnotationRow {
    well: String,
    label: String,
    #[serde(default)]
    fill: Option<String>,
    #[serde(default)]
    label_color: Option<String>,
}

/// Load well annotations from a CSV file.
pub fn load_annotations(path: &Path) -> PlateMapResult<BTreeMap<WellId, WellAnnotation>> {
    let file = File::open(path)
        .map_err(|e| PlateMapError::io(format!("open annotations '{}': {e}", path.display())))?;
    read_annotations(BufReader::new(file))
}

/// Read well annotations from any CSV source.
///
/// Duplicate rows for the same well resolve deterministically: the last row
/// wins, and each overwritten entry is logged.
pub fn read_annotations<R: Read>(reader: R) -> PlateMapResult<BTreeMap<WellId, WellAnnotation>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut annotations = BTreeMap::new();

    for (i, row) in csv_reader.deserialize::<AnnotationRow>().enumerate() {
        let row =
            row.map_err(|e| PlateMapError::input(format!("annotations row {}: {e}", i + 1)))?;
        let well: WellId = row.well.parse()?;

        let annotation = WellAnnotation {
            label: unescape_newlines(&row.label),
            fill: parse_color_field(row.fill.as_deref(), well, "fill")?,
            label_color: parse_color_field(row.label_color.as_deref(), well, "label_color")?,
        };

        if annotations.insert(well, annotation).is_some() {
            tracing::warn!(%well, "duplicate annotation row; keeping the later one");
        }
    }

    Ok(annotations)
}

fn parse_color_field(
    field: Option<&str>,
    well: WellId,
    column: &str,
) -> PlateMapResult<Option<Color>> {
    let Some(value) = field else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let color = value.parse().map_err(|e| match e {
        PlateMapError::Input(msg) => {
            PlateMapError::input(format!("well {well}, column '{column}': {msg}"))
        }
        other => other,
    })?;
    Ok(Some(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_with_and_without_colors() {
        let csv = "well,label,fill,label_color\n\
                   A1,ctrl,,\n\
                   B7,drug A,red,#ffffff\n";
        let annotations = read_annotations(csv.as_bytes()).unwrap();
        assert_eq!(annotations.len(), 2);

        let a1 = &annotations[&"A1".parse::<WellId>().unwrap()];
        assert_eq!(a1.label, "ctrl");
        assert_eq!(a1.fill, None);
        assert_eq!(a1.label_color, None);

        let b7 = &annotations[&"B7".parse::<WellId>().unwrap()];
        assert_eq!(b7.label, "drug A");
        assert_eq!(b7.fill, Some(Color::rgb(255, 0, 0)));
        assert_eq!(b7.label_color, Some(Color::WHITE));
    }

    #[test]
    fn color_columns_are_optional() {
        let csv = "well,label\nC3,sample\n";
        let annotations = read_annotations(csv.as_bytes()).unwrap();
        let c3 = &annotations[&"C3".parse::<WellId>().unwrap()];
        assert_eq!(c3.label, "sample");
        assert_eq!(c3.fill, None);
    }

    #[test]
    fn label_escape_sequences_become_newlines() {
        let csv = "well,label\nD4,day 1\\nday 2\n";
        let annotations = read_annotations(csv.as_bytes()).unwrap();
        assert_eq!(
            annotations[&"D4".parse::<WellId>().unwrap()].label,
            "day 1\nday 2"
        );
    }

    #[test]
    fn header_only_input_yields_empty_map() {
        let csv = "well,label,fill,label_color\n";
        assert!(read_annotations(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn duplicate_wells_keep_the_last_row() {
        let csv = "well,label\nE5,first\nE5,second\n";
        let annotations = read_annotations(csv.as_bytes()).unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[&"E5".parse::<WellId>().unwrap()].label, "second");
    }

    #[test]
    fn rejects_out_of_range_well() {
        let csv = "well,label\nI1,bad\n";
        let err = read_annotations(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PlateMapError::Input(_)), "got {err}");
    }

    #[test]
    fn rejects_missing_required_column() {
        let csv = "well,fill\nA1,red\n";
        let err = read_annotations(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PlateMapError::Input(_)), "got {err}");
    }

    #[test]
    fn rejects_bad_color_with_well_context() {
        let csv = "well,label,fill\nF6,x,notacolor\n";
        let err = read_annotations(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("F6"), "got {err}");
    }
}
