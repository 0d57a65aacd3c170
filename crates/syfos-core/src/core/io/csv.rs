use crate::core::models::curve::{Curve, CurveError, ForceVolume};
use crate::core::models::parameters::MaterialParameters;
use crate::core::models::series::{ApproachParameterSeries, ContactParameterSeries};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Column '{0}' not found in CSV header")]
    MissingColumn(String),
    #[error("Invalid number '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Column '{column}' ends at row {row} while its partner column continues")]
    RaggedColumns { column: String, row: usize },
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// Scalar parameters exported alongside a force volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceVolumeMetadata {
    pub etot: f64,
    pub jtc: f64,
    pub hamaker: f64,
}

impl From<&MaterialParameters> for ForceVolumeMetadata {
    fn from(material: &MaterialParameters) -> Self {
        Self {
            etot: material.reduced_modulus(),
            jtc: material.jump_to_contact(),
            hamaker: material.hamaker_constant(),
        }
    }
}

/// Column names of a force volume with `replica_count` replicas, as x/y pairs in
/// curve order.
pub fn force_volume_column_names(replica_count: usize) -> Vec<String> {
    let mut names = vec![
        "ideal_curve_x_values".to_string(),
        "ideal_curve_y_values".to_string(),
        "ideal_curve_shifted_x_values".to_string(),
        "ideal_curve_shifted_y_values".to_string(),
    ];
    for n in 1..=replica_count {
        names.push(format!("curve_{n}_x_values"));
        names.push(format!("curve_{n}_y_values"));
    }
    names
}

/// Writes every curve of the force volume as a column pair. Shorter curves leave
/// their cells empty.
pub fn write_force_volume<W: Write>(volume: &ForceVolume, writer: W) -> Result<(), CsvError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(force_volume_column_names(volume.replicas().len()))?;

    let rows = volume.curves().iter().map(Curve::len).max().unwrap_or(0);
    let mut record = Vec::with_capacity(volume.len() * 2);
    for row in 0..rows {
        record.clear();
        for curve in volume.curves() {
            match (curve.piezo().get(row), curve.deflection().get(row)) {
                (Some(x), Some(y)) => {
                    record.push(x.to_string());
                    record.push(y.to_string());
                }
                _ => {
                    record.push(String::new());
                    record.push(String::new());
                }
            }
        }
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(|e| CsvError::Io {
        path: "<force volume>".to_string(),
        source: e,
    })?;
    Ok(())
}

pub fn write_metadata<W: Write>(metadata: &ForceVolumeMetadata, writer: W) -> Result<(), CsvError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.serialize(metadata)?;
    csv_writer.flush().map_err(|e| CsvError::Io {
        path: "<metadata>".to_string(),
        source: e,
    })?;
    Ok(())
}

pub fn read_metadata<R: Read>(reader: R) -> Result<Option<ForceVolumeMetadata>, CsvError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let first = csv_reader.deserialize::<ForceVolumeMetadata>().next();
    Ok(first.transpose()?)
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize, CsvError> {
    headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| CsvError::MissingColumn(column.to_string()))
}

fn parse_cell(field: Option<&str>, column: &str, row: usize) -> Result<Option<f64>, CsvError> {
    match field.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .map_err(|_| CsvError::InvalidValue {
                column: column.to_string(),
                row,
                value: text.to_string(),
            }),
    }
}

/// Reads one curve from the column pair `x_column` (piezo) / `y_column` (deflection).
///
/// Trailing empty cells end the curve, so curves of different lengths can share a file.
/// Rows are numbered from 1, not counting the header.
pub fn read_curve<R: Read>(reader: R, x_column: &str, y_column: &str) -> Result<Curve, CsvError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let x_index = column_index(&headers, x_column)?;
    let y_index = column_index(&headers, y_column)?;

    let mut piezo = Vec::new();
    let mut deflection = Vec::new();
    let mut ended_at = None;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = row + 1;
        let x = parse_cell(record.get(x_index), x_column, row)?;
        let y = parse_cell(record.get(y_index), y_column, row)?;

        match (x, y) {
            (Some(x), Some(y)) => {
                if let Some(end) = ended_at {
                    return Err(CsvError::RaggedColumns {
                        column: x_column.to_string(),
                        row: end,
                    });
                }
                piezo.push(x);
                deflection.push(y);
            }
            (None, None) => {
                ended_at.get_or_insert(row);
            }
            (Some(_), None) => {
                return Err(CsvError::RaggedColumns {
                    column: y_column.to_string(),
                    row,
                });
            }
            (None, Some(_)) => {
                return Err(CsvError::RaggedColumns {
                    column: x_column.to_string(),
                    row,
                });
            }
        }
    }

    Ok(Curve::new(piezo, deflection)?)
}

#[derive(Serialize)]
struct ApproachRow {
    true_distance: f64,
    force: f64,
    spring_constant: f64,
    radius: f64,
    hamaker: f64,
}

#[derive(Serialize)]
struct ContactRow {
    deformation: f64,
    force: f64,
    spring_constant: f64,
    radius: f64,
    reduced_modulus: f64,
}

pub fn write_approach_series<W: Write>(
    series: &ApproachParameterSeries,
    writer: W,
) -> Result<(), CsvError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for i in 0..series.len() {
        csv_writer.serialize(ApproachRow {
            true_distance: series.true_distance[i],
            force: series.force[i],
            spring_constant: series.spring_constant[i],
            radius: series.radius[i],
            hamaker: series.hamaker[i],
        })?;
    }
    csv_writer.flush().map_err(|e| CsvError::Io {
        path: "<approach series>".to_string(),
        source: e,
    })?;
    Ok(())
}

pub fn write_contact_series<W: Write>(
    series: &ContactParameterSeries,
    writer: W,
) -> Result<(), CsvError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for i in 0..series.len() {
        csv_writer.serialize(ContactRow {
            deformation: series.deformation[i],
            force: series.force[i],
            spring_constant: series.spring_constant[i],
            radius: series.radius[i],
            reduced_modulus: series.reduced_modulus[i],
        })?;
    }
    csv_writer.flush().map_err(|e| CsvError::Io {
        path: "<contact series>".to_string(),
        source: e,
    })?;
    Ok(())
}

fn create_file(path: &Path) -> Result<BufWriter<File>, CsvError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| CsvError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
}

pub fn write_force_volume_to_path(volume: &ForceVolume, path: &Path) -> Result<(), CsvError> {
    write_force_volume(volume, create_file(path)?)
}

pub fn write_metadata_to_path(metadata: &ForceVolumeMetadata, path: &Path) -> Result<(), CsvError> {
    write_metadata(metadata, create_file(path)?)
}

pub fn write_approach_series_to_path(
    series: &ApproachParameterSeries,
    path: &Path,
) -> Result<(), CsvError> {
    write_approach_series(series, create_file(path)?)
}

pub fn write_contact_series_to_path(
    series: &ContactParameterSeries,
    path: &Path,
) -> Result<(), CsvError> {
    write_contact_series(series, create_file(path)?)
}

pub fn read_curve_from_path(
    path: &Path,
    x_column: &str,
    y_column: &str,
) -> Result<Curve, CsvError> {
    let file = File::open(path).map_err(|e| CsvError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_curve(file, x_column, y_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn small_volume() -> ForceVolume {
        let ideal = Curve::new(vec![0.0, 1.0, 2.0], vec![0.0, -0.5, 0.25]).unwrap();
        let shifted = ideal.shifted(10.0, 3.0).unwrap();
        let replica = shifted.with_deflection(vec![3.1, 2.4, 3.3]);
        ForceVolume::assemble(ideal, shifted, vec![replica])
    }

    #[test]
    fn column_names_follow_curve_order() {
        assert_eq!(
            force_volume_column_names(2),
            vec![
                "ideal_curve_x_values",
                "ideal_curve_y_values",
                "ideal_curve_shifted_x_values",
                "ideal_curve_shifted_y_values",
                "curve_1_x_values",
                "curve_1_y_values",
                "curve_2_x_values",
                "curve_2_y_values",
            ]
        );
    }

    #[test]
    fn force_volume_csv_has_header_and_one_row_per_sample() {
        let mut buffer = Vec::new();
        write_force_volume(&small_volume(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ideal_curve_x_values,ideal_curve_y_values"));
        assert!(lines[0].ends_with("curve_1_x_values,curve_1_y_values"));
        assert_eq!(lines[2], "1,-0.5,11,2.5,11,2.4");
    }

    #[test]
    fn written_curves_can_be_read_back() {
        let volume = small_volume();
        let mut buffer = Vec::new();
        write_force_volume(&volume, &mut buffer).unwrap();

        let shifted = read_curve(
            buffer.as_slice(),
            "ideal_curve_shifted_x_values",
            "ideal_curve_shifted_y_values",
        )
        .unwrap();
        assert_eq!(&shifted, volume.shifted());

        let replica =
            read_curve(buffer.as_slice(), "curve_1_x_values", "curve_1_y_values").unwrap();
        assert_eq!(replica.deflection(), &[3.1, 2.4, 3.3]);
    }

    #[test]
    fn read_curve_stops_at_trailing_empty_cells() {
        let data = "z,d,z2,d2\n0,0,0,0\n1,-1,1,-1\n,,2,1\n";
        let curve = read_curve(data.as_bytes(), "z", "d").unwrap();
        assert_eq!(curve.len(), 2);
    }

    #[test]
    fn read_curve_reports_missing_column() {
        let err = read_curve("a,b\n1,2\n".as_bytes(), "a", "c").unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn(column) if column == "c"));
    }

    #[test]
    fn read_curve_reports_unparsable_value_with_position() {
        let err = read_curve("z,d\n0,0\n1,abc\n".as_bytes(), "z", "d").unwrap_err();
        assert!(matches!(
            err,
            CsvError::InvalidValue { row: 2, ref value, .. } if value == "abc"
        ));
    }

    #[test]
    fn read_curve_rejects_gaps_inside_a_column() {
        let data = "z,d\n0,0\n,\n2,1\n";
        assert!(matches!(
            read_curve(data.as_bytes(), "z", "d"),
            Err(CsvError::RaggedColumns { row: 2, .. })
        ));
    }

    #[test]
    fn read_curve_rejects_non_increasing_piezo() {
        let data = "z,d\n1,0\n0,0\n";
        assert!(matches!(
            read_curve(data.as_bytes(), "z", "d"),
            Err(CsvError::Curve(CurveError::NonIncreasingPiezo { index: 1 }))
        ));
    }

    #[test]
    fn metadata_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        let metadata = ForceVolumeMetadata {
            etot: 8.25e10,
            jtc: -8.6e-10,
            hamaker: 7.7e-20,
        };

        write_metadata_to_path(&metadata, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("etot,jtc,hamaker"));

        let read = read_metadata(content.as_bytes()).unwrap();
        assert_eq!(read, Some(metadata));
    }

    #[test]
    fn read_curve_from_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let err = read_curve_from_path(&path, "z", "d").unwrap_err();
        assert!(matches!(err, CsvError::Io { path: p, .. } if p.ends_with("missing.csv")));
    }

    #[test]
    fn approach_series_rows_follow_field_order() {
        let series = ApproachParameterSeries {
            true_distance: vec![1.0],
            force: vec![-0.5],
            spring_constant: vec![2.0],
            radius: vec![3.0],
            hamaker: vec![4.0],
        };
        let mut buffer = Vec::new();
        write_approach_series(&series, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "true_distance,force,spring_constant,radius,hamaker\n1.0,-0.5,2.0,3.0,4.0\n"
        );
    }

    #[test]
    fn contact_series_writes_one_row_per_sample() {
        let series = ContactParameterSeries {
            deformation: vec![1.0, 2.0],
            force: vec![0.5, 0.6],
            spring_constant: vec![1.0, 1.0],
            radius: vec![2.0, 2.0],
            reduced_modulus: vec![3.0, 3.0],
        };
        let mut buffer = Vec::new();
        write_contact_series(&series, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("deformation,force,spring_constant,radius,reduced_modulus\n"));
    }
}
