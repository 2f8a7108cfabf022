use crate::core::models::sapt::SaptComponents;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaptError {
    #[error("CSV parsing error for '{path}': {source}", path = path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Column '{column}' not found in '{path}'", path = path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid value '{value}' in column '{column}' of '{path}' (record {record})", path = path.display())]
    InvalidValue {
        path: PathBuf,
        column: String,
        record: usize,
        value: String,
    },

    #[error("No SAPT rows found for ion '{0}'")]
    EmptyGroup(String),
}

/// One row of the SAPT summary table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaptRecord {
    #[serde(rename = "Frame")]
    pub frame: f64,
    #[serde(rename = "Ion")]
    pub ion: String,
    #[serde(rename = "Electrostatics (kJ/mol)")]
    pub electrostatics: f64,
    #[serde(rename = "Exchange (kJ/mol)")]
    pub exchange: f64,
    #[serde(rename = "Induction (kJ/mol)")]
    pub induction: f64,
    #[serde(rename = "Dispersion (kJ/mol)")]
    pub dispersion: f64,
    #[serde(rename = "Total SAPT (kJ/mol)")]
    pub total: f64,
}

impl SaptRecord {
    /// Frames are stored as floats by some writers; the integer part identifies the snapshot.
    pub fn frame_number(&self) -> i64 {
        self.frame.trunc() as i64
    }

    pub fn components(&self) -> SaptComponents {
        SaptComponents {
            electrostatics: self.electrostatics,
            exchange: self.exchange,
            induction: self.induction,
            dispersion: self.dispersion,
            total: self.total,
        }
    }
}

fn csv_error(path: &Path) -> impl Fn(csv::Error) -> SaptError + '_ {
    move |source| SaptError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

pub fn read_sapt_summary(path: &Path) -> Result<Vec<SaptRecord>, SaptError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error(path))?;

    let mut records = Vec::new();
    for result in reader.deserialize::<SaptRecord>() {
        records.push(result.map_err(csv_error(path))?);
    }
    Ok(records)
}

/// Reads a `frame -> distance` table. When a frame appears twice, the first row wins.
pub fn read_frame_distances(path: &Path, column: &str) -> Result<HashMap<i64, f64>, SaptError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error(path))?;

    let headers = reader.headers().map_err(csv_error(path))?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SaptError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let frame_idx = position("frame")?;
    let distance_idx = position(column)?;

    let parse = |record: &csv::StringRecord, idx: usize, name: &str, number: usize| {
        let raw = record.get(idx).unwrap_or_default();
        raw.parse::<f64>().map_err(|_| SaptError::InvalidValue {
            path: path.to_path_buf(),
            column: name.to_string(),
            record: number,
            value: raw.to_string(),
        })
    };

    let mut distances = HashMap::new();
    for (number, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error(path))?;
        let frame = parse(&record, frame_idx, "frame", number + 1)?.trunc() as i64;
        let distance = parse(&record, distance_idx, column, number + 1)?;
        distances.entry(frame).or_insert(distance);
    }
    Ok(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SUMMARY: &str = "\
Frame,Ion,Electrostatics (kJ/mol),Exchange (kJ/mol),Induction (kJ/mol),Dispersion (kJ/mol),Total SAPT (kJ/mol)
120,Na,-40.5,12.25,-8.0,-3.5,-39.75
60.0,Na,-30.0,10.0,-6.0,-2.0,-28.0
75,Pt,-12.0,4.0,-1.5,-6.5,-16.0
";

    #[test]
    fn summary_rows_are_read_with_their_components() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sapt.csv");
        fs::write(&path, SUMMARY).unwrap();

        let records = read_sapt_summary(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].frame_number(), 60);
        assert_eq!(records[0].ion, "Na");
        let c = records[0].components();
        assert_eq!(c.electrostatics, -40.5);
        assert_eq!(c.total, -39.75);
    }

    #[test]
    fn summary_with_a_malformed_number_reports_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sapt.csv");
        fs::write(&path, SUMMARY.replace("-12.0", "abc")).unwrap();

        let err = read_sapt_summary(&path).unwrap_err();
        assert!(matches!(err, SaptError::Csv { .. }));
        assert!(err.to_string().contains("sapt.csv"));
    }

    #[test]
    fn distances_are_keyed_by_frame_and_first_row_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dist.csv");
        fs::write(
            &path,
            "frame,distance_COM_Na_A,other\n60,4.5,x\n120,7.25,y\n60,9.0,z\n",
        )
        .unwrap();

        let distances = read_frame_distances(&path, "distance_COM_Na_A").unwrap();
        assert_eq!(distances.len(), 2);
        assert_eq!(distances[&60], 4.5);
        assert_eq!(distances[&120], 7.25);
    }

    #[test]
    fn missing_distance_column_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dist.csv");
        fs::write(&path, "frame,distance_COM_Pt_A\n1,2.0\n").unwrap();

        let err = read_frame_distances(&path, "distance_COM_Na_A").unwrap_err();
        assert!(matches!(err, SaptError::MissingColumn { ref column, .. } if column == "distance_COM_Na_A"));
    }

    #[test]
    fn non_numeric_distance_is_reported_with_its_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dist.csv");
        fs::write(&path, "frame,d\n1,2.0\n2,far\n").unwrap();

        let err = read_frame_distances(&path, "d").unwrap_err();
        assert!(matches!(
            err,
            SaptError::InvalidValue { record: 2, ref value, .. } if value == "far"
        ));
    }
}
