use crate::core::models::profile::{EnsembleProfile, Series};
use crate::core::models::sapt::IonSummary;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write '{path}': {source}", path = path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>, ExportError> {
    csv::Writer::from_path(path).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

fn wrap(path: &Path) -> impl Fn(csv::Error) -> ExportError + '_ {
    move |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn flush(mut wtr: csv::Writer<std::fs::File>, path: &Path) -> Result<(), ExportError> {
    wtr.flush().map_err(|e| ExportError::Csv {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Writes `distance_nm, mean_<quantity>, std_<quantity>` for every sample of the profile.
pub fn write_band_csv(
    path: &Path,
    profile: &EnsembleProfile,
    quantity: &str,
) -> Result<(), ExportError> {
    let mut wtr = writer(path)?;
    wtr.write_record([
        "distance_nm".to_string(),
        format!("mean_{quantity}"),
        format!("std_{quantity}"),
    ])
    .map_err(wrap(path))?;

    for (x, (mean, std)) in profile.x.iter().zip(profile.mean.iter().zip(&profile.std_dev)) {
        wtr.serialize((x, mean, std)).map_err(wrap(path))?;
    }
    flush(wtr, path)
}

pub fn write_series_csv(path: &Path, series: &Series, headers: [&str; 2]) -> Result<(), ExportError> {
    let mut wtr = writer(path)?;
    wtr.write_record(headers).map_err(wrap(path))?;
    for point in series.points() {
        wtr.serialize(point).map_err(wrap(path))?;
    }
    flush(wtr, path)
}

/// Per-trajectory summary line.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryRow {
    pub index: u64,
    pub samples: usize,
    pub max_work: f64,
    pub force_file: String,
    pub distance_file: String,
}

pub fn write_trajectory_table(path: &Path, rows: &[TrajectoryRow]) -> Result<(), ExportError> {
    let mut wtr = writer(path)?;
    for row in rows {
        wtr.serialize(row).map_err(wrap(path))?;
    }
    flush(wtr, path)
}

#[derive(Serialize)]
struct SaptRow<'a> {
    ion: &'a str,
    conformation: &'a str,
    frame: Option<i64>,
    com_distance: Option<f64>,
    electrostatics: f64,
    exchange: f64,
    induction: f64,
    dispersion: f64,
    total: f64,
}

/// Plain-CSV twin of the LaTeX table; `Average` rows have no frame.
pub fn write_sapt_csv(path: &Path, groups: &[IonSummary]) -> Result<(), ExportError> {
    let mut wtr = writer(path)?;
    for group in groups {
        let rows = group
            .conformations
            .iter()
            .map(|c| (c.label.as_str(), Some(c.frame), c.com_distance, &c.energies))
            .chain(std::iter::once(("Average", None, None, &group.average)));

        for (conformation, frame, com_distance, e) in rows {
            wtr.serialize(SaptRow {
                ion: &group.ion,
                conformation,
                frame,
                com_distance,
                electrostatics: e.electrostatics,
                exchange: e.exchange,
                induction: e.induction,
                dispersion: e.dispersion,
                total: e.total,
            })
            .map_err(wrap(path))?;
        }
    }
    flush(wtr, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::sapt::{Conformation, SaptComponents};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn band_csv_has_one_row_per_sample() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("water_force.csv");
        let profile = EnsembleProfile {
            members: Vec::new(),
            x: vec![0.5, 1.5],
            mean: vec![10.0, 12.5],
            std_dev: vec![0.0, 1.25],
        };
        write_band_csv(&path, &profile, "force").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "distance_nm,mean_force,std_force\n0.5,10.0,0.0\n1.5,12.5,1.25\n"
        );
    }

    #[test]
    fn series_csv_uses_the_given_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fe.csv");
        let series = Series::new(vec![0.0, 1.0], vec![0.0, -3.5]).unwrap();
        write_series_csv(&path, &series, ["distance_nm", "free_energy_kj_mol"]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "distance_nm,free_energy_kj_mol\n0.0,0.0\n1.0,-3.5\n");
    }

    #[test]
    fn trajectory_table_has_a_header_from_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("traj.csv");
        let rows = vec![TrajectoryRow {
            index: 3,
            samples: 100,
            max_work: 42.5,
            force_file: "slow_pullf3.xvg".into(),
            distance_file: "slow_pullx3.xvg".into(),
        }];
        write_trajectory_table(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("index,samples,max_work,force_file,distance_file")
        );
        assert_eq!(lines.next(), Some("3,100,42.5,slow_pullf3.xvg,slow_pullx3.xvg"));
    }

    #[test]
    fn sapt_csv_appends_an_average_row_per_ion() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sapt.csv");
        let energies = SaptComponents {
            electrostatics: -1.0,
            exchange: 2.0,
            induction: -3.0,
            dispersion: -4.0,
            total: -6.0,
        };
        let group = IonSummary {
            ion: "K".into(),
            table_label: "K$^+$".into(),
            plot_label: "K⁺".into(),
            conformations: vec![Conformation {
                frame: 35,
                ion: "K".into(),
                label: "C1".into(),
                com_distance: None,
                energies,
            }],
            average: energies,
        };
        write_sapt_csv(&path, &[group]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "ion,conformation,frame,com_distance,electrostatics,exchange,induction,dispersion,total"
        );
        assert_eq!(lines[1], "K,C1,35,,-1.0,2.0,-3.0,-4.0,-6.0");
        assert_eq!(lines[2], "K,Average,,,-1.0,2.0,-3.0,-4.0,-6.0");
    }
}
