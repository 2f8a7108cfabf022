use crate::core::io::export;
use crate::core::io::latex::render_sapt_table;
use crate::core::io::sapt_csv::{SaptError, SaptRecord, read_frame_distances, read_sapt_summary};
use crate::core::models::sapt::{Conformation, IonSummary, SaptComponents, SaptTerm};
use crate::engine::config::{SaptConfig, SaptIonGroup};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// File name of the typeset table.
pub const LATEX_TABLE_FILE: &str = "SAPT_components_conformations.tex";
/// File name of the plain CSV table.
pub const CSV_TABLE_FILE: &str = "SAPT_components_conformations.csv";

const RANGE_PADDING: f64 = 1.1;

#[derive(Debug, Clone)]
pub struct SaptReport {
    /// One summary per configured ion, in configuration order.
    pub groups: Vec<IonSummary>,
    /// Rendered LaTeX table.
    pub table: String,
    /// Shared energy axis for the bar panels, `(min, max)` in kJ/mol.
    pub y_range: (f64, f64),
}

impl SaptReport {
    pub fn write_tables(&self, dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
        let tex = dir.join(LATEX_TABLE_FILE);
        std::fs::write(&tex, &self.table).map_err(|source| EngineError::Io {
            path: tex.clone(),
            source,
        })?;

        let csv = dir.join(CSV_TABLE_FILE);
        export::write_sapt_csv(&csv, &self.groups)?;
        Ok(vec![tex, csv])
    }
}

/// Builds one ion's table rows: sorted by frame, labelled `C1..Cn`, with a column average.
pub fn summarize_group(
    records: &[SaptRecord],
    group: &SaptIonGroup,
) -> Result<IonSummary, EngineError> {
    let distances = group
        .distances
        .as_ref()
        .map(|table| read_frame_distances(&table.path, &table.column))
        .transpose()?;

    let mut selected: Vec<&SaptRecord> = records.iter().filter(|r| r.ion == group.ion).collect();
    if selected.is_empty() {
        return Err(SaptError::EmptyGroup(group.ion.clone()).into());
    }
    selected.sort_by_key(|r| r.frame_number());

    let conformations: Vec<Conformation> = selected
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let frame = record.frame_number();
            let com_distance = distances.as_ref().and_then(|d| d.get(&frame).copied());
            if distances.is_some() && com_distance.is_none() {
                warn!("No COM distance for {} frame {}", group.ion, frame);
            }
            Conformation {
                frame,
                ion: group.ion.clone(),
                label: format!("C{}", i + 1),
                com_distance,
                energies: record.components(),
            }
        })
        .collect();

    let energies: Vec<SaptComponents> = conformations.iter().map(|c| c.energies).collect();
    let average = SaptComponents::mean(&energies)
        .ok_or_else(|| EngineError::Internal(format!("no rows to average for {}", group.ion)))?;

    Ok(IonSummary {
        ion: group.ion.clone(),
        table_label: group.table_label.clone(),
        plot_label: group.plot_label.clone(),
        conformations,
        average,
    })
}

/// Common bar-chart range over the decomposition terms of every conformation.
///
/// The range always includes zero and is padded by 10% on each side.
pub fn shared_range(groups: &[IonSummary]) -> (f64, f64) {
    let values = groups
        .iter()
        .flat_map(|g| &g.conformations)
        .flat_map(|c| SaptTerm::DECOMPOSITION.map(|term| c.energies.get(term)));

    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (min * RANGE_PADDING, max * RANGE_PADDING)
}

#[instrument(skip_all, name = "sapt_workflow")]
pub fn run(config: &SaptConfig, reporter: &ProgressReporter) -> Result<SaptReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "SAPT summary",
    });
    let records = read_sapt_summary(&config.summary_csv)?;
    info!(
        "Read {} SAPT rows from {:?}",
        records.len(),
        config.summary_csv
    );

    reporter.report(Progress::TaskStart {
        total_steps: config.groups.len() as u64,
    });
    let mut groups = Vec::with_capacity(config.groups.len());
    for group in &config.groups {
        let summary = summarize_group(&records, group)?;
        info!(
            "{}: {} conformations, mean total {:.2} kJ/mol",
            summary.ion,
            summary.conformations.len(),
            summary.average.total
        );
        let unmatched = summary
            .conformations
            .iter()
            .filter(|c| c.com_distance.is_none())
            .count();
        if group.distances.is_some() && unmatched > 0 {
            reporter.report(Progress::Message(format!(
                "{}: {} frame(s) without a COM distance",
                summary.ion, unmatched
            )));
        }
        groups.push(summary);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    let table = render_sapt_table(&groups, &config.caption, &config.table_label);
    let y_range = shared_range(&groups);
    reporter.report(Progress::PhaseFinish);

    Ok(SaptReport {
        groups,
        table,
        y_range,
    })
}
