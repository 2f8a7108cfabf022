use super::{draw_to, panel_letter};
use crate::error::Result;
use plotters::prelude::*;
use smdpmf::core::models::sapt::SaptTerm;
use smdpmf::workflows::sapt::SaptReport;
use std::path::Path;

pub const BARS_FIGURE: &str = "SAPT_components_bars.svg";

const BAR_WIDTH: f64 = 0.18;
const BAR_ALPHA: f64 = 0.85;
const PANEL_SIZE: (u32, u32) = (520, 480);

fn term_color(term: SaptTerm) -> RGBColor {
    match term {
        SaptTerm::Electrostatics => RGBColor(75, 0, 130),
        SaptTerm::Exchange => RGBColor(147, 112, 219),
        SaptTerm::Induction => RGBColor(218, 112, 214),
        SaptTerm::Dispersion => RGBColor(199, 21, 133),
        SaptTerm::Total => BLACK,
    }
}

/// Horizontal offset of a term's bar from its conformation's tick.
fn bar_offset(slot: usize) -> f64 {
    let centre = (SaptTerm::DECOMPOSITION.len() as f64 - 1.0) / 2.0;
    (slot as f64 - centre) * BAR_WIDTH
}

/// Grouped component bars per conformation, one panel per ion on a shared energy axis.
pub fn write_component_bars(path: &Path, report: &SaptReport) -> Result<()> {
    draw_to(path, |p| {
        let n_panels = report.groups.len().max(1);
        let root = SVGBackend::new(p, (PANEL_SIZE.0 * n_panels as u32, PANEL_SIZE.1))
            .into_drawing_area();
        root.fill(&WHITE)?;
        let areas = root.split_evenly((1, n_panels));
        let (y_min, y_max) = report.y_range;

        for (i, (group, area)) in report.groups.iter().zip(areas.iter()).enumerate() {
            let labels: Vec<String> = group
                .conformations
                .iter()
                .map(|c| c.label.clone())
                .collect();
            let n = labels.len().max(1);
            let x_range = -0.5..(n as f64 - 0.5);

            let mut chart = ChartBuilder::on(area)
                .caption(
                    format!("{}  {}", panel_letter(i), group.plot_label),
                    ("sans-serif", 20),
                )
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(x_range, y_min..y_max)?;

            let tick_label = |x: &f64| {
                let nearest = x.round();
                if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
                    return String::new();
                }
                labels.get(nearest as usize).cloned().unwrap_or_default()
            };
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n)
                .x_label_formatter(&tick_label)
                .x_desc("Conformations")
                .y_desc("SAPT Energy (kJ/mol)")
                .draw()?;

            chart.draw_series(std::iter::once(PathElement::new(
                vec![(-0.5, 0.0), (n as f64 - 0.5, 0.0)],
                BLACK,
            )))?;

            for (slot, term) in SaptTerm::DECOMPOSITION.into_iter().enumerate() {
                let color = term_color(term);
                let offset = bar_offset(slot);
                let bars = group.conformations.iter().enumerate().map(|(k, c)| {
                    let left = k as f64 + offset - BAR_WIDTH / 2.0;
                    Rectangle::new(
                        [(left, 0.0), (left + BAR_WIDTH, c.energies.get(term))],
                        color.mix(BAR_ALPHA).filled(),
                    )
                });
                let series = chart.draw_series(bars)?;
                if i == 0 {
                    series.label(term.name()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.mix(BAR_ALPHA).filled())
                    });
                }
            }

            if i == 0 {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::LowerLeft)
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()?;
            }
        }

        root.present()?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use smdpmf::core::models::sapt::{Conformation, IonSummary, SaptComponents};
    use smdpmf::workflows::sapt::shared_range;
    use tempfile::tempdir;

    fn summary(ion: &str, plot_label: &str, energies: &[f64]) -> IonSummary {
        let conformations: Vec<Conformation> = energies
            .iter()
            .enumerate()
            .map(|(i, &e)| Conformation {
                frame: (i as i64 + 1) * 100,
                ion: ion.to_string(),
                label: format!("C{}", i + 1),
                com_distance: None,
                energies: SaptComponents {
                    electrostatics: -e,
                    exchange: e / 2.0,
                    induction: -e / 4.0,
                    dispersion: -e / 8.0,
                    total: -7.0 * e / 8.0,
                },
            })
            .collect();
        let average =
            SaptComponents::mean(&conformations.iter().map(|c| c.energies).collect::<Vec<_>>())
                .unwrap();
        IonSummary {
            ion: ion.to_string(),
            table_label: ion.to_string(),
            plot_label: plot_label.to_string(),
            conformations,
            average,
        }
    }

    #[test]
    fn offsets_are_symmetric_about_the_tick() {
        assert!((bar_offset(0) + bar_offset(3)).abs() < 1e-12);
        assert!((bar_offset(1) + bar_offset(2)).abs() < 1e-12);
        assert!((bar_offset(1) - bar_offset(0) - BAR_WIDTH).abs() < 1e-12);
    }

    #[test]
    fn bar_figure_has_one_panel_per_ion() {
        let groups = vec![
            summary("Na", "Na⁺", &[100.0, 120.0]),
            summary("K", "K⁺", &[80.0, 90.0, 95.0]),
        ];
        let report = SaptReport {
            y_range: shared_range(&groups),
            table: String::new(),
            groups,
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join(BARS_FIGURE);

        write_component_bars(&path, &report).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("A  Na⁺"));
        assert!(svg.contains("B  K⁺"));
        assert!(svg.contains("Electrostatics"));
    }
}
