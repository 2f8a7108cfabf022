use super::{DrawResult, draw_to, padded_range, panel_letter, rgb, thin};
use crate::error::Result;
use plotters::prelude::*;
use smdpmf::core::models::profile::{EnsembleProfile, Series};
use smdpmf::workflows::pulling::ConditionReport;
use std::path::Path;

pub const FORCE_FIGURE: &str = "all_force.svg";
pub const WORK_FIGURE: &str = "all_work.svg";
pub const FREE_ENERGY_FIGURE: &str = "free_energy.svg";

const PANEL_SIZE: (u32, u32) = (1000, 420);
const MEMBER_ALPHA: f64 = 0.25;
const BAND_ALPHA: f64 = 0.2;

/// One panel of trajectory curves with their ensemble mean.
struct EnsemblePanel<'a> {
    title: String,
    color: RGBColor,
    members: Vec<&'a Series>,
    profile: &'a EnsembleProfile,
    show_band: bool,
}

fn draw_ensemble_panels(
    path: &Path,
    panels: &[EnsemblePanel],
    x_desc: &str,
    y_desc: &str,
) -> DrawResult {
    let height = PANEL_SIZE.1 * panels.len().max(1) as u32;
    let root = SVGBackend::new(path, (PANEL_SIZE.0, height)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((panels.len().max(1), 1));

    for (i, (panel, area)) in panels.iter().zip(areas.iter()).enumerate() {
        let x_range = padded_range(
            panel
                .members
                .iter()
                .flat_map(|s| s.x.iter().copied())
                .chain(panel.profile.x.iter().copied()),
        );
        let band_values = panel
            .profile
            .band()
            .flat_map(|(_, lo, hi)| [lo, hi])
            .filter(|_| panel.show_band);
        let y_range = padded_range(
            panel
                .members
                .iter()
                .flat_map(|s| s.y.iter().copied())
                .chain(panel.profile.mean.iter().copied())
                .chain(band_values),
        );

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("{}  {}", panel_letter(i), panel.title),
                ("sans-serif", 20),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()?;

        for member in &panel.members {
            chart.draw_series(LineSeries::new(
                thin(member.points()),
                panel.color.mix(MEMBER_ALPHA),
            ))?;
        }

        if panel.show_band && !panel.profile.is_empty() {
            let band: Vec<(f64, f64, f64)> = thin(panel.profile.band());
            let outline: Vec<(f64, f64)> = band
                .iter()
                .map(|&(x, _, hi)| (x, hi))
                .chain(band.iter().rev().map(|&(x, lo, _)| (x, lo)))
                .collect();
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                panel.color.mix(BAND_ALPHA).filled(),
            )))?;
        }

        let color = panel.color;
        chart
            .draw_series(LineSeries::new(
                thin(panel.profile.mean_series().points()),
                color.stroke_width(3),
            ))?
            .label(format!("mean of {} trajectories", panel.profile.n_members()))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Smoothed force against distance, one panel per condition, with a ±σ band.
pub fn write_force_figure(path: &Path, reports: &[&ConditionReport]) -> Result<()> {
    let panels: Vec<EnsemblePanel> = reports
        .iter()
        .map(|report| EnsemblePanel {
            title: report.condition.label.clone(),
            color: rgb(report.condition.color),
            members: report.force.members.iter().collect(),
            profile: &report.force,
            show_band: true,
        })
        .collect();
    draw_to(path, |p| {
        draw_ensemble_panels(p, &panels, "Distance (nm)", "Force (kJ/mol/nm)")
    })
}

/// Smoothed cumulative work against distance, one panel per condition.
pub fn write_work_figure(path: &Path, reports: &[&ConditionReport]) -> Result<()> {
    let panels: Vec<EnsemblePanel> = reports
        .iter()
        .map(|report| EnsemblePanel {
            title: report.condition.label.clone(),
            color: rgb(report.condition.color),
            members: report.work.trajectories.iter().map(|t| &t.smoothed).collect(),
            profile: &report.work.profile,
            show_band: false,
        })
        .collect();
    draw_to(path, |p| {
        draw_ensemble_panels(p, &panels, "Distance (nm)", "Work (kJ/mol)")
    })
}

/// Free-energy profiles of all conditions on shared axes.
pub fn write_free_energy_figure(path: &Path, reports: &[&ConditionReport]) -> Result<()> {
    draw_to(path, |p| {
        let root = SVGBackend::new(p, PANEL_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let curves: Vec<&Series> = reports.iter().map(|r| r.free_energy.display()).collect();
        let x_range = padded_range(curves.iter().flat_map(|c| c.x.iter().copied()));
        let y_range = padded_range(curves.iter().flat_map(|c| c.y.iter().copied()));

        let mut chart = ChartBuilder::on(&root)
            .caption("Free energy (Jarzynski)", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("Distance (nm)")
            .y_desc("ΔG (kJ/mol)")
            .draw()?;

        for (report, curve) in reports.iter().zip(&curves) {
            let color = rgb(report.condition.color);
            chart
                .draw_series(LineSeries::new(thin(curve.points()), color.stroke_width(2)))?
                .label(format!(
                    "{} (n = {})",
                    report.condition.label, report.free_energy.n_trajectories
                ))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    })
}
