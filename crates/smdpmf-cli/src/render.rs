pub mod pulling;
pub mod sapt;

use crate::error::{CliError, Result};
use plotters::style::RGBColor;
use smdpmf::core::models::color::Rgb;
use std::error::Error;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// Upper bound on points drawn per line; long pulls are decimated before plotting.
const MAX_PLOTTED_POINTS: usize = 2000;

pub(crate) type DrawResult = std::result::Result<(), Box<dyn Error>>;

pub(crate) fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

pub(crate) fn panel_letter(i: usize) -> char {
    (b'A' + (i % 26) as u8) as char
}

/// Range spanning every finite value, widened by 5% on both sides.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < 1e-12 {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = 0.05 * (max - min);
    (min - pad)..(max + pad)
}

/// Keeps every n-th point so at most about [`MAX_PLOTTED_POINTS`] remain, always keeping the last.
pub(crate) fn thin<T: Copy>(points: impl IntoIterator<Item = T>) -> Vec<T> {
    let all: Vec<T> = points.into_iter().collect();
    if all.len() <= MAX_PLOTTED_POINTS {
        return all;
    }
    let stride = all.len().div_ceil(MAX_PLOTTED_POINTS);
    let mut kept: Vec<T> = all.iter().step_by(stride).copied().collect();
    if (all.len() - 1) % stride != 0 {
        kept.extend(all.last().copied());
    }
    kept
}

/// Runs a drawing routine and attaches the target path to any backend error.
pub(crate) fn draw_to(path: &Path, draw: impl FnOnce(&Path) -> DrawResult) -> Result<()> {
    debug!("Rendering {:?}", path);
    draw(path).map_err(|e| CliError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_handles_flat_and_empty_input() {
        assert_eq!(padded_range(Vec::new()), 0.0..1.0);
        assert_eq!(padded_range(vec![f64::NAN]), 0.0..1.0);
        assert_eq!(padded_range(vec![2.0, 2.0]), 1.0..3.0);

        let range = padded_range(vec![0.0, 10.0, f64::INFINITY]);
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn thin_caps_point_count_and_keeps_the_end() {
        let short: Vec<usize> = thin(0..10usize);
        assert_eq!(short, (0..10).collect::<Vec<_>>());

        let long: Vec<usize> = thin(0..79_000usize);
        assert!(long.len() <= MAX_PLOTTED_POINTS + 1);
        assert_eq!(long.first(), Some(&0));
        assert_eq!(long.last(), Some(&78_999));
    }

    #[test]
    fn panels_are_lettered_from_a() {
        assert_eq!(panel_letter(0), 'A');
        assert_eq!(panel_letter(2), 'C');
    }
}
