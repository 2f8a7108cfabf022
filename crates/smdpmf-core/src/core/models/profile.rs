use crate::core::numerics::{NumericsError, ensure_same_length};

/// A sampled curve `y(x)` with one `y` per `x`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, NumericsError> {
        ensure_same_length(&x, &y)?;
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn max_y(&self) -> Option<f64> {
        self.y.iter().copied().reduce(f64::max)
    }

    pub fn last_y(&self) -> Option<f64> {
        self.y.last().copied()
    }
}

/// Mean and spread of an ensemble of curves along a shared sample axis.
///
/// `members` are the per-trajectory curves already cut to the common length, so
/// `x`, `mean`, `std_dev` and every member have the same number of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnsembleProfile {
    pub members: Vec<Series>,
    pub x: Vec<f64>,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
}

impl EnsembleProfile {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn n_members(&self) -> usize {
        self.members.len()
    }

    pub fn mean_series(&self) -> Series {
        Series {
            x: self.x.clone(),
            y: self.mean.clone(),
        }
    }

    /// `(x, mean - σ, mean + σ)` for every sample.
    pub fn band(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.mean)
            .zip(&self.std_dev)
            .map(|((&x, &m), &s)| (x, m - s, m + s))
    }
}

/// Cumulative work of one trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkProfile {
    pub index: u64,
    /// Work on the sorted, unsmoothed distance grid; `work.y[0] == 0`.
    pub work: Series,
    /// Moving average of `work` for display.
    pub smoothed: Series,
    /// Largest value of the smoothed work curve.
    pub max_work: f64,
}

/// Work of every trajectory in a condition and their ensemble statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkAnalysis {
    pub trajectories: Vec<WorkProfile>,
    /// Statistics over the display-smoothed work curves.
    pub profile: EnsembleProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeEnergyCurve {
    pub condition: String,
    pub n_trajectories: usize,
    /// ΔG on the mean distance axis, one point per common sample.
    pub raw: Series,
    /// Post-smoothed ΔG when a free-energy window is configured.
    pub smoothed: Option<Series>,
}

impl FreeEnergyCurve {
    pub fn display(&self) -> &Series {
        self.smoothed.as_ref().unwrap_or(&self.raw)
    }
}
