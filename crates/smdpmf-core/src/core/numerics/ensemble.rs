use super::NumericsError;
use nalgebra::DMatrix;

/// Length of the shortest series, i.e. the number of samples every member can supply.
pub fn common_length<S: AsRef<[f64]>>(series: &[S]) -> Option<usize> {
    series.iter().map(|s| s.as_ref().len()).min()
}

/// A trajectory-by-sample matrix.
///
/// Rows are trajectories, columns are sample indices along the pulling coordinate.
/// Members are cut to the shortest common length on construction, so every column
/// holds exactly one value per trajectory and elementwise statistics never pad.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryEnsemble {
    values: DMatrix<f64>,
}

impl TrajectoryEnsemble {
    pub fn from_truncated<S: AsRef<[f64]>>(series: &[S]) -> Result<Self, NumericsError> {
        let len = common_length(series).ok_or(NumericsError::EmptyEnsemble)?;
        let values = DMatrix::from_fn(series.len(), len, |t, i| series[t].as_ref()[i]);
        Ok(Self { values })
    }

    pub fn n_trajectories(&self) -> usize {
        self.values.nrows()
    }

    pub fn len(&self) -> usize {
        self.values.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.values.ncols() == 0
    }

    pub fn member(&self, trajectory: usize) -> Vec<f64> {
        self.values.row(trajectory).iter().copied().collect()
    }

    pub fn members(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.n_trajectories()).map(|t| self.member(t))
    }

    /// All trajectories' values at one sample index.
    pub fn sample(&self, index: usize) -> Vec<f64> {
        self.values.column(index).iter().copied().collect()
    }

    pub fn mean(&self) -> Vec<f64> {
        self.values.column_iter().map(|column| column.mean()).collect()
    }

    /// Population standard deviation across trajectories at every sample index.
    pub fn std_dev(&self) -> Vec<f64> {
        let n = self.n_trajectories() as f64;
        self.values
            .column_iter()
            .map(|column| {
                let mean = column.mean();
                let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                variance.sqrt()
            })
            .collect()
    }
}
