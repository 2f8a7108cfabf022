use super::{NumericsError, ensure_same_length};
use itertools::Itertools;

/// Cumulative work along the pulling coordinate by the trapezoidal rule.
///
/// `work[0] = 0` and each further point adds
/// `(distance[i] - distance[i-1]) * (force[i-1] + force[i]) / 2`. The spacing is taken
/// from every consecutive pair, since distance grids are irregular after sorting.
///
/// # Errors
///
/// Returns [`NumericsError::LengthMismatch`] if the two sequences differ in length.
pub fn cumulative_trapezoid(distance: &[f64], force: &[f64]) -> Result<Vec<f64>, NumericsError> {
    ensure_same_length(distance, force)?;

    let mut work = Vec::with_capacity(distance.len());
    if distance.is_empty() {
        return Ok(work);
    }

    let mut accumulated = 0.0;
    work.push(accumulated);
    for ((d0, f0), (d1, f1)) in distance.iter().zip(force).tuple_windows() {
        accumulated += (d1 - d0) * (f0 + f1) / 2.0;
        work.push(accumulated);
    }
    Ok(work)
}
