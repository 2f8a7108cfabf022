use super::NumericsError;

/// Uniform moving average in "valid" mode.
///
/// Returns `values.len() - window + 1` points where `out[i]` is the mean of
/// `values[i..i + window]`. Edges are dropped, never padded. The first point is the
/// exact mean of the first window; later points are maintained with a running sum.
///
/// # Errors
///
/// Returns [`NumericsError::InvalidWindow`] if `window` is zero or longer than the series.
pub fn moving_average(values: &[f64], window: usize) -> Result<Vec<f64>, NumericsError> {
    if window == 0 || window > values.len() {
        return Err(NumericsError::InvalidWindow {
            window,
            len: values.len(),
        });
    }

    let width = window as f64;
    let mut out = Vec::with_capacity(values.len() - window + 1);
    let mut sum: f64 = values[..window].iter().sum();
    out.push(sum / width);

    for (leaving, entering) in values.iter().zip(&values[window..]) {
        sum += entering - leaving;
        out.push(sum / width);
    }
    Ok(out)
}
