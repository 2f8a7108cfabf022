use super::{NumericsError, ensure_same_length};

/// Reorders paired `(distance, force)` samples by ascending distance.
///
/// The sort is stable, so samples recorded at the same extension keep the order in
/// which they were written. Pulling trajectories fluctuate thermally around the
/// intended direction, which makes the raw extension series non-monotonic.
///
/// # Errors
///
/// Returns [`NumericsError::LengthMismatch`] if the two sequences differ in length.
pub fn order_by_distance(
    distance: &[f64],
    force: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), NumericsError> {
    ensure_same_length(distance, force)?;

    let mut order: Vec<usize> = (0..distance.len()).collect();
    // Adding 0.0 folds -0.0 into 0.0 so signed zeros tie.
    order.sort_by(|&a, &b| (distance[a] + 0.0).total_cmp(&(distance[b] + 0.0)));

    let sorted_distance = order.iter().map(|&i| distance[i]).collect();
    let sorted_force = order.iter().map(|&i| force[i]).collect();
    Ok((sorted_distance, sorted_force))
}

pub fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noisy_extension(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let distance = (0..n)
            .map(|i| i as f64 * 0.01 + rng.random_range(-0.05..0.05))
            .collect();
        let force = (0..n).map(|_| rng.random_range(-200.0..600.0)).collect();
        (distance, force)
    }

    #[test]
    fn output_distance_is_non_decreasing() {
        let (distance, force) = noisy_extension(500, 11);
        assert!(!is_non_decreasing(&distance));

        let (sorted_distance, sorted_force) = order_by_distance(&distance, &force).unwrap();
        assert!(is_non_decreasing(&sorted_distance));
        assert_eq!(sorted_force.len(), force.len());
    }

    #[test]
    fn forces_follow_their_distances() {
        let distance = [0.3, 0.1, 0.2];
        let force = [30.0, 10.0, 20.0];
        let (d, f) = order_by_distance(&distance, &force).unwrap();
        assert_eq!(d, vec![0.1, 0.2, 0.3]);
        assert_eq!(f, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn ties_keep_their_original_relative_order() {
        let distance = [1.0, 0.5, 1.0, 0.5, 1.0];
        let force = [1.0, 2.0, 3.0, 4.0, 5.0];
        let (d, f) = order_by_distance(&distance, &force).unwrap();
        assert_eq!(d, vec![0.5, 0.5, 1.0, 1.0, 1.0]);
        assert_eq!(f, vec![2.0, 4.0, 1.0, 3.0, 5.0]);
    }

    #[test]
    fn signed_zeros_are_treated_as_ties() {
        let distance = [0.0, -0.0, 1.0];
        let force = [1.0, 2.0, 3.0];
        let (d, f) = order_by_distance(&distance, &force).unwrap();
        assert_eq!(f, vec![1.0, 2.0, 3.0]);
        assert!(d[0].is_sign_positive() && d[1].is_sign_negative());
    }

    #[test]
    fn ordering_is_idempotent() {
        let (distance, force) = noisy_extension(300, 5);
        let once = order_by_distance(&distance, &force).unwrap();
        let twice = order_by_distance(&once.0, &once.1).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_is_accepted() {
        let (d, f) = order_by_distance(&[], &[]).unwrap();
        assert!(d.is_empty() && f.is_empty());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let result = order_by_distance(&[0.0, 1.0], &[1.0]);
        assert_eq!(
            result,
            Err(NumericsError::LengthMismatch { left: 2, right: 1 })
        );
    }
}
