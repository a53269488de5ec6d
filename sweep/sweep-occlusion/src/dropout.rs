//! Random point dropout.
//!
//! Dropout removes `floor(N * percentage / 100)` points, chosen uniformly
//! without replacement. A computed count of zero is a no-op, not an error.
//! All draws come from the caller-supplied RNG, so a fixed seed fixes the
//! dropped index set.

use rand::Rng;
use tracing::debug;

use sweep_types::{PointCloud, SweepError, SweepResult};

/// Number of points to drop from `total` at the given percentage.
///
/// Truncates toward zero, matching `floor` for the valid range.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn drop_count(total: usize, percentage: f64) -> usize {
    ((total as f64) * (percentage / 100.0)).floor() as usize
}

fn check_percentage(percentage: f64) -> SweepResult<()> {
    if (0.0..=100.0).contains(&percentage) {
        Ok(())
    } else {
        Err(SweepError::invalid_argument(format!(
            "drop percentage must be in [0, 100], got {percentage}"
        )))
    }
}

/// Drops a percentage of all points, uniformly without replacement.
///
/// # Errors
///
/// Returns [`SweepError::InvalidArgument`] if `percentage` is outside
/// `[0, 100]`.
pub fn drop_random<R: Rng>(
    cloud: &PointCloud,
    percentage: f64,
    rng: &mut R,
) -> SweepResult<PointCloud> {
    check_percentage(percentage)?;
    let total = cloud.len();
    let count = drop_count(total, percentage);
    if count == 0 {
        return Ok(cloud.clone());
    }
    let drop: Vec<usize> = rand::seq::index::sample(rng, total, count).into_vec();
    debug!(dropped = count, percentage, total, "random dropout");
    Ok(cloud.remove_columns_at(&drop))
}

/// Drops a percentage of the points named by `members`.
///
/// The drop count is computed from the member set's size, and the dropped
/// subset is drawn from the members only; every other column survives.
///
/// # Errors
///
/// Returns [`SweepError::InvalidArgument`] if `percentage` is outside
/// `[0, 100]`.
pub fn drop_within<R: Rng>(
    cloud: &PointCloud,
    members: &[usize],
    percentage: f64,
    rng: &mut R,
) -> SweepResult<PointCloud> {
    check_percentage(percentage)?;
    let count = drop_count(members.len(), percentage);
    if count == 0 {
        return Ok(cloud.clone());
    }
    let drop: Vec<usize> = rand::seq::index::sample(rng, members.len(), count)
        .into_iter()
        .map(|i| members[i])
        .collect();
    Ok(cloud.remove_columns_at(&drop))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_cloud(n: usize) -> PointCloud {
        let flat: Vec<f64> = (0..n).flat_map(|i| [i as f64, 0.0, 0.0]).collect();
        PointCloud::from_matrix(DMatrix::from_column_slice(3, n, &flat))
    }

    #[test]
    fn count_uses_floor() {
        assert_eq!(drop_count(10, 25.0), 2);
        assert_eq!(drop_count(3, 50.0), 1);
        assert_eq!(drop_count(99, 100.0), 99);
        assert_eq!(drop_count(0, 60.0), 0);
        assert_eq!(drop_count(7, 0.0), 0);
    }

    #[test]
    fn dropout_removes_exact_count() {
        let cloud = line_cloud(100);
        let mut rng = StdRng::seed_from_u64(42);
        let result = drop_random(&cloud, 60.0, &mut rng).unwrap();
        assert_eq!(result.len(), 40);
    }

    #[test]
    fn zero_percentage_is_noop() {
        let cloud = line_cloud(10);
        let mut rng = StdRng::seed_from_u64(42);
        let result = drop_random(&cloud, 0.0, &mut rng).unwrap();
        assert_eq!(result, cloud);
    }

    #[test]
    fn small_cloud_zero_count_is_noop() {
        // floor(3 * 20 / 100) == 0
        let cloud = line_cloud(3);
        let mut rng = StdRng::seed_from_u64(42);
        let result = drop_random(&cloud, 20.0, &mut rng).unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn out_of_range_percentage_rejected() {
        let cloud = line_cloud(5);
        let mut rng = StdRng::seed_from_u64(42);
        assert!(drop_random(&cloud, -1.0, &mut rng).is_err());
        assert!(drop_random(&cloud, 100.5, &mut rng).is_err());
    }

    #[test]
    fn same_seed_same_result() {
        let cloud = line_cloud(50);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = drop_random(&cloud, 40.0, &mut rng_a).unwrap();
        let b = drop_random(&cloud, 40.0, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let cloud = line_cloud(200);
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let a = drop_random(&cloud, 50.0, &mut rng_a).unwrap();
        let b = drop_random(&cloud, 50.0, &mut rng_b).unwrap();
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
    }

    #[test]
    fn drop_within_only_touches_members() {
        let cloud = line_cloud(10);
        let members = [0, 1, 2, 3];
        let mut rng = StdRng::seed_from_u64(42);
        let result = drop_within(&cloud, &members, 50.0, &mut rng).unwrap();
        assert_eq!(result.len(), 8);
        // Columns 4..10 all survive.
        for x in 4..10 {
            let found = (0..result.len()).any(|j| result.xy(j).0 == f64::from(x));
            assert!(found, "non-member column {x} was dropped");
        }
    }
}
