//! Gaussian position noise.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use sweep_types::{PointCloud, SweepError, SweepResult};

/// Adds independent `N(0, std^2)` noise to the position rows of every point.
///
/// Only the first three rows (x, y, z) are perturbed; all other channels
/// pass through untouched. A non-positive `std` is a defined no-op.
///
/// Draw order is fixed: row by row, then column by column, so a fixed seed
/// fixes the perturbation exactly.
///
/// # Errors
///
/// Returns [`SweepError::InvalidArgument`] if `std` is not finite.
pub fn add_position_noise<R: Rng>(
    cloud: &PointCloud,
    std: f64,
    rng: &mut R,
) -> SweepResult<PointCloud> {
    if !std.is_finite() {
        return Err(SweepError::invalid_argument(format!(
            "noise std must be finite, got {std}"
        )));
    }
    if std <= 0.0 {
        return Ok(cloud.clone());
    }
    let normal = Normal::new(0.0, std)
        .map_err(|e| SweepError::invalid_argument(format!("noise std {std}: {e}")))?;

    let mut points = cloud.matrix().clone();
    let rows = points.nrows().min(3);
    for r in 0..rows {
        for c in 0..points.ncols() {
            points[(r, c)] += normal.sample(rng);
        }
    }
    debug!(std, points = points.ncols(), "gaussian position noise");
    Ok(PointCloud::from_matrix(points))
}
