//! Fixed-order application of the corruption operators.
//!
//! All stochastic operators draw from the single caller-supplied RNG in a
//! fixed sequence: channel selection first (radar, once per call), then per
//! sweep dropout, noise, and RCS scaling. This consumption order is part of
//! the reproducibility contract; reordering operators changes results even
//! under the same seed.

use rand::Rng;
use tracing::debug;

use sweep_types::{PointCloud, RadarChannel, SweepResult, RCS_ROW};

use crate::config::{LidarDropout, LidarOcclusion, RadarOcclusion};
use crate::dropout::drop_random;
use crate::noise::add_position_noise;
use crate::region::{drop_angle_sector, drop_spatial_region};

/// Resolves the active radar channel list for one call.
///
/// Applies channel exclusion before any sweep processing: the explicit
/// exclusion list, or one channel drawn uniformly at random when
/// `random_single_channel_drop` is set (the random pick overrides the list
/// and is the first RNG consumption of the call). Order of the survivors
/// follows [`RadarChannel::ALL`].
#[must_use]
pub fn active_channels<R: Rng>(config: &RadarOcclusion, rng: &mut R) -> Vec<RadarChannel> {
    let excluded: Vec<RadarChannel> = if config.random_single_channel_drop {
        let pick = RadarChannel::ALL[rng.gen_range(0..RadarChannel::ALL.len())];
        debug!(channel = pick.as_str(), "randomly selected channel to drop");
        vec![pick]
    } else {
        config.exclude.clone()
    };

    RadarChannel::ALL
        .into_iter()
        .filter(|channel| !excluded.contains(channel))
        .collect()
}

/// Applies the configured LiDAR corruption to one transformed sweep.
///
/// # Errors
///
/// Propagates parameter errors from the individual operators; callers that
/// ran [`LidarOcclusion::validate`] first never see them.
pub fn apply_lidar<R: Rng>(
    cloud: &PointCloud,
    config: &LidarOcclusion,
    rng: &mut R,
) -> SweepResult<PointCloud> {
    match config.dropout {
        LidarDropout::None => Ok(cloud.clone()),
        LidarDropout::Random { percentage } => drop_random(cloud, percentage, rng),
        LidarDropout::Region { region, percentage } => {
            drop_spatial_region(cloud, region, percentage, rng)
        }
        LidarDropout::Sector {
            region,
            angle_range,
            percentage,
        } => drop_angle_sector(cloud, region, angle_range, percentage, rng),
    }
}

/// Applies the configured radar corruption to one transformed sweep.
///
/// Operator order within the sweep is fixed: random dropout, Gaussian
/// position noise, RCS scaling. Channel exclusion has already happened via
/// [`active_channels`].
///
/// # Errors
///
/// Propagates parameter errors from the individual operators.
pub fn apply_radar_sweep<R: Rng>(
    cloud: &PointCloud,
    channel: RadarChannel,
    config: &RadarOcclusion,
    rng: &mut R,
) -> SweepResult<PointCloud> {
    let mut cloud = if config.drop_target.applies_to(channel) && config.drop_percentage > 0.0 {
        drop_random(cloud, config.drop_percentage, rng)?
    } else {
        cloud.clone()
    };

    if config.noise_target.applies_to(channel) {
        cloud = add_position_noise(&cloud, config.noise_std, rng)?;
    }

    if let Some(scale) = config.rcs_scale {
        cloud = scale_rcs(&cloud, scale);
    }

    Ok(cloud)
}

/// Scales the RCS row by the given factor.
///
/// A no-op for matrices with 5 or fewer rows.
#[must_use]
pub fn scale_rcs(cloud: &PointCloud, scale: f64) -> PointCloud {
    if cloud.dims() <= RCS_ROW {
        return cloud.clone();
    }
    let mut points = cloud.matrix().clone();
    for c in 0..points.ncols() {
        points[(RCS_ROW, c)] *= scale;
    }
    debug!(scale, points = points.ncols(), "scaled rcs");
    PointCloud::from_matrix(points)
}
