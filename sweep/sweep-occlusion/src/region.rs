//! Spatial and angular region masks and drops.
//!
//! Regions partition the ego-frame plane into front (`x > 0`), back
//! (`x < 0`), left (`y > 0`), and right (`y < 0`). Points exactly on an axis
//! belong to no region. Angle-sector masks further constrain a region to a
//! wedge around its central axis; a sector mask is always a subset of the
//! matching spatial mask.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sweep_types::{PointCloud, SweepError, SweepResult};

use crate::dropout::drop_within;

/// One of the four planar regions around the ego vehicle.
///
/// # Example
///
/// ```
/// use sweep_occlusion::Region;
///
/// let region: Region = "front".parse().unwrap();
/// assert_eq!(region, Region::Front);
/// assert!("sideways".parse::<Region>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// `x > 0`
    Front,
    /// `x < 0`
    Back,
    /// `y > 0`
    Left,
    /// `y < 0`
    Right,
}

impl Region {
    /// All regions.
    pub const ALL: [Self; 4] = [Self::Front, Self::Back, Self::Left, Self::Right];

    /// Returns the lowercase region name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Returns true if the planar point belongs to this region.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        match self {
            Self::Front => x > 0.0,
            Self::Back => x < 0.0,
            Self::Left => y > 0.0,
            Self::Right => y < 0.0,
        }
    }

    /// Returns true if the point falls within the angular sector of width
    /// `angle_range` degrees around this region's central axis.
    ///
    /// The sector test implies the region test: points on an axis boundary
    /// are never members.
    #[must_use]
    pub fn contains_sector(self, x: f64, y: f64, angle_range: f64) -> bool {
        let half = angle_range / 2.0;
        let theta = y.atan2(x).to_degrees();
        match self {
            Self::Front => x > 0.0 && theta.abs() <= half,
            Self::Back => {
                x < 0.0 && ((theta - 180.0).abs() <= half || (theta + 180.0).abs() <= half)
            }
            Self::Left => y > 0.0 && (theta - 90.0).abs() <= half,
            Self::Right => y < 0.0 && (theta + 90.0).abs() <= half,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| SweepError::UnknownRegion(s.to_string()))
    }
}

/// Column indices of the points inside the given spatial region.
#[must_use]
pub fn spatial_mask(cloud: &PointCloud, region: Region) -> Vec<usize> {
    (0..cloud.len())
        .filter(|&j| {
            let (x, y) = cloud.xy(j);
            region.contains(x, y)
        })
        .collect()
}

/// Column indices of the points inside the given angular sector.
#[must_use]
pub fn sector_mask(cloud: &PointCloud, region: Region, angle_range: f64) -> Vec<usize> {
    (0..cloud.len())
        .filter(|&j| {
            let (x, y) = cloud.xy(j);
            region.contains_sector(x, y, angle_range)
        })
        .collect()
}

/// Drops `percentage` percent of the points inside a spatial region.
///
/// Points outside the region are untouched. The dropped subset is drawn
/// uniformly without replacement from the region's members.
///
/// # Errors
///
/// Returns [`SweepError::InvalidArgument`] if `percentage` is outside
/// `[0, 100]`.
pub fn drop_spatial_region<R: Rng>(
    cloud: &PointCloud,
    region: Region,
    percentage: f64,
    rng: &mut R,
) -> SweepResult<PointCloud> {
    let members = spatial_mask(cloud, region);
    let result = drop_within(cloud, &members, percentage, rng)?;
    debug!(
        region = region.as_str(),
        percentage,
        dropped = cloud.len() - result.len(),
        "spatial region drop"
    );
    Ok(result)
}

/// Drops `percentage` percent of the points inside an angular sector.
///
/// # Errors
///
/// Returns [`SweepError::InvalidArgument`] if `percentage` is outside
/// `[0, 100]` or `angle_range` is outside `(0, 360]`.
pub fn drop_angle_sector<R: Rng>(
    cloud: &PointCloud,
    region: Region,
    angle_range: f64,
    percentage: f64,
    rng: &mut R,
) -> SweepResult<PointCloud> {
    if !(angle_range > 0.0 && angle_range <= 360.0) {
        return Err(SweepError::invalid_argument(format!(
            "angle range must be in (0, 360], got {angle_range}"
        )));
    }
    let members = sector_mask(cloud, region, angle_range);
    let result = drop_within(cloud, &members, percentage, rng)?;
    debug!(
        region = region.as_str(),
        angle_range,
        percentage,
        dropped = cloud.len() - result.len(),
        "angle sector drop"
    );
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cloud_from_xy(points: &[[f64; 2]]) -> PointCloud {
        let flat: Vec<f64> = points.iter().flat_map(|[x, y]| [*x, *y, 0.0]).collect();
        PointCloud::from_matrix(DMatrix::from_column_slice(3, points.len(), &flat))
    }

    #[test]
    fn axis_points_belong_to_no_region() {
        for region in Region::ALL {
            assert!(!region.contains(0.0, 0.0));
        }
        assert!(!Region::Front.contains(0.0, 5.0));
        assert!(!Region::Left.contains(5.0, 0.0));
    }

    #[test]
    fn regions_are_disjoint_pairs() {
        let probes = [(1.0, 2.0), (-3.0, 0.5), (0.5, -4.0), (-1.0, -1.0)];
        for (x, y) in probes {
            assert!(!(Region::Front.contains(x, y) && Region::Back.contains(x, y)));
            assert!(!(Region::Left.contains(x, y) && Region::Right.contains(x, y)));
        }
    }

    #[test]
    fn back_sector_spans_the_180_degree_seam() {
        // Just above and just below the negative x axis.
        assert!(Region::Back.contains_sector(-1.0, 0.01, 90.0));
        assert!(Region::Back.contains_sector(-1.0, -0.01, 90.0));
        // Outside a narrow wedge.
        assert!(!Region::Back.contains_sector(-1.0, 1.0, 10.0));
    }

    #[test]
    fn sector_mask_subset_of_spatial_mask() {
        let cloud = cloud_from_xy(&[
            [1.0, 0.1],
            [1.0, 2.0],
            [-1.0, 0.5],
            [0.3, -0.9],
            [-0.2, -0.2],
        ]);
        for region in Region::ALL {
            let spatial = spatial_mask(&cloud, region);
            let sector = sector_mask(&cloud, region, 60.0);
            assert!(sector.iter().all(|i| spatial.contains(i)));
        }
    }

    #[test]
    fn full_front_drop_removes_exactly_front_points() {
        let cloud = cloud_from_xy(&[[1.0, 0.0], [2.0, 1.0], [-1.0, 0.0], [0.0, 1.0]]);
        let mut rng = StdRng::seed_from_u64(42);
        let result = drop_spatial_region(&cloud, Region::Front, 100.0, &mut rng).unwrap();
        assert_eq!(result.len(), 2);
        for j in 0..result.len() {
            let (x, _) = result.xy(j);
            assert!(x <= 0.0);
        }
    }

    #[test]
    fn full_front_drop_keeps_other_values_intact() {
        let cloud = cloud_from_xy(&[[3.0, 3.0], [-1.5, 0.25]]);
        let mut rng = StdRng::seed_from_u64(7);
        let result = drop_spatial_region(&cloud, Region::Front, 100.0, &mut rng).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.xy(0), (-1.5, 0.25));
    }

    #[test]
    fn sector_drop_rejects_bad_angle() {
        let cloud = cloud_from_xy(&[[1.0, 0.0]]);
        let mut rng = StdRng::seed_from_u64(0);
        let err = drop_angle_sector(&cloud, Region::Front, 0.0, 50.0, &mut rng).unwrap_err();
        assert!(matches!(err, SweepError::InvalidArgument(_)));
        let err = drop_angle_sector(&cloud, Region::Front, 400.0, 50.0, &mut rng).unwrap_err();
        assert!(matches!(err, SweepError::InvalidArgument(_)));
    }

    #[test]
    fn sector_drop_spares_region_points_outside_the_wedge() {
        // Both in front, one inside a 40 degree wedge, one at ~45 degrees.
        let cloud = cloud_from_xy(&[[1.0, 0.05], [1.0, 1.0]]);
        let mut rng = StdRng::seed_from_u64(3);
        let result = drop_angle_sector(&cloud, Region::Front, 40.0, 100.0, &mut rng).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.xy(0), (1.0, 1.0));
    }

    #[test]
    fn parse_region_strings() {
        assert_eq!("back".parse::<Region>().unwrap(), Region::Back);
        assert!(matches!(
            "BACK".parse::<Region>(),
            Err(SweepError::UnknownRegion(_))
        ));
    }
}
