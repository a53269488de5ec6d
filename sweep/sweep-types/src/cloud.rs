//! Dense point matrix for multi-sweep sensor data.
//!
//! A [`PointCloud`] is a `D x N` matrix of `f64` values: one column per
//! point, one row per channel. LiDAR files carry 5 raw rows and radar files
//! 18; aggregation appends the constant time-lag row last, giving the 6 and
//! 19 row output layouts.
//!
//! All operations are pure: they return a new cloud and never mutate the
//! receiver, so pipeline stages compose and test in isolation. The point
//! count only ever shrinks.
//!
//! # Example
//!
//! ```
//! use sweep_types::PointCloud;
//! use nalgebra::DMatrix;
//!
//! // Two 3-channel points.
//! let cloud = PointCloud::from_matrix(DMatrix::from_column_slice(
//!     3,
//!     2,
//!     &[1.0, 0.0, 0.0, 0.0, 2.0, 0.0],
//! ));
//! assert_eq!(cloud.len(), 2);
//!
//! let tagged = cloud.with_time_row(0.05);
//! assert_eq!(tagged.dims(), 4);
//! assert_eq!(tagged.matrix()[(3, 1)], 0.05);
//! ```

use nalgebra::{DMatrix, Matrix4, Vector3};

use crate::error::{SweepError, SweepResult};

/// Raw channel count of a LiDAR point file: x, y, z, intensity, ring.
pub const LIDAR_RAW_DIMS: usize = 5;

/// Output channel count for aggregated LiDAR points (raw + time lag).
pub const LIDAR_DIMS: usize = 6;

/// Raw channel count of a radar point file.
pub const RADAR_RAW_DIMS: usize = 18;

/// Output channel count for aggregated radar points (raw + time lag).
pub const RADAR_DIMS: usize = 19;

/// Row index of the RCS value in radar points.
pub const RCS_ROW: usize = 5;

/// Row index of the dynamic property state in radar points.
pub const DYN_PROP_ROW: usize = 3;

/// Row index of the ambiguity state in radar points.
pub const AMBIG_STATE_ROW: usize = 11;

/// Row index of the invalid state in radar points.
pub const INVALID_STATE_ROW: usize = 14;

/// A dense `D x N` point matrix: one column per point, one row per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: DMatrix<f64>,
}

impl PointCloud {
    /// Creates an empty cloud with the given channel count.
    #[must_use]
    pub fn empty(dims: usize) -> Self {
        Self {
            points: DMatrix::zeros(dims, 0),
        }
    }

    /// Wraps an existing matrix.
    #[must_use]
    pub const fn from_matrix(points: DMatrix<f64>) -> Self {
        Self { points }
    }

    /// Returns the number of channels (rows).
    #[must_use]
    pub fn dims(&self) -> usize {
        self.points.nrows()
    }

    /// Returns the number of points (columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.ncols()
    }

    /// Returns true if the cloud contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.ncols() == 0
    }

    /// Returns the underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &DMatrix<f64> {
        &self.points
    }

    /// Returns the planar coordinates of one point.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of range or the cloud has fewer than two rows.
    #[must_use]
    pub fn xy(&self, col: usize) -> (f64, f64) {
        (self.points[(0, col)], self.points[(1, col)])
    }

    /// Removes points too close to the sensor origin.
    ///
    /// A point is stripped when both `|x| < min_distance` and
    /// `|y| < min_distance`, matching the dataset loader this pipeline
    /// replaces. Non-positive distances keep every point.
    #[must_use]
    pub fn remove_close(&self, min_distance: f64) -> Self {
        if min_distance <= 0.0 || self.dims() < 2 {
            return self.clone();
        }
        let keep: Vec<usize> = (0..self.len())
            .filter(|&j| {
                let (x, y) = self.xy(j);
                x.abs() >= min_distance || y.abs() >= min_distance
            })
            .collect();
        self.select_columns(&keep)
    }

    /// Applies a homogeneous rigid transform to the position rows.
    ///
    /// Only the first three rows change; intensity, ring, and the radar
    /// auxiliary channels pass through untouched.
    #[must_use]
    pub fn transformed(&self, transform: &Matrix4<f64>) -> Self {
        let rotation = transform.fixed_view::<3, 3>(0, 0).into_owned();
        let translation = Vector3::new(
            transform[(0, 3)],
            transform[(1, 3)],
            transform[(2, 3)],
        );

        let mut points = self.points.clone();
        for mut col in points.column_iter_mut() {
            let p = Vector3::new(col[0], col[1], col[2]);
            let moved = rotation * p + translation;
            col[0] = moved.x;
            col[1] = moved.y;
            col[2] = moved.z;
        }
        Self { points }
    }

    /// Returns a new cloud containing only the given columns, in order.
    #[must_use]
    pub fn select_columns(&self, indices: &[usize]) -> Self {
        Self {
            points: self.points.select_columns(indices.iter()),
        }
    }

    /// Returns a new cloud with the given columns removed.
    ///
    /// Indices out of range are ignored; duplicates remove the column once.
    #[must_use]
    pub fn remove_columns_at(&self, drop: &[usize]) -> Self {
        let mut keep_mask = vec![true; self.len()];
        for &i in drop {
            if i < keep_mask.len() {
                keep_mask[i] = false;
            }
        }
        let keep: Vec<usize> = keep_mask
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect();
        self.select_columns(&keep)
    }

    /// Appends a constant time-lag row as the last channel.
    #[must_use]
    pub fn with_time_row(&self, time_lag: f64) -> Self {
        let (d, n) = (self.dims(), self.len());
        let mut points = DMatrix::from_element(d + 1, n, time_lag);
        points.view_mut((0, 0), (d, n)).copy_from(&self.points);
        Self { points }
    }

    /// Concatenates another cloud's columns after this cloud's.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::DimensionMismatch`] if the channel counts differ.
    pub fn hstack(&self, other: &Self) -> SweepResult<Self> {
        if self.dims() != other.dims() {
            return Err(SweepError::dimension_mismatch(self.dims(), other.dims()));
        }
        let d = self.dims();
        let (n1, n2) = (self.len(), other.len());
        let mut points = DMatrix::zeros(d, n1 + n2);
        points.view_mut((0, 0), (d, n1)).copy_from(&self.points);
        points.view_mut((0, n1), (d, n2)).copy_from(&other.points);
        Ok(Self { points })
    }
}
