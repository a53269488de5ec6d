//! Shared types for the sweep degradation pipeline.
//!
//! This crate provides the vocabulary the other sweep crates build on:
//!
//! - [`PointCloud`] - Dense `D x N` point matrix with pure column operations
//! - [`RigidTransform`] - Rotation + translation between coordinate frames
//! - [`RadarChannel`] - The five radar sensors in their fixed engine order
//! - [`SweepRecord`] - One resolved sweep (file path, transform, time lag)
//! - [`SweepError`] / [`SweepResult`] - Error handling for the pipeline
//!
//! # Example
//!
//! ```
//! use sweep_types::{PointCloud, RigidTransform};
//! use nalgebra::{DMatrix, Vector3};
//!
//! let cloud = PointCloud::from_matrix(DMatrix::from_column_slice(
//!     3,
//!     1,
//!     &[1.0, 0.0, 0.0],
//! ));
//! let shift = RigidTransform::from_translation(Vector3::new(0.0, 2.0, 0.0));
//! let moved = cloud.transformed(&shift.to_matrix4());
//! assert!((moved.matrix()[(1, 0)] - 2.0).abs() < 1e-10);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod channel;
mod cloud;
mod error;
mod record;
mod transform;

pub use channel::RadarChannel;
pub use cloud::{
    PointCloud, AMBIG_STATE_ROW, DYN_PROP_ROW, INVALID_STATE_ROW, LIDAR_DIMS, LIDAR_RAW_DIMS,
    RADAR_DIMS, RADAR_RAW_DIMS, RCS_ROW,
};
pub use error::{SweepError, SweepResult};
pub use record::SweepRecord;
pub use transform::RigidTransform;
