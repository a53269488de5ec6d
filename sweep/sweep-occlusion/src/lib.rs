//! Seeded occlusion and noise operators for sweep point clouds.
//!
//! This crate implements the corruption half of the sweep pipeline:
//!
//! - [`drop_random`] - Uniform dropout without replacement
//! - [`Region`] masks with [`drop_spatial_region`] / [`drop_angle_sector`]
//! - [`add_position_noise`] - Gaussian perturbation of x, y, z
//! - [`scale_rcs`] - Radar signal strength degradation
//! - [`active_channels`] - Radar channel exclusion, explicit or random
//!
//! Operators are pure (they return a new [`PointCloud`]) and draw from a
//! caller-supplied RNG in a fixed, documented order, so one integer seed
//! reproduces an entire call.
//!
//! # Example
//!
//! ```
//! use sweep_occlusion::{drop_random, LidarOcclusion};
//! use sweep_types::PointCloud;
//! use nalgebra::DMatrix;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let flat: Vec<f64> = (0..30).map(f64::from).collect();
//! let cloud = PointCloud::from_matrix(DMatrix::from_column_slice(3, 10, &flat));
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let thinned = drop_random(&cloud, 60.0, &mut rng).unwrap();
//! assert_eq!(thinned.len(), 4);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

mod config;
mod dropout;
mod engine;
mod noise;
mod region;

pub use config::{ChannelTarget, LidarDropout, LidarOcclusion, RadarOcclusion};
pub use dropout::{drop_count, drop_random, drop_within};
pub use engine::{active_channels, apply_lidar, apply_radar_sweep, scale_rcs};
pub use noise::add_position_noise;
pub use region::{drop_angle_sector, drop_spatial_region, sector_mask, spatial_mask, Region};
