//! Multi-sweep point-cloud construction and degradation.
//!
//! Builds time-tagged, ego-frame point matrices from chains of historical
//! sensor sweeps, with optional seeded corruption for perception
//! robustness benchmarking:
//!
//! - [`DatasetStore`] / [`SampleRef`] - Arena-backed sweep metadata
//! - [`SweepSource`] - Dataset walk or precomputed manifest, per call
//! - [`lidar_points`] - Aggregated 6 x N LiDAR matrix
//! - [`radar_points`] - Aggregated 19 x N radar matrix across channels
//!
//! The pipeline per sweep: load raw points, strip near-sensor returns,
//! transform into the reference ego frame, corrupt
//! (see [`sweep_occlusion`]), append the constant time-lag row, and
//! concatenate. Everything is synchronous and single-threaded; the only
//! mutable state is the per-call RNG, so one integer seed reproduces a
//! whole call.
//!
//! # Example
//!
//! ```
//! use sweep_pipeline::{lidar_points, DatasetStore, LidarSweepParams, SampleRef};
//! use std::path::Path;
//!
//! let store = DatasetStore::new();
//! let sample = SampleRef::new();
//! let params = LidarSweepParams::new(10, 1.0, Path::new("/data"));
//!
//! // No LiDAR sweep in the sample and no manifest: MissingSample.
//! assert!(lidar_points(&store, &sample, &params).is_err());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod lidar;
mod loader;
mod radar;
mod source;
mod store;

pub use lidar::{lidar_points, LidarSweepParams, DEFAULT_SEED};
pub use loader::{load_lidar, load_radar};
pub use radar::{radar_points, RadarSweepParams, REFERENCE_CHANNEL};
pub use source::{
    ref_from_sensor, time_lag, DatasetWalk, RadarManifest, SweepManifest, SweepSource,
};
pub use store::{DatasetStore, SampleRef, SweepMeta};
