//! Resolved sweep records.

use std::path::PathBuf;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// One resolved sensor sweep, ready for loading and transformation.
///
/// Immutable once produced by a sweep source: the raw point file location,
/// the rigid transform from the sweep's sensor frame into the reference ego
/// frame, and the signed time offset to the reference timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    /// Location of the raw point file, relative to the data root.
    pub path: PathBuf,

    /// Transform mapping sensor-frame points into the reference ego frame.
    pub ref_from_sensor: Matrix4<f64>,

    /// Seconds between the reference timestamp and this sweep's capture
    /// time. Positive for older sweeps; future sweeps are representable.
    pub time_lag: f64,
}

impl SweepRecord {
    /// Creates a new sweep record.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        ref_from_sensor: Matrix4<f64>,
        time_lag: f64,
    ) -> Self {
        Self {
            path: path.into(),
            ref_from_sensor,
            time_lag,
        }
    }
}
