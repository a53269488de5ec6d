//! Dataset metadata store boundary.
//!
//! The store holds every sweep's metadata in one arena, with backward
//! `prev` links expressed as `Option<usize>` indices into the arena. A
//! sample points at the newest sweep of each sensor; walking a chain is an
//! index traversal that terminates at the first record without a
//! predecessor.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use sweep_types::{RadarChannel, RigidTransform};

/// Metadata for one recorded sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepMeta {
    /// Location of the raw point file, relative to the data root.
    pub path: PathBuf,

    /// Capture time in integer microseconds.
    pub timestamp_us: i64,

    /// Ego vehicle pose in the global frame at capture time.
    pub ego_pose: RigidTransform,

    /// Sensor mounting calibration: sensor frame into the ego frame.
    pub sensor_calibration: RigidTransform,

    /// Index of the previous (older) sweep of the same sensor, if any.
    pub prev: Option<usize>,
}

/// Arena of sweep metadata records.
///
/// # Example
///
/// ```
/// use sweep_pipeline::{DatasetStore, SweepMeta};
/// use sweep_types::RigidTransform;
///
/// let mut store = DatasetStore::new();
/// let older = store.push(SweepMeta {
///     path: "sweeps/lidar_0.bin".into(),
///     timestamp_us: 1_000_000,
///     ego_pose: RigidTransform::identity(),
///     sensor_calibration: RigidTransform::identity(),
///     prev: None,
/// });
/// let newer = store.push(SweepMeta {
///     path: "sweeps/lidar_1.bin".into(),
///     timestamp_us: 1_050_000,
///     ego_pose: RigidTransform::identity(),
///     sensor_calibration: RigidTransform::identity(),
///     prev: Some(older),
/// });
///
/// assert_eq!(store.sweep(newer).unwrap().prev, Some(older));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStore {
    sweeps: Vec<SweepMeta>,
}

impl DatasetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sweep record, returning its index.
    pub fn push(&mut self, meta: SweepMeta) -> usize {
        self.sweeps.push(meta);
        self.sweeps.len() - 1
    }

    /// Looks up a sweep by index.
    #[must_use]
    pub fn sweep(&self, index: usize) -> Option<&SweepMeta> {
        self.sweeps.get(index)
    }

    /// Returns the number of stored sweeps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sweeps.len()
    }

    /// Returns true if the store holds no sweeps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sweeps.is_empty()
    }
}

/// One sample's references to its newest sweeps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleRef {
    /// Newest LiDAR sweep index, if the sample carries LiDAR data.
    pub lidar: Option<usize>,

    /// Newest sweep index per radar channel.
    pub radar: BTreeMap<RadarChannel, usize>,
}

impl SampleRef {
    /// Creates a sample with no sensor references.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the LiDAR reference.
    #[must_use]
    pub fn with_lidar(mut self, index: usize) -> Self {
        self.lidar = Some(index);
        self
    }

    /// Adds a radar channel reference.
    #[must_use]
    pub fn with_radar(mut self, channel: RadarChannel, index: usize) -> Self {
        self.radar.insert(channel, index);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn meta(timestamp_us: i64, prev: Option<usize>) -> SweepMeta {
        SweepMeta {
            path: format!("sweeps/{timestamp_us}.bin").into(),
            timestamp_us,
            ego_pose: RigidTransform::identity(),
            sensor_calibration: RigidTransform::identity(),
            prev,
        }
    }

    #[test]
    fn chain_links_resolve() {
        let mut store = DatasetStore::new();
        let a = store.push(meta(100, None));
        let b = store.push(meta(200, Some(a)));
        let c = store.push(meta(300, Some(b)));

        assert_eq!(store.len(), 3);
        assert_eq!(store.sweep(c).unwrap().prev, Some(b));
        assert_eq!(store.sweep(a).unwrap().prev, None);
        assert!(store.sweep(99).is_none());
    }

    #[test]
    fn sample_builders() {
        let sample = SampleRef::new()
            .with_lidar(7)
            .with_radar(RadarChannel::Front, 3);
        assert_eq!(sample.lidar, Some(7));
        assert_eq!(sample.radar.get(&RadarChannel::Front), Some(&3));
        assert!(sample.radar.get(&RadarChannel::BackLeft).is_none());
    }

    #[test]
    fn store_serde_round_trip() {
        let mut store = DatasetStore::new();
        let a = store.push(meta(100, None));
        store.push(meta(200, Some(a)));

        let json = serde_json::to_string(&store).unwrap();
        let parsed: DatasetStore = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, store);
    }
}
