//! Sweep sources: dataset walk and precomputed manifests.
//!
//! A [`SweepSource`] yields up to `nsweeps` resolved [`SweepRecord`]s for
//! one sensor, newest first. The dataset walk traverses the store's
//! backward chain and composes each sweep's reference transform on the fly;
//! the manifest variant replays pre-resolved records and ignores `nsweeps`.

use std::collections::BTreeMap;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use tracing::warn;

use sweep_types::{RadarChannel, RigidTransform, SweepError, SweepRecord, SweepResult};

use crate::store::DatasetStore;

/// Converts an integer-microsecond timestamp difference to signed seconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn time_lag(ref_timestamp_us: i64, timestamp_us: i64) -> f64 {
    (ref_timestamp_us - timestamp_us) as f64 * 1e-6
}

/// Composes the transform mapping sensor-frame points into the reference
/// ego frame.
///
/// The product is accumulated left to right in this exact order:
///
/// 1. `ref_ego_from_global` - inverse of the reference ego pose
/// 2. `global_from_current_ego` - the sweep's ego pose, not inverted
/// 3. `current_ego_from_sensor` - the sweep's calibration, not inverted
///
/// Matrix multiplication is not commutative; this order is the contract.
#[must_use]
pub fn ref_from_sensor(
    ref_ego_from_global: &Matrix4<f64>,
    ego_pose: &RigidTransform,
    sensor_calibration: &RigidTransform,
) -> Matrix4<f64> {
    let mut acc = ref_ego_from_global * ego_pose.to_matrix4();
    acc *= sensor_calibration.to_matrix4();
    acc
}

/// Iterator over a backward sweep chain in the store.
///
/// Two states: `HaveCurrent` (an index is loaded and the count is unmet)
/// and `Exhausted`. The iterator moves to `Exhausted` when the chain ends
/// or `nsweeps` records have been produced; ending early is not an error.
#[derive(Debug)]
pub struct DatasetWalk<'a> {
    store: &'a DatasetStore,
    current: Option<usize>,
    remaining: usize,
    ref_ego_from_global: Matrix4<f64>,
    ref_timestamp_us: i64,
}

impl<'a> DatasetWalk<'a> {
    /// Starts a walk at `start`, taking the reference frame and timestamp
    /// from the sweep at `reference`.
    ///
    /// For LiDAR the two indices coincide; radar walks share one reference
    /// sweep across all channels.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidArgument`] if either index is not in
    /// the store.
    pub fn new(
        store: &'a DatasetStore,
        start: usize,
        reference: usize,
        nsweeps: usize,
    ) -> SweepResult<Self> {
        let ref_meta = store
            .sweep(reference)
            .ok_or_else(|| SweepError::invalid_argument(format!(
                "reference sweep index {reference} out of range"
            )))?;
        if store.sweep(start).is_none() {
            return Err(SweepError::invalid_argument(format!(
                "start sweep index {start} out of range"
            )));
        }
        Ok(Self {
            store,
            current: Some(start),
            remaining: nsweeps,
            ref_ego_from_global: ref_meta.ego_pose.inverse().to_matrix4(),
            ref_timestamp_us: ref_meta.timestamp_us,
        })
    }
}

impl Iterator for DatasetWalk<'_> {
    type Item = SweepRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.current = None;
        }
        let index = self.current?;
        let Some(meta) = self.store.sweep(index) else {
            // The start index was validated in new(); only a dangling
            // prev link lands here.
            warn!(index, "sweep chain link does not resolve, ending walk");
            self.current = None;
            return None;
        };

        let record = SweepRecord::new(
            meta.path.clone(),
            ref_from_sensor(
                &self.ref_ego_from_global,
                &meta.ego_pose,
                &meta.sensor_calibration,
            ),
            time_lag(self.ref_timestamp_us, meta.timestamp_us),
        );

        self.remaining -= 1;
        self.current = meta.prev;
        Some(record)
    }
}

/// Pre-resolved LiDAR sweep records that bypass the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepManifest {
    /// Records newest first.
    pub sweeps: Vec<SweepRecord>,
}

/// Pre-resolved radar sweep records, one list per channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarManifest {
    /// Records newest first, per channel.
    pub channels: BTreeMap<RadarChannel, Vec<SweepRecord>>,
}

/// Where one sensor's sweep records come from, selected once per call.
#[derive(Debug)]
pub enum SweepSource<'a> {
    /// Walk the store's backward chain.
    DatasetWalk(DatasetWalk<'a>),
    /// Replay a pre-resolved record list in order.
    Manifest(std::slice::Iter<'a, SweepRecord>),
}

impl<'a> SweepSource<'a> {
    /// Creates a dataset-walk source.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidArgument`] for out-of-range indices.
    pub fn dataset_walk(
        store: &'a DatasetStore,
        start: usize,
        reference: usize,
        nsweeps: usize,
    ) -> SweepResult<Self> {
        Ok(Self::DatasetWalk(DatasetWalk::new(
            store, start, reference, nsweeps,
        )?))
    }

    /// Creates a manifest source over pre-resolved records.
    ///
    /// The record count overrides any `nsweeps` the caller had in mind.
    #[must_use]
    pub fn manifest(records: &'a [SweepRecord]) -> Self {
        Self::Manifest(records.iter())
    }
}

impl Iterator for SweepSource<'_> {
    type Item = SweepRecord;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::DatasetWalk(walk) => walk.next(),
            Self::Manifest(records) => records.next().cloned(),
        }
    }
}
