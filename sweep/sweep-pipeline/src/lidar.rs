//! The top-level LiDAR call.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use sweep_occlusion::{apply_lidar, LidarOcclusion};
use sweep_types::{PointCloud, SweepError, SweepResult, LIDAR_DIMS};

use crate::loader::load_lidar;
use crate::source::{SweepManifest, SweepSource};
use crate::store::{DatasetStore, SampleRef};

/// Default RNG seed for reproducible corruption.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters for one LiDAR point-cloud construction call.
///
/// # Example
///
/// ```
/// use sweep_pipeline::LidarSweepParams;
/// use sweep_occlusion::LidarOcclusion;
/// use std::path::Path;
///
/// let params = LidarSweepParams::new(10, 1.0, Path::new("/data"))
///     .with_occlusion(LidarOcclusion::random(60.0))
///     .with_seed(7);
/// assert_eq!(params.nsweeps, 10);
/// ```
#[derive(Debug, Clone)]
pub struct LidarSweepParams<'a> {
    /// Maximum number of sweeps to aggregate.
    pub nsweeps: usize,

    /// Minimum sensor distance; closer points are stripped at load time.
    pub min_distance: f64,

    /// Root directory that sweep paths are resolved against.
    pub data_root: &'a Path,

    /// Pre-resolved sweep records; bypasses the store and overrides
    /// `nsweeps` when present.
    pub manifest: Option<&'a SweepManifest>,

    /// Corruption to apply to each sweep. Default: none.
    pub occlusion: LidarOcclusion,

    /// Seed for the call's RNG stream. Default: 42.
    pub seed: u64,
}

impl<'a> LidarSweepParams<'a> {
    /// Creates parameters with no occlusion and the default seed.
    #[must_use]
    pub const fn new(nsweeps: usize, min_distance: f64, data_root: &'a Path) -> Self {
        Self {
            nsweeps,
            min_distance,
            data_root,
            manifest: None,
            occlusion: LidarOcclusion::none(),
            seed: DEFAULT_SEED,
        }
    }

    /// Supplies a pre-resolved manifest.
    #[must_use]
    pub const fn with_manifest(mut self, manifest: &'a SweepManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Sets the occlusion configuration.
    #[must_use]
    pub const fn with_occlusion(mut self, occlusion: LidarOcclusion) -> Self {
        self.occlusion = occlusion;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> SweepResult<()> {
        if self.min_distance < 0.0 {
            return Err(SweepError::invalid_argument(format!(
                "min distance must be non-negative, got {}",
                self.min_distance
            )));
        }
        self.occlusion.validate()
    }
}

/// Builds the aggregated LiDAR point matrix for one sample.
///
/// Sweeps are processed newest to oldest. Each sweep is loaded, stripped of
/// near-sensor points, transformed into the reference ego frame, corrupted
/// per the occlusion configuration, tagged with its constant time lag as
/// the final row, and concatenated onto the output. The result is a
/// 6 x N matrix whose column order follows sweep recency.
///
/// The entire call draws from one RNG seeded with `params.seed`, so
/// identical inputs and seed produce byte-identical output.
///
/// # Errors
///
/// Fails with [`SweepError::MissingSample`] when no manifest is given and
/// the sample has no LiDAR sweep, with [`SweepError::Io`] /
/// [`SweepError::MalformedPointFile`] for unreadable point files (the call
/// aborts without returning a partial matrix), and with
/// [`SweepError::InvalidArgument`] for out-of-range parameters.
pub fn lidar_points(
    store: &DatasetStore,
    sample: &SampleRef,
    params: &LidarSweepParams<'_>,
) -> SweepResult<PointCloud> {
    params.validate()?;
    let mut rng = StdRng::seed_from_u64(params.seed);

    let source = match params.manifest {
        Some(manifest) => SweepSource::manifest(&manifest.sweeps),
        None => {
            let start = sample
                .lidar
                .ok_or_else(|| SweepError::missing_sample("LIDAR_TOP"))?;
            SweepSource::dataset_walk(store, start, start, params.nsweeps)?
        }
    };

    let mut output = PointCloud::empty(LIDAR_DIMS);
    let mut sweeps = 0usize;
    for record in source {
        let cloud = load_lidar(&params.data_root.join(&record.path))?
            .remove_close(params.min_distance)
            .transformed(&record.ref_from_sensor);
        let cloud = apply_lidar(&cloud, &params.occlusion, &mut rng)?;
        output = output.hstack(&cloud.with_time_row(record.time_lag))?;
        sweeps += 1;
    }

    info!(sweeps, points = output.len(), "aggregated lidar sweeps");
    Ok(output)
}
