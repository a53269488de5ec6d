//! The top-level radar call.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use sweep_occlusion::{active_channels, apply_radar_sweep, RadarOcclusion};
use sweep_types::{PointCloud, RadarChannel, SweepError, SweepResult, RADAR_DIMS};

use crate::lidar::DEFAULT_SEED;
use crate::loader::load_radar;
use crate::source::{RadarManifest, SweepSource};
use crate::store::{DatasetStore, SampleRef};

/// The sweep whose pose anchors the radar reference frame.
///
/// As in the source dataset loader, the reference is always taken from this
/// channel's newest sweep, independent of which channels are excluded from
/// iteration.
pub const REFERENCE_CHANNEL: RadarChannel = RadarChannel::BackRight;

/// Parameters for one radar point-cloud construction call.
///
/// # Example
///
/// ```
/// use sweep_pipeline::RadarSweepParams;
/// use sweep_occlusion::{ChannelTarget, RadarOcclusion};
/// use sweep_types::RadarChannel;
/// use std::path::Path;
///
/// let occlusion = RadarOcclusion::default()
///     .with_excluded(vec![RadarChannel::BackRight])
///     .with_dropout(ChannelTarget::All, 25.0);
/// let params = RadarSweepParams::new(3, 1.0, Path::new("/data"))
///     .with_filters()
///     .with_occlusion(occlusion);
/// assert!(params.use_radar_filters);
/// ```
#[derive(Debug, Clone)]
pub struct RadarSweepParams<'a> {
    /// Maximum number of sweeps to aggregate per channel.
    pub nsweeps: usize,

    /// Minimum sensor distance; closer points are stripped at load time.
    pub min_distance: f64,

    /// Apply the dataset's validity filters at load time.
    pub use_radar_filters: bool,

    /// Root directory that sweep paths are resolved against.
    pub data_root: &'a Path,

    /// Pre-resolved per-channel records; bypasses the store and overrides
    /// `nsweeps` when present.
    pub manifest: Option<&'a RadarManifest>,

    /// Corruption to apply. Default: none.
    pub occlusion: RadarOcclusion,

    /// Seed for the call's RNG stream. Default: 42.
    pub seed: u64,
}

impl<'a> RadarSweepParams<'a> {
    /// Creates parameters with no occlusion, no filters, and the default
    /// seed.
    #[must_use]
    pub fn new(nsweeps: usize, min_distance: f64, data_root: &'a Path) -> Self {
        Self {
            nsweeps,
            min_distance,
            use_radar_filters: false,
            data_root,
            manifest: None,
            occlusion: RadarOcclusion::none(),
            seed: DEFAULT_SEED,
        }
    }

    /// Enables the dataset validity filters.
    #[must_use]
    pub fn with_filters(mut self) -> Self {
        self.use_radar_filters = true;
        self
    }

    /// Supplies a pre-resolved manifest.
    #[must_use]
    pub fn with_manifest(mut self, manifest: &'a RadarManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Sets the occlusion configuration.
    #[must_use]
    pub fn with_occlusion(mut self, occlusion: RadarOcclusion) -> Self {
        self.occlusion = occlusion;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
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

/// Builds the aggregated radar point matrix for one sample.
///
/// The outer loop runs over the active channel list (after exclusion) in
/// the fixed engine order; the inner loop over that channel's sweeps,
/// newest to oldest. Each sweep is loaded (optionally filtered), stripped
/// of near-sensor points, transformed into the reference ego frame,
/// corrupted in the fixed operator order, tagged with its time lag as the
/// final row, and concatenated. The result is a 19 x N matrix whose
/// columns group by channel, then sweep recency.
///
/// Channel selection is the first RNG consumption of the call, followed by
/// the per-sweep operators in order; one seed reproduces everything.
///
/// # Errors
///
/// Fails with [`SweepError::MissingSample`] when a walked channel (or the
/// reference channel) has no sweep in the sample, with [`SweepError::Io`] /
/// [`SweepError::MalformedPointFile`] for unreadable point files, and with
/// [`SweepError::InvalidArgument`] for out-of-range parameters.
pub fn radar_points(
    store: &DatasetStore,
    sample: &SampleRef,
    params: &RadarSweepParams<'_>,
) -> SweepResult<PointCloud> {
    params.validate()?;
    let mut rng = StdRng::seed_from_u64(params.seed);

    let channels = active_channels(&params.occlusion, &mut rng);

    let mut output = PointCloud::empty(RADAR_DIMS);
    let mut sweeps = 0usize;
    match params.manifest {
        Some(manifest) => {
            for channel in channels {
                let records = manifest
                    .channels
                    .get(&channel)
                    .ok_or_else(|| SweepError::missing_sample(channel.as_str()))?;
                aggregate_channel(
                    SweepSource::manifest(records),
                    channel,
                    params,
                    &mut rng,
                    &mut output,
                    &mut sweeps,
                )?;
            }
        }
        None => {
            // Walk mode shares one reference sweep across every channel.
            let reference = *sample
                .radar
                .get(&REFERENCE_CHANNEL)
                .ok_or_else(|| SweepError::missing_sample(REFERENCE_CHANNEL.as_str()))?;
            for channel in channels {
                let start = *sample
                    .radar
                    .get(&channel)
                    .ok_or_else(|| SweepError::missing_sample(channel.as_str()))?;
                aggregate_channel(
                    SweepSource::dataset_walk(store, start, reference, params.nsweeps)?,
                    channel,
                    params,
                    &mut rng,
                    &mut output,
                    &mut sweeps,
                )?;
            }
        }
    }

    info!(sweeps, points = output.len(), "aggregated radar sweeps");
    Ok(output)
}

/// Loads, corrupts, tags, and concatenates one channel's sweeps.
fn aggregate_channel(
    source: SweepSource<'_>,
    channel: RadarChannel,
    params: &RadarSweepParams<'_>,
    rng: &mut StdRng,
    output: &mut PointCloud,
    sweeps: &mut usize,
) -> SweepResult<()> {
    for record in source {
        let cloud = load_radar(
            &params.data_root.join(&record.path),
            params.use_radar_filters,
        )?
        .remove_close(params.min_distance)
        .transformed(&record.ref_from_sensor);
        let cloud = apply_radar_sweep(&cloud, channel, &params.occlusion, rng)?;
        *output = output.hstack(&cloud.with_time_row(record.time_lag))?;
        *sweeps += 1;
    }
    Ok(())
}
