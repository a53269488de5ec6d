//! Raw point file loading.
//!
//! Point files are flat little-endian `f32` records: 5 floats per LiDAR
//! point (x, y, z, intensity, ring) and 18 per radar point. A file whose
//! byte length is not a whole number of records is malformed; a missing
//! file surfaces the underlying I/O error and aborts the call.

use std::path::Path;

use nalgebra::DMatrix;
use tracing::debug;

use sweep_types::{
    PointCloud, SweepError, SweepResult, AMBIG_STATE_ROW, DYN_PROP_ROW, INVALID_STATE_ROW,
    LIDAR_RAW_DIMS, RADAR_RAW_DIMS,
};

// Dataset validity filter defaults: a radar return is kept when its invalid
// state is 0, its ambiguity state is 3 (stationary candidates resolved), and
// its dynamic property is one of the recognized states 0..=6.
const VALID_INVALID_STATE: f64 = 0.0;
const VALID_AMBIG_STATE: f64 = 3.0;
const DYN_PROP_STATES: std::ops::RangeInclusive<f64> = 0.0..=6.0;

fn read_records(path: &Path, stride: usize) -> SweepResult<DMatrix<f64>> {
    let bytes = std::fs::read(path)?;
    let record_size = stride * 4;
    if bytes.len() % record_size != 0 {
        return Err(SweepError::malformed_file(
            path,
            format!(
                "{} bytes is not a whole number of {stride}-float records",
                bytes.len()
            ),
        ));
    }
    let count = bytes.len() / record_size;
    let points = DMatrix::from_fn(stride, count, |r, c| {
        let offset = c * record_size + r * 4;
        f64::from(f32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ]))
    });
    debug!(path = %path.display(), points = count, "loaded raw points");
    Ok(points)
}

/// Loads a LiDAR point file into a 5 x N cloud.
///
/// # Errors
///
/// Returns [`SweepError::Io`] if the file cannot be read and
/// [`SweepError::MalformedPointFile`] if its length is not a whole number
/// of records.
pub fn load_lidar(path: &Path) -> SweepResult<PointCloud> {
    Ok(PointCloud::from_matrix(read_records(path, LIDAR_RAW_DIMS)?))
}

/// Loads a radar point file into an 18 x N cloud.
///
/// With `use_filters` set, the dataset's validity filters run at load time:
/// returns with a nonzero invalid state, an unresolved ambiguity state, or
/// an unrecognized dynamic property are stripped before any other
/// processing.
///
/// # Errors
///
/// Returns [`SweepError::Io`] if the file cannot be read and
/// [`SweepError::MalformedPointFile`] if its length is not a whole number
/// of records.
pub fn load_radar(path: &Path, use_filters: bool) -> SweepResult<PointCloud> {
    let points = read_records(path, RADAR_RAW_DIMS)?;
    let cloud = PointCloud::from_matrix(points);
    if !use_filters {
        return Ok(cloud);
    }

    let keep: Vec<usize> = (0..cloud.len())
        .filter(|&j| {
            let m = cloud.matrix();
            m[(INVALID_STATE_ROW, j)] == VALID_INVALID_STATE
                && m[(AMBIG_STATE_ROW, j)] == VALID_AMBIG_STATE
                && DYN_PROP_STATES.contains(&m[(DYN_PROP_ROW, j)])
        })
        .collect();
    debug!(
        path = %path.display(),
        kept = keep.len(),
        total = cloud.len(),
        "applied radar validity filters"
    );
    Ok(cloud.select_columns(&keep))
}
