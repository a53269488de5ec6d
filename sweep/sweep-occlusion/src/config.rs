//! Occlusion configuration.
//!
//! Configuration is immutable for the duration of one point-cloud
//! construction call. `validate()` rejects out-of-range parameters up front
//! so the per-sweep operators never see them.

use serde::{Deserialize, Serialize};

use sweep_types::{RadarChannel, SweepError, SweepResult};

use crate::region::Region;

/// The LiDAR corruption to apply to each sweep.
///
/// The three dropout flavors are mutually exclusive by construction; a call
/// picks exactly one (or none).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LidarDropout {
    /// Leave every sweep untouched.
    #[default]
    None,
    /// Uniform random dropout across the whole sweep.
    Random {
        /// Percentage of points to drop, in `[0, 100]`.
        percentage: f64,
    },
    /// Dropout restricted to one spatial region.
    Region {
        /// The affected region.
        region: Region,
        /// Percentage of the region's points to drop, in `[0, 100]`.
        percentage: f64,
    },
    /// Dropout restricted to an angular sector of one region.
    Sector {
        /// The affected region.
        region: Region,
        /// Sector width in degrees, in `(0, 360]`.
        angle_range: f64,
        /// Percentage of the sector's points to drop, in `[0, 100]`.
        percentage: f64,
    },
}

/// Occlusion configuration for LiDAR calls.
///
/// # Example
///
/// ```
/// use sweep_occlusion::{LidarOcclusion, Region};
///
/// let config = LidarOcclusion::random(60.0);
/// assert!(config.validate().is_ok());
///
/// let config = LidarOcclusion::sector(Region::Right, 90.0, 100.0);
/// assert!(config.validate().is_ok());
///
/// assert!(LidarOcclusion::random(150.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LidarOcclusion {
    /// The dropout operator to apply, if any.
    pub dropout: LidarDropout,
}

impl LidarOcclusion {
    /// No corruption at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            dropout: LidarDropout::None,
        }
    }

    /// Uniform random dropout at the given percentage.
    #[must_use]
    pub const fn random(percentage: f64) -> Self {
        Self {
            dropout: LidarDropout::Random { percentage },
        }
    }

    /// Spatial region drop.
    #[must_use]
    pub const fn region(region: Region, percentage: f64) -> Self {
        Self {
            dropout: LidarDropout::Region { region, percentage },
        }
    }

    /// Angle-sector drop.
    #[must_use]
    pub const fn sector(region: Region, angle_range: f64, percentage: f64) -> Self {
        Self {
            dropout: LidarDropout::Sector {
                region,
                angle_range,
                percentage,
            },
        }
    }

    /// Checks every parameter against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidArgument`] for a percentage outside
    /// `[0, 100]` or an angle range outside `(0, 360]`.
    pub fn validate(&self) -> SweepResult<()> {
        match self.dropout {
            LidarDropout::None => Ok(()),
            LidarDropout::Random { percentage } | LidarDropout::Region { percentage, .. } => {
                check_percentage(percentage)
            }
            LidarDropout::Sector {
                angle_range,
                percentage,
                ..
            } => {
                check_percentage(percentage)?;
                if angle_range > 0.0 && angle_range <= 360.0 {
                    Ok(())
                } else {
                    Err(SweepError::invalid_argument(format!(
                        "angle range must be in (0, 360], got {angle_range}"
                    )))
                }
            }
        }
    }
}

/// Which radar channels an operator targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelTarget {
    /// Operator disabled.
    #[default]
    None,
    /// One named channel.
    Channel(RadarChannel),
    /// Every active channel.
    All,
}

impl ChannelTarget {
    /// Returns true if the operator applies to the given channel.
    #[must_use]
    pub fn applies_to(self, channel: RadarChannel) -> bool {
        match self {
            Self::None => false,
            Self::Channel(c) => c == channel,
            Self::All => true,
        }
    }
}

/// Occlusion configuration for radar calls.
///
/// Operators run in the documented fixed order: channel exclusion (before
/// any sweep processing), random dropout, Gaussian noise, RCS scaling.
///
/// # Example
///
/// ```
/// use sweep_occlusion::{ChannelTarget, RadarOcclusion};
/// use sweep_types::RadarChannel;
///
/// let config = RadarOcclusion::default()
///     .with_excluded(vec![RadarChannel::BackRight])
///     .with_dropout(ChannelTarget::All, 25.0)
///     .with_noise(ChannelTarget::Channel(RadarChannel::Front), 0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadarOcclusion {
    /// Channels removed from the active list before any sweep processing.
    pub exclude: Vec<RadarChannel>,

    /// Replace `exclude` with one channel drawn uniformly at random.
    /// Takes precedence over the explicit list when set.
    pub random_single_channel_drop: bool,

    /// Dropout target.
    pub drop_target: ChannelTarget,

    /// Percentage of points to drop from targeted channels, in `[0, 100]`.
    pub drop_percentage: f64,

    /// Gaussian noise target.
    pub noise_target: ChannelTarget,

    /// Standard deviation of the position noise; non-positive disables it.
    pub noise_std: f64,

    /// RCS scale factor; `None` leaves RCS untouched.
    pub rcs_scale: Option<f64>,
}

impl RadarOcclusion {
    /// No corruption at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the excluded channel list.
    #[must_use]
    pub fn with_excluded(mut self, channels: Vec<RadarChannel>) -> Self {
        self.exclude = channels;
        self
    }

    /// Enables random single-channel exclusion.
    #[must_use]
    pub fn with_random_single_channel_drop(mut self) -> Self {
        self.random_single_channel_drop = true;
        self
    }

    /// Sets the dropout target and percentage.
    #[must_use]
    pub fn with_dropout(mut self, target: ChannelTarget, percentage: f64) -> Self {
        self.drop_target = target;
        self.drop_percentage = percentage;
        self
    }

    /// Sets the noise target and standard deviation.
    #[must_use]
    pub fn with_noise(mut self, target: ChannelTarget, std: f64) -> Self {
        self.noise_target = target;
        self.noise_std = std;
        self
    }

    /// Sets the RCS scale factor.
    #[must_use]
    pub fn with_rcs_scale(mut self, scale: f64) -> Self {
        self.rcs_scale = Some(scale);
        self
    }

    /// Checks every parameter against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidArgument`] for a drop percentage outside
    /// `[0, 100]` or a non-finite noise std or RCS scale.
    pub fn validate(&self) -> SweepResult<()> {
        if !matches!(self.drop_target, ChannelTarget::None) {
            check_percentage(self.drop_percentage)?;
        }
        if !self.noise_std.is_finite() {
            return Err(SweepError::invalid_argument(format!(
                "noise std must be finite, got {}",
                self.noise_std
            )));
        }
        if let Some(scale) = self.rcs_scale {
            if !scale.is_finite() {
                return Err(SweepError::invalid_argument(format!(
                    "rcs scale must be finite, got {scale}"
                )));
            }
        }
        Ok(())
    }
}

fn check_percentage(percentage: f64) -> SweepResult<()> {
    if (0.0..=100.0).contains(&percentage) {
        Ok(())
    } else {
        Err(SweepError::invalid_argument(format!(
            "drop percentage must be in [0, 100], got {percentage}"
        )))
    }
}
