//! Radar sensor channel identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SweepError;

/// One of the five physical radar sensors.
///
/// [`RadarChannel::ALL`] fixes the engine's iteration order; aggregated
/// radar output is grouped by channel in exactly this order.
///
/// # Example
///
/// ```
/// use sweep_types::RadarChannel;
///
/// let channel: RadarChannel = "RADAR_BACK_RIGHT".parse().unwrap();
/// assert_eq!(channel, RadarChannel::BackRight);
/// assert!("RADAR_TOP".parse::<RadarChannel>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RadarChannel {
    /// `RADAR_BACK_RIGHT`
    #[serde(rename = "RADAR_BACK_RIGHT")]
    BackRight,
    /// `RADAR_BACK_LEFT`
    #[serde(rename = "RADAR_BACK_LEFT")]
    BackLeft,
    /// `RADAR_FRONT`
    #[serde(rename = "RADAR_FRONT")]
    Front,
    /// `RADAR_FRONT_LEFT`
    #[serde(rename = "RADAR_FRONT_LEFT")]
    FrontLeft,
    /// `RADAR_FRONT_RIGHT`
    #[serde(rename = "RADAR_FRONT_RIGHT")]
    FrontRight,
}

impl RadarChannel {
    /// All channels in the engine's fixed iteration order.
    pub const ALL: [Self; 5] = [
        Self::BackRight,
        Self::BackLeft,
        Self::Front,
        Self::FrontLeft,
        Self::FrontRight,
    ];

    /// Returns the dataset name of this channel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BackRight => "RADAR_BACK_RIGHT",
            Self::BackLeft => "RADAR_BACK_LEFT",
            Self::Front => "RADAR_FRONT",
            Self::FrontLeft => "RADAR_FRONT_LEFT",
            Self::FrontRight => "RADAR_FRONT_RIGHT",
        }
    }
}

impl fmt::Display for RadarChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RadarChannel {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.as_str() == s)
            .ok_or_else(|| SweepError::UnknownChannel(s.to_string()))
    }
}
