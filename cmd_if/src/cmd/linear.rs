//! Linear (straight line translation) command configuration

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::CommonConfig;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Configuration of a straight line movement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConfig {
    /// Position `[x, y]` to start from, in meters.
    ///
    /// When absent the position of the pose preceding the command is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<[f64; 2]>,

    /// Position `[x, y]` to finish at, in meters. Required.
    pub end_position: Option<[f64; 2]>,

    /// Number of poses to produce. Required, must be positive.
    pub steps: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deterministic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scans: Option<u32>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LinearConfig {
    pub fn common(&self) -> CommonConfig {
        CommonConfig {
            deterministic: self.deterministic,
            scans: self.scans,
        }
    }
}
