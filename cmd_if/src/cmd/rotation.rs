//! Rotation command configuration

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::{CommonConfig, OrientationValue};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Configuration of a rotation in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Orientation to start the rotation from, in radians.
    ///
    /// When absent the orientation of the pose preceding the command is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_orientation: Option<OrientationValue>,

    /// Orientation to finish the rotation at, in radians. Required.
    pub end_orientation: Option<f64>,

    /// Number of poses to produce. Required, must be positive.
    pub steps: Option<i64>,

    /// Direction of turning, `"cw"` (default) or `"ccw"`, in any case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deterministic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scans: Option<u32>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RotationConfig {
    pub fn common(&self) -> CommonConfig {
        CommonConfig {
            deterministic: self.deterministic,
            scans: self.scans,
        }
    }
}
