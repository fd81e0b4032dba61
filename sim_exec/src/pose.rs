//! # Pose
//!
//! The 2D pose (position and orientation in the map frame) of the simulated
//! robot.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use cmd_if::scenario::InitialPose;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// The pose of the robot in the map frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {
    /// The position in the map frame.
    ///
    /// Units: meters
    pub position_m: Vector2<f64>,

    /// The orientation (heading, angle to the positive map X axis).
    ///
    /// Units: radians
    pub orientation_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Pose {
    pub fn new(position_m: Vector2<f64>, orientation_rad: f64) -> Self {
        Self {
            position_m,
            orientation_rad,
        }
    }

    /// Build a pose from its individual components.
    pub fn from_xy_theta(x_m: f64, y_m: f64, orientation_rad: f64) -> Self {
        Self::new(Vector2::new(x_m, y_m), orientation_rad)
    }

    pub fn x_m(&self) -> f64 {
        self.position_m[0]
    }

    pub fn y_m(&self) -> f64 {
        self.position_m[1]
    }

    /// True if neither the position nor the orientation contain NaN or infinite values.
    pub fn is_finite(&self) -> bool {
        self.position_m.iter().all(|v| v.is_finite()) && self.orientation_rad.is_finite()
    }
}

impl From<InitialPose> for Pose {
    fn from(p: InitialPose) -> Self {
        Self::from_xy_theta(p.position[0], p.position[1], p.orientation)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pose() {
        let p = Pose::from_xy_theta(1.0, -2.0, 0.5);
        assert_eq!(p.x_m(), 1.0);
        assert_eq!(p.y_m(), -2.0);
        assert!(p.is_finite());

        assert!(!Pose::from_xy_theta(std::f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Pose::from_xy_theta(0.0, 0.0, std::f64::INFINITY).is_finite());

        let init = InitialPose {
            position: [3.0, 4.0],
            orientation: 1.0,
        };
        assert_eq!(Pose::from(init), Pose::from_xy_theta(3.0, 4.0, 1.0));
    }
}
