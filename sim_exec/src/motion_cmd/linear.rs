//! # Linear command
//!
//! Moves the robot along a straight line between two positions, facing the
//! direction of travel, by linearly interpolating the position.
//!
//! As with rotations, when no start position is configured the movement starts
//! from the last pose's position and the first interpolated pose is dropped.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use cmd_if::cmd::LinearConfig;
use log::{debug, warn};
use nalgebra::Vector2;
use util::maths;

use super::{
    check_finite, check_last_pose, check_step_count, check_steps, Callback, CommandBase,
    CommandError, MotionCommand,
};
use crate::pose::Pose;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Movements shorter than this are treated as stationary and keep the last
/// pose's orientation.
///
/// Units: meters
const MIN_MOVE_DIST_M: f64 = 1e-12;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Where the start position of a linear movement came from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StartPosition {
    /// Set explicitly, the pose at this position is emitted.
    Explicit(Vector2<f64>),

    /// Taken from the last pose, the pose at this position is elided.
    DefaultedFrom(Vector2<f64>),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Straight line translation.
#[derive(Debug)]
pub struct LinearCommand {
    base: CommandBase,

    start_position: StartPosition,

    /// Units: meters
    end_position_m: Option<Vector2<f64>>,

    steps: Option<usize>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl StartPosition {
    pub fn value(&self) -> Vector2<f64> {
        match self {
            StartPosition::Explicit(v) | StartPosition::DefaultedFrom(v) => *v,
        }
    }

    pub fn elides_first_pose(&self) -> bool {
        matches!(self, StartPosition::DefaultedFrom(_))
    }
}

impl LinearCommand {
    /// Build a new linear movement from its configuration, continuing from
    /// `last_pose`.
    pub fn new(
        config: &LinearConfig,
        callback: Option<Callback>,
        last_pose: Pose,
    ) -> Result<Self, CommandError> {
        let last_pose = check_last_pose(last_pose)?;

        let start_position = match config.start_position {
            Some(p) => StartPosition::Explicit(check_position("start_position", p)?),
            None => {
                debug!(
                    "No start position given, continuing from the last pose ({}, {})",
                    last_pose.x_m(),
                    last_pose.y_m()
                );
                StartPosition::DefaultedFrom(last_pose.position_m)
            }
        };

        let mut cmd = Self {
            base: CommandBase::new(config.common(), callback, last_pose),
            start_position,
            end_position_m: None,
            steps: None,
        };

        if let Some(end) = config.end_position {
            cmd.set_end_position(end, false)?;
        }
        if let Some(steps) = config.steps {
            cmd.set_steps(check_steps(steps)?, false)?;
        }

        cmd.compute_poses();

        debug!(
            "New linear movement: {:?} -> {:?} m, {:?} steps",
            cmd.start_position, cmd.end_position_m, cmd.steps
        );

        Ok(cmd)
    }

    /// Set an explicit start position, the first pose is no longer elided.
    pub fn set_start_position(
        &mut self,
        position_m: [f64; 2],
        recompute: bool,
    ) -> Result<(), CommandError> {
        self.start_position =
            StartPosition::Explicit(check_position("start_position", position_m)?);

        if recompute {
            self.compute_poses();
        }

        Ok(())
    }

    /// Start from the last pose's position again, eliding the first pose.
    pub fn default_start_position(&mut self, recompute: bool) {
        self.start_position = StartPosition::DefaultedFrom(self.base.last_pose.position_m);

        if recompute {
            self.compute_poses();
        }
    }

    pub fn set_end_position(
        &mut self,
        position_m: [f64; 2],
        recompute: bool,
    ) -> Result<(), CommandError> {
        self.end_position_m = Some(check_position("end_position", position_m)?);

        if recompute {
            self.compute_poses();
        }

        Ok(())
    }

    /// Set the number of poses to produce, which must be positive.
    pub fn set_steps(&mut self, steps: usize, recompute: bool) -> Result<(), CommandError> {
        self.steps = Some(check_step_count(steps)?);

        if recompute {
            self.compute_poses();
        }

        Ok(())
    }

    pub fn start_position(&self) -> StartPosition {
        self.start_position
    }

    pub fn end_position_m(&self) -> Option<Vector2<f64>> {
        self.end_position_m
    }

    pub fn steps(&self) -> Option<usize> {
        self.steps
    }

    pub fn elide_first_pose(&self) -> bool {
        self.start_position.elides_first_pose()
    }
}

impl MotionCommand for LinearCommand {
    fn base(&self) -> &CommandBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CommandBase {
        &mut self.base
    }

    fn synthesize(&self) -> Vec<Pose> {
        let (end_m, steps) = match (self.end_position_m, self.steps) {
            (Some(e), Some(s)) => (e, s),
            _ => return Vec::new(),
        };

        let start_m = self.start_position.value();
        let diff_m = end_m - start_m;

        // Face the direction of travel
        let heading_rad = if diff_m.norm() > MIN_MOVE_DIST_M {
            diff_m[1].atan2(diff_m[0])
        } else {
            warn!(
                "Linear movement start and end positions coincide at {:?}, poses will be stationary",
                start_m
            );
            self.base.last_pose.orientation_rad
        };

        let elide = self.elide_first_pose();
        let num_points = if elide { steps + 1 } else { steps };

        let xs = maths::linspace(start_m[0], end_m[0], num_points);
        let ys = maths::linspace(start_m[1], end_m[1], num_points);

        xs.into_iter()
            .zip(ys)
            .skip(elide as usize)
            .map(|(x, y)| Pose::from_xy_theta(x, y, heading_rad))
            .collect()
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn check_position(field: &'static str, position_m: [f64; 2]) -> Result<Vector2<f64>, CommandError> {
    check_finite(field, position_m[0])?;
    check_finite(field, position_m[1])?;

    Ok(Vector2::new(position_m[0], position_m[1]))
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    fn config(end: [f64; 2], steps: i64) -> LinearConfig {
        LinearConfig {
            end_position: Some(end),
            steps: Some(steps),
            ..Default::default()
        }
    }

    fn assert_positions(poses: &[Pose], expected: &[[f64; 2]]) {
        assert_eq!(poses.len(), expected.len());
        for (p, e) in poses.iter().zip(expected.iter()) {
            assert!(
                (p.x_m() - e[0]).abs() < 1e-9 && (p.y_m() - e[1]).abs() < 1e-9,
                "{:?} != {:?}",
                p,
                e
            );
        }
    }

    #[test]
    fn test_from_last_pose() -> Result<(), CommandError> {
        let last = Pose::from_xy_theta(1.0, 1.0, 0.0);
        let cmd = LinearCommand::new(&config([1.0, 4.0], 3), None, last)?;

        assert!(cmd.elide_first_pose());
        assert_positions(cmd.get_poses(), &[[1.0, 2.0], [1.0, 3.0], [1.0, 4.0]]);
        assert!(cmd
            .get_poses()
            .iter()
            .all(|p| (p.orientation_rad - PI / 2.0).abs() < 1e-12));

        Ok(())
    }

    #[test]
    fn test_explicit_start() -> Result<(), CommandError> {
        let mut conf = config([-2.0, 0.0], 3);
        conf.start_position = Some([0.0, 0.0]);

        let cmd = LinearCommand::new(&conf, None, Pose::from_xy_theta(5.0, 5.0, 0.0))?;

        assert!(!cmd.elide_first_pose());
        assert_positions(cmd.get_poses(), &[[0.0, 0.0], [-1.0, 0.0], [-2.0, 0.0]]);
        assert!(cmd
            .get_poses()
            .iter()
            .all(|p| (p.orientation_rad - PI).abs() < 1e-12));

        Ok(())
    }

    #[test]
    fn test_stationary_keeps_orientation() -> Result<(), CommandError> {
        let last = Pose::from_xy_theta(1.0, 1.0, 0.7);
        let cmd = LinearCommand::new(&config([1.0, 1.0], 2), None, last)?;

        assert_eq!(cmd.get_poses(), &[last, last]);

        Ok(())
    }

    #[test]
    fn test_incomplete_and_mutation() -> Result<(), CommandError> {
        let last = Pose::from_xy_theta(0.0, 0.0, 0.0);
        let mut cmd = LinearCommand::new(&LinearConfig::default(), None, last)?;
        assert!(cmd.get_poses().is_empty());

        cmd.set_end_position([2.0, 2.0], false)?;
        cmd.set_steps(2, true)?;
        assert_eq!(
            cmd.get_poses(),
            LinearCommand::new(&config([2.0, 2.0], 2), None, last)?.get_poses()
        );

        cmd.set_start_position([1.0, 0.0], true)?;
        let mut conf = config([2.0, 2.0], 2);
        conf.start_position = Some([1.0, 0.0]);
        assert_eq!(
            cmd.get_poses(),
            LinearCommand::new(&conf, None, last)?.get_poses()
        );

        cmd.default_start_position(true);
        assert!(cmd.elide_first_pose());
        assert_positions(cmd.get_poses(), &[[1.0, 1.0], [2.0, 2.0]]);

        Ok(())
    }

    #[test]
    fn test_invalid_values() -> Result<(), CommandError> {
        assert!(matches!(
            LinearCommand::new(&config([1.0, 1.0], 0), None, Pose::default()),
            Err(CommandError::NonPositiveSteps(0))
        ));
        assert!(matches!(
            LinearCommand::new(&config([std::f64::NAN, 1.0], 2), None, Pose::default()),
            Err(CommandError::NonFinite { field: "end_position", .. })
        ));

        let mut cmd = LinearCommand::new(&config([1.0, 1.0], 2), None, Pose::default())?;
        let before = cmd.get_poses().to_vec();
        assert!(cmd.set_start_position([0.0, std::f64::INFINITY], true).is_err());
        assert!(cmd.set_steps(0, true).is_err());
        assert!(matches!(
            cmd.set_steps(usize::MAX, true),
            Err(CommandError::TooManySteps(_))
        ));
        assert_eq!(cmd.steps(), Some(2));
        assert_eq!(cmd.get_poses(), before.as_slice());
        assert_eq!(cmd.start_position(), StartPosition::DefaultedFrom(Vector2::zeros()));

        Ok(())
    }
}
