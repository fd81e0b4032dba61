//! # Rotation command
//!
//! Rotates the robot in place from a start orientation to an end orientation,
//! turning in a given direction, by linearly interpolating the angle.
//!
//! The end orientation is first shifted by whole turns so that the sweep from
//! start to end moves the requested way: a clockwise rotation always decreases
//! the orientation and a counter-clockwise one always increases it. Equal start
//! and end orientations give a stationary sequence of identical poses.
//!
//! When no start orientation is configured the rotation starts from the
//! orientation of the last pose. The first interpolated pose would then be a
//! copy of the last pose, which already ends the previous segment, so it is
//! dropped and one extra point is interpolated to keep the requested number of
//! poses.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use cmd_if::cmd::{Direction, RotationConfig};
use log::{debug, warn};
use util::maths;

use super::{
    check_finite, check_last_pose, check_step_count, check_steps, Callback, CommandBase,
    CommandError, MotionCommand,
};
use crate::pose::Pose;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Where the start orientation of a rotation came from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StartOrientation {
    /// Set explicitly, the pose at this orientation is emitted.
    Explicit(f64),

    /// Taken from the last pose, the pose at this orientation is elided.
    DefaultedFrom(f64),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Rotation in place about the last pose's position.
#[derive(Debug)]
pub struct RotationCommand {
    base: CommandBase,

    start_orientation: StartOrientation,

    /// Units: radians
    end_orientation_rad: Option<f64>,

    steps: Option<usize>,

    direction: Option<Direction>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl StartOrientation {
    /// The orientation in radians.
    pub fn value(&self) -> f64 {
        match self {
            StartOrientation::Explicit(v) | StartOrientation::DefaultedFrom(v) => *v,
        }
    }

    /// True if the first synthesised pose must be dropped.
    pub fn elides_first_pose(&self) -> bool {
        matches!(self, StartOrientation::DefaultedFrom(_))
    }
}

impl RotationCommand {
    /// Build a new rotation from its configuration, continuing from `last_pose`.
    ///
    /// Missing `end_orientation` or `steps` produce a command with no poses,
    /// which can be completed later through the setters.
    pub fn new(
        config: &RotationConfig,
        callback: Option<Callback>,
        last_pose: Pose,
    ) -> Result<Self, CommandError> {
        let last_pose = check_last_pose(last_pose)?;

        let start_orientation = match &config.start_orientation {
            Some(o) => StartOrientation::Explicit(check_finite(
                "start_orientation",
                o.to_rad().map_err(|source| CommandError::InvalidConfig {
                    field: "start_orientation",
                    source,
                })?,
            )?),
            None => {
                debug!(
                    "No start orientation given, continuing from the last pose ({} rad)",
                    last_pose.orientation_rad
                );
                StartOrientation::DefaultedFrom(last_pose.orientation_rad)
            }
        };

        let direction = match &config.dir {
            Some(d) => d.parse::<Direction>().map_err(|source| CommandError::InvalidConfig {
                field: "dir",
                source,
            })?,
            None => Direction::default(),
        };

        let mut cmd = Self {
            base: CommandBase::new(config.common(), callback, last_pose),
            start_orientation,
            end_orientation_rad: None,
            steps: None,
            direction: None,
        };

        // Apply everything without recomputing, then synthesise once
        cmd.set_direction(direction, false);
        if let Some(end) = config.end_orientation {
            cmd.set_end_orientation(end, false)?;
        }
        if let Some(steps) = config.steps {
            cmd.set_steps(check_steps(steps)?, false)?;
        }

        cmd.compute_poses();

        debug!(
            "New rotation: {:?} -> {:?} rad, {:?} steps, {}",
            cmd.start_orientation, cmd.end_orientation_rad, cmd.steps, direction
        );

        Ok(cmd)
    }

    /// Set an explicit start orientation.
    ///
    /// Since the start is now explicit the first pose is no longer elided.
    pub fn set_start_orientation(
        &mut self,
        orientation_rad: f64,
        recompute: bool,
    ) -> Result<(), CommandError> {
        let orientation_rad = check_finite("start_orientation", orientation_rad)?;

        self.start_orientation = StartOrientation::Explicit(orientation_rad);

        if recompute {
            self.compute_poses();
        }

        Ok(())
    }

    /// Start from the last pose's orientation again, eliding the first pose.
    pub fn default_start_orientation(&mut self, recompute: bool) {
        self.start_orientation =
            StartOrientation::DefaultedFrom(self.base.last_pose.orientation_rad);

        if recompute {
            self.compute_poses();
        }
    }

    pub fn set_end_orientation(
        &mut self,
        orientation_rad: f64,
        recompute: bool,
    ) -> Result<(), CommandError> {
        let orientation_rad = check_finite("end_orientation", orientation_rad)?;

        self.end_orientation_rad = Some(orientation_rad);

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

    pub fn set_direction(&mut self, direction: Direction, recompute: bool) {
        self.direction = Some(direction);

        if recompute {
            self.compute_poses();
        }
    }

    /// Shorthand for [`Self::set_direction`], `true` being clockwise.
    pub fn set_clockwise(&mut self, clockwise: bool, recompute: bool) {
        let direction = if clockwise {
            Direction::Cw
        } else {
            Direction::Ccw
        };

        self.set_direction(direction, recompute)
    }

    pub fn start_orientation(&self) -> StartOrientation {
        self.start_orientation
    }

    pub fn end_orientation_rad(&self) -> Option<f64> {
        self.end_orientation_rad
    }

    pub fn steps(&self) -> Option<usize> {
        self.steps
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn elide_first_pose(&self) -> bool {
        self.start_orientation.elides_first_pose()
    }
}

impl MotionCommand for RotationCommand {
    fn base(&self) -> &CommandBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CommandBase {
        &mut self.base
    }

    fn synthesize(&self) -> Vec<Pose> {
        let (end_rad, steps, direction) =
            match (self.end_orientation_rad, self.steps, self.direction) {
                (Some(e), Some(s), Some(d)) => (e, s, d),
                _ => return Vec::new(),
            };

        let start_rad = self.start_orientation.value();
        let end_rad = maths::unwrap_angle(start_rad, end_rad, direction.is_clockwise());

        if start_rad == end_rad {
            warn!(
                "Rotation sweeps no angle from {} rad, poses will be stationary",
                start_rad
            );
        }

        let elide = self.elide_first_pose();
        let num_points = if elide { steps + 1 } else { steps };

        let position_m = self.base.last_pose.position_m;

        maths::linspace(start_rad, end_rad, num_points)
            .into_iter()
            .skip(elide as usize)
            .map(|orientation_rad| Pose::new(position_m, orientation_rad))
            .collect()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
