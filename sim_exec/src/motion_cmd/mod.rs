//! # Motion commands
//!
//! A motion command synthesises the poses of one segment of a trajectory from a
//! small set of parameters and the pose the robot was in before the segment
//! starts (the "last pose").
//!
//! Parameters are changed through setters. Each setter validates its value
//! before touching the command, so an invalid value is rejected with an error
//! and leaves the previously computed poses in place. A valid value is stored
//! and, if the setter's `recompute` flag is set, the whole pose list is
//! synthesised again from scratch. Passing `recompute = false` allows several
//! parameters to be applied before a single recomputation.
//!
//! A command whose required parameters have not all been set yet is not in
//! error, it simply has no poses.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod linear;
mod rotation;

pub use linear::{LinearCommand, StartPosition};
pub use rotation::{RotationCommand, StartOrientation};

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{convert::TryFrom, fmt};

use cmd_if::cmd::{CmdParseError, CommandSpec, CommonConfig};
use log::trace;

use crate::pose::Pose;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Largest supported number of steps, leaving room for the extra point
/// interpolated when the first pose is elided.
pub const MAX_STEPS: usize = usize::MAX - 1;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// Function invoked by the orchestrator with the poses of a command once they
/// are ready to be consumed.
pub type Callback = Box<dyn FnMut(&[Pose])>;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors caused by an invalid command parameter.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Invalid value for steps: must be positive, found {0}")]
    NonPositiveSteps(i64),

    #[error("Invalid value for steps: must be at most {}, found {0}", MAX_STEPS)]
    TooManySteps(u64),

    #[error("Invalid value for {field}: must be finite, found {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Invalid value for {field}: {source}")]
    InvalidConfig {
        field: &'static str,
        source: CmdParseError,
    },

    #[error("The last pose must be finite, found {0:?}")]
    NonFiniteLastPose(Pose),
}

/// The closed set of motion commands.
pub enum Command {
    Rotation(RotationCommand),
    Linear(LinearCommand),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// State shared by every motion command.
pub struct CommandBase {
    /// Pose immediately preceding this command's trajectory
    last_pose: Pose,

    callback: Option<Callback>,

    /// Configuration keys carried for the simulator
    common: CommonConfig,

    poses: Vec<Pose>,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The contract of a motion command.
pub trait MotionCommand {
    fn base(&self) -> &CommandBase;

    fn base_mut(&mut self) -> &mut CommandBase;

    /// Synthesise the complete pose list from the current parameters.
    ///
    /// Must return an empty list if any required parameter is missing.
    fn synthesize(&self) -> Vec<Pose>;

    /// Replace the stored poses with a fresh synthesis.
    fn compute_poses(&mut self) {
        let poses = self.synthesize();

        trace!("Computed {} poses", poses.len());

        self.base_mut().poses = poses;
    }

    /// The currently synthesised trajectory.
    ///
    /// The slice borrows the command, so it can't outlive a later mutation.
    fn get_poses(&self) -> &[Pose] {
        &self.base().poses
    }

    /// True once all required parameters have been set and poses produced.
    fn is_complete(&self) -> bool {
        !self.get_poses().is_empty()
    }

    /// The pose the trajectory continues from.
    fn last_pose(&self) -> &Pose {
        &self.base().last_pose
    }

    /// The final pose of the synthesised trajectory, if there is one.
    fn final_pose(&self) -> Option<&Pose> {
        self.get_poses().last()
    }

    fn common(&self) -> &CommonConfig {
        &self.base().common
    }

    /// Invoke the callback (if any) with the current poses.
    ///
    /// Returns `true` if a callback was invoked.
    fn invoke_callback(&mut self) -> bool {
        self.base_mut().invoke_callback()
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CommandBase {
    pub fn new(common: CommonConfig, callback: Option<Callback>, last_pose: Pose) -> Self {
        Self {
            last_pose,
            callback,
            common,
            poses: Vec::new(),
        }
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    fn invoke_callback(&mut self) -> bool {
        match self.callback.as_mut() {
            Some(cb) => {
                cb(&self.poses);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for CommandBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBase")
            .field("last_pose", &self.last_pose)
            .field("has_callback", &self.has_callback())
            .field("common", &self.common)
            .field("num_poses", &self.poses.len())
            .finish()
    }
}

impl Command {
    /// Build the command described by `spec`, continuing from `last_pose`.
    pub fn from_spec(
        spec: CommandSpec,
        callback: Option<Callback>,
        last_pose: Pose,
    ) -> Result<Self, CommandError> {
        Ok(match spec {
            CommandSpec::Rotation(config) => {
                Command::Rotation(RotationCommand::new(&config, callback, last_pose)?)
            }
            CommandSpec::Linear(config) => {
                Command::Linear(LinearCommand::new(&config, callback, last_pose)?)
            }
        })
    }

    /// Name of the command kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Command::Rotation(_) => "rotation",
            Command::Linear(_) => "linear",
        }
    }
}

impl MotionCommand for Command {
    fn base(&self) -> &CommandBase {
        match self {
            Command::Rotation(c) => c.base(),
            Command::Linear(c) => c.base(),
        }
    }

    fn base_mut(&mut self) -> &mut CommandBase {
        match self {
            Command::Rotation(c) => c.base_mut(),
            Command::Linear(c) => c.base_mut(),
        }
    }

    fn synthesize(&self) -> Vec<Pose> {
        match self {
            Command::Rotation(c) => c.synthesize(),
            Command::Linear(c) => c.synthesize(),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Rotation(c) => fmt::Debug::fmt(c, f),
            Command::Linear(c) => fmt::Debug::fmt(c, f),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Check that `value` is finite, naming `field` in the error if it isn't.
fn check_finite(field: &'static str, value: f64) -> Result<f64, CommandError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CommandError::NonFinite { field, value })
    }
}

/// Convert a configured step count into a positive count.
fn check_steps(steps: i64) -> Result<usize, CommandError> {
    if steps <= 0 {
        return Err(CommandError::NonPositiveSteps(steps));
    }

    usize::try_from(steps)
        .map_err(|_| CommandError::TooManySteps(steps as u64))
        .and_then(check_step_count)
}

/// Check a step count is within `1..=MAX_STEPS`.
fn check_step_count(steps: usize) -> Result<usize, CommandError> {
    match steps {
        0 => Err(CommandError::NonPositiveSteps(0)),
        s if s > MAX_STEPS => Err(CommandError::TooManySteps(s as u64)),
        s => Ok(s),
    }
}

/// Check the pose a command continues from is usable.
fn check_last_pose(last_pose: Pose) -> Result<Pose, CommandError> {
    if last_pose.is_finite() {
        Ok(last_pose)
    } else {
        Err(CommandError::NonFiniteLastPose(last_pose))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use cmd_if::cmd::{LinearConfig, OrientationValue, RotationConfig};
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;

    #[test]
    fn test_from_spec_dispatch() -> Result<(), CommandError> {
        let last = Pose::from_xy_theta(1.0, 1.0, 0.0);

        let rot = Command::from_spec(
            CommandSpec::Rotation(RotationConfig {
                end_orientation: Some(PI),
                steps: Some(3),
                ..Default::default()
            }),
            None,
            last,
        )?;
        assert_eq!(rot.type_name(), "rotation");
        assert_eq!(rot.get_poses().len(), 3);

        let lin = Command::from_spec(
            CommandSpec::Linear(LinearConfig {
                end_position: Some([2.0, 1.0]),
                steps: Some(4),
                scans: Some(7),
                ..Default::default()
            }),
            None,
            last,
        )?;
        assert_eq!(lin.type_name(), "linear");
        assert_eq!(lin.get_poses().len(), 4);
        assert_eq!(lin.common().scans, Some(7));
        assert_eq!(lin.last_pose(), &last);

        Ok(())
    }

    #[test]
    fn test_callback_invoked_with_poses() -> Result<(), CommandError> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut cmd = Command::from_spec(
            CommandSpec::Rotation(RotationConfig {
                start_orientation: Some(OrientationValue::Scalar(0.0)),
                end_orientation: Some(0.0),
                steps: Some(2),
                ..Default::default()
            }),
            Some(Box::new(move |poses: &[Pose]| {
                sink.borrow_mut().extend_from_slice(poses)
            }) as Callback),
            Pose::default(),
        )?;

        // Building a command never calls back by itself
        assert!(seen.borrow().is_empty());

        assert!(cmd.invoke_callback());
        assert_eq!(seen.borrow().as_slice(), cmd.get_poses());

        Ok(())
    }

    #[test]
    fn test_no_callback() -> Result<(), CommandError> {
        let mut cmd = Command::from_spec(
            CommandSpec::Linear(LinearConfig::default()),
            None,
            Pose::default(),
        )?;

        assert!(!cmd.base().has_callback());
        assert!(!cmd.invoke_callback());
        assert!(!cmd.is_complete());
        assert_eq!(cmd.final_pose(), None);

        Ok(())
    }

    #[test]
    fn test_checks() {
        assert!(matches!(check_steps(0), Err(CommandError::NonPositiveSteps(0))));
        assert!(matches!(check_steps(-3), Err(CommandError::NonPositiveSteps(-3))));
        assert_eq!(check_steps(5).ok(), Some(5));
        assert_eq!(check_step_count(MAX_STEPS).ok(), Some(MAX_STEPS));
        assert!(matches!(
            check_step_count(usize::MAX),
            Err(CommandError::TooManySteps(_))
        ));
        assert!(matches!(check_step_count(0), Err(CommandError::NonPositiveSteps(0))));

        match check_finite("end_orientation", std::f64::NAN) {
            Err(CommandError::NonFinite { field, .. }) => assert_eq!(field, "end_orientation"),
            r => panic!("Expected a non-finite error, got {:?}", r),
        }
        assert_eq!(check_finite("x", 1.0).ok(), Some(1.0));

        let bad = Pose::from_xy_theta(0.0, std::f64::NAN, 0.0);
        assert!(matches!(check_last_pose(bad), Err(CommandError::NonFiniteLastPose(_))));
        assert_eq!(check_last_pose(Pose::default()).ok(), Some(Pose::default()));
    }

    #[test]
    fn test_non_finite_last_pose_rejected() {
        let last = Pose::from_xy_theta(std::f64::INFINITY, 0.0, 0.0);

        let lin = Command::from_spec(
            CommandSpec::Linear(LinearConfig {
                start_position: Some([0.0, 0.0]),
                end_position: Some([1.0, 0.0]),
                steps: Some(2),
                ..Default::default()
            }),
            None,
            last,
        );
        assert!(matches!(lin, Err(CommandError::NonFiniteLastPose(_))));

        let rot = Command::from_spec(
            CommandSpec::Rotation(RotationConfig {
                start_orientation: Some(OrientationValue::Scalar(0.0)),
                end_orientation: Some(1.0),
                steps: Some(2),
                ..Default::default()
            }),
            None,
            last,
        );
        assert!(matches!(rot, Err(CommandError::NonFiniteLastPose(_))));
    }
}
