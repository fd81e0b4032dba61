//! # Trajectory
//!
//! A trajectory is a linear chain of motion commands. Each command continues
//! from the final pose of the previous one (or from the initial pose for the
//! first command), so that the concatenation of all commands' poses is a
//! continuous sequence.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use cmd_if::{cmd::CommandSpec, scenario::Scenario};
use log::{debug, info};

use crate::{
    motion_cmd::{Callback, Command, CommandError, MotionCommand},
    pose::Pose,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An ordered chain of motion commands.
#[derive(Debug)]
pub struct Trajectory {
    initial_pose: Pose,
    commands: Vec<Command>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TrajectoryError {
    #[error("Command {index} ({cmd_type}) is invalid: {source}")]
    InvalidCommand {
        index: usize,
        cmd_type: &'static str,
        source: CommandError,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Trajectory {
    /// Create a new empty trajectory starting at the given pose.
    pub fn new(initial_pose: Pose) -> Self {
        Self {
            initial_pose,
            commands: Vec::new(),
        }
    }

    /// Build the trajectory described by a scenario, without callbacks.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, TrajectoryError> {
        Self::from_scenario_with(scenario, |_, _| None)
    }

    /// Build the trajectory described by a scenario, asking `make_callback` for
    /// the callback of each command given its index and `CommandSpec`.
    pub fn from_scenario_with<F>(
        scenario: &Scenario,
        mut make_callback: F,
    ) -> Result<Self, TrajectoryError>
    where
        F: FnMut(usize, &CommandSpec) -> Option<Callback>,
    {
        let mut traj = Self::new(Pose::from(scenario.initial_pose));

        for (i, spec) in scenario.commands.iter().enumerate() {
            let callback = make_callback(i, spec);
            traj.push(spec.clone(), callback)?;
        }

        info!(
            "Built trajectory of {} commands and {} poses",
            traj.num_commands(),
            traj.num_poses()
        );

        Ok(traj)
    }

    /// Append a new command, continuing from the current end of the trajectory.
    pub fn push(
        &mut self,
        spec: CommandSpec,
        callback: Option<Callback>,
    ) -> Result<&Command, TrajectoryError> {
        let index = self.commands.len();
        let cmd_type = spec.type_name();
        let last_pose = self.end_pose();

        let cmd = Command::from_spec(spec, callback, last_pose).map_err(|source| {
            TrajectoryError::InvalidCommand {
                index,
                cmd_type,
                source,
            }
        })?;

        debug!(
            "Command {} ({}) produced {} poses",
            index,
            cmd_type,
            cmd.get_poses().len()
        );

        self.commands.push(cmd);

        Ok(&self.commands[index])
    }

    /// The pose the next command would continue from.
    ///
    /// Commands without poses don't move the robot, so they are skipped.
    pub fn end_pose(&self) -> Pose {
        self.commands
            .iter()
            .rev()
            .find_map(|c| c.final_pose())
            .copied()
            .unwrap_or(self.initial_pose)
    }

    pub fn initial_pose(&self) -> &Pose {
        &self.initial_pose
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn num_commands(&self) -> usize {
        self.commands.len()
    }

    /// Iterate over the poses of every command, in order.
    pub fn poses(&self) -> impl Iterator<Item = &Pose> + '_ {
        self.commands.iter().flat_map(|c| c.get_poses().iter())
    }

    pub fn num_poses(&self) -> usize {
        self.commands.iter().map(|c| c.get_poses().len()).sum()
    }

    /// Hand each command's poses to its callback, in order.
    ///
    /// Returns the number of callbacks invoked.
    pub fn run(&mut self) -> usize {
        self.commands
            .iter_mut()
            .map(|c| c.invoke_callback())
            .filter(|&invoked| invoked)
            .count()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
