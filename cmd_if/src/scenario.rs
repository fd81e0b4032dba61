//! # Scenarios
//!
//! A scenario describes a complete trajectory: the pose the robot starts in and
//! the ordered commands which move it from there.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cmd::{CmdParseError, CommandSpec};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A complete trajectory description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// The pose of the robot before the first command.
    #[serde(default)]
    pub initial_pose: InitialPose,

    /// The commands to execute, in order.
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

/// The starting pose of a scenario.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialPose {
    /// Position `[x, y]` in meters.
    pub position: [f64; 2],

    /// Orientation in radians.
    pub orientation: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Scenario {
    /// Parse a scenario from a JSON document.
    ///
    /// Each command is checked individually so that an unknown command type is
    /// reported as such rather than as a generic deserialisation failure.
    pub fn from_json(json_str: &str) -> Result<Self, CmdParseError> {
        let mut val: Value = serde_json::from_str(json_str).map_err(CmdParseError::InvalidJson)?;

        let commands = match val.get_mut("commands").map(Value::take) {
            Some(Value::Array(cmds)) => cmds
                .into_iter()
                .map(CommandSpec::from_value)
                .collect::<Result<Vec<_>, _>>()?,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(CmdParseError::InvalidType(String::from(
                    "Expected \"commands\" to be an array",
                )))
            }
        };

        let initial_pose = match val.get_mut("initial_pose").map(Value::take) {
            Some(Value::Null) | None => InitialPose::default(),
            Some(p) => serde_json::from_value(p).map_err(CmdParseError::InvalidJson)?,
        };

        Ok(Scenario {
            initial_pose,
            commands,
        })
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_scenario_from_json() -> Result<(), CmdParseError> {
        let scenario = Scenario::from_json(
            r#"{
                "initial_pose": {"position": [1.0, 2.0], "orientation": 0.5},
                "commands": [
                    {"type": "rotation", "end_orientation": 0.0, "steps": 5},
                    {"type": "linear", "end_position": [3.0, 2.0], "steps": 10}
                ]
            }"#,
        )?;

        assert_eq!(scenario.initial_pose.position, [1.0, 2.0]);
        assert_eq!(scenario.initial_pose.orientation, 0.5);
        assert_eq!(scenario.commands.len(), 2);
        assert_eq!(scenario.commands[0].type_name(), "rotation");
        assert_eq!(scenario.commands[1].type_name(), "linear");

        Ok(())
    }

    #[test]
    fn test_scenario_defaults() -> Result<(), CmdParseError> {
        let scenario = Scenario::from_json("{}")?;
        assert_eq!(scenario, Scenario::default());

        Ok(())
    }

    #[test]
    fn test_scenario_bad_command() {
        assert!(matches!(
            Scenario::from_json(r#"{"commands": [{"type": "hop"}]}"#),
            Err(CmdParseError::InvalidType(_))
        ));
        assert!(matches!(
            Scenario::from_json(r#"{"commands": 3}"#),
            Err(CmdParseError::InvalidType(_))
        ));
    }
}
