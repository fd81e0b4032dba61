//! # Motion command configurations
//!
//! Each motion command is configured by a flat key/value mapping. The mapping is
//! deserialised into a typed configuration in which every key is optional, so
//! that a partially specified command can still be represented. Checking that
//! the values make sense (positive step counts, finite angles, a recognised
//! direction) is left to the command that consumes the configuration.
//!
//! Keys which are not recognised are ignored.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod linear;
mod rotation;

pub use linear::LinearConfig;
pub use rotation::RotationConfig;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use serde_json::{self, Value};
use std::{fmt, str::FromStr};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// STATICS
// ------------------------------------------------------------------------------------------------

/// The recognised values of the `type` key of a command.
static COMMAND_TYPES: [&str; 2] = ["rotation", "linear"];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A motion command configuration, tagged by the kind of movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandSpec {
    /// Rotate in place between two orientations.
    Rotation(RotationConfig),

    /// Translate in a straight line between two positions.
    Linear(LinearConfig),
}

/// Direction of a rotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise, i.e. decreasing orientation.
    Cw,

    /// Counter-clockwise, i.e. increasing orientation.
    Ccw,
}

/// An orientation as written in a configuration.
///
/// Orientations may be given either as a bare number or as a sequence holding
/// exactly one number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrientationValue {
    Scalar(f64),
    Sequence(Vec<f64>),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum CmdParseError {
    #[error("Command contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Command has an invalid type ({0})")]
    InvalidType(String),

    #[error("Unrecognised rotation direction \"{0}\", expected \"cw\" or \"ccw\"")]
    InvalidDirection(String),

    #[error("Expected an orientation sequence with exactly one element, found {0} elements")]
    InvalidOrientationSequence(usize),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Configuration keys shared by every command kind.
///
/// These are not used to synthesise poses, they are carried for the simulator
/// which consumes the command.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Overrides the simulator's general deterministic setting for this move.
    pub deterministic: Option<bool>,

    /// Overrides the simulator's general number of scans per move.
    pub scans: Option<u32>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CommandSpec {
    /// Parse a new command from a JSON object.
    pub fn from_json(json_str: &str) -> Result<Self, CmdParseError> {
        let val: Value = serde_json::from_str(json_str).map_err(CmdParseError::InvalidJson)?;

        Self::from_value(val)
    }

    /// Parse a new command from an already parsed JSON value.
    pub fn from_value(val: Value) -> Result<Self, CmdParseError> {
        // Check the type first so that an unknown command gets a readable error
        let cmd_type = match val["type"].as_str() {
            Some(s) => s,
            None => {
                return Err(CmdParseError::InvalidType(String::from(
                    "Expected \"type\" to be a string",
                )))
            }
        };

        if !COMMAND_TYPES.contains(&cmd_type) {
            return Err(CmdParseError::InvalidType(format!(
                "{} is not a recognised command type",
                cmd_type
            )));
        }

        serde_json::from_value(val).map_err(CmdParseError::InvalidJson)
    }

    /// Name of the command kind, as used in the `type` key.
    pub fn type_name(&self) -> &'static str {
        match self {
            CommandSpec::Rotation(_) => "rotation",
            CommandSpec::Linear(_) => "linear",
        }
    }

    /// The keys shared by all command kinds.
    pub fn common(&self) -> CommonConfig {
        match self {
            CommandSpec::Rotation(c) => c.common(),
            CommandSpec::Linear(c) => c.common(),
        }
    }
}

impl Direction {
    pub fn is_clockwise(&self) -> bool {
        matches!(self, Direction::Cw)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Cw
    }
}

impl FromStr for Direction {
    type Err = CmdParseError;

    /// Parse a direction, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cw" => Ok(Direction::Cw),
            "ccw" => Ok(Direction::Ccw),
            _ => Err(CmdParseError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Cw => write!(f, "cw"),
            Direction::Ccw => write!(f, "ccw"),
        }
    }
}

impl OrientationValue {
    /// Get the orientation in radians.
    pub fn to_rad(&self) -> Result<f64, CmdParseError> {
        match self {
            OrientationValue::Scalar(v) => Ok(*v),
            OrientationValue::Sequence(seq) if seq.len() == 1 => Ok(seq[0]),
            OrientationValue::Sequence(seq) => {
                Err(CmdParseError::InvalidOrientationSequence(seq.len()))
            }
        }
    }
}

impl From<f64> for OrientationValue {
    fn from(v: f64) -> Self {
        OrientationValue::Scalar(v)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_rotation() -> Result<(), CmdParseError> {
        let spec = CommandSpec::from_json(
            r#"{"type": "rotation", "end_orientation": 3.0, "steps": 3, "dir": "CCW",
                "scans": 2, "colour": "red"}"#,
        )?;

        match spec {
            CommandSpec::Rotation(ref c) => {
                assert_eq!(c.start_orientation, None);
                assert_eq!(c.end_orientation, Some(3.0));
                assert_eq!(c.steps, Some(3));
                assert_eq!(c.dir.as_deref(), Some("CCW"));
            }
            _ => panic!("Expected a rotation, got {:?}", spec),
        }

        assert_eq!(spec.type_name(), "rotation");
        assert_eq!(
            spec.common(),
            CommonConfig {
                deterministic: None,
                scans: Some(2)
            }
        );

        Ok(())
    }

    #[test]
    fn test_parse_linear() -> Result<(), CmdParseError> {
        let spec = CommandSpec::from_json(
            r#"{"type": "linear", "end_position": [1.0, 2.0], "steps": 4, "deterministic": true}"#,
        )?;

        match spec {
            CommandSpec::Linear(ref c) => {
                assert_eq!(c.start_position, None);
                assert_eq!(c.end_position, Some([1.0, 2.0]));
                assert_eq!(c.steps, Some(4));
                assert_eq!(c.deterministic, Some(true));
            }
            _ => panic!("Expected a linear command, got {:?}", spec),
        }

        Ok(())
    }

    #[test]
    fn test_bad_type() {
        assert!(matches!(
            CommandSpec::from_json(r#"{"type": "teleport", "steps": 1}"#),
            Err(CmdParseError::InvalidType(_))
        ));
        assert!(matches!(
            CommandSpec::from_json(r#"{"steps": 1}"#),
            Err(CmdParseError::InvalidType(_))
        ));
        assert!(matches!(
            CommandSpec::from_json("{not json"),
            Err(CmdParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_direction() {
        assert_eq!("cw".parse::<Direction>().ok(), Some(Direction::Cw));
        assert_eq!("CW".parse::<Direction>().ok(), Some(Direction::Cw));
        assert_eq!("cCw".parse::<Direction>().ok(), Some(Direction::Ccw));
        assert!(matches!(
            "left".parse::<Direction>(),
            Err(CmdParseError::InvalidDirection(_))
        ));
        assert_eq!(Direction::default(), Direction::Cw);
        assert!(!Direction::Ccw.is_clockwise());
    }

    #[test]
    fn test_orientation_value() {
        assert_eq!(OrientationValue::Scalar(1.5).to_rad().ok(), Some(1.5));
        assert_eq!(OrientationValue::Sequence(vec![0.5]).to_rad().ok(), Some(0.5));
        assert!(matches!(
            OrientationValue::Sequence(vec![0.5, 1.0]).to_rad(),
            Err(CmdParseError::InvalidOrientationSequence(2))
        ));
        assert!(OrientationValue::Sequence(vec![]).to_rad().is_err());

        let v: OrientationValue = serde_json::from_str("[2.0]").unwrap();
        assert_eq!(v, OrientationValue::Sequence(vec![2.0]));
        let v: OrientationValue = serde_json::from_str("2").unwrap();
        assert_eq!(v, OrientationValue::Scalar(2.0));
    }
}
