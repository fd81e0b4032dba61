//! # Trajectory generation library.
//!
//! Synthesises noiseless ground truth pose sequences for the map simulator. A
//! trajectory is built from a chain of motion commands, each of which produces
//! the poses of one segment starting from where the previous segment ended.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Pose - position and orientation of the robot in the map plane
pub mod pose;

/// Motion commands - synthesise the poses of a single trajectory segment
pub mod motion_cmd;

/// Trajectory - chains motion commands into a complete trajectory
pub mod trajectory;
