//! # Command interface crate.
//!
//! Provides the serialisable configuration of motion commands and scenarios,
//! shared between the trajectory generator and anything that writes command
//! files.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Motion command configurations
pub mod cmd;

/// Scenario (initial pose plus an ordered list of commands) definitions
pub mod scenario;
