//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Environment variable pointing at the root of the simulator software.
pub const SIM_ROOT_ENV_VAR: &str = "MAP_SIM_ROOT";

/// Retrieve the root directory of the simulator software.
///
/// Uses `MAP_SIM_ROOT` if it is set, otherwise the current working directory.
pub fn get_sim_root() -> std::io::Result<PathBuf> {
    match env::var_os(SIM_ROOT_ENV_VAR) {
        Some(root) => Ok(PathBuf::from(root)),
        None => env::current_dir()
    }
}
