//! Trajectory generator executable.
//!
//! Builds the ground truth trajectory described by a scenario file and writes
//! every pose of it out, for the map simulator to consume.
//!
//! # Usage
//!
//! ```text
//! traj_gen <scenario> [--output <file>] [--format csv|json] [--log-level <level>]
//! ```
//!
//! Scenarios ending in `.json` are read as JSON, anything else as TOML. If no
//! output file is given the poses are written into the session's archive
//! directory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use structopt::StructOpt;

// Internal
use cmd_if::scenario::Scenario;
use sim_lib::{motion_cmd::Callback, pose::Pose, trajectory::Trajectory};
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Generate ground truth robot trajectories for the map simulator.
#[derive(Debug, StructOpt)]
#[structopt(name = "traj_gen")]
struct Opt {
    /// The scenario file (TOML or JSON) describing the trajectory
    #[structopt(parse(from_os_str))]
    scenario: PathBuf,

    /// File to write the poses to, defaults to the session's archive directory
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Output format, `csv` or `json`
    #[structopt(short, long, default_value = "csv")]
    format: OutputFormat,

    /// Minimum log level, one of `info`, `debug` or `trace`
    #[structopt(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[derive(Debug, Copy, Clone)]
enum OutputFormat {
    Csv,
    Json,
}

/// A single row of the CSV output.
#[derive(Serialize)]
struct PoseRecord {
    index: usize,
    x_m: f64,
    y_m: f64,
    orientation_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format \"{}\", expected csv or json", s)),
        }
    }
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl PoseRecord {
    fn new(index: usize, pose: &Pose) -> Self {
        Self {
            index,
            x_m: pose.x_m(),
            y_m: pose.y_m(),
            orientation_rad: pose.orientation_rad,
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("traj_gen", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opt.log_level, &session).wrap_err("Failed to initialise logging")?;

    info!("Map Simulator Trajectory Generator\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opt);

    // ---- LOAD SCENARIO ----

    let scenario = load_scenario(&opt.scenario)
        .wrap_err_with(|| format!("Could not load the scenario {:?}", opt.scenario))?;

    info!(
        "Scenario loaded: {} commands starting from {:?}",
        scenario.commands.len(),
        scenario.initial_pose
    );

    // ---- BUILD TRAJECTORY ----

    let mut traj = Trajectory::from_scenario_with(&scenario, |i, spec| {
        let cmd_type = spec.type_name();
        Some(Box::new(move |poses: &[Pose]| {
            debug!("Segment {} ({}) complete with {} poses", i, cmd_type, poses.len())
        }) as Callback)
    })
    .wrap_err("Failed to build the trajectory")?;

    if traj.num_poses() == 0 {
        return Err(eyre!("The scenario does not produce any poses"));
    }

    traj.run();

    // ---- WRITE OUTPUT ----

    let output_path = match opt.output {
        Some(ref p) => p.clone(),
        None => session
            .arch_root
            .join(format!("trajectory.{}", opt.format.extension())),
    };

    match opt.format {
        OutputFormat::Csv => {
            let mut arch = Archiver::from_file(&output_path)
                .wrap_err("Failed to create the output archive")?;

            for (i, pose) in traj.poses().enumerate() {
                arch.serialise(PoseRecord::new(i, pose))
                    .wrap_err("Failed to write a pose")?;
            }

            arch.flush().wrap_err("Failed to flush the output archive")?;
        }
        OutputFormat::Json => {
            let poses: Vec<&Pose> = traj.poses().collect();
            let json = serde_json::to_string_pretty(&poses)
                .wrap_err("Failed to serialise the poses")?;
            fs::write(&output_path, json).wrap_err("Failed to write the output file")?;
        }
    }

    info!("{} poses written to {:?}", traj.num_poses(), output_path);

    Ok(())
}

/// Load a scenario, choosing the format from the file extension.
fn load_scenario(path: &Path) -> Result<Scenario, Report> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let json = fs::read_to_string(path).wrap_err("Cannot read the scenario file")?;
            Ok(Scenario::from_json(&json)?)
        }
        _ => Ok(util::params::load_file(path)?),
    }
}
