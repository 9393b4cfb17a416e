//! Timetable optimizer CLI.
//!
//! Reads course descriptors as JSON and writes the result record.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_timetable::solver::SolverKind;
use u_timetable::{CourseSpec, Optimizer, OptimizerConfig};

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Course timetabling by energy minimization")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Annealing,
    Variational,
}

impl From<Strategy> for SolverKind {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Annealing => SolverKind::SimulatedAnnealing,
            Strategy::Variational => SolverKind::Variational,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a timetable.
    Solve {
        /// Course list (JSON)
        #[arg(short, long)]
        input: PathBuf,
        /// Optimizer configuration (JSON); flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file for the result record (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Annealing steps
        #[arg(long)]
        steps: Option<usize>,
        /// Number of rooms
        #[arg(long)]
        rooms: Option<u16>,
        /// Hours per day
        #[arg(long)]
        slots: Option<u8>,
        /// Days per week
        #[arg(long)]
        days: Option<u8>,
        /// Solver strategy
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
        /// Independent annealing runs
        #[arg(long)]
        restarts: Option<usize>,
    },

    /// Print candidate and constraint counts without solving.
    Inspect {
        /// Course list (JSON)
        #[arg(short, long)]
        input: PathBuf,
        /// Optimizer configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Either a bare array or `{"courses": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CourseFile {
    List(Vec<CourseSpec>),
    Wrapped { courses: Vec<CourseSpec> },
}

fn read_courses(path: &Path) -> Result<Vec<CourseSpec>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: CourseFile =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(match file {
        CourseFile::List(c) | CourseFile::Wrapped { courses: c } => c,
    })
}

fn read_config(path: Option<&Path>) -> Result<OptimizerConfig> {
    let Some(path) = path else {
        return Ok(OptimizerConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve {
            input,
            config,
            output,
            seed,
            steps,
            rooms,
            slots,
            days,
            strategy,
            restarts,
        } => {
            let courses = read_courses(&input)?;
            let mut config = read_config(config.as_deref())?;
            if let Some(s) = seed {
                config = config.with_seed(s);
            }
            if let Some(n) = steps {
                config = config.with_annealing_steps(n);
            }
            if let Some(n) = rooms {
                config = config.with_rooms(n);
            }
            if let Some(n) = slots {
                config = config.with_time_slots(n);
            }
            if let Some(n) = days {
                config = config.with_days(n);
            }
            if let Some(s) = strategy {
                config = config.with_solver(s.into());
            }
            if let Some(n) = restarts {
                config = config.with_restarts(n);
            }

            let record = Optimizer::new(config).optimize(&courses)?;
            let json = record.to_json()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "result written");
                }
                None => println!("{json}"),
            }
        }

        Commands::Inspect { input, config } => {
            let courses = read_courses(&input)?;
            let config = read_config(config.as_deref())?;
            let problem = Optimizer::new(config).prepare(&courses)?;
            let counts = problem.constraint_counts();
            let graph = problem.conflict_graph();

            println!("Courses: {}", courses.len());
            println!("Candidates: {}", problem.candidates.len());
            println!("Instructor conflicts: {}", counts.instructor_conflict);
            println!("Room conflicts: {}", counts.room_conflict);
            println!("Student conflicts: {}", counts.student_conflict);
            println!("Time preferences: {}", counts.time_preference);
            println!("Conflict edges: {}", graph.edge_count());
        }
    }

    Ok(())
}
