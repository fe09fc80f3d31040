// File: src/main.rs
//
// Main entry point for the gridbench command-line tool.
// Handles argument parsing, logging setup, and dispatches to the appropriate
// subcommand (run, conditions, grid, or chart).

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use gridbench::benchmarks::{Harness, Reporter};
use gridbench::chart::{self, ChartOptions, ChartStyle, SeriesAxes};
use gridbench::config::PlanConfig;
use gridbench::export;
use gridbench::grid::Grid;
use gridbench::samples::Suite;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(
    name = "gridbench",
    about = "Compare the speed of alternative implementations across a grid of conditions",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Time a sample suite over every condition of a plan
    Run {
        /// TOML plan file
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Sample suite to run (overrides the plan)
        #[arg(long, value_enum)]
        suite: Option<Suite>,

        /// Repetitions per condition (overrides the plan)
        #[arg(short, long)]
        number: Option<usize>,

        /// Print the expanded conditions before running
        #[arg(long)]
        print_conditions: bool,

        /// Write the results as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the results as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Print the conditions a plan expands to
    Conditions {
        #[arg(long)]
        plan: Option<PathBuf>,

        #[arg(long, value_enum)]
        suite: Option<Suite>,
    },

    /// Reshape exported results into time grids
    Grid {
        /// JSON file written by `run --json`
        #[arg(long)]
        input: PathBuf,

        /// Only this candidate (all candidates by default)
        #[arg(long)]
        label: Option<String>,

        /// The two condition positions to use as grid axes
        #[arg(long, value_delimiter = ',', num_args = 2, default_values_t = [0, 1])]
        axes: Vec<usize>,

        /// Print in heatmap orientation (largest Y on top)
        #[arg(long)]
        heatmap: bool,
    },

    /// Write chart-ready data for exported results as JSON
    Chart {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = ChartKind::Line)]
        kind: ChartKind,

        /// Condition positions to plot: one for line/scatter, two otherwise
        #[arg(long, value_delimiter = ',', num_args = 1..=2, default_values_t = [0])]
        axes: Vec<usize>,

        #[arg(long, default_value = "xlabel")]
        xlabel: String,

        #[arg(long)]
        ylabel: Option<String>,

        #[arg(long, default_value = "title")]
        title: String,

        /// Marker size, or bubble scale factor
        #[arg(long, default_value_t = 500.0)]
        size: f64,

        #[arg(long)]
        cmap: Option<String>,

        /// Output file (stdout by default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartKind {
    Line,
    Scatter,
    Bubble,
    Surface,
    Heatmap,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = execute(cli.command) {
        Reporter::print_error(&*e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).without_time().with_target(false).init();
}

fn load_plan(plan: Option<&Path>, suite: Option<Suite>) -> Result<PlanConfig, Box<dyn Error>> {
    let mut config = match plan {
        Some(path) => PlanConfig::from_file(path)?,
        None => PlanConfig::for_suite(suite.unwrap_or_default()),
    };
    if let Some(suite) = suite {
        config.suite = suite;
    }
    Ok(config)
}

fn execute(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Run { plan, suite, number, print_conditions, csv, json } => {
            let config = load_plan(plan.as_deref(), suite)?;
            let inputs = config.inputs()?;

            let mut harness = Harness::new().with_print_conditions(print_conditions || config.print_conditions);
            if let Some(number) = number.or(config.number) {
                harness = harness.with_number(number);
            }

            info!("running suite {} with {} repetitions per condition", config.suite.name(), harness.number());
            let (mut candidates, setups) = config.suite.build();
            let results = harness.compare(&mut candidates, &inputs, setups)?;

            Reporter::print_results(&results, harness.number());
            Reporter::print_summary(&results);

            if let Some(path) = csv {
                export::write_csv_file(&path, &results)?;
                info!("wrote {}", path.display());
            }
            if let Some(path) = json {
                export::write_json(&path, &results, harness.number())?;
                info!("wrote {}", path.display());
            }
        }

        Commands::Conditions { plan, suite } => {
            let config = load_plan(plan.as_deref(), suite)?;
            let conditions = config.inputs()?.expand();
            Reporter::print_conditions(&conditions);
            println!("{} conditions", conditions.len());
        }

        Commands::Grid { input, label, axes, heatmap } => {
            let run = export::read_json(&input)?;
            debug!(recorded_at = %run.recorded_at, number = run.number, "loaded results");
            let results = run.into_collection()?;
            let axes = (axes[0], axes[1]);

            for (name, rows) in &results {
                if label.as_ref().is_some_and(|wanted| wanted != name) {
                    continue;
                }
                let grid = Grid::from_rows(rows, axes)?;
                if heatmap {
                    let map = grid.heatmap();
                    println!("{}", serde_json::to_string_pretty(&map)?);
                } else {
                    Reporter::print_grid(&chart::substitute_titles(name, SeriesAxes::Two(axes.0, axes.1)), &grid);
                }
            }
        }

        Commands::Chart { input, kind, axes, xlabel, ylabel, title, size, cmap, output } => {
            let results = export::read_json(&input)?.into_collection()?;
            let defaults = match kind {
                ChartKind::Surface | ChartKind::Heatmap => ChartOptions::grid_default(),
                _ => ChartOptions::default(),
            };
            let series_axes = match axes.as_slice() {
                [a] => SeriesAxes::One(*a),
                [a, b, ..] => SeriesAxes::Two(*a, *b),
                [] => SeriesAxes::One(0),
            };
            let two_axes = match series_axes {
                SeriesAxes::Two(a, b) => (a, b),
                SeriesAxes::One(a) => (a, a + 1),
            };
            let options = ChartOptions {
                style: match kind {
                    ChartKind::Scatter => ChartStyle::Scatter,
                    ChartKind::Bubble => ChartStyle::Bubble,
                    _ => ChartStyle::Line,
                },
                size,
                cmap: cmap.unwrap_or_else(|| defaults.cmap.clone()),
                xlabel,
                ylabel: ylabel.unwrap_or_else(|| defaults.ylabel.clone()),
                title,
                ..defaults
            };

            let data = match kind {
                ChartKind::Line | ChartKind::Scatter | ChartKind::Bubble => {
                    serde_json::to_string_pretty(&chart::chart_2d(&results, series_axes, options)?)?
                }
                ChartKind::Surface => serde_json::to_string_pretty(&chart::surfaces(&results, two_axes, &options)?)?,
                ChartKind::Heatmap => serde_json::to_string_pretty(&chart::heatmaps(&results, two_axes, &options)?)?,
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, data)?;
                    info!("wrote {}", path.display());
                }
                None => println!("{}", data),
            }
        }
    }

    Ok(())
}
