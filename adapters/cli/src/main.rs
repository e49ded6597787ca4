#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Emergent Garden simulation.
//!
//! Runs the fixed-timestep loop either headless (fast-forwarding simulated
//! time) or against the wall clock, presenting ASCII frames and metrics
//! lines through the shared rendering contracts.

mod config;
mod terminal;

use std::{
    io,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use garden_core::{Command, Event};
use garden_rendering::{GardenScene, MetricsSink, RenderSink};
use garden_world::{apply, query, World};
use rand::Rng;

use config::{FileConfig, Overrides};
use terminal::{MetricsLine, TerminalFrame};

/// World-unit edge length of one cell in composed scenes.
const CELL_EDGE: f32 = 12.0;
/// Pause between wall-clock samples in watch mode.
const WATCH_FRAME_PERIOD: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(
    name = "garden",
    about = "Fixed-timestep emergent garden cellular automaton"
)]
struct Args {
    /// Number of grid columns.
    #[arg(long)]
    columns: Option<u32>,

    /// Number of grid rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Seed for the deterministic random source; drawn from OS entropy when
    /// omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds of simulated time per discrete step.
    #[arg(long)]
    step_ms: Option<u64>,

    /// Number of steps to simulate before exiting.
    #[arg(long, default_value_t = 200)]
    steps: u64,

    /// Sample the wall clock instead of fast-forwarding simulated time.
    #[arg(long)]
    watch: bool,

    /// Stretch the step cadence for reduced-motion sessions.
    #[arg(long)]
    reduced_motion: bool,

    /// Render an ASCII frame (and metrics line) every N steps; 0 disables
    /// frames.
    #[arg(long, default_value_t = 25)]
    render_every: u64,

    /// Optional TOML file carrying the same settings as the flags.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            columns: self.columns,
            rows: self.rows,
            seed: self.seed,
            step_ms: self.step_ms,
            reduced_motion: self.reduced_motion,
        }
    }
}

/// Entry point for the garden command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => config::load(path)?,
        None => FileConfig::default(),
    };
    let fallback_seed = rand::thread_rng().gen();
    let settings = config::resolve(&args.overrides(), file, fallback_seed);

    let mut world = World::new(settings).context("constructing the garden world")?;
    println!(
        "emergent garden — {}x{} grid, seed {:#018x}, step {} ms",
        settings.columns,
        settings.rows,
        settings.rng_seed,
        settings.step_interval.as_millis()
    );

    let mut frame = TerminalFrame::new(io::stdout());
    let mut metrics_line = MetricsLine::new(io::stdout());

    if args.watch {
        run_watch(&mut world, args.steps, &mut frame, &mut metrics_line)
    } else {
        run_headless(
            &mut world,
            args.steps,
            args.render_every,
            &mut frame,
            &mut metrics_line,
        )
    }
}

/// Fast-forwards the simulation by feeding the accumulator whole intervals.
fn run_headless(
    world: &mut World,
    steps: u64,
    render_every: u64,
    frame: &mut impl RenderSink,
    metrics_line: &mut impl MetricsSink,
) -> Result<()> {
    let interval = query::effective_step_interval(world);
    let mut completed = 0u64;

    while completed < steps {
        let mut events = Vec::new();
        apply(world, Command::Tick { dt: interval }, &mut events);

        for event in &events {
            if let Event::StepCompleted { step, metrics } = event {
                completed = *step;
                if render_every > 0 && step % render_every == 0 {
                    metrics_line.publish(metrics)?;
                    let scene =
                        GardenScene::compose(&query::cell_view(world), *metrics, CELL_EDGE);
                    frame.present(&scene)?;
                }
            }
        }
    }

    metrics_line.publish(&query::metrics(world))?;
    Ok(())
}

/// Samples the wall clock every frame and lets the accumulator decide when
/// the next discrete step is due.
fn run_watch(
    world: &mut World,
    steps: u64,
    frame: &mut impl RenderSink,
    metrics_line: &mut impl MetricsSink,
) -> Result<()> {
    let mut previous = Instant::now();
    let mut completed = 0u64;

    while completed < steps {
        let now = Instant::now();
        let dt = now.duration_since(previous);
        previous = now;

        let mut events = Vec::new();
        apply(world, Command::Tick { dt }, &mut events);

        for event in &events {
            if let Event::StepCompleted { step, metrics } = event {
                completed = *step;
                metrics_line.publish(metrics)?;
                let scene = GardenScene::compose(&query::cell_view(world), *metrics, CELL_EDGE);
                frame.present(&scene)?;
            }
        }

        thread::sleep(WATCH_FRAME_PERIOD);
    }

    Ok(())
}
