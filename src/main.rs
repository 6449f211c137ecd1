use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::ops::ControlFlow;

use dispatch_sim::simulation::{
    FixedClock, FrameClock, FrameLoop, FrameReport, SimFleet, TelemetryFeed, VehicleStatus,
    WallClock,
};

#[derive(Parser)]
#[command(name = "dispatch_sim")]
#[command(about = "Dispatch fleet simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of frames to run in headless mode
    #[arg(long, default_value = "600")]
    frames: u64,

    /// Fixed time delta per frame in seconds
    #[arg(long, default_value = "0.0166667")]
    delta: f32,

    /// Measure real elapsed time between frames instead of using a fixed delta
    #[arg(long)]
    wall_clock: bool,

    /// Target frame rate when running on the wall clock
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Simulated seconds between console reports
    #[arg(long, default_value = "1.0")]
    report_every: f32,

    /// Seed for the telemetry feed's random source
    #[arg(long)]
    seed: Option<u64>,

    /// Queue a status change before the first frame, e.g. V-06=active
    #[arg(long = "set-status", value_name = "ID=STATUS")]
    set_status: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            return run_with_ui(&cli);
        }
        #[cfg(not(feature = "ui"))]
        {
            bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    }

    let env = env_logger::Env::default().default_filter_or("warn,dispatch_sim=info");
    env_logger::Builder::from_env(env).init();
    run_headless(&cli)
}

fn parse_status_change(arg: &str) -> Result<(String, VehicleStatus)> {
    let (id, status) = arg
        .split_once('=')
        .with_context(|| format!("expected ID=STATUS, got '{}'", arg))?;
    Ok((id.trim().to_string(), status.trim().parse()?))
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    if !cli.delta.is_finite() || cli.delta <= 0.0 {
        bail!("--delta must be a positive number of seconds, got {}", cli.delta);
    }
    if !cli.report_every.is_finite() || cli.report_every <= 0.0 {
        bail!("--report-every must be positive, got {}", cli.report_every);
    }

    let mut fleet = SimFleet::from_seed().context("failed to load seed fleet")?;
    for arg in &cli.set_status {
        let (id, status) = parse_status_change(arg)?;
        if fleet.vehicle(&id).is_none() {
            bail!("--set-status names unknown vehicle {}", id);
        }
        fleet.queue_status_change(id.as_str(), status);
    }
    let mut telemetry = TelemetryFeed::new(fleet.vehicle_ids(), cli.seed);

    println!("Running dispatch simulation in headless mode...");
    if cli.wall_clock {
        println!("Frames: {}, wall clock at {} fps", cli.frames, cli.fps);
    } else {
        println!("Frames: {}, fixed delta: {}s", cli.frames, cli.delta);
    }
    println!();

    println!("Initial state:");
    fleet.print_summary();
    fleet.draw_map();

    let mut next_report = cli.report_every;
    let on_frame = |fleet: &SimFleet, report: &FrameReport| {
        let generated = telemetry.tick(report.delta_secs, report.time);
        for entry in telemetry.entries().take(generated) {
            info!("Telemetry {}", entry.summary());
        }

        if report.time >= next_report {
            next_report += cli.report_every;
            println!(
                "--- After frame {} ({:.1}s simulated time) ---",
                report.frame, report.time
            );
            fleet.print_summary();
            fleet.draw_map();
        }
        ControlFlow::Continue(())
    };

    let frames = if cli.wall_clock {
        drive(
            FrameLoop::new(WallClock::new()).with_target_fps(cli.fps),
            &mut fleet,
            cli.frames,
            on_frame,
        )
    } else {
        drive(FrameLoop::new(FixedClock::new(cli.delta)), &mut fleet, cli.frames, on_frame)
    };

    println!("=== Final State ===");
    fleet.print_summary();
    fleet.draw_map();
    info!("Simulation complete after {} frames ({:.2}s)", frames, fleet.time);
    Ok(())
}

fn drive<C, F>(mut frame_loop: FrameLoop<C>, fleet: &mut SimFleet, frames: u64, on_frame: F) -> u64
where
    C: FrameClock,
    F: FnMut(&SimFleet, &FrameReport) -> ControlFlow<()>,
{
    frame_loop.run(fleet, Some(frames), on_frame)
}

#[cfg(feature = "ui")]
fn run_with_ui(cli: &Cli) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    let fleet = SimFleet::from_seed().context("failed to load seed fleet")?;

    println!("Starting Dispatch Sim UI...");
    println!();
    println!("Controls:");
    println!("  Click  - Select a vehicle, click again to clear");
    println!("  Tab    - Select next vehicle");
    println!("  Space  - Pause/resume motion");
    println!("  ESC    - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,dispatch_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Dispatch Sim".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(dispatch_sim::ui::DispatchSimUIPlugin::new(fleet, cli.seed))
        .run();
    Ok(())
}
