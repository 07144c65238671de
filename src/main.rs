//! Headless driver: steps the walker for a fixed number of frames.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;
use thicket::presentation::{CurrentPose, Hud, HudState, PresentationPose};
use thicket::{init_logging, ActorMotionState, MoveIntent, Player, ThicketConfig, ThicketPlugin};

/// Walk a first-person character through a procedural forest, headless
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// TOML tuning file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Frames to simulate
    #[arg(long, default_value_t = 120)]
    ticks: u32,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Keys held for the whole run
    #[arg(long = "hold", value_enum)]
    held: Vec<HeldKey>,
    /// Horizontal mouse motion applied every frame, in pixels
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    look_x: f32,
    /// Write one JSON object per frame to stdout
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeldKey {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Sprint,
}

impl HeldKey {
    const fn key_code(self) -> KeyCode {
        match self {
            Self::Forward => KeyCode::KeyW,
            Self::Back => KeyCode::KeyS,
            Self::Left => KeyCode::KeyA,
            Self::Right => KeyCode::KeyD,
            Self::Jump => KeyCode::Space,
            Self::Sprint => KeyCode::ShiftLeft,
        }
    }
}

#[derive(Serialize)]
struct TraceRecord {
    tick: u32,
    intent: MoveIntent,
    state: ActorMotionState,
    pose: PresentationPose,
    hud: HudState,
}

fn build_app(args: &Args, config: ThicketConfig) -> Result<App> {
    ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be positive, got {}",
        args.fps
    );
    let plugin = ThicketPlugin::new(config).context("failed to build the forest")?;

    let mut keys = ButtonInput::<KeyCode>::default();
    for held in &args.held {
        keys.press(held.key_code());
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / args.fps,
        )))
        .insert_resource(keys)
        .insert_resource(AccumulatedMouseMotion {
            delta: Vec2::new(args.look_x, 0.0),
        })
        .add_plugins(plugin);
    app.finish();
    app.cleanup();
    Ok(app)
}

fn player_snapshot(app: &mut App) -> Option<Player> {
    let world = app.world_mut();
    let mut query = world.query::<&Player>();
    query.single(world).ok().cloned()
}

fn trace_record(tick: u32, app: &mut App) -> Option<TraceRecord> {
    let player = player_snapshot(app)?;
    Some(TraceRecord {
        tick,
        intent: player.intent,
        state: player.state,
        pose: app.world().resource::<CurrentPose>().0,
        hud: app.world().resource::<Hud>().0,
    })
}

fn write_trace(out: &mut impl Write, tick: u32, app: &mut App) -> Result<()> {
    let Some(record) = trace_record(tick, app) else {
        return Ok(());
    };
    serde_json::to_writer(&mut *out, &record).context("failed to encode trace record")?;
    writeln!(out).context("failed to write trace")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => ThicketConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ThicketConfig::default(),
    };

    let mut app = build_app(&args, config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for tick in 0..args.ticks {
        app.update();
        if args.trace {
            write_trace(&mut out, tick, &mut app)?;
        }
    }
    out.flush().context("failed to flush trace")?;

    let pose = app.world().resource::<CurrentPose>().0;
    info!(
        "after {} frames: eye at {}, yaw {:.3}, pitch {:.3}",
        args.ticks, pose.position, pose.yaw, pose.pitch
    );
    Ok(())
}
