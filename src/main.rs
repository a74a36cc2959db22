//! Stride - Headless character locomotion runner
//!
//! Replays a scripted input scenario through the player controller at a fixed
//! timestep and reports the lifecycle events and animation parameters.
//!
//! Usage: `stride [scenario.toml] [--trace out.json] [--settings file] [--save-settings]`

mod scenario;
mod settings;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stride_core::GameTime;
use stride_game::{AnimationParameters, JumpPhase, PlayerController};
use stride_physics::PhysicsWorld;

use scenario::Scenario;
use settings::SimSettings;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "stride")]
#[command(about = "Headless character locomotion runner")]
#[command(version)]
struct RunnerArgs {
    /// Scenario file to replay (built-in demo when omitted)
    scenario_path: Option<PathBuf>,

    /// Write a per-step JSON trace to this file
    #[arg(short, long = "trace")]
    trace_path: Option<PathBuf>,

    /// Settings file to use instead of the config directory
    #[arg(short, long = "settings")]
    settings_path: Option<PathBuf>,

    /// Save the loaded settings to the config directory
    #[arg(long)]
    save_settings: bool,
}

/// One fixed step of the trace export
#[derive(Debug, Serialize)]
struct FrameRecord {
    time: f64,
    position: Vec3,
    grounded: bool,
    parameters: AnimationParameters,
    phase: JumpPhase,
}

fn main() -> Result<()> {
    let args = RunnerArgs::parse();

    // Settings decide the log level, so load them under a temporary subscriber
    let bootstrap = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .finish();
    let settings = tracing::subscriber::with_default(bootstrap, || match &args.settings_path {
        Some(path) => SimSettings::load_from(path),
        None => Ok(SimSettings::load()),
    })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.simulation.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    if args.save_settings {
        settings.save()?;
    }

    let scenario = match &args.scenario_path {
        Some(path) => Scenario::load(path)?,
        None => Scenario::demo(),
    };

    info!("Starting Stride scenario '{}' ({:.2}s)", scenario.name, scenario.duration());
    let records = run(&settings, &scenario)?;

    if let Some(path) = &args.trace_path {
        let file = File::create(path)
            .with_context(|| format!("Failed to create trace file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &records).context("Failed to write trace")?;
        info!("Wrote {} frames to {}", records.len(), path.display());
    }

    Ok(())
}

/// Build the scene, replay the script, and collect one record per fixed step
fn run(settings: &SimSettings, scenario: &Scenario) -> Result<Vec<FrameRecord>> {
    let time_config = settings.time.clone();
    let dt = time_config.fixed_timestep;
    let frame_rate = settings.simulation.frame_rate;
    anyhow::ensure!(dt.is_finite() && dt > 0.0, "fixed_timestep must be positive (got {})", dt);
    anyhow::ensure!(frame_rate.is_finite() && frame_rate > 0.0, "frame_rate must be positive (got {})", frame_rate);
    anyhow::ensure!(time_config.time_scale > 0.0, "time_scale must be positive to finish a scenario");
    anyhow::ensure!(
        time_config.max_delta_time > 0.0,
        "max_delta_time must be positive (got {})",
        time_config.max_delta_time
    );

    let mut physics = PhysicsWorld::new();
    physics.create_ground(scenario.ground_height);
    for obstacle in &scenario.boxes {
        physics.create_static_box(obstacle.half_extents, obstacle.position);
    }
    physics.refresh_queries();

    let mut player = PlayerController::new(settings.locomotion_config())
        .context("Invalid locomotion configuration")?;
    player.spawn(&mut physics, scenario.spawn);

    let mut time = GameTime::new(time_config);
    let frame_delta = 1.0 / frame_rate;
    let mut script = scenario.script(dt);
    let mut records = Vec::new();
    let mut step: u64 = 0;
    let mut segment = usize::MAX;

    'frames: loop {
        time.update(frame_delta);

        for _ in 0..time.fixed_steps() {
            let Some(intent) = script.next() else {
                break 'frames;
            };
            let now = step as f64 * dt as f64;
            step += 1;

            if script.segment_index() != segment {
                segment = script.segment_index();
                info!("[{:7.3}s] segment {}", now, segment);
            }

            let frame = player.fixed_update(&mut physics, &intent, dt);
            for event in &frame.events {
                info!(
                    "[{:7.3}s] {} at y={:.3} (phase {})",
                    now,
                    event.name(),
                    player.position().y,
                    player.phase().name()
                );
            }

            records.push(FrameRecord {
                time: now,
                position: player.position(),
                grounded: player.is_grounded(),
                parameters: frame.parameters,
                phase: player.phase(),
            });
        }
    }

    let position = player.position();
    let parameters = player.parameters();
    println!(
        "Scenario '{}': {} steps ({:.2}s simulated) across {} frames",
        scenario.name,
        step,
        step as f64 * dt as f64,
        time.frame_count
    );
    println!(
        "  final position  ({:.3}, {:.3}, {:.3}), grounded: {}",
        position.x,
        position.y,
        position.z,
        player.is_grounded()
    );
    println!(
        "  parameters      VelocityZ {:.3}, VelocityX {:.3}, isJumping {}, JumpProgress {:.3}",
        parameters.velocity_z, parameters.velocity_x, parameters.is_jumping, parameters.jump_progress
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<RunnerArgs, clap::Error> {
        RunnerArgs::try_parse_from(std::iter::once("stride").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["walk.toml", "--trace", "out.json"]).unwrap();
        assert_eq!(parsed.scenario_path, Some(PathBuf::from("walk.toml")));
        assert_eq!(parsed.trace_path, Some(PathBuf::from("out.json")));
        assert!(!parsed.save_settings);

        let parsed = args(&["--settings", "tuning.toml", "--save-settings"]).unwrap();
        assert_eq!(parsed.scenario_path, None);
        assert_eq!(parsed.settings_path, Some(PathBuf::from("tuning.toml")));
        assert!(parsed.save_settings);

        assert!(args(&["--trace"]).is_err());
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["a.toml", "b.toml"]).is_err());
    }

    #[test]
    fn test_demo_run_ends_idle_on_ground() {
        let records = run(&SimSettings::default(), &Scenario::demo()).unwrap();
        assert_eq!(records.len(), 360);

        assert!(records.iter().any(|r| r.parameters.is_jumping));
        assert!(records.iter().any(|r| r.phase == JumpPhase::MidAir));

        let last = records.last().unwrap();
        assert!(last.grounded);
        assert_eq!(last.phase, JumpPhase::None);
        assert_eq!(last.parameters.velocity_z, 0.0);
        assert_eq!(last.parameters.velocity_x, 0.0);
    }

    #[test]
    fn test_rejects_degenerate_time_settings() {
        for max_delta_time in [0.0, -1.0, f32::NAN] {
            let mut settings = SimSettings::default();
            settings.time.max_delta_time = max_delta_time;
            assert!(run(&settings, &Scenario::demo()).is_err(), "accepted {max_delta_time}");
        }

        let mut settings = SimSettings::default();
        settings.time.time_scale = 0.0;
        assert!(run(&settings, &Scenario::demo()).is_err());
    }

    #[test]
    fn test_trace_record_names() {
        let record = FrameRecord {
            time: 0.5,
            position: Vec3::ZERO,
            grounded: true,
            parameters: AnimationParameters::default(),
            phase: JumpPhase::MidAir,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["parameters"]["JumpProgress"], 0.0);
        assert_eq!(json["phase"]["phase"], "mid_air");
    }
}
