//! Transform sandbox: a camera flying around lit cubes, driven headlessly by a
//! scripted input sequence on a manual clock.

mod config;
mod context;
mod controls;
mod scene;
mod script;

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use engine_core::ManualClock;
use input::InputState;
use renderer::{Camera, ModelId, UniformRecorder};

use config::SandboxConfig;
use context::FrameContext;
use scene::Scene;
use script::InputScript;

const CUBE_MODEL: ModelId = ModelId(0);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut write_config = false;
    let mut config_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--write-config" => write_config = true,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => config_path = Some(PathBuf::from(path)),
        }
    }

    let config = match &config_path {
        Some(path) => SandboxConfig::load_from(path)?,
        None => SandboxConfig::load(),
    };
    if write_config {
        let path = config.save()?;
        log::info!("Wrote {}", path.display());
    }
    log::info!("Config: {:?}", config);

    let clock = Rc::new(ManualClock::new());
    let mut ctx = FrameContext::new(&config, clock.clone());
    let mut camera = Camera::new(
        config.movement_speed,
        config.rotation_speed,
        config.rotation_sensitivity,
    );
    let mut scene = Scene::demo(CUBE_MODEL);
    let mut input = InputState::new();
    let mut sink = UniformRecorder::new();
    let script = InputScript::demo();
    if script.is_empty() {
        log::info!("Running {} frames without scripted input", config.frames);
    } else {
        log::info!("Running {} frames with {} scripted key holds", config.frames, script.len());
    }

    let frame_step = Duration::try_from_secs_f64(config.frame_step_ms / 1000.0)
        .with_context(|| format!("invalid frame_step_ms {}", config.frame_step_ms))?;
    let mut draws = 0usize;

    for frame in 0..u64::from(config.frames) {
        clock.advance(frame_step);
        script.apply(frame, &mut input);
        ctx.update_time();
        let now = ctx.realtime();
        log::trace!("frame {frame} dt {:?}", ctx.frame_delta());

        if ctx.do_input() {
            controls::process_input(&mut ctx, &input, &mut camera);
            // Presses collected since the last input tick are consumed here.
            input.begin_frame();
            ctx.input_counter.tick(now);
        }

        if ctx.do_physics() {
            scene.update(&ctx, &camera);
            ctx.physics_counter.tick(now);
        }

        if ctx.do_render() {
            sink.clear_draws();
            scene.render(&mut sink, &camera, &ctx);
            draws += sink.draws().len();
            if ctx.graphics_counter.tick(now) {
                log::debug!("{:.1} render fps", ctx.graphics_counter.fps());
            }
        }
    }

    log::info!(
        "Simulated {} frames ({:.2}s), {} draw calls",
        ctx.num_frames(),
        ctx.realtime().as_secs_f64(),
        draws
    );
    log::info!("Camera position {}", camera.translator);
    log::info!("Camera rotation {}", camera.rotator);
    log::info!("Toggles {:?}", ctx.toggles);

    Ok(())
}
