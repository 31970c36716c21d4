use std::path::PathBuf;
use std::time::Duration;

use beatpong::game::{GameOptions, SceneAssets};
use beatpong::resources::ButtonState;
use beatpong::utils::Timer;
use beatpong::{
    AudioBackend, CommandBuffer, Game, GamePhase, Input, KeyframeTimeline, MaterialTextures, MeshHandle, MouseButton,
    TextureHandle,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "headless")]
#[command(about = "Plays a Beatpong session headlessly with a recording render surface", long_about = None)]
struct Cli {
    /// JSON file with game options; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play the music track (requires the `audio` feature)
    #[arg(long)]
    music: bool,

    /// Let the paddle track the ball
    #[arg(long)]
    autoplay: bool,

    /// Seconds into the track to start from
    #[arg(long)]
    start_time: Option<f64>,

    /// JSON keyframe file; a steady beat is used when omitted
    #[arg(long)]
    keyframes: Option<PathBuf>,

    /// Length of the simulated run in seconds
    #[arg(long, default_value = "30")]
    seconds: f64,

    /// Simulated frame rate
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Pace frames against the wall clock and feed measured frame times
    #[arg(long)]
    realtime: bool,
}

/// Stand-in handles; the recording surface never dereferences them.
const ASSETS: SceneAssets = SceneAssets {
    box_mesh: MeshHandle::new(1, 36),
    box_textures: MaterialTextures::new(TextureHandle(1), TextureHandle(2), TextureHandle(3)),
    pad_mesh: MeshHandle::new(2, 36),
    ball_mesh: MeshHandle::new(3, 9600),
    text_mesh: MeshHandle::new(4, 138),
    text_texture: TextureHandle(4),
};

#[cfg(feature = "audio")]
fn audio_backend() -> anyhow::Result<Option<Box<dyn AudioBackend>>> {
    let backend = beatpong::audio::rodio_backend::RodioBackend::new()?;
    Ok(Some(Box::new(backend)))
}

#[cfg(not(feature = "audio"))]
fn audio_backend() -> anyhow::Result<Option<Box<dyn AudioBackend>>> {
    Ok(None)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => GameOptions::from_json_file(path)?,
        None => GameOptions::default(),
    };
    options.enable_music |= cli.music;
    options.enable_autoplay |= cli.autoplay;
    if let Some(start_time) = cli.start_time {
        options.start_time = start_time;
    }

    let timeline = match &cli.keyframes {
        Some(path) => KeyframeTimeline::from_json_file(path)?,
        None => KeyframeTimeline::metronome(0.5, 4096),
    };

    let audio = if options.enable_music { audio_backend()? } else { None };
    let mut game = Game::new(options, timeline, ASSETS, audio)?;

    let fps = cli.fps.max(1);
    let dt = 1.0 / f64::from(fps);
    let frames = (cli.seconds * f64::from(fps)).max(0.0) as u64;

    let mut input = Input::new();
    let mut surface = CommandBuffer::new();
    let mut losses = 0u32;
    let mut draws = 0usize;
    let mut timer = Timer::new();

    for frame in 0..frames {
        // Click whenever the game waits for one: press on even frames,
        // release on odd ones.
        if matches!(game.state().phase, GamePhase::Idle | GamePhase::Lost) {
            let state = if frame % 2 == 0 {
                ButtonState::Pressed
            } else {
                ButtonState::Released
            };
            input.inject_mouse_button(MouseButton::PRIMARY, state);
        } else if input.get_mouse_button(MouseButton::PRIMARY) {
            input.inject_mouse_button(MouseButton::PRIMARY, ButtonState::Released);
        }

        let frame_dt = if cli.realtime {
            std::thread::sleep(Duration::from_secs_f64(dt).saturating_sub(timer.delta_since_tick()));
            timer.tick()
        } else {
            dt
        };

        let before = game.state().phase;
        game.update(&input, frame_dt);
        if before != GamePhase::Lost && game.state().phase == GamePhase::Lost {
            losses += 1;
        }

        surface.clear();
        game.render(&mut surface);
        draws += surface.draw_count();

        input.start_frame();
    }

    let state = game.state();
    log::info!(
        "Simulated {frames} frames: {draws} draws, {losses} losses, game time {:.2}s, final phase {:?}",
        state.game_elapsed,
        state.phase
    );
    if cli.realtime {
        log::info!("Wall clock: {:.2}s over {} ticks", timer.elapsed.as_secs_f64(), timer.frame_count);
    }
    Ok(())
}
