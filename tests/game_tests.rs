//! Game state machine tests
//!
//! Tests for:
//! - Idle → Running start, clocks and music offset
//! - Pause / resume clocks and audio commands
//! - Loss detection on the launch edge, exactly-once audio release
//! - Recovery to Idle
//! - Ball bounds under continuous simulation
//! - Pointer-driven paddle and camera
//! - Scene nodes written from state, frame rendering

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use beatpong::audio::{AudioBackend, ClipHandle, SoundHandle};
use beatpong::game::{GameOptions, Keyframe, SceneAssets};
use beatpong::render::uniforms;
use beatpong::resources::ButtonState;
use beatpong::{
    BeatError, CommandBuffer, Game, GamePhase, Input, KeyframeEndpoint, KeyframeTimeline, MaterialTextures,
    MeshHandle, MouseButton, Result, TextureHandle, UniformValue,
};
use glam::Vec3;

use KeyframeEndpoint::{Bottom, Top};

// ============================================================================
// Mock audio
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum AudioEvent {
    Load(PathBuf),
    Create(ClipHandle),
    Offset(SoundHandle, Duration),
    Play(SoundHandle),
    Pause(SoundHandle),
    Stop(SoundHandle),
    Release(SoundHandle),
}

#[derive(Clone, Default)]
struct MockAudio {
    log: Rc<RefCell<Vec<AudioEvent>>>,
    fail_load: bool,
    next: u32,
}

impl MockAudio {
    fn events(&self) -> Vec<AudioEvent> {
        self.log.borrow().clone()
    }

    fn count(&self, pred: impl Fn(&AudioEvent) -> bool) -> usize {
        self.log.borrow().iter().filter(|e| pred(e)).count()
    }

    fn record(&self, event: AudioEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl AudioBackend for MockAudio {
    fn load_clip(&mut self, path: &Path) -> Result<ClipHandle> {
        self.record(AudioEvent::Load(path.to_path_buf()));
        if self.fail_load {
            return Err(BeatError::AudioClipLoad {
                path: path.to_path_buf(),
                reason: "not found".into(),
            });
        }
        Ok(ClipHandle(7))
    }

    fn create_instance(&mut self, clip: ClipHandle) -> Result<SoundHandle> {
        self.record(AudioEvent::Create(clip));
        self.next += 1;
        Ok(SoundHandle(self.next))
    }

    fn set_start_offset(&mut self, sound: SoundHandle, offset: Duration) -> Result<()> {
        self.record(AudioEvent::Offset(sound, offset));
        Ok(())
    }

    fn play(&mut self, sound: SoundHandle) -> Result<()> {
        self.record(AudioEvent::Play(sound));
        Ok(())
    }

    fn pause(&mut self, sound: SoundHandle) -> Result<()> {
        self.record(AudioEvent::Pause(sound));
        Ok(())
    }

    fn stop(&mut self, sound: SoundHandle) -> Result<()> {
        self.record(AudioEvent::Stop(sound));
        Ok(())
    }

    fn release(&mut self, sound: SoundHandle) {
        self.record(AudioEvent::Release(sound));
    }
}

// ============================================================================
// Helpers
// ============================================================================

const EPSILON: f64 = 1e-9;
const DT: f64 = 0.04;

const ASSETS: SceneAssets = SceneAssets {
    box_mesh: MeshHandle::new(1, 36),
    box_textures: MaterialTextures::new(TextureHandle(1), TextureHandle(2), TextureHandle(3)),
    pad_mesh: MeshHandle::new(2, 36),
    ball_mesh: MeshHandle::new(3, 960),
    text_mesh: MeshHandle::new(4, 138),
    text_texture: TextureHandle(4),
};

/// First launch edge at 0.1 s
fn launch_timeline() -> KeyframeTimeline {
    KeyframeTimeline::new(vec![
        Keyframe::new(0.0, Top),
        Keyframe::new(0.1, Bottom),
        Keyframe::new(0.5, Top),
        Keyframe::new(100.0, Top),
    ])
    .unwrap()
}

fn music_options(start_time: f64) -> GameOptions {
    GameOptions {
        enable_music: true,
        start_time,
        ..GameOptions::default()
    }
}

fn game_with_audio(options: GameOptions, timeline: KeyframeTimeline) -> (Game, MockAudio) {
    let audio = MockAudio::default();
    let game = Game::new(options, timeline, ASSETS, Some(Box::new(audio.clone()))).unwrap();
    (game, audio)
}

fn step(game: &mut Game, input: &mut Input, dt: f64) {
    game.update(input, dt);
    input.start_frame();
}

fn press(game: &mut Game, input: &mut Input, button: MouseButton) {
    input.inject_mouse_button(button, ButtonState::Pressed);
    step(game, input, DT);
}

fn release(game: &mut Game, input: &mut Input, button: MouseButton) {
    input.inject_mouse_button(button, ButtonState::Released);
    step(game, input, DT);
}

/// Centres the paddle, then starts a session.
fn start_centred(game: &mut Game, input: &mut Input) {
    game.state_mut().set_paddle(0.5, 0.5);
    press(game, input, MouseButton::PRIMARY);
    release(game, input, MouseButton::PRIMARY);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn scene_has_five_nodes_under_root() {
    let game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let scene = game.scene();
    assert_eq!(scene.count_descendants(scene.root()), 5);
    assert_eq!(scene.light_count(), 1);
    assert_eq!(scene.get_node(game.nodes().ball).unwrap().children(), &[game.nodes().ball_light]);
    assert_eq!(game.state().phase, GamePhase::Idle);
}

#[test]
fn failed_clip_load_aborts_startup() {
    let audio = MockAudio {
        fail_load: true,
        ..MockAudio::default()
    };
    let result = Game::new(music_options(0.0), launch_timeline(), ASSETS, Some(Box::new(audio.clone())));
    assert!(matches!(result, Err(BeatError::AudioClipLoad { .. })));
    assert_eq!(audio.events(), vec![AudioEvent::Load(GameOptions::default().music_path)]);
}

#[test]
fn music_without_backend_is_an_error() {
    let result = Game::new(music_options(0.0), launch_timeline(), ASSETS, None);
    assert!(matches!(result, Err(BeatError::AudioBackend(_))));
}

#[test]
fn out_of_range_start_time_fails_at_startup() {
    let audio = MockAudio::default();
    let result = Game::new(music_options(1e30), launch_timeline(), ASSETS, Some(Box::new(audio.clone())));
    assert!(matches!(result, Err(BeatError::InvalidOption { name: "start_time", .. })));
    assert!(audio.events().is_empty());

    let result = Game::new(music_options(f64::INFINITY), launch_timeline(), ASSETS, None);
    assert!(matches!(result, Err(BeatError::InvalidOption { .. })));
}

#[test]
fn backend_is_unused_when_music_is_off() {
    let audio = MockAudio::default();
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, Some(Box::new(audio.clone()))).unwrap();
    let mut input = Input::new();
    press(&mut game, &mut input, MouseButton::PRIMARY);
    assert_eq!(game.state().phase, GamePhase::Running);
    assert!(audio.events().is_empty());
}

// ============================================================================
// Idle → Running
// ============================================================================

#[test]
fn primary_press_starts_session_at_start_time() {
    let (mut game, audio) = game_with_audio(music_options(12.0), KeyframeTimeline::metronome(0.5, 64));
    let mut input = Input::new();

    step(&mut game, &mut input, DT);
    assert_eq!(game.state().phase, GamePhase::Idle);

    press(&mut game, &mut input, MouseButton::PRIMARY);
    let state = game.state();
    assert!(state.has_started());
    assert!((state.total_elapsed - 12.0).abs() < EPSILON);
    assert!((state.game_elapsed - 12.0).abs() < EPSILON);

    let sound = SoundHandle(1);
    assert_eq!(
        audio.events(),
        vec![
            AudioEvent::Load(GameOptions::default().music_path),
            AudioEvent::Create(ClipHandle(7)),
            AudioEvent::Offset(sound, Duration::from_secs(12)),
            AudioEvent::Play(sound),
        ]
    );
}

#[test]
fn idle_ball_rests_over_paddle() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let mut input = Input::new();
    game.state_mut().set_paddle(0.5, 0.5);
    step(&mut game, &mut input, DT);

    let bounds = game.field().ball_bounds();
    let ball = game.state().ball_position;
    assert!(ball.abs_diff_eq(Vec3::new(0.0, bounds.bottom_y, -80.0), 1e-4));
}

#[test]
fn secondary_button_does_not_start() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let mut input = Input::new();
    press(&mut game, &mut input, MouseButton::SECONDARY);
    release(&mut game, &mut input, MouseButton::SECONDARY);
    assert_eq!(game.state().phase, GamePhase::Idle);
}

// ============================================================================
// Pause
// ============================================================================

#[test]
fn secondary_release_pauses_and_resumes() {
    let (mut game, audio) = game_with_audio(music_options(0.0), KeyframeTimeline::metronome(0.5, 64));
    let mut input = Input::new();
    start_centred(&mut game, &mut input);

    press(&mut game, &mut input, MouseButton::SECONDARY);
    release(&mut game, &mut input, MouseButton::SECONDARY);
    assert!(game.state().is_paused());
    assert_eq!(audio.count(|e| matches!(e, AudioEvent::Pause(_))), 1);

    let game_time = game.state().game_elapsed;
    let total_time = game.state().total_elapsed;
    let ball = game.state().ball_position;
    for _ in 0..10 {
        step(&mut game, &mut input, DT);
    }
    assert!((game.state().game_elapsed - game_time).abs() < EPSILON);
    assert!((game.state().total_elapsed - (total_time + 10.0 * DT)).abs() < 1e-6);
    assert_eq!(game.state().ball_position, ball);

    press(&mut game, &mut input, MouseButton::SECONDARY);
    release(&mut game, &mut input, MouseButton::SECONDARY);
    assert_eq!(game.state().phase, GamePhase::Running);
    assert_eq!(audio.count(|e| matches!(e, AudioEvent::Play(_))), 2);

    step(&mut game, &mut input, DT);
    assert!(game.state().game_elapsed > game_time);
}

// ============================================================================
// Loss
// ============================================================================

#[test]
fn centred_ball_on_launch_edge_is_a_hit() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let mut input = Input::new();
    start_centred(&mut game, &mut input);

    // Launch edge crossed at 0.12 s
    for _ in 0..3 {
        step(&mut game, &mut input, DT);
    }
    assert_eq!(game.state().current_keyframe, 1);
    assert_eq!(game.state().phase, GamePhase::Running);

    let footprint = game.field().paddle_footprint(0.5, 0.5);
    let ball = game.state().ball_position;
    assert!(footprint.contains(ball.x, ball.z));
}

#[test]
fn ball_outside_footprint_on_launch_edge_loses_once() {
    let (mut game, audio) = game_with_audio(music_options(0.0), launch_timeline());
    let mut input = Input::new();
    start_centred(&mut game, &mut input);

    // Paddle to the far left wall; the ball is near the centre
    game.state_mut().set_paddle(1.0, 0.5);
    for _ in 0..3 {
        step(&mut game, &mut input, DT);
    }
    assert!(game.state().has_lost());

    for _ in 0..20 {
        step(&mut game, &mut input, DT);
    }
    drop(game);

    let sound = SoundHandle(1);
    assert_eq!(audio.count(|e| *e == AudioEvent::Stop(sound)), 1);
    assert_eq!(audio.count(|e| *e == AudioEvent::Release(sound)), 1);
    let events = audio.events();
    let stop = events.iter().position(|e| *e == AudioEvent::Stop(sound)).unwrap();
    let release = events.iter().position(|e| *e == AudioEvent::Release(sound)).unwrap();
    assert!(stop < release);
}

#[test]
fn non_launch_edge_never_loses() {
    let timeline = KeyframeTimeline::new(vec![
        Keyframe::new(0.0, Bottom),
        Keyframe::new(0.1, Top),
        Keyframe::new(0.2, Bottom),
        Keyframe::new(100.0, Bottom),
    ])
    .unwrap();
    let mut game = Game::new(GameOptions::default(), timeline, ASSETS, None).unwrap();
    let mut input = Input::new();
    start_centred(&mut game, &mut input);
    game.state_mut().set_paddle(1.0, 1.0);

    for _ in 0..20 {
        step(&mut game, &mut input, DT);
    }
    assert_eq!(game.state().phase, GamePhase::Running);
}

#[test]
fn primary_release_recovers_to_idle() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let mut input = Input::new();
    start_centred(&mut game, &mut input);
    game.state_mut().set_paddle(1.0, 0.5);
    for _ in 0..3 {
        step(&mut game, &mut input, DT);
    }
    assert!(game.state().has_lost());
    let keyframe = game.state().current_keyframe;
    assert!(keyframe > 0);

    press(&mut game, &mut input, MouseButton::PRIMARY);
    assert!(game.state().has_lost());
    release(&mut game, &mut input, MouseButton::PRIMARY);

    let state = game.state();
    assert_eq!(state.phase, GamePhase::Idle);
    assert_eq!(state.current_keyframe, 0);
    assert_eq!(state.previous_keyframe, 0);
}

#[test]
fn new_session_after_loss_creates_fresh_sound() {
    let (mut game, audio) = game_with_audio(music_options(0.0), launch_timeline());
    let mut input = Input::new();
    start_centred(&mut game, &mut input);
    game.state_mut().set_paddle(1.0, 0.5);
    for _ in 0..3 {
        step(&mut game, &mut input, DT);
    }
    press(&mut game, &mut input, MouseButton::PRIMARY);
    release(&mut game, &mut input, MouseButton::PRIMARY);
    start_centred(&mut game, &mut input);

    assert_eq!(game.state().phase, GamePhase::Running);
    assert_eq!(audio.count(|e| matches!(e, AudioEvent::Create(_))), 2);
    assert_eq!(audio.count(|e| *e == AudioEvent::Play(SoundHandle(2))), 1);
}

// ============================================================================
// Physics over time
// ============================================================================

#[test]
fn ball_stays_in_bounds_with_autoplay() {
    let options = GameOptions {
        enable_autoplay: true,
        ..GameOptions::default()
    };
    let mut game = Game::new(options, KeyframeTimeline::metronome(0.4, 256), ASSETS, None).unwrap();
    let mut input = Input::new();
    press(&mut game, &mut input, MouseButton::PRIMARY);

    let bounds = game.field().ball_bounds();
    for _ in 0..3000 {
        step(&mut game, &mut input, 1.0 / 60.0);
        let ball = game.state().ball_position;
        assert!(ball.x >= bounds.min_x && ball.x <= bounds.max_x);
        assert!(ball.z >= bounds.min_z && ball.z <= bounds.max_z);
        assert!(ball.y >= bounds.bottom_y - 1e-3 && ball.y <= bounds.top_y + 1e-3);
        assert_eq!(game.state().ball_direction.y, 1.0);
        assert!((0.0..=1.0).contains(&game.state().pad_x));
        assert!((0.0..=1.0).contains(&game.state().pad_z));
    }
    assert_eq!(game.state().phase, GamePhase::Running);
}

#[test]
fn keyframe_index_never_decreases_while_running() {
    let options = GameOptions {
        enable_autoplay: true,
        ..GameOptions::default()
    };
    let mut game = Game::new(options, KeyframeTimeline::metronome(0.3, 64), ASSETS, None).unwrap();
    let mut input = Input::new();
    press(&mut game, &mut input, MouseButton::PRIMARY);

    let mut last = game.state().current_keyframe;
    for _ in 0..1500 {
        step(&mut game, &mut input, 1.0 / 60.0);
        let current = game.state().current_keyframe;
        assert!(current >= last);
        last = current;
    }
    assert_eq!(last, 62);
}

#[test]
fn wall_hit_flips_x_only() {
    let mut game = Game::new(GameOptions::default(), KeyframeTimeline::metronome(100.0, 2), ASSETS, None).unwrap();
    let mut input = Input::new();
    start_centred(&mut game, &mut input);

    // 87 units to the right wall at 60 units/s
    loop {
        let before = game.state().ball_direction;
        step(&mut game, &mut input, 0.01);
        let after = game.state().ball_direction;
        if after.x < 0.0 {
            assert_eq!(after, Vec3::new(-before.x, before.y, before.z));
            break;
        }
    }
    assert!((game.state().ball_position.x - game.field().ball_bounds().max_x).abs() < 1e-4);
}

// ============================================================================
// Pointer, camera and scene output
// ============================================================================

#[test]
fn pointer_motion_moves_paddle_against_delta() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    game.set_viewport(1000, 500);
    game.state_mut().set_paddle(0.5, 0.5);
    let mut input = Input::new();

    input.inject_mouse_motion(100.0, -50.0);
    step(&mut game, &mut input, DT);
    assert!((game.state().pad_x - 0.4).abs() < 1e-6);
    assert!((game.state().pad_z - 0.6).abs() < 1e-6);

    input.inject_mouse_motion(-5000.0, 5000.0);
    step(&mut game, &mut input, DT);
    assert_eq!((game.state().pad_x, game.state().pad_z), (1.0, 0.0));
}

#[test]
fn window_resize_drives_pointer_scale() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    game.state_mut().set_paddle(0.5, 0.5);
    let mut input = Input::new();

    input.inject_resize(400, 200);
    input.inject_mouse_motion(40.0, 20.0);
    step(&mut game, &mut input, DT);
    assert_eq!(game.viewport(), (400, 200));
    assert!((game.camera().aspect - 2.0).abs() < f32::EPSILON);
    assert!((game.state().pad_x - 0.4).abs() < 1e-6);
    assert!((game.state().pad_z - 0.4).abs() < 1e-6);
}

#[test]
fn camera_follows_paddle() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let mut input = Input::new();
    game.state_mut().set_paddle(0.5, 0.0);
    step(&mut game, &mut input, DT);
    let centred = *game.camera().view_matrix();

    game.state_mut().set_paddle(0.9, 0.0);
    step(&mut game, &mut input, DT);
    assert!(!centred.abs_diff_eq(*game.camera().view_matrix(), 1e-6));

    game.state_mut().set_paddle(0.5, 0.0);
    step(&mut game, &mut input, DT);
    assert!(centred.abs_diff_eq(*game.camera().view_matrix(), 1e-6));
}

#[test]
fn nodes_reflect_state_after_update() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let mut input = Input::new();
    start_centred(&mut game, &mut input);
    step(&mut game, &mut input, DT);

    let nodes = *game.nodes();
    let scene = game.scene();
    let state = game.state();

    let ball = scene.get_node(nodes.ball).unwrap();
    assert!(ball.transform.world_position().abs_diff_eq(state.ball_position, 1e-4));
    assert_eq!(ball.transform.scale, Vec3::splat(3.0));
    assert!((f64::from(ball.transform.rotation.y) - state.total_elapsed * 2.0).abs() < 1e-5);

    let pad = scene.get_node(nodes.pad).unwrap();
    let expected = game.field().paddle_position(state.pad_x, state.pad_z);
    assert!(pad.transform.world_position().abs_diff_eq(expected, 1e-4));

    let play_box = scene.get_node(nodes.play_box).unwrap();
    assert!(play_box.transform.world_position().abs_diff_eq(Vec3::new(0.0, -10.0, -80.0), 1e-6));

    let light = scene.get_node(nodes.ball_light).unwrap();
    assert!(light.transform.world_position().abs_diff_eq(state.ball_position, 1e-4));
}

#[test]
fn render_draws_four_meshes() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let mut input = Input::new();
    step(&mut game, &mut input, DT);

    let mut surface = CommandBuffer::new();
    game.render(&mut surface);

    assert_eq!(surface.draw_count(), 4);
    assert_eq!(surface.last_uniform(uniforms::LIGHTS_COUNT), Some(UniformValue::Int(1)));
    assert_eq!(
        surface.last_uniform(uniforms::CAMERA_POSITION),
        Some(UniformValue::Vec3(Vec3::new(0.0, 2.0, -20.0)))
    );
    assert_eq!(
        surface.last_uniform(uniforms::BALL_POSITION),
        Some(UniformValue::Vec3(game.state().ball_position))
    );
    assert_eq!(
        surface.last_uniform(&uniforms::light_color(0)),
        Some(UniformValue::Vec3(Vec3::ONE))
    );
    // The text overlay is drawn last, with the 2D projection
    assert_eq!(
        surface.last_uniform(uniforms::VIEW_PROJECTION),
        Some(UniformValue::Mat4(game.frame_uniforms().overlay_projection))
    );
}

#[test]
fn viewport_changes_projection() {
    let mut game = Game::new(GameOptions::default(), launch_timeline(), ASSETS, None).unwrap();
    let before = game.frame_uniforms();
    game.set_viewport(800, 800);
    let after = game.frame_uniforms();
    assert_ne!(before.overlay_projection, after.overlay_projection);
    assert_ne!(before.view_projection, after.view_projection);
    assert!((game.camera().aspect - 1.0).abs() < f32::EPSILON);

    game.set_viewport(0, 600);
    assert_eq!(game.viewport(), (800, 800));
}
