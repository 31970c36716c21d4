//! Game module
//!
//! The [`Game`] context owns everything a session needs: the scene graph,
//! the simulation state, the keyframe timeline and, when music is enabled,
//! the audio backend. A frame is one call to [`Game::update`] followed by
//! one call to [`Game::render`].
//!
//! - [`config`]: startup options
//! - [`keyframes`]: beat timeline
//! - [`physics`]: play-field geometry, bounce and height interpolation
//! - [`state`]: phase machine and accumulators

pub mod config;
pub mod keyframes;
pub mod physics;
pub mod state;

pub use config::GameOptions;
pub use keyframes::{Keyframe, KeyframeEndpoint, KeyframeInterval, KeyframeTimeline};
pub use physics::{BallBounds, PaddleFootprint, PlayField};
pub use state::{GamePhase, GameState};

use std::time::Duration;

use glam::Vec3;

use crate::audio::{AudioBackend, ClipHandle, SoundHandle};
use crate::errors::{BeatError, Result};
use crate::render::{FrameUniforms, RenderSurface, render_frame};
use crate::resources::{Input, MaterialTextures, MeshHandle, MouseButton, TextureHandle};
use crate::scene::camera::overlay_projection;
use crate::scene::{Camera, NodeHandle, NodeKind, Scene};

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.0, -20.0);
pub const CAMERA_FOV_DEGREES: f32 = 80.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 350.0;
pub const TEXT_POSITION: Vec3 = Vec3::new(50.0, 50.0, 0.0);
pub const DEFAULT_VIEWPORT: (u32, u32) = (1366, 768);

/// GPU resources the scene is built from, uploaded by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneAssets {
    pub box_mesh: MeshHandle,
    pub box_textures: MaterialTextures,
    pub pad_mesh: MeshHandle,
    pub ball_mesh: MeshHandle,
    pub text_mesh: MeshHandle,
    pub text_texture: TextureHandle,
}

/// Handles of the nodes the game moves every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameNodes {
    pub root: NodeHandle,
    pub play_box: NodeHandle,
    pub pad: NodeHandle,
    pub ball: NodeHandle,
    pub ball_light: NodeHandle,
    pub text: NodeHandle,
}

struct Music {
    backend: Box<dyn AudioBackend>,
    clip: ClipHandle,
    /// Live instance; present from session start until the loss
    sound: Option<SoundHandle>,
}

/// One game instance.
pub struct Game {
    options: GameOptions,
    timeline: KeyframeTimeline,
    field: PlayField,
    scene: Scene,
    nodes: GameNodes,
    state: GameState,
    camera: Camera,
    viewport: (u32, u32),
    music: Option<Music>,
}

impl Game {
    /// Builds the scene and, if music is enabled, loads the clip.
    ///
    /// Fails when music is enabled and the clip cannot be loaded, or when no
    /// backend was supplied for it. `audio` is ignored when music is off.
    pub fn new(
        options: GameOptions,
        timeline: KeyframeTimeline,
        assets: SceneAssets,
        audio: Option<Box<dyn AudioBackend>>,
    ) -> Result<Self> {
        options.validate()?;
        let music = if options.enable_music {
            let mut backend =
                audio.ok_or_else(|| BeatError::AudioBackend("music is enabled but no audio backend was given".into()))?;
            let clip = backend.load_clip(&options.music_path)?;
            Some(Music {
                backend,
                clip,
                sound: None,
            })
        } else {
            None
        };

        let (scene, nodes) = build_scene(&assets);
        log::info!("Initialized scene with {} SceneNodes.", scene.count_descendants(nodes.root));

        let field = PlayField::default();
        let mut state = GameState::new();
        state.ball_position = field.ball_over_paddle(state.pad_x, state.pad_z);

        let (width, height) = DEFAULT_VIEWPORT;
        let camera = Camera::new_perspective(
            CAMERA_POSITION,
            CAMERA_FOV_DEGREES,
            width as f32 / height as f32,
            CAMERA_NEAR,
            CAMERA_FAR,
        );

        let mut game = Self {
            options,
            timeline,
            field,
            scene,
            nodes,
            state,
            camera,
            viewport: DEFAULT_VIEWPORT,
            music,
        };
        game.sync_scene();

        log::info!("Ready. Click to start!");
        Ok(game)
    }

    /// Advances one frame of `dt` seconds, then refreshes the scene's world
    /// matrices.
    pub fn update(&mut self, input: &Input, dt: f64) {
        self.apply_resize(input);
        self.apply_pointer(input);

        match self.state.phase {
            GamePhase::Idle => {
                if input.get_mouse_button_down(MouseButton::PRIMARY) {
                    self.start_music();
                    self.state.begin_session(self.options.start_time);
                    log::info!("Session started at {:.2}s", self.options.start_time);
                }
                self.state.ball_position = self.field.ball_over_paddle(self.state.pad_x, self.state.pad_z);
            }
            GamePhase::Lost => {
                self.state.total_elapsed += dt;
                if input.get_mouse_button_up(MouseButton::PRIMARY) {
                    self.state.reset_session();
                    log::info!("Ready. Click to start!");
                }
            }
            GamePhase::Paused => {
                self.state.total_elapsed += dt;
                if input.get_mouse_button_up(MouseButton::SECONDARY) {
                    self.state.phase = GamePhase::Running;
                    self.resume_music();
                    log::debug!("Resumed at {:.2}s", self.state.game_elapsed);
                }
            }
            GamePhase::Running => {
                self.state.total_elapsed += dt;
                self.step_running(input, dt);
            }
        }

        self.camera.follow_paddle(self.state.pad_x, self.state.pad_z);
        self.sync_scene();
    }

    /// Follows the window size reported through `input`, once one is known.
    fn apply_resize(&mut self, input: &Input) {
        let size = input.screen_size();
        if size == glam::Vec2::ZERO {
            return;
        }
        let (width, height) = (size.x as u32, size.y as u32);
        if (width, height) != self.viewport {
            self.set_viewport(width, height);
        }
    }

    fn apply_pointer(&mut self, input: &Input) {
        let delta = input.mouse_delta();
        if delta == glam::Vec2::ZERO {
            return;
        }
        let (width, height) = self.viewport;
        let sensitivity = self.options.mouse_sensitivity;
        self.state.move_paddle(
            -sensitivity * delta.x / width.max(1) as f32,
            -sensitivity * delta.y / height.max(1) as f32,
        );
    }

    fn step_running(&mut self, input: &Input, dt: f64) {
        let state = &mut self.state;
        state.game_elapsed += dt;

        if input.get_mouse_button_up(MouseButton::SECONDARY) {
            state.phase = GamePhase::Paused;
            log::debug!("Paused at {:.2}s", state.game_elapsed);
        }

        let current = self.timeline.resolve(state.game_elapsed, state.current_keyframe);
        let jumped = current != state.previous_keyframe;
        state.current_keyframe = current;
        state.previous_keyframe = current;
        if jumped {
            log::debug!("Keyframe {} at {:.3}s", current, state.game_elapsed);
        }

        let interval = self.timeline.interval(current);
        let bounds = self.field.ball_bounds();

        physics::advance_ball(&mut state.ball_position, state.ball_direction, dt);
        state.ball_position.y = physics::ball_height(&bounds, &interval, state.game_elapsed);
        physics::bounce(&mut state.ball_position, &mut state.ball_direction, &bounds);

        if self.options.enable_autoplay {
            let (pad_x, pad_z) = self.field.autoplay_paddle(state.ball_position);
            state.set_paddle(pad_x, pad_z);
        }

        let missed = jumped
            && interval.is_launch()
            && !self
                .field
                .paddle_footprint(state.pad_x, state.pad_z)
                .contains(state.ball_position.x, state.ball_position.z);

        if state.is_paused() {
            self.pause_music();
        }
        if missed {
            self.state.phase = GamePhase::Lost;
            self.stop_music();
            log::info!("Lost at {:.2}s. Click to continue.", self.state.game_elapsed);
        }
    }

    /// Writes the simulation state into the box, ball and pad nodes and
    /// propagates transforms.
    fn sync_scene(&mut self) {
        let ball_position = self.state.ball_position;
        let ball_spin = (self.state.total_elapsed * 2.0) as f32;
        let pad_position = self.field.paddle_position(self.state.pad_x, self.state.pad_z);

        if let Some(node) = self.scene.get_node_mut(self.nodes.play_box) {
            node.transform.position = self.field.box_position;
        }
        if let Some(node) = self.scene.get_node_mut(self.nodes.ball) {
            node.transform.position = ball_position;
            node.transform.set_uniform_scale(self.field.ball_radius);
            node.transform.rotation = Vec3::new(0.0, ball_spin, 0.0);
        }
        if let Some(node) = self.scene.get_node_mut(self.nodes.pad) {
            node.transform.position = pad_position;
        }

        self.scene.update_matrix_world();
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Frame-global shader values for the current state.
    #[must_use]
    pub fn frame_uniforms(&self) -> FrameUniforms {
        let (width, height) = self.viewport;
        FrameUniforms {
            view_projection: *self.camera.view_projection_matrix(),
            overlay_projection: overlay_projection(width as f32, height as f32),
            camera_position: self.camera.position,
            ball_position: self.state.ball_position,
            ball_radius: self.field.ball_radius,
        }
    }

    /// Runs both render walks against `surface`.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        render_frame(&self.scene, &self.frame_uniforms(), surface);
    }

    /// Resizes the drawable area. Zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.set_aspect(width as f32 / height as f32);
    }

    // ========================================================================
    // Music
    // ========================================================================

    fn start_music(&mut self) {
        let Some(music) = self.music.as_mut() else {
            return;
        };
        let offset = match self.options.start_offset() {
            Ok(offset) => offset,
            Err(e) => {
                log::warn!("Playing music from the start: {e}");
                Duration::ZERO
            }
        };
        let sound = match music.backend.create_instance(music.clip) {
            Ok(sound) => sound,
            Err(e) => {
                log::warn!("Could not create music instance: {e}");
                return;
            }
        };
        if let Err(e) = music.backend.set_start_offset(sound, offset) {
            log::warn!("Could not seek music: {e}");
        }
        if let Err(e) = music.backend.play(sound) {
            log::warn!("Could not start music: {e}");
        }
        music.sound = Some(sound);
    }

    fn pause_music(&mut self) {
        if let Some(music) = self.music.as_mut()
            && let Some(sound) = music.sound
            && let Err(e) = music.backend.pause(sound)
        {
            log::warn!("Could not pause music: {e}");
        }
    }

    fn resume_music(&mut self) {
        if let Some(music) = self.music.as_mut()
            && let Some(sound) = music.sound
            && let Err(e) = music.backend.play(sound)
        {
            log::warn!("Could not resume music: {e}");
        }
    }

    /// Stops and releases the live instance, if any.
    fn stop_music(&mut self) {
        if let Some(music) = self.music.as_mut()
            && let Some(sound) = music.sound.take()
        {
            if let Err(e) = music.backend.stop(sound) {
                log::warn!("Could not stop music: {e}");
            }
            music.backend.release(sound);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and tests; the next [`update`](Self::update)
    /// writes changes through to the scene.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    #[must_use]
    pub fn timeline(&self) -> &KeyframeTimeline {
        &self.timeline
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn field(&self) -> &PlayField {
        &self.field
    }

    #[must_use]
    pub fn nodes(&self) -> &GameNodes {
        &self.nodes
    }

    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.stop_music();
    }
}

/// root → { box, pad, ball → ball light, text }
fn build_scene(assets: &SceneAssets) -> (Scene, GameNodes) {
    let mut scene = Scene::new();
    let root = scene.root();

    let play_box = scene.create_node_with_kind(NodeKind::NormalMappedGeometry {
        textures: assets.box_textures,
    });
    let pad = scene.create_node();
    let ball = scene.create_node();
    let text = scene.create_node_with_kind(NodeKind::Geometry2D {
        texture: assets.text_texture,
    });
    let ball_light = scene.create_light_node(Vec3::ONE);

    scene.attach(play_box, root);
    scene.attach(pad, root);
    scene.attach(ball, root);
    scene.attach(text, root);
    scene.attach(ball_light, ball);

    for (handle, mesh) in [
        (play_box, assets.box_mesh),
        (pad, assets.pad_mesh),
        (ball, assets.ball_mesh),
        (text, assets.text_mesh),
    ] {
        if let Some(node) = scene.get_node_mut(handle) {
            node.mesh = Some(mesh);
        }
    }
    if let Some(node) = scene.get_node_mut(text) {
        node.transform.position = TEXT_POSITION;
    }

    let nodes = GameNodes {
        root,
        play_box,
        pad,
        ball,
        ball_light,
        text,
    };
    (scene, nodes)
}
