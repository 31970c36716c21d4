//! Winit input event adapter
//!
//! Translates winit events into the engine's platform-agnostic input types.
//!
//! The paddle is driven by relative pointer motion. Two sources work:
//! - [`process_device_event`]: raw `MouseMotion` deltas
//! - [`recentre_cursor`]: the cursor offset from the window centre, after
//!   which the cursor is warped back to the centre
//!
//! When using [`recentre_cursor`] for `CursorMoved`, route the remaining
//! window events through [`process_window_event`] with
//! `track_cursor = false` so motion is not counted twice.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::window::Window;

use crate::resources::input::{ButtonState, Input, MouseButton};

/// Converts a winit mouse button to the engine's `MouseButton`
#[must_use]
pub fn translate_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Back,
        winit::event::MouseButton::Forward => MouseButton::Forward,
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}

/// Converts a winit `ElementState` to the engine's `ButtonState`
#[must_use]
pub fn translate_element_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// Feeds a winit window event into `input`.
///
/// `track_cursor` controls whether `CursorMoved` is injected as an
/// absolute position.
pub fn process_window_event(input: &mut Input, event: &WindowEvent, track_cursor: bool) {
    match event {
        WindowEvent::CursorMoved { position, .. } if track_cursor => {
            input.inject_mouse_position(position.x as f32, position.y as f32);
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let engine_button = translate_mouse_button(*button);
            let engine_state = translate_element_state(*state);
            input.inject_mouse_button(engine_button, engine_state);
        }

        WindowEvent::Resized(size) => {
            input.inject_resize(size.width, size.height);
        }

        _ => {}
    }
}

/// Feeds raw device motion into `input`.
pub fn process_device_event(input: &mut Input, event: &DeviceEvent) {
    if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
        input.inject_mouse_motion(*dx as f32, *dy as f32);
    }
}

/// Centre of a window of `size`, in physical pixels.
#[inline]
#[must_use]
pub fn window_centre(size: PhysicalSize<u32>) -> PhysicalPosition<f64> {
    PhysicalPosition::new(f64::from(size.width) / 2.0, f64::from(size.height) / 2.0)
}

/// Offset of `position` from the centre of a window of `size`.
#[must_use]
pub fn cursor_offset(size: PhysicalSize<u32>, position: PhysicalPosition<f64>) -> (f32, f32) {
    let centre = window_centre(size);
    ((position.x - centre.x) as f32, (position.y - centre.y) as f32)
}

/// Injects the cursor's offset from the window centre as motion, then warps
/// the cursor back to the centre so the next sample is relative again.
pub fn recentre_cursor(input: &mut Input, window: &Window, position: PhysicalPosition<f64>) {
    let size = window.inner_size();
    let (dx, dy) = cursor_offset(size, position);
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    input.inject_mouse_motion(dx, dy);

    if let Err(e) = window.set_cursor_position(window_centre(size)) {
        log::warn!("Failed to re-centre cursor: {e}");
    }
}
