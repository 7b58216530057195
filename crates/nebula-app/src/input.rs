//! Mouse input mapped to orbit deltas: left drag rotates, the wheel zooms.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of trackpad scroll treated as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Accumulates mouse events between frames.
#[derive(Debug, Clone)]
pub struct OrbitInput {
    /// Radians of rotation per pixel dragged.
    sensitivity: f32,
    /// Radius multiplier per wheel line toward the user.
    zoom_step: f32,
    dragging: bool,
    cursor: Option<Vec2>,
    drag: Vec2,
    scroll_lines: f32,
}

impl OrbitInput {
    pub fn new(sensitivity: f32, zoom_step: f32) -> Self {
        Self {
            sensitivity,
            zoom_step,
            dragging: false,
            cursor: None,
            drag: Vec2::ZERO,
            scroll_lines: 0.0,
        }
    }

    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if self.dragging
            && let Some(previous) = self.cursor
        {
            self.drag += position - previous;
        }
        self.cursor = Some(position);
    }

    /// Forget the cursor so re-entry does not register as a jump.
    pub fn on_cursor_left(&mut self) {
        self.cursor = None;
        self.dragging = false;
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_lines += match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    /// Drain the accumulated `(delta_azimuth, delta_elevation)` in radians.
    ///
    /// Dragging right turns the view right around the target; dragging down
    /// raises the eye.
    pub fn take_rotation(&mut self) -> Option<(f32, f32)> {
        let drag = std::mem::take(&mut self.drag);
        (drag != Vec2::ZERO).then(|| (-drag.x * self.sensitivity, drag.y * self.sensitivity))
    }

    /// Drain the accumulated scroll as a radius factor; positive scroll
    /// (away from the user) zooms in.
    pub fn take_zoom(&mut self) -> Option<f32> {
        let lines = std::mem::take(&mut self.scroll_lines);
        (lines != 0.0).then(|| self.zoom_step.powf(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> OrbitInput {
        OrbitInput::new(0.01, 0.9)
    }

    #[test]
    fn test_motion_without_button_does_not_rotate() {
        let mut input = input();
        input.on_cursor_moved(10.0, 10.0);
        input.on_cursor_moved(50.0, 30.0);
        assert_eq!(input.take_rotation(), None);
    }

    #[test]
    fn test_left_drag_rotates() {
        let mut input = input();
        input.on_cursor_moved(100.0, 100.0);
        input.on_button(MouseButton::Left, ElementState::Pressed);
        input.on_cursor_moved(110.0, 95.0);
        let (azimuth, elevation) = input.take_rotation().unwrap();
        assert!((azimuth + 0.1).abs() < 1e-6);
        assert!((elevation + 0.05).abs() < 1e-6);
        assert_eq!(input.take_rotation(), None);
    }

    #[test]
    fn test_release_stops_rotation() {
        let mut input = input();
        input.on_cursor_moved(0.0, 0.0);
        input.on_button(MouseButton::Left, ElementState::Pressed);
        input.on_button(MouseButton::Left, ElementState::Released);
        input.on_cursor_moved(40.0, 0.0);
        assert_eq!(input.take_rotation(), None);
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let mut input = input();
        input.on_cursor_moved(0.0, 0.0);
        input.on_button(MouseButton::Right, ElementState::Pressed);
        input.on_cursor_moved(40.0, 0.0);
        assert_eq!(input.take_rotation(), None);
    }

    #[test]
    fn test_reentering_window_does_not_jump() {
        let mut input = input();
        input.on_cursor_moved(0.0, 0.0);
        input.on_button(MouseButton::Left, ElementState::Pressed);
        input.on_cursor_left();
        input.on_button(MouseButton::Left, ElementState::Pressed);
        input.on_cursor_moved(500.0, 500.0);
        assert_eq!(input.take_rotation(), None);
    }

    #[test]
    fn test_scroll_up_zooms_in() {
        let mut input = input();
        input.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        let factor = input.take_zoom().unwrap();
        assert!((factor - 0.81).abs() < 1e-6);
        assert_eq!(input.take_zoom(), None);
    }

    #[test]
    fn test_pixel_scroll_is_normalized() {
        let mut input = input();
        input.on_scroll(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, -40.0),
        ));
        let factor = input.take_zoom().unwrap();
        assert!((factor - 1.0 / 0.9).abs() < 1e-5);
    }
}
