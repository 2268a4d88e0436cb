//! Pointer input for sparkring simulations.
//!
//! `Input` turns raw winit window events into the per-tick [`PointerState`]
//! the simulation consumes: where the cursor is (if it is over the window)
//! and whether the attract button is held.
//!
//! # Usage
//!
//! ```ignore
//! // In your winit ApplicationHandler:
//! fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
//!     self.input.handle_event(&event);
//!     if let WindowEvent::RedrawRequested = event {
//!         self.time.update();
//!         self.sim.tick(self.time.elapsed(), &self.input.pointer());
//!     }
//! }
//! ```

use glam::DVec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Other(3),
            WinitMouseButton::Forward => MouseButton::Other(4),
            WinitMouseButton::Other(id) => MouseButton::Other(id),
        }
    }
}

/// Pointer input for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Cursor position in simulation coordinates, `None` when outside the window.
    pub position: Option<DVec2>,
    /// Whether particles should be pulled toward the cursor this tick.
    pub attract: bool,
}

impl PointerState {
    /// No pointer and no attraction.
    pub fn none() -> Self {
        Self::default()
    }

    /// Pointer at `position`, optionally attracting.
    pub fn at(position: DVec2, attract: bool) -> Self {
        Self {
            position: Some(position),
            attract,
        }
    }

    /// The attraction target, if attraction is active and a pointer is present.
    pub fn attract_target(&self) -> Option<DVec2> {
        if self.attract {
            self.position
        } else {
            None
        }
    }
}

/// Cursor and held-button state accumulated from window events.
#[derive(Debug)]
pub struct Input {
    mouse_held: HashSet<MouseButton>,

    // Cursor
    mouse_position: DVec2,
    cursor_inside: bool,

    /// Button that triggers attraction while held.
    attract_button: MouseButton,
}

impl Input {
    /// Create a new input tracker. Attraction is bound to the right button.
    pub fn new() -> Self {
        Self {
            mouse_held: HashSet::new(),
            mouse_position: DVec2::ZERO,
            cursor_inside: false,
            attract_button: MouseButton::Right,
        }
    }

    /// Bind attraction to a different button.
    pub fn with_attract_button(mut self, button: MouseButton) -> Self {
        self.attract_button = button;
        self
    }

    // ========== Queries ==========

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Last known cursor position in window pixels.
    pub fn mouse_position(&self) -> DVec2 {
        self.mouse_position
    }

    /// Whether the cursor is over the window.
    pub fn cursor_inside(&self) -> bool {
        self.cursor_inside
    }

    /// Pointer state for the current tick.
    pub fn pointer(&self) -> PointerState {
        PointerState {
            position: self.cursor_inside.then_some(self.mouse_position),
            attract: self.mouse_held(self.attract_button),
        }
    }

    // ========== Event Handling ==========

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => self.mouse_held.insert(button),
                    ElementState::Released => self.mouse_held.remove(&button),
                };
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = DVec2::new(position.x, position.y);
                self.cursor_inside = true;
            }
            WindowEvent::CursorEntered { .. } => {
                self.cursor_inside = true;
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_inside = false;
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered while unfocused
                self.mouse_held.clear();
            }
            _ => {}
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    fn device() -> DeviceId {
        // SAFETY: only used to build synthetic events, never passed to winit
        unsafe { DeviceId::dummy() }
    }

    fn moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    fn button(button: WinitMouseButton, state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button,
        }
    }

    #[test]
    fn test_no_pointer_initially() {
        let input = Input::new();
        assert_eq!(input.pointer(), PointerState::none());
    }

    #[test]
    fn test_right_button_attracts() {
        let mut input = Input::new();
        input.handle_event(&moved(10.0, 20.0));

        input.handle_event(&button(WinitMouseButton::Left, ElementState::Pressed));
        assert_eq!(input.pointer(), PointerState::at(DVec2::new(10.0, 20.0), false));

        input.handle_event(&button(WinitMouseButton::Right, ElementState::Pressed));
        let pointer = input.pointer();
        assert!(pointer.attract);
        assert_eq!(pointer.attract_target(), Some(DVec2::new(10.0, 20.0)));

        input.handle_event(&button(WinitMouseButton::Right, ElementState::Released));
        assert!(!input.pointer().attract);
        assert!(input.mouse_held(MouseButton::Left));
    }

    #[test]
    fn test_cursor_left_event_hides_pointer() {
        let mut input = Input::new();
        input.handle_event(&moved(5.0, 5.0));
        input.handle_event(&button(WinitMouseButton::Right, ElementState::Pressed));
        assert_eq!(input.pointer().attract_target(), Some(DVec2::new(5.0, 5.0)));

        input.handle_event(&WindowEvent::CursorLeft { device_id: device() });
        let pointer = input.pointer();
        assert_eq!(pointer.position, None);
        assert_eq!(pointer.attract_target(), None);
        assert_eq!(input.mouse_position(), DVec2::new(5.0, 5.0));

        input.handle_event(&WindowEvent::CursorEntered { device_id: device() });
        assert_eq!(input.pointer().position, Some(DVec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_focus_loss_releases_buttons() {
        let mut input = Input::new();
        input.handle_event(&button(WinitMouseButton::Right, ElementState::Pressed));

        input.handle_event(&WindowEvent::Focused(true));
        assert!(input.mouse_held(MouseButton::Right));

        input.handle_event(&WindowEvent::Focused(false));
        assert!(!input.mouse_held(MouseButton::Right));
    }

    #[test]
    fn test_custom_attract_button() {
        let mut input = Input::new().with_attract_button(MouseButton::Other(4));
        input.handle_event(&moved(0.0, 0.0));
        input.handle_event(&button(WinitMouseButton::Forward, ElementState::Pressed));
        assert!(input.pointer().attract);
    }
}
