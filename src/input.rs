//! Input handling for the explorer window.
//!
//! Tracks keyboard and mouse state across winit events: instantaneous
//! presses (for shortcuts like pause and step) and continuous state (for
//! painting cells while a button is held).
//!
//! Shortcuts handled by the explorer:
//!
//! | Key | Action |
//! |-----|--------|
//! | Space | Pause / resume |
//! | N | Step one generation |
//! | R | Reseed with a new random soup |
//! | C | Clear the lattice |
//! | F | Toggle facade mode |
//! | P | Save a PNG snapshot |
//! | Up / Down | Raise / lower the generation rate |
//! | Escape | Quit |

use std::collections::HashSet;

use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(btn: WinitMouseButton) -> Option<Self> {
        match btn {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// The keys the explorer binds, plus a catch-all for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Escape,
    Up,
    Down,
    N,
    R,
    C,
    F,
    P,
    Other(u32),
}

impl From<WinitKeyCode> for Key {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Space => Key::Space,
            WinitKeyCode::Escape => Key::Escape,
            WinitKeyCode::ArrowUp => Key::Up,
            WinitKeyCode::ArrowDown => Key::Down,
            WinitKeyCode::KeyN => Key::N,
            WinitKeyCode::KeyR => Key::R,
            WinitKeyCode::KeyC => Key::C,
            WinitKeyCode::KeyF => Key::F,
            WinitKeyCode::KeyP => Key::P,
            _ => Key::Other(key as u32),
        }
    }
}

/// Keyboard and mouse state, updated from winit window events.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<Key>,
    keys_pressed: HashSet<Key>,
    mouse_held: HashSet<MouseButton>,
    cursor: Option<(f64, f64)>,
}

impl Input {
    /// Create a new input tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key was pressed this frame (just went down, no repeat).
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Cursor position in physical window pixels, if the cursor is inside.
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = Key::from(keycode);
                    match event.state {
                        ElementState::Pressed => {
                            if !self.keys_held.contains(&key) {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_held.insert(key);
                        }
                        ElementState::Released => {
                            self.keys_held.remove(&key);
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = MouseButton::from_winit(*button) {
                    match state {
                        ElementState::Pressed => {
                            self.mouse_held.insert(btn);
                        }
                        ElementState::Released => {
                            self.mouse_held.remove(&btn);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.mouse_held.clear();
            }
            _ => {}
        }
    }
}
