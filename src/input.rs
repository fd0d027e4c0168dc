//! Keyboard input for the orrery.
//!
//! [`Input`] sits between raw winit window events and the
//! [`World`](crate::World): it tracks which keys are held (so auto-repeat does
//! not fire the same control twice), translates fresh key presses into
//! [`ControlEvent`]s through [`KeyBindings`], and hands them out once per
//! frame with [`Input::drain`].
//!
//! | Key | Event |
//! |-----|-------|
//! | Space, P | [`ControlEvent::TogglePause`] |
//! | Up, `=` | [`ControlEvent::SpeedUp`] |
//! | Down, `-` | [`ControlEvent::SpeedDown`] |
//! | Escape, Q | [`ControlEvent::Quit`] |

use std::collections::{HashMap, HashSet};

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::control::ControlEvent;

/// Keys the orrery knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Escape,
    Up,
    Down,
    P,
    Q,
    Equal,
    Minus,

    // Other
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyQ => KeyCode::Q,
            WinitKeyCode::Equal | WinitKeyCode::NumpadAdd => KeyCode::Equal,
            WinitKeyCode::Minus | WinitKeyCode::NumpadSubtract => KeyCode::Minus,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Key to control-event table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: HashMap<KeyCode, ControlEvent>,
}

impl KeyBindings {
    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn bind(mut self, key: KeyCode, event: ControlEvent) -> Self {
        self.map.insert(key, event);
        self
    }

    pub fn get(&self, key: KeyCode) -> Option<ControlEvent> {
        self.map.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::empty()
            .bind(KeyCode::Space, ControlEvent::TogglePause)
            .bind(KeyCode::P, ControlEvent::TogglePause)
            .bind(KeyCode::Up, ControlEvent::SpeedUp)
            .bind(KeyCode::Equal, ControlEvent::SpeedUp)
            .bind(KeyCode::Down, ControlEvent::SpeedDown)
            .bind(KeyCode::Minus, ControlEvent::SpeedDown)
            .bind(KeyCode::Escape, ControlEvent::Quit)
            .bind(KeyCode::Q, ControlEvent::Quit)
    }
}

/// Pending control events plus held-key state.
#[derive(Debug, Default)]
pub struct Input {
    bindings: KeyBindings,
    keys_held: HashSet<KeyCode>,
    pending: Vec<ControlEvent>,
}

impl Input {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys_held: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Queue an event that did not come from a key.
    pub fn push(&mut self, event: ControlEvent) {
        self.pending.push(event);
    }

    /// Hand out everything queued since the last call, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, ControlEvent> {
        self.pending.drain(..)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = KeyCode::from(keycode);
                    match event.state {
                        ElementState::Pressed => self.key_down(key),
                        ElementState::Released => self.key_up(key),
                    }
                }
            }
            // Key-up events are lost while unfocused
            WindowEvent::Focused(false) => self.keys_held.clear(),
            _ => {}
        }
    }

    pub(crate) fn key_down(&mut self, key: KeyCode) {
        // Only fire on the initial press, not on auto-repeat
        if self.keys_held.insert(key) {
            if let Some(event) = self.bindings.get(key) {
                self.pending.push(event);
            }
        }
    }

    pub(crate) fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(KeyCode::Space), Some(ControlEvent::TogglePause));
        assert_eq!(bindings.get(KeyCode::Up), Some(ControlEvent::SpeedUp));
        assert_eq!(bindings.get(KeyCode::Down), Some(ControlEvent::SpeedDown));
        assert_eq!(bindings.get(KeyCode::Escape), Some(ControlEvent::Quit));
        assert_eq!(bindings.get(KeyCode::Other(7)), None);
    }

    #[test]
    fn test_key_press_queues_event_once() {
        let mut input = Input::default();

        input.key_down(KeyCode::Space);
        // auto-repeat delivers more presses while held
        input.key_down(KeyCode::Space);
        assert!(input.key_held(KeyCode::Space));

        let events: Vec<_> = input.drain().collect();
        assert_eq!(events, vec![ControlEvent::TogglePause]);
        assert!(!input.has_pending());

        input.key_up(KeyCode::Space);
        input.key_down(KeyCode::Space);
        assert_eq!(input.drain().count(), 1);
    }

    #[test]
    fn test_drain_preserves_order() {
        let mut input = Input::default();
        input.key_down(KeyCode::Up);
        input.key_down(KeyCode::Down);
        input.push(ControlEvent::Quit);

        let events: Vec<_> = input.drain().collect();
        assert_eq!(
            events,
            vec![ControlEvent::SpeedUp, ControlEvent::SpeedDown, ControlEvent::Quit]
        );
    }

    #[test]
    fn test_unbound_keys_are_tracked_but_silent() {
        let mut input = Input::new(KeyBindings::empty());
        input.key_down(KeyCode::Space);
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.has_pending());
    }

    #[test]
    fn test_winit_key_mapping() {
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowUp), KeyCode::Up);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadAdd), KeyCode::Equal);
        assert!(matches!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::Other(_)));
    }
}
