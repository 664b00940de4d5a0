//! Input controller
//!
//! Raw pointer and key events land here between frames; the simulation
//! only ever sees the [`TickInput`] snapshot taken at the start of a tick.

use glam::Vec2;

use super::state::{Field, WeaponMode};

/// Actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Hold to fire
    Fire,
    /// Hold for the scatter gun
    Scatter,
    /// Hold for the railgun
    Railgun,
}

impl Control {
    /// Map a browser `KeyboardEvent.key` name to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "s" => Some(Control::Fire),
            "shift" => Some(Control::Scatter),
            "r" => Some(Control::Railgun),
            _ => None,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Pointer position the player steers and aims toward
    pub pointer: Vec2,
    pub fire_held: bool,
    pub mode: WeaponMode,
    /// Playfield size for this tick
    pub field: Field,
}

impl TickInput {
    /// Idle input: pointer parked at `pointer`, nothing held
    pub fn at(pointer: Vec2, field: Field) -> Self {
        Self {
            pointer,
            fire_held: false,
            mode: WeaponMode::Normal,
            field,
        }
    }
}

/// Tracks raw input state between frames.
///
/// Weapon mode is level-triggered: it follows which modifier keys are
/// physically down. With both down, the most recently pressed one wins.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    pointer: Vec2,
    fire_held: bool,
    /// Held mode keys, oldest press first
    mode_keys: Vec<Control>,
}

impl InputController {
    pub fn new(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Default::default()
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn key_down(&mut self, control: Control) {
        match control {
            Control::Fire => self.fire_held = true,
            Control::Scatter | Control::Railgun => {
                // Auto-repeat must not reorder precedence
                if !self.mode_keys.contains(&control) {
                    self.mode_keys.push(control);
                }
            }
        }
    }

    pub fn key_up(&mut self, control: Control) {
        match control {
            Control::Fire => self.fire_held = false,
            Control::Scatter | Control::Railgun => self.mode_keys.retain(|&c| c != control),
        }
    }

    /// Forget every held key (focus loss swallows key-up events)
    pub fn release_all(&mut self) {
        self.fire_held = false;
        self.mode_keys.clear();
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn fire_held(&self) -> bool {
        self.fire_held
    }

    pub fn mode(&self) -> WeaponMode {
        match self.mode_keys.last() {
            Some(Control::Scatter) => WeaponMode::Scatter,
            Some(Control::Railgun) => WeaponMode::Railgun,
            _ => WeaponMode::Normal,
        }
    }

    pub fn snapshot(&self, field: Field) -> TickInput {
        TickInput {
            pointer: self.pointer,
            fire_held: self.fire_held,
            mode: self.mode(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Control::from_key("s"), Some(Control::Fire));
        assert_eq!(Control::from_key("S"), Some(Control::Fire));
        assert_eq!(Control::from_key("Shift"), Some(Control::Scatter));
        assert_eq!(Control::from_key("r"), Some(Control::Railgun));
        assert_eq!(Control::from_key("R"), Some(Control::Railgun));
        assert_eq!(Control::from_key("x"), None);
    }

    #[test]
    fn test_fire_hold() {
        let mut input = InputController::default();
        assert!(!input.fire_held());
        input.key_down(Control::Fire);
        assert!(input.fire_held());
        input.key_up(Control::Fire);
        assert!(!input.fire_held());
    }

    #[test]
    fn test_mode_follows_held_key() {
        let mut input = InputController::default();
        assert_eq!(input.mode(), WeaponMode::Normal);
        input.key_down(Control::Scatter);
        assert_eq!(input.mode(), WeaponMode::Scatter);
        input.key_up(Control::Scatter);
        assert_eq!(input.mode(), WeaponMode::Normal);
        input.key_down(Control::Railgun);
        assert_eq!(input.mode(), WeaponMode::Railgun);
        input.key_up(Control::Railgun);
        assert_eq!(input.mode(), WeaponMode::Normal);
    }

    #[test]
    fn test_last_pressed_wins() {
        let mut input = InputController::default();
        input.key_down(Control::Scatter);
        input.key_down(Control::Railgun);
        assert_eq!(input.mode(), WeaponMode::Railgun);

        // Key repeat of the older key does not steal precedence
        input.key_down(Control::Scatter);
        assert_eq!(input.mode(), WeaponMode::Railgun);

        // Releasing the newest falls back to the one still held
        input.key_up(Control::Railgun);
        assert_eq!(input.mode(), WeaponMode::Scatter);
        input.key_up(Control::Scatter);
        assert_eq!(input.mode(), WeaponMode::Normal);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputController::default();
        input.key_down(Control::Fire);
        input.key_down(Control::Railgun);
        input.release_all();
        assert!(!input.fire_held());
        assert_eq!(input.mode(), WeaponMode::Normal);
    }

    #[test]
    fn test_snapshot() {
        let field = Field::new(640.0, 480.0);
        let mut input = InputController::new(field.center());
        input.pointer_moved(10.0, 20.0);
        input.key_down(Control::Fire);
        input.key_down(Control::Scatter);

        let snap = input.snapshot(field);
        assert_eq!(snap.pointer, Vec2::new(10.0, 20.0));
        assert!(snap.fire_held);
        assert_eq!(snap.mode, WeaponMode::Scatter);
        assert_eq!(snap.field, field);

        // Snapshot is detached from later events
        input.key_up(Control::Fire);
        assert!(snap.fire_held);
    }
}
