//! Logical actions and key-state tracking

use std::collections::BTreeSet;

/// Everything the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Forward,
    Back,
    TurnLeft,
    TurnRight,
    Boost,
    Jump,
    ToggleCamera,
    Quit,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Forward,
        Action::Back,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Boost,
        Action::Jump,
        Action::ToggleCamera,
        Action::Quit,
    ];

    /// Default keyboard binding
    pub fn key(&self) -> &'static str {
        match self {
            Action::Forward => "w",
            Action::Back => "s",
            Action::TurnLeft => "a",
            Action::TurnRight => "d",
            Action::Boost => "k",
            Action::Jump => "l",
            Action::ToggleCamera => "space",
            Action::Quit => "escape",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.to_lowercase();
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

/// Source of player intent
///
/// `is_pressed` is level-triggered (held); `is_down` is edge-triggered (went
/// down this frame).
pub trait InputProvider {
    fn is_pressed(&self, action: Action) -> bool;
    fn is_down(&self, action: Action) -> bool;
}

/// Held/edge tracker fed by key events, cleared once per frame
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: BTreeSet<Action>,
    down: BTreeSet<Action>,
    up: BTreeSet<Action>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            self.down.insert(action);
        }
    }

    pub fn release(&mut self, action: Action) {
        if self.held.remove(&action) {
            self.up.insert(action);
        }
    }

    /// Press by key name; false for unbound keys
    pub fn press_key(&mut self, key: &str) -> bool {
        Action::from_key(key).map(|a| self.press(a)).is_some()
    }

    pub fn release_key(&mut self, key: &str) -> bool {
        Action::from_key(key).map(|a| self.release(a)).is_some()
    }

    pub fn is_up(&self, action: Action) -> bool {
        self.up.contains(&action)
    }

    /// Forget this frame's transitions; held keys stay held
    pub fn end_frame(&mut self) {
        self.down.clear();
        self.up.clear();
    }
}

impl InputProvider for KeyState {
    fn is_pressed(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn is_down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }
}
