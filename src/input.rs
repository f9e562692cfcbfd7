//! Events the game reacts to, already translated from whatever device the
//! frontend reads.

use std::collections::HashMap;

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    MoveLeft(KeyState),
    MoveRight(KeyState),
    Fire,
    Quit,
    /// Pointer click in world coordinates.
    Click(Point),
    /// Anything the frontend saw but has no meaning here. Ignored.
    Unrecognized,
}

/// Whether the loop keeps going after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── Held direction keys ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn event(self, state: KeyState) -> InputEvent {
        match self {
            Direction::Left => InputEvent::MoveLeft(state),
            Direction::Right => InputEvent::MoveRight(state),
        }
    }
}

/// Turns key press/repeat/release reports into movement intents.
///
/// A direction counts as held while its last press or repeat arrived within
/// `window` frames. Terminals that never report key releases still let go of
/// a key once the OS stops repeating it; terminals that do report them
/// release it immediately.
#[derive(Clone, Debug)]
pub struct HeldKeys {
    window: u64,
    /// Each held direction → the frame it was last seen.
    last_seen: HashMap<Direction, u64>,
}

impl HeldKeys {
    pub fn new(window: u64) -> Self {
        HeldKeys {
            window,
            last_seen: HashMap::new(),
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.last_seen.contains_key(&dir)
    }

    /// A press or an auto-repeat. Only the first one produces an event.
    pub fn press(&mut self, dir: Direction, frame: u64) -> Option<InputEvent> {
        match self.last_seen.insert(dir, frame) {
            None => Some(dir.event(KeyState::Pressed)),
            Some(_) => None,
        }
    }

    pub fn release(&mut self, dir: Direction) -> Option<InputEvent> {
        self.last_seen
            .remove(&dir)
            .map(|_| dir.event(KeyState::Released))
    }

    /// Release every direction not refreshed within the window.
    pub fn expire(&mut self, frame: u64) -> Vec<InputEvent> {
        let window = self.window;
        let mut stale: Vec<Direction> = self
            .last_seen
            .iter()
            .filter(|(_, last)| frame.saturating_sub(**last) > window)
            .map(|(dir, _)| *dir)
            .collect();
        stale.sort_by_key(|dir| *dir as u8);
        stale
            .into_iter()
            .filter_map(|dir| self.release(dir))
            .collect()
    }
}
