//! Held-key tracking and per-slot direction resolution.
//!
//! Keys are recorded as they go down and up. Nothing is queued: whatever is
//! held when a tick starts is what that tick sees.

use std::collections::HashSet;

use super::{grid::Direction, snake_player::Slot};

/// A key the game cares about, independent of the windowing toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// A character key, always stored lower-case.
    Char(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl GameKey {
    /// Builds a character key, folding case so `W` and `w` are one key.
    #[must_use]
    pub fn character(c: char) -> Self {
        GameKey::Char(c.to_ascii_lowercase())
    }
}

/// The four keys steering one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    pub up: GameKey,
    pub down: GameKey,
    pub left: GameKey,
    pub right: GameKey,
}

impl KeyBinding {
    #[must_use]
    pub fn key_for(&self, direction: Direction) -> GameKey {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Key table indexed by slot.
pub const KEY_BINDINGS: [KeyBinding; 4] = [
    KeyBinding {
        up: GameKey::Char('w'),
        down: GameKey::Char('s'),
        left: GameKey::Char('a'),
        right: GameKey::Char('d'),
    },
    KeyBinding {
        up: GameKey::Char('i'),
        down: GameKey::Char('k'),
        left: GameKey::Char('j'),
        right: GameKey::Char('l'),
    },
    KeyBinding {
        up: GameKey::ArrowUp,
        down: GameKey::ArrowDown,
        left: GameKey::ArrowLeft,
        right: GameKey::ArrowRight,
    },
    KeyBinding {
        up: GameKey::Char('8'),
        down: GameKey::Char('2'),
        left: GameKey::Char('4'),
        right: GameKey::Char('6'),
    },
];

/// Short legend of the bindings for each slot, as shown under the arena.
pub const KEY_LEGEND: [&str; 4] = ["WASD", "IJKL", "ARROWS", "8246"];

/// Set of keys currently held down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: HashSet<GameKey>,
}

impl HeldKeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: GameKey) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: GameKey) {
        self.keys.remove(&key);
    }

    #[must_use]
    pub fn is_held(&self, key: GameKey) -> bool {
        self.keys.contains(&key)
    }
}

/// Direction `slot` should move this tick given the keys held and the
/// direction it committed to last tick.
///
/// Directions are scanned in [`Direction::VARIANTS`] order (up, down, left,
/// right). Each held key that is not the reverse of `current` overrides the
/// previous pick, so the last valid one in that order wins. Slots without a
/// binding keep their current direction.
#[must_use]
pub fn resolve_direction(slot: Slot, current: Direction, held: &HeldKeys) -> Direction {
    let Some(binding) = KEY_BINDINGS.get(slot) else {
        return current;
    };
    let mut resolved = current;
    for direction in Direction::VARIANTS {
        if held.is_held(binding.key_for(direction)) && !current.is_opposite(direction) {
            resolved = direction;
        }
    }
    resolved
}
