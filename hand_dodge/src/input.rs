//! Input aggregation: the gesture and the arrow keys both push the player.
//!
//! Sources are additive: a left gesture plus a held left arrow moves twice as
//! far, a left gesture against a held right arrow cancels out.

use dodge_sim::{Arena, Player};

use crate::gesture::GestureEvent;

/// Directional keys held down during this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left:  bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn direction(self) -> f32 {
        let mut d = 0.0;
        if self.left  { d -= 1.0; }
        if self.right { d += 1.0; }
        d
    }
}

#[derive(Clone, Copy, Debug)]
pub struct InputAggregator {
    arena: Arena,
}

impl InputAggregator {
    pub fn new(arena: Arena) -> Self {
        InputAggregator { arena }
    }

    /// Apply one tick of movement and clamp the player inside the play area.
    pub fn apply(&self, gesture: GestureEvent, keys: HeldKeys, player: &mut Player) {
        let steps = gesture.direction() + keys.direction();
        player.shift(steps * player.speed, self.arena);
    }
}
