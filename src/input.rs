//! Per-tick input snapshot handed to the simulation.

use glam::Vec2;

/// Player intent for one tick.
///
/// Directions are level-triggered (held). `action` and `restart` are
/// edge-triggered: true only on the tick the key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub action: bool,
    pub restart: bool,
}

impl InputSnapshot {
    /// Unnormalised intent with components in {-1, 0, 1}.
    /// Right wins over left and down over up when both are held.
    pub fn intent(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x = -1.0;
        }
        if self.right {
            v.x = 1.0;
        }
        if self.up {
            v.y = -1.0;
        }
        if self.down {
            v.y = 1.0;
        }
        v
    }
}
