//! Pickups and the endpoint.

use glam::Vec2;

use crate::config::GameConfig;
use crate::entities::{Endpoint, Pickup, PickupKind, Player};
use crate::geometry::Rect;

impl Pickup {
    pub fn new(kind: PickupKind, center: Vec2) -> Self {
        let size = match kind {
            PickupKind::Key | PickupKind::AttackRangePowerUp => 20.0,
            PickupKind::Bow => 30.0,
        };
        Self {
            kind,
            rect: Rect::from_center(center, size, size),
        }
    }
}

impl Endpoint {
    /// The exit, centred in the reserved endpoint cell.
    pub fn new(config: &GameConfig) -> Self {
        let size = (config.cell_size - 20.0).max(1.0);
        Self {
            rect: Rect::from_center(config.cell_center(config.endpoint_cell()), size, size),
        }
    }
}

/// The player after collecting a pickup of `kind`.
pub fn apply(kind: PickupKind, player: &Player, config: &GameConfig) -> Player {
    let mut next = player.clone();
    match kind {
        PickupKind::Key => next.has_key = true,
        PickupKind::Bow => next.has_bow = true,
        PickupKind::AttackRangePowerUp => {
            next.powerup_timer = config.powerup_frames;
            if next.has_bow {
                next.rapid_fire = true;
            } else {
                next.attack_range_boost = config.attack_range_boost;
            }
        }
    }
    next
}
