//! Fist and arrow projectiles.

use glam::Vec2;

use crate::config::GameConfig;
use crate::entities::{Player, Projectile, ProjectileKind};
use crate::geometry::{intersects, Rect};

const FIST_BASE_LIFETIME: u32 = 5;
const FIST_BASE_WIDTH: f32 = 20.0;
const FIST_BASE_LENGTH: f32 = 30.0;
const ARROW_SPEED_FACTOR: f32 = 2.5;
/// Angular offsets, in degrees, of a rapid-fire volley.
const RAPID_FIRE_SPREAD: [f32; 3] = [-5.0, 0.0, 5.0];

impl Projectile {
    /// A melee swing thrown from just in front of the player.
    ///
    /// The attack range boost lengthens both its lifetime and its hitbox.
    pub fn fist(player: &Player, config: &GameConfig) -> Self {
        let boost = player.attack_range_boost.max(0.0);
        let direction = player.direction;
        let center = player.center() + direction * (config.player_size / 3.0);
        Self {
            kind: ProjectileKind::Fist {
                age: 0,
                lifetime: FIST_BASE_LIFETIME.saturating_add(boost.round() as u32),
            },
            rect: Rect::rotated_bounds(
                center,
                FIST_BASE_WIDTH + boost,
                FIST_BASE_LENGTH + boost,
                direction,
            ),
            direction,
            speed: config.fist_speed,
        }
    }

    pub fn arrow(center: Vec2, direction: Vec2, config: &GameConfig) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec2::X);
        Self {
            kind: ProjectileKind::Arrow,
            rect: Rect::rotated_bounds(
                center,
                config.player_size / 2.0,
                config.player_size / 4.0,
                direction,
            ),
            direction,
            speed: config.fist_speed * ARROW_SPEED_FACTOR,
        }
    }

    /// The arrows released at the end of a bow wind-up: one straight ahead,
    /// or a three-way spread while rapid fire is active.
    pub fn arrow_volley(player: &Player, config: &GameConfig) -> Vec<Self> {
        if player.rapid_fire {
            RAPID_FIRE_SPREAD
                .iter()
                .map(|deg| {
                    let direction = Vec2::from_angle(deg.to_radians()).rotate(player.direction);
                    Self::arrow(player.center(), direction, config)
                })
                .collect()
        } else {
            vec![Self::arrow(player.center(), player.direction, config)]
        }
    }

    pub fn is_fist(&self) -> bool {
        matches!(self.kind, ProjectileKind::Fist { .. })
    }

    pub fn is_arrow(&self) -> bool {
        matches!(self.kind, ProjectileKind::Arrow)
    }

    /// Advance one frame. Returns false when a fist's lifetime has run out;
    /// an expired fist does not move.
    pub fn update(&mut self) -> bool {
        if let ProjectileKind::Fist { age, lifetime } = self.kind {
            let age = age + 1;
            self.kind = ProjectileKind::Fist { age, lifetime };
            if age >= lifetime {
                return false;
            }
        }
        self.rect = self.rect.translated(self.direction * self.speed);
        true
    }

    /// Whether this projectile is stopped by `walls`. Fists never are.
    pub fn hits_wall(&self, walls: &[Rect]) -> bool {
        self.is_arrow() && walls.iter().any(|w| intersects(&self.rect, w))
    }

    /// Direction a struck monster is pushed. Fists have no heading of their
    /// own for combat, so they push along the player's current facing.
    pub fn knockback_direction(&self, player: &Player) -> Vec2 {
        match self.kind {
            ProjectileKind::Fist { .. } => player.direction,
            ProjectileKind::Arrow => self.direction,
        }
    }
}
