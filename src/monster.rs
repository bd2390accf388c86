//! Monster state machine.
//!
//! Patrol bounces around the maze until the attack delay runs out, then the
//! monster stops for an attack wind-up. Two hits kill: the first staggers
//! it into a knockback, the second starts the death animation.

use std::f32::consts::TAU;

use glam::Vec2;
use log::trace;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Monster, MonsterState, ATTACK_DELAY_RANGE, MONSTER_ATTACK, MONSTER_DEATH};
use crate::geometry::{move_and_collide, Rect, Resolution};

/// A random direction scaled to `speed`.
pub fn random_velocity(speed: f32, rng: &mut impl Rng) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU)) * speed
}

impl Monster {
    pub fn new(center: Vec2, config: &GameConfig, rng: &mut impl Rng) -> Self {
        Self {
            rect: Rect::from_center(center, config.monster_size, config.monster_size),
            velocity: random_velocity(config.monster_speed, rng),
            health: 2,
            attack_delay: rng.gen_range(ATTACK_DELAY_RANGE),
            key_dropped: false,
            state: MonsterState::Patrol,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, MonsterState::Dying { .. })
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.state, MonsterState::AttackWindup { .. })
    }

    pub fn is_knocked_back(&self) -> bool {
        matches!(self.state, MonsterState::Knockback { .. })
    }

    /// The death animation has played out; the monster should be removed.
    pub fn is_finished(&self) -> bool {
        match self.state {
            MonsterState::Dying { ticks, .. } => MONSTER_DEATH.is_complete(ticks),
            _ => false,
        }
    }

    /// Take a hit. No effect on a dying monster.
    pub fn hit(&mut self, knockback: Vec2, config: &GameConfig, rng: &mut impl Rng) {
        if self.is_dying() {
            return;
        }

        if self.is_attacking() {
            self.reset_patrol(config, rng);
        }

        self.health = self.health.saturating_sub(1);
        self.state = if self.health > 0 {
            MonsterState::Knockback {
                frames_left: config.monster_knockback_frames.max(1),
                velocity: knockback,
            }
        } else {
            MonsterState::Dying {
                ticks: 0,
                velocity: knockback,
            }
        };
        trace!("monster hit, health now {}", self.health);
    }

    /// Advance one frame.
    pub fn update(&mut self, walls: &[Rect], config: &GameConfig, rng: &mut impl Rng) {
        match self.state {
            MonsterState::Dying { ticks, velocity } => {
                self.drift(velocity, walls);
                self.state = MonsterState::Dying {
                    ticks: (ticks + 1).min(MONSTER_DEATH.total_ticks()),
                    velocity,
                };
            }
            MonsterState::Knockback {
                frames_left,
                velocity,
            } => {
                self.drift(velocity, walls);
                let frames_left = frames_left.saturating_sub(1);
                self.state = if frames_left == 0 {
                    MonsterState::Patrol
                } else {
                    MonsterState::Knockback {
                        frames_left,
                        velocity,
                    }
                };
            }
            MonsterState::AttackWindup { ticks } => {
                let ticks = ticks + 1;
                if MONSTER_ATTACK.is_complete(ticks) {
                    self.reset_patrol(config, rng);
                } else {
                    self.state = MonsterState::AttackWindup { ticks };
                }
            }
            MonsterState::Patrol => {
                self.attack_delay = self.attack_delay.saturating_sub(1);
                if self.attack_delay == 0 {
                    self.velocity = Vec2::ZERO;
                    self.state = MonsterState::AttackWindup { ticks: 0 };
                } else {
                    self.patrol(walls);
                }
            }
        }
    }

    /// Move by the patrol velocity, bouncing off walls per axis.
    fn patrol(&mut self, walls: &[Rect]) {
        let (rect, blocked) = move_and_collide(self.rect, self.velocity, walls, Resolution::Revert);
        self.rect = rect;
        if blocked.x {
            self.velocity.x = -self.velocity.x;
        }
        if blocked.y {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Forced movement without bouncing.
    fn drift(&mut self, velocity: Vec2, walls: &[Rect]) {
        let (rect, _) = move_and_collide(self.rect, velocity, walls, Resolution::Revert);
        self.rect = rect;
    }

    fn reset_patrol(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        self.state = MonsterState::Patrol;
        self.attack_delay = rng.gen_range(ATTACK_DELAY_RANGE);
        self.velocity = random_velocity(config.monster_speed, rng);
    }
}
