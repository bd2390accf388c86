//! Player state machine: walking, bow wind-up, knockback and timers.

use glam::Vec2;

use crate::config::GameConfig;
use crate::entities::{Player, PlayerState, ARROW_RELEASE_FRAME, PLAYER_ATTACK};
use crate::geometry::{move_and_collide, Rect, Resolution};
use crate::input::InputSnapshot;

impl Player {
    /// A fresh player facing right, centred on `center`.
    pub fn new(center: Vec2, config: &GameConfig) -> Self {
        Self {
            rect: Rect::from_center(center, config.player_size, config.player_size),
            lives: config.player_lives,
            direction: Vec2::X,
            last_horizontal: 1,
            has_key: false,
            has_bow: false,
            rapid_fire: false,
            attack_range_boost: 0.0,
            state: PlayerState::Idle,
            invuln_timer: 0,
            powerup_timer: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.state, PlayerState::Attacking { .. })
    }

    pub fn is_knocked_back(&self) -> bool {
        matches!(self.state, PlayerState::Knockback { .. })
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0
    }

    /// Current knockback velocity, zero when not being knocked back.
    pub fn knockback_velocity(&self) -> Vec2 {
        match self.state {
            PlayerState::Knockback { velocity, .. } => velocity,
            _ => Vec2::ZERO,
        }
    }

    /// Begin drawing the bow. Returns false (and does nothing) without a bow,
    /// while an attack is already in progress, or during a knockback.
    pub fn start_arrow_attack(&mut self) -> bool {
        if !self.has_bow || self.is_attacking() || self.is_knocked_back() {
            return false;
        }
        self.state = PlayerState::Attacking {
            wind_up: 0,
            arrow_released: false,
        };
        true
    }

    /// Drop an in-progress attack, discarding its wind-up.
    pub fn cancel_attack(&mut self) {
        if self.is_attacking() {
            self.state = PlayerState::Idle;
        }
    }

    /// Replace whatever the player is doing with a forced displacement.
    pub fn start_knockback(&mut self, velocity: Vec2, duration: u32) {
        self.state = if duration == 0 {
            PlayerState::Idle
        } else {
            PlayerState::Knockback {
                frames_left: duration,
                velocity,
            }
        };
    }

    /// True once per attack, when the wind-up reaches the release frame.
    pub fn wants_arrow_release(&self) -> bool {
        match self.state {
            PlayerState::Attacking {
                wind_up,
                arrow_released,
            } => self.has_bow && !arrow_released && PLAYER_ATTACK.frame_at(wind_up) >= ARROW_RELEASE_FRAME,
            _ => false,
        }
    }

    pub fn mark_arrow_released(&mut self) {
        if let PlayerState::Attacking { wind_up, .. } = self.state {
            self.state = PlayerState::Attacking {
                wind_up,
                arrow_released: true,
            };
        }
    }

    /// Advance one frame.
    pub fn update(&mut self, input: &InputSnapshot, walls: &[Rect], bounds: &Rect, speed: f32) {
        match self.state {
            PlayerState::Knockback {
                frames_left,
                velocity,
            } => {
                // No flush and no clamp: a blocked axis just stays put.
                let (rect, _) = move_and_collide(self.rect, velocity, walls, Resolution::Revert);
                self.rect = rect;
                let frames_left = frames_left.saturating_sub(1);
                self.state = if frames_left == 0 {
                    PlayerState::Idle
                } else {
                    PlayerState::Knockback {
                        frames_left,
                        velocity,
                    }
                };
            }
            PlayerState::Attacking {
                wind_up,
                arrow_released,
            } => {
                let wind_up = wind_up + 1;
                self.state = if PLAYER_ATTACK.is_complete(wind_up) {
                    PlayerState::Idle
                } else {
                    PlayerState::Attacking {
                        wind_up,
                        arrow_released,
                    }
                };
            }
            PlayerState::Idle | PlayerState::Moving => self.walk(input, walls, bounds, speed),
        }

        self.invuln_timer = self.invuln_timer.saturating_sub(1);
        if self.powerup_timer > 0 {
            self.powerup_timer -= 1;
            if self.powerup_timer == 0 {
                self.attack_range_boost = 0.0;
                self.rapid_fire = false;
            }
        }
    }

    fn walk(&mut self, input: &InputSnapshot, walls: &[Rect], bounds: &Rect, speed: f32) {
        let intent = input.intent();
        if let Some(direction) = intent.try_normalize() {
            if intent.x != 0.0 {
                self.last_horizontal = if intent.x > 0.0 { 1 } else { -1 };
            }
            self.direction = direction;
            self.state = PlayerState::Moving;
        } else {
            self.state = PlayerState::Idle;
        }

        let (rect, _) = move_and_collide(self.rect, intent * speed, walls, Resolution::Flush);
        self.rect = rect.clamped_to(bounds);
    }
}
