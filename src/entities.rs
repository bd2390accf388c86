//! All game entity types. Pure data; behaviour lives in `player`,
//! `monster`, `projectile`, `pickup` and `combat`.

use std::ops::RangeInclusive;

use glam::Vec2;

use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::spawn::SpawnScheduler;
use crate::store::EntityStore;

/// Overlay text while standing on the endpoint without the key.
pub const NEED_KEY_MESSAGE: &str = "Go Find The Key!";

/// Frames between a monster's attacks, drawn uniformly.
pub const ATTACK_DELAY_RANGE: RangeInclusive<u32> = 180..=600;

// ── Animation clocks ─────────────────────────────────────────────────────────

/// A fixed-length frame sequence advanced one frame every `ticks_per_frame`
/// ticks. Timed state is counted in whole ticks so transitions land on an
/// exact, reproducible tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    pub frames: u32,
    pub ticks_per_frame: u32,
}

impl Animation {
    pub const fn total_ticks(&self) -> u32 {
        self.frames * self.ticks_per_frame
    }

    /// Animation frame shown after `ticks` ticks.
    pub const fn frame_at(&self, ticks: u32) -> u32 {
        ticks / self.ticks_per_frame
    }

    pub const fn is_complete(&self, ticks: u32) -> bool {
        ticks >= self.total_ticks()
    }
}

/// Bow draw: 9 frames, the arrow leaves on frame 7.
pub const PLAYER_ATTACK: Animation = Animation {
    frames: 9,
    ticks_per_frame: 5,
};
pub const ARROW_RELEASE_FRAME: u32 = 7;

pub const MONSTER_ATTACK: Animation = Animation {
    frames: 7,
    ticks_per_frame: 10,
};

pub const MONSTER_DEATH: Animation = Animation {
    frames: 4,
    ticks_per_frame: 10,
};

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerState {
    Idle,
    Moving,
    /// Drawing the bow. `wind_up` counts ticks since the attack started.
    Attacking { wind_up: u32, arrow_released: bool },
    /// Forced displacement; input is ignored until it runs out.
    Knockback { frames_left: u32, velocity: Vec2 },
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub lives: u32,
    /// Unit vector of the last nonzero input.
    pub direction: Vec2,
    /// +1 facing right, -1 facing left.
    pub last_horizontal: i8,
    pub has_key: bool,
    pub has_bow: bool,
    pub rapid_fire: bool,
    pub attack_range_boost: f32,
    pub state: PlayerState,
    pub invuln_timer: u32,
    pub powerup_timer: u32,
}

// ── Monster ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MonsterState {
    Patrol,
    AttackWindup { ticks: u32 },
    Knockback { frames_left: u32, velocity: Vec2 },
    /// Terminal. The corpse drifts by `velocity` until the animation ends.
    Dying { ticks: u32, velocity: Vec2 },
}

#[derive(Clone, Debug)]
pub struct Monster {
    pub rect: Rect,
    pub velocity: Vec2,
    /// 2 when fresh, 1 when staggered, 0 once dying.
    pub health: u8,
    /// Patrol frames left before the next attack wind-up.
    pub attack_delay: u32,
    /// Set the moment this monster's death has been checked for loot.
    pub key_dropped: bool,
    pub state: MonsterState,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileKind {
    /// Short melee swing; passes through walls and expires after `lifetime`.
    Fist { age: u32, lifetime: u32 },
    /// Bow shot; flies until it hits a wall or a monster.
    Arrow,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub rect: Rect,
    /// Unit vector, fixed at spawn.
    pub direction: Vec2,
    pub speed: f32,
}

// ── Pickups & endpoint ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    Key,
    /// Appears once per game.
    Bow,
    /// Attack range boost without a bow, rapid fire with one.
    AttackRangePowerUp,
}

#[derive(Clone, Debug)]
pub struct Pickup {
    pub kind: PickupKind,
    pub rect: Rect,
}

#[derive(Clone, Debug)]
pub struct Endpoint {
    pub rect: Rect,
}

// ── Entity store contents ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

#[derive(Clone, Debug)]
pub enum Entity {
    Monster(Monster),
    Projectile(Projectile),
    Pickup(Pickup),
}

impl Entity {
    pub fn rect(&self) -> &Rect {
        match self {
            Entity::Monster(m) => &m.rect,
            Entity::Projectile(p) => &p.rect,
            Entity::Pickup(p) => &p.rect,
        }
    }
}

// ── Master game state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Won,
}

/// The entire simulation state. Cloneable so `compute::tick` can return a
/// new value without mutating its input; restart builds a fresh one.
#[derive(Clone, Debug)]
pub struct World {
    pub config: GameConfig,
    pub walls: Vec<Rect>,
    pub player: Player,
    pub endpoint: Endpoint,
    /// Monsters, projectiles and pickups.
    pub entities: EntityStore,
    pub spawner: SpawnScheduler,
    pub status: GameStatus,
    /// Overlay text for the renderer, if any.
    pub message: Option<&'static str>,
    /// Left edge of the visible slice of the world.
    pub camera_x: f32,
    pub frame: u64,
}

impl World {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// The rectangle every player position is clamped to.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.config.world_width(), self.config.world_height())
    }
}
