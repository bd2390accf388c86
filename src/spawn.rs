//! Periodic monster and power-up spawns.

use glam::Vec2;
use log::{debug, warn};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Entity, Monster, Pickup, PickupKind, World};
use crate::geometry::Rect;

/// Rolls before a wall-checked placement gives up and keeps its last roll.
const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Two independent frame counters, each reset to zero when it fires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnScheduler {
    pub monster_timer: u32,
    pub powerup_timer: u32,
}

/// Which spawns fired on a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnEvents {
    pub monster: bool,
    pub powerup: bool,
}

impl SpawnScheduler {
    pub fn advance(&mut self, config: &GameConfig) -> SpawnEvents {
        let mut events = SpawnEvents::default();

        self.monster_timer += 1;
        if self.monster_timer >= config.monster_spawn_interval {
            self.monster_timer = 0;
            events.monster = true;
        }

        self.powerup_timer += 1;
        if self.powerup_timer >= config.powerup_spawn_interval {
            self.powerup_timer = 0;
            events.powerup = true;
        }

        events
    }
}

/// A uniformly random cell other than the start and endpoint cells.
pub fn random_spawn_cell(config: &GameConfig, rng: &mut impl Rng) -> (u32, u32) {
    loop {
        let cell = (
            rng.gen_range(0..config.maze_cols),
            rng.gen_range(0..config.maze_rows),
        );
        if !config.is_reserved_cell(cell) {
            return cell;
        }
    }
}

/// Center of a random non-reserved cell. With `wall_check` the roll is
/// repeated until the point lies outside every wall.
pub fn spawn_position(
    config: &GameConfig,
    walls: &[Rect],
    wall_check: bool,
    rng: &mut impl Rng,
) -> Vec2 {
    let mut pos = config.cell_center(random_spawn_cell(config, rng));
    if !wall_check {
        return pos;
    }
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        if !walls.iter().any(|w| w.contains_point(pos)) {
            return pos;
        }
        pos = config.cell_center(random_spawn_cell(config, rng));
    }
    warn!("no wall-free spawn cell found, placing at {pos} anyway");
    pos
}

pub fn spawn_monster(world: &mut World, rng: &mut impl Rng) {
    let pos = spawn_position(&world.config, &world.walls, world.config.spawn_wall_check, rng);
    let monster = Monster::new(pos, &world.config, rng);
    world.entities.spawn(Entity::Monster(monster));
    debug!("monster spawned at {pos}");
}

pub fn spawn_powerup(world: &mut World, rng: &mut impl Rng) {
    let pos = spawn_position(&world.config, &world.walls, world.config.spawn_wall_check, rng);
    world
        .entities
        .spawn(Entity::Pickup(Pickup::new(PickupKind::AttackRangePowerUp, pos)));
    debug!("power-up spawned at {pos}");
}

/// The single bow of a game, always placed clear of walls.
pub fn spawn_bow(world: &mut World, rng: &mut impl Rng) {
    let pos = spawn_position(&world.config, &world.walls, true, rng);
    world
        .entities
        .spawn(Entity::Pickup(Pickup::new(PickupKind::Bow, pos)));
    debug!("bow placed at {pos}");
}

/// Advance the spawn timers and spawn whatever fired.
pub fn run(world: &mut World, rng: &mut impl Rng) {
    let events = world.spawner.advance(&world.config);
    if events.monster {
        spawn_monster(world, rng);
    }
    if events.powerup {
        spawn_powerup(world, rng);
    }
}
