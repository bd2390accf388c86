//! World construction and the per-frame tick.
//!
//! `tick` takes an immutable reference to the current `World` (plus the
//! tick's input and an RNG handle) and returns a brand-new `World`. All
//! randomness comes through the injected RNG, so a seeded RNG replays a game
//! exactly.

use log::info;
use rand::Rng;

use crate::combat;
use crate::config::GameConfig;
use crate::entities::{Endpoint, GameStatus, Player, World};
use crate::geometry::Rect;
use crate::input::InputSnapshot;
use crate::maze::Maze;
use crate::spawn::{self, SpawnScheduler};
use crate::store::EntityStore;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a new game on a freshly generated maze.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> World {
    let maze = Maze::generate(config.maze_cols, config.maze_rows, rng);
    let walls = maze.wall_rects(config.cell_size, config.wall_thickness);
    init_state_with_walls(config, walls, rng)
}

/// Build a new game on the given wall layout: player on the start cell,
/// endpoint on its reserved cell, the opening monsters and the one bow.
pub fn init_state_with_walls(config: GameConfig, walls: Vec<Rect>, rng: &mut impl Rng) -> World {
    let player = Player::new(config.cell_center(config.start_cell()), &config);
    let endpoint = Endpoint::new(&config);
    let mut world = World {
        config,
        walls,
        player,
        endpoint,
        entities: EntityStore::new(),
        spawner: SpawnScheduler::default(),
        status: GameStatus::Playing,
        message: None,
        camera_x: 0.0,
        frame: 0,
    };

    for _ in 0..world.config.initial_monsters {
        spawn::spawn_monster(&mut world, rng);
    }
    spawn::spawn_bow(&mut world, rng);
    update_camera(&mut world);

    info!(
        "new game: {}x{} maze, {} walls, {} monsters",
        world.config.maze_cols,
        world.config.maze_rows,
        world.walls.len(),
        world.config.initial_monsters
    );
    world
}

/// Throw the current game away and start over with the same configuration.
pub fn restart(state: &World, rng: &mut impl Rng) -> World {
    info!("restarting after {} frames ({:?})", state.frame, state.status);
    init_state(state.config.clone(), rng)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Once the game is over or won only a restart does anything.
pub fn tick(state: &World, input: &InputSnapshot, rng: &mut impl Rng) -> World {
    if !state.is_playing() {
        if input.restart {
            return restart(state, rng);
        }
        return state.clone();
    }

    let mut world = state.clone();
    world.frame += 1;

    // ── 1. Actions, then player and monster state machines ───────────────────
    combat::handle_action(&mut world, input);

    let bounds = world.bounds();
    world
        .player
        .update(input, &world.walls, &bounds, world.config.player_speed);

    let mut finished = Vec::new();
    for (id, monster) in world.entities.monsters_mut() {
        monster.update(&world.walls, &world.config, rng);
        if monster.is_finished() {
            finished.push(id);
        }
    }
    for id in finished {
        world.entities.kill(id);
    }

    // ── 2–4. Projectiles ─────────────────────────────────────────────────────
    combat::resolve_arrows(&mut world, rng);
    combat::resolve_fists(&mut world, rng);

    // ── 5. Monster contact ───────────────────────────────────────────────────
    combat::resolve_player_contacts(&mut world, rng);

    // ── 6–8. Endpoint and pickups ────────────────────────────────────────────
    combat::resolve_endpoint(&mut world);
    combat::collect_key(&mut world);
    combat::collect_powerup(&mut world);

    // ── 9. Bow release ───────────────────────────────────────────────────────
    combat::release_arrows(&mut world);

    // ── 10–11. Camera and spawns ─────────────────────────────────────────────
    update_camera(&mut world);
    spawn::run(&mut world, rng);

    world.entities.sweep();
    world
}

/// Center the view horizontally on the player, clamped to the world.
pub fn update_camera(world: &mut World) {
    let max_x = (world.config.world_width() - world.config.view_width).max(0.0);
    let x = world.player.center().x - world.config.view_width / 2.0;
    world.camera_x = x.clamp(0.0, max_x);
}
