//! Tunable game parameters.
//!
//! Every constant the simulation uses lives here so a JSON file can
//! override any subset of them (`#[serde(default)]` fills in the rest).

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest maze accepted, in cells.
pub const MAX_MAZE_CELLS: u32 = 65_536;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Target frame rate; one simulation tick per frame.
    pub fps: u32,

    // ── Maze ──────────────────────────────────────────────────────────────────
    pub maze_cols: u32,
    pub maze_rows: u32,
    pub cell_size: f32,
    pub wall_thickness: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_size: f32,
    /// Pixels per frame on each axis.
    pub player_speed: f32,
    pub player_lives: u32,
    pub invuln_frames: u32,
    pub knockback_speed: f32,
    pub knockback_frames: u32,

    // ── Monsters ──────────────────────────────────────────────────────────────
    pub monster_size: f32,
    pub monster_speed: f32,
    pub monster_knockback_frames: u32,
    pub initial_monsters: u32,
    pub key_drop_probability: f64,

    // ── Weapons & power-ups ───────────────────────────────────────────────────
    pub fist_speed: f32,
    pub powerup_frames: u32,
    pub attack_range_boost: f32,

    // ── Spawning ──────────────────────────────────────────────────────────────
    pub monster_spawn_interval: u32,
    pub powerup_spawn_interval: u32,
    /// Re-roll scheduled monster/power-up spawns that land inside a wall.
    /// Off by default: only the bow is placed with a wall check.
    pub spawn_wall_check: bool,

    /// Width of the visible slice of the world, used for the camera offset.
    pub view_width: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            maze_cols: 20,
            maze_rows: 7,
            cell_size: 100.0,
            wall_thickness: 10.0,
            player_size: 40.0,
            player_speed: 4.0,
            player_lives: 5,
            invuln_frames: 60,
            knockback_speed: 8.0,
            knockback_frames: 10,
            monster_size: 40.0,
            monster_speed: 2.0,
            monster_knockback_frames: 10,
            initial_monsters: 5,
            key_drop_probability: 0.3,
            fist_speed: 6.0,
            powerup_frames: 600,
            attack_range_boost: 20.0,
            monster_spawn_interval: 600,
            powerup_spawn_interval: 900,
            spawn_wall_check: false,
            view_width: 1000.0,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.fps == 0 {
            return Err(invalid("fps", "must be at least 1"));
        }
        // Start and endpoint must differ and leave at least one spawn cell.
        let cells = self.maze_cols.checked_mul(self.maze_rows);
        if self.maze_cols < 2 || self.maze_rows == 0 || cells.is_some_and(|n| n < 3) {
            return Err(invalid(
                "maze_cols",
                "maze needs at least three cells with distinct start and endpoint",
            ));
        }
        if !matches!(cells, Some(n) if n <= MAX_MAZE_CELLS) {
            return Err(invalid(
                "maze_cols",
                format!("maze may have at most {MAX_MAZE_CELLS} cells"),
            ));
        }
        if self.cell_size <= 0.0 {
            return Err(invalid("cell_size", "must be positive"));
        }
        if self.wall_thickness < 0.0 || self.wall_thickness * 2.0 >= self.cell_size {
            return Err(invalid(
                "wall_thickness",
                format!("must be in [0, {})", self.cell_size / 2.0),
            ));
        }
        if self.player_size <= 0.0 || self.monster_size <= 0.0 {
            return Err(invalid("player_size", "entity sizes must be positive"));
        }
        if self.player_lives == 0 {
            return Err(invalid("player_lives", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.key_drop_probability) {
            return Err(invalid("key_drop_probability", "must be within [0, 1]"));
        }
        if self.powerup_frames == 0 {
            return Err(invalid("powerup_frames", "must be at least 1"));
        }
        if !(0.0..=self.cell_size).contains(&self.attack_range_boost) {
            return Err(invalid(
                "attack_range_boost",
                format!("must be within [0, {}]", self.cell_size),
            ));
        }
        if self.monster_spawn_interval == 0 {
            return Err(invalid("monster_spawn_interval", "must be at least 1"));
        }
        if self.powerup_spawn_interval == 0 {
            return Err(invalid("powerup_spawn_interval", "must be at least 1"));
        }
        if self.view_width <= 0.0 {
            return Err(invalid("view_width", "must be positive"));
        }
        Ok(())
    }

    pub fn world_width(&self) -> f32 {
        self.maze_cols as f32 * self.cell_size
    }

    pub fn world_height(&self) -> f32 {
        self.maze_rows as f32 * self.cell_size
    }

    /// The cell the player starts in; never used for spawns.
    pub fn start_cell(&self) -> (u32, u32) {
        (0, 0)
    }

    /// The cell holding the endpoint; never used for spawns.
    pub fn endpoint_cell(&self) -> (u32, u32) {
        (self.maze_cols - 1, self.maze_rows / 2)
    }

    pub fn is_reserved_cell(&self, cell: (u32, u32)) -> bool {
        cell == self.start_cell() || cell == self.endpoint_cell()
    }

    /// World-space center of a maze cell.
    pub fn cell_center(&self, (col, row): (u32, u32)) -> Vec2 {
        Vec2::new(
            col as f32 * self.cell_size + self.cell_size / 2.0,
            row as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}
