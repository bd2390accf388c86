//! Simulation core of a top-down maze-chase arcade game.
//!
//! The core consumes wall rectangles and a per-tick [`input::InputSnapshot`]
//! and produces a [`entities::World`] for a renderer to draw. Drawing and
//! input polling live in the `maze_chase` binary.

pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod maze;
pub mod monster;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod spawn;
pub mod store;
