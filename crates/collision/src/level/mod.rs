//! Level collision population.
//!
//! Levels are scripted shape placement run once at load time. The collision
//! world itself knows nothing about level layout.

mod military_base;

pub use military_base::{FLOOR_Y, PLAYER_SPAWN, build_military_base};
