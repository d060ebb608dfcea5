//! River Run: an endless scrolling river shooter.
//!
//! The library holds all game logic. Terminal I/O lives in the binary.

pub mod carve;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod noise_map;
pub mod player;
pub mod render;
pub mod spawn;
pub mod terrain;
