//! Float-i-Pop: a side-scrolling balloon-flapping arcade game.
//!
//! The simulation (`player`, `scroll`, `spawn`, `collision`, `compute`) is
//! pure and time-injected; `display` and the binary handle the terminal.

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod highscore;
pub mod logging;
pub mod player;
pub mod scroll;
pub mod spawn;
