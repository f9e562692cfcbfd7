//! Alien Invasion: a single-screen arcade shooter.
//!
//! The library holds the game-loop core. Rendering, input capture and sprite
//! metadata are supplied from outside through the [`frontend::Frontend`] seam;
//! the `alien_invasion` binary provides a terminal implementation of it.

pub mod button;
pub mod collision;
pub mod entities;
pub mod error;
pub mod formation;
pub mod frontend;
pub mod game;
pub mod geometry;
pub mod input;
pub mod scoreboard;
pub mod settings;
pub mod stats;
