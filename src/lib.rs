//! Simulation core for a real-time zombie survival arena.

pub mod autopilot;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod snapshot;
pub mod systems;
