//! Simulation engine for SALVO.
//!
//! Owns the hecs ECS world and the hostile registry, runs lock-on, fire
//! control and homing each tick, and produces `SimSnapshot`s for the
//! presentation layer.

pub mod engine;
pub mod projectile;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use salvo_core as core;

#[cfg(test)]
mod tests;
