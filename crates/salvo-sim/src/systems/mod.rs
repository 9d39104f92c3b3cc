//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only)
//! plus the engine-owned buffers they need. They hold no state of their own.

pub mod cleanup;
pub mod fire_control;
pub mod homing;
pub mod lock_on;
pub mod reaction;
pub mod snapshot;
