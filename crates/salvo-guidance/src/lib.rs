//! Lock-on and guidance algorithms for SALVO.
//!
//! Camera projection, viewport-centric target selection, radial burst
//! patterns and turn-rate-limited homing. No ECS dependency: everything
//! operates on plain data and caller-supplied handles.

pub mod burst;
pub mod camera;
pub mod homing;
pub mod selector;

pub use salvo_core as core;
