//! Fundamental geometric and simulation types.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ASPECT, DEFAULT_FAR_PLANE, DEFAULT_FOV_Y_DEG, DEFAULT_NEAR_PLANE};

/// World-space position of an entity (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Orthonormal orientation basis of the viewer.
///
/// Right-handed: `forward` looks down -Z when the rotation is identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// A world point projected into normalized viewport space.
///
/// `x`/`y` are in `[0, 1]` inside the visible frame, `depth` is the distance
/// along the viewer's forward axis (non-positive means behind the viewer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// The player's viewpoint: pose plus perspective lens parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Basis {
    pub fn new(forward: Vec3, right: Vec3, up: Vec3) -> Self {
        Self { forward, right, up }
    }

    /// Basis of an orientation: rotated -Z, +X and +Y.
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: rotation * Vec3::NEG_Z,
            right: rotation * Vec3::X,
            up: rotation * Vec3::Y,
        }
    }

    /// Same basis with every axis normalized (zero axes stay zero).
    pub fn normalized(&self) -> Self {
        Self {
            forward: self.forward.normalize_or_zero(),
            right: self.right.normalize_or_zero(),
            up: self.up.normalize_or_zero(),
        }
    }
}

impl Default for Basis {
    fn default() -> Self {
        Self::from_rotation(Quat::IDENTITY)
    }
}

impl ViewPoint {
    pub fn new(x: f32, y: f32, depth: f32) -> Self {
        Self { x, y, depth }
    }
}

impl Viewer {
    /// A viewer with default lens parameters.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            fov_y_deg: DEFAULT_FOV_Y_DEG,
            aspect: DEFAULT_ASPECT,
            near: DEFAULT_NEAR_PLANE,
            far: DEFAULT_FAR_PLANE,
        }
    }

    /// A viewer at `position` looking along `direction` with world +Y as up.
    pub fn looking_to(position: Vec3, direction: Vec3) -> Self {
        let dir = direction.normalize_or_zero();
        let rotation = if dir == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::NEG_Z, dir)
        };
        Self::new(position, rotation)
    }

    pub fn basis(&self) -> Basis {
        Basis::from_rotation(self.rotation)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}
