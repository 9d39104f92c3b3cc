//! Turn-rate-limited homing.
//!
//! `HomingController` is the per-projectile state machine:
//! `Active -> Expired | Hit`, both terminal. Each step burns lifetime,
//! steers the heading toward the target by at most the per-step angular
//! budget, advances the position and tests the hit radius.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use salvo_core::config::ProjectileConfig;
use salvo_core::enums::ProjectilePhase;

/// Below this the cross product is treated as parallel/antiparallel.
const AXIS_EPSILON: f32 = 1e-12;

/// Rotate `current` toward `desired` by at most `max_radians`.
///
/// Never overshoots: if the remaining angle fits in the budget the result is
/// exactly `desired`. A zero `desired` or zero budget holds `current`.
/// Opposite directions turn about an arbitrary axis orthogonal to `current`.
pub fn rotate_towards(current: Vec3, desired: Vec3, max_radians: f32) -> Vec3 {
    let Some(current) = current.try_normalize() else {
        return desired.normalize_or_zero();
    };
    let Some(desired) = desired.try_normalize() else {
        return current;
    };
    if max_radians <= 0.0 {
        return current;
    }

    let angle = current.angle_between(desired);
    if angle <= max_radians {
        return desired;
    }

    let cross = current.cross(desired);
    let axis = if cross.length_squared() > AXIS_EPSILON {
        cross.normalize()
    } else {
        current.any_orthonormal_vector()
    };

    (Quat::from_axis_angle(axis, max_radians) * current).normalize()
}

/// Kinematic and lifetime state of one projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomingController {
    pub position: Vec3,
    /// Unit direction of travel.
    pub heading: Vec3,
    pub remaining_life_secs: f32,
    pub speed: f32,
    pub turn_rate_deg_per_sec: f32,
    pub hit_radius: f32,
    phase: ProjectilePhase,
}

impl HomingController {
    pub fn new(position: Vec3, direction: Vec3, params: &ProjectileConfig) -> Self {
        Self {
            position,
            heading: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
            remaining_life_secs: params.lifetime_secs,
            speed: params.speed,
            turn_rate_deg_per_sec: params.turn_rate_deg_per_sec,
            hit_radius: params.hit_radius,
            phase: ProjectilePhase::Active,
        }
    }

    pub fn phase(&self) -> ProjectilePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Angular budget for a step of `dt` seconds, in radians.
    pub fn max_turn_radians(&self, dt: f32) -> f32 {
        (self.turn_rate_deg_per_sec * dt).max(0.0).to_radians()
    }

    /// Advance one step. `target` is the current target position, or `None`
    /// for an untargeted or lost-target projectile (straight flight).
    ///
    /// Terminal controllers are left untouched.
    pub fn step(&mut self, dt: f32, target: Option<Vec3>) -> ProjectilePhase {
        if self.is_terminal() {
            return self.phase;
        }

        self.remaining_life_secs -= dt;
        if self.remaining_life_secs <= 0.0 {
            self.phase = ProjectilePhase::Expired;
            return self.phase;
        }

        let desired = match target {
            Some(t) => (t - self.position).try_normalize().unwrap_or(self.heading),
            None => self.heading,
        };
        self.heading = rotate_towards(self.heading, desired, self.max_turn_radians(dt));
        self.position += self.heading * self.speed * dt;

        if let Some(t) = target {
            if t.distance_squared(self.position) < self.hit_radius * self.hit_radius {
                self.phase = ProjectilePhase::Hit;
            }
        }

        self.phase
    }
}
