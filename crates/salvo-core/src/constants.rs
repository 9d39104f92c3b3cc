//! Simulation constants and tuning defaults.

/// Fixed tick rate used by `tick_fixed` (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per fixed tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Selection ---

/// Maximum number of simultaneous locks.
pub const DEFAULT_MAX_LOCKS: u32 = 8;

/// Extra viewport border (normalized units) still considered selectable.
pub const DEFAULT_VIEWPORT_MARGIN: f32 = 0.05;

/// Viewport center used for scoring.
pub const VIEWPORT_CENTER: f32 = 0.5;

// --- Burst pattern ---

/// Projectiles per burst.
pub const DEFAULT_SHOTS: u32 = 8;

/// Radius of the spawn ring around the muzzle (meters).
pub const DEFAULT_MUZZLE_RADIUS: f32 = 0.6;

/// Distance of the spawn ring ahead of the origin (meters).
pub const DEFAULT_FORWARD_OFFSET: f32 = 0.5;

// --- Projectile ---

/// Projectile speed (m/s).
pub const DEFAULT_PROJECTILE_SPEED: f32 = 30.0;

/// Maximum steering rate (degrees per second).
pub const DEFAULT_TURN_RATE_DEG_PER_SEC: f32 = 360.0;

/// Projectile lifetime (seconds).
pub const DEFAULT_LIFETIME_SECS: f32 = 4.0;

/// Distance under which a projectile counts as a hit (meters).
pub const DEFAULT_HIT_RADIUS: f32 = 0.5;

// --- Hit reaction ---

/// How long a struck hostile ignores further reaction triggers (seconds).
pub const DEFAULT_REACTION_DURATION_SECS: f32 = 0.5;

// --- Viewer lens ---

pub const DEFAULT_FOV_Y_DEG: f32 = 60.0;
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;
pub const DEFAULT_NEAR_PLANE: f32 = 0.3;
pub const DEFAULT_FAR_PLANE: f32 = 1000.0;

// --- Scenario generation ---

/// Default seed for the hostile field generator.
pub const DEFAULT_SEED: u64 = 42;
