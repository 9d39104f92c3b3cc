//! Simulation configuration.
//!
//! Every section deserializes with defaults, so a config file only needs the
//! values it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors produced while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for generated scenarios. Same seed = same simulation.
    pub seed: u64,
    pub selection: SelectionConfig,
    pub pattern: PatternConfig,
    pub projectile: ProjectileConfig,
    /// Duration of a hostile's hit reaction (seconds).
    pub reaction_duration_secs: f32,
}

/// Target selection tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Border around the visible frame that still counts as on-screen.
    pub viewport_margin: f32,
    /// Also reject targets whose direction has a non-positive dot with forward.
    pub require_front: bool,
    pub max_locks: u32,
}

/// Burst spawn pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub shots: u32,
    pub muzzle_radius: f32,
    pub forward_offset: f32,
}

/// Parameters given to every projectile of a burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub turn_rate_deg_per_sec: f32,
    pub lifetime_secs: f32,
    pub hit_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            selection: SelectionConfig::default(),
            pattern: PatternConfig::default(),
            projectile: ProjectileConfig::default(),
            reaction_duration_secs: DEFAULT_REACTION_DURATION_SECS,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
            require_front: true,
            max_locks: DEFAULT_MAX_LOCKS,
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            muzzle_radius: DEFAULT_MUZZLE_RADIUS,
            forward_offset: DEFAULT_FORWARD_OFFSET,
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PROJECTILE_SPEED,
            turn_rate_deg_per_sec: DEFAULT_TURN_RATE_DEG_PER_SEC,
            lifetime_secs: DEFAULT_LIFETIME_SECS,
            hit_radius: DEFAULT_HIT_RADIUS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot clamp into something meaningful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("selection.viewport_margin", self.selection.viewport_margin)?;
        check_finite("pattern.muzzle_radius", self.pattern.muzzle_radius)?;
        check_finite("pattern.forward_offset", self.pattern.forward_offset)?;
        check_non_negative("projectile.speed", self.projectile.speed)?;
        check_non_negative(
            "projectile.turn_rate_deg_per_sec",
            self.projectile.turn_rate_deg_per_sec,
        )?;
        check_non_negative("projectile.hit_radius", self.projectile.hit_radius)?;
        check_non_negative("reaction_duration_secs", self.reaction_duration_secs)?;
        check_finite("projectile.lifetime_secs", self.projectile.lifetime_secs)?;
        if self.projectile.lifetime_secs <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "projectile.lifetime_secs",
                reason: format!("must be positive, got {}", self.projectile.lifetime_secs),
            });
        }
        Ok(())
    }
}

impl PatternConfig {
    /// Pattern with the same clamping rules as runtime re-tuning.
    /// Non-finite offsets fall back to zero.
    pub fn clamped(shots: i32, muzzle_radius: f32, forward_offset: f32) -> Self {
        let new_radius = if muzzle_radius.is_finite() {
            muzzle_radius.max(0.0)
        } else {
            0.0
        };
        let new_offset = if forward_offset.is_finite() {
            forward_offset
        } else {
            0.0
        };
        if shots < 1 || new_radius != muzzle_radius || new_offset != forward_offset {
            log::warn!(
                "burst pattern clamped: shots {shots} -> {}, radius {muzzle_radius} -> {new_radius}, \
                 offset {forward_offset} -> {new_offset}",
                shots.max(1)
            );
        }
        Self {
            shots: shots.max(1) as u32,
            muzzle_radius: new_radius,
            forward_offset: new_offset,
        }
    }
}

impl ProjectileConfig {
    /// Apply runtime re-tuning on top of `self`.
    ///
    /// Non-finite values keep the current setting, speed and turn rate are
    /// clamped to zero, and a non-positive lifetime keeps the current one so
    /// every projectile still expires. `hit_radius` is unchanged.
    pub fn retuned(&self, speed: f32, turn_rate_deg_per_sec: f32, lifetime_secs: f32) -> Self {
        let new_speed = if speed.is_finite() {
            speed.max(0.0)
        } else {
            self.speed
        };
        let new_turn_rate = if turn_rate_deg_per_sec.is_finite() {
            turn_rate_deg_per_sec.max(0.0)
        } else {
            self.turn_rate_deg_per_sec
        };
        let new_lifetime = if lifetime_secs.is_finite() && lifetime_secs > 0.0 {
            lifetime_secs
        } else {
            self.lifetime_secs
        };

        // NaN inputs compare unequal, so they are reported too.
        if new_speed != speed
            || new_turn_rate != turn_rate_deg_per_sec
            || new_lifetime != lifetime_secs
        {
            log::warn!(
                "projectile params clamped: speed {speed} -> {new_speed}, \
                 turn rate {turn_rate_deg_per_sec} -> {new_turn_rate}, \
                 lifetime {lifetime_secs} -> {new_lifetime}"
            );
        }

        Self {
            speed: new_speed,
            turn_rate_deg_per_sec: new_turn_rate,
            lifetime_secs: new_lifetime,
            hit_radius: self.hit_radius,
        }
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite, got {value}"),
        })
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}
