//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Flight phase of a homing projectile. `Expired` and `Hit` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectilePhase {
    #[default]
    Active,
    /// Lifetime ran out without reaching a target.
    Expired,
    /// Reached its assigned target.
    Hit,
}

impl ProjectilePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ProjectilePhase::Active)
    }
}
