//! Radial burst spawn pattern.
//!
//! Shots sit evenly on a ring in the viewer's right/up plane, pushed ahead
//! along forward, each pointing outward from the ring center. Targets are
//! dealt out round-robin over the lock list.

use std::f32::consts::TAU;

use glam::Vec3;

use salvo_core::config::PatternConfig;
use salvo_core::types::Basis;

/// Spawn pose and target assignment for one shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpawn<T> {
    pub position: Vec3,
    /// Unit initial heading.
    pub direction: Vec3,
    pub target: Option<T>,
}

/// Outward ring direction of shot `index` out of `shots` (clamped to at least 1).
pub fn radial_direction(basis: &Basis, index: u32, shots: u32) -> Vec3 {
    let step = TAU / shots.max(1) as f32;
    let angle = step * index as f32;
    angle.cos() * basis.right + angle.sin() * basis.up
}

/// Compute the spawn pattern for one burst.
pub fn generate<T: Copy>(
    origin: Vec3,
    basis: &Basis,
    pattern: &PatternConfig,
    targets: &[T],
) -> Vec<ShotSpawn<T>> {
    let basis = basis.normalized();
    let shots = pattern.shots.max(1);
    let radius = pattern.muzzle_radius.max(0.0);

    (0..shots)
        .map(|i| {
            let radial = radial_direction(&basis, i, shots);
            let position = origin + radial * radius + basis.forward * pattern.forward_offset;
            let direction = match radial.try_normalize() {
                Some(dir) => dir,
                None => {
                    log::trace!("shot {i}: degenerate basis, firing along forward");
                    basis.forward
                }
            };
            let target = if targets.is_empty() {
                None
            } else {
                Some(targets[i as usize % targets.len()])
            };

            ShotSpawn {
                position,
                direction,
                target,
            }
        })
        .collect()
}
