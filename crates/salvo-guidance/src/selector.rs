//! Viewport-centric target selection.
//!
//! Candidates are projected through the viewer, filtered to the (slightly
//! enlarged) visible frame, scored by squared distance from the viewport
//! center and capped. The result carries the enter/exit diff against the
//! previous lock set so each transition is applied exactly once.

use glam::Vec3;

use salvo_core::config::SelectionConfig;
use salvo_core::constants::VIEWPORT_CENTER;
use salvo_core::types::ViewPoint;

use crate::camera::ViewProjection;

/// Result of one selection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<H> {
    /// New lock set, best score first.
    pub locks: Vec<H>,
    /// Handles that were not locked before, in lock-set order.
    pub entered: Vec<H>,
    /// Handles that lost their lock, in previous lock-set order.
    pub exited: Vec<H>,
}

impl<H> Default for Selection<H> {
    fn default() -> Self {
        Self {
            locks: Vec::new(),
            entered: Vec::new(),
            exited: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Scored<H> {
    handle: H,
    score: f32,
}

/// Reusable candidate buffer, kept across ticks to avoid per-tick allocation.
#[derive(Debug, Clone)]
pub struct SelectionScratch<H> {
    scored: Vec<Scored<H>>,
}

impl<H> SelectionScratch<H> {
    pub fn new() -> Self {
        Self {
            scored: Vec::with_capacity(64),
        }
    }
}

impl<H> Default for SelectionScratch<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Squared distance of a viewport point from the frame center. Lower is better.
pub fn score(point: &ViewPoint) -> f32 {
    let dx = point.x - VIEWPORT_CENTER;
    let dy = point.y - VIEWPORT_CENTER;
    dx * dx + dy * dy
}

/// Whether a viewport point lies inside `[-margin, 1 + margin]` on both axes.
pub fn in_selectable_region(point: &ViewPoint, margin: f32) -> bool {
    let lo = -margin;
    let hi = 1.0 + margin;
    point.x >= lo && point.x <= hi && point.y >= lo && point.y <= hi
}

/// Project and filter one lock point. Returns its score if it is selectable.
pub fn evaluate<V: ViewProjection + ?Sized>(
    view: &V,
    lock_point: Vec3,
    config: &SelectionConfig,
) -> Option<f32> {
    let vp = view.project(lock_point);
    if vp.depth <= 0.0 {
        return None;
    }

    if config.require_front {
        let to = (lock_point - view.position()).normalize_or_zero();
        if view.forward().dot(to) <= 0.0 {
            return None;
        }
    }

    if !in_selectable_region(&vp, config.viewport_margin) {
        return None;
    }

    Some(score(&vp))
}

/// Select the new lock set from `candidates` (handle + lock point, in registry order).
pub fn select<H, V, I>(
    candidates: I,
    view: &V,
    config: &SelectionConfig,
    previous: &[H],
    scratch: &mut SelectionScratch<H>,
) -> Selection<H>
where
    H: Copy + PartialEq,
    V: ViewProjection + ?Sized,
    I: IntoIterator<Item = (H, Vec3)>,
{
    scratch.scored.clear();

    for (handle, lock_point) in candidates {
        if let Some(score) = evaluate(view, lock_point, config) {
            scratch.scored.push(Scored { handle, score });
        }
    }

    // Stable: equal scores keep registry order.
    scratch.scored.sort_by(|a, b| a.score.total_cmp(&b.score));

    let cap = config.max_locks as usize;
    let locks: Vec<H> = scratch
        .scored
        .iter()
        .take(cap)
        .map(|s| s.handle)
        .collect();
    log::trace!(
        "selection: {} selectable, {} locked",
        scratch.scored.len(),
        locks.len()
    );
    scratch.scored.clear();

    let (entered, exited) = diff_locks(previous, &locks);
    Selection {
        locks,
        entered,
        exited,
    }
}

/// Diff two lock sets: `(entered, exited)`. Handles in both sets are omitted.
pub fn diff_locks<H: Copy + PartialEq>(previous: &[H], next: &[H]) -> (Vec<H>, Vec<H>) {
    let exited = previous
        .iter()
        .filter(|h| !next.contains(h))
        .copied()
        .collect();
    let entered = next
        .iter()
        .filter(|h| !previous.contains(h))
        .copied()
        .collect();
    (entered, exited)
}
