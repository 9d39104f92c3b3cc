//! World-to-viewport projection.

use glam::{Mat4, Vec3};

use salvo_core::types::{Basis, ViewPoint, Viewer};

/// A camera-like mapping from world space into normalized viewport space.
pub trait ViewProjection {
    /// Project a world point. `x`/`y` are in `[0, 1]` inside the frame,
    /// `depth` is the distance along [`ViewProjection::forward`].
    fn project(&self, world: Vec3) -> ViewPoint;

    /// Viewer position in world space.
    fn position(&self) -> Vec3;

    /// Unit forward axis of the viewer.
    fn forward(&self) -> Vec3;
}

/// Perspective camera built from a [`Viewer`].
#[derive(Debug, Clone)]
pub struct PerspectiveView {
    position: Vec3,
    basis: Basis,
    view_proj: Mat4,
}

impl PerspectiveView {
    pub fn new(viewer: &Viewer) -> Self {
        let basis = viewer.basis().normalized();
        let view = Mat4::look_to_rh(viewer.position, basis.forward, basis.up);
        let aspect = if viewer.aspect > 0.0 { viewer.aspect } else { 1.0 };
        let near = viewer.near.max(f32::EPSILON);
        let far = viewer.far.max(near * 2.0);
        let fov_y = viewer.fov_y_deg.clamp(1.0, 179.0).to_radians();
        let proj = Mat4::perspective_rh(fov_y, aspect, near, far);

        Self {
            position: viewer.position,
            basis,
            view_proj: proj * view,
        }
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }
}

impl ViewProjection for PerspectiveView {
    fn project(&self, world: Vec3) -> ViewPoint {
        let depth = (world - self.position).dot(self.basis.forward);
        let clip = self.view_proj * world.extend(1.0);

        // On the viewer plane the projection is undefined; depth alone rejects it.
        if clip.w.abs() <= f32::EPSILON {
            return ViewPoint::new(0.5, 0.5, depth);
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        ViewPoint::new(ndc_x * 0.5 + 0.5, ndc_y * 0.5 + 0.5, depth)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.basis.forward
    }
}
