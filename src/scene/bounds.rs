//! Scene bounding volume

use super::Scene;
use crate::error::{RenderError, RenderResult};
use glam::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// A box that contains nothing; extending it with any point yields that point
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.extend(point);
        }
        bounds
    }

    /// Compute the box around every position in the scene
    ///
    /// Primitives without positions contribute nothing. A scene without any
    /// vertex is [`RenderError::SceneEmpty`].
    pub fn from_scene(scene: &Scene) -> RenderResult<Self> {
        let mut bounds = Self::empty();

        for (mesh_idx, prim_idx, primitive) in scene.primitives() {
            let Some(positions) = &primitive.positions else {
                log::debug!("Mesh {mesh_idx} primitive {prim_idx} has no positions, skipped for bounds");
                continue;
            };

            for point in positions.read_vec3(&scene.buffers)? {
                if !point.is_finite() {
                    return Err(RenderError::load(format!(
                        "mesh {mesh_idx} primitive {prim_idx} has a non-finite position {point}"
                    )));
                }
                bounds.extend(point);
            }
        }

        if bounds.is_empty() {
            return Err(RenderError::SceneEmpty);
        }

        log::debug!("Scene bounds: min {} max {}", bounds.min, bounds.max);
        Ok(bounds)
    }

    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// True until at least one point has been added
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min).abs() * 0.5
    }
}
