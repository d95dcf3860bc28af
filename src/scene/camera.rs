//! Camera system
//!
//! The camera is placed once from the scene bounds and never moves.

use super::BoundingBox;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32, // radians
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

/// Camera for viewing the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
}

impl Camera {
    /// Distance used when the bounds collapse to a single point
    pub const MIN_FRAMING_DISTANCE: f32 = 1.0;

    /// Frame the whole bounding box from the +Z side
    ///
    /// The eye sits on the +Z axis through the box center, at a distance equal
    /// to the length of the half-extent vector.
    pub fn frame_bounds(bounds: &BoundingBox, fov_y_degrees: f32, aspect: f32) -> Self {
        let center = bounds.center();
        let distance = Self::framing_distance(bounds);

        Self {
            position: center + Vec3::Z * distance,
            target: center,
            up: Vec3::Y,
            projection: Projection::perspective(
                fov_y_degrees,
                aspect,
                distance * 0.01,
                distance * 3.0,
            ),
        }
    }

    pub fn framing_distance(bounds: &BoundingBox) -> f32 {
        let distance = bounds.half_extents().length();
        if distance > f32::EPSILON {
            distance
        } else {
            Self::MIN_FRAMING_DISTANCE
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Build camera uniform data for shaders
    pub fn uniform_data(&self) -> CameraUniformData {
        CameraUniformData {
            view: self.view_matrix(),
            view_proj: self.view_projection_matrix(),
        }
    }
}

/// Camera uniform data for GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniformData {
    pub view: Mat4,
    pub view_proj: Mat4,
}
