//! Light types for the scene

use glam::Vec3;

/// Directional light fixed to the camera
///
/// `direction` points from the surface towards the light in eye space, so
/// the default lights whatever faces the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Headlight {
    pub direction: Vec3,
    pub diffuse: Vec3,
    /// Global ambient color added to every vertex
    pub ambient: Vec3,
}

impl Default for Headlight {
    fn default() -> Self {
        Self {
            direction: Vec3::Z,
            diffuse: Vec3::ONE,
            ambient: Vec3::splat(0.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_viewer() {
        let light = Headlight::default();
        assert_eq!(light.direction, Vec3::Z);
        assert_eq!(light.diffuse, Vec3::ONE);
        assert_eq!(light.ambient, Vec3::splat(0.2));
    }
}
