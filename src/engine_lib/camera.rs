// src/engine_lib/camera.rs

use glam::{Mat4, Vec3};

/// Perspective projection for the figure view. The view itself comes from
/// the trackball.
#[derive(Debug)]
pub struct Camera {
    pub fov_y_rad: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Light position in eye space, handed to the shader as-is.
    pub light_position: Vec3,
}

impl Camera {
    pub fn new(fov_y_deg: f32, znear: f32, zfar: f32) -> Self {
        Self {
            fov_y_rad: fov_y_deg.to_radians(),
            znear,
            zfar,
            light_position: Vec3::new(5.0, 10.0, 10.0),
        }
    }

    // wgpu clip space has depth in [0, 1], which is what perspective_rh produces.
    pub fn projection_matrix(&self, screen_width: f32, screen_height: f32) -> Mat4 {
        let aspect_ratio = if screen_height > 0.0 {
            screen_width / screen_height
        } else {
            1.0
        };
        Mat4::perspective_rh(self.fov_y_rad, aspect_ratio, self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn near_and_far_planes_map_to_unit_depth_range() {
        let camera = Camera::new(60.0, 0.5, 100.0);
        let proj = camera.projection_matrix(800.0, 600.0);

        let near = proj * Vec4::new(0.0, 0.0, -0.5, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zero_height_does_not_produce_nan() {
        let camera = Camera::new(60.0, 0.5, 100.0);
        assert!(!camera.projection_matrix(800.0, 0.0).is_nan());
    }
}
