// src/engine_lib/trackball.rs

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Arcball-style view rotator.
///
/// The view frame is kept as an orthonormal basis. A drag maps the previous
/// and current pointer positions to rays (points inside the circle of radius
/// `min(width, height) / 2` are lifted onto a hemisphere facing the viewer,
/// points outside stay in the image plane) and rotates the basis by the
/// transvection taking one ray onto the other.
#[derive(Debug, Clone)]
pub struct TrackballRotator {
    unit_x: Vec3,
    unit_y: Vec3,
    unit_z: Vec3,
    view_distance: f32,
    rotation_center: Option<Vec3>,
    viewport: Vec2,
    drag: Option<Vec2>,
}

impl TrackballRotator {
    pub fn new(view_distance: f32, view_direction: Vec3, view_up: Vec3) -> Self {
        let mut rotator = Self {
            unit_x: Vec3::X,
            unit_y: Vec3::Y,
            unit_z: Vec3::Z,
            view_distance,
            rotation_center: None,
            viewport: Vec2::new(1.0, 1.0),
            drag: None,
        };
        rotator.set_view(view_distance, view_direction, view_up);
        rotator
    }

    /// `view_direction` points from the scene towards the viewer.
    pub fn set_view(&mut self, view_distance: f32, view_direction: Vec3, view_up: Vec3) {
        let unit_z = view_direction.try_normalize().unwrap_or(Vec3::Z);
        let up_in_plane = view_up - unit_z * unit_z.dot(view_up);
        let unit_y = match up_in_plane.try_normalize() {
            Some(y) => y,
            None => {
                log::warn!("TrackballRotator: up vector parallel to view direction");
                unit_z.any_orthonormal_vector()
            }
        };
        self.unit_z = unit_z;
        self.unit_y = unit_y;
        self.unit_x = unit_y.cross(unit_z);
        self.view_distance = view_distance;
    }

    pub fn view_distance(&self) -> f32 {
        self.view_distance
    }

    pub fn set_view_distance(&mut self, view_distance: f32) {
        self.view_distance = view_distance;
    }

    pub fn rotation_center(&self) -> Option<Vec3> {
        self.rotation_center
    }

    pub fn set_rotation_center(&mut self, center: Option<Vec3>) {
        self.rotation_center = center;
    }

    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.unit_x, self.unit_y, self.unit_z)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Column-major view matrix: rows are the basis vectors, then the eye is
    /// pulled back by the view distance.
    pub fn view_matrix(&self) -> Mat4 {
        let (x, y, z) = (self.unit_x, self.unit_y, self.unit_z);
        let mut view = Mat4::from_cols(
            Vec4::new(x.x, y.x, z.x, 0.0),
            Vec4::new(x.y, y.y, z.y, 0.0),
            Vec4::new(x.z, y.z, z.z, 0.0),
            Vec4::W,
        );
        if let Some(center) = self.rotation_center {
            view *= Mat4::from_translation(-center);
        }
        view.w_axis.z -= self.view_distance;
        view
    }

    /// Starts a drag session. Ignored while one is already running.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(Vec2::new(x, y));
        log::debug!("trackball drag start at ({:.0}, {:.0})", x, y);
        true
    }

    /// Rotates the view for the motion since the last event. Returns true if
    /// the view changed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some(prev) = self.drag else {
            return false;
        };
        let current = Vec2::new(x, y);
        if current == prev {
            return false;
        }
        let ray_prev = self.to_ray(prev);
        let ray_current = self.to_ray(current);
        self.apply_transvection(ray_current, ray_prev);
        self.drag = Some(current);
        true
    }

    pub fn pointer_up(&mut self) {
        if self.drag.take().is_some() {
            log::debug!("trackball drag end");
        }
    }

    fn to_ray(&self, point: Vec2) -> Vec3 {
        let center = self.viewport * 0.5;
        let radius = center.x.min(center.y);
        let dx = point.x - center.x;
        let dy = center.y - point.y;
        let v = self.unit_x * dx + self.unit_y * dy;
        let dist2 = v.length_squared();
        if dist2 > radius * radius {
            v
        } else {
            v + self.unit_z * (radius * radius - dist2).sqrt()
        }
    }

    // Half-turn about the bisector of e1 and e2, then about e1: maps e2 onto e1.
    fn apply_transvection(&mut self, e1: Vec3, e2: Vec3) {
        let (Some(e1), Some(e2)) = (e1.try_normalize(), e2.try_normalize()) else {
            return;
        };
        let Some(e) = (e1 + e2).try_normalize() else {
            // Opposite rays; the rotation is undefined.
            return;
        };
        let reflect = |axis: Vec3, v: Vec3| axis * (2.0 * axis.dot(v)) - v;
        self.unit_z = reflect(e1, reflect(e, self.unit_z));
        self.unit_x = reflect(e1, reflect(e, self.unit_x));
        self.unit_y = reflect(e1, reflect(e, self.unit_y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotator() -> TrackballRotator {
        let mut r = TrackballRotator::new(20.0, Vec3::new(0.0, 0.0, 10.0), Vec3::Y);
        r.set_viewport(800.0, 600.0);
        r
    }

    fn assert_orthonormal(r: &TrackballRotator) {
        let (x, y, z) = r.basis();
        for v in [x, y, z] {
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
        assert!(x.dot(y).abs() < 1e-4);
        assert!(y.dot(z).abs() < 1e-4);
        assert!(x.cross(y).abs_diff_eq(z, 1e-4));
    }

    #[test]
    fn default_view_looks_down_negative_z() {
        let view = rotator().view_matrix();
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -20.0));
        assert!(view.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut r = rotator();
        let before = r.view_matrix();
        assert!(!r.pointer_move(500.0, 300.0));
        assert_eq!(r.view_matrix(), before);
    }

    #[test]
    fn second_pointer_down_does_not_restart_session() {
        let mut r = rotator();
        assert!(r.pointer_down(400.0, 300.0));
        assert!(!r.pointer_down(10.0, 10.0));
        r.pointer_up();
        assert!(!r.is_dragging());
    }

    #[test]
    fn horizontal_drag_spins_about_view_up() {
        let mut r = rotator();
        r.pointer_down(400.0, 300.0);
        assert!(r.pointer_move(450.0, 300.0));
        r.pointer_up();

        let (x, y, z) = r.basis();
        assert!(y.abs_diff_eq(Vec3::Y, 1e-4));
        assert!(z.y.abs() < 1e-4);
        assert!(x.y.abs() < 1e-4);
        assert!(z.x.abs() > 1e-3);
        assert_orthonormal(&r);
    }

    #[test]
    fn drag_back_restores_view() {
        let mut r = rotator();
        let before = r.view_matrix();
        r.pointer_down(400.0, 300.0);
        r.pointer_move(470.0, 250.0);
        r.pointer_move(400.0, 300.0);
        r.pointer_up();
        assert!(r.view_matrix().abs_diff_eq(before, 1e-3));
    }

    #[test]
    fn long_drags_keep_basis_orthonormal() {
        let mut r = rotator();
        r.pointer_down(400.0, 300.0);
        for i in 0..200 {
            let t = i as f32 * 0.1;
            r.pointer_move(400.0 + 350.0 * t.cos(), 300.0 + 250.0 * t.sin());
        }
        r.pointer_up();
        assert_orthonormal(&r);
    }

    #[test]
    fn rotation_center_is_moved_to_origin_before_viewing() {
        let mut r = rotator();
        r.set_rotation_center(Some(Vec3::new(1.0, 2.0, 3.0)));
        let eye_space = r.view_matrix().transform_point3(Vec3::new(1.0, 2.0, 3.0));
        assert!(eye_space.abs_diff_eq(Vec3::new(0.0, 0.0, -20.0), 1e-5));
    }
}
