// src/engine_lib/shapes.rs

use crate::rendering_lib::geometry::{Circle, ConvexPolygon, Point2};
use crate::rendering_lib::intersection::ConvexIntersection;

pub const PRIMARY_ANCHOR: usize = 0;
pub const CONTROL_ANCHOR: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    /// Isosceles triangle: the base midpoint and the apex. The base is as wide
    /// as the triangle is tall.
    Triangle { base: Point2, apex: Point2 },
    /// Axis-aligned rectangle: its center and one corner.
    Rectangle { center: Point2, corner: Point2 },
    /// The control point lies on the circle.
    Circle { center: Point2, control: Point2 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShapeColor {
    #[default]
    Black,
    Red,
}

impl ShapeColor {
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            ShapeColor::Black => [0.0, 0.0, 0.0, 1.0],
            ShapeColor::Red => [0.9, 0.1, 0.1, 1.0],
        }
    }
}

#[derive(Clone, Debug)]
pub enum ShapeGeometry {
    Polygon(ConvexPolygon),
    Circle(Circle),
}

impl ShapeGeometry {
    pub fn intersects(&self, other: &ShapeGeometry) -> bool {
        match (self, other) {
            (ShapeGeometry::Polygon(a), ShapeGeometry::Polygon(b)) => {
                ConvexIntersection::polygons_intersect(a, b)
            }
            (ShapeGeometry::Polygon(p), ShapeGeometry::Circle(c))
            | (ShapeGeometry::Circle(c), ShapeGeometry::Polygon(p)) => {
                ConvexIntersection::polygon_circle_intersect(p, c)
            }
            (ShapeGeometry::Circle(a), ShapeGeometry::Circle(b)) => {
                ConvexIntersection::circles_intersect(a, b)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: ShapeColor,
}

impl Shape {
    pub fn triangle(base: Point2, apex: Point2) -> Self {
        Self { kind: ShapeKind::Triangle { base, apex }, color: ShapeColor::Black }
    }

    pub fn rectangle(center: Point2, corner: Point2) -> Self {
        Self { kind: ShapeKind::Rectangle { center, corner }, color: ShapeColor::Black }
    }

    pub fn circle(center: Point2, control: Point2) -> Self {
        Self { kind: ShapeKind::Circle { center, control }, color: ShapeColor::Black }
    }

    pub fn anchors(&self) -> [Point2; 2] {
        match self.kind {
            ShapeKind::Triangle { base, apex } => [base, apex],
            ShapeKind::Rectangle { center, corner } => [center, corner],
            ShapeKind::Circle { center, control } => [center, control],
        }
    }

    /// Moving the primary anchor carries the whole shape; moving the control
    /// anchor reshapes it.
    pub fn move_anchor(&mut self, anchor: usize, delta: Point2) {
        let (primary, control) = match &mut self.kind {
            ShapeKind::Triangle { base, apex } => (base, apex),
            ShapeKind::Rectangle { center, corner } => (center, corner),
            ShapeKind::Circle { center, control } => (center, control),
        };
        match anchor {
            PRIMARY_ANCHOR => {
                *primary = *primary + delta;
                *control = *control + delta;
            }
            CONTROL_ANCHOR => *control = *control + delta,
            _ => log::warn!("Shape::move_anchor: no anchor {}", anchor),
        }
    }

    pub fn geometry(&self) -> ShapeGeometry {
        match self.kind {
            ShapeKind::Triangle { base, apex } => {
                let axis = apex - base;
                let half_width = axis.perp() * 0.5;
                ShapeGeometry::Polygon(ConvexPolygon::from_points(&[
                    apex,
                    base + half_width,
                    base - half_width,
                ]))
            }
            ShapeKind::Rectangle { .. } => ShapeGeometry::Polygon(ConvexPolygon::from_points(
                &self.rectangle_corners().unwrap_or_default(),
            )),
            ShapeKind::Circle { center, control } => {
                ShapeGeometry::Circle(Circle::new(center, center.distance(&control)))
            }
        }
    }

    fn rectangle_corners(&self) -> Option<[Point2; 4]> {
        let ShapeKind::Rectangle { center, corner } = self.kind else {
            return None;
        };
        let hx = (corner.x - center.x).abs();
        let hy = (corner.y - center.y).abs();
        Some([
            Point2::new(center.x - hx, center.y - hy),
            Point2::new(center.x + hx, center.y - hy),
            Point2::new(center.x + hx, center.y + hy),
            Point2::new(center.x - hx, center.y + hy),
        ])
    }

    /// Edge midpoints of a rectangle, empty for other shapes.
    pub fn edge_midpoints(&self) -> Vec<Point2> {
        match self.rectangle_corners() {
            Some(c) => (0..4).map(|i| (c[i] + c[(i + 1) % 4]) * 0.5).collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragState {
    shape: usize,
    anchor: usize,
    last: Point2,
}

/// Draggable 2D shapes whose colors track pairwise overlap.
#[derive(Clone, Debug)]
pub struct ShapesScene {
    pub shapes: Vec<Shape>,
    pub pick_radius: f32,
    drag: Option<DragState>,
    intersecting_pairs: usize,
}

impl ShapesScene {
    pub fn new(shapes: Vec<Shape>, pick_radius: f32) -> Self {
        let mut scene = Self {
            shapes,
            pick_radius,
            drag: None,
            intersecting_pairs: 0,
        };
        scene.recompute_colors();
        scene
    }

    pub fn intersecting_pairs(&self) -> usize {
        self.intersecting_pairs
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Resets every shape to black, then marks both members of each
    /// intersecting pair red. Returns the number of intersecting pairs.
    pub fn recompute_colors(&mut self) -> usize {
        let geometries: Vec<ShapeGeometry> = self.shapes.iter().map(Shape::geometry).collect();
        for shape in &mut self.shapes {
            shape.color = ShapeColor::Black;
        }
        let mut pairs = 0;
        for i in 0..geometries.len() {
            for j in (i + 1)..geometries.len() {
                if geometries[i].intersects(&geometries[j]) {
                    self.shapes[i].color = ShapeColor::Red;
                    self.shapes[j].color = ShapeColor::Red;
                    pairs += 1;
                }
            }
        }
        self.intersecting_pairs = pairs;
        pairs
    }

    /// Nearest anchor within the pick radius, as (shape, anchor).
    pub fn pick_anchor(&self, point: Point2) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize, f32)> = None;
        for (shape_idx, shape) in self.shapes.iter().enumerate() {
            for (anchor_idx, anchor) in shape.anchors().iter().enumerate() {
                let d = anchor.distance(&point);
                if d <= self.pick_radius && best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((shape_idx, anchor_idx, d));
                }
            }
        }
        best.map(|(s, a, _)| (s, a))
    }

    /// Starts dragging the anchor under the pointer. False if a drag is
    /// already active or nothing is close enough.
    pub fn pointer_down(&mut self, point: Point2) -> bool {
        if self.drag.is_some() {
            return false;
        }
        match self.pick_anchor(point) {
            Some((shape, anchor)) => {
                log::debug!("dragging anchor {} of shape {}", anchor, shape);
                self.drag = Some(DragState { shape, anchor, last: point });
                true
            }
            None => false,
        }
    }

    pub fn pointer_move(&mut self, point: Point2) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let delta = point - drag.last;
        drag.last = point;
        let (shape, anchor) = (drag.shape, drag.anchor);
        match self.shapes.get_mut(shape) {
            Some(s) => s.move_anchor(anchor, delta),
            None => return false,
        }
        self.recompute_colors();
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn rectangle_derives_corners_and_midpoints() {
        let rect = Shape::rectangle(p(100.0, 100.0), p(140.0, 120.0));
        let ShapeGeometry::Polygon(poly) = rect.geometry() else {
            panic!("rectangle should be a polygon");
        };
        assert_eq!(poly.count(), 4);
        assert!((poly.area() - 80.0 * 40.0).abs() < 1e-3);
        let mids = rect.edge_midpoints();
        assert_eq!(mids.len(), 4);
        assert!(mids.contains(&p(100.0, 80.0)));
        assert!(mids.contains(&p(140.0, 100.0)));
    }

    #[test]
    fn circle_radius_follows_control_point() {
        let mut circle = Shape::circle(p(0.0, 0.0), p(30.0, 40.0));
        let ShapeGeometry::Circle(c) = circle.geometry() else { panic!() };
        assert!((c.radius - 50.0).abs() < 1e-5);

        circle.move_anchor(CONTROL_ANCHOR, p(-30.0, -30.0));
        let ShapeGeometry::Circle(c) = circle.geometry() else { panic!() };
        assert!((c.radius - 10.0).abs() < 1e-5);
    }

    #[test]
    fn primary_anchor_translates_whole_shape() {
        let mut tri = Shape::triangle(p(0.0, 0.0), p(0.0, 50.0));
        tri.move_anchor(PRIMARY_ANCHOR, p(10.0, 5.0));
        assert_eq!(tri.anchors(), [p(10.0, 5.0), p(10.0, 55.0)]);
    }

    #[test]
    fn colors_track_overlap() {
        let mut scene = ShapesScene::new(
            vec![
                Shape::circle(p(100.0, 100.0), p(150.0, 100.0)),
                Shape::circle(p(250.0, 100.0), p(300.0, 100.0)),
                Shape::rectangle(p(500.0, 500.0), p(520.0, 520.0)),
            ],
            8.0,
        );
        assert_eq!(scene.intersecting_pairs(), 0);
        assert!(scene.shapes.iter().all(|s| s.color == ShapeColor::Black));

        assert!(scene.pointer_down(p(250.0, 100.0)));
        assert!(scene.pointer_move(p(140.0, 100.0)));
        scene.pointer_up();

        assert_eq!(scene.intersecting_pairs(), 1);
        assert_eq!(scene.shapes[0].color, ShapeColor::Red);
        assert_eq!(scene.shapes[1].color, ShapeColor::Red);
        assert_eq!(scene.shapes[2].color, ShapeColor::Black);
    }

    #[test]
    fn pointer_down_far_from_anchors_does_nothing() {
        let mut scene = ShapesScene::new(vec![Shape::circle(p(0.0, 0.0), p(10.0, 0.0))], 8.0);
        assert!(!scene.pointer_down(p(100.0, 100.0)));
        assert!(!scene.pointer_move(p(120.0, 100.0)));
    }

    #[test]
    fn pick_prefers_nearest_anchor() {
        let scene = ShapesScene::new(
            vec![
                Shape::circle(p(0.0, 0.0), p(6.0, 0.0)),
                Shape::circle(p(100.0, 100.0), p(110.0, 100.0)),
            ],
            8.0,
        );
        assert_eq!(scene.pick_anchor(p(5.0, 0.0)), Some((0, CONTROL_ANCHOR)));
        assert_eq!(scene.pick_anchor(p(1.0, 0.0)), Some((0, PRIMARY_ANCHOR)));
    }

    #[test]
    fn collapsing_a_shape_onto_its_primary_anchor_keeps_it_black() {
        let far_circle = Shape::circle(p(600.0, 600.0), p(620.0, 600.0));
        for shape in [
            Shape::triangle(p(100.0, 100.0), p(100.0, 50.0)),
            Shape::rectangle(p(100.0, 100.0), p(130.0, 80.0)),
            Shape::circle(p(100.0, 100.0), p(130.0, 100.0)),
        ] {
            let [primary, control] = shape.anchors();
            let mut scene = ShapesScene::new(vec![shape, far_circle.clone()], 8.0);
            assert!(scene.pointer_down(control));
            assert!(scene.pointer_move(primary));
            scene.pointer_up();

            assert_eq!(scene.shapes[0].anchors(), [primary, primary]);
            assert_eq!(scene.intersecting_pairs(), 0, "{:?}", scene.shapes[0].kind);
            assert!(scene.shapes.iter().all(|s| s.color == ShapeColor::Black));
        }
    }

    #[test]
    fn collapsed_shapes_far_apart_do_not_intersect() {
        let mut scene = ShapesScene::new(
            vec![
                Shape::rectangle(p(100.0, 100.0), p(100.0, 100.0)),
                Shape::rectangle(p(500.0, 500.0), p(500.0, 500.0)),
                Shape::triangle(p(300.0, 300.0), p(300.0, 300.0)),
            ],
            8.0,
        );
        assert_eq!(scene.recompute_colors(), 0);
        assert!(scene.shapes.iter().all(|s| s.color == ShapeColor::Black));
    }

    #[test]
    fn collapsed_shape_inside_another_still_counts() {
        let scene = ShapesScene::new(
            vec![
                Shape::rectangle(p(100.0, 100.0), p(140.0, 140.0)),
                Shape::triangle(p(110.0, 110.0), p(110.0, 110.0)),
            ],
            8.0,
        );
        assert_eq!(scene.intersecting_pairs(), 1);
    }
}
