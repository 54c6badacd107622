// src/rendering_lib/intersection.rs

use super::geometry::{point_segment_distance, Circle, ConvexPolygon, Point2};

pub struct ConvexIntersection;

impl ConvexIntersection {
    #[inline(always)]
    fn project(polygon: &ConvexPolygon, axis: &Point2) -> (f32, f32) {
        polygon
            .vertices()
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), v| {
                let d = v.dot(axis);
                (min.min(d), max.max(d))
            })
    }

    fn separated_along(axis: &Point2, poly1: &ConvexPolygon, poly2: &ConvexPolygon) -> bool {
        if axis.length_squared() <= f32::EPSILON {
            return false;
        }
        let (min_a, max_a) = Self::project(poly1, axis);
        let (min_b, max_b) = Self::project(poly2, axis);
        max_a < min_b || max_b < min_a
    }

    /// True if some edge normal of `reference` separates the two polygons.
    /// A flat `reference` has no interior, so its edge directions are tried
    /// as well.
    fn has_separating_axis(reference: &ConvexPolygon, other: &ConvexPolygon) -> bool {
        let flat = reference.is_flat();
        reference.edges().any(|(start, end)| {
            let direction = end - start;
            Self::separated_along(&direction.perp(), reference, other)
                || (flat && Self::separated_along(&direction, reference, other))
        })
    }

    /// Separating-axis test. Touching polygons count as intersecting.
    pub fn polygons_intersect(poly1: &ConvexPolygon, poly2: &ConvexPolygon) -> bool {
        if poly1.count() == 0 || poly2.count() == 0 {
            return false;
        }
        // Two collapsed points have no edge axes at all.
        let between = poly2.centroid() - poly1.centroid();
        !Self::separated_along(&between, poly1, poly2)
            && !Self::has_separating_axis(poly1, poly2)
            && !Self::has_separating_axis(poly2, poly1)
    }

    pub fn polygon_circle_intersect(polygon: &ConvexPolygon, circle: &Circle) -> bool {
        if polygon.count() == 0 {
            return false;
        }
        if polygon.contains_point(&circle.center) {
            return true;
        }
        polygon
            .edges()
            .any(|(a, b)| point_segment_distance(&circle.center, &a, &b) <= circle.radius)
    }

    pub fn circles_intersect(c1: &Circle, c2: &Circle) -> bool {
        let reach = c1.radius + c2.radius;
        (c1.center - c2.center).length_squared() <= reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, size: f32) -> ConvexPolygon {
        ConvexPolygon::from_points(&[
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ])
    }

    #[test]
    fn circle_circle_flips_when_centers_close_in() {
        let c1 = Circle::new(Point2::new(100.0, 100.0), 50.0);
        let mut c2 = Circle::new(Point2::new(250.0, 100.0), 50.0);
        assert!(!ConvexIntersection::circles_intersect(&c1, &c2));

        c2.center = Point2::new(140.0, 100.0);
        assert!(ConvexIntersection::circles_intersect(&c1, &c2));
    }

    #[test]
    fn sat_separates_disjoint_squares() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(20.0, 0.0, 10.0);
        assert!(!ConvexIntersection::polygons_intersect(&a, &b));
    }

    #[test]
    fn sat_detects_overlap_and_containment() {
        let a = square(0.0, 0.0, 10.0);
        assert!(ConvexIntersection::polygons_intersect(&a, &square(5.0, 5.0, 10.0)));
        assert!(ConvexIntersection::polygons_intersect(&a, &square(2.0, 2.0, 1.0)));
    }

    #[test]
    fn sat_uses_diagonal_axes() {
        // Axis-aligned bounds overlap, but the triangle's hypotenuse separates them.
        let tri = ConvexPolygon::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ]);
        let b = square(8.0, 8.0, 4.0);
        assert!(!ConvexIntersection::polygons_intersect(&tri, &b));
    }

    #[test]
    fn polygon_circle_edge_and_center_cases() {
        let a = square(0.0, 0.0, 10.0);
        // center inside
        assert!(ConvexIntersection::polygon_circle_intersect(&a, &Circle::new(Point2::new(5.0, 5.0), 1.0)));
        // center outside, edge within radius
        assert!(ConvexIntersection::polygon_circle_intersect(&a, &Circle::new(Point2::new(12.0, 5.0), 3.0)));
        // near a corner but out of reach
        assert!(!ConvexIntersection::polygon_circle_intersect(&a, &Circle::new(Point2::new(13.0, 13.0), 4.0)));
    }

    fn dot(x: f32, y: f32) -> ConvexPolygon {
        ConvexPolygon::from_points(&[Point2::new(x, y); 4])
    }

    #[test]
    fn collapsed_polygons_only_hit_what_they_touch() {
        assert!(!ConvexIntersection::polygons_intersect(&dot(100.0, 100.0), &dot(500.0, 500.0)));
        assert!(ConvexIntersection::polygons_intersect(&dot(3.0, 3.0), &dot(3.0, 3.0)));

        let a = square(0.0, 0.0, 10.0);
        assert!(ConvexIntersection::polygons_intersect(&a, &dot(5.0, 5.0)));
        assert!(!ConvexIntersection::polygons_intersect(&a, &dot(50.0, 5.0)));
    }

    #[test]
    fn collinear_segments_are_separated_along_their_direction() {
        let seg = |x0: f32, x1: f32| {
            ConvexPolygon::from_points(&[Point2::new(x0, 0.0), Point2::new(x1, 0.0), Point2::new(x0, 0.0)])
        };
        assert!(!ConvexIntersection::polygons_intersect(&seg(0.0, 10.0), &seg(20.0, 30.0)));
        assert!(ConvexIntersection::polygons_intersect(&seg(0.0, 10.0), &seg(5.0, 30.0)));
    }

    #[test]
    fn collapsed_polygon_misses_distant_circle() {
        let far = Circle::new(Point2::new(600.0, 600.0), 20.0);
        assert!(!ConvexIntersection::polygon_circle_intersect(&dot(100.0, 100.0), &far));
        let near = Circle::new(Point2::new(110.0, 100.0), 20.0);
        assert!(ConvexIntersection::polygon_circle_intersect(&dot(100.0, 100.0), &near));
    }
}
