// src/rendering_lib/geometry.rs

use std::ops::{Add, Mul, Sub};

use bytemuck::{Pod, Zeroable};

pub const MAX_VERTICES: usize = 16;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Point2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product of the two vectors.
    pub fn cross(&self, other: &Point2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Counter-clockwise perpendicular.
    pub fn perp(&self) -> Point2 {
        Point2::new(-self.y, self.x)
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(&self, other: &Point2) -> f32 {
        (*self - *other).length()
    }

    pub fn normalize_or_zero(&self) -> Point2 {
        let l = self.length();
        if l <= f32::EPSILON {
            Point2::ZERO
        } else {
            Point2::new(self.x / l, self.y / l)
        }
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2 {
    type Output = Point2;
    fn mul(self, rhs: f32) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Clone, Debug)]
pub struct ConvexPolygon {
    vertices: [Point2; MAX_VERTICES],
    count: usize,
}

impl Default for ConvexPolygon {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvexPolygon {
    pub fn new() -> Self {
        Self {
            vertices: [Point2::ZERO; MAX_VERTICES],
            count: 0,
        }
    }

    /// Points beyond `MAX_VERTICES` are dropped.
    pub fn from_points(points: &[Point2]) -> Self {
        let mut polygon = Self::new();
        polygon.copy_vertices_from_slice(points);
        polygon
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices[..self.count]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn copy_vertices_from_slice(&mut self, slice: &[Point2]) {
        let num_to_copy = slice.len().min(MAX_VERTICES);
        self.vertices[..num_to_copy].copy_from_slice(&slice[..num_to_copy]);
        self.count = num_to_copy;
    }

    /// Edge `i` runs from vertex `i` to vertex `i + 1`, wrapping around.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.count;
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn centroid(&self) -> Point2 {
        if self.count == 0 {
            return Point2::ZERO;
        }
        let sum = self
            .vertices()
            .iter()
            .fold(Point2::ZERO, |acc, p| acc + *p);
        sum * (1.0 / self.count as f32)
    }

    pub fn area(&self) -> f32 {
        if self.count < 3 {
            return 0.0;
        }
        let doubled: f32 = self.edges().map(|(a, b)| a.cross(&b)).sum();
        doubled.abs() / 2.0
    }

    /// Works for either winding. Points on the boundary count as inside.
    pub fn contains_point(&self, point: &Point2) -> bool {
        if self.count < 3 {
            return false;
        }
        let mut has_pos = false;
        let mut has_neg = false;
        for (a, b) in self.edges() {
            let side = (b - a).cross(&(*point - a));
            if side > 1e-5 {
                has_pos = true;
            } else if side < -1e-5 {
                has_neg = true;
            }
            if has_pos && has_neg {
                return false;
            }
        }
        if has_pos || has_neg {
            return true;
        }
        // Collapsed to a point or segment: only points on it are inside.
        self.edges()
            .any(|(a, b)| point_segment_distance(point, &a, &b) <= 1e-5)
    }

    /// True when the vertices enclose no area (a point or a segment).
    pub fn is_flat(&self) -> bool {
        self.area() <= f32::EPSILON
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Point2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Boundary approximation used for drawing.
    pub fn outline(&self, segments: usize) -> Vec<Point2> {
        let segments = segments.max(3);
        (0..segments)
            .map(|i| {
                let angle = (i as f32) * std::f32::consts::TAU / (segments as f32);
                Point2::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

/// Shortest distance from `point` to the segment `a..b`.
pub fn point_segment_distance(point: &Point2, a: &Point2, b: &Point2) -> f32 {
    let ab = *b - *a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((*point - *a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    point.distance(&(*a + ab * t))
}
