//! Core geometry types for surfel generation
//!
//! Small value types shared by the sampling, clustering, and packing
//! stages: axis-aligned bounding boxes, corner triangles in 3D and UV
//! space, and bounding spheres used for coverage tests.
//!
//! Author: Moroya Sakamoto

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ── Bounding box ─────────────────────────────────────────────

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Create from center and half-extents
    pub fn from_center_extents(center: Vec3, half_extents: Vec3) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the largest dimension
    pub fn largest_extent(&self) -> f32 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }

    /// Check if point is inside
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Grow to include a point
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

// ── Triangles ────────────────────────────────────────────────

/// Triangle with three 3D corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle3 {
    /// First corner
    pub a: Vec3,
    /// Second corner
    pub b: Vec3,
    /// Third corner
    pub c: Vec3,
}

impl Triangle3 {
    /// Create a new triangle
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Triangle3 { a, b, c }
    }

    /// Surface area
    #[inline]
    pub fn area(&self) -> f32 {
        (self.b - self.a).cross(self.c - self.a).length() * 0.5
    }

    /// Centroid of the three corners
    #[inline]
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Split into four child triangles by edge midpoints.
    ///
    /// The first three children keep one original corner each; the
    /// fourth is the inner midpoint triangle. Child areas sum to the
    /// parent area.
    pub fn split(&self) -> [Triangle3; 4] {
        let ab = (self.a + self.b) * 0.5;
        let bc = (self.b + self.c) * 0.5;
        let ca = (self.c + self.a) * 0.5;

        [
            Triangle3::new(self.a, ab, ca),
            Triangle3::new(ab, self.b, bc),
            Triangle3::new(ca, bc, self.c),
            Triangle3::new(ab, bc, ca),
        ]
    }
}

/// Triangle with three 2D corners (texture space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle2 {
    /// First corner
    pub a: Vec2,
    /// Second corner
    pub b: Vec2,
    /// Third corner
    pub c: Vec2,
}

impl Triangle2 {
    /// Create a new triangle
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Triangle2 { a, b, c }
    }

    /// Split into four child triangles by edge midpoints, mirroring
    /// [`Triangle3::split`] so position and UV children stay paired.
    pub fn split(&self) -> [Triangle2; 4] {
        let ab = (self.a + self.b) * 0.5;
        let bc = (self.b + self.c) * 0.5;
        let ca = (self.c + self.a) * 0.5;

        [
            Triangle2::new(self.a, ab, ca),
            Triangle2::new(ab, self.b, bc),
            Triangle2::new(ca, bc, self.c),
            Triangle2::new(ab, bc, ca),
        ]
    }
}

// ── Sphere ───────────────────────────────────────────────────

/// Sphere used for surfel coverage tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center of the sphere
    pub center: Vec3,
    /// Radius of the sphere
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere
    pub fn new(center: Vec3, radius: f32) -> Self {
        Sphere { center, radius }
    }

    /// Test if a point is inside the sphere
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Test if a triangle lies entirely inside the sphere.
    ///
    /// Spheres are convex, so containing all three corners contains
    /// the whole triangle.
    #[inline]
    pub fn contains_triangle(&self, triangle: &Triangle3) -> bool {
        self.contains_point(triangle.a)
            && self.contains_point(triangle.b)
            && self.contains_point(triangle.c)
    }
}
