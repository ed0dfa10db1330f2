//! Triangle primitive for ray tracing.
//!
//! Intersects the triangle's plane, then applies the inside-outside test:
//! the hit point must lie on the inner side of all three edges, i.e.
//! `(edge × (p - vertex)) · n >= 0` for each edge.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// A single triangle. Vertices wind counter-clockwise around the normal.
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Unnormalized face normal (twice the area)
    area_normal: Vec3,
    material: Arc<dyn Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<dyn Material>) -> Self {
        Self {
            v0,
            v1,
            v2,
            area_normal: (v1 - v0).cross(v2 - v0),
            material,
        }
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let n = self.area_normal;

        // Parallel to the plane, or a degenerate triangle
        let denom = ray.direction().dot(n);
        if denom.abs() < 1e-8 {
            return false;
        }

        let t = (self.v0 - ray.origin()).dot(n) / denom;
        if !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);

        // Each signed double-area is the barycentric weight of the
        // vertex opposite that edge
        let w2 = n.dot((self.v1 - self.v0).cross(p - self.v0));
        if w2 < 0.0 {
            return false;
        }
        let w0 = n.dot((self.v2 - self.v1).cross(p - self.v1));
        if w0 < 0.0 {
            return false;
        }
        let w1 = n.dot((self.v0 - self.v2).cross(p - self.v2));
        if w1 < 0.0 {
            return false;
        }

        let n_len_sq = n.length_squared();

        rec.t = t;
        rec.p = p;
        rec.normal = n / n_len_sq.sqrt();
        rec.u = w1 / n_len_sq;
        rec.v = w2 / n_len_sq;
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        let min = self.v0.min(self.v1).min(self.v2);
        let max = self.v0.max(self.v1).max(self.v2);
        Some(Aabb::from_points(min, max))
    }
}
