//! Axis-aligned rectangles.
//!
//! A rectangle lies in the plane where one coordinate equals `k` and spans
//! `[a0, a1] × [b0, b1]` in the other two. Its normal always points along
//! the positive fixed axis; wrap it in `FlipNormals` for the other side.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// Half-thickness given to the flat axis of the bounding box.
const BOX_PADDING: f32 = 0.0001;

/// Which plane a rectangle lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// z = k, spanning x and y
    XY,
    /// y = k, spanning x and z
    XZ,
    /// x = k, spanning y and z
    YZ,
}

impl Plane {
    /// Axis indices `(a, b, fixed)`.
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::XY => (0, 1, 2),
            Plane::XZ => (0, 2, 1),
            Plane::YZ => (1, 2, 0),
        }
    }

    fn normal(self) -> Vec3 {
        match self {
            Plane::XY => Vec3::Z,
            Plane::XZ => Vec3::Y,
            Plane::YZ => Vec3::X,
        }
    }
}

/// An axis-aligned rectangle.
pub struct Rect {
    plane: Plane,
    a: Interval,
    b: Interval,
    k: f32,
    material: Arc<dyn Material>,
}

impl Rect {
    pub fn new(plane: Plane, a: Interval, b: Interval, k: f32, material: Arc<dyn Material>) -> Self {
        Self {
            plane,
            a,
            b,
            k,
            material,
        }
    }

    /// Rectangle in the plane z = k.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::XY, Interval::new(x0, x1), Interval::new(y0, y1), k, material)
    }

    /// Rectangle in the plane y = k.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::XZ, Interval::new(x0, x1), Interval::new(z0, z1), k, material)
    }

    /// Rectangle in the plane x = k.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::YZ, Interval::new(y0, y1), Interval::new(z0, z1), k, material)
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }
}

impl Hittable for Rect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let (ai, bi, ki) = self.plane.axes();

        // Parallel to the plane
        let dk = ray.direction()[ki];
        if dk.abs() < 1e-8 {
            return false;
        }

        let t = (self.k - ray.origin()[ki]) / dk;
        if !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);
        let (a, b) = (p[ai], p[bi]);
        if !self.a.contains(a) || !self.b.contains(b) {
            return false;
        }

        rec.t = t;
        rec.p = p;
        rec.normal = self.plane.normal();
        rec.u = self.a.fraction(a);
        rec.v = self.b.fraction(b);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        let (ai, bi, ki) = self.plane.axes();
        let mut axes = [Interval::EMPTY; 3];
        axes[ai] = self.a;
        axes[bi] = self.b;
        axes[ki] = Interval::new(self.k - BOX_PADDING, self.k + BOX_PADDING);
        Some(Aabb::new(axes[0], axes[1], axes[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    fn unit_rects() -> [Rect; 3] {
        [
            Rect::xy(0.0, 2.0, 0.0, 4.0, 1.0, gray()),
            Rect::xz(0.0, 2.0, 0.0, 4.0, 1.0, gray()),
            Rect::yz(0.0, 2.0, 0.0, 4.0, 1.0, gray()),
        ]
    }

    #[test]
    fn test_rect_hit_uv_and_normal() {
        let rect = Rect::xz(0.0, 2.0, 0.0, 4.0, 1.0, gray());
        let ray = Ray::new_simple(Vec3::new(0.5, 5.0, 3.0), -Vec3::Y);
        let mut rec = HitRecord::default();

        assert!(rect.hit(&ray, Interval::from_t_min(0.001), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Y);
        assert!((rec.u - 0.25).abs() < 1e-5);
        assert!((rec.v - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_rect_normal_independent_of_ray_side() {
        let rect = Rect::xy(-1.0, 1.0, -1.0, 1.0, 0.0, gray());
        let interval = Interval::from_t_min(0.001);

        for (origin, dir) in [(Vec3::Z, -Vec3::Z), (-Vec3::Z, Vec3::Z)] {
            let mut rec = HitRecord::default();
            assert!(rect.hit(&Ray::new_simple(origin, dir), interval, &mut rec));
            assert_eq!(rec.normal, Vec3::Z);
        }
    }

    #[test]
    fn test_rect_parallel_ray_never_hits() {
        let interval = Interval::from_t_min(0.001);
        // Directions with no component along each rectangle's fixed axis
        let directions = [Vec3::X, Vec3::Z, Vec3::Y];

        for (rect, dir) in unit_rects().iter().zip(directions) {
            let ray = Ray::new_simple(Vec3::new(1.0, 1.0, 1.0), dir);
            let mut rec = HitRecord::default();
            assert!(!rect.hit(&ray, interval, &mut rec));
            assert_eq!(rec.t, 0.0);
        }
    }

    #[test]
    fn test_rect_outside_extent_misses() {
        let rect = Rect::yz(0.0, 1.0, 0.0, 1.0, 3.0, gray());
        let ray = Ray::new_simple(Vec3::new(0.0, 2.0, 0.5), Vec3::X);
        let mut rec = HitRecord::default();
        assert!(!rect.hit(&ray, Interval::from_t_min(0.001), &mut rec));
    }

    #[test]
    fn test_rect_bounding_box_is_padded() {
        for rect in unit_rects() {
            let bbox = rect.bounding_box(0.0, 1.0).unwrap();
            let (_, _, ki) = rect.plane().axes();
            let fixed = bbox.axis_interval(ki);
            assert!(fixed.size() > 0.0);
            assert!(fixed.surrounds(1.0));
        }
    }
}
