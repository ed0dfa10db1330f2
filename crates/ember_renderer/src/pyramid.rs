//! Square pyramid: a square base in the XZ plane and four triangular sides.

use crate::{FlipNormals, HitRecord, Hittable, HittableList, Material, Ray, Rect, Triangle};
use ember_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// A square pyramid standing on the XZ plane.
pub struct SquarePyramid {
    base: Vec3,
    side: f32,
    height: f32,
    faces: HittableList,
}

impl SquarePyramid {
    /// - `base`: minimum corner of the base square
    /// - `side`: edge length of the base
    /// - `height`: apex height above the base center
    pub fn new(base: Vec3, side: f32, height: f32, material: Arc<dyn Material>) -> Self {
        let (x0, y, z0) = (base.x, base.y, base.z);
        let (x1, z1) = (x0 + side, z0 + side);
        let apex = Vec3::new(x0 + side * 0.5, y + height, z0 + side * 0.5);

        // Base corners counter-clockwise seen from above
        let corners = [
            Vec3::new(x0, y, z0),
            Vec3::new(x1, y, z0),
            Vec3::new(x1, y, z1),
            Vec3::new(x0, y, z1),
        ];

        let mut faces = HittableList::with_capacity(5);
        faces.add(Box::new(FlipNormals::new(Box::new(Rect::xz(
            x0,
            x1,
            z0,
            z1,
            y,
            material.clone(),
        )))));
        for i in 0..4 {
            let (a, b) = (corners[i], corners[(i + 1) % 4]);
            faces.add(Box::new(Triangle::new(a, apex, b, material.clone())));
        }

        Self {
            base,
            side,
            height,
            faces,
        }
    }
}

impl Hittable for SquarePyramid {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.faces.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        let extent = Vec3::new(self.side, self.height, self.side);
        Some(Aabb::from_points(self.base, self.base + extent))
    }
}
