//! Axis-aligned box built from six rectangles.

use crate::{FlipNormals, HitRecord, Hittable, HittableList, Material, Ray, Rect};
use ember_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// An axis-aligned block. Every face normal points out of the block.
pub struct Block {
    p_min: Vec3,
    p_max: Vec3,
    sides: HittableList,
}

impl Block {
    /// Create a block spanning the two opposite corners `p0` and `p1`.
    pub fn new(p0: Vec3, p1: Vec3, material: Arc<dyn Material>) -> Self {
        let (lo, hi) = (p0.min(p1), p0.max(p1));

        let mut sides = HittableList::with_capacity(6);
        // Faces on the max side keep the canonical +axis normal,
        // faces on the min side are flipped to point the other way
        sides.add(Box::new(Rect::xy(lo.x, hi.x, lo.y, hi.y, hi.z, material.clone())));
        sides.add(Box::new(FlipNormals::new(Box::new(Rect::xy(
            lo.x,
            hi.x,
            lo.y,
            hi.y,
            lo.z,
            material.clone(),
        )))));
        sides.add(Box::new(Rect::xz(lo.x, hi.x, lo.z, hi.z, hi.y, material.clone())));
        sides.add(Box::new(FlipNormals::new(Box::new(Rect::xz(
            lo.x,
            hi.x,
            lo.z,
            hi.z,
            lo.y,
            material.clone(),
        )))));
        sides.add(Box::new(Rect::yz(lo.y, hi.y, lo.z, hi.z, hi.x, material.clone())));
        sides.add(Box::new(FlipNormals::new(Box::new(Rect::yz(
            lo.y, hi.y, lo.z, hi.z, lo.x, material,
        )))));

        Self {
            p_min: lo,
            p_max: hi,
            sides,
        }
    }
}

impl Hittable for Block {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.sides.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb::from_points(self.p_min, self.p_max))
    }
}
