//! Hittable trait and HitRecord for ray-surface intersection.

use crate::{Material, Ray, ScatterResult};
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// A placeholder material used for HitRecord::default().
/// Always absorbs light (returns None from scatter).
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

/// Static dummy material instance for Default impl.
static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-surface intersection.
///
/// Only the innermost successful `hit` writes to a record, so a record
/// passed to a failed `hit` keeps whatever it held before.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Ray parameter where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal. Geometric, not flipped toward the ray;
    /// decorators such as `FlipNormals` may reverse it.
    pub normal: Vec3,
    /// Texture coordinates in [0, 1]
    pub u: f32,
    pub v: f32,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            t: 0.0,
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            u: 0.0,
            v: 0.0,
            material: &DUMMY_MATERIAL,
        }
    }
}

/// Trait for surfaces that can be hit by rays.
///
/// Surface trees are built once and then only read, so every implementor
/// must be shareable across render threads.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this surface strictly inside `ray_t`.
    ///
    /// Returns true on a hit and fills in every field of `rec` with the
    /// closest qualifying intersection.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Bounding box over the shutter interval `[time0, time1]`, or `None`
    /// if the surface has no finite box.
    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb>;
}

/// A list of hittable surfaces.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create an empty list with room for `capacity` surfaces.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Add a surface to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Box<dyn Hittable>>> for HittableList {
    fn from(objects: Vec<Box<dyn Hittable>>) -> Self {
        Self { objects }
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(ray, ray_t.up_to(closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        let (first, rest) = self.objects.split_first()?;
        let mut bbox = first.bounding_box(time0, time1)?;
        for object in rest {
            bbox = Aabb::surrounding(&bbox, &object.bounding_box(time0, time1)?);
        }
        Some(bbox)
    }
}
