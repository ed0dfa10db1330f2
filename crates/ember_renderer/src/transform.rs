//! Decorators that wrap a single surface and transform rays and hits
//! around the delegated call.

use crate::{HitRecord, Hittable, Ray};
use ember_math::{Aabb, Interval, Vec3};

/// Reverses the normal reported by the wrapped surface.
pub struct FlipNormals {
    object: Box<dyn Hittable>,
}

impl FlipNormals {
    pub fn new(object: Box<dyn Hittable>) -> Self {
        Self { object }
    }
}

impl Hittable for FlipNormals {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if !self.object.hit(ray, ray_t, rec) {
            return false;
        }
        rec.normal = -rec.normal;
        true
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.object.bounding_box(time0, time1)
    }
}

/// Moves the wrapped surface by a fixed offset.
pub struct Translate {
    object: Box<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(object: Box<dyn Hittable>, offset: Vec3) -> Self {
        Self { object, offset }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Move the ray into object space instead of moving the object
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());
        if !self.object.hit(&moved, ray_t, rec) {
            return false;
        }
        rec.p += self.offset;
        true
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.object
            .bounding_box(time0, time1)
            .map(|bbox| bbox.translate(self.offset))
    }
}

/// Coordinate axis a rotation turns about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Right-handed rotation of `v` by the angle with the given sine and cosine.
    fn rotate(self, v: Vec3, sin: f32, cos: f32) -> Vec3 {
        match self {
            Axis::X => Vec3::new(v.x, cos * v.y - sin * v.z, sin * v.y + cos * v.z),
            Axis::Y => Vec3::new(cos * v.x + sin * v.z, v.y, -sin * v.x + cos * v.z),
            Axis::Z => Vec3::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y, v.z),
        }
    }
}

/// Rotates the wrapped surface about a coordinate axis.
pub struct Rotate {
    object: Box<dyn Hittable>,
    axis: Axis,
    sin_theta: f32,
    cos_theta: f32,
    /// World-space box, recomputed from the child's rotated corners
    bbox: Option<Aabb>,
}

impl Rotate {
    /// Rotate `object` by `degrees` about `axis`.
    pub fn new(object: Box<dyn Hittable>, axis: Axis, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let (sin_theta, cos_theta) = radians.sin_cos();

        let bbox = object.bounding_box(0.0, 1.0).map(|child| {
            let (min, max) = child.corners().iter().fold(
                (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
                |(min, max), &corner| {
                    let rotated = axis.rotate(corner, sin_theta, cos_theta);
                    (min.min(rotated), max.max(rotated))
                },
            );
            Aabb::from_points(min, max)
        });

        Self {
            object,
            axis,
            sin_theta,
            cos_theta,
            bbox,
        }
    }

    pub fn x(object: Box<dyn Hittable>, degrees: f32) -> Self {
        Self::new(object, Axis::X, degrees)
    }

    pub fn y(object: Box<dyn Hittable>, degrees: f32) -> Self {
        Self::new(object, Axis::Y, degrees)
    }

    pub fn z(object: Box<dyn Hittable>, degrees: f32) -> Self {
        Self::new(object, Axis::Z, degrees)
    }

    /// Object space to world space.
    pub fn to_world(&self, v: Vec3) -> Vec3 {
        self.axis.rotate(v, self.sin_theta, self.cos_theta)
    }

    /// World space to object space.
    pub fn to_object(&self, v: Vec3) -> Vec3 {
        self.axis.rotate(v, -self.sin_theta, self.cos_theta)
    }
}

impl Hittable for Rotate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let rotated = Ray::new(
            self.to_object(ray.origin()),
            self.to_object(ray.direction()),
            ray.time(),
        );

        if !self.object.hit(&rotated, ray_t, rec) {
            return false;
        }

        rec.p = self.to_world(rec.p);
        rec.normal = self.to_world(rec.normal);
        true
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Block, Lambertian, Material, Rect, Sphere};
    use std::sync::Arc;

    const EPS: f32 = 1e-4;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    fn unit_block() -> Box<dyn Hittable> {
        Box::new(Block::new(Vec3::ZERO, Vec3::ONE, gray()))
    }

    fn cast<'a>(object: &'a dyn Hittable, ray: &Ray) -> Option<HitRecord<'a>> {
        let mut rec = HitRecord::default();
        object
            .hit(ray, Interval::from_t_min(0.001), &mut rec)
            .then_some(rec)
    }

    #[test]
    fn test_flip_normals_only_negates_normal() {
        let plain = Rect::xy(-1.0, 1.0, -1.0, 1.0, 0.0, gray());
        let flipped = FlipNormals::new(Box::new(Rect::xy(-1.0, 1.0, -1.0, 1.0, 0.0, gray())));
        let ray = Ray::new_simple(Vec3::new(0.2, 0.3, 2.0), -Vec3::Z);

        let a = cast(&plain, &ray).unwrap();
        let b = cast(&flipped, &ray).unwrap();
        assert_eq!(a.t, b.t);
        assert_eq!(a.p, b.p);
        assert_eq!((a.u, a.v), (b.u, b.v));
        assert_eq!(a.normal, -b.normal);
        assert_eq!(plain.bounding_box(0.0, 1.0), flipped.bounding_box(0.0, 1.0));
    }

    #[test]
    fn test_translate_shifts_hit_point_and_box() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, gray());
        let ray = Ray::new_simple(Vec3::new(3.0, 2.0, 10.0), -Vec3::Z);

        for offset in [Vec3::ZERO, Vec3::new(3.0, 2.0, -1.0), Vec3::new(-0.5, 0.0, 4.0)] {
            let moved = Translate::new(Box::new(Sphere::new(Vec3::ZERO, 1.0, gray())), offset);
            let shifted = Ray::new(ray.origin() - offset, ray.direction(), ray.time());

            match (cast(&moved, &ray), cast(&sphere, &shifted)) {
                (Some(world), Some(local)) => {
                    assert!((world.p - (local.p + offset)).length() < EPS);
                    assert_eq!(world.t, local.t);
                }
                (None, None) => {}
                _ => panic!("translate disagrees with shifted ray for {offset:?}"),
            }

            let bbox = moved.bounding_box(0.0, 1.0).unwrap();
            assert!((bbox.min() - (offset - Vec3::ONE)).length() < EPS);
        }
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let rotated = Rotate::y(unit_block(), 0.0);
        let block = Block::new(Vec3::ZERO, Vec3::ONE, gray());
        let ray = Ray::new_simple(Vec3::new(0.3, 0.6, 5.0), -Vec3::Z);

        let a = cast(&block, &ray).unwrap();
        let b = cast(&rotated, &ray).unwrap();
        assert!((a.p - b.p).length() < EPS);
        assert!((a.normal - b.normal).length() < EPS);

        let (ba, bb) = (block.bounding_box(0.0, 1.0).unwrap(), rotated.bounding_box(0.0, 1.0).unwrap());
        assert!((ba.min() - bb.min()).length() < EPS);
        assert!((ba.max() - bb.max()).length() < EPS);
    }

    #[test]
    fn test_rotation_round_trip() {
        let p = Vec3::new(1.5, -2.0, 0.75);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for degrees in [0.0, 30.0, 90.0, 180.0, -45.0] {
                let forward = Rotate::new(unit_block(), axis, degrees);
                let backward = Rotate::new(unit_block(), axis, -degrees);

                let there_and_back = backward.to_world(forward.to_world(p));
                assert!((there_and_back - p).length() < EPS, "{axis:?} {degrees}");
                assert!((forward.to_object(forward.to_world(p)) - p).length() < EPS);
            }
        }
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let r = Rotate::y(unit_block(), 90.0);
        assert!((r.to_world(Vec3::X) - -Vec3::Z).length() < EPS);
        assert!((r.to_world(Vec3::Z) - Vec3::X).length() < EPS);
        assert!((r.to_world(Vec3::Y) - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_rotated_bounding_box_contains_rotated_corners() {
        let r = Rotate::y(unit_block(), 45.0);
        let bbox = r.bounding_box(0.0, 1.0).unwrap();
        let diagonal = std::f32::consts::SQRT_2;

        assert!((bbox.x.size() - diagonal).abs() < 1e-3);
        assert!((bbox.z.size() - diagonal).abs() < 1e-3);
        assert!((bbox.y.size() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotated_hit_normal_is_in_world_space() {
        // Block turned a quarter around Y: its +X face now faces -Z
        let r = Rotate::y(unit_block(), 90.0);
        let ray = Ray::new_simple(Vec3::new(0.5, 0.5, -5.0), Vec3::Z);

        let rec = cast(&r, &ray).unwrap();
        assert!((rec.normal - -Vec3::Z).length() < EPS);
        assert!((rec.p.z - -1.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_x_hit_normal_is_in_world_space() {
        // Quarter turn around X: the block's +Y face now faces +Z
        let r = Rotate::x(unit_block(), 90.0);
        let ray = Ray::new_simple(Vec3::new(0.5, -0.5, 5.0), -Vec3::Z);

        let rec = cast(&r, &ray).unwrap();
        assert!((rec.normal - Vec3::Z).length() < EPS);
        assert!((rec.p - Vec3::new(0.5, -0.5, 1.0)).length() < EPS);
    }

    #[test]
    fn test_rotate_z_hit_normal_is_in_world_space() {
        // Quarter turn around Z: the block's +X face now faces +Y
        let r = Rotate::z(unit_block(), 90.0);
        let ray = Ray::new_simple(Vec3::new(-0.5, 5.0, 0.5), -Vec3::Y);

        let rec = cast(&r, &ray).unwrap();
        assert!((rec.normal - Vec3::Y).length() < EPS);
        assert!((rec.p - Vec3::new(-0.5, 1.0, 0.5)).length() < EPS);
    }

    #[test]
    fn test_rotated_hits_stay_inside_box_with_outward_normals() {
        let directions = [
            Vec3::X,
            -Vec3::X,
            Vec3::Y,
            -Vec3::Y,
            Vec3::Z,
            -Vec3::Z,
            Vec3::new(0.7, 0.4, 0.2).normalize(),
            Vec3::new(-1.0, 0.5, 0.3).normalize(),
        ];

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for degrees in [30.0, 90.0, 135.0] {
                let r = Rotate::new(unit_block(), axis, degrees);
                let bbox = r.bounding_box(0.0, 1.0).unwrap();
                let centre = r.to_world(Vec3::splat(0.5));

                for dir in directions {
                    let ray = Ray::new_simple(centre + dir * 5.0, -dir);
                    let rec = cast(&r, &ray).unwrap_or_else(|| panic!("{axis:?} {degrees} {dir:?}"));

                    assert!((rec.normal.length() - 1.0).abs() < EPS);
                    assert!(rec.normal.dot(ray.direction()) < 0.0, "{axis:?} {degrees} {dir:?}");
                    assert!(bbox.x.expand(1e-3).contains(rec.p.x));
                    assert!(bbox.y.expand(1e-3).contains(rec.p.y));
                    assert!(bbox.z.expand(1e-3).contains(rec.p.z));
                }
            }
        }
    }
}
