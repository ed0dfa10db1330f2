//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        let phi = p.z.atan2(p.x);
        // Rounding can push |y| a hair past 1
        let theta = p.y.clamp(-1.0, 1.0).asin();

        let u = 1.0 - (phi + PI) / (2.0 * PI);
        let v = (theta + FRAC_PI_2) / PI;
        (u, v)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // a·t² + 2b·t + c = 0
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        // Tangent rays count as a miss
        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;

        rec.t = root;
        rec.p = p;
        rec.normal = outward_normal;
        (rec.u, rec.v) = Self::get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        let rvec = Vec3::splat(self.radius);
        Some(Aabb::from_points(self.center - rvec, self.center + rvec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray());

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let interval = Interval::from_t_min(0.001);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, interval, &mut rec));
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!((0.0..=1.0).contains(&rec.u));
        assert!((0.0..=1.0).contains(&rec.v));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray());

        // Ray pointing away from sphere
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let interval = Interval::from_t_min(0.001);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, interval, &mut rec));
    }

    #[test]
    fn test_sphere_near_and_far_roots() {
        for radius in [0.5_f32, 1.0, 3.0] {
            let sphere = Sphere::new(Vec3::new(2.0, -1.0, 4.0), radius, gray());
            let origin = Vec3::new(-6.0, 3.0, -2.0);
            let dist = (Vec3::new(2.0, -1.0, 4.0) - origin).length();
            let ray = Ray::new_simple(origin, Vec3::new(2.0, -1.0, 4.0) - origin);

            let mut near = HitRecord::default();
            assert!(sphere.hit(&ray, Interval::from_t_min(0.001), &mut near));
            assert!((near.t - (dist - radius)).abs() < 1e-3);

            // Excluding the near root yields the far one
            let mut far = HitRecord::default();
            let after_near = Interval::from_t_min(near.t + 1e-3);
            assert!(sphere.hit(&ray, after_near, &mut far));
            assert!((far.t - (dist + radius)).abs() < 1e-3);
            assert!((far.t - near.t - 2.0 * radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_sphere_tangent_is_miss() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, gray());
        let ray = Ray::new_simple(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::from_t_min(0.001), &mut rec));
    }

    #[test]
    fn test_failed_hit_leaves_record_untouched() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, gray());
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let mut rec = HitRecord::default();
        rec.t = 42.0;

        // Interval ends before the sphere
        assert!(!sphere.hit(&ray, Interval::new(0.001, 2.0), &mut rec));
        assert_eq!(rec.t, 42.0);
    }

    #[test]
    fn test_sphere_bounding_box() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 2.0, gray());
        let bbox = sphere.bounding_box(0.0, 1.0).unwrap();
        assert_eq!(bbox.min(), Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(bbox.max(), Vec3::new(3.0, 4.0, 5.0));
    }
}
