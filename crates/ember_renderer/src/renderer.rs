//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a maximum depth
//! - Per-sample NaN sanitisation
//! - Anti-aliasing via jittered multi-sampling
//! - Square-root gamma display mapping

use crate::{gen_f32, Camera, Color, HitRecord, Hittable, Ray};
use ember_math::Interval;
use rand::RngCore;

/// Smallest accepted hit distance. Keeps scattered rays from
/// re-hitting the surface they left.
pub const T_MIN: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Whether to use sky gradient instead of solid background
    pub use_sky_gradient: bool,
    /// Base seed for the per-bucket random generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            use_sky_gradient: false,
            seed: 0,
        }
    }
}

/// Compute the color seen by a ray.
///
/// `depth` is the number of bounces already taken; the first call passes 0.
/// Once `depth` reaches `config.max_depth` only the hit surface's emission
/// is returned and no further rays are traced.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::from_t_min(T_MIN), &mut rec) {
        return background(ray, config);
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);
    if depth >= config.max_depth {
        return emission;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth + 1, config, rng);
            emission + result.attenuation * scattered_color
        }
        // Absorbed
        None => emission,
    }
}

/// Colour returned for rays that escape the scene.
pub fn background(ray: &Ray, config: &RenderConfig) -> Color {
    if config.use_sky_gradient {
        sky_gradient(ray)
    } else {
        config.background
    }
}

/// Vertical blend from white at the horizon-down to light blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Replace NaN components with zero. Returns the cleaned colour and
/// whether anything was replaced.
pub fn sanitize(color: Color) -> (Color, bool) {
    if !color.is_nan() {
        return (color, false);
    }
    let clean = Color::new(
        if color.x.is_nan() { 0.0 } else { color.x },
        if color.y.is_nan() { 0.0 } else { color.y },
        if color.z.is_nan() { 0.0 } else { color.z },
    );
    (clean, true)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    // Truncate, don't round
    let r = (255.0 * clamp_01(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * clamp_01(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * clamp_01(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are image coordinates with `y = 0` on the top row; the camera
/// is sampled with `t` measured from the bottom of the image.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if config.samples_per_pixel == 0 {
        return Color::ZERO;
    }

    let row_from_bottom = (height - 1 - y) as f32;
    let mut pixel_color = Color::ZERO;
    let mut nan_samples = 0u32;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / width as f32;
        let t = (row_from_bottom + gen_f32(rng)) / height as f32;
        let ray = camera.get_ray(s, t, rng);

        let (sample, had_nan) = sanitize(ray_color(&ray, world, 0, config, rng));
        if had_nan {
            nan_samples += 1;
        }
        pixel_color += sample;
    }

    if nan_samples > 0 {
        log::debug!("pixel ({x}, {y}): {nan_samples} NaN sample(s) zeroed");
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Linear colour image, row-major with the top row first.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Display-mapped RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded, drawing every sample from `rng`. See
/// [`crate::render_parallel`] for the bucketed multi-threaded version.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, width, height, config, rng);
            image.set(x, y, color);
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Material, ScatterResult, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scatters every ray back out along +X from the origin and counts calls.
    #[derive(Default)]
    struct Bouncer {
        scatters: AtomicUsize,
        emits: AtomicUsize,
    }

    impl Material for Bouncer {
        fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
            self.scatters.fetch_add(1, Ordering::Relaxed);
            Some(ScatterResult {
                attenuation: Color::ONE,
                scattered: Ray::new_simple(Vec3::ZERO, Vec3::X),
            })
        }

        fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
            self.emits.fetch_add(1, Ordering::Relaxed);
            Color::splat(0.25)
        }
    }

    /// Material whose emission is NaN.
    struct Poisoned;

    impl Material for Poisoned {
        fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
            None
        }

        fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
            Color::new(f32::NAN, 0.5, f32::NAN)
        }
    }

    #[test]
    fn test_sky_gradient() {
        let up_color = sky_gradient(&Ray::new_simple(Vec3::ZERO, Vec3::Y));
        let down_color = sky_gradient(&Ray::new_simple(Vec3::ZERO, -Vec3::Y));

        assert!((up_color - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down_color - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_empty_scene_returns_background_at_any_depth() {
        let world = HittableList::new();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.3, -0.2, -1.0));
        let mut rng = StdRng::seed_from_u64(1);

        for max_depth in [0, 1, 5, 50] {
            let black = RenderConfig {
                max_depth,
                ..RenderConfig::default()
            };
            assert_eq!(ray_color(&ray, &world, 0, &black, &mut rng), Color::ZERO);

            let tinted = RenderConfig {
                max_depth,
                background: Color::new(0.2, 0.4, 0.6),
                ..RenderConfig::default()
            };
            assert_eq!(ray_color(&ray, &world, 0, &tinted, &mut rng), tinted.background);

            let sky = RenderConfig {
                max_depth,
                use_sky_gradient: true,
                ..RenderConfig::default()
            };
            assert_eq!(ray_color(&ray, &world, 0, &sky, &mut rng), sky_gradient(&ray));
        }
    }

    #[test]
    fn test_recursion_stops_at_max_depth() {
        let mut rng = StdRng::seed_from_u64(2);

        for max_depth in [0u32, 1, 2, 7, 30] {
            let bouncer = Arc::new(Bouncer::default());
            let mut world = HittableList::new();
            world.add(Box::new(Sphere::new(Vec3::ZERO, 10.0, bouncer.clone())));

            let config = RenderConfig {
                max_depth,
                ..RenderConfig::default()
            };
            let ray = Ray::new_simple(Vec3::ZERO, Vec3::Z);
            let color = ray_color(&ray, &world, 0, &config, &mut rng);

            assert_eq!(bouncer.scatters.load(Ordering::Relaxed), max_depth as usize);
            assert_eq!(bouncer.emits.load(Ordering::Relaxed), max_depth as usize + 1);
            // Unit attenuation: every bounce adds its emission
            let expected = 0.25 * (max_depth + 1) as f32;
            assert!((color.x - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_absorbing_material_returns_emission_only() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Arc::new(crate::DiffuseLight::from_color(Color::new(4.0, 2.0, 1.0))),
        )));
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(3);

        let color = ray_color(&ray, &world, 0, &RenderConfig::default(), &mut rng);
        assert_eq!(color, Color::new(4.0, 2.0, 1.0));
    }

    #[test]
    fn test_sanitize() {
        let (clean, replaced) = sanitize(Color::new(0.1, 0.2, 0.3));
        assert!(!replaced);
        assert_eq!(clean, Color::new(0.1, 0.2, 0.3));

        let (clean, replaced) = sanitize(Color::new(f32::NAN, 0.2, f32::NAN));
        assert!(replaced);
        assert_eq!(clean, Color::new(0.0, 0.2, 0.0));
    }

    #[test]
    fn test_nan_samples_do_not_poison_pixel() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, Arc::new(Poisoned))));
        let camera = Camera::new();
        let config = RenderConfig {
            samples_per_pixel: 8,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(4);

        let color = render_pixel(&camera, &world, 1, 1, 3, 3, &config, &mut rng);
        assert!(!color.is_nan());
        assert!((color - Color::new(0.0, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        // Over-bright clamps, 0.25 maps through sqrt to 0.5
        assert_eq!(color_to_rgb8(Color::new(9.0, 0.25, 0.0)), [255, 127, 0]);
    }

    #[test]
    fn test_render_pixel() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::from_color(Color::new(0.5, 0.5, 0.5))),
        )));

        let camera = Camera::new();
        let config = RenderConfig {
            samples_per_pixel: 4,
            max_depth: 5,
            use_sky_gradient: true,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel hits the sphere and bounces into the sky
        let color = render_pixel(&camera, &world, 5, 5, 10, 10, &config, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.x < 1.0);
    }

    #[test]
    fn test_render_fills_buffer() {
        let world = HittableList::new();
        let camera = Camera::new();
        let config = RenderConfig {
            samples_per_pixel: 1,
            background: Color::new(0.1, 0.2, 0.3),
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);

        let image = render(&camera, &world, 4, 3, &config, &mut rng);
        assert_eq!(image.pixels.len(), 12);
        assert!(image.pixels.iter().all(|&c| (c - config.background).length() < 1e-6));
        assert_eq!(image.to_rgb8().len(), 36);
    }
}
