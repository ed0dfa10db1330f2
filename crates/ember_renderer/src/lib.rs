//! Ember renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over a small set of analytic surfaces:
//! spheres, axis-aligned rectangles, triangles and the composites built
//! from them, with transform decorators, procedural textures and
//! diffuse area lights.
//!
//! Scenes are plain trees of `Box<dyn Hittable>`; materials and textures
//! are shared through `Arc`. Every random draw goes through an explicit
//! generator so buckets can render on separate threads.

mod block;
mod bucket;
mod camera;
mod hittable;
mod material;
mod output;
mod perlin;
mod pyramid;
mod rect;
mod renderer;
pub mod sampling;
mod sphere;
mod texture;
mod transform;
mod triangle;

pub use block::Block;
pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflect, refract, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, RefractiveIndex,
    ScatterResult,
};
pub use output::{save_image, save_png, save_ppm, write_ppm, OutputError, OutputResult};
pub use perlin::Perlin;
pub use pyramid::SquarePyramid;
pub use rect::{Plane, Rect};
pub use renderer::{
    background, color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, sanitize, sky_gradient,
    ImageBuffer, RenderConfig, T_MIN,
};
pub use sampling::{gen_f32, random_in_unit_disk, Onb};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ConstantTexture, NoiseTexture, Texture};
pub use transform::{Axis, FlipNormals, Rotate, Translate};
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Aabb, Interval, Ray, Vec3};
