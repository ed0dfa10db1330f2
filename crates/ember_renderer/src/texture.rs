//! Procedural textures sampled by materials.

use crate::{Color, Perlin};
use ember_math::Vec3;
use std::sync::Arc;

/// A colour field over surface coordinates and world position.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A single flat colour.
#[derive(Debug, Clone, Copy)]
pub struct ConstantTexture {
    color: Color,
}

impl ConstantTexture {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for ConstantTexture {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color
    }
}

/// 3D checker pattern keyed off the sign of `sin(10x)·sin(10y)·sin(10z)`.
pub struct CheckerTexture {
    odd: Arc<dyn Texture>,
    even: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(odd: Arc<dyn Texture>, even: Arc<dyn Texture>) -> Self {
        Self { odd, even }
    }

    /// Checker of two flat colours.
    pub fn from_colors(odd: Color, even: Color) -> Self {
        Self::new(
            Arc::new(ConstantTexture::new(odd)),
            Arc::new(ConstantTexture::new(even)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Marble-like pattern from Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
    turbulence_depth: u32,
}

impl NoiseTexture {
    /// - `scale`: frequency of the sine bands along z
    /// - `turbulence_depth`: number of noise octaves summed
    pub fn new(noise: Perlin, scale: f32, turbulence_depth: u32) -> Self {
        Self {
            noise,
            scale,
            turbulence_depth,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let turbulence = self.noise.turbulence(p, self.turbulence_depth);
        Color::ONE * 0.5 * (1.0 + (self.scale * p.z + 10.0 * turbulence).sin())
    }
}
