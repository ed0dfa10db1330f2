//! Perlin gradient noise.
//!
//! Three independently shuffled permutation tables (one per axis) select a
//! random unit gradient for each lattice corner; corners are blended with
//! Hermite-smoothed trilinear interpolation.

use crate::sampling::random_unit_vector;
use ember_math::Vec3;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Number of lattice entries per table. Must be a power of two.
const POINT_COUNT: usize = 256;

/// Perlin noise generator. Immutable once built.
#[derive(Clone)]
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT).map(|_| random_unit_vector(rng)).collect();

        Self {
            gradients,
            perm_x: Self::generate_permutation(rng),
            perm_y: Self::generate_permutation(rng),
            perm_z: Self::generate_permutation(rng),
        }
    }

    /// A shuffled identity permutation of `0..POINT_COUNT`.
    fn generate_permutation(rng: &mut dyn RngCore) -> Vec<usize> {
        let mut p: Vec<usize> = (0..POINT_COUNT).collect();
        p.shuffle(rng);
        p
    }

    /// Noise value at `p`, roughly in [-1, 1].
    pub fn noise(&self, p: Vec3) -> f32 {
        let floor = p.floor();
        let (u, v, w) = (p.x - floor.x, p.y - floor.y, p.z - floor.z);
        let (i, j, k) = (floor.x as i64, floor.y as i64, floor.z as i64);
        let mask = (POINT_COUNT - 1) as i64;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let index = self.perm_x[((i + di as i64) & mask) as usize]
                        ^ self.perm_y[((j + dj as i64) & mask) as usize]
                        ^ self.perm_z[((k + dk as i64) & mask) as usize];
                    *corner = self.gradients[index];
                }
            }
        }

        Self::interpolate(&c, u, v, w)
    }

    fn interpolate(c: &[[[Vec3; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
        // Hermite cubic smoothing
        let uu = u * u * (3.0 - 2.0 * u);
        let vv = v * v * (3.0 - 2.0 * v);
        let ww = w * w * (3.0 - 2.0 * w);

        let mut accum = 0.0;
        for (i, plane) in c.iter().enumerate() {
            for (j, row) in plane.iter().enumerate() {
                for (k, gradient) in row.iter().enumerate() {
                    let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                    let weight = Vec3::new(u - fi, v - fj, w - fk);
                    accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                        * (fj * vv + (1.0 - fj) * (1.0 - vv))
                        * (fk * ww + (1.0 - fk) * (1.0 - ww))
                        * gradient.dot(weight);
                }
            }
        }
        accum
    }

    /// Sum of `depth` octaves at halving weight and doubling frequency,
    /// returned as an absolute value.
    pub fn turbulence(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}
