//! Built-in demonstration scenes.

use clap::ValueEnum;
use ember_math::Vec3;
use ember_renderer::sampling::gen_range;
use ember_renderer::{
    gen_f32, Block, Camera, CheckerTexture, Color, Dielectric, DiffuseLight, FlipNormals, Hittable,
    HittableList, Lambertian, Material, Metal, NoiseTexture, Perlin, Rect, RefractiveIndex, Rotate,
    Sphere, SquarePyramid, Translate,
};
use rand::RngCore;
use serde::Deserialize;
use std::sync::Arc;

/// Which demonstration scene to build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// Cornell box with two rotated blocks
    #[default]
    Cornell,
    /// Cornell box with a marble pyramid and a mirror block
    CornellTwist,
    /// Marble sphere lit by a small rectangular light
    Perlin,
    /// Field of random-height blocks
    Boxes,
    /// Lambertian, metal and glass spheres under a sky
    Spheres,
}

/// A scene ready to render.
pub struct Scene {
    pub world: HittableList,
    pub camera: Camera,
    /// Escaping rays see the sky gradient instead of black
    pub sky: bool,
}

/// Build `kind` for an image of the given aspect ratio. Random placement
/// and noise tables draw from `rng`.
pub fn build(kind: SceneKind, aspect: f32, rng: &mut dyn RngCore) -> Scene {
    match kind {
        SceneKind::Cornell => cornell_box(aspect),
        SceneKind::CornellTwist => cornell_twist(aspect, rng),
        SceneKind::Perlin => perlin_spheres(aspect, rng),
        SceneKind::Boxes => boxes(aspect, rng),
        SceneKind::Spheres => spheres(aspect, rng),
    }
}

fn camera(look_from: Vec3, look_at: Vec3, vfov: f32, aperture: f32, focus_dist: f32, aspect: f32) -> Camera {
    let mut camera = Camera::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(vfov, aperture, focus_dist)
        .with_aspect(aspect)
        .with_shutter(0.0, 1.0);
    camera.initialize();
    camera
}

fn lambertian(color: Color) -> Arc<dyn Material> {
    Arc::new(Lambertian::from_color(color))
}

fn light(color: Color) -> Arc<dyn Material> {
    Arc::new(DiffuseLight::from_color(color))
}

fn marble(rng: &mut dyn RngCore) -> Arc<dyn Material> {
    let noise = NoiseTexture::new(Perlin::new(rng), 4.0, 7);
    Arc::new(Lambertian::new(Arc::new(noise)))
}

fn flipped(object: impl Hittable + 'static) -> Box<dyn Hittable> {
    Box::new(FlipNormals::new(Box::new(object)))
}

/// Five walls and a ceiling light, all facing into the box.
fn cornell_room(world: &mut HittableList) {
    let red = lambertian(Color::new(0.65, 0.05, 0.05));
    let white = lambertian(Color::splat(0.73));
    let green = lambertian(Color::new(0.12, 0.45, 0.15));

    world.add(flipped(Rect::yz(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    world.add(Box::new(Rect::yz(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(Box::new(Rect::xz(113.0, 443.0, 127.0, 432.0, 554.0, light(Color::ONE))));
    world.add(flipped(Rect::xz(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));
    world.add(Box::new(Rect::xz(0.0, 555.0, 0.0, 555.0, 0.0, white.clone())));
    world.add(flipped(Rect::xy(0.0, 555.0, 0.0, 555.0, 555.0, white)));
}

fn cornell_camera(aspect: f32) -> Camera {
    camera(
        Vec3::new(278.0, 278.0, -800.0),
        Vec3::new(278.0, 278.0, 0.0),
        40.0,
        0.0,
        10.0,
        aspect,
    )
}

fn placed_block(size: Vec3, material: Arc<dyn Material>, degrees: f32, offset: Vec3) -> Box<dyn Hittable> {
    let block = Box::new(Block::new(Vec3::ZERO, size, material));
    Box::new(Translate::new(Box::new(Rotate::y(block, degrees)), offset))
}

fn cornell_box(aspect: f32) -> Scene {
    let mut world = HittableList::with_capacity(8);
    cornell_room(&mut world);

    let white = lambertian(Color::splat(0.73));
    world.add(placed_block(
        Vec3::splat(165.0),
        white.clone(),
        -18.0,
        Vec3::new(130.0, 0.0, 65.0),
    ));
    world.add(placed_block(
        Vec3::new(165.0, 330.0, 165.0),
        white,
        15.0,
        Vec3::new(265.0, 0.0, 295.0),
    ));

    Scene {
        world,
        camera: cornell_camera(aspect),
        sky: false,
    }
}

fn cornell_twist(aspect: f32, rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::with_capacity(8);
    cornell_room(&mut world);

    let pyramid = SquarePyramid::new(Vec3::new(130.0, 0.0, 100.0), 130.0, 150.0, marble(rng));
    world.add(Box::new(Rotate::y(Box::new(pyramid), -18.0)));

    let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.85, 0.88), 0.0));
    world.add(placed_block(
        Vec3::new(165.0, 330.0, 165.0),
        mirror,
        29.0,
        Vec3::new(265.0, 0.0, 295.0),
    ));

    Scene {
        world,
        camera: cornell_camera(aspect),
        sky: false,
    }
}

fn perlin_spheres(aspect: f32, rng: &mut dyn RngCore) -> Scene {
    let marble = marble(rng);

    let mut world = HittableList::with_capacity(3);
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, marble.clone())));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, marble)));
    world.add(Box::new(Rect::xy(3.0, 5.0, 1.0, 3.0, -2.0, light(Color::splat(4.0)))));

    Scene {
        world,
        camera: camera(Vec3::new(24.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.0, 10.0, aspect),
        sky: false,
    }
}

fn boxes(aspect: f32, rng: &mut dyn RngCore) -> Scene {
    const BOXES_PER_SIDE: usize = 20;
    const BOX_WIDTH: f32 = 100.0;

    let ground = lambertian(Color::new(0.48, 0.83, 0.53));
    let mut world = HittableList::with_capacity(BOXES_PER_SIDE * BOXES_PER_SIDE + 1);

    for i in 0..BOXES_PER_SIDE {
        for j in 0..BOXES_PER_SIDE {
            let x0 = -1000.0 + i as f32 * BOX_WIDTH;
            let z0 = -1000.0 + j as f32 * BOX_WIDTH;
            let y1 = 100.0 * (gen_f32(rng) + 0.01);
            world.add(Box::new(Block::new(
                Vec3::new(x0, 0.0, z0),
                Vec3::new(x0 + BOX_WIDTH, y1, z0 + BOX_WIDTH),
                ground.clone(),
            )));
        }
    }

    world.add(Box::new(Rect::xz(-300.0, 300.0, -300.0, 300.0, 554.0, light(Color::splat(7.0)))));

    Scene {
        world,
        camera: camera(Vec3::new(478.0, 278.0, -600.0), Vec3::ZERO, 40.0, 0.0, 10.0, aspect),
        sky: false,
    }
}

fn spheres(aspect: f32, rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let checker = CheckerTexture::from_colors(Color::new(0.2, 0.3, 0.1), Color::splat(0.9));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Arc::new(checker))),
    )));

    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose = gen_f32(rng);
            let material: Arc<dyn Material> = if choose < 0.7 {
                let albedo = Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng));
                Arc::new(Lambertian::from_color(albedo * albedo))
            } else if choose < 0.9 {
                let albedo = Color::new(gen_range(rng, 0.5, 1.0), gen_range(rng, 0.5, 1.0), gen_range(rng, 0.5, 1.0));
                Arc::new(Metal::new(albedo, gen_range(rng, 0.0, 0.5)))
            } else {
                Arc::new(Dielectric::from_preset(RefractiveIndex::GlassMid))
            };
            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::from_preset(RefractiveIndex::GlassMid)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        lambertian(Color::new(0.4, 0.2, 0.1)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    Scene {
        world,
        camera: camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.1, 10.0, aspect),
        sky: true,
    }
}
