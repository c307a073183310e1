//! End-to-end rendering scenarios: scene description in, pixels out.

use std::path::PathBuf;

use whitted_core::{load_scene, load_scene_from_str, Scene};
use whitted_renderer::{
    render, render_parallel, shade, shoot, write_ppm, Color, Ray, RenderConfig, Vec3,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const RED_SPHERE: &str = r#"[
    { "type": "camera", "width": 2, "height": 2 },
    { "type": "sphere", "position": [0, 0, 5], "radius": 1,
      "diffuse_color": [1, 0, 0], "specular_color": [0, 0, 0] },
    { "type": "light", "color": [1, 1, 1], "position": [0, 0, 0] }
]"#;

fn shade_primary(scene: &Scene, ray: &Ray) -> Option<Color> {
    shoot(scene, ray, f32::INFINITY, None).map(|hit| shade(scene, ray, hit, 0, 1.0, &RenderConfig::default()))
}

#[test]
fn red_sphere_center_lit_corners_black() {
    init_logging();
    let scene = load_scene_from_str(RED_SPHERE).unwrap();
    let image = render(&scene, 10, 10, &RenderConfig::default()).unwrap();

    let [r, g, b] = image.get(5, 5);
    assert!(r > 0);
    assert_eq!(g, 0);
    assert_eq!(b, 0);

    for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
        assert_eq!(image.get(x, y), [0, 0, 0], "corner ({}, {})", x, y);
    }
}

#[test]
fn mirror_sphere_shows_the_plane() {
    init_logging();
    // Mirror with a red diffuse color that must not show up
    let json = r#"[
        { "type": "camera", "width": 2, "height": 2 },
        { "type": "sphere", "position": [0, 0, 5], "radius": 1,
          "diffuse_color": [1, 0, 0], "specular_color": [1, 1, 1],
          "reflectivity": 1 },
        { "type": "plane", "position": [0, 0, -2], "normal": [0, 0, 1],
          "diffuse_color": [0, 1, 0], "specular_color": [0, 0, 0] },
        { "type": "light", "color": [4, 4, 4], "position": [0, 3, 0] }
    ]"#;
    let scene = load_scene_from_str(json).unwrap();

    let color = shade_primary(&scene, &Ray::new(Vec3::ZERO, Vec3::Z)).unwrap();

    // Green the wall receives at (0, 0, -2)
    let wall_green = 4.0 * (2.0 / 13.0_f32.sqrt()) / 13.0;
    assert!((color.y - wall_green).abs() < 0.01, "color={:?}", color);
    assert!(color.y > color.x);
}

#[test]
fn glass_sphere_shows_the_wall_behind() {
    init_logging();
    let wall_only = r#"[
        { "type": "camera", "width": 2, "height": 2 },
        { "type": "plane", "position": [0, 0, 10], "normal": [0, 0, -1],
          "diffuse_color": [0, 1, 0], "specular_color": [0, 0, 0] },
        { "type": "light", "color": [50, 50, 50], "position": [0, 3, 0] }
    ]"#;
    let with_glass = r#"[
        { "type": "camera", "width": 2, "height": 2 },
        { "type": "plane", "position": [0, 0, 10], "normal": [0, 0, -1],
          "diffuse_color": [0, 1, 0], "specular_color": [0, 0, 0] },
        { "type": "light", "color": [50, 50, 50], "position": [0, 3, 0] },
        { "type": "sphere", "position": [0, 0, 5], "radius": 1,
          "diffuse_color": [0, 0, 0], "specular_color": [1, 1, 1],
          "refractivity": 1, "ior": 1 }
    ]"#;
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);

    let wall = shade_primary(&load_scene_from_str(wall_only).unwrap(), &ray).unwrap();
    let scene = load_scene_from_str(with_glass).unwrap();
    let glass = shade_primary(&scene, &ray).unwrap();

    assert!(wall.y > 0.4);
    // Green from the wall plus an even white highlight from the light
    assert!((glass.y - glass.x - wall.y).abs() < 1e-3, "glass={:?} wall={:?}", glass, wall);

    let image = render(&scene, 9, 9, &RenderConfig::default()).unwrap();
    let [r, g, b] = image.get(4, 4);
    assert!(g > r && g > b, "centre pixel {:?}", [r, g, b]);
}

#[test]
fn facing_mirrors_terminate() {
    init_logging();
    let json = r#"[
        { "type": "camera", "width": 1, "height": 1 },
        { "type": "plane", "position": [0, 0, 10], "normal": [0, 0, -1],
          "diffuse_color": [0.5, 0.5, 0.5], "specular_color": [1, 1, 1],
          "reflectivity": 0.9 },
        { "type": "plane", "position": [0, 0, -1], "normal": [0, 0, 1],
          "diffuse_color": [0.5, 0.5, 0.5], "specular_color": [1, 1, 1],
          "reflectivity": 0.9 },
        { "type": "light", "color": [1, 1, 1], "position": [0, 0, 5] }
    ]"#;
    let scene = load_scene_from_str(json).unwrap();

    let image = render(&scene, 4, 4, &RenderConfig::default()).unwrap();
    assert_eq!(image.data.len(), 4 * 4 * 3);

    // A shallower cap can only remove bounces
    let shallow = RenderConfig {
        max_depth: 1,
        ..Default::default()
    };
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);
    let deep = shade_primary(&scene, &ray).unwrap();
    let hit = shoot(&scene, &ray, f32::INFINITY, None).unwrap();
    let cut = shade(&scene, &ray, hit, 0, 1.0, &shallow);
    assert!(cut.x <= deep.x + 1e-6);
}

#[test]
fn spot_light_cone() {
    init_logging();
    let json = r#"[
        { "type": "camera", "width": 2, "height": 2 },
        { "type": "plane", "position": [0, -1, 0], "normal": [0, 1, 0],
          "diffuse_color": [1, 1, 1], "specular_color": [0, 0, 0] },
        { "type": "light", "color": [1, 1, 1], "position": [0, 3, 5],
          "direction": [0, -1, 0], "angular-a0": 1, "theta": 10 }
    ]"#;
    let scene = load_scene_from_str(json).unwrap();

    // Straight under the spot
    let under = shade_primary(&scene, &Ray::normalized(Vec3::ZERO, Vec3::new(0.0, -1.0, 5.0))).unwrap();
    assert!((under.x - 1.0 / 16.0).abs() < 0.001);

    // 2 units to the side is about 27 degrees off axis
    let side = shade_primary(&scene, &Ray::normalized(Vec3::ZERO, Vec3::new(2.0, -1.0, 5.0))).unwrap();
    assert_eq!(side, Color::ZERO);
}

#[test]
fn ppm_bytes_of_render() {
    init_logging();
    let scene = load_scene_from_str(RED_SPHERE).unwrap();
    let image = render(&scene, 10, 10, &RenderConfig::default()).unwrap();

    let mut bytes = Vec::new();
    write_ppm(&mut bytes, &image).unwrap();

    let header = b"P6\n10 10\n255\n";
    assert!(bytes.starts_with(header));
    assert_eq!(bytes.len(), header.len() + 10 * 10 * 3);
    assert_eq!(&bytes[header.len()..], image.data.as_slice());
}

#[test]
fn demo_scene_parallel_matches_serial() {
    init_logging();
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenes/demo.json");
    let scene = load_scene(&path).unwrap();
    assert_eq!(scene.name, "demo");

    let config = RenderConfig {
        bucket_size: 16,
        ..Default::default()
    };
    let serial = render(&scene, 48, 27, &config).unwrap();
    let parallel = render_parallel(&scene, 48, 27, &config).unwrap();

    assert_eq!(serial, parallel);
    assert!(serial.data.iter().any(|&b| b > 0));
}
