//! Recursive Whitted shading.
//!
//! [`shade`] evaluates the color at a ray's hit point. Reflected and
//! transmitted rays are traced recursively; the color each one brings back
//! is fed through the same direct-lighting step as a scene light, as an
//! unattenuated [`LightSource::Bounce`]. A reflected bounce shines along the
//! reflected ray; a transmitted one shines back toward the viewer.

use whitted_core::{Color, Scene, Surface};
use whitted_math::{reflect, refract, Ray, Vec3};

use crate::illumination::{diffuse, specular, LightSource};
use crate::renderer::RenderConfig;
use crate::visibility::{shoot, Hit};

/// Shade the point where `ray` meets the surface in `hit`.
///
/// `ior` is the index of refraction of the medium the ray travels through
/// (1 for camera rays). Past `config.max_depth` the result is black. The
/// returned color is not clamped.
pub fn shade(scene: &Scene, ray: &Ray, hit: Hit, depth: u32, ior: f32, config: &RenderConfig) -> Color {
    if depth > config.max_depth {
        return Color::ZERO;
    }

    let Some(surface) = scene.surface(hit.index) else {
        return Color::ZERO;
    };
    let material = surface.material();

    let direction = ray.direction().normalize_or_zero();
    let point = ray.at(hit.distance);
    let normal = surface.normal_at(point);

    let mut color = Color::ZERO;

    let reflected = Ray::normalized(point, reflect(direction, normal)).nudged(config.bias);
    let reflected_hit = shoot(scene, &reflected, f32::INFINITY, Some(hit.index));

    let transmitted = refract(direction, normal, ior / material.ior)
        .map(|t| Ray::normalized(point, t).nudged(config.bias));
    let transmitted_hit = transmitted
        .as_ref()
        .and_then(|t| shoot(scene, t, f32::INFINITY, Some(hit.index)).map(|h| (t, h)));

    if reflected_hit.is_some() || transmitted_hit.is_some() {
        if let Some(next) = reflected_hit {
            if material.reflectivity > 0.0 {
                let bounce = shade(scene, &reflected, next, depth + 1, ior, config) * material.reflectivity;
                color += direct_shade(surface, point, reflected.direction(), direction, f32::INFINITY, LightSource::Bounce { color: bounce }, config);
            }
        }

        if let Some((transmitted, next)) = transmitted_hit {
            if material.refractivity > 0.0 {
                let bounce = shade(scene, transmitted, next, depth + 1, material.ior, config) * material.refractivity;
                // The transmitted ray leaves through the far side, so its color
                // arrives from the side the incoming ray came from
                color += direct_shade(surface, point, -direction, direction, f32::INFINITY, LightSource::Bounce { color: bounce }, config);
            }
        }

        // Purely diffuse surfaces get all their color from the scene lights below
        if material.is_specular_transport() {
            color += material.diffuse_color * material.local_weight();
        }
    }

    for (_, light) in scene.lights() {
        let offset = light.position - point;
        let distance = offset.length();
        let to_light = offset.normalize_or_zero();

        let shadow = Ray::new(point, to_light);
        if shoot(scene, &shadow, distance, Some(hit.index)).is_none() {
            color += direct_shade(surface, point, to_light, direction, distance, LightSource::Scene(light), config);
        }
    }

    color
}

/// Direct contribution of one light at `point`.
///
/// `to_light` is the unit vector toward the light (for a reflected bounce,
/// the reflected ray direction; for a transmitted one, back along the view
/// ray) and `view` the incoming ray direction.
/// Returns attenuation · (diffuse + specular).
pub fn direct_shade(
    surface: Surface<'_>,
    point: Vec3,
    to_light: Vec3,
    view: Vec3,
    distance: f32,
    light: LightSource<'_>,
    config: &RenderConfig,
) -> Color {
    let material = surface.material();
    let normal = surface.normal_at(point);
    let light_color = light.color();

    let diffuse = diffuse(material, light_color, normal, to_light);
    let specular = specular(material, light_color, normal, to_light, view, config.shininess);

    light.attenuation(to_light, distance) * (diffuse + specular)
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitted_core::{Camera, Light, Material, Plane, SceneObject, Sphere};

    fn lit_sphere(material: Material) -> Scene {
        Scene::new(
            "lit_sphere",
            vec![
                SceneObject::Camera(Camera::new(2.0, 2.0)),
                SceneObject::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, material)),
                SceneObject::Light(Light::point(Color::ONE, Vec3::ZERO)),
            ],
        )
    }

    fn primary(scene: &Scene) -> (Ray, Hit) {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = shoot(scene, &ray, f32::INFINITY, None).unwrap();
        (ray, hit)
    }

    #[test]
    fn test_shade_diffuse_sphere() {
        let scene = lit_sphere(Material::new(Color::new(1.0, 0.0, 0.0), Color::ZERO));
        let (ray, hit) = primary(&scene);

        let color = shade(&scene, &ray, hit, 0, 1.0, &RenderConfig::default());

        // n·l = 1 at distance 4 with inverse-square falloff
        assert!((color.x - 1.0 / 16.0).abs() < 0.001);
        assert_eq!(color.y, 0.0);
        assert_eq!(color.z, 0.0);
    }

    #[test]
    fn test_shade_past_max_depth_is_black() {
        let material = Material::new(Color::ONE, Color::ONE).with_reflectivity(0.5);
        let scene = lit_sphere(material);
        let (ray, hit) = primary(&scene);
        let config = RenderConfig::default();

        assert_eq!(shade(&scene, &ray, hit, config.max_depth + 1, 1.0, &config), Color::ZERO);
        assert_eq!(shade(&scene, &ray, hit, 8, 1.0, &config), Color::ZERO);
        assert_eq!(shade(&scene, &ray, hit, 100, 1.5, &config), Color::ZERO);
    }

    fn floor_under_light(with_blocker: bool) -> Scene {
        let mut objects = vec![
            SceneObject::Camera(Camera::new(2.0, 2.0)),
            SceneObject::Plane(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Material::new(Color::ONE, Color::ZERO))),
            SceneObject::Light(Light::point(Color::splat(4.0), Vec3::new(0.0, 3.0, 5.0))),
        ];
        if with_blocker {
            objects.push(SceneObject::Sphere(Sphere::new(Vec3::new(0.0, 1.0, 5.0), 0.5, Material::default())));
        }
        Scene::new("floor", objects)
    }

    #[test]
    fn test_shade_in_shadow() {
        let ray = Ray::normalized(Vec3::ZERO, Vec3::new(0.0, -1.0, 5.0));
        let config = RenderConfig::default();

        let open = floor_under_light(false);
        let hit = shoot(&open, &ray, f32::INFINITY, None).unwrap();
        assert_eq!(hit.index, 1);
        // Straight below the light: n·l = 1, distance 4
        let lit = shade(&open, &ray, hit, 0, 1.0, &config);
        assert!((lit.x - 4.0 / 16.0).abs() < 0.001);

        let blocked = floor_under_light(true);
        let hit = shoot(&blocked, &ray, f32::INFINITY, None).unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(shade(&blocked, &ray, hit, 0, 1.0, &config), Color::ZERO);
    }

    #[test]
    fn test_mirror_sees_plane_color() {
        // Mirror sphere in front of the camera, green wall behind the camera
        let mirror = Material::new(Color::ZERO, Color::ONE).with_reflectivity(1.0);
        let wall = Material::new(Color::new(0.0, 1.0, 0.0), Color::ZERO);
        let scene = Scene::new(
            "mirror",
            vec![
                SceneObject::Camera(Camera::new(2.0, 2.0)),
                SceneObject::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, mirror)),
                SceneObject::Plane(Plane::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z, wall)),
                SceneObject::Light(Light::point(Color::splat(4.0), Vec3::new(0.0, 3.0, 0.0))),
            ],
        );
        let (ray, hit) = primary(&scene);
        let color = shade(&scene, &ray, hit, 0, 1.0, &RenderConfig::default());

        // The wall at (0, 0, -2): n·l = 2/sqrt(13), distance² = 13
        let wall_green = 4.0 * (2.0 / 13.0_f32.sqrt()) / 13.0;
        assert!((color.y - wall_green).abs() < 0.01, "color={:?}", color);
        assert!(color.x < 0.01);
        assert!(color.z < 0.01);
    }

    fn partly_reflective(with_wall: bool) -> Scene {
        // No lights: everything comes from the local term
        let sphere = Material::new(Color::new(0.4, 0.2, 0.0), Color::ZERO).with_reflectivity(0.3);
        let mut objects = vec![
            SceneObject::Camera(Camera::new(2.0, 2.0)),
            SceneObject::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, sphere)),
        ];
        if with_wall {
            let wall = Material::new(Color::ONE, Color::ZERO);
            objects.push(SceneObject::Plane(Plane::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z, wall)));
        }
        Scene::new("partly_reflective", objects)
    }

    #[test]
    fn test_local_term_when_a_secondary_ray_hits() {
        let scene = partly_reflective(true);
        let (ray, hit) = primary(&scene);
        let color = shade(&scene, &ray, hit, 0, 1.0, &RenderConfig::default());

        // kd · (1 - 0.3)
        assert!((color - Color::new(0.28, 0.14, 0.0)).abs().max_element() < 1e-5, "color={:?}", color);
    }

    #[test]
    fn test_no_local_term_when_secondary_rays_miss() {
        let scene = partly_reflective(false);
        let (ray, hit) = primary(&scene);
        assert_eq!(shade(&scene, &ray, hit, 0, 1.0, &RenderConfig::default()), Color::ZERO);
    }

    fn glass_before_wall(with_glass: bool) -> Scene {
        let wall = Material::new(Color::new(0.0, 1.0, 0.0), Color::ZERO);
        let mut objects = vec![
            SceneObject::Camera(Camera::new(2.0, 2.0)),
            SceneObject::Plane(Plane::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, wall)),
            SceneObject::Light(Light::point(Color::splat(50.0), Vec3::new(0.0, 3.0, 0.0))),
        ];
        if with_glass {
            let glass = Material::new(Color::ZERO, Color::ONE).with_refraction(1.0, 1.0);
            objects.push(SceneObject::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, glass)));
        }
        Scene::new("glass", objects)
    }

    #[test]
    fn test_refraction_passes_on_what_is_behind() {
        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let bare = glass_before_wall(false);
        let hit = shoot(&bare, &ray, f32::INFINITY, None).unwrap();
        let wall = shade(&bare, &ray, hit, 0, 1.0, &config);
        // n·l = 10/sqrt(109), distance² = 109
        let wall_green = 50.0 * (10.0 / 109.0_f32.sqrt()) / 109.0;
        assert!((wall.y - wall_green).abs() < 1e-4);

        let scene = glass_before_wall(true);
        let hit = shoot(&scene, &ray, f32::INFINITY, None).unwrap();
        assert_eq!(hit.index, 3);
        let glass = shade(&scene, &ray, hit, 0, 1.0, &config);

        // The scene light adds a white highlight on top of the wall's green
        assert!(glass.x > 0.0);
        assert!((glass.x - glass.z).abs() < 1e-6);
        assert!((glass.y - glass.x - wall.y).abs() < 1e-3, "glass={:?} wall={:?}", glass, wall);
    }

    #[test]
    fn test_direct_shade_bounce_ignores_distance() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Material::new(Color::ONE, Color::ZERO));
        let surface = Surface::Sphere(&sphere);
        let point = Vec3::Y;

        let bounce = LightSource::Bounce { color: Color::splat(0.5) };
        let near = direct_shade(surface, point, Vec3::Y, -Vec3::Y, 1.0, bounce, &RenderConfig::default());
        let far = direct_shade(surface, point, Vec3::Y, -Vec3::Y, f32::INFINITY, bounce, &RenderConfig::default());

        assert_eq!(near, far);
        assert!((near.x - 0.5).abs() < 0.001);
    }
}
