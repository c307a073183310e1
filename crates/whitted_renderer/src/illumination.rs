//! Phong illumination and light attenuation.

use whitted_core::{Color, Light, LightKind, Material, RadialAttenuation};
use whitted_math::{reflect, Vec3};

/// A light as seen by the direct illumination step.
///
/// Scene lights attenuate with distance and (for spots) with angle. A bounce
/// carries the color found along a reflected or transmitted ray back to the
/// surface it left; it is never attenuated and never shadow tested.
#[derive(Debug, Clone, Copy)]
pub enum LightSource<'a> {
    Scene(&'a Light),
    Bounce { color: Color },
}

impl LightSource<'_> {
    pub fn color(&self) -> Color {
        match self {
            LightSource::Scene(light) => light.color,
            LightSource::Bounce { color } => *color,
        }
    }

    /// Combined radial and angular attenuation.
    ///
    /// `to_light` is the unit vector from the shaded point toward the light.
    pub fn attenuation(&self, to_light: Vec3, distance: f32) -> f32 {
        match self {
            LightSource::Scene(light) => fang(light, to_light) * frad(light.radial(), distance),
            LightSource::Bounce { .. } => 1.0,
        }
    }
}

/// Radial attenuation: 1 / (a2·d² + a1·d + a0), with a zero `a2` read as 1.
///
/// When the denominator is not a positive finite number (all coefficients
/// zero at the light's own position, say) the light is left unattenuated.
pub fn frad(radial: RadialAttenuation, distance: f32) -> f32 {
    let a2 = if radial.a2 == 0.0 { 1.0 } else { radial.a2 };
    let denominator = a2 * distance * distance + radial.a1 * distance + radial.a0;
    if denominator > 0.0 && denominator.is_finite() {
        1.0 / denominator
    } else {
        1.0
    }
}

/// Angular attenuation of a spot light's cone.
///
/// Returns 1 for point lights. For a spot, the cosine between the cone axis
/// and the direction from the light to the point must reach cos(theta),
/// otherwise the point is outside the cone and gets 0; inside, the cosine
/// raised to `angular_a0`.
pub fn fang(light: &Light, to_light: Vec3) -> f32 {
    match light.kind {
        LightKind::Point { .. } => 1.0,
        LightKind::Spot {
            direction,
            angular_a0,
            theta,
            ..
        } => {
            let cosine = direction.dot(-to_light);
            if cosine < theta.to_radians().cos() {
                0.0
            } else {
                cosine.max(0.0).powf(angular_a0)
            }
        }
    }
}

/// Lambertian term: kd ⊙ Il · max(0, n·l).
pub fn diffuse(material: &Material, light_color: Color, normal: Vec3, to_light: Vec3) -> Color {
    let n_dot_l = normal.dot(to_light);
    if n_dot_l > 0.0 {
        material.diffuse_color * light_color * n_dot_l
    } else {
        Color::ZERO
    }
}

/// Phong highlight: ks ⊙ Il · (v·r)^shininess.
///
/// `view` is the incoming ray direction and `r` the light direction mirrored
/// about the normal. Zero unless the light is in front of the surface and
/// the mirror direction points back along the view ray.
pub fn specular(material: &Material, light_color: Color, normal: Vec3, to_light: Vec3, view: Vec3, shininess: f32) -> Color {
    let n_dot_l = normal.dot(to_light);
    if n_dot_l <= 0.0 {
        return Color::ZERO;
    }

    let r = reflect(to_light, normal);
    let v_dot_r = view.dot(r);
    if v_dot_r > 0.0 {
        material.specular_color * light_color * v_dot_r.powf(shininess)
    } else {
        Color::ZERO
    }
}
