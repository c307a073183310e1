//! Scene description object types and their validation.
//!
//! Each `*Declaration` mirrors one JSON object as written. Converting a
//! declaration into its scene type applies defaults and enforces the value
//! ranges the renderer relies on.

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use whitted_math::Vec3;

use crate::scene::{Camera, Color, Light, LightKind, Material, Plane, RadialAttenuation, SceneObject, Sphere};

/// Errors raised while validating a single scene object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclarationError {
    #[error("{field} must be greater than 0, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} values must be between 0 and 1 (inclusive), got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("reflectivity + refractivity must not be greater than 1, got {reflectivity} + {refractivity}")]
    ExcessTransport { reflectivity: f32, refractivity: f32 },

    #[error("{field} must not be a zero-length vector")]
    ZeroVector { field: &'static str },

    #[error("a light must be a point light (radial-a2/a1/a0 only) or a spot light (direction, angular-a0 and theta together)")]
    MalformedLight,
}

/// Result type for validation.
pub type DeclarationResult<T> = Result<T, DeclarationError>;

/// `{ "type": "camera", ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDeclaration {
    pub width: f32,
    pub height: f32,
}

/// `{ "type": "sphere", ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDeclaration {
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub position: [f32; 3],
    pub radius: f32,
    #[serde(default)]
    pub reflectivity: Option<f32>,
    #[serde(default)]
    pub refractivity: Option<f32>,
    #[serde(default)]
    pub ior: Option<f32>,
}

/// `{ "type": "plane", ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaneDeclaration {
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub position: [f32; 3],
    pub normal: [f32; 3],
    #[serde(default)]
    pub reflectivity: Option<f32>,
    #[serde(default)]
    pub refractivity: Option<f32>,
    #[serde(default)]
    pub ior: Option<f32>,
}

/// `{ "type": "light", ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightDeclaration {
    pub color: [f32; 3],
    pub position: [f32; 3],
    #[serde(default)]
    pub direction: Option<[f32; 3]>,
    #[serde(default, rename = "radial-a2")]
    pub radial_a2: Option<f32>,
    #[serde(default, rename = "radial-a1")]
    pub radial_a1: Option<f32>,
    #[serde(default, rename = "radial-a0")]
    pub radial_a0: Option<f32>,
    #[serde(default, rename = "angular-a0")]
    pub angular_a0: Option<f32>,
    #[serde(default)]
    pub theta: Option<f32>,
}

/// One validated entry of a scene description array.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDeclaration {
    #[serde(deserialize_with = "camera")]
    Camera(Camera),
    #[serde(deserialize_with = "sphere")]
    Sphere(Sphere),
    #[serde(deserialize_with = "plane")]
    Plane(Plane),
    #[serde(deserialize_with = "light")]
    Light(Light),
}

impl From<ObjectDeclaration> for SceneObject {
    fn from(declaration: ObjectDeclaration) -> Self {
        match declaration {
            ObjectDeclaration::Camera(camera) => SceneObject::Camera(camera),
            ObjectDeclaration::Sphere(sphere) => SceneObject::Sphere(sphere),
            ObjectDeclaration::Plane(plane) => SceneObject::Plane(plane),
            ObjectDeclaration::Light(light) => SceneObject::Light(light),
        }
    }
}

// Decode a declaration and validate it in one step, so validation failures
// come back as serde_json errors like any other decoding failure.
fn validated<'de, D, Decl, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    Decl: Deserialize<'de>,
    T: TryFrom<Decl, Error = DeclarationError>,
{
    let declaration = Decl::deserialize(deserializer)?;
    T::try_from(declaration).map_err(serde::de::Error::custom)
}

fn camera<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Camera, D::Error> {
    validated::<D, CameraDeclaration, Camera>(deserializer)
}

fn sphere<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Sphere, D::Error> {
    validated::<D, SphereDeclaration, Sphere>(deserializer)
}

fn plane<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Plane, D::Error> {
    validated::<D, PlaneDeclaration, Plane>(deserializer)
}

fn light<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Light, D::Error> {
    validated::<D, LightDeclaration, Light>(deserializer)
}

impl TryFrom<CameraDeclaration> for Camera {
    type Error = DeclarationError;

    fn try_from(decl: CameraDeclaration) -> DeclarationResult<Self> {
        positive("width", decl.width)?;
        positive("height", decl.height)?;
        Ok(Camera::new(decl.width, decl.height))
    }
}

impl TryFrom<SphereDeclaration> for Sphere {
    type Error = DeclarationError;

    fn try_from(decl: SphereDeclaration) -> DeclarationResult<Self> {
        positive("radius", decl.radius)?;
        let material = material(
            decl.diffuse_color,
            decl.specular_color,
            decl.reflectivity,
            decl.refractivity,
            decl.ior,
        )?;
        Ok(Sphere::new(Vec3::from_array(decl.position), decl.radius, material))
    }
}

impl TryFrom<PlaneDeclaration> for Plane {
    type Error = DeclarationError;

    fn try_from(decl: PlaneDeclaration) -> DeclarationResult<Self> {
        let normal = non_zero("normal", decl.normal)?;
        let material = material(
            decl.diffuse_color,
            decl.specular_color,
            decl.reflectivity,
            decl.refractivity,
            decl.ior,
        )?;
        Ok(Plane::new(Vec3::from_array(decl.position), normal, material))
    }
}

impl TryFrom<LightDeclaration> for Light {
    type Error = DeclarationError;

    fn try_from(decl: LightDeclaration) -> DeclarationResult<Self> {
        for channel in decl.color {
            non_negative("color", channel)?;
        }
        let a2 = optional_non_negative("radial-a2", decl.radial_a2)?;
        let a1 = optional_non_negative("radial-a1", decl.radial_a1)?;
        let a0 = optional_non_negative("radial-a0", decl.radial_a0)?;
        let angular_a0 = decl
            .angular_a0
            .map(|value| non_negative("angular-a0", value))
            .transpose()?;
        let theta = decl.theta.map(|value| non_negative("theta", value)).transpose()?;

        let radial = RadialAttenuation::new(a2.unwrap_or(1.0), a1.unwrap_or(0.0), a0.unwrap_or(0.0));
        let color = Color::from_array(decl.color);
        let position = Vec3::from_array(decl.position);

        let kind = match (decl.direction, angular_a0, theta) {
            (None, None, None) => LightKind::Point { radial },
            // A zero cone angle means the light was meant to shine everywhere
            (Some(_), Some(_), Some(theta)) if theta == 0.0 => LightKind::Point { radial },
            (Some(direction), Some(angular_a0), Some(theta)) => LightKind::Spot {
                direction: non_zero("direction", direction)?.normalize(),
                angular_a0,
                theta,
                radial,
            },
            _ => return Err(DeclarationError::MalformedLight),
        };

        Ok(Light { color, position, kind })
    }
}

fn material(
    diffuse_color: [f32; 3],
    specular_color: [f32; 3],
    reflectivity: Option<f32>,
    refractivity: Option<f32>,
    ior: Option<f32>,
) -> DeclarationResult<Material> {
    for channel in diffuse_color {
        unit("diffuse_color", channel)?;
    }
    for channel in specular_color {
        unit("specular_color", channel)?;
    }
    let reflectivity = reflectivity.map(|value| unit("reflectivity", value)).transpose()?.unwrap_or(0.0);
    let refractivity = refractivity.map(|value| unit("refractivity", value)).transpose()?.unwrap_or(0.0);
    let ior = ior.map(|value| positive("ior", value)).transpose()?.unwrap_or(1.0);

    if reflectivity + refractivity > 1.0 {
        return Err(DeclarationError::ExcessTransport {
            reflectivity,
            refractivity,
        });
    }

    Ok(Material::new(Color::from_array(diffuse_color), Color::from_array(specular_color))
        .with_reflectivity(reflectivity)
        .with_refraction(refractivity, ior))
}

fn positive(field: &'static str, value: f32) -> DeclarationResult<f32> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(DeclarationError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> DeclarationResult<f32> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(DeclarationError::Negative { field, value })
    }
}

fn optional_non_negative(field: &'static str, value: Option<f32>) -> DeclarationResult<Option<f32>> {
    value.map(|v| non_negative(field, v)).transpose()
}

fn unit(field: &'static str, value: f32) -> DeclarationResult<f32> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DeclarationError::OutOfUnitRange { field, value })
    }
}

fn non_zero(field: &'static str, value: [f32; 3]) -> DeclarationResult<Vec3> {
    let v = Vec3::from_array(value);
    if v.length_squared() > 0.0 {
        Ok(v)
    } else {
        Err(DeclarationError::ZeroVector { field })
    }
}
