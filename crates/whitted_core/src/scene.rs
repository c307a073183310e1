//! Scene model for Whitted.
//!
//! A scene is an ordered, immutable list of objects. An object's identity is
//! its index in that list; the renderer uses the index to exclude the surface
//! a secondary ray leaves from.

use whitted_math::Vec3;

/// Color type alias (RGB, nominally 0-1 for materials, >= 0 for lights)
pub type Color = Vec3;

/// Surface material shared by spheres and planes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: Color,

    /// Specular color (RGB, 0-1)
    pub specular_color: Color,

    /// Fraction of the color taken from the mirror direction
    pub reflectivity: f32,

    /// Fraction of the color taken from the transmitted direction
    pub refractivity: f32,

    /// Index of refraction
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Color::new(0.5, 0.5, 0.5), // Grey default
            specular_color: Color::ZERO,
            reflectivity: 0.0,
            refractivity: 0.0,
            ior: 1.0,
        }
    }
}

impl Material {
    /// Create an opaque, non-reflective material.
    pub fn new(diffuse_color: Color, specular_color: Color) -> Self {
        Self {
            diffuse_color,
            specular_color,
            ..Default::default()
        }
    }

    /// Set the reflectivity.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Set the refractivity and index of refraction.
    pub fn with_refraction(mut self, refractivity: f32, ior: f32) -> Self {
        self.refractivity = refractivity;
        self.ior = ior;
        self
    }

    /// Weight of the material's own diffuse color: 1 - reflectivity - refractivity.
    pub fn local_weight(&self) -> f32 {
        (1.0 - self.reflectivity - self.refractivity).max(0.0)
    }

    /// True if any of the color comes from secondary rays.
    pub fn is_specular_transport(&self) -> bool {
        self.reflectivity > 0.0 || self.refractivity > 0.0
    }
}

/// The view plane. The eye sits at the origin looking down +Z, and the
/// plane at z = 1 spans `width` x `height` centered on the axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize_or_zero()
    }
}

/// An infinite plane through `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub position: Vec3,
    normal: Vec3,
    pub material: Material,
}

impl Plane {
    /// Create a plane. The normal is normalized here, once.
    pub fn new(position: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            position,
            normal: normal.normalize_or_zero(),
            material,
        }
    }

    /// Unit normal of the plane.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

/// Radial (distance) falloff: 1 / (a2·d² + a1·d + a0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialAttenuation {
    pub a2: f32,
    pub a1: f32,
    pub a0: f32,
}

impl RadialAttenuation {
    /// Create radial coefficients. A zero `a2` is replaced by 1.
    pub fn new(a2: f32, a1: f32, a0: f32) -> Self {
        Self {
            a2: if a2 == 0.0 { 1.0 } else { a2 },
            a1,
            a0,
        }
    }
}

impl Default for RadialAttenuation {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// Photometric kind of a scene light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Point {
        radial: RadialAttenuation,
    },
    Spot {
        /// Unit forward direction of the cone
        direction: Vec3,
        /// Angular falloff exponent
        angular_a0: f32,
        /// Cone half-angle in degrees
        theta: f32,
        radial: RadialAttenuation,
    },
}

/// A point or spot light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub color: Color,
    pub position: Vec3,
    pub kind: LightKind,
}

impl Light {
    /// A point light with default (inverse square) falloff.
    pub fn point(color: Color, position: Vec3) -> Self {
        Self {
            color,
            position,
            kind: LightKind::Point {
                radial: RadialAttenuation::default(),
            },
        }
    }

    /// A spot light. `direction` is normalized here.
    pub fn spot(color: Color, position: Vec3, direction: Vec3, angular_a0: f32, theta: f32) -> Self {
        Self {
            color,
            position,
            kind: LightKind::Spot {
                direction: direction.normalize_or_zero(),
                angular_a0,
                theta,
                radial: RadialAttenuation::default(),
            },
        }
    }

    /// Replace the radial falloff coefficients.
    pub fn with_radial(mut self, radial: RadialAttenuation) -> Self {
        match &mut self.kind {
            LightKind::Point { radial: r } | LightKind::Spot { radial: r, .. } => *r = radial,
        }
        self
    }

    /// Radial falloff coefficients of either kind.
    pub fn radial(&self) -> RadialAttenuation {
        match self.kind {
            LightKind::Point { radial } | LightKind::Spot { radial, .. } => radial,
        }
    }

    pub fn is_spot(&self) -> bool {
        matches!(self.kind, LightKind::Spot { .. })
    }
}

/// One entry of the scene's object list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneObject {
    Camera(Camera),
    Sphere(Sphere),
    Plane(Plane),
    Light(Light),
}

impl SceneObject {
    /// Borrow the object as a shadable surface, if it is one.
    pub fn as_surface(&self) -> Option<Surface<'_>> {
        match self {
            SceneObject::Sphere(sphere) => Some(Surface::Sphere(sphere)),
            SceneObject::Plane(plane) => Some(Surface::Plane(plane)),
            SceneObject::Camera(_) | SceneObject::Light(_) => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match self {
            SceneObject::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Lowercase kind name, as written in scene descriptions.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SceneObject::Camera(_) => "camera",
            SceneObject::Sphere(_) => "sphere",
            SceneObject::Plane(_) => "plane",
            SceneObject::Light(_) => "light",
        }
    }
}

/// Borrowed view of an object rays can hit.
#[derive(Clone, Copy, Debug)]
pub enum Surface<'a> {
    Sphere(&'a Sphere),
    Plane(&'a Plane),
}

impl<'a> Surface<'a> {
    pub fn material(&self) -> &'a Material {
        match *self {
            Surface::Sphere(sphere) => &sphere.material,
            Surface::Plane(plane) => &plane.material,
        }
    }

    /// Unit surface normal at `point` (outward for spheres, stored for planes).
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        match *self {
            Surface::Sphere(sphere) => sphere.normal_at(point),
            Surface::Plane(plane) => plane.normal(),
        }
    }
}

/// A complete scene: the camera, surfaces and lights in description order.
///
/// Built once by the loader (or by hand in tests) and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,

    /// Scene name (usually from filename)
    pub name: String,
}

impl Scene {
    /// Create a scene from its object list.
    pub fn new(name: impl Into<String>, objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            name: name.into(),
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// The surface at `index`, or `None` for cameras, lights and bad indices.
    pub fn surface(&self, index: usize) -> Option<Surface<'_>> {
        self.objects.get(index).and_then(SceneObject::as_surface)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The first camera in the list.
    pub fn camera(&self) -> Option<&Camera> {
        self.objects.iter().find_map(|object| match object {
            SceneObject::Camera(camera) => Some(camera),
            _ => None,
        })
    }

    /// Scene lights with their object indices.
    pub fn lights(&self) -> impl Iterator<Item = (usize, &Light)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(index, object)| object.as_light().map(|light| (index, light)))
    }

    /// Spheres and planes with their object indices.
    pub fn surfaces(&self) -> impl Iterator<Item = (usize, Surface<'_>)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(index, object)| object.as_surface().map(|surface| (index, surface)))
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights().count()
    }

    /// Get surface count.
    pub fn surface_count(&self) -> usize {
        self.surfaces().count()
    }
}
