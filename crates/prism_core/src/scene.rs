//! Scene types for prism.
//!
//! A scene is built once from validated input and is read-only while
//! rendering, so every render worker can share it by reference.

use prism_math::{Camera, DVec3, GeometryError, GeometryResult, Ray};

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// Pixel-grid dimensions, fixed for the lifetime of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Surface description used by the local illumination model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: Color,

    /// Weight of the ambient and diffuse terms
    pub diffuse_coeff: f64,

    /// Specular weight as authored in the scene
    pub specular_coeff: f64,

    /// Phong hardness as authored in the scene
    pub hardness: f64,
}

impl Material {
    pub fn new(diffuse_color: Color, diffuse_coeff: f64, specular_coeff: f64, hardness: f64) -> Self {
        Self {
            diffuse_color,
            diffuse_coeff,
            specular_coeff,
            hardness,
        }
    }
}

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: DVec3, radius: f64, material: Material) -> GeometryResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Outward unit normal at the point `ray.at(t)`.
    pub fn normal_at(&self, ray: &Ray, t: f64) -> DVec3 {
        let l = ray.origin - self.center;
        // |l + t*d| == radius on the surface, so this never divides by zero
        ((l + t * ray.direction) / self.radius).normalize()
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: DVec3,
    /// Light color (RGB, unbounded but conventionally 0-1)
    pub color: Color,
}

impl Light {
    pub fn new(position: DVec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// A renderable object.
///
/// Spheres are the only primitive today; new kinds are added as variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Sphere(Sphere),
}

impl Object {
    /// Material of the object.
    pub fn material(&self) -> &Material {
        match self {
            Object::Sphere(sphere) => sphere.material(),
        }
    }
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Self {
        Object::Sphere(sphere)
    }
}

/// A complete scene: viewport, camera, lights, and objects.
#[derive(Debug, Clone)]
pub struct Scene {
    pub viewport: Viewport,

    pub camera: Camera,

    /// Ordered lights; only the first one contributes to shading
    pub lights: Vec<Light>,

    /// Color of rays that hit nothing
    pub background_color: Color,

    pub ambient_color: Color,
    pub ambient_coeff: f64,

    /// Ordered renderable objects
    pub objects: Vec<Object>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(viewport: Viewport, camera: Camera) -> Self {
        Self {
            viewport,
            camera,
            lights: Vec::new(),
            background_color: Color::ZERO,
            ambient_color: Color::ZERO,
            ambient_coeff: 0.0,
            objects: Vec::new(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the ambient light color and coefficient.
    pub fn with_ambient(mut self, color: Color, coeff: f64) -> Self {
        self.ambient_color = color;
        self.ambient_coeff = coeff;
        self
    }

    /// Append a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Append an object.
    pub fn add_object(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    /// The light used for shading.
    pub fn primary_light(&self) -> Option<&Light> {
        self.lights.first()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Material {
        Material::new(Color::new(1.0, 0.0, 0.0), 0.56, 0.8, 10.0)
    }

    #[test]
    fn test_sphere_initial() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, 300.0), 150.0, red()).unwrap();
        assert_eq!(sphere.center(), DVec3::new(0.0, 0.0, 300.0));
        assert!((sphere.radius() - 150.0).abs() < 1e-12);
        assert_eq!(sphere.material().hardness, 10.0);
    }

    #[test]
    fn test_sphere_rejects_bad_radius() {
        assert_eq!(
            Sphere::new(DVec3::ZERO, 0.0, red()).unwrap_err(),
            GeometryError::NonPositiveRadius(0.0)
        );
        assert!(Sphere::new(DVec3::ZERO, -1.0, red()).is_err());
        assert!(Sphere::new(DVec3::ZERO, f64::INFINITY, red()).is_err());
    }

    #[test]
    fn test_normal_at() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, 300.0), 150.0, red()).unwrap();
        let ray = Ray::new(DVec3::new(0.0, 0.0, -400.0), DVec3::Z);
        let n = sphere.normal_at(&ray, 550.0);
        assert!((n - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_scene_creation() {
        let camera = Camera::new(32, 20, DVec3::new(0.0, 0.0, -400.0), DVec3::ZERO).unwrap();
        let mut scene = Scene::new(Viewport::new(32, 20), camera)
            .with_background(Color::new(0.0, 0.0, 1.0))
            .with_ambient(Color::ONE, 0.2);

        assert!(scene.primary_light().is_none());

        scene.add_light(Light::new(DVec3::new(1.0, 2.0, 3.0), Color::ONE));
        scene.add_light(Light::new(DVec3::ZERO, Color::ZERO));
        scene.add_object(Sphere::new(DVec3::ZERO, 1.0, red()).unwrap());

        assert_eq!(scene.light_count(), 2);
        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.primary_light().unwrap().position, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.objects[0].material(), &red());
        assert_eq!(scene.viewport.pixel_count(), 640);
    }
}
