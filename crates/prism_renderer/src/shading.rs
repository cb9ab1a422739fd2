//! Local illumination: ambient + diffuse + Phong specular.
//!
//! Only the scene's first light is consulted. The specular term uses a
//! fixed coefficient and exponent; a material's `specular_coeff` and
//! `hardness` are carried in the scene but do not affect shading.

use prism_core::{Color, Light, Material, Object, Scene};
use prism_math::{normalize_checked, GeometryResult, Ray};

use crate::Hit;

/// Weight of the specular highlight.
pub const SPECULAR_COEFF: f64 = 0.95;

/// Phong exponent of the specular highlight.
pub const SPECULAR_EXPONENT: i32 = 10;

/// Lambertian term: `kd * diffuse_color * light.color * max(0, n . l)`.
pub fn diffuse_component(material: &Material, ray: &Ray, hit: &Hit, light: &Light) -> GeometryResult<Color> {
    let point = ray.at(hit.t);
    let to_light = normalize_checked(light.position - point, "direction to light")?;
    let ldot_normal = hit.normal.dot(to_light).max(0.0);

    Ok(material.diffuse_coeff * material.diffuse_color * light.color * ldot_normal)
}

/// Phong highlight, monochromatic apart from the light color.
///
/// The reflection is not gated by `n . l`, and an even exponent makes
/// `(r . v)^10` non-negative for any base.
pub fn specular_component(ray: &Ray, hit: &Hit, light: &Light) -> GeometryResult<Color> {
    let point = ray.at(hit.t);
    let to_light = normalize_checked(light.position - point, "direction to light")?;
    let view = normalize_checked(ray.origin - point, "view direction")?;
    let reflect = 2.0 * to_light.dot(hit.normal) * hit.normal - to_light;

    Ok(SPECULAR_COEFF * light.color * reflect.dot(view).powi(SPECULAR_EXPONENT))
}

/// Ambient term: `ka * kd * ambient_color * diffuse_color`.
pub fn ambient_component(scene: &Scene, material: &Material) -> Color {
    scene.ambient_coeff * material.diffuse_coeff * scene.ambient_color * material.diffuse_color
}

/// Shade a hit on `object` with `light`.
///
/// Channels are clamped to at most 1.0. There is no lower clamp here.
pub fn illuminate(scene: &Scene, object: &Object, ray: &Ray, hit: &Hit, light: &Light) -> GeometryResult<Color> {
    let material = object.material();
    let ambient = ambient_component(scene, material);
    let diffuse = diffuse_component(material, ray, hit, light)?;
    let specular = specular_component(ray, hit, light)?;

    Ok((ambient + diffuse + specular).min(Color::ONE))
}
