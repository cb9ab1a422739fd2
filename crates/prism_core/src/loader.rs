//! JSON scene loading.
//!
//! Maps a scene description of the form
//!
//! ```json
//! {
//!   "viewport": {"width": 320, "height": 200},
//!   "camera": {"eye": {"x": 0, "y": 0, "z": -400}, "lookat": {"x": 0, "y": 0, "z": 0}},
//!   "lights": [{"position": {"x": 0, "y": 300, "z": -150}, "color": [1, 1, 1]}],
//!   "background_color": {"r": 0, "g": 0, "b": 0},
//!   "ambient_light": {"color": [1, 1, 1], "coeff": 0.2},
//!   "objects": [{"sphere": {"center": {"x": 0, "y": 0, "z": 300}, "radius": 150,
//!                "material": {"diffuse_color": {"r": 1, "g": 0, "b": 0},
//!                             "diffuse_coeff": 0.56, "specular_coeff": 0.8, "hardness": 10}}}]
//! }
//! ```
//!
//! into a [`Scene`]. The camera also accepts optional `focal_length` and
//! `up` keys. Object entries of any kind other than `sphere` are skipped.

use std::path::Path;

use prism_math::{CameraSettings, DVec3, GeometryError};
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Color, Light, Material, Object, Scene, Sphere, Viewport};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Scene has {0} object(s) but no lights")]
    NoLights(usize),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug, Deserialize)]
struct Xyz {
    x: f64,
    y: f64,
    z: f64,
}

impl From<Xyz> for DVec3 {
    fn from(v: Xyz) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Deserialize)]
struct Rgb {
    r: f64,
    g: f64,
    b: f64,
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::new(c.r, c.g, c.b)
    }
}

#[derive(Debug, Deserialize)]
struct ViewportDesc {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct CameraDesc {
    eye: Xyz,
    lookat: Xyz,
    #[serde(default)]
    focal_length: Option<f64>,
    #[serde(default)]
    up: Option<Xyz>,
}

#[derive(Debug, Deserialize)]
struct LightDesc {
    position: Xyz,
    color: [f64; 3],
}

#[derive(Debug, Deserialize)]
struct AmbientDesc {
    color: [f64; 3],
    coeff: f64,
}

#[derive(Debug, Deserialize)]
struct MaterialDesc {
    diffuse_color: Rgb,
    diffuse_coeff: f64,
    specular_coeff: f64,
    hardness: f64,
}

#[derive(Debug, Deserialize)]
struct SphereDesc {
    center: Xyz,
    radius: f64,
    material: MaterialDesc,
}

/// One entry of the `objects` list. Unrecognized keys are ignored.
#[derive(Debug, Deserialize)]
struct ObjectDesc {
    #[serde(default)]
    sphere: Option<SphereDesc>,
}

#[derive(Debug, Deserialize)]
struct SceneDesc {
    viewport: ViewportDesc,
    camera: CameraDesc,
    lights: Vec<LightDesc>,
    background_color: Rgb,
    ambient_light: AmbientDesc,
    objects: Vec<ObjectDesc>,
}

impl SceneDesc {
    fn into_scene(self) -> LoadResult<Scene> {
        let viewport = Viewport::new(self.viewport.width, self.viewport.height);

        let mut settings = CameraSettings::new(
            viewport.width,
            viewport.height,
            self.camera.eye.into(),
            self.camera.lookat.into(),
        );
        if let Some(focal_length) = self.camera.focal_length {
            settings = settings.with_focal_length(focal_length);
        }
        if let Some(up) = self.camera.up {
            settings = settings.with_up(up.into());
        }
        let camera = settings.build()?;

        let mut scene = Scene::new(viewport, camera)
            .with_background(self.background_color.into())
            .with_ambient(
                Color::from_array(self.ambient_light.color),
                self.ambient_light.coeff,
            );

        for light in self.lights {
            scene.add_light(Light::new(light.position.into(), Color::from_array(light.color)));
        }

        for (index, object) in self.objects.into_iter().enumerate() {
            match object.sphere {
                Some(sphere) => {
                    let m = sphere.material;
                    let material = Material::new(
                        m.diffuse_color.into(),
                        m.diffuse_coeff,
                        m.specular_coeff,
                        m.hardness,
                    );
                    let sphere = Sphere::new(sphere.center.into(), sphere.radius, material)?;
                    scene.add_object(Object::Sphere(sphere));
                }
                None => log::warn!("Skipping object {}: unsupported object kind", index),
            }
        }

        if scene.lights.is_empty() && !scene.objects.is_empty() {
            return Err(LoadError::NoLights(scene.object_count()));
        }

        Ok(scene)
    }
}

/// Parse a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<Scene> {
    let desc: SceneDesc = serde_json::from_str(json)?;
    let scene = desc.into_scene()?;
    log::debug!(
        "Parsed scene: {}x{}, {} object(s), {} light(s)",
        scene.viewport.width,
        scene.viewport.height,
        scene.object_count(),
        scene.light_count()
    );
    Ok(scene)
}

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&json)?;
    log::info!(
        "Loaded {}: {} object(s), {} light(s)",
        path.display(),
        scene.object_count(),
        scene.light_count()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn reference_json() -> Value {
        json!({
            "viewport": {"width": 320, "height": 200},
            "camera": {
                "eye": {"x": 0.0, "y": 0.0, "z": -400.0},
                "lookat": {"x": 0.0, "y": 0.0, "z": 0.0}
            },
            "lights": [
                {"position": {"x": 0.0, "y": 300.0, "z": -150.0}, "color": [1.0, 1.0, 1.0]},
                {"position": {"x": 9.0, "y": 9.0, "z": 9.0}, "color": [0.5, 0.5, 0.5]}
            ],
            "background_color": {"r": 0.0, "g": 0.0, "b": 0.2},
            "ambient_light": {"color": [1.0, 1.0, 1.0], "coeff": 0.2},
            "objects": [
                {"sphere": {
                    "center": {"x": 0.0, "y": 0.0, "z": 300.0},
                    "radius": 150.0,
                    "material": {
                        "diffuse_color": {"r": 1.0, "g": 0.0, "b": 0.0},
                        "diffuse_coeff": 0.56,
                        "specular_coeff": 0.8,
                        "hardness": 10.0
                    }
                }}
            ]
        })
    }

    fn load(value: &Value) -> LoadResult<Scene> {
        load_scene_from_str(&value.to_string())
    }

    #[test]
    fn test_load_reference_scene() {
        let scene = load(&reference_json()).unwrap();

        assert_eq!(scene.viewport, Viewport::new(320, 200));
        assert_eq!(scene.camera.eye(), DVec3::new(0.0, 0.0, -400.0));
        assert_eq!(scene.light_count(), 2);
        assert_eq!(scene.primary_light().unwrap().position, DVec3::new(0.0, 300.0, -150.0));
        assert_eq!(scene.background_color, Color::new(0.0, 0.0, 0.2));
        assert_eq!(scene.ambient_color, Color::ONE);
        assert!((scene.ambient_coeff - 0.2).abs() < 1e-12);

        let Object::Sphere(sphere) = &scene.objects[0];
        assert_eq!(sphere.center(), DVec3::new(0.0, 0.0, 300.0));
        assert_eq!(sphere.material().diffuse_color, Color::new(1.0, 0.0, 0.0));
        assert!((sphere.material().diffuse_coeff - 0.56).abs() < 1e-12);
    }

    #[test]
    fn test_camera_matches_direct_construction() {
        let scene = load(&reference_json()).unwrap();
        let direct = prism_math::Camera::new(320, 200, DVec3::new(0.0, 0.0, -400.0), DVec3::ZERO).unwrap();
        assert_eq!(scene.camera, direct);
    }

    #[test]
    fn test_optional_camera_keys() {
        let mut value = reference_json();
        value["camera"]["focal_length"] = json!(2.0);
        value["camera"]["up"] = json!({"x": 1.0, "y": 0.0, "z": 0.0});
        let scene = load(&value).unwrap();
        let expected = CameraSettings::new(320, 200, DVec3::new(0.0, 0.0, -400.0), DVec3::ZERO)
            .with_focal_length(2.0)
            .with_up(DVec3::X)
            .build()
            .unwrap();
        assert_eq!(scene.camera, expected);
    }

    #[test]
    fn test_missing_field_is_error() {
        let mut value = reference_json();
        value.as_object_mut().unwrap().remove("ambient_light");
        let err = load(&value).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)), "unexpected error: {err}");
        assert!(err.to_string().contains("ambient_light"));
    }

    #[test]
    fn test_missing_material_field_is_error() {
        let mut value = reference_json();
        value["objects"][0]["sphere"]["material"]
            .as_object_mut()
            .unwrap()
            .remove("hardness");
        assert!(matches!(load(&value), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            load_scene_from_str("{\"viewport\": "),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_unknown_object_kind_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut value = reference_json();
        value["objects"]
            .as_array_mut()
            .unwrap()
            .push(json!({"plane": {"normal": {"x": 0.0, "y": 1.0, "z": 0.0}}}));
        let scene = load(&value).unwrap();
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_invalid_radius_is_error() {
        let mut value = reference_json();
        value["objects"][0]["sphere"]["radius"] = json!(0.0);
        assert!(matches!(
            load(&value),
            Err(LoadError::Geometry(GeometryError::NonPositiveRadius(_)))
        ));
    }

    #[test]
    fn test_degenerate_camera_is_error() {
        let mut value = reference_json();
        value["camera"]["lookat"] = json!({"x": 0.0, "y": 0.0, "z": -400.0});
        assert!(matches!(
            load(&value),
            Err(LoadError::Geometry(GeometryError::ZeroLength { .. }))
        ));
    }

    #[test]
    fn test_empty_viewport_is_error() {
        let mut value = reference_json();
        value["viewport"]["width"] = json!(0);
        assert!(matches!(
            load(&value),
            Err(LoadError::Geometry(GeometryError::InvalidViewport { .. }))
        ));
    }

    #[test]
    fn test_objects_without_lights_is_error() {
        let mut value = reference_json();
        value["lights"] = json!([]);
        assert!(matches!(load(&value), Err(LoadError::NoLights(1))));
    }

    #[test]
    fn test_empty_scene_without_lights_loads() {
        let mut value = reference_json();
        value["lights"] = json!([]);
        value["objects"] = json!([]);
        let scene = load(&value).unwrap();
        assert_eq!(scene.object_count(), 0);
        assert!(scene.primary_light().is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_scene("/nonexistent/prism/scene.json"),
            Err(LoadError::Io(_))
        ));
    }
}
