//! Hittable trait and nearest-hit scene query.

use prism_core::{Object, Scene};
use prism_math::{DVec3, Ray};

/// Minimum ray parameter accepted as a hit.
///
/// Rejects intersections at the ray origin (self-intersection acne).
pub const EPS: f64 = 1.0e-7;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Outward unit surface normal at the intersection
    pub normal: DVec3,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `t > EPS`, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}

impl Hittable for Object {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Object::Sphere(sphere) => sphere.intersect(ray),
        }
    }
}

/// Find the object closest to the ray origin.
///
/// Linear scan over every object. A candidate replaces the current best
/// only when its `t` is strictly smaller, so the first object wins ties.
pub fn find_closest<'a>(scene: &'a Scene, ray: &Ray) -> Option<(&'a Object, Hit)> {
    let mut closest: Option<(&Object, Hit)> = None;

    for object in &scene.objects {
        if let Some(hit) = object.intersect(ray) {
            match closest {
                Some((_, best)) if best.t <= hit.t => {}
                _ => closest = Some((object, hit)),
            }
        }
    }

    closest
}
