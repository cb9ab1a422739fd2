//! Ray-sphere intersection.

use crate::hittable::{Hit, Hittable, EPS};
use prism_core::Sphere;
use prism_math::Ray;

impl Hittable for Sphere {
    /// Geometric ray-sphere test. Expects a unit-length ray direction.
    ///
    /// A sphere whose center projects behind the ray origin (`tca < 0`) is
    /// treated as missed, even when the origin lies inside the sphere.
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let l = self.center() - ray.origin;
        let tca = l.dot(ray.direction);
        if tca < 0.0 {
            return None;
        }

        let d2 = l.dot(l) - tca * tca;
        let radius2 = self.radius() * self.radius();
        if d2 > radius2 {
            return None;
        }

        let thc = (radius2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;

        let t = if t0 > EPS {
            t0
        } else if t1 > EPS {
            t1
        } else {
            return None;
        };

        Some(Hit {
            t,
            normal: self.normal_at(ray, t),
        })
    }
}
