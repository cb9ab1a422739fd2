// Re-export glam's double-precision vector
pub use glam::{dvec3, DVec3};

// prism math types
mod camera;
mod error;
mod ray;

pub use camera::{compute_fov, Camera, CameraSettings, DEFAULT_FOCAL_LENGTH};
pub use error::{GeometryError, GeometryResult};
pub use ray::Ray;

/// Normalize a vector, failing instead of producing NaN components.
///
/// `context` names the quantity being normalized so the error says
/// which part of the scene is degenerate.
#[inline]
pub fn normalize_checked(v: DVec3, context: &'static str) -> GeometryResult<DVec3> {
    v.try_normalize().ok_or(GeometryError::ZeroLength { context })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, DVec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, DVec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(DVec3::X.cross(DVec3::Y), DVec3::Z);
    }

    #[test]
    fn test_normalize_checked() {
        let n = normalize_checked(DVec3::new(3.0, 0.0, 4.0), "test").unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n - DVec3::new(0.6, 0.0, 0.8)).length() < 1e-12);
    }

    #[test]
    fn test_normalize_checked_zero() {
        let err = normalize_checked(DVec3::ZERO, "light direction").unwrap_err();
        assert!(matches!(
            err,
            GeometryError::ZeroLength { context: "light direction" }
        ));
    }

    #[test]
    fn test_normalize_checked_non_finite() {
        assert!(normalize_checked(DVec3::new(f64::NAN, 0.0, 1.0), "nan").is_err());
    }
}
