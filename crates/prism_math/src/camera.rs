//! Pinhole camera for primary ray generation.

use crate::{normalize_checked, DVec3, GeometryError, GeometryResult, Ray};

/// Default focal length, in the same units as the viewport size.
pub const DEFAULT_FOCAL_LENGTH: f64 = 0.50;

/// Field of view for a sensor of the given size.
///
/// FOV = 2 * atan(sensor_size / (2 * focal_length)), computed
/// independently for width and height. Returns `(fov_x, fov_y)` in radians.
pub fn compute_fov(sensor_width: f64, sensor_height: f64, focal_length: f64) -> (f64, f64) {
    let fov = |size: f64| 2.0 * (size / (2.0 * focal_length)).atan();
    (fov(sensor_width), fov(sensor_height))
}

/// Construction parameters for a [`Camera`].
#[derive(Debug, Clone, Copy)]
pub struct CameraSettings {
    // Image settings
    pub width: u32,
    pub height: u32,

    // Camera positioning
    pub eye: DVec3,
    pub look_at: DVec3,
    pub up: DVec3,

    // Lens settings
    pub focal_length: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl CameraSettings {
    /// Settings for a viewport of `width` x `height` pixels looking from
    /// `eye` towards `look_at`, with +Y up and the default focal length.
    pub fn new(width: u32, height: u32, eye: DVec3, look_at: DVec3) -> Self {
        Self {
            width,
            height,
            eye,
            look_at,
            up: DVec3::Y,
            focal_length: DEFAULT_FOCAL_LENGTH,
            pixel_width: 1.0,
            pixel_height: 1.0,
        }
    }

    /// Set the focal length.
    pub fn with_focal_length(mut self, focal_length: f64) -> Self {
        self.focal_length = focal_length;
        self
    }

    /// Set the up vector.
    pub fn with_up(mut self, up: DVec3) -> Self {
        self.up = up;
        self
    }

    /// Scale the per-pixel viewplane step along each axis.
    pub fn with_pixel_scale(mut self, pixel_width: f64, pixel_height: f64) -> Self {
        self.pixel_width = pixel_width;
        self.pixel_height = pixel_height;
        self
    }

    /// Derive the viewplane and build an immutable camera.
    ///
    /// Fails when the viewport is empty, the focal length is not positive,
    /// or the view direction is zero or parallel to `up`.
    pub fn build(&self) -> GeometryResult<Camera> {
        if self.width == 0 || self.height == 0 {
            return Err(GeometryError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.focal_length > 0.0 && self.focal_length.is_finite()) {
            return Err(GeometryError::NonPositiveFocalLength(self.focal_length));
        }

        let width = self.width as f64;
        let height = self.height as f64;
        let direction = self.look_at - self.eye;
        let (fov_x, _fov_y) = compute_fov(width, height, self.focal_length);

        // Camera basis: u points along image x, v along image y
        let u = normalize_checked(direction.cross(self.up), "camera u axis")?;
        let v = normalize_checked(u.cross(direction), "camera v axis")?;

        let aspect_ratio = height / width;
        let half_width = (fov_x / 2.0).tan();
        let half_height = aspect_ratio * half_width;

        let viewplane_bottom_left = self.look_at - v * half_height - u * half_width;
        let xinc = u * 2.0 * half_width / width * self.pixel_width;
        let yinc = v * 2.0 * half_height / height * self.pixel_height;

        log::debug!(
            "camera: eye={:?} u={:?} v={:?} half extents {:.4}x{:.4}",
            self.eye,
            u,
            v,
            half_width,
            half_height
        );

        Ok(Camera {
            width: self.width,
            height: self.height,
            eye: self.eye,
            viewplane_bottom_left,
            xinc,
            yinc,
        })
    }
}

/// Camera for generating rays into the scene.
///
/// Immutable after construction and cheap to share across render workers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    // Viewport the viewplane was laid out for
    width: u32,
    height: u32,
    eye: DVec3,
    viewplane_bottom_left: DVec3,
    xinc: DVec3,
    yinc: DVec3,
}

impl Camera {
    /// Create a camera with default focal length, up vector, and pixel scale.
    pub fn new(width: u32, height: u32, eye: DVec3, look_at: DVec3) -> GeometryResult<Self> {
        CameraSettings::new(width, height, eye, look_at).build()
    }

    /// Generate the ray through viewplane pixel coordinates `(x, y)`.
    ///
    /// Coordinates are fractional so supersampling can address sub-pixel
    /// positions. `y` grows upward on the viewplane.
    pub fn make_ray(&self, x: f64, y: f64) -> Ray {
        let viewplane_point = self.viewplane_bottom_left + x * self.xinc + y * self.yinc;
        // The viewplane lies in the plane through look_at perpendicular to the
        // view direction, so this is never zero for a successfully built camera.
        let direction = (viewplane_point - self.eye).normalize();
        Ray::new(self.eye, direction)
    }

    /// Viewport width in pixels this camera was built for.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Viewport height in pixels this camera was built for.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Eye position (origin of every primary ray).
    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    /// World-space position of viewplane pixel coordinate (0, 0).
    pub fn viewplane_bottom_left(&self) -> DVec3 {
        self.viewplane_bottom_left
    }

    /// World-space step for one pixel along x.
    pub fn xinc(&self) -> DVec3 {
        self.xinc
    }

    /// World-space step for one pixel along y.
    pub fn yinc(&self) -> DVec3 {
        self.yinc
    }
}
