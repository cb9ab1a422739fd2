//! prism Renderer - CPU ray tracing with stochastic anti-aliasing.
//!
//! Casts primary rays from a pinhole camera, finds the nearest sphere,
//! shades it with ambient + diffuse + Phong specular terms from the
//! scene's first light, and averages jittered sub-pixel samples.
//! Scanlines are rendered in parallel with rayon.

mod hittable;
mod renderer;
mod sampler;
pub mod shading;
mod sphere;

pub use hittable::{find_closest, Hit, Hittable, EPS};
pub use renderer::{
    color_to_rgb, render, render_pixel, render_with_offsets, trace_ray, PixelBuffer,
    RenderConfig, RenderError, TraceError,
};
pub use sampler::{jitter, SampleOffset, StochasticSampler};

/// Re-export scene and math types used in the public API
pub use prism_core::{Color, Light, Material, Object, Scene, Sphere, Viewport};
pub use prism_math::{Camera, DVec3, Ray};
