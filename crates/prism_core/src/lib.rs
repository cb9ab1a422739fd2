//! prism Core - Scene description types and loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Viewport`, `Sphere`, `Material`, `Light`
//! - **Scene loading**: JSON scene description parsing
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.object_count(),
//!     scene.light_count());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{Color, Light, Material, Object, Scene, Sphere, Viewport};
