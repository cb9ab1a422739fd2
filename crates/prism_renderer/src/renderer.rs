//! Scanline-parallel ray tracing renderer.
//!
//! Implements:
//! - Primary ray tracing against the scene's objects
//! - Anti-aliasing via jittered supersampling
//! - One rayon task per image row, writing into disjoint buffer rows

use std::time::Instant;

use prism_core::{Color, Scene};
use prism_math::{GeometryError, Ray};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use thiserror::Error;

use crate::sampler::{SampleOffset, StochasticSampler};
use crate::{find_closest, shading};

/// Errors that can occur while tracing a single ray or pixel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    #[error("degenerate geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("ray hit an object but the scene has no lights")]
    NoLights,

    #[error("pixel has no sample offsets")]
    NoSamples,
}

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("render of row {row} failed: {source}")]
    Row {
        row: u32,
        #[source]
        source: TraceError,
    },

    #[error("viewport is {}x{} but the camera was built for {}x{}", .viewport.0, .viewport.1, .camera.0, .camera.1)]
    ViewportMismatch { viewport: (u32, u32), camera: (u32, u32) },

    #[error("pixel size must be positive and finite, got {width}x{height}")]
    InvalidPixelSize { width: f64, height: f64 },

    /// Only raised when the OS refuses to spawn worker threads.
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Sampler divisions per pixel axis (samples per pixel = n^2)
    pub num_sections: u32,
    /// Nominal pixel footprint used by the sampler
    pub pixel_width: f64,
    pub pixel_height: f64,
    /// Worker count; None uses rayon's global pool
    pub threads: Option<usize>,
    /// Render rows on worker threads; false renders on the calling thread
    pub parallel: bool,
    /// Seed for the sampler jitter; None draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            num_sections: 3,
            pixel_width: 1.0,
            pixel_height: 1.0,
            threads: None,
            parallel: true,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Set sampler divisions per pixel axis.
    pub fn with_sections(mut self, num_sections: u32) -> Self {
        self.num_sections = num_sections;
        self
    }

    /// Use a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Fix the sampler seed for reproducible renders.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Render rows one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check the sampler pixel footprint.
    pub fn validate(&self) -> Result<(), RenderError> {
        let valid = |size: f64| size.is_finite() && size > 0.0;
        if valid(self.pixel_width) && valid(self.pixel_height) {
            Ok(())
        } else {
            Err(RenderError::InvalidPixelSize {
                width: self.pixel_width,
                height: self.pixel_height,
            })
        }
    }

    /// The sampler described by this configuration.
    pub fn sampler(&self) -> StochasticSampler {
        StochasticSampler::new(self.num_sections).with_pixel_size(self.pixel_width, self.pixel_height)
    }
}

/// Compute the color seen by a ray.
///
/// Rays that hit nothing return the background color unshaded.
pub fn trace_ray(scene: &Scene, ray: &Ray) -> Result<Color, TraceError> {
    match find_closest(scene, ray) {
        Some((object, hit)) => {
            let light = scene.primary_light().ok_or(TraceError::NoLights)?;
            Ok(shading::illuminate(scene, object, ray, &hit, light)?)
        }
        None => Ok(scene.background_color),
    }
}

/// Average color of pixel `(x, y)` over the given sample offsets.
///
/// The result is neither clamped nor scaled.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, offsets: &[SampleOffset]) -> Result<Color, TraceError> {
    if offsets.is_empty() {
        return Err(TraceError::NoSamples);
    }

    let mut sum = Color::ZERO;
    for &(dx, dy) in offsets {
        let ray = scene.camera.make_ray(x as f64 + dx, y as f64 + dy);
        sum += trace_ray(scene, &ray)?;
    }

    Ok(sum / offsets.len() as f64)
}

/// Convert a color to 8-bit RGB: `floor(c * 255)` clamped to `[0, 255]`.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f64| (c * 255.0).floor().clamp(0.0, 255.0) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Row-major RGB8 image, row 0 at the bottom of the viewplane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// Create a new pixel buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Pixels of row `y`.
    pub fn row(&self, y: u32) -> &[[u8; 3]] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable rows, bottom to top.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, [u8; 3]> {
        self.pixels.chunks_mut(self.width.max(1) as usize)
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Packed RGB bytes in buffer order (bottom row first).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Packed RGB bytes with the top row first, for raster image formats.
    pub fn to_rgb_bytes_top_down(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for y in (0..self.height).rev() {
            bytes.extend(self.row(y).iter().flatten());
        }
        bytes
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }
}

/// Render one scanline into its slice of the buffer.
fn render_row(scene: &Scene, y: u32, offsets: &[SampleOffset], row: &mut [[u8; 3]]) -> Result<(), RenderError> {
    for (x, pixel) in row.iter_mut().enumerate() {
        let color = render_pixel(scene, x as u32, y, offsets).map_err(|source| RenderError::Row { row: y, source })?;
        *pixel = color_to_rgb(color);
    }
    Ok(())
}

/// Render every row on the current rayon pool.
fn render_rows_parallel(
    scene: &Scene,
    offsets: &[SampleOffset],
    pixels: &mut [[u8; 3]],
    row_len: usize,
) -> Result<(), RenderError> {
    pixels
        .par_chunks_mut(row_len)
        .enumerate()
        .try_for_each(|(y, row)| render_row(scene, y as u32, offsets, row))
}

/// Render the scene with a fixed list of sample offsets.
///
/// Blocks until every row is written. The first failing row aborts the
/// render; rows already written are discarded with the buffer. The scene's
/// camera must have been built for the scene's viewport.
pub fn render_with_offsets(
    scene: &Scene,
    offsets: &[SampleOffset],
    config: &RenderConfig,
) -> Result<PixelBuffer, RenderError> {
    let width = scene.viewport.width;
    let height = scene.viewport.height;
    let camera = (scene.camera.width(), scene.camera.height());
    if (width, height) != camera {
        return Err(RenderError::ViewportMismatch {
            viewport: (width, height),
            camera,
        });
    }

    let mut image = PixelBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp ({} object(s))...",
        width,
        height,
        offsets.len(),
        scene.object_count()
    );
    let start = Instant::now();

    if config.parallel {
        let row_len = width.max(1) as usize;
        match config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
                pool.install(|| render_rows_parallel(scene, offsets, &mut image.pixels, row_len))?;
            }
            None => render_rows_parallel(scene, offsets, &mut image.pixels, row_len)?,
        }
    } else {
        for (y, row) in image.rows_mut().enumerate() {
            render_row(scene, y as u32, offsets, row)?;
        }
    }

    log::info!("Rendered in {} ms", start.elapsed().as_millis());
    Ok(image)
}

/// Render the entire scene to a pixel buffer.
///
/// Sample offsets are drawn once and reused for every pixel.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<PixelBuffer, RenderError> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let offsets = config.sampler().make_sample_offsets(&mut rng);
    log::debug!("Sample offsets: {:?}", offsets);

    render_with_offsets(scene, &offsets, config)
}
