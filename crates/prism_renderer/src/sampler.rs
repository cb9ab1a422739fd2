//! Jittered sub-pixel sample offsets for stochastic anti-aliasing.

use rand::Rng;

/// Offset `(dx, dy)` from a pixel's integer coordinate, in pixel units.
pub type SampleOffset = (f64, f64);

/// Uniform random jitter in `[-size / 2, size / 2]`.
///
/// Sizes that are not positive and finite produce no jitter.
pub fn jitter<R: Rng + ?Sized>(size: f64, rng: &mut R) -> f64 {
    let half = size / 2.0;
    if half.is_finite() && half > 0.0 {
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}

/// Stratified sampler with one jittered position per grid division.
///
/// The pixel is split into `num_sections` divisions along each axis. Each
/// column and each row is jittered once, and the sample grid is their
/// cartesian product. Offsets are drawn once per render and shared by
/// every pixel, so noise is not independent between pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticSampler {
    num_sections: u32,
    pixel_width: f64,
    pixel_height: f64,
}

impl StochasticSampler {
    /// Create a sampler over a unit pixel. `num_sections` is at least 1.
    pub fn new(num_sections: u32) -> Self {
        Self {
            num_sections: num_sections.max(1),
            pixel_width: 1.0,
            pixel_height: 1.0,
        }
    }

    /// Set the nominal pixel footprint.
    pub fn with_pixel_size(mut self, pixel_width: f64, pixel_height: f64) -> Self {
        self.pixel_width = pixel_width;
        self.pixel_height = pixel_height;
        self
    }

    pub fn num_sections(&self) -> u32 {
        self.num_sections
    }

    /// Number of offsets produced per call (`num_sections^2`).
    pub fn sample_count(&self) -> usize {
        let n = self.num_sections as usize;
        n * n
    }

    /// Draw the offsets for one render, row by row (y outer, x inner).
    pub fn make_sample_offsets<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<SampleOffset> {
        let n = self.num_sections as usize;
        let xsec_size = self.pixel_width / n as f64;
        let ysec_size = self.pixel_height / n as f64;

        let xdiv: Vec<f64> = (0..n)
            .map(|i| xsec_size * i as f64 + xsec_size / 2.0 + jitter(xsec_size, &mut *rng))
            .collect();
        let ydiv: Vec<f64> = (0..n)
            .map(|i| ysec_size * i as f64 + ysec_size / 2.0 + jitter(ysec_size, &mut *rng))
            .collect();

        ydiv.iter()
            .flat_map(|&y| xdiv.iter().map(move |&x| (x, y)))
            .collect()
    }
}

impl Default for StochasticSampler {
    fn default() -> Self {
        Self::new(3)
    }
}
