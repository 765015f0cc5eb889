use log::debug;
use rand::Rng;

use crate::{Color, Error, PixelSource, Result};

mod finishing;
mod padding;
mod refinement;
mod seeding;
mod snapping;

/// Tuning knobs for [`PaletteGenerator`]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorOptions {
    /// Upper bound on refinement cycles
    max_cycles: u32,
    /// Pixels farther than this (euclidean RGB) from their centroid are left out of a cycle
    distance_threshold: f64,
    /// Palettes smaller than this get one extra cluster, and the darkest color is dropped
    small_palette_size: usize,
}

impl GeneratorOptions {
    pub const fn new() -> Self {
        Self {
            max_cycles: 3,
            distance_threshold: 5.0,
            small_palette_size: 5,
        }
    }

    pub const fn max_cycles(self, max_cycles: u32) -> Self {
        Self { max_cycles, ..self }
    }

    pub const fn distance_threshold(self, distance_threshold: f64) -> Self {
        Self {
            distance_threshold,
            ..self
        }
    }

    /// Set to 0 to disable the extra cluster and the darkest color filter
    pub const fn small_palette_size(self, small_palette_size: usize) -> Self {
        Self {
            small_palette_size,
            ..self
        }
    }

    pub const fn get_max_cycles(&self) -> u32 {
        self.max_cycles
    }

    pub const fn get_distance_threshold(&self) -> f64 {
        self.distance_threshold
    }

    pub const fn get_small_palette_size(&self) -> usize {
        self.small_palette_size
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a color palette from the pixels of an image
#[derive(Debug, Clone, Default)]
pub struct PaletteGenerator {
    options: GeneratorOptions,
}

impl PaletteGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate a palette of exactly `num_colors` colors sorted by hue
    ///
    /// Every returned color occurs somewhere in `image`. Fails with
    /// [`Error::InvalidArgument`] if `num_colors` is zero or exceeds the
    /// number of pixels.
    pub fn generate<I, R>(&self, image: &I, num_colors: usize, rng: &mut R) -> Result<Vec<Color>>
    where
        I: PixelSource,
        R: Rng,
    {
        let pixel_count = image.pixel_count();
        if num_colors == 0 {
            return Err(Error::InvalidArgument(
                "palette must have at least one color".into(),
            ));
        }
        if num_colors > pixel_count {
            return Err(Error::InvalidArgument(format!(
                "cannot pick {num_colors} colors from an image with {pixel_count} pixels"
            )));
        }

        // Small palettes ask for one extra cluster and drop the darkest color at the end
        let drop_darkest = num_colors < self.options.small_palette_size && num_colors < pixel_count;
        let cluster_count = if drop_darkest { num_colors + 1 } else { num_colors };

        let seeds = seeding::seed_centroids(image, cluster_count, rng)?;
        let seed_colors: Vec<Color> = seeds.iter().map(|&at| image.pixel(at)).collect();
        debug!("seeded {} centroids", seed_colors.len());

        let refinement = refinement::refine_clusters(
            image,
            &seed_colors,
            self.options.max_cycles,
            self.options.distance_threshold,
        );
        debug!(
            "refinement finished after {} cycles (converged: {}) with {} clusters",
            refinement.cycles,
            refinement.converged,
            refinement.colors.len()
        );

        let mut colors = snapping::snap_to_image_colors(image, &refinement.colors);
        padding::pad_with_random_pixels(image, &mut colors, cluster_count, rng);

        if drop_darkest {
            if let Some(darkest) = finishing::remove_darkest(&mut colors) {
                debug!("dropped darkest color {:?}", darkest.0);
            }
        }

        let colors = finishing::sort_by_hue(colors);
        if colors.len() != num_colors {
            return Err(Error::InsufficientColors {
                expected: num_colors,
                actual: colors.len(),
            });
        }
        Ok(colors)
    }
}

/// Generate a palette with the default options, see [`PaletteGenerator::generate`]
pub fn generate_palette<I, R>(image: &I, num_colors: usize, rng: &mut R) -> Result<Vec<Color>>
where
    I: PixelSource,
    R: Rng,
{
    PaletteGenerator::default().generate(image, num_colors, rng)
}
