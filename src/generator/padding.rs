use log::debug;
use rand::Rng;

use crate::{Color, Coordinate, PixelSource};

/// Append colors of uniformly random pixels until `colors` holds `target` entries
pub(crate) fn pad_with_random_pixels<I, R>(
    image: &I,
    colors: &mut Vec<Color>,
    target: usize,
    rng: &mut R,
) where
    I: PixelSource,
    R: Rng,
{
    if colors.len() >= target {
        return;
    }
    debug!("padding {} colors with {} random pixels", colors.len(), target - colors.len());
    while colors.len() < target {
        let at = Coordinate::new(
            rng.random_range(0..image.width()),
            rng.random_range(0..image.height()),
        );
        colors.push(image.pixel(at));
    }
}
