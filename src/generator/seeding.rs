use log::trace;
use rand::Rng;

use crate::color_ops::distance2;
use crate::{Coordinate, Error, PixelSource, Result};

/// Pick `count` distinct pixel coordinates with k-means++ farthest-point seeding
///
/// The first seed lies near the image center, every following seed is the
/// pixel whose color is farthest from its nearest already chosen seed.
pub(crate) fn seed_centroids<I, R>(image: &I, count: usize, rng: &mut R) -> Result<Vec<Coordinate>>
where
    I: PixelSource,
    R: Rng,
{
    let pixel_count = image.pixel_count();
    if count == 0 {
        return Err(Error::InvalidArgument("cannot seed zero centroids".into()));
    }
    if count > pixel_count {
        return Err(Error::InvalidArgument(format!(
            "cannot seed {count} centroids from {pixel_count} pixels"
        )));
    }

    let width = image.width() as usize;
    let colors: Vec<_> = image.scan().map(|(_, color)| color).collect();
    let mut seeds = Vec::with_capacity(count);
    let first = first_seed(image, rng);
    seeds.push(first);
    trace!("seed 0 at {}x{}", first.x, first.y);

    // Distance from every pixel to its nearest seed, None once the pixel is a seed itself
    let mut nearest: Vec<Option<u32>> = vec![Some(u32::MAX); pixel_count];
    let mut latest = first.y as usize * width + first.x as usize;
    nearest[latest] = None;

    for i in 1..count {
        let seed_color = colors[latest];
        let mut farthest: Option<(usize, u32)> = None;
        for (index, slot) in nearest.iter_mut().enumerate() {
            let Some(min) = slot else {
                continue;
            };
            *min = (*min).min(distance2(colors[index], seed_color));
            // Strict comparison keeps the first pixel in scan order on ties
            if farthest.is_none_or(|(_, best)| *min > best) {
                farthest = Some((index, *min));
            }
        }
        // count <= pixel_count, so an unchosen pixel is always left
        let Some((index, distance)) = farthest else {
            break;
        };
        nearest[index] = None;
        latest = index;
        let seed = Coordinate::new((index % width) as u32, (index / width) as u32);
        trace!("seed {i} at {}x{} (distance {distance})", seed.x, seed.y);
        seeds.push(seed);
    }

    Ok(seeds)
}

/// Random pixel around the image center, at most half the shorter side away on each axis
fn first_seed<I, R>(image: &I, rng: &mut R) -> Coordinate
where
    I: PixelSource,
    R: Rng,
{
    let (width, height) = (image.width() as i64, image.height() as i64);
    let radius = width.min(height) / 2;
    let dx = rng.random_range(-radius..=radius);
    let dy = rng.random_range(-radius..=radius);
    let x = (width / 2 + dx).clamp(0, width - 1);
    let y = (height / 2 + dy).clamp(0, height - 1);
    Coordinate::new(x as u32, y as u32)
}
