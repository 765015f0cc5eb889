use image::Rgb;
use log::debug;

use crate::color_ops::distance2;
use crate::{Color, Error, PixelSource, Result};

/// Running channel sums of the pixels assigned to a cluster during one cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Accumulator {
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
}

impl Accumulator {
    fn add(&mut self, color: Color) {
        self.red += color[0] as u64;
        self.green += color[1] as u64;
        self.blue += color[2] as u64;
        self.count += 1;
    }

    /// Floored mean color, fails for a cluster that received no pixels
    fn mean(&self, index: usize) -> Result<Color> {
        if self.count == 0 {
            return Err(Error::DegenerateCluster { index });
        }
        Ok(Rgb([
            (self.red / self.count) as u8,
            (self.green / self.count) as u8,
            (self.blue / self.count) as u8,
        ]))
    }
}

#[derive(Debug, Clone, Copy)]
struct Centroid {
    color: Color,
    sums: Accumulator,
}

/// Result of Lloyd refinement
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Refinement {
    /// Final cluster colors, unique, in cluster order
    pub colors: Vec<Color>,
    /// Number of cycles that were run
    pub cycles: u32,
    /// Whether the last cycle left every centroid in place
    pub converged: bool,
}

/// Lloyd style k-means refinement of centroid colors
///
/// Pixels farther than `threshold` (euclidean RGB distance) from their nearest
/// centroid do not contribute to that cycle. A centroid that gets no pixels keeps
/// its previous color. Centroids whose means collide are merged, keeping the
/// first one in cluster order.
pub(crate) fn refine_clusters<I: PixelSource>(
    image: &I,
    initial: &[Color],
    max_cycles: u32,
    threshold: f64,
) -> Refinement {
    let mut centroids: Vec<Centroid> = merge_duplicates(initial.iter().copied())
        .into_iter()
        .map(|color| Centroid {
            color,
            sums: Accumulator::default(),
        })
        .collect();

    let mut cycles = 0;
    let mut converged = false;
    while cycles < max_cycles && !centroids.is_empty() {
        cycles += 1;
        for centroid in centroids.iter_mut() {
            centroid.sums = Accumulator::default();
        }

        for (_, color) in image.scan() {
            let (index, distance) = nearest_centroid(&centroids, color);
            if (distance as f64).sqrt() <= threshold {
                centroids[index].sums.add(color);
            }
        }

        let mut well_positioned = 0;
        let mut recomputed = Vec::with_capacity(centroids.len());
        for (index, centroid) in centroids.iter().enumerate() {
            let color = match centroid.sums.mean(index) {
                Ok(color) => color,
                Err(e) => {
                    debug!("{e}, keeping {:?}", centroid.color.0);
                    centroid.color
                }
            };
            if color == centroid.color {
                well_positioned += 1;
            }
            recomputed.push(color);
        }

        let before = recomputed.len();
        centroids = merge_duplicates(recomputed)
            .into_iter()
            .map(|color| Centroid {
                color,
                sums: Accumulator::default(),
            })
            .collect();
        debug!(
            "cycle {cycles}: {well_positioned}/{before} centroids in place, {} merged",
            before - centroids.len()
        );

        if well_positioned == before {
            converged = true;
            break;
        }
    }

    Refinement {
        colors: centroids.into_iter().map(|c| c.color).collect(),
        cycles,
        converged,
    }
}

/// Index and squared distance of the nearest centroid, first one wins ties
fn nearest_centroid(centroids: &[Centroid], color: Color) -> (usize, u32) {
    let mut best = (0, u32::MAX);
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = distance2(color, centroid.color);
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best
}

/// Drop repeated colors, keeping the first occurrence
fn merge_duplicates(colors: impl IntoIterator<Item = Color>) -> Vec<Color> {
    let mut merged: Vec<Color> = Vec::new();
    for color in colors {
        if !merged.contains(&color) {
            merged.push(color);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, RgbImage};

    use super::*;

    #[test]
    fn empty_cluster_is_reported_as_degenerate() {
        let sums = Accumulator::default();
        assert!(matches!(
            sums.mean(3),
            Err(Error::DegenerateCluster { index: 3 })
        ));
    }

    #[test]
    fn mean_is_floored() {
        let mut sums = Accumulator::default();
        sums.add(Rgb([10, 0, 255]));
        sums.add(Rgb([11, 1, 254]));
        assert_eq!(sums.mean(0).unwrap(), Rgb([10, 0, 254]));
    }

    #[test]
    fn flat_colors_converge_in_one_cycle() {
        let colors = [Rgb([255, 0, 0]), Rgb([0, 255, 0]), Rgb([0, 0, 255])];
        let image: RgbImage = ImageBuffer::from_fn(3, 1, |x, _| colors[x as usize]);
        let refinement = refine_clusters(&image, &colors, 3, 5.0);
        assert_eq!(refinement.colors, colors.to_vec());
        assert_eq!(refinement.cycles, 1);
        assert!(refinement.converged);
    }

    #[test]
    fn nearby_pixels_pull_centroid_to_their_mean() {
        let image: RgbImage = ImageBuffer::from_fn(2, 1, |x, _| match x {
            0 => Rgb([100, 100, 100]),
            _ => Rgb([104, 100, 100]),
        });
        let refinement = refine_clusters(&image, &[Rgb([100, 100, 100])], 3, 5.0);
        assert_eq!(refinement.colors, vec![Rgb([102, 100, 100])]);
        assert!(refinement.converged);
        assert_eq!(refinement.cycles, 2);
    }

    #[test]
    fn pixels_beyond_threshold_are_ignored() {
        let image: RgbImage = ImageBuffer::from_fn(2, 1, |x, _| match x {
            0 => Rgb([100, 100, 100]),
            _ => Rgb([200, 100, 100]),
        });
        let refinement = refine_clusters(&image, &[Rgb([100, 100, 100])], 3, 5.0);
        assert_eq!(refinement.colors, vec![Rgb([100, 100, 100])]);
    }

    #[test]
    fn centroid_without_pixels_keeps_its_color() {
        let image: RgbImage = ImageBuffer::from_pixel(2, 2, Rgb([0, 0, 0]));
        let initial = [Rgb([0, 0, 0]), Rgb([250, 250, 250])];
        let refinement = refine_clusters(&image, &initial, 3, 5.0);
        assert_eq!(refinement.colors, initial.to_vec());
        assert!(refinement.converged);
    }

    #[test]
    fn duplicate_seeds_are_merged() {
        let image: RgbImage = ImageBuffer::from_pixel(2, 1, Rgb([50, 50, 50]));
        let initial = [Rgb([50, 50, 50]), Rgb([50, 50, 50]), Rgb([90, 50, 50])];
        let refinement = refine_clusters(&image, &initial, 3, 5.0);
        assert_eq!(refinement.colors, vec![Rgb([50, 50, 50]), Rgb([90, 50, 50])]);
    }

    #[test]
    fn colliding_means_are_merged() {
        // Both pixels tie between the centroids and go to the first one, whose
        // floored mean lands exactly on the second (empty) centroid
        let image: RgbImage = ImageBuffer::from_fn(2, 1, |x, _| match x {
            0 => Rgb([49, 52, 50]),
            _ => Rgb([52, 49, 50]),
        });
        let initial = [Rgb([51, 51, 50]), Rgb([50, 50, 50])];
        let refinement = refine_clusters(&image, &initial, 3, 5.0);
        assert_eq!(refinement.colors, vec![Rgb([50, 50, 50])]);
        assert_eq!(refinement.cycles, 2);
        assert!(refinement.converged);
    }

    #[test]
    fn stops_at_cycle_cap() {
        // A wide smooth ramp keeps the single centroid drifting for many cycles
        let image: RgbImage = ImageBuffer::from_fn(64, 1, |x, _| Rgb([x as u8 * 2, 0, 0]));
        let refinement = refine_clusters(&image, &[Rgb([0, 0, 0])], 2, 5.0);
        assert_eq!(refinement.cycles, 2);
        assert!(!refinement.converged);
        assert_eq!(refinement.colors.len(), 1);
    }

    #[test]
    fn zero_cycles_returns_seeds() {
        let image: RgbImage = ImageBuffer::from_pixel(1, 1, Rgb([9, 9, 9]));
        let refinement = refine_clusters(&image, &[Rgb([0, 0, 0])], 0, 5.0);
        assert_eq!(refinement.colors, vec![Rgb([0, 0, 0])]);
        assert_eq!(refinement.cycles, 0);
        assert!(!refinement.converged);
    }
}
