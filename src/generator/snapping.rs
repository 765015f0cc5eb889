use crate::color_ops::distance2;
use crate::{Color, PixelSource};

/// Replace every candidate with the nearest color that actually occurs in the image
///
/// Ties keep the first pixel in scan order. The result has the same length as
/// `candidates` and may contain duplicates. An empty image has nothing to snap
/// to and returns the candidates unchanged.
pub(crate) fn snap_to_image_colors<I: PixelSource>(image: &I, candidates: &[Color]) -> Vec<Color> {
    candidates
        .iter()
        .map(|&candidate| {
            let mut best: Option<(Color, u32)> = None;
            for (_, color) in image.scan() {
                let distance = distance2(candidate, color);
                if best.is_none_or(|(_, min)| distance < min) {
                    best = Some((color, distance));
                    if distance == 0 {
                        break;
                    }
                }
            }
            best.map_or(candidate, |(color, _)| color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb, RgbImage};

    use super::*;

    #[test]
    fn synthetic_colors_snap_to_nearest_pixel() {
        let image: RgbImage = ImageBuffer::from_fn(3, 1, |x, _| match x {
            0 => Rgb([0, 0, 0]),
            1 => Rgb([120, 120, 120]),
            _ => Rgb([255, 255, 255]),
        });
        let snapped = snap_to_image_colors(&image, &[Rgb([110, 130, 120]), Rgb([250, 240, 255])]);
        assert_eq!(snapped, vec![Rgb([120, 120, 120]), Rgb([255, 255, 255])]);
    }

    #[test]
    fn empty_image_keeps_every_candidate() {
        let image: RgbImage = ImageBuffer::new(0, 0);
        let candidates = [Rgb([1, 2, 3]), Rgb([4, 5, 6])];
        assert_eq!(snap_to_image_colors(&image, &candidates), candidates.to_vec());
    }

    #[test]
    fn ties_keep_first_pixel_and_duplicates_survive() {
        let image: RgbImage = ImageBuffer::from_fn(2, 1, |x, _| match x {
            0 => Rgb([10, 0, 0]),
            _ => Rgb([30, 0, 0]),
        });
        let snapped = snap_to_image_colors(&image, &[Rgb([20, 0, 0]), Rgb([21, 0, 0])]);
        assert_eq!(snapped, vec![Rgb([10, 0, 0]), Rgb([30, 0, 0])]);
        let snapped = snap_to_image_colors(&image, &[Rgb([0, 0, 0]), Rgb([5, 0, 0])]);
        assert_eq!(snapped, vec![Rgb([10, 0, 0]), Rgb([10, 0, 0])]);
    }
}
