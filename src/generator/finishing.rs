use itertools::Itertools; // for position_min_by() and sorted_by() iterator functions

use crate::Color;
use crate::color_ops::{brightness, hue_degrees};

/// Remove the color with the lowest HSV value, the first one on ties
pub(crate) fn remove_darkest(colors: &mut Vec<Color>) -> Option<Color> {
    let index = colors
        .iter()
        .map(|&color| brightness(color))
        .position_min_by(|a, b| a.total_cmp(b))?;
    Some(colors.remove(index))
}

/// Stable sort by HSV hue, saturation and value are ignored
pub(crate) fn sort_by_hue(colors: Vec<Color>) -> Vec<Color> {
    colors
        .into_iter()
        .map(|color| (hue_degrees(color), color))
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, color)| color)
        .collect()
}
