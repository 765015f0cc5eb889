use itertools::Itertools; // for join() iterator function
use palette::{FromColor, Hsv, Srgb};

use crate::Color;

/// Squared euclidean distance between two colors in RGB space
pub fn distance2(a: Color, b: Color) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Convert from image::Rgb color to palette::Hsv color
pub fn to_hsv(color: Color) -> Hsv {
    let srgb: Srgb<f32> = Srgb::new(color[0], color[1], color[2]).into_format();
    Hsv::from_color(srgb)
}

/// Hue in degrees between 0 and 360, achromatic colors report 0
pub fn hue_degrees(color: Color) -> f32 {
    to_hsv(color).hue.into_positive_degrees()
}

/// HSV value (brightness) between 0 and 1
pub fn brightness(color: Color) -> f32 {
    to_hsv(color).value
}

/// Format color as hex #RRGGBB
pub fn to_hex(color: Color) -> String {
    format!(
        "#{}",
        color.0.iter().map(|c| format!("{:02X}", c)).join("")
    )
}
