use crate::config::LayoutConfig;

use super::Color;

const BASE_SATURATION: u8 = 65;
const BASE_LIGHTNESS: u8 = 42;

/// Font size from weight, square-root scaled so heavy labels grow
/// sub-linearly. Always within `[min_font_size, max_font_size]`.
pub fn font_size_for(weight: f32, max_weight_in_set: f32, config: &LayoutConfig) -> f32 {
    let span = config.max_font_size - config.min_font_size;
    if max_weight_in_set <= 0.0 {
        return config.min_font_size;
    }
    let ratio = (weight / max_weight_in_set).clamp(0.0, 1.0);
    (config.min_font_size + ratio.sqrt() * span).clamp(config.min_font_size, config.max_font_size)
}

/// Hue follows magnitude; the ordinal index only nudges saturation and
/// lightness so neighbours with the same magnitude stay distinguishable.
pub fn color_for(magnitude: f32, ordinal_index: usize) -> Color {
    // Percent to degrees; multiply first so whole percentages stay exact.
    let hue = ((magnitude * 360.0 / 100.0).floor() as i64).rem_euclid(360) as u16;
    Color {
        hue,
        saturation: BASE_SATURATION + 5 * (ordinal_index % 4) as u8,
        lightness: BASE_LIGHTNESS + 4 * (ordinal_index % 3) as u8,
    }
}
