// Archimedean spiral search for a free slot near the surface center.
// Collision checks are a linear scan over placed labels; at tens of labels
// that is cheaper than maintaining a grid.

use std::f32::consts::TAU;

use crate::config::LayoutConfig;

use super::{PlacedLabel, Rect, SurfaceBounds, TextSize};

const SPIRAL_START_RADIUS: f32 = 5.0;
const SPIRAL_RADIUS_STEP: f32 = 0.75;
const SPIRAL_ARM_SPACING: f32 = 10.0;

/// Start angle shared by every label in one layout.
///
/// All labels walk the same spiral. The placed set only grows, so once a box
/// fails to fit, no lighter label with an equal or smaller box can take a
/// slot it missed.
pub fn start_angle(config: &LayoutConfig) -> f32 {
    config.start_angle_offset.rem_euclid(TAU)
}

/// Candidate centers along an outward spiral, one per attempt.
#[derive(Debug, Clone)]
pub struct SpiralPath {
    center: (f32, f32),
    angle: f32,
    radius: f32,
    remaining: usize,
}

impl SpiralPath {
    pub fn new(center: (f32, f32), start_angle: f32, attempts: usize) -> Self {
        Self {
            center,
            angle: start_angle,
            radius: SPIRAL_START_RADIUS,
            remaining: attempts,
        }
    }
}

impl Iterator for SpiralPath {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Angular step shrinks as the radius grows to keep arm spacing even.
        self.angle += 1.0 / (self.radius / SPIRAL_ARM_SPACING);
        self.radius += SPIRAL_RADIUS_STEP;
        Some((
            self.center.0 + self.radius * self.angle.cos(),
            self.center.1 + self.radius * self.angle.sin(),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// First-fit search for a top-left position for `size`.
///
/// A candidate is accepted when its box, grown by `collision_buffer`, lies
/// inside the surface minus [`SURFACE_MARGIN`](super::SURFACE_MARGIN) and does
/// not intersect the grown box of any label in `placed`. Returns `None` once
/// `max_placement_attempts` candidates have been rejected.
pub fn try_place(
    size: TextSize,
    center: (f32, f32),
    placed: &[PlacedLabel],
    bounds: &SurfaceBounds,
    config: &LayoutConfig,
    start_angle: f32,
) -> Option<(f32, f32)> {
    try_place_counted(size, center, placed, bounds, config, start_angle).map(|(pos, _)| pos)
}

/// Like [`try_place`], also reporting the 1-based attempt that succeeded.
pub(super) fn try_place_counted(
    size: TextSize,
    center: (f32, f32),
    placed: &[PlacedLabel],
    bounds: &SurfaceBounds,
    config: &LayoutConfig,
    start_angle: f32,
) -> Option<((f32, f32), usize)> {
    let usable = bounds.usable();
    let buffer = config.collision_buffer;
    let grown = Rect::new(0.0, 0.0, size.width, size.height).inflate(buffer);
    // Fast reject: the buffered box cannot fit anywhere.
    if grown.width > usable.width || grown.height > usable.height {
        return None;
    }
    let occupied: Vec<Rect> = placed.iter().map(|p| p.rect().inflate(buffer)).collect();

    let path = SpiralPath::new(center, start_angle, config.max_placement_attempts);
    for (attempt, (cx, cy)) in path.enumerate() {
        let x = cx - size.width / 2.0;
        let y = cy - size.height / 2.0;
        let candidate = Rect::new(x, y, size.width, size.height).inflate(buffer);
        if !usable.contains_rect(&candidate) {
            continue;
        }
        if occupied.iter().any(|rect| rect.intersects(&candidate)) {
            continue;
        }
        return Some(((x, y), attempt + 1));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Color;

    fn placed_at(x: f32, y: f32, width: f32, height: f32) -> PlacedLabel {
        PlacedLabel {
            text: "x".to_string(),
            weight: 1.0,
            magnitude: 0.0,
            font_size: 16.0,
            x,
            y,
            width,
            height,
            color: Color {
                hue: 0,
                saturation: 65,
                lightness: 42,
            },
        }
    }

    #[test]
    fn spiral_moves_outward() {
        let points: Vec<(f32, f32)> = SpiralPath::new((0.0, 0.0), 0.0, 200).collect();
        assert_eq!(points.len(), 200);
        let dist = |p: &(f32, f32)| (p.0 * p.0 + p.1 * p.1).sqrt();
        assert!(dist(&points[0]) < dist(&points[199]));
        assert!((dist(&points[0]) - 5.75).abs() < 1e-4);
    }

    #[test]
    fn start_angle_wraps_offset_into_one_turn() {
        assert_eq!(start_angle(&LayoutConfig::default()), 0.0);
        for offset in [-7.0f32, -1.0, 0.5, 6.0, 13.0] {
            let config = LayoutConfig {
                start_angle_offset: offset,
                ..LayoutConfig::default()
            };
            let angle = start_angle(&config);
            assert!((0.0..TAU).contains(&angle), "{offset} -> {angle}");
            assert!((angle.cos() - offset.cos()).abs() < 1e-3);
            assert!((angle.sin() - offset.sin()).abs() < 1e-3);
        }
    }

    #[test]
    fn first_label_lands_near_center() {
        let bounds = SurfaceBounds::new(400.0, 400.0);
        let config = LayoutConfig::default();
        let (x, y) = try_place(
            TextSize::new(60.0, 20.0),
            bounds.center(),
            &[],
            &bounds,
            &config,
            0.0,
        )
        .unwrap();
        let cx = x + 30.0;
        let cy = y + 10.0;
        assert!((cx - 200.0).abs() < 10.0 && (cy - 200.0).abs() < 10.0);
    }

    #[test]
    fn avoids_placed_boxes_including_buffer() {
        let bounds = SurfaceBounds::new(400.0, 400.0);
        let config = LayoutConfig::default();
        let existing = placed_at(170.0, 190.0, 60.0, 20.0);
        let size = TextSize::new(60.0, 20.0);
        let (x, y) = try_place(
            size,
            bounds.center(),
            std::slice::from_ref(&existing),
            &bounds,
            &config,
            0.0,
        )
        .unwrap();
        let candidate = Rect::new(x, y, size.width, size.height).inflate(config.collision_buffer);
        let other = existing.rect().inflate(config.collision_buffer);
        assert!(!candidate.intersects(&other));
    }

    #[test]
    fn oversized_box_is_not_found() {
        let bounds = SurfaceBounds::new(100.0, 100.0);
        let config = LayoutConfig::default();
        let found = try_place(
            TextSize::new(500.0, 20.0),
            bounds.center(),
            &[],
            &bounds,
            &config,
            0.0,
        );
        assert!(found.is_none());
    }

    #[test]
    fn zero_attempt_budget_never_places() {
        let bounds = SurfaceBounds::new(400.0, 400.0);
        let config = LayoutConfig {
            max_placement_attempts: 0,
            ..LayoutConfig::default()
        };
        let found = try_place(
            TextSize::new(10.0, 10.0),
            bounds.center(),
            &[],
            &bounds,
            &config,
            0.0,
        );
        assert!(found.is_none());
    }

    #[test]
    fn counted_search_reports_attempt() {
        let bounds = SurfaceBounds::new(400.0, 400.0);
        let config = LayoutConfig::default();
        let (_, attempts) = try_place_counted(
            TextSize::new(10.0, 10.0),
            bounds.center(),
            &[],
            &bounds,
            &config,
            0.0,
        )
        .unwrap();
        assert_eq!(attempts, 1);
    }
}
