use std::fmt;

use serde::{Deserialize, Serialize};

/// Inner margin reserved on every edge of the surface.
pub const SURFACE_MARGIN: f32 = 10.0;

/// An item to lay out: `weight` drives size and priority, `magnitude`
/// (a percentage) drives color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedLabel {
    pub text: String,
    pub weight: f32,
    #[serde(default)]
    pub magnitude: f32,
}

impl WeightedLabel {
    pub fn new(text: impl Into<String>, weight: f32, magnitude: f32) -> Self {
        Self {
            text: text.into(),
            weight,
            magnitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBounds {
    pub width: f32,
    pub height: f32,
}

impl SurfaceBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// The area labels may occupy once the inner margin is removed.
    pub fn usable(&self) -> Rect {
        Rect::new(
            SURFACE_MARGIN,
            SURFACE_MARGIN,
            self.width - 2.0 * SURFACE_MARGIN,
            self.height - 2.0 * SURFACE_MARGIN,
        )
    }
}

/// Measured extent of a label at a given font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

impl TextSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn inflate(&self, pad: f32) -> Rect {
        Rect::new(
            self.x - pad,
            self.y - pad,
            self.width + pad * 2.0,
            self.height + pad * 2.0,
        )
    }

    /// Strict overlap: rectangles sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// HSL color emitted for each placed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedLabel {
    pub text: String,
    pub weight: f32,
    pub magnitude: f32,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl PlacedLabel {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub bounds: SurfaceBounds,
    pub placed: Vec<PlacedLabel>,
    pub dropped: Vec<WeightedLabel>,
}

impl LayoutResult {
    pub fn empty(bounds: SurfaceBounds) -> Self {
        Self {
            bounds,
            placed: Vec::new(),
            dropped: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}
