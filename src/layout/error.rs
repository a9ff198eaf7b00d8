use thiserror::Error;

use crate::config::LayoutConfig;

use super::{SurfaceBounds, WeightedLabel};

/// Raised by a [`TextMetrics`](super::TextMetrics) implementation that cannot
/// measure a label.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to measure {text:?} at {font_size}px: {message}")]
pub struct MetricsError {
    pub text: String,
    pub font_size: f32,
    pub message: String,
}

impl MetricsError {
    pub fn new(text: &str, font_size: f32, message: impl Into<String>) -> Self {
        Self {
            text: text.to_string(),
            font_size,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("label #{index} has empty text")]
    EmptyText { index: usize },
    #[error("label {text:?} has invalid weight {weight} (must be finite and >= 0)")]
    InvalidWeight { text: String, weight: f32 },
    #[error("label {text:?} has invalid magnitude {magnitude} (must be within 0..=100)")]
    InvalidMagnitude { text: String, magnitude: f32 },
    #[error("invalid surface {width}x{height} (dimensions must be finite and >= 0)")]
    InvalidSurface { width: f32, height: f32 },
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

pub(super) fn validate_config(config: &LayoutConfig) -> Result<(), LayoutError> {
    if !config.min_font_size.is_finite() || config.min_font_size <= 0.0 {
        return Err(LayoutError::InvalidConfig(format!(
            "minFontSize must be positive, got {}",
            config.min_font_size
        )));
    }
    if !config.max_font_size.is_finite() || config.max_font_size < config.min_font_size {
        return Err(LayoutError::InvalidConfig(format!(
            "maxFontSize ({}) must not be below minFontSize ({})",
            config.max_font_size, config.min_font_size
        )));
    }
    if !config.collision_buffer.is_finite() || config.collision_buffer < 0.0 {
        return Err(LayoutError::InvalidConfig(format!(
            "collisionBuffer must be >= 0, got {}",
            config.collision_buffer
        )));
    }
    if !config.start_angle_offset.is_finite() {
        return Err(LayoutError::InvalidConfig(
            "startAngleOffset must be finite".to_string(),
        ));
    }
    Ok(())
}

pub(super) fn validate_bounds(bounds: &SurfaceBounds) -> Result<(), LayoutError> {
    let ok = |v: f32| v.is_finite() && v >= 0.0;
    if ok(bounds.width) && ok(bounds.height) {
        Ok(())
    } else {
        Err(LayoutError::InvalidSurface {
            width: bounds.width,
            height: bounds.height,
        })
    }
}

pub(super) fn validate_labels(labels: &[WeightedLabel]) -> Result<(), LayoutError> {
    for (index, label) in labels.iter().enumerate() {
        if label.text.is_empty() {
            return Err(LayoutError::EmptyText { index });
        }
        if !label.weight.is_finite() || label.weight < 0.0 {
            return Err(LayoutError::InvalidWeight {
                text: label.text.clone(),
                weight: label.weight,
            });
        }
        if !label.magnitude.is_finite() || !(0.0..=100.0).contains(&label.magnitude) {
            return Err(LayoutError::InvalidMagnitude {
                text: label.text.clone(),
                magnitude: label.magnitude,
            });
        }
    }
    Ok(())
}
