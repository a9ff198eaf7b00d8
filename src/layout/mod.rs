mod error;
mod scale;
mod spiral;
mod text;
pub(crate) mod types;

pub use error::{LayoutError, MetricsError};
pub use scale::{color_for, font_size_for};
pub use spiral::{SpiralPath, start_angle, try_place};
pub use text::{FontMetrics, HeuristicMetrics, TextMetrics};
pub use types::*;

pub(crate) use text::char_width_factor;

use crate::config::LayoutConfig;
use error::{validate_bounds, validate_config, validate_labels};
use std::cmp::Ordering;

/// Packs `labels` onto `bounds`, heaviest first.
///
/// Labels past `config.max_labels` (after sorting by weight) are ignored
/// entirely. Of the rest, each lands in either `placed` or `dropped`; a label
/// that cannot be fit within the attempt budget is dropped and the loop moves
/// on. Errors are reserved for invalid input and metrics failures.
pub fn compute_layout<M>(
    labels: &[WeightedLabel],
    bounds: SurfaceBounds,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<LayoutResult, LayoutError>
where
    M: TextMetrics + ?Sized,
{
    validate_config(config)?;
    validate_bounds(&bounds)?;
    validate_labels(labels)?;

    let span = tracing::debug_span!(
        "compute_layout",
        labels = labels.len(),
        width = bounds.width,
        height = bounds.height
    );
    let _enter = span.enter();

    let ranked = rank_labels(labels, config.max_labels);
    let mut result = LayoutResult::empty(bounds);
    if ranked.is_empty() {
        return Ok(result);
    }
    if bounds.is_degenerate() {
        tracing::debug!("zero-area surface, dropping every label");
        result.dropped = ranked.into_iter().cloned().collect();
        return Ok(result);
    }

    let max_weight = ranked.iter().map(|label| label.weight).fold(0.0f32, f32::max);
    let center = bounds.center();
    let angle = start_angle(config);

    for (idx, label) in ranked.into_iter().enumerate() {
        let font_size = font_size_for(label.weight, max_weight, config);
        let size = measure_checked(metrics, &label.text, font_size)?;
        match spiral::try_place_counted(size, center, &result.placed, &bounds, config, angle) {
            Some(((x, y), attempts)) => {
                tracing::trace!(text = %label.text, font_size, attempts, "placed label");
                result.placed.push(PlacedLabel {
                    text: label.text.clone(),
                    weight: label.weight,
                    magnitude: label.magnitude,
                    font_size,
                    x,
                    y,
                    width: size.width,
                    height: size.height,
                    color: color_for(label.magnitude, idx),
                });
            }
            None => {
                tracing::debug!(text = %label.text, font_size, "no free slot, dropping label");
                result.dropped.push(label.clone());
            }
        }
    }

    tracing::debug!(
        placed = result.placed.len(),
        dropped = result.dropped.len(),
        "layout complete"
    );
    Ok(result)
}

fn measure_checked<M>(metrics: &M, text: &str, font_size: f32) -> Result<TextSize, MetricsError>
where
    M: TextMetrics + ?Sized,
{
    let size = metrics.measure(text, font_size)?;
    let valid = |v: f32| v.is_finite() && v >= 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(size)
    } else {
        Err(MetricsError::new(
            text,
            font_size,
            format!(
                "measured box {}x{} is not a finite, non-negative size",
                size.width, size.height
            ),
        ))
    }
}

/// Stable sort by weight, heaviest first, then truncate.
fn rank_labels(labels: &[WeightedLabel], max_labels: usize) -> Vec<&WeightedLabel> {
    let mut ranked: Vec<&WeightedLabel> = labels.iter().collect();
    ranked.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
    ranked.truncate(max_labels);
    ranked
}
