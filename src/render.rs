use crate::config::RenderConfig;
use crate::layout::{LayoutResult, SURFACE_MARGIN};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

// Fraction of the measured box height above the text baseline.
const BASELINE_RATIO: f32 = 0.8;

pub fn render_svg(result: &LayoutResult, theme: &Theme, config: &RenderConfig) -> String {
    let width = result.bounds.width.max(1.0);
    let height = result.bounds.height.max(1.0);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));

    for label in &result.placed {
        let baseline = label.y + label.height * BASELINE_RATIO;
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-weight=\"{}\" font-size=\"{:.2}\" fill=\"{}\">{}</text>",
            label.x,
            baseline,
            escape_xml(&theme.font_family),
            theme.font_weight,
            label.font_size,
            label.color,
            escape_xml(&label.text)
        ));
    }

    if config.show_overflow_note && !result.dropped.is_empty() {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            width - SURFACE_MARGIN,
            height - SURFACE_MARGIN / 2.0,
            escape_xml(&theme.font_family),
            theme.note_font_size,
            theme.note_color,
            overflow_note(result.dropped.len())
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn overflow_note(count: usize) -> String {
    format!("{count} more not shown")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
