use serde::Deserialize;
use wasm_bindgen::prelude::*;
use word_cloud_packer::layout_dump::LayoutDump;
use word_cloud_packer::{RenderOptions, layout_with_options, parse_labels, render_with_options};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CloudRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
    max_labels: Option<usize>,
    fast_text: Option<bool>,
    show_overflow_note: Option<bool>,
}

fn build_render_options(options: CloudRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("dark") {
        RenderOptions::dark()
    } else {
        RenderOptions::light()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }
    if let Some(max_labels) = options.max_labels {
        render_options.layout.max_labels = max_labels;
    }
    if let Some(show) = options.show_overflow_note {
        render_options.render.show_overflow_note = show;
    }
    // Browsers rarely expose system fonts to WASM; default to the heuristic.
    render_options.fast_text = options.fast_text.unwrap_or(true);

    render_options
}

fn parse_options(options_json: Option<String>) -> Result<CloudRenderOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str::<CloudRenderOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(CloudRenderOptions::default()),
    }
}

#[wasm_bindgen]
pub fn render_word_cloud_svg(labels: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let render_options = build_render_options(parse_options(options_json)?);
    render_with_options(labels, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Layout only, as the JSON dump consumed by custom renderers.
#[wasm_bindgen]
pub fn layout_word_cloud_json(labels: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let render_options = build_render_options(parse_options(options_json)?);
    let labels = parse_labels(labels).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let result = layout_with_options(&labels, &render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    serde_json::to_string(&LayoutDump::from_result(&result))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
