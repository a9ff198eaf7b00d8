#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use layout::{
    Color, FontMetrics, HeuristicMetrics, LayoutError, LayoutResult, MetricsError, PlacedLabel,
    SurfaceBounds, TextMetrics, TextSize, WeightedLabel, compute_layout,
};
pub use parser::parse_labels;
pub use render::render_svg;
pub use theme::Theme;

/// Everything needed to go from a label list to an SVG in one call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    /// Measure with [`HeuristicMetrics`] instead of installed fonts.
    pub fast_text: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let config = Config::default();
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
            fast_text: false,
        }
    }
}

impl RenderOptions {
    pub fn light() -> Self {
        Self::default()
    }

    pub fn dark() -> Self {
        let theme = Theme::dark();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..RenderConfig::default()
        };
        Self {
            theme,
            render,
            ..Self::default()
        }
    }
}

/// Parses `input` (see [`parse_labels`]), lays it out on a surface of
/// `options.render` size and renders SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let labels = parse_labels(input)?;
    let result = layout_with_options(&labels, &options)?;
    Ok(render_svg(&result, &options.theme, &options.render))
}

pub fn layout_with_options(
    labels: &[WeightedLabel],
    options: &RenderOptions,
) -> Result<LayoutResult, LayoutError> {
    let bounds = SurfaceBounds::new(options.render.width, options.render.height);
    if options.fast_text {
        compute_layout(labels, bounds, &options.layout, &HeuristicMetrics::default())
    } else {
        let metrics = FontMetrics::new(options.theme.font_family.clone());
        compute_layout(labels, bounds, &options.layout, &metrics)
    }
}
