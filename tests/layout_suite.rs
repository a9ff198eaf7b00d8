use word_cloud_packer::layout::SURFACE_MARGIN;
use word_cloud_packer::{
    HeuristicMetrics, LayoutConfig, LayoutResult, MetricsError, RenderOptions, SurfaceBounds,
    TextSize, WeightedLabel, compute_layout, render_with_options,
};

fn assert_no_overlap(result: &LayoutResult, buffer: f32) {
    for (i, a) in result.placed.iter().enumerate() {
        for b in &result.placed[i + 1..] {
            let ra = a.rect().inflate(buffer);
            let rb = b.rect().inflate(buffer);
            assert!(!ra.intersects(&rb), "{:?} overlaps {:?}", a.text, b.text);
        }
    }
}

fn assert_contained(result: &LayoutResult, buffer: f32) {
    let usable = result.bounds.usable();
    for label in &result.placed {
        assert!(
            usable.contains_rect(&label.rect().inflate(buffer)),
            "{:?} escapes the usable area",
            label.text
        );
    }
}

fn words(items: &[(&str, f32)]) -> Vec<WeightedLabel> {
    items
        .iter()
        .enumerate()
        .map(|(idx, (text, weight))| WeightedLabel::new(*text, *weight, (idx * 13 % 100) as f32))
        .collect()
}

#[test]
fn three_labels_fit_with_alpha_largest() {
    let labels = words(&[("alpha", 10.0), ("beta", 5.0), ("gamma", 1.0)]);
    let config = LayoutConfig::default();
    let result = compute_layout(
        &labels,
        SurfaceBounds::new(400.0, 400.0),
        &config,
        &HeuristicMetrics::default(),
    )
    .expect("layout should succeed");

    assert_eq!(result.placed.len(), 3);
    assert!(result.dropped.is_empty());
    let alpha = result
        .placed
        .iter()
        .find(|label| label.text == "alpha")
        .expect("alpha placed");
    assert_eq!(alpha.font_size, 48.0);
    for label in &result.placed {
        assert!(label.font_size <= alpha.font_size);
    }
    assert_no_overlap(&result, config.collision_buffer);
    assert_contained(&result, config.collision_buffer);
}

#[test]
fn labels_past_max_labels_are_never_considered() {
    let labels = words(&[("gamma", 1.0), ("alpha", 10.0), ("beta", 5.0)]);
    let config = LayoutConfig {
        max_labels: 2,
        ..LayoutConfig::default()
    };
    let result = compute_layout(
        &labels,
        SurfaceBounds::new(400.0, 400.0),
        &config,
        &HeuristicMetrics::default(),
    )
    .unwrap();

    assert_eq!(result.placed.len() + result.dropped.len(), 2);
    assert!(result.placed.iter().all(|label| label.text != "gamma"));
    assert!(result.dropped.iter().all(|label| label.text != "gamma"));
}

#[test]
fn oversized_label_is_dropped() {
    let labels = vec![WeightedLabel::new("huge", 1.0, 0.0)];
    let metrics =
        |_: &str, _: f32| -> Result<TextSize, MetricsError> { Ok(TextSize::new(1000.0, 1000.0)) };
    let result = compute_layout(
        &labels,
        SurfaceBounds::new(300.0, 300.0),
        &LayoutConfig::default(),
        &metrics,
    )
    .unwrap();
    assert!(result.placed.is_empty());
    assert_eq!(result.dropped, labels);
}

#[test]
fn crowded_surface_drops_lightest_first() {
    // Every label is the same 100x40 box; only a handful fit on 260x200.
    let labels: Vec<WeightedLabel> = (0..12)
        .map(|idx| WeightedLabel::new(format!("w{idx}"), (12 - idx) as f32, 0.0))
        .collect();
    let metrics =
        |_: &str, _: f32| -> Result<TextSize, MetricsError> { Ok(TextSize::new(100.0, 40.0)) };
    let config = LayoutConfig::default();
    let result = compute_layout(&labels, SurfaceBounds::new(260.0, 200.0), &config, &metrics)
        .unwrap();

    assert!(!result.placed.is_empty());
    assert!(!result.dropped.is_empty());
    assert_eq!(result.placed.len() + result.dropped.len(), 12);
    // The heaviest label always gets the first pick.
    assert_eq!(result.placed[0].text, "w0");
    assert_no_overlap(&result, config.collision_buffer);
    assert_contained(&result, config.collision_buffer);
}

#[test]
fn equal_boxes_are_never_placed_out_of_priority_order() {
    let labels: Vec<WeightedLabel> = (0..20)
        .map(|idx| WeightedLabel::new(format!("w{idx}"), (20 - idx) as f32, 0.0))
        .collect();
    let metrics =
        |_: &str, _: f32| -> Result<TextSize, MetricsError> { Ok(TextSize::new(60.0, 24.0)) };
    let config = LayoutConfig::default();
    for width in (100..=400).step_by(7) {
        for height in (80..=300).step_by(11) {
            let bounds = SurfaceBounds::new(width as f32, height as f32);
            let result = compute_layout(&labels, bounds, &config, &metrics).unwrap();
            // Placed must be a prefix of the ranked order, dropped the rest.
            let placed: Vec<&str> = result.placed.iter().map(|l| l.text.as_str()).collect();
            let expected: Vec<String> =
                (0..placed.len()).map(|idx| format!("w{idx}")).collect();
            assert_eq!(placed, expected, "{width}x{height}");
            assert_eq!(result.dropped, labels[placed.len()..], "{width}x{height}");
        }
    }
}

#[test]
fn margin_is_respected_on_small_surface() {
    let labels = words(&[("ok", 1.0)]);
    let result = compute_layout(
        &labels,
        SurfaceBounds::new(160.0, 120.0),
        &LayoutConfig::default(),
        &HeuristicMetrics::default(),
    )
    .unwrap();
    assert_eq!(result.placed.len(), 1);
    for label in &result.placed {
        assert!(label.x >= SURFACE_MARGIN);
        assert!(label.y >= SURFACE_MARGIN);
        assert!(label.x + label.width <= 160.0 - SURFACE_MARGIN);
        assert!(label.y + label.height <= 120.0 - SURFACE_MARGIN);
    }
}

#[test]
fn start_angle_offset_changes_positions_but_not_membership() {
    let labels = words(&[("alpha", 10.0), ("beta", 5.0), ("gamma", 1.0)]);
    let bounds = SurfaceBounds::new(400.0, 400.0);
    let metrics = HeuristicMetrics::default();
    let base = compute_layout(&labels, bounds, &LayoutConfig::default(), &metrics).unwrap();
    let rotated = compute_layout(
        &labels,
        bounds,
        &LayoutConfig {
            start_angle_offset: 1.0,
            ..LayoutConfig::default()
        },
        &metrics,
    )
    .unwrap();
    assert_eq!(base.placed.len(), rotated.placed.len());
    assert_ne!(
        (base.placed[0].x, base.placed[0].y),
        (rotated.placed[0].x, rotated.placed[0].y)
    );
}

#[test]
fn render_with_options_produces_svg() {
    let options = RenderOptions {
        fast_text: true,
        ..RenderOptions::default()
    };
    let svg = render_with_options("alpha 10 20\nbeta 5 60\ngamma 1 90\n", options)
        .expect("render should succeed");
    assert!(svg.contains("<svg"));
    assert!(svg.contains(">alpha</text>"));
    assert!(svg.contains(">gamma</text>"));
}

#[test]
fn render_with_options_reports_bad_input() {
    let options = RenderOptions {
        fast_text: true,
        ..RenderOptions::default()
    };
    let err = render_with_options("alpha 10 250\n", options).unwrap_err();
    assert!(err.to_string().contains("magnitude"), "{err}");
}
