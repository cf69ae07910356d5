//! Integration tests for the forest plot layout.

use effsize_core::{
    ForestPlotLayout, OutcomeRecord, OutcomeTable, PlotPrimitive, PrimitiveKind, Session,
    effect_size,
};
use effsize_model::{CalculatorOptions, PlotScale, RatioKind, RawRow};

fn records(options: &CalculatorOptions, rows: Vec<RawRow>) -> Vec<OutcomeRecord> {
    let mut table = OutcomeTable::new(options);
    table.add_or_replace_rows(rows);
    table.compute_results()
}

fn error_bar(plot: &effsize_core::ForestPlot, slot: usize) -> Option<(f64, f64, f64)> {
    plot.primitives_at(slot).find_map(|p| match p {
        PlotPrimitive::ErrorBar {
            center,
            minus,
            plus,
            ..
        } => Some((*center, *minus, *plus)),
        _ => None,
    })
}

#[test]
fn slots_follow_input_order() {
    let options = CalculatorOptions::default();
    let plot = ForestPlotLayout::build(
        &records(
            &options,
            vec![RawRow::new("Stroke", 1.5), RawRow::new("MI", 0.8)],
        ),
        &options,
    );
    assert_eq!(plot.rows, 2);
    assert_eq!(plot.labels[0].text, "Stroke");
    assert_eq!(plot.labels[1].text, "MI");
    assert_eq!(
        plot.primitives,
        vec![
            PlotPrimitive::Point {
                slot: 0,
                x: effect_size(1.5)
            },
            PlotPrimitive::Point {
                slot: 1,
                x: effect_size(0.8)
            },
        ]
    );
    assert!(plot.y_inverted);
    assert_eq!(plot.y_range.min, -0.5);
    assert_eq!(plot.y_range.max, 1.5);
    assert_eq!(plot.reference_x, 0.0);
    assert_eq!(plot.x_range, None);
}

#[test]
fn inverted_ci_is_clamped_to_zero_width() {
    let options = CalculatorOptions::default().with_ci(true);
    // Effect of the point is below the effect of the lower bound.
    let rows = vec![RawRow::new("Odd", 1.2).with_ci(1.8, 2.5)];
    let plot = ForestPlotLayout::build(&records(&options, rows), &options);
    let (center, minus, plus) = error_bar(&plot, 0).unwrap();
    assert_eq!(center, effect_size(1.2));
    assert_eq!(minus, 0.0);
    assert!((plus - (effect_size(2.5) - effect_size(1.2))).abs() < 1e-12);
    assert!(plot.x_range.unwrap().contains(center));
}

#[test]
fn error_bar_widths_are_asymmetric() {
    let options = CalculatorOptions::default().with_ci(true);
    let rows = vec![RawRow::new("Stroke", 1.5).with_ci(1.1, 2.0)];
    let plot = ForestPlotLayout::build(&records(&options, rows), &options);
    let (center, minus, plus) = error_bar(&plot, 0).unwrap();
    assert_eq!(minus, center - effect_size(1.1));
    assert_eq!(plus, effect_size(2.0) - center);
}

#[test]
fn x_range_spans_ci_bounds_with_padding() {
    let options = CalculatorOptions::default()
        .with_ci(true)
        .with_axis_pad_percent(10.0);
    let rows = vec![
        RawRow::new("Stroke", 1.5).with_ci(1.1, 2.0),
        RawRow::new("MI", 0.8).with_ci(0.6, 1.1),
    ];
    let plot = ForestPlotLayout::build(&records(&options, rows), &options);
    let min = effect_size(0.6);
    let max = effect_size(2.0);
    let pad = (max - min) * 0.1;
    let range = plot.x_range.unwrap();
    assert!((range.min - (min - pad)).abs() < 1e-12);
    assert!((range.max - (max + pad)).abs() < 1e-12);
    assert_eq!(plot.count(PrimitiveKind::ErrorBar), 2);
}

#[test]
fn missing_and_zero_ratios_emit_no_point() {
    let options = CalculatorOptions::default().with_ci(true);
    let rows = vec![
        RawRow::new("Unreadable", "abc"),
        RawRow::new("Zero", 0.0).with_ci(0.0, 1.5),
        RawRow::new("Valid", 2.0),
    ];
    let plot = ForestPlotLayout::build(&records(&options, rows), &options);
    assert_eq!(plot.rows, 3);
    assert_eq!(plot.labels.len(), 3);
    assert_eq!(plot.count(PrimitiveKind::Point), 1);
    assert_eq!(plot.count(PrimitiveKind::ErrorBar), 0);
    assert_eq!(plot.primitives_at(2).count(), 1);
    // A zero lower bound is non-finite, so no range is derived from it.
    assert_eq!(plot.x_range, None);
}

#[test]
fn group_header_sets_indent_for_all_following_rows() {
    let options = CalculatorOptions::default().with_group_headers(true);
    let rows = vec![
        RawRow::new("Overall", 1.2),
        RawRow::new("## Cardiac", ""),
        RawRow::new("MI", 0.8),
        RawRow::new("## Neuro", 5.0),
        RawRow::new("Stroke", 1.5),
    ];
    let plot = ForestPlotLayout::build(&records(&options, rows), &options);
    let texts: Vec<&str> = plot.labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Overall", "Cardiac", "    MI", "Neuro", "    Stroke"]);
    assert!(plot.labels[1].bold);
    assert!(plot.labels[3].bold);
    assert!(!plot.labels[4].bold);
    assert_eq!(plot.count(PrimitiveKind::Header), 2);
    // Headers never draw points, even with a ratio.
    assert!(
        plot.primitives_at(3)
            .all(|p| p.kind() == PrimitiveKind::Header)
    );
    assert_eq!(plot.count(PrimitiveKind::Point), 3);
}

#[test]
fn marker_is_plain_text_without_group_feature() {
    let options = CalculatorOptions::default();
    let rows = vec![RawRow::new("## Cardiac", 2.0), RawRow::new("MI", 0.8)];
    let plot = ForestPlotLayout::build(&records(&options, rows), &options);
    assert_eq!(plot.labels[0].text, "## Cardiac");
    assert_eq!(plot.labels[1].text, "MI");
    assert_eq!(plot.count(PrimitiveKind::Header), 0);
    assert_eq!(plot.count(PrimitiveKind::Point), 2);
}

#[test]
fn ratio_scale_uses_untransformed_values() {
    let options = CalculatorOptions::default()
        .with_ci(true)
        .with_scale(PlotScale::Ratio)
        .with_ratio_kind(RatioKind::HazardRatio);
    let rows = vec![RawRow::new("Death", 0.7).with_ci(0.5, 0.9)];
    let plot = ForestPlotLayout::build(&records(&options, rows), &options);
    assert_eq!(plot.reference_x, 1.0);
    assert_eq!(plot.title, "Forest Plot of Hazard Ratios");
    assert_eq!(plot.x_label, "Hazard Ratio");
    let (center, minus, plus) = error_bar(&plot, 0).unwrap();
    assert_eq!(center, 0.7);
    assert!((minus - 0.2).abs() < 1e-12);
    assert!((plus - 0.2).abs() < 1e-12);
    let range = plot.x_range.unwrap();
    assert!((range.min - 0.46).abs() < 1e-12);
    assert!((range.max - 0.94).abs() < 1e-12);
}

#[test]
fn session_recalculates_from_current_rows() {
    let mut session = Session::new(CalculatorOptions::default().with_ci(true));
    session.add_or_replace_rows(vec![RawRow::new("Stroke", 1.5).with_ci(1.1, 2.0)]);
    let first = session.recalculate();
    assert_eq!(first.plot.count(PrimitiveKind::ErrorBar), 1);

    session.add_or_replace_rows(vec![RawRow::new("Stroke", 3.0)]);
    let second = session.recalculate();
    assert_eq!(second.records[0].ratio(), Some(3.0));
    assert_eq!(second.records[0].lower_ci_effect(), None);
    assert_eq!(second.plot.count(PrimitiveKind::ErrorBar), 0);
    assert_eq!(second, session.recalculate());
}

#[test]
fn inverted_ci_keeps_an_ordered_range_around_the_point() {
    let options = CalculatorOptions::default().with_ci(true);
    let plot = ForestPlotLayout::build(
        &records(&options, vec![RawRow::new("A", 1.5).with_ci(2.0, 1.0)]),
        &options,
    );
    let range = plot.x_range.unwrap();
    assert!(range.min < range.max);
    assert!(range.contains(effect_size(1.5)));
    assert!(range.contains(effect_size(2.0)));
    assert!(range.contains(0.0));
    let (center, minus, plus) = error_bar(&plot, 0).unwrap();
    assert_eq!(center, effect_size(1.5));
    assert_eq!(minus, 0.0);
    assert_eq!(plus, 0.0);
}

#[test]
fn vertical_padding_sets_slot_range() {
    let options = CalculatorOptions::default().with_vertical_padding(1.0);
    let plot = ForestPlotLayout::build(
        &records(
            &options,
            vec![
                RawRow::new("Stroke", 1.5),
                RawRow::new("MI", 0.8),
                RawRow::new("Death", 1.2),
            ],
        ),
        &options,
    );
    assert_eq!(plot.y_range.min, -1.0);
    assert_eq!(plot.y_range.max, 3.0);
}
