//! Forest plot SVG output.

use effsize_core::Session;
use effsize_model::{CalculatorOptions, PlotScale, RawRow};
use effsize_report::{SvgOptions, render_forest_svg, write_forest_svg};

fn session(options: CalculatorOptions) -> Session {
    let mut session = Session::new(options);
    session.add_or_replace_rows(vec![
        RawRow::new("## Cardiac", None::<f64>),
        RawRow::new("MI", 0.8).with_ci(0.6, 1.1),
        RawRow::new("Stroke", 1.5).with_ci(1.1, 2.0),
        RawRow::new("Death & disability", "n/a"),
    ]);
    session
}

fn options() -> CalculatorOptions {
    CalculatorOptions::default()
        .with_ci(true)
        .with_group_headers(true)
}

#[test]
fn svg_contains_labels_points_and_bars() {
    let calculation = session(options()).recalculate();
    let svg = render_forest_svg(&calculation.plot, &SvgOptions::default()).unwrap();

    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(svg.contains("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800.00\""));
    assert!(svg.contains(">Forest Plot of Effect Sizes</text>"));
    assert!(svg.contains(">Effect Size (Chinn 2000)</text>"));
    assert!(svg.contains("font-weight=\"bold\">Cardiac</text>"));
    assert!(svg.contains(">    MI</text>"));
    assert!(svg.contains(">    Death &amp; disability</text>"));

    assert_eq!(svg.matches("<rect class=\"point\"").count(), 2);
    // One horizontal line and two caps per error bar.
    assert_eq!(svg.matches("<line class=\"bar\"").count(), 6);
    assert_eq!(svg.matches("<line class=\"reference\"").count(), 1);
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn ratio_scale_changes_titles() {
    let calculation = session(options().with_scale(PlotScale::Ratio)).recalculate();
    let svg = render_forest_svg(&calculation.plot, &SvgOptions::default()).unwrap();
    assert!(svg.contains(">Forest Plot of Odds Ratios</text>"));
    assert!(svg.contains(">Odds Ratio</text>"));
    assert_eq!(svg.matches("<line class=\"reference\"").count(), 1);
}

#[test]
fn explicit_height_is_respected() {
    let calculation = session(options()).recalculate();
    let svg = render_forest_svg(
        &calculation.plot,
        &SvgOptions {
            width: 640,
            height: Some(300),
        },
    )
    .unwrap();
    assert!(svg.contains("viewBox=\"0 0 640.00 300.00\""));
}

#[test]
fn empty_plot_still_renders() {
    let calculation = Session::new(CalculatorOptions::default()).recalculate();
    let svg = render_forest_svg(&calculation.plot, &SvgOptions::default()).unwrap();
    assert!(svg.contains("<line class=\"axis\""));
    assert_eq!(svg.matches("<rect class=\"point\"").count(), 0);
}

#[test]
fn writes_file_and_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plots").join("forest.svg");
    let calculation = session(options()).recalculate();
    write_forest_svg(&path, &calculation.plot, &SvgOptions::default()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        render_forest_svg(&calculation.plot, &SvgOptions::default()).unwrap()
    );
}

#[test]
fn inverted_ci_keeps_the_point_inside_the_plot() {
    let mut session = Session::new(CalculatorOptions::default().with_ci(true));
    session.add_or_replace_rows(vec![RawRow::new("A", 1.5).with_ci(2.0, 1.0)]);
    let svg = render_forest_svg(&session.recalculate().plot, &SvgOptions::default()).unwrap();

    let (_, rest) = svg.split_once("<rect class=\"point\" x=\"").unwrap();
    let x: f64 = rest.split('"').next().unwrap().parse().unwrap();
    let center = x + 4.0;
    // Default width 800 leaves the plot area between 96 and 768.
    assert!((96.0..=768.0).contains(&center), "point at {center}");
}
