use std::fs;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use effsize_cli::output::ignore_broken_pipe;
use effsize_cli::pipeline::{OptionOverrides, convert_values, load_options, load_session};
use effsize_core::PrimitiveKind;
use effsize_model::{MAX_DECIMALS, PlotScale, RatioKind};
use effsize_report::{SvgOptions, TableFormat, render_plot_json, write_forest_svg};

use crate::cli::{
    CalculatorArgs, ConvertArgs, PlotArgs, RatioKindArg, ScaleArg, TableArgs, TableFormatArg,
};
use crate::summary::print_conversions;
use crate::types::{PlotRun, TableRun};

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let converted = convert_values(&args.values, args.inverse);
    ignore_broken_pipe(print_conversions(
        &converted,
        ratio_kind(args.kind),
        args.inverse,
        args.decimals.min(MAX_DECIMALS),
    ))
    .context("write conversions")
}

pub fn run_table(args: &TableArgs) -> Result<TableRun> {
    let _span = info_span!("table", input = %args.input.display()).entered();
    let options = load_options(&overrides(&args.calculator))?;
    let session = load_session(&args.input, options)?;
    let calculation = session.recalculate();
    let rendered = table_format(args.format).render(&calculation.records, session.options())?;
    if let Some(path) = &args.output {
        fs::write(path, &rendered).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), rows = calculation.records.len(), "result table written");
    }
    Ok(TableRun {
        input: args.input.clone(),
        records: calculation.records.len(),
        rendered,
        output: args.output.clone(),
    })
}

pub fn run_plot(args: &PlotArgs) -> Result<PlotRun> {
    let _span = info_span!("plot", input = %args.input.display()).entered();
    let mut overrides = overrides(&args.calculator);
    overrides.scale = args.scale.map(plot_scale);
    overrides.axis_pad_percent = args.pad;
    let options = load_options(&overrides)?;
    let session = load_session(&args.input, options)?;
    let plot = session.recalculate().plot;

    let svg_options = SvgOptions {
        width: args.width,
        height: args.height,
    };
    write_forest_svg(&args.output, &plot, &svg_options)
        .with_context(|| format!("write plot {}", args.output.display()))?;
    if let Some(path) = &args.layout_json {
        let json = render_plot_json(&plot)?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "plot layout written");
    }

    Ok(PlotRun {
        input: args.input.clone(),
        output: args.output.clone(),
        layout_json: args.layout_json.clone(),
        scale: plot.scale,
        rows: plot.rows,
        headers: plot.count(PrimitiveKind::Header),
        points: plot.count(PrimitiveKind::Point),
        error_bars: plot.count(PrimitiveKind::ErrorBar),
        x_range: plot.x_range,
    })
}

fn overrides(args: &CalculatorArgs) -> OptionOverrides {
    OptionOverrides {
        options_file: args.options.clone(),
        ratio_kind: args.kind.map(ratio_kind),
        include_ci: args.ci,
        include_p_value: args.p_value,
        group_headers: args.groups,
        group_marker: args.group_marker.clone(),
        decimals: args.decimals,
        ..OptionOverrides::default()
    }
}

fn ratio_kind(arg: RatioKindArg) -> RatioKind {
    match arg {
        RatioKindArg::Rr => RatioKind::RiskRatio,
        RatioKindArg::Or => RatioKind::OddsRatio,
        RatioKindArg::Hr => RatioKind::HazardRatio,
    }
}

fn plot_scale(arg: ScaleArg) -> PlotScale {
    match arg {
        ScaleArg::Effect => PlotScale::EffectSize,
        ScaleArg::Ratio => PlotScale::Ratio,
    }
}

fn table_format(arg: TableFormatArg) -> TableFormat {
    match arg {
        TableFormatArg::Plain => TableFormat::Plain,
        TableFormatArg::Markdown => TableFormat::Markdown,
        TableFormatArg::Html => TableFormat::Html,
        TableFormatArg::Csv => TableFormat::Csv,
        TableFormatArg::Json => TableFormat::Json,
    }
}
