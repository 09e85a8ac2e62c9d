//! Two-panel PNG chart plus the printed summary.
//!
//! The left panel breaks down the 100-transaction verification benchmark
//! (total vs. per-transaction average), the right panel compares every other
//! benchmark as horizontal bars in microseconds.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle, TextStyle};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::options::ChartOptions;
use crate::schema::BenchmarkRecord;
use crate::summary::{Partition, PrimaryStats};

pub const NO_RESULTS_NOTICE: &str = "No valid results to graph";

const PRIMARY_TITLE: &str = "PQ Signature Verification: 100 Transactions";
const COMPARISON_TITLE: &str = "Benchmark Comparison";
const PRIMARY_CATEGORIES: [&str; 2] = ["Total (100 txs)", "Avg per tx"];

const BAR_HALF_WIDTH: f64 = 0.4;
const PANEL_MARGIN: u32 = 20;

type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Saved(PathBuf),
    /// Nothing was drawn and no file was written.
    NoResults,
}

/// Draw the chart for `records` to `output`, then print the summary.
pub fn render_report(
    records: &[BenchmarkRecord],
    output: &Path,
    opts: &ChartOptions,
) -> Result<RenderOutcome> {
    if records.is_empty() {
        println!("{NO_RESULTS_NOTICE}");
        return Ok(RenderOutcome::NoResults);
    }

    let partition = Partition::new(records);
    let (width, height) = opts.pixel_size();
    debug!("drawing {width}x{height} chart to {}", output.display());

    let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
    draw_panels(&root, &partition, opts).map_err(|e| ReportError::Draw {
        path: output.to_path_buf(),
        message: e.to_string(),
    })?;
    println!("Graph saved to {}", output.display());

    println!();
    println!("{partition}");

    Ok(RenderOutcome::Saved(output.to_path_buf()))
}

fn draw_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    partition: &Partition<'_>,
    opts: &ChartOptions,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let (left, right) = root.split_horizontally(width / 2);

    if let Some(stats) = partition.primary_stats() {
        draw_primary_panel(&left, &stats, opts)?;
    }
    if !partition.others.is_empty() {
        draw_comparison_panel(&right, &partition.others, opts)?;
    }

    root.present()
}

fn draw_primary_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    stats: &PrimaryStats,
    opts: &ChartOptions,
) -> DrawResult<DB> {
    let values = [stats.total_ms, stats.avg_per_tx_ms];
    let colors = [opts.total_color, opts.average_color];
    // Extra headroom keeps the value labels clear of the annotation box.
    let y_max = axis_limit(stats.total_ms.max(stats.avg_per_tx_ms), 1.35);

    let mut chart = ChartBuilder::on(area)
        .caption(PRIMARY_TITLE, font(opts, opts.title_font_pt, FontStyle::Bold))
        .margin(PANEL_MARGIN)
        .x_label_area_size(label_area(opts, 2.5))
        .y_label_area_size(label_area(opts, 6.0))
        .build_cartesian_2d(-0.5f64..1.5f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .max_light_lines(0)
        .bold_line_style(BLACK.mix(opts.grid_opacity).stroke_width(1))
        .x_labels(PRIMARY_CATEGORIES.len())
        .x_label_formatter(&|x| category_label(&PRIMARY_CATEGORIES, *x))
        .y_desc("Time (milliseconds)")
        .label_style(font(opts, opts.axis_font_pt, FontStyle::Normal))
        .axis_desc_style(font(opts, opts.axis_font_pt, FontStyle::Normal))
        .draw()?;

    chart.draw_series(values.iter().zip(colors).enumerate().map(|(i, (&v, color))| {
        let x = i as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, v)],
            color.mix(opts.bar_opacity).filled(),
        )
    }))?;

    let value_style = TextStyle::from(font(opts, opts.value_font_pt, FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
        Text::new(format!("{v:.3} ms"), (i as f64, v), value_style.clone())
    }))?;

    // Boxed note near the top of the plot, in pixel coordinates.
    let note = format!(
        "Average verify time: {:.2} μs per transaction",
        stats.avg_per_tx_us
    );
    let note_style = TextStyle::from(font(opts, opts.annotation_font_pt, FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Top));
    let plot = chart.plotting_area().strip_coord_spec();
    let (plot_w, plot_h) = plot.dim_in_pixel();
    let (text_w, text_h) = plot.estimate_text_size(&note, &note_style)?;

    let pad = (text_h / 2) as i32;
    let center = (plot_w / 2) as i32;
    let top = (f64::from(plot_h) * 0.05) as i32;
    let half = (text_w / 2) as i32;
    let corners = [
        (center - half - pad, top),
        (center + half + pad, top + text_h as i32 + 2 * pad),
    ];

    plot.draw(&Rectangle::new(
        corners,
        opts.annotation_fill.mix(opts.annotation_opacity).filled(),
    ))?;
    plot.draw(&Rectangle::new(corners, BLACK.mix(0.5).stroke_width(1)))?;
    plot.draw(&Text::new(note.as_str(), (center, top + pad), note_style))?;

    Ok(())
}

fn draw_comparison_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    others: &[&BenchmarkRecord],
    opts: &ChartOptions,
) -> DrawResult<DB> {
    let names: Vec<&str> = others.iter().map(|r| r.display_name()).collect();
    let times: Vec<f64> = others.iter().map(|r| r.real_time_us).collect();
    // Room to the right of the longest bar for its value label.
    let x_max = axis_limit(times.iter().copied().fold(0.0, f64::max), 1.3);
    let longest = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(area)
        .caption(COMPARISON_TITLE, font(opts, opts.title_font_pt, FontStyle::Normal))
        .margin(PANEL_MARGIN)
        .x_label_area_size(label_area(opts, 2.5))
        .y_label_area_size(label_area(opts, longest as f64 * 0.6 + 1.0))
        .build_cartesian_2d(0f64..x_max, -0.5f64..(names.len() as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .max_light_lines(0)
        .bold_line_style(BLACK.mix(opts.grid_opacity).stroke_width(1))
        .y_labels(names.len())
        .y_label_formatter(&|y| category_label(&names, *y))
        .x_desc("Time (microseconds)")
        .label_style(font(opts, opts.axis_font_pt, FontStyle::Normal))
        .axis_desc_style(font(opts, opts.axis_font_pt, FontStyle::Normal))
        .draw()?;

    let bar_style = opts.comparison_color.mix(opts.bar_opacity).filled();
    chart.draw_series(times.iter().enumerate().map(|(i, &t)| {
        let y = i as f64;
        Rectangle::new([(0.0, y - BAR_HALF_WIDTH), (t, y + BAR_HALF_WIDTH)], bar_style)
    }))?;

    let value_style = TextStyle::from(font(opts, opts.value_font_pt, FontStyle::Normal))
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(times.iter().enumerate().map(|(i, &t)| {
        Text::new(format!(" {t:.2} μs"), (t, i as f64), value_style.clone())
    }))?;

    Ok(())
}

fn font(opts: &ChartOptions, points: f64, style: FontStyle) -> FontDesc<'static> {
    FontDesc::new(FontFamily::from(opts.font_family), opts.font_px(points), style)
}

/// Label area size in pixels, given in multiples of the axis font size.
fn label_area(opts: &ChartOptions, em: f64) -> u32 {
    (opts.font_px(opts.axis_font_pt) * em).ceil() as u32
}

/// Upper axis bound for data peaking at `max`. Degenerate data gets a unit axis.
fn axis_limit(max: f64, headroom: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * headroom
    } else {
        1.0
    }
}

/// Tick label for bar `position`; blank between bars.
fn category_label(labels: &[&str], position: f64) -> String {
    let idx = position.round();
    if idx < 0.0 || (position - idx).abs() > 0.3 {
        return String::new();
    }
    labels
        .get(idx as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str, iterations: u64, real_time_us: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            name: name.to_string(),
            iterations,
            real_time_us,
            cpu_time_us: real_time_us,
            items_per_second: 0.0,
        }
    }

    fn render_to_tempdir(records: &[BenchmarkRecord]) -> (tempfile::TempDir, PathBuf, RenderOutcome) {
        let dir = tempdir().unwrap();
        let output = dir.path().join("benchmark_graph.png");
        let outcome = render_report(records, &output, &ChartOptions::default()).unwrap();
        (dir, output, outcome)
    }

    #[test]
    fn test_render_writes_png() {
        let records = vec![
            record("BM_Verify100PQSignedTransactions/iterations:10", 10, 250_000.0),
            record("BM_EncodeTransaction", 1000, 2.0),
        ];

        let (_dir, output, outcome) = render_to_tempdir(&records);

        assert_eq!(outcome, RenderOutcome::Saved(output.clone()));
        assert!(output.exists());
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_render_primary_only() {
        let records = vec![record("BM_Verify100Transactions", 10, 250_000.0)];

        let (_dir, output, outcome) = render_to_tempdir(&records);

        assert_eq!(outcome, RenderOutcome::Saved(output.clone()));
        assert!(output.exists());
    }

    #[test]
    fn test_render_others_only() {
        let records = vec![
            record("BM_EncodeTransaction", 1000, 2.0),
            record("BM_DecodeTransaction", 1000, 3.5),
            record("BM_VerifySingleTransaction", 283, 2480.55),
        ];

        let (_dir, output, outcome) = render_to_tempdir(&records);

        assert_eq!(outcome, RenderOutcome::Saved(output.clone()));
        assert!(output.exists());
    }

    #[test]
    fn test_no_records_writes_nothing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("benchmark_graph.png");

        let outcome = render_report(&[], &output, &ChartOptions::default()).unwrap();

        assert_eq!(outcome, RenderOutcome::NoResults);
        assert!(!output.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_category_label_snaps_to_bars() {
        let labels = ["Total (100 txs)", "Avg per tx"];
        assert_eq!(category_label(&labels, 0.0), "Total (100 txs)");
        assert_eq!(category_label(&labels, 1.04), "Avg per tx");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 2.0), "");
    }

    #[test]
    fn test_axis_limit_handles_degenerate_data() {
        assert_eq!(axis_limit(200.0, 1.5), 300.0);
        assert_eq!(axis_limit(0.0, 1.5), 1.0);
        assert_eq!(axis_limit(-3.0, 1.5), 1.0);
        assert_eq!(axis_limit(f64::NAN, 1.5), 1.0);
        assert_eq!(axis_limit(f64::INFINITY, 1.5), 1.0);
    }

    #[test]
    fn test_label_area_scales_with_dpi() {
        let low = ChartOptions {
            dpi: 72,
            ..Default::default()
        };
        assert_eq!(label_area(&low, 2.0), 20);
        assert_eq!(label_area(&ChartOptions::default(), 2.0), 42);
    }
}
