//! Canvas-backed chart sinks.
//!
//! One sink per named charting surface: the four telemetry metrics and the
//! grayscale processing histogram. `update` replaces the drawn data
//! wholesale from a [`ChartDataset`]; repeated calls are last-write-wins.

use dashboard_shared::ChartDataset;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FALLBACK_COLOR: &str = "#00aa00";
const AXIS_COLOR: &str = "#666666";

const XYZ_COLORS: &[(&str, &str)] = &[("x", "#dc3545"), ("y", "#1e7e34"), ("z", "#0062cc")];
const DEGREES_COLORS: &[(&str, &str)] = &[("degrees", "#d39e00")];

/// Static description of one telemetry chart.
pub struct ChartSpec {
    pub metric: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    colors: &'static [(&'static str, &'static str)],
}

impl ChartSpec {
    pub fn canvas_id(&self) -> String {
        format!("chart-{}", self.metric)
    }

    pub fn sink(&self) -> ChartSink {
        ChartSink {
            canvas_id: self.canvas_id(),
            unit: self.unit,
            colors: self.colors,
        }
    }
}

/// The metric charts on the monitoring panel, with the per-series line
/// colors the original dashboard used.
pub const METRIC_CHARTS: &[ChartSpec] = &[
    ChartSpec {
        metric: "cpu-temp",
        title: "CPU Temp",
        unit: "°",
        colors: DEGREES_COLORS,
    },
    ChartSpec {
        metric: "camera-temp",
        title: "Camera Temp",
        unit: "°",
        colors: DEGREES_COLORS,
    },
    ChartSpec {
        metric: "magnetometer",
        title: "Magnetometer",
        unit: " μT",
        colors: XYZ_COLORS,
    },
    ChartSpec {
        metric: "accelerometer",
        title: "Accelerometer",
        unit: " m/s²",
        colors: XYZ_COLORS,
    },
];

/// A named canvas surface a dataset can be pushed to.
pub struct ChartSink {
    canvas_id: String,
    unit: &'static str,
    colors: &'static [(&'static str, &'static str)],
}

impl ChartSink {
    /// Sink for a telemetry metric, if it is one of the known charts.
    pub fn for_metric(metric: &str) -> Option<ChartSink> {
        METRIC_CHARTS
            .iter()
            .find(|spec| spec.metric == metric)
            .map(ChartSpec::sink)
    }

    /// Sink for the 256-bin grayscale processing histogram.
    pub fn histogram() -> ChartSink {
        ChartSink {
            canvas_id: "chart-histogram".to_string(),
            unit: " px",
            colors: &[("pixels", "#0062cc")],
        }
    }

    fn color_for(&self, key: &str) -> &'static str {
        self.colors
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, color)| *color)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Redraw the canvas from `dataset`. Never blocks and has no failure
    /// mode the caller can act on; a missing canvas is silently skipped.
    pub fn update(&self, dataset: &ChartDataset) {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };

        let canvas = match document.get_element_by_id(&self.canvas_id) {
            Some(el) => match el.dyn_into::<HtmlCanvasElement>() {
                Ok(c) => c,
                Err(_) => return,
            },
            None => return,
        };

        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(c) => c,
                Err(_) => return,
            },
            _ => return,
        };

        let width = canvas.width() as f64;
        let height = canvas.height() as f64;

        ctx.set_fill_style_str("#000000");
        ctx.fill_rect(0.0, 0.0, width, height);

        if dataset.is_empty() {
            ctx.set_fill_style_str(AXIS_COLOR);
            ctx.set_font("10px 'Courier New'");
            let _ = ctx.fill_text("no data", width / 2.0 - 20.0, height / 2.0);
            return;
        }

        let (min, max) = value_range(dataset);
        let span = if max > min { max - min } else { 1.0 };
        let points = dataset.labels.len();

        for (key, values) in &dataset.series {
            ctx.set_stroke_style_str(self.color_for(key));
            ctx.set_line_width(2.0);
            ctx.begin_path();
            for (i, value) in values.iter().enumerate() {
                let x = if points > 1 {
                    i as f64 / (points - 1) as f64 * width
                } else {
                    width / 2.0
                };
                let y = height - ((value - min) / span) * (height - 14.0) - 4.0;
                if i == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();
        }

        // Legend: latest value per series, in the series color.
        ctx.set_font("10px 'Courier New'");
        let mut legend_y = 10.0;
        for (key, values) in &dataset.series {
            if let Some(last) = values.last() {
                ctx.set_fill_style_str(self.color_for(key));
                let _ = ctx.fill_text(&format!("{key}: {last:.1}{}", self.unit), 4.0, legend_y);
                legend_y += 11.0;
            }
        }

        // Time axis: first and last label.
        ctx.set_fill_style_str(AXIS_COLOR);
        if let (Some(first), Some(last)) = (dataset.labels.first(), dataset.labels.last()) {
            let _ = ctx.fill_text(first, 4.0, height - 2.0);
            let offset = (last.len() as f64 * 6.0 + 4.0).min(width / 2.0);
            let _ = ctx.fill_text(last, width - offset, height - 2.0);
        }
    }
}

fn value_range(dataset: &ChartDataset) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for values in dataset.series.values() {
        for value in values {
            min = min.min(*value);
            max = max.max(*value);
        }
    }
    if min.is_finite() && max.is_finite() {
        (min, max)
    } else {
        (0.0, 1.0)
    }
}
