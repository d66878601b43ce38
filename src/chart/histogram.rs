use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::Rgb;
use tracing::{debug, warn};

use super::canvas::{Canvas, Color, BLACK, WHITE};
use super::font;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::metrics::{Group, UpdateKey};

// ─── Styling ─────────────────────────────────────────────────────

const BAR_COLOR: Color = Rgb([70, 130, 180]); // steelblue
const BAR_ALPHA: f32 = 0.75;
const GRID_COLOR: Color = Rgb([220, 220, 220]);
const TEXT_COLOR: Color = Rgb([30, 30, 30]);

const TITLE_SCALE: u32 = 2;
const LABEL_SCALE: u32 = 2;
const TICK_SCALE: u32 = 1;

const MARGIN_LEFT: i32 = 80;
const MARGIN_RIGHT: i32 = 24;
const MARGIN_TOP: i32 = 44;
const MARGIN_BOTTOM: i32 = 64;

/// Horizontal padding around the data range, as a fraction of the range
const X_PAD: f64 = 0.05;
/// Headroom above the tallest bar
const Y_HEADROOM: f64 = 1.05;
const TARGET_TICKS: f64 = 6.0;

pub const X_LABEL: &str = "Latency (microseconds)";
pub const Y_LABEL: &str = "Count";

// ─── Binning ─────────────────────────────────────────────────────

/// Equal-width bins over `[lo, hi]`; the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    pub lo: f64,
    pub hi: f64,
    pub counts: Vec<u64>,
}

impl Bins {
    /// Bin the finite values. A degenerate range `[v, v]` is widened to
    /// `[v - 0.5, v + 0.5]`; no values at all gives empty bins over `[0, 1]`.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite = || values.iter().copied().filter(|v| v.is_finite());

        let (lo, hi) = match finite().fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        }) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0u64; bins];
        for v in finite() {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { lo, hi, counts }
    }

    pub fn width(&self) -> f64 {
        (self.hi - self.lo) / self.counts.len() as f64
    }

    /// Left edge of bin `i`; `edge(len)` is `hi`.
    pub fn edge(&self, i: usize) -> f64 {
        if i >= self.counts.len() {
            self.hi
        } else {
            self.lo + self.width() * i as f64
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

// ─── Rendering ───────────────────────────────────────────────────

/// One encoded histogram, ready to drop into an `<img src=...>`.
#[derive(Debug, Clone)]
pub struct HistogramImage {
    pub key: UpdateKey,
    pub png_base64: String,
}

impl HistogramImage {
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.png_base64)
    }
}

pub fn title_for(key: UpdateKey) -> String {
    format!("Latency Distribution for num_updates = {key}")
}

/// Render one histogram per group, in group order. Axes are scaled per
/// group; nothing is shared between images.
pub fn build_histograms(groups: &[Group<'_>], cfg: &ReportConfig) -> Result<Vec<HistogramImage>> {
    groups
        .iter()
        .map(|g| {
            let values: Vec<f64> = g.total_us().flatten().collect();
            if values.is_empty() {
                warn!(num_updates = %g.key, "group has no total_us values, histogram is empty");
            }
            let png = render_histogram(&title_for(g.key), &values, cfg)?;
            debug!(num_updates = %g.key, samples = values.len(), png_bytes = png.len(), "histogram rendered");
            Ok(HistogramImage {
                key: g.key,
                png_base64: STANDARD.encode(&png),
            })
        })
        .collect()
}

/// Draw a frequency histogram of `values` and return it as PNG bytes.
pub fn render_histogram(title: &str, values: &[f64], cfg: &ReportConfig) -> Result<Vec<u8>> {
    let bins = Bins::from_values(values, cfg.histogram_bins);
    let mut canvas = Canvas::new(cfg.image_width, cfg.image_height, WHITE);
    let plot = PlotArea::new(&canvas, &bins);

    draw_grid_and_ticks(&mut canvas, &plot);
    draw_bars(&mut canvas, &plot, &bins);
    draw_frame_and_labels(&mut canvas, &plot, title);

    canvas.into_png()
}

/// Pixel rectangle of the plot plus the data range it maps.
struct PlotArea {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl PlotArea {
    fn new(canvas: &Canvas, bins: &Bins) -> Self {
        let pad = (bins.hi - bins.lo) * X_PAD;
        Self {
            left: MARGIN_LEFT,
            right: canvas.width() as i32 - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: canvas.height() as i32 - MARGIN_BOTTOM,
            x_min: bins.lo - pad,
            x_max: bins.hi + pad,
            y_max: (bins.peak().max(1) as f64) * Y_HEADROOM,
        }
    }

    fn px(&self, x: f64) -> i32 {
        let t = (x - self.x_min) / (self.x_max - self.x_min);
        self.left + (t * (self.right - self.left) as f64).round() as i32
    }

    fn py(&self, y: f64) -> i32 {
        let t = y / self.y_max;
        self.bottom - (t * (self.bottom - self.top) as f64).round() as i32
    }
}

fn draw_grid_and_ticks(canvas: &mut Canvas, plot: &PlotArea) {
    let tick_h = Canvas::line_height(TICK_SCALE);

    for x in ticks(plot.x_min, plot.x_max) {
        let px = plot.px(x.value);
        canvas.vline(px, plot.top, plot.bottom, GRID_COLOR);
        canvas.vline(px, plot.bottom, plot.bottom + 4, BLACK);
        let w = font::text_width(&x.label, TICK_SCALE) as i32;
        canvas.draw_text(px - w / 2, plot.bottom + 8, &x.label, TICK_SCALE, TEXT_COLOR);
    }

    for y in ticks(0.0, plot.y_max) {
        let py = plot.py(y.value);
        canvas.hline(plot.left, plot.right, py, GRID_COLOR);
        canvas.hline(plot.left - 4, plot.left, py, BLACK);
        let w = font::text_width(&y.label, TICK_SCALE) as i32;
        canvas.draw_text(plot.left - 8 - w, py - tick_h / 2, &y.label, TICK_SCALE, TEXT_COLOR);
    }
}

fn draw_bars(canvas: &mut Canvas, plot: &PlotArea, bins: &Bins) {
    for (i, &count) in bins.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let x0 = plot.px(bins.edge(i));
        let x1 = plot.px(bins.edge(i + 1)).max(x0 + 1);
        let y0 = plot.py(count as f64);
        canvas.blend_rect(x0, y0, x1, plot.bottom, BAR_COLOR, BAR_ALPHA);
    }
}

fn draw_frame_and_labels(canvas: &mut Canvas, plot: &PlotArea, title: &str) {
    canvas.hline(plot.left, plot.right, plot.top, BLACK);
    canvas.hline(plot.left, plot.right, plot.bottom, BLACK);
    canvas.vline(plot.left, plot.top, plot.bottom, BLACK);
    canvas.vline(plot.right, plot.top, plot.bottom, BLACK);

    let center_x = (plot.left + plot.right) / 2;

    let w = font::text_width(title, TITLE_SCALE) as i32;
    let title_y = (plot.top - Canvas::line_height(TITLE_SCALE)) / 2;
    canvas.draw_text(center_x - w / 2, title_y, title, TITLE_SCALE, TEXT_COLOR);

    let w = font::text_width(X_LABEL, LABEL_SCALE) as i32;
    let label_y = canvas.height() as i32 - Canvas::line_height(LABEL_SCALE) - 14;
    canvas.draw_text(center_x - w / 2, label_y, X_LABEL, LABEL_SCALE, TEXT_COLOR);

    let h = font::text_width(Y_LABEL, LABEL_SCALE) as i32;
    let center_y = (plot.top + plot.bottom) / 2;
    canvas.draw_text_vertical(12, center_y + h / 2, Y_LABEL, LABEL_SCALE, TEXT_COLOR);
}

// ─── Axis ticks ──────────────────────────────────────────────────

struct Tick {
    value: f64,
    label: String,
}

/// Round-number ticks (1, 2 or 5 times a power of ten) inside `[lo, hi]`.
fn ticks(lo: f64, hi: f64) -> Vec<Tick> {
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return Vec::new();
    }

    let raw = span / TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n < 1.5 => magnitude,
        n if n < 3.5 => 2.0 * magnitude,
        n if n < 7.5 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    };
    let decimals = if step >= 1.0 {
        0
    } else {
        // epsilon: a step of 0.1 must not round up to 2 digits
        (-step.log10() - 1e-9).ceil() as usize
    };

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|i| {
            let value = i as f64 * step;
            // avoid "-0"
            let shown = if value == 0.0 { 0.0 } else { value };
            Tick {
                value,
                label: format!("{shown:.decimals$}"),
            }
        })
        .collect()
}
