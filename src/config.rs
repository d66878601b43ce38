use std::path::PathBuf;

// ─── Defaults ────────────────────────────────────────────────────

/// Where the trace writer of the trading pipeline drops its samples.
pub const DEFAULT_INPUT: &str = "test_results/latency_trace.csv";
pub const DEFAULT_OUTPUT: &str = "test_results/latency_report.html";

const DEFAULT_BINS: usize = 40;
const DEFAULT_TOP_N: usize = 5;

/// Raster size of one histogram image (pixels)
const DEFAULT_IMAGE_WIDTH: u32 = 640;
const DEFAULT_IMAGE_HEIGHT: u32 = 480;
/// Width attribute on the `<img>` tag
const DEFAULT_DISPLAY_WIDTH: u32 = 600;

// ─── ReportConfig ────────────────────────────────────────────────

/// Knobs for one report run. The binary always uses `Default`;
/// tests swap the paths for temp files.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Number of equal-width bins per histogram
    pub histogram_bins: usize,
    /// Rows kept in the "slowest events" table
    pub top_n: usize,
    pub image_width: u32,
    pub image_height: u32,
    pub display_width: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            histogram_bins: DEFAULT_BINS,
            top_n: DEFAULT_TOP_N,
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

impl ReportConfig {
    /// Default knobs with the two paths replaced.
    pub fn with_paths(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input.into(),
            output_path: output.into(),
            ..Self::default()
        }
    }
}
