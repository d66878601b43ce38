pub mod canvas;
pub mod font;
pub mod histogram;

pub use canvas::Canvas;
pub use histogram::{build_histograms, render_histogram, Bins, HistogramImage};
