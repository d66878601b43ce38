use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use super::table::{escape_html, HtmlTable};
use crate::chart::HistogramImage;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 2em; }
        table { border-collapse: collapse; margin-bottom: 2em; font-size: 13px; }
        th, td { border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: right; }
        th { background-color: #f0f0f0; }
        h1, h2 { color: #333; }
        .meta { color: #666; font-size: 12px; }
        .section { margin-top: 2em; }
"#;

/// Everything that goes into the HTML page, already rendered to tables.
pub struct ReportPage<'a> {
    pub generated_at: DateTime<Utc>,
    pub row_count: usize,
    pub summary: HtmlTable,
    /// Size limit of the slowest-events table, for its heading
    pub top_n: usize,
    pub slowest: HtmlTable,
    pub grouped: HtmlTable,
    pub histograms: &'a [HistogramImage],
    pub detailed: HtmlTable,
    /// `width` attribute of every histogram `<img>`
    pub image_width: u32,
}

impl ReportPage<'_> {
    /// Self-contained document: inline CSS, images as data URIs.
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096 + self.histograms.iter().map(|h| h.png_base64.len()).sum::<usize>());

        // writes into a String cannot fail
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Latency Report</title>
    <style>{STYLE}    </style>
</head>
<body>
    <h1>Latency Report</h1>
    <p class="meta">Generated {generated} from {rows} events</p>
"#,
            generated = self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            rows = self.row_count,
        );

        section(&mut html, "Latency Summary (microseconds)", &self.summary.to_html());
        let top_heading = format!("Top {} Slowest Events", self.top_n);
        section(&mut html, &top_heading, &self.slowest.to_html());
        section(&mut html, "Network Latency by Number of Updates", &self.grouped.to_html());

        html.push_str("    <div class=\"section\">\n        <h2>Latency Histogram by num_updates</h2>\n");
        for hist in self.histograms {
            let key = escape_html(&hist.key.to_string());
            let _ = write!(
                html,
                "        <h3>num_updates = {key}</h3>\n        <img src=\"{uri}\" width=\"{w}\" alt=\"num_updates = {key}\"/><br/>\n",
                uri = hist.data_uri(),
                w = self.image_width,
            );
        }
        html.push_str("    </div>\n");

        section(&mut html, "Detailed Latency Table", &self.detailed.to_html());

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn section(html: &mut String, heading: &str, body: &str) {
    let _ = write!(
        html,
        "    <div class=\"section\">\n        <h2>{}</h2>\n{}\n    </div>\n",
        escape_html(heading),
        body
    );
}
