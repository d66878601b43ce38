use std::fmt::Write;

use crate::metrics::percentiles::round2;

/// A minimal dataframe-style HTML table: optional index column, string
/// cells, `border="0"` and a CSS class.
#[derive(Debug, Clone)]
pub struct HtmlTable {
    class: String,
    /// Header over the index column; `None` means the table has no index
    index_header: Option<String>,
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
struct Row {
    label: Option<String>,
    cells: Vec<String>,
}

impl HtmlTable {
    pub fn new<I, S>(class: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class: class.to_string(),
            index_header: None,
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Give the table a leading index column headed by `header`
    /// (may be empty).
    pub fn with_index(mut self, header: &str) -> Self {
        self.index_header = Some(header.to_string());
        self
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(Row { label: None, cells });
    }

    pub fn push_indexed_row(&mut self, label: impl Into<String>, cells: Vec<String>) {
        self.rows.push(Row {
            label: Some(label.into()),
            cells,
        });
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // String writes are infallible
        let _ = writeln!(
            out,
            r#"<table border="0" class="dataframe {}">"#,
            escape_html(&self.class)
        );

        out.push_str("  <thead>\n    <tr>");
        if let Some(header) = &self.index_header {
            let _ = write!(out, "<th>{}</th>", escape_html(header));
        }
        for col in &self.columns {
            let _ = write!(out, "<th>{}</th>", escape_html(col));
        }
        out.push_str("</tr>\n  </thead>\n  <tbody>\n");

        for row in &self.rows {
            out.push_str("    <tr>");
            if self.index_header.is_some() {
                let label = row.label.as_deref().unwrap_or("");
                let _ = write!(out, "<th>{}</th>", escape_html(label));
            }
            for cell in &row.cells {
                let _ = write!(out, "<td>{}</td>", escape_html(cell));
            }
            out.push_str("</tr>\n");
        }

        out.push_str("  </tbody>\n</table>");
        out
    }
}

// ─── Cell formatting ─────────────────────────────────────────────

/// Two decimals, `NaN` when missing.
pub fn fmt_value(v: Option<f64>) -> String {
    match v {
        // `+ 0.0` turns -0.00 into 0.00
        Some(v) => format!("{:.2}", round2(v) + 0.0),
        None => "NaN".to_string(),
    }
}

/// Raw input readings: integral values print as integers, anything else
/// with two decimals.
pub fn fmt_raw(v: Option<f64>) -> String {
    match v {
        Some(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => format!("{}", v as i64),
        other => fmt_value(other),
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
