use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use super::EventRecord;
use crate::error::{ReportError, Result};

/// Columns the report cannot do without. Anything else in the header is
/// ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "subject_id",
    "num_updates",
    "t_recv",
    "t_parsed",
    "t_calc_start",
    "t_calc_end",
    "t_sent",
];

/// Open `path` and read the whole trace into memory.
pub fn load_trace(path: &Path) -> Result<Vec<EventRecord>> {
    let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
    read_trace(file)
}

/// Read a comma-delimited trace with a header row.
///
/// Fails on a missing required column or a row with more fields than the
/// header. Short rows are padded with empty cells, so their trailing
/// columns come back as `None` like any other unparseable number.
pub fn read_trace<R: Read>(reader: R) -> Result<Vec<EventRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(ReportError::MissingColumn((*missing).to_string()));
    }

    let mut records = Vec::new();
    let mut padded = 0usize;
    for row in rdr.records() {
        let mut row = row?;
        if row.len() > headers.len() {
            return Err(ReportError::RaggedRow {
                line: row.position().map_or(0, |p| p.line()),
                expected: headers.len(),
                found: row.len(),
            });
        }
        if row.len() < headers.len() {
            padded += 1;
            while row.len() < headers.len() {
                row.push_field("");
            }
        }
        let record: EventRecord = row.deserialize(Some(&headers))?;
        records.push(record.drop_non_finite());
    }

    if padded > 0 {
        warn!(rows = padded, "short rows padded with missing values");
    }
    debug!(rows = records.len(), columns = headers.len(), "trace parsed");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "subject_id,t_recv,t_parsed,t_calc_start,t_calc_end,t_sent,num_updates";

    fn read(body: &str) -> Result<Vec<EventRecord>> {
        read_trace(body.as_bytes())
    }

    #[test]
    fn parses_well_formed_rows() {
        let csv = format!("{HEADER}\n7,1000000,1100000,1200000,1500000,2000000,3\n");
        let rows = read(&csv).unwrap();

        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.subject_id, "7");
        assert_eq!(r.num_updates, Some(3.0));
        assert_eq!(r.t_recv, Some(1_000_000.0));
        assert_eq!(r.t_sent, Some(2_000_000.0));
    }

    #[test]
    fn bad_cells_become_missing() {
        let csv = format!("{HEADER}\n1,1000,abc,,1500,NaN,x\n");
        let rows = read(&csv).unwrap();

        let r = &rows[0];
        assert_eq!(r.t_recv, Some(1000.0));
        assert_eq!(r.t_parsed, None);
        assert_eq!(r.t_calc_start, None);
        assert_eq!(r.t_calc_end, Some(1500.0));
        assert_eq!(r.t_sent, None);
        assert_eq!(r.num_updates, None);
    }

    #[test]
    fn extra_columns_and_order_do_not_matter() {
        let csv = "venue,t_sent,num_updates,t_calc_end,t_calc_start,t_parsed,t_recv,subject_id\n\
                   XNAS,50,2,40,30,20,10,abc\n";
        let rows = read(csv).unwrap();

        assert_eq!(rows[0].subject_id, "abc");
        assert_eq!(rows[0].t_recv, Some(10.0));
        assert_eq!(rows[0].t_sent, Some(50.0));
        assert_eq!(rows[0].num_updates, Some(2.0));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let csv = format!("{HEADER}\n 1 , 10 , 20 , 30 , 40 , 50 , 1 \n");
        let rows = read(&csv).unwrap();
        assert_eq!(rows[0].t_recv, Some(10.0));
        assert_eq!(rows[0].num_updates, Some(1.0));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "subject_id,t_recv,t_parsed,t_calc_start,t_calc_end,num_updates\n1,1,2,3,4,1\n";
        match read(csv) {
            Err(ReportError::MissingColumn(col)) => assert_eq!(col, "t_sent"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_fill_trailing_columns_with_missing() {
        let csv = format!("{HEADER}\n1,1,2,3,4,5,1\n2,1,2,3,4\n");
        let rows = read(&csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].num_updates, Some(1.0));
        let short = &rows[1];
        assert_eq!(short.subject_id, "2");
        assert_eq!(short.t_calc_end, Some(4.0));
        assert_eq!(short.t_sent, None);
        assert_eq!(short.num_updates, None);
    }

    #[test]
    fn long_rows_are_rejected() {
        let csv = format!("{HEADER}\n1,1,2,3,4,5,1\n2,1,2,3,4,5,1,9\n");
        match read(&csv) {
            Err(ReportError::RaggedRow { line, expected, found }) => {
                assert_eq!((line, expected, found), (3, 7, 8));
            }
            other => panic!("expected RaggedRow, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_yields_no_rows() {
        let rows = read(&format!("{HEADER}\n")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_file_has_no_columns() {
        assert!(matches!(read(""), Err(ReportError::MissingColumn(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_trace(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
