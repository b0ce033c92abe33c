//! Daily CSV record persistence
//!
//! One record file per calendar day, opened in append mode. The header row
//! (field names in declaration order) is written only when the file is
//! created by the first save of the day. Cells are quoted only when they
//! contain a comma, a quote, or a line break.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{StorageError, StorageResult};
use crate::field_binding::FieldValue;

pub const RECORD_FILE_PREFIX: &str = "agrilog_record_";

/// Record file name for a given day
pub fn record_file_name(day: NaiveDate) -> String {
    format!("{RECORD_FILE_PREFIX}{}.csv", day.format("%Y-%m-%d"))
}

/// Quote a CSV cell when it needs it
fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn csv_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut row = cells
        .into_iter()
        .map(|c| csv_escape(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Append one record to the day's CSV file
///
/// Creates the data directory as needed and writes the header row only when
/// this call creates the file. Returns the path written to.
pub fn append_record(
    dir: &Path,
    day: NaiveDate,
    record: &[(String, FieldValue)],
) -> StorageResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| StorageError::create_directory(dir, e))?;

    let path = dir.join(record_file_name(day));
    let new_file = !path.exists();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| StorageError::open_file(&path, e))?;

    let mut out = String::new();
    if new_file {
        out.push_str(&csv_row(record.iter().map(|(name, _)| name.as_str())));
    }
    out.push_str(&csv_row(record.iter().map(|(_, value)| value.to_string())));

    file.write_all(out.as_bytes())
        .map_err(|e| StorageError::write_record(&path, e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Vec<(String, FieldValue)> {
        vec![
            ("Date".to_string(), FieldValue::Text("2026-08-06".into())),
            ("Humidity".to_string(), FieldValue::Numeric(Some(24.5))),
            ("Equipment Fault".to_string(), FieldValue::Boolean(false)),
            ("Notes".to_string(), FieldValue::Multiline("all clear".into())),
        ]
    }

    #[test]
    fn test_record_file_name_carries_day() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(record_file_name(day), "agrilog_record_2026-08-06.csv");
    }

    #[test]
    fn test_header_written_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        let path = append_record(dir.path(), day, &sample_record()).unwrap();
        append_record(dir.path(), day, &sample_record()).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Humidity,Equipment Fault,Notes");
        assert_eq!(lines[1], lines[2]);
        assert_eq!(lines[1], "2026-08-06,24.5,false,all clear");
    }

    #[test]
    fn test_new_day_gets_new_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let day1 = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

        let p1 = append_record(dir.path(), day1, &sample_record()).unwrap();
        let p2 = append_record(dir.path(), day2, &sample_record()).unwrap();

        assert_ne!(p1, p2);
        for path in [p1, p2] {
            let contents = fs::read_to_string(path).unwrap();
            assert!(contents.starts_with("Date,"));
        }
    }

    #[test]
    fn test_cells_with_commas_and_newlines_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let record = vec![
            ("Technician".to_string(), FieldValue::Text("Simms, J.".into())),
            (
                "Notes".to_string(),
                FieldValue::Multiline("line one\nline \"two\"".into()),
            ),
        ];

        let path = append_record(dir.path(), day, &record).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("\"Simms, J.\""));
        assert!(contents.contains("\"line one\nline \"\"two\"\"\""));
    }

    #[test]
    fn test_creates_missing_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("records").join("2026");
        let day = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let path = append_record(&nested, day, &sample_record()).unwrap();
        assert!(path.exists());
    }
}
