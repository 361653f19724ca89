//! Plain-text rendering of query results.

use std::path::Path;

use archive_client::QueryRecord;

/// Column header and the record field it shows. `Filename` is derived from
/// `file_path`.
const COLUMNS: [(&str, &str); 7] = [
    ("Instrument", "instrument"),
    ("Data Level", "data_level"),
    ("Descriptor", "descriptor"),
    ("Start Date", "start_date"),
    ("Repointing", "repointing"),
    ("Version", "version"),
    ("Filename", "file_path"),
];

fn cell(record: &QueryRecord, field: &str) -> String {
    let value = record.get(field).map(String::as_str).unwrap_or_default();
    if field == "file_path" {
        Path::new(value)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        value.to_string()
    }
}

fn format_row(values: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

/// Render records as a padded table preceded by a match count.
pub fn render(records: &[QueryRecord]) -> String {
    let mut out = format!("Found [{}] matching files\n", records.len());
    if records.is_empty() {
        return out;
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| COLUMNS.iter().map(|(_, field)| cell(record, field)).collect())
        .collect();

    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, (header, _))| {
            rows.iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let rule = format!(
        "|{}|\n",
        "-".repeat(widths.iter().sum::<usize>() + 3 * COLUMNS.len() - 1)
    );

    out.push_str(&rule);
    let headers: Vec<&str> = COLUMNS.iter().map(|(header, _)| *header).collect();
    out.push_str(&format_row(&headers, &widths));
    out.push_str(&rule);
    for row in &rows {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_row(&values, &widths));
    }
    out.push_str(&rule);
    out
}
