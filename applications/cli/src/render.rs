//! Text output for listings, summaries and failures.

use crate::error::CliError;
use applytrack_core::{ErrorClass, Persisted, StatusSummary};

const HEADERS: [&str; 6] = ["#", "Job", "Company", "Date", "Status", "Id"];

/// Render the application list as aligned columns.
pub fn listing(records: &[Persisted]) -> String {
    if records.is_empty() {
        return "No applications found!".to_string();
    }

    let rows: Vec<[String; 6]> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            [
                format!("#{}", index + 1),
                record.fields.position.clone(),
                record.fields.company.clone(),
                record.fields.applied_date.format("%Y-%m-%d").to_string(),
                record.fields.status.to_string(),
                record.id().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(format_row(&HEADERS, &widths))
        .chain(rows.iter().map(|row| format_row(row, &widths)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render status counts.
pub fn summary(summary: &StatusSummary) -> String {
    let mut lines = vec![
        format!("Total:     {}", summary.total),
        format!("Applied:   {}", summary.applied),
        format!("Interview: {}", summary.interview),
        format!("Offer:     {}", summary.offer),
        format!("Rejected:  {}", summary.rejected),
    ];
    if summary.unrecognized() > 0 {
        lines.push(format!("Other:     {}", summary.unrecognized()));
    }
    lines.join("\n")
}

/// User-facing message for a failed command, worded by failure class.
pub fn failure(err: &CliError) -> String {
    match err {
        CliError::Config(_) | CliError::Io(_) => err.to_string(),
        CliError::Tracker(e) => match e.class() {
            ErrorClass::Validation => format!("Invalid input: {e}"),
            ErrorClass::Rejection => format!("Request refused: {e}"),
            ErrorClass::Transport => format!("Server problem, please try again: {e}"),
        },
    }
}
