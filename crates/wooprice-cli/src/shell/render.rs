//! Plain-text table rendering for result rows.

use std::io::{self, Write};

use crate::session::DisplayRow;

const HEADERS: [&str; 6] = ["#", "ID", "Name", "Color", "Old price", "New price"];

fn cells(number: usize, row: &DisplayRow) -> [String; 6] {
    [
        number.to_string(),
        row.row.key.to_string(),
        row.row.name.clone(),
        row.row.color.clone(),
        row.row.old_price.to_string(),
        row.new_price.map(|p| p.to_string()).unwrap_or_default(),
    ]
}

/// Writes `rows` as an aligned table, numbered from 1.
pub(crate) fn table<W: Write>(out: &mut W, rows: &[DisplayRow]) -> io::Result<()> {
    let body: Vec<[String; 6]> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| cells(i + 1, row))
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(out, &HEADERS.map(str::to_string), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    for line in &body {
        write_line(out, line, &widths)?;
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, cells: &[String; 6], widths: &[usize; 6]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

/// One-line summary of a row, used in prompts and confirmations.
pub(crate) fn describe(row: &DisplayRow) -> String {
    format!("'{}' color {}", row.row.name, row.row.color)
}
