//! Plain-text rendering of result sets.

use core::fmt;

use crate::catalog::ColumnType;
use crate::result::ResultSet;
use crate::value::Value;

/// Renders the result set as an aligned text table: headers, a rule, then
/// the rows. Numeric columns are right-aligned.
#[must_use]
pub fn render_table(rs: &ResultSet) -> String {
    let headers = rs.headers();
    let cells: Vec<Vec<String>> = rs
        .rows
        .iter()
        .map(|row| row.iter().map(Value::encode).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let numeric: Vec<bool> = rs
        .columns
        .iter()
        .map(|c| matches!(c.ty, ColumnType::Int | ColumnType::Float))
        .collect();

    let mut out = String::new();
    render_line(&mut out, &headers, &widths, &numeric);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');
    for row in &cells {
        render_line(&mut out, row, &widths, &numeric);
    }
    out
}

fn render_line(out: &mut String, cells: &[String], widths: &[usize], numeric: &[bool]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        if numeric[i] {
            line.push_str(&format!("{cell:>width$}", width = widths[i]));
        } else {
            line.push_str(&format!("{cell:<width$}", width = widths[i]));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Renders a mutation's affected id list: `0 rows`, `1 row: __id=<n>`, or
/// `<k> rows: __id=[...]`.
#[must_use]
pub fn render_affected(ids: &[i64]) -> String {
    match ids {
        [] => String::from("0 rows"),
        [id] => format!("1 row: __id={id}"),
        _ => format!("{} rows: __id={ids:?}", ids.len()),
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_table(self))
    }
}
