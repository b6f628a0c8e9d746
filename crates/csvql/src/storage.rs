//! Table file I/O: CSV-encoded rows behind the catalog's schema.
//!
//! The header row of a table file is written for humans and ignored on
//! read; the catalog is authoritative over column order and naming.

use tracing::debug;

use crate::catalog::{Column, Table};
use crate::config::StoreConfig;
use crate::error::{EngineError, Result};
use crate::result::{ResultSet, Row};
use crate::value::Value;

/// Reads a table's rows into a typed result set. With `prefixed`, column
/// names take the `table.column` form used under a join.
///
/// # Errors
///
/// Returns IO/CSV errors from the underlying file and `CorruptCell` for
/// cells that do not decode as their column type.
pub fn read_table(table: &Table, config: &StoreConfig, prefixed: bool) -> Result<ResultSet> {
    let path = config.table_path(&table.file);
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(&path)?;

    let mut rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Vec::with_capacity(table.columns.len());
        for (i, column) in table.columns.iter().enumerate() {
            let cell = record.get(i).unwrap_or("");
            row.push(Value::decode(cell, column)?);
        }
        rows.push(row);
    }

    let columns: Vec<Column> = if prefixed {
        table
            .columns
            .iter()
            .map(|c| Column::new(format!("{}.{}", table.name, c.name), c.ty))
            .collect()
    } else {
        table.columns.clone()
    };

    debug!(table = %table.name, rows = rows.len(), "read table");

    Ok(ResultSet::new(table.name.clone(), columns, rows))
}

/// Rewrites a table's file from a result set: header row first, then every
/// row encoded per column type. Minimal quoting, `,` delimiter, `\n`
/// terminator.
///
/// # Errors
///
/// Returns `TableMismatch`/`HeaderMismatch` when the result set does not
/// belong to this table, and IO/CSV errors from the underlying file.
pub fn write_table(table: &Table, config: &StoreConfig, rs: &ResultSet) -> Result<()> {
    if rs.table_name != table.name {
        return Err(EngineError::TableMismatch {
            origin: rs.table_name.clone(),
            table: table.name.clone(),
        });
    }
    if rs.headers() != table.headers() {
        return Err(EngineError::HeaderMismatch(table.name.clone()));
    }

    let path = config.table_path(&table.file);
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)?;

    writer.write_record(table.headers())?;
    for row in &rs.rows {
        writer.write_record(row.iter().map(Value::encode))?;
    }
    writer.flush()?;

    debug!(table = %table.name, rows = rs.rows.len(), "wrote table");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnType, ID_COLUMN};
    use crate::value::parse_datetime;

    fn users_table(dir: &std::path::Path) -> (Table, StoreConfig) {
        let table = Table {
            name: String::from("users"),
            file: String::from("users.csv"),
            next_id: 2,
            columns: vec![
                Column::new(ID_COLUMN, ColumnType::Int),
                Column::new("name", ColumnType::Str),
                Column::new("total", ColumnType::Float),
                Column::new("joined", ColumnType::DateTime),
            ],
        };
        (table, StoreConfig::new(dir))
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            vec![
                Value::Int(0),
                Value::Str(String::from("ana")),
                Value::Float(9.5),
                Value::DateTime(parse_datetime("2020-01-01T00:00:00").unwrap()),
            ],
            vec![
                Value::Int(1),
                Value::Str(String::from("bo, the second")),
                Value::Float(0.125),
                Value::DateTime(parse_datetime("2021-06-15T12:00:00").unwrap()),
            ],
        ]
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (table, config) = users_table(dir.path());

        let rs = ResultSet::new(table.name.clone(), table.columns.clone(), sample_rows());
        write_table(&table, &config, &rs).unwrap();

        let back = read_table(&table, &config, false).unwrap();
        assert_eq!(back.rows.len(), 2);
        // The comma inside the name survives the CSV quoting.
        assert_eq!(back.rows[1][1], Value::Str(String::from("bo, the second")));
        // Floats come back at four-digit precision.
        assert_eq!(back.rows[1][2], Value::Float(0.125));

        // A second round trip is the identity.
        write_table(&table, &config, &back).unwrap();
        let again = read_table(&table, &config, false).unwrap();
        assert_eq!(again.rows, back.rows);
    }

    #[test]
    fn test_read_prefixed_headers() {
        let dir = tempfile::tempdir().unwrap();
        let (table, config) = users_table(dir.path());
        let rs = ResultSet::new(table.name.clone(), table.columns.clone(), sample_rows());
        write_table(&table, &config, &rs).unwrap();

        let prefixed = read_table(&table, &config, true).unwrap();
        assert_eq!(prefixed.headers()[0], "users.__id");
        assert_eq!(prefixed.headers()[3], "users.joined");
    }

    #[test]
    fn test_header_row_is_ignored_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let (table, config) = users_table(dir.path());
        std::fs::write(
            config.table_path(&table.file),
            "completely,wrong,header,row\n0,ana,9.5000,2020-01-01T00:00:00\n",
        )
        .unwrap();

        let rs = read_table(&table, &config, false).unwrap();
        assert_eq!(rs.headers(), table.headers());
        assert_eq!(rs.rows.len(), 1);
    }

    #[test]
    fn test_empty_cells_decode_to_zero_values() {
        let dir = tempfile::tempdir().unwrap();
        let (table, config) = users_table(dir.path());
        std::fs::write(
            config.table_path(&table.file),
            "__id,name,total,joined\n0,,,\n",
        )
        .unwrap();

        let rs = read_table(&table, &config, false).unwrap();
        assert_eq!(rs.rows[0][1], Value::Str(String::new()));
        assert_eq!(rs.rows[0][2], Value::Float(0.0));
        assert_eq!(
            rs.rows[0][3].encode(),
            "1970-01-01T00:00:00"
        );
    }

    #[test]
    fn test_write_rejects_foreign_result_set() {
        let dir = tempfile::tempdir().unwrap();
        let (table, config) = users_table(dir.path());
        let rs = ResultSet::new(String::from("orders"), table.columns.clone(), vec![]);
        assert!(matches!(
            write_table(&table, &config, &rs),
            Err(EngineError::TableMismatch { .. })
        ));
    }
}
