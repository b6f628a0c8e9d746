//! One-shot CSV ingestion: builds the catalog and initial table files from
//! a directory of CSV files, prompting for the type of every column.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::{Column, ColumnType, Metadata, Table, ID_COLUMN};
use crate::config::StoreConfig;
use crate::error::{EngineError, Result};
use crate::result::{ResultSet, Row};
use crate::storage;
use crate::value::Value;

/// Imports every `*.csv` under `csv_dir` into a fresh data directory,
/// prompting on stdin per file and per column.
///
/// # Errors
///
/// Returns IO/CSV failures and `InvalidColumnType` for an unrecognized type
/// answer.
pub fn import_csv(csv_dir: &Path, config: &StoreConfig) -> Result<()> {
    let stdin = io::stdin();
    import_csv_from(csv_dir, config, &mut stdin.lock())
}

/// Same as [`import_csv`] with the prompt answers read from `input`.
///
/// # Errors
///
/// See [`import_csv`].
pub fn import_csv_from(
    csv_dir: &Path,
    config: &StoreConfig,
    input: &mut dyn BufRead,
) -> Result<()> {
    if config.data_dir.exists() {
        if fs::read_dir(&config.data_dir)?.next().is_some() {
            warn!("data directory is not empty, will not overwrite");
            return Ok(());
        }
    } else {
        fs::create_dir_all(&config.data_dir)?;
    }

    let database_name = csv_dir
        .file_name()
        .map_or_else(|| String::from("db"), |n| n.to_string_lossy().to_lowercase());
    let mut meta = Metadata::new(database_name);
    meta.save(config)?;

    let mut files: Vec<PathBuf> = fs::read_dir(csv_dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    files.sort();

    for file in files {
        import_file(&file, config, &mut meta, input)?;
    }

    Ok(())
}

fn import_file(
    file: &Path,
    config: &StoreConfig,
    meta: &mut Metadata,
    input: &mut dyn BufRead,
) -> Result<()> {
    let file_name = file
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().to_string());
    let table_name = file
        .file_stem()
        .map_or_else(String::new, |n| n.to_string_lossy().to_lowercase());

    let answer = prompt(
        &format!("Import file {file_name} as table {table_name}? (Y/n) "),
        input,
    )?;
    if answer.eq_ignore_ascii_case("n") {
        return Ok(());
    }

    let destination = config.table_path(&file_name);
    if destination.exists() {
        warn!("file {file_name} already exists, will not overwrite");
        return Ok(());
    }

    let mut reader = csv::Reader::from_path(file)?;
    let header_names: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    if header_names.is_empty() {
        warn!("file {file_name} is empty");
        return Ok(());
    }

    let mut columns = vec![Column::new(ID_COLUMN, ColumnType::Int)];
    for name in &header_names {
        let answer = prompt(
            &format!(
                "Enter type for column {table_name}.{name} (int, float, str (default), datetime): "
            ),
            input,
        )?;
        let ty = if answer.is_empty() {
            ColumnType::Str
        } else {
            ColumnType::from_str(&answer).ok_or(EngineError::InvalidColumnType(answer))?
        };
        columns.push(Column::new(name.clone(), ty));
    }

    info!("importing data from {file_name}");

    let mut next_id: i64 = 0;
    let mut rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Vec::with_capacity(columns.len());
        row.push(Value::Int(next_id));
        for (i, column) in columns.iter().skip(1).enumerate() {
            let cell = record.get(i).unwrap_or("");
            row.push(Value::decode(cell, column)?);
        }
        rows.push(row);
        next_id += 1;
    }

    let table = Table {
        name: table_name.clone(),
        file: file_name,
        next_id,
        columns,
    };
    let rs = ResultSet::new(table.name.clone(), table.columns.clone(), rows);
    storage::write_table(&table, config, &rs)?;

    info!(table = %table_name, rows = rs.rows.len(), "imported table");

    meta.database.tables.push(table);
    meta.save(config)?;

    Ok(())
}

fn prompt(message: &str, input: &mut dyn BufRead) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_import_builds_catalog_and_rows() {
        let source = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(data.path().join("store"));

        fs::write(
            source.path().join("users.csv"),
            "name,age\nana,30\nbo,17\n",
        )
        .unwrap();

        // One answer per prompt: import the file, then the two column types.
        let mut input = Cursor::new("y\nstr\nint\n");
        import_csv_from(source.path(), &config, &mut input).unwrap();

        let meta = Metadata::load(&config).unwrap();
        let table = meta.database.table("users").unwrap();
        assert_eq!(table.next_id, 2);
        assert_eq!(table.headers(), vec!["__id", "name", "age"]);

        let rs = storage::read_table(table, &config, false).unwrap();
        assert_eq!(rs.rows.len(), 2);
        assert_eq!(rs.rows[0][0], Value::Int(0));
        assert_eq!(rs.rows[1][2], Value::Int(17));
    }

    #[test]
    fn test_import_skips_declined_files() {
        let source = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(data.path().join("store"));

        fs::write(source.path().join("users.csv"), "name\nana\n").unwrap();

        let mut input = Cursor::new("n\n");
        import_csv_from(source.path(), &config, &mut input).unwrap();

        let meta = Metadata::load(&config).unwrap();
        assert!(meta.database.tables.is_empty());
    }

    #[test]
    fn test_import_refuses_non_empty_data_dir() {
        let source = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        fs::write(data.path().join("leftover"), "x").unwrap();
        let config = StoreConfig::new(data.path());

        fs::write(source.path().join("users.csv"), "name\nana\n").unwrap();

        let mut input = Cursor::new("y\nstr\n");
        import_csv_from(source.path(), &config, &mut input).unwrap();

        // Nothing was written: no catalog, original file untouched.
        assert!(Metadata::load(&config).is_err());
    }

    #[test]
    fn test_import_rejects_unknown_column_type() {
        let source = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(data.path().join("store"));

        fs::write(source.path().join("users.csv"), "name\nana\n").unwrap();

        let mut input = Cursor::new("y\nboolean\n");
        let err = import_csv_from(source.path(), &config, &mut input).unwrap_err();
        assert!(matches!(err, EngineError::InvalidColumnType(_)));
    }

    #[test]
    fn test_import_defaults_to_str() {
        let source = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(data.path().join("store"));

        fs::write(source.path().join("notes.csv"), "text\nhello\n").unwrap();

        let mut input = Cursor::new("y\n\n");
        import_csv_from(source.path(), &config, &mut input).unwrap();

        let meta = Metadata::load(&config).unwrap();
        let table = meta.database.table("notes").unwrap();
        assert_eq!(table.column("text").unwrap().ty, ColumnType::Str);
    }
}
