//! The catalog: in-memory database model and its persisted form.
//!
//! The catalog is authoritative over column order and `next_id`; table files
//! never contribute schema.

use core::fmt;
use std::fs;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{EngineError, Result};

/// The type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// UTF-8 string.
    Str,
    /// Naive (zone-less) datetime.
    DateTime,
}

impl ColumnType {
    /// Returns the catalog representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::DateTime => "datetime",
        }
    }

    /// Attempts to parse a catalog type name.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "str" => Some(Self::Str),
            "datetime" => Some(Self::DateTime),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column: lowercase name plus type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, lowercase.
    pub name: String,
    /// Column type.
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

impl Column {
    /// Creates a new column.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Name of the synthetic primary key column, always first in every table.
pub const ID_COLUMN: &str = "__id";

/// A table: ordered columns (with `__id` first), the relative path of its
/// row file, and the id to assign to the next inserted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, lowercase.
    pub name: String,
    /// Row file path, relative to the data directory.
    pub file: String,
    /// The id the next INSERT receives. Monotonic; deleted ids are not
    /// reused.
    pub next_id: i64,
    /// Ordered columns, `__id` at index 0.
    pub columns: Vec<Column>,
}

impl Table {
    /// Returns the bare header names.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Returns the `table.column` header names used under a join.
    #[must_use]
    pub fn prefixed_headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| format!("{}.{}", self.name, c.name))
            .collect()
    }

    /// Looks up a column by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownColumn` if the table has no such column.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| EngineError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Returns true if the table has a column with this name.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

/// The database: a name and its ordered tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Database name.
    pub name: String,
    /// Ordered tables.
    pub tables: Vec<Table>,
}

impl Database {
    /// Looks up a table by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` if no table has this name.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| EngineError::UnknownTable(name.to_string()))
    }

    /// Looks up a table by name, mutably.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` if no table has this name.
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| EngineError::UnknownTable(name.to_string()))
    }

    /// Returns true if the database has a table with this name.
    #[must_use]
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t.name == name)
    }
}

/// The persisted catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// The single database.
    pub database: Database,
}

impl Metadata {
    /// Creates an empty catalog for a database with the given name.
    #[must_use]
    pub fn new(database_name: impl Into<String>) -> Self {
        Self {
            database: Database {
                name: database_name.into(),
                tables: Vec::new(),
            },
        }
    }

    /// Loads the catalog from the configured metadata file.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` when the file does not exist, or the
    /// underlying IO/JSON error otherwise.
    pub fn load(config: &StoreConfig) -> Result<Self> {
        let path = config.metadata_path();
        if !path.exists() {
            return Err(EngineError::NotInitialized);
        }

        let text = fs::read_to_string(&path)?;
        let meta = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "loaded catalog");
        Ok(meta)
    }

    /// Saves the catalog to the configured metadata file, pretty-printed
    /// with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO/JSON error on failure.
    pub fn save(&self, config: &StoreConfig) -> Result<()> {
        let path = config.metadata_path();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(&path, text)?;
        debug!(path = %path.display(), "saved catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_table() -> Table {
        Table {
            name: String::from("users"),
            file: String::from("users.csv"),
            next_id: 3,
            columns: vec![
                Column::new(ID_COLUMN, ColumnType::Int),
                Column::new("name", ColumnType::Str),
                Column::new("age", ColumnType::Int),
                Column::new("joined", ColumnType::DateTime),
            ],
        }
    }

    #[test]
    fn test_headers() {
        let table = users_table();
        assert_eq!(table.headers(), vec!["__id", "name", "age", "joined"]);
        assert_eq!(
            table.prefixed_headers(),
            vec!["users.__id", "users.name", "users.age", "users.joined"]
        );
    }

    #[test]
    fn test_column_lookup() {
        let table = users_table();
        assert_eq!(table.column("age").unwrap().ty, ColumnType::Int);
        assert!(matches!(
            table.column("missing"),
            Err(EngineError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_metadata_json_shape() {
        let meta = Metadata {
            database: Database {
                name: String::from("testdb"),
                tables: vec![users_table()],
            },
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["database"]["name"], "testdb");
        assert_eq!(json["database"]["tables"][0]["file"], "users.csv");
        assert_eq!(json["database"]["tables"][0]["next_id"], 3);
        assert_eq!(
            json["database"]["tables"][0]["columns"][0]["name"],
            "__id"
        );
        assert_eq!(json["database"]["tables"][0]["columns"][3]["type"], "datetime");

        let back: Metadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn test_column_type_names() {
        assert_eq!(ColumnType::DateTime.as_str(), "datetime");
        assert_eq!(ColumnType::from_str("float"), Some(ColumnType::Float));
        assert_eq!(ColumnType::from_str("bool"), None);
    }
}
