//! Error types for the csvql engine.

use csvql_core::ParseError;

use crate::catalog::ColumnType;

/// Errors that can occur while validating or executing a statement.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The catalog file does not exist yet.
    #[error("Database not initialized. Please import first")]
    NotInitialized,

    /// The query text failed to parse.
    #[error("Invalid query: {0}")]
    Parse(#[from] ParseError),

    /// A statement referenced a table the catalog does not know.
    #[error("Invalid table: {0}")]
    UnknownTable(String),

    /// A statement referenced a column its table does not have.
    #[error("Invalid column: {column} in table {table}")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A column lookup against a result set's headers failed.
    #[error("Column {0} not found")]
    UnknownHeader(String),

    /// The two sides of a comparison have different column types.
    #[error("Type mismatch in comparison: {left} != {right}")]
    TypeMismatch {
        /// Left-hand column type.
        left: ColumnType,
        /// Right-hand column type.
        right: ColumnType,
    },

    /// A literal is not well-formed for the column type it is compared to
    /// or assigned into.
    #[error("Invalid {ty} value: {value}")]
    InvalidLiteral {
        /// The expected column type.
        ty: ColumnType,
        /// The offending literal, as written.
        value: String,
    },

    /// The `__id` column is assigned by the engine and cannot be written.
    #[error("Cannot write to the __id column (autogenerated)")]
    IdColumnReadOnly,

    /// INSERT field and value lists have different lengths.
    #[error("Number of fields ({fields}) and values ({values}) don't match")]
    ArityMismatch {
        /// Number of fields.
        fields: usize,
        /// Number of values.
        values: usize,
    },

    /// An unrecognized column type name was given during import.
    #[error("Invalid column type: {0}")]
    InvalidColumnType(String),

    /// A result set was written back to a table it did not come from.
    #[error("Cannot save a result set from {origin} into table {table}")]
    TableMismatch {
        /// The result set's origin table name.
        origin: String,
        /// The target table name.
        table: String,
    },

    /// A result set's columns no longer match its table's columns.
    #[error("Columns do not match table {0}")]
    HeaderMismatch(String),

    /// A cell in a table file could not be decoded as its column type.
    #[error("Corrupt cell in column {column}: invalid {ty} value {value:?}")]
    CorruptCell {
        /// Column name.
        column: String,
        /// The column's type.
        ty: ColumnType,
        /// The raw cell text.
        value: String,
    },

    /// A row's first cell is not an integer id.
    #[error("Invalid row id in table {0}")]
    InvalidId(String),

    /// IO error (reading/writing the catalog or a table file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV encoding/decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl EngineError {
    /// Returns true for validation-kind failures: parse errors, semantic
    /// errors, and the uninitialized catalog. Environment failures (IO,
    /// corrupt files) are not validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::Io(_) | Self::Serialization(_) | Self::Csv(_) | Self::CorruptCell { .. }
                | Self::InvalidId(_)
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
