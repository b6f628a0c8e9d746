//! Single-user relational database over CSV files.
//!
//! `csvql` ingests CSV files as typed tables, persists table data and a JSON
//! catalog on disk, and executes a small SQL dialect (SELECT with one
//! optional INNER JOIN, INSERT, UPDATE, DELETE) against that store.
//!
//! # Architecture
//!
//! - **catalog** - The in-memory database model and its persisted JSON form
//! - **storage** - The CSV row codec and whole-file table I/O
//! - **result** - Typed row snapshots and the pure operators over them
//!   (join, filter, project, order, limit)
//! - **validate** - Static semantic checks of a statement against the catalog
//! - **exec** - The executor: runs a validated statement and persists mutations
//! - **import** - One-shot CSV ingestion that builds the catalog
//!
//! Parsing lives in the `csvql-core` crate; statements arrive here already
//! tokenized into an AST.
//!
//! # Example
//!
//! ```rust,no_run
//! use csvql::prelude::*;
//! use csvql_core::Parser;
//!
//! # fn main() -> csvql::error::Result<()> {
//! let config = StoreConfig::new("data");
//! let mut meta = Metadata::load(&config)?;
//!
//! let statement = Parser::new("SELECT name FROM users WHERE age >= 18")
//!     .parse_statement()?;
//! validate(&statement, &meta.database)?;
//!
//! let outcome = Executor::new(&mut meta, &config).execute(&statement)?;
//! if let Outcome::Rows(rs) = outcome {
//!     println!("{rs}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The engine is single-threaded and assumes exclusive access to the data
//! directory; there is no locking and no crash-consistency guarantee beyond
//! whole-file rewrites.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exec;
pub mod import;
pub mod render;
pub mod result;
pub mod storage;
pub mod validate;
pub mod value;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{Column, ColumnType, Database, Metadata, Table, ID_COLUMN};
    pub use crate::config::StoreConfig;
    pub use crate::error::{EngineError, Result};
    pub use crate::exec::{Executor, Outcome};
    pub use crate::import::import_csv;
    pub use crate::render::render_table;
    pub use crate::result::{ResultSet, Row};
    pub use crate::storage::{read_table, write_table};
    pub use crate::validate::validate;
    pub use crate::value::Value;
}
