//! Statement execution against the catalog and table files.

use csvql_core::ast::{
    DeleteStatement, InsertStatement, Literal, Projection, SelectStatement, Statement,
    UpdateStatement,
};
use tracing::{debug, info};

use crate::catalog::{Metadata, Table, ID_COLUMN};
use crate::config::StoreConfig;
use crate::error::{EngineError, Result};
use crate::result::{ResultSet, Row};
use crate::storage;
use crate::value::Value;

/// What a statement produced: rows for SELECT, the affected id list for
/// mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// SELECT result rows.
    Rows(ResultSet),
    /// The `__id` values a mutation touched (one entry for INSERT).
    Affected(Vec<i64>),
}

/// Runs validated statements. The executor owns the catalog reference for
/// the duration of a statement; mutations rewrite the table file in full
/// and save the catalog.
pub struct Executor<'a> {
    meta: &'a mut Metadata,
    config: &'a StoreConfig,
}

impl<'a> Executor<'a> {
    /// Creates an executor over the loaded catalog.
    #[must_use]
    pub fn new(meta: &'a mut Metadata, config: &'a StoreConfig) -> Self {
        Self { meta, config }
    }

    /// Executes one statement.
    ///
    /// # Errors
    ///
    /// Returns semantic errors a validator would also have caught, plus
    /// IO/CSV failures from the underlying files.
    pub fn execute(&mut self, statement: &Statement) -> Result<Outcome> {
        match statement {
            Statement::Select(s) => self.select(s).map(Outcome::Rows),
            Statement::Insert(i) => self.insert(i).map(Outcome::Affected),
            Statement::Update(u) => self.update(u).map(Outcome::Affected),
            Statement::Delete(d) => self.delete(d).map(Outcome::Affected),
        }
    }

    /// Pipeline: read (prefixed iff joining) -> join -> where -> project ->
    /// order -> limit. The order is fixed; a limit before the sort would
    /// change results.
    fn select(&self, select: &SelectStatement) -> Result<ResultSet> {
        let db = &self.meta.database;
        let table = db.table(&select.table)?;

        let mut rs = storage::read_table(table, self.config, select.is_join())?;

        if let Some(join) = &select.join {
            let join_table = db.table(&join.table)?;
            let right = storage::read_table(join_table, self.config, true)?;
            rs = rs.inner_join(&right, &join.on)?;
        }

        if let Some(where_clause) = &select.where_clause {
            rs = rs.filter(where_clause)?;
        }

        if let Projection::Columns(fields) = &select.projection {
            rs = rs.project(fields)?;
        }

        if let Some(order) = &select.order_by {
            rs = rs.order_by(&order.field, order.direction)?;
        }

        if let Some(limit) = select.limit {
            rs = rs.limit(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        debug!(table = %select.table, rows = rs.rows.len(), "select complete");
        Ok(rs)
    }

    fn insert(&mut self, insert: &InsertStatement) -> Result<Vec<i64>> {
        let config = self.config;
        let new_id;
        {
            let table = self.meta.database.table_mut(&insert.table)?;
            let rs = storage::read_table(table, config, false)?;

            new_id = table.next_id;
            let row = build_row(table, &insert.columns, &insert.values)?;
            let mut rows = rs.rows;
            rows.push(row);
            table.next_id += 1;

            let rs = ResultSet::new(table.name.clone(), table.columns.clone(), rows);
            storage::write_table(table, config, &rs)?;
        }
        self.meta.save(config)?;

        info!(table = %insert.table, id = new_id, "inserted row");
        Ok(vec![new_id])
    }

    fn update(&mut self, update: &UpdateStatement) -> Result<Vec<i64>> {
        let table = self.meta.database.table(&update.table)?;
        let rs = storage::read_table(table, self.config, false)?;

        let filtered = match &update.where_clause {
            Some(predicate) => rs.filter(predicate)?,
            None => rs.clone(),
        };
        let affected = row_ids(&filtered, &table.name)?;

        let mut new_rows: Vec<Row> = Vec::with_capacity(rs.rows.len());
        for row in &rs.rows {
            if affected.contains(&row_id(row, &table.name)?) {
                let mut updated = row.clone();
                for assignment in &update.assignments {
                    let index = table
                        .columns
                        .iter()
                        .position(|c| c.name == assignment.column)
                        .ok_or_else(|| EngineError::UnknownColumn {
                            table: table.name.clone(),
                            column: assignment.column.clone(),
                        })?;
                    updated[index] =
                        Value::from_literal(&assignment.value, table.columns[index].ty)?;
                }
                new_rows.push(updated);
            } else {
                new_rows.push(row.clone());
            }
        }

        let rs = ResultSet::new(table.name.clone(), table.columns.clone(), new_rows);
        storage::write_table(table, self.config, &rs)?;
        self.meta.save(self.config)?;

        info!(table = %update.table, rows = affected.len(), "updated rows");
        Ok(affected)
    }

    fn delete(&mut self, delete: &DeleteStatement) -> Result<Vec<i64>> {
        let table = self.meta.database.table(&delete.table)?;
        let rs = storage::read_table(table, self.config, false)?;

        let filtered = match &delete.where_clause {
            Some(predicate) => rs.filter(predicate)?,
            None => rs.clone(),
        };
        let affected = row_ids(&filtered, &table.name)?;

        let mut remaining: Vec<Row> = Vec::with_capacity(rs.rows.len() - affected.len());
        for row in &rs.rows {
            if !affected.contains(&row_id(row, &table.name)?) {
                remaining.push(row.clone());
            }
        }

        let rs = ResultSet::new(table.name.clone(), table.columns.clone(), remaining);
        storage::write_table(table, self.config, &rs)?;
        // next_id never changes on DELETE; the save keeps the mutation paths
        // symmetric.
        self.meta.save(self.config)?;

        info!(table = %delete.table, rows = affected.len(), "deleted rows");
        Ok(affected)
    }
}

/// Builds an INSERT row: `__id` from the table's `next_id`, supplied fields
/// from their literals, omitted fields as the column's zero value.
fn build_row(table: &Table, fields: &[String], values: &[Literal]) -> Result<Row> {
    let mut row = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        if column.name == ID_COLUMN {
            row.push(Value::Int(table.next_id));
            continue;
        }
        match fields.iter().position(|f| f == &column.name) {
            Some(i) => row.push(Value::from_literal(&values[i], column.ty)?),
            None => row.push(Value::zero(column.ty)),
        }
    }
    Ok(row)
}

/// Extracts a row's id, which is always the first cell.
fn row_id(row: &Row, table: &str) -> Result<i64> {
    match row.first() {
        Some(Value::Int(id)) => Ok(*id),
        _ => Err(EngineError::InvalidId(table.to_string())),
    }
}

/// The ordered affected set of a filtered snapshot.
fn row_ids(rs: &ResultSet, table: &str) -> Result<Vec<i64>> {
    rs.rows.iter().map(|row| row_id(row, table)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Column, ColumnType};

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
    fn test_build_row_takes_next_id_and_zero_fills() {
        let table = users_table();
        let row = build_row(
            &table,
            &[String::from("name")],
            &[Literal::Str(String::from("dee"))],
        )
        .unwrap();

        assert_eq!(row[0], Value::Int(3));
        assert_eq!(row[1], Value::Str(String::from("dee")));
        assert_eq!(row[2], Value::Int(0));
        assert_eq!(row[3].encode(), "1970-01-01T00:00:00");
    }

    #[test]
    fn test_build_row_field_order_is_free() {
        let table = users_table();
        let row = build_row(
            &table,
            &[String::from("age"), String::from("name")],
            &[Literal::Int(25), Literal::Str(String::from("dee"))],
        )
        .unwrap();

        assert_eq!(row[1], Value::Str(String::from("dee")));
        assert_eq!(row[2], Value::Int(25));
    }

    #[test]
    fn test_row_id_requires_int() {
        let row: Row = vec![Value::Str(String::from("oops"))];
        assert!(matches!(
            row_id(&row, "users"),
            Err(EngineError::InvalidId(_))
        ));
    }
}
