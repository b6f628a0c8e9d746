//! Static semantic checks of a parsed statement against the catalog.
//!
//! Everything here is a validation-kind failure; execution assumes a
//! statement that passed these checks.

use csvql_core::ast::{
    ColumnRef, Comparison, DeleteStatement, InsertStatement, Literal, Operand, Predicate,
    Projection, SelectStatement, Statement, UpdateStatement,
};

use crate::catalog::{Column, Database, ID_COLUMN};
use crate::error::{EngineError, Result};
use crate::value::Value;

/// Validates a statement against the catalog.
///
/// # Errors
///
/// Returns the first semantic failure found: unknown table or column, type
/// mismatch, arity mismatch, or a write to `__id`.
pub fn validate(statement: &Statement, db: &Database) -> Result<()> {
    match statement {
        Statement::Select(s) => validate_select(s, db),
        Statement::Insert(i) => validate_insert(i, db),
        Statement::Update(u) => validate_update(u, db),
        Statement::Delete(d) => validate_delete(d, db),
    }
}

fn validate_select(select: &SelectStatement, db: &Database) -> Result<()> {
    let table = db.table(&select.table)?;

    // Under a join the active header set is both tables' prefixed headers;
    // bare names stop resolving.
    let headers = if let Some(join) = &select.join {
        let join_table = db.table(&join.table)?;
        let mut headers = table.prefixed_headers();
        headers.extend(join_table.prefixed_headers());
        validate_predicate(&join.on, db, &headers, &select.table)?;
        headers
    } else {
        table.headers()
    };

    if let Some(where_clause) = &select.where_clause {
        validate_predicate(where_clause, db, &headers, &select.table)?;
    }

    if let Projection::Columns(fields) = &select.projection {
        for field in fields {
            if let Some(table_name) = &field.table {
                if !db.has_table(table_name) {
                    return Err(EngineError::UnknownTable(table_name.clone()));
                }
            }
            require_header(&headers, field, &select.table)?;
        }
    }

    if let Some(order) = &select.order_by {
        require_header(&headers, &order.field, &select.table)?;
    }

    Ok(())
}

fn validate_insert(insert: &InsertStatement, db: &Database) -> Result<()> {
    if insert.columns.len() != insert.values.len() {
        return Err(EngineError::ArityMismatch {
            fields: insert.columns.len(),
            values: insert.values.len(),
        });
    }

    let table = db.table(&insert.table)?;

    for (field, value) in insert.columns.iter().zip(&insert.values) {
        if field == ID_COLUMN {
            return Err(EngineError::IdColumnReadOnly);
        }
        let column = table.column(field)?;
        check_literal(value, column)?;
    }

    Ok(())
}

fn validate_update(update: &UpdateStatement, db: &Database) -> Result<()> {
    let table = db.table(&update.table)?;

    for assignment in &update.assignments {
        if assignment.column == ID_COLUMN {
            return Err(EngineError::IdColumnReadOnly);
        }
        let column = table.column(&assignment.column)?;
        check_literal(&assignment.value, column)?;
    }

    if let Some(where_clause) = &update.where_clause {
        validate_predicate(where_clause, db, &table.headers(), &update.table)?;
    }

    Ok(())
}

fn validate_delete(delete: &DeleteStatement, db: &Database) -> Result<()> {
    let table = db.table(&delete.table)?;

    if let Some(where_clause) = &delete.where_clause {
        validate_predicate(where_clause, db, &table.headers(), &delete.table)?;
    }

    Ok(())
}

fn validate_predicate(
    predicate: &Predicate,
    db: &Database,
    headers: &[String],
    default_table: &str,
) -> Result<()> {
    match predicate {
        Predicate::Comparison(cmp) => validate_comparison(cmp, db, headers, default_table),
        Predicate::And(left, right) | Predicate::Or(left, right) => {
            validate_predicate(left, db, headers, default_table)?;
            validate_predicate(right, db, headers, default_table)
        }
    }
}

fn validate_comparison(
    cmp: &Comparison,
    db: &Database,
    headers: &[String],
    default_table: &str,
) -> Result<()> {
    let left_ref = cmp
        .left
        .as_column()
        .ok_or_else(|| EngineError::UnknownHeader(cmp.left.to_string()))?;
    if !headers.contains(&left_ref.header()) {
        return Err(EngineError::UnknownHeader(left_ref.header()));
    }
    let left_col = resolve_column(left_ref, db, default_table)?;

    match &cmp.right {
        Operand::Column(right_ref) => {
            if !headers.contains(&right_ref.header()) {
                return Err(EngineError::UnknownHeader(right_ref.header()));
            }
            let right_col = resolve_column(right_ref, db, default_table)?;
            if left_col.ty != right_col.ty {
                return Err(EngineError::TypeMismatch {
                    left: left_col.ty,
                    right: right_col.ty,
                });
            }
            Ok(())
        }
        Operand::Literal(literal) => check_literal(literal, left_col),
    }
}

/// Resolves a column reference through the catalog. Qualified references
/// must name a known table; bare references resolve in the statement's
/// table.
fn resolve_column<'a>(
    column_ref: &ColumnRef,
    db: &'a Database,
    default_table: &str,
) -> Result<&'a Column> {
    let table_name = column_ref.table.as_deref().unwrap_or(default_table);
    let table = db.table(table_name)?;
    table.column(&column_ref.name)
}

/// Checks that a literal is well-formed for a column: int for int, int or
/// float for float, quoted for str, quoted ISO-8601 for datetime.
fn check_literal(literal: &Literal, column: &Column) -> Result<()> {
    Value::from_literal(literal, column.ty).map(|_| ())
}

fn require_header(headers: &[String], field: &ColumnRef, table: &str) -> Result<()> {
    if headers.contains(&field.header()) {
        Ok(())
    } else {
        Err(EngineError::UnknownColumn {
            table: table.to_string(),
            column: field.header(),
        })
    }
}
