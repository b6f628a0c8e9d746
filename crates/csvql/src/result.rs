//! Result sets and the row-oriented operators over them.
//!
//! A result set is an immutable snapshot; every operator returns a new set
//! rather than mutating in place.

use core::cmp::Ordering;

use csvql_core::ast::{ColumnRef, CompareOp, Comparison, Operand, OrderDirection, Predicate};

use crate::catalog::Column;
use crate::error::{EngineError, Result};
use crate::value::Value;

/// A row of typed values; the first element is always the integer id.
pub type Row = Vec<Value>;

/// An in-memory view of (columns, rows) produced by reading a table or by
/// an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Origin table name; synthesized for joins.
    pub table_name: String,
    /// Ordered columns. Under a join, names are `table.column` prefixed.
    pub columns: Vec<Column>,
    /// Ordered rows.
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Creates a result set.
    #[must_use]
    pub const fn new(table_name: String, columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self {
            table_name,
            columns,
            rows,
        }
    }

    /// Returns the header names (already lowercase).
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Resolves a header name to its column index.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHeader` if no column has this name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| EngineError::UnknownHeader(name.to_string()))
    }

    /// Inner join: the cartesian product of both row sets, keeping the
    /// concatenated rows that satisfy the join predicate. Nested loop,
    /// O(|L|*|R|).
    ///
    /// # Errors
    ///
    /// Returns an error when the predicate references unknown columns or
    /// mismatched types.
    pub fn inner_join(&self, other: &Self, on: &Predicate) -> Result<Self> {
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        let headers: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();

        let mut rows = Vec::new();
        for row in &self.rows {
            for other_row in &other.rows {
                let mut joined = row.clone();
                joined.extend(other_row.iter().cloned());
                if eval_predicate(on, &joined, &columns, &headers)? {
                    rows.push(joined);
                }
            }
        }

        Ok(Self {
            table_name: format!("{} INNER JOIN {}", self.table_name, other.table_name),
            columns,
            rows,
        })
    }

    /// Keeps the rows satisfying the predicate.
    ///
    /// # Errors
    ///
    /// Returns an error when the predicate references unknown columns or
    /// mismatched types.
    pub fn filter(&self, predicate: &Predicate) -> Result<Self> {
        let headers = self.headers();
        let mut rows = Vec::new();
        for row in &self.rows {
            if eval_predicate(predicate, row, &self.columns, &headers)? {
                rows.push(row.clone());
            }
        }

        Ok(Self {
            table_name: self.table_name.clone(),
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Projects to the named columns, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHeader` when a field does not resolve.
    pub fn project(&self, fields: &[ColumnRef]) -> Result<Self> {
        let indexes = fields
            .iter()
            .map(|f| self.column_index(&f.header()))
            .collect::<Result<Vec<_>>>()?;

        let columns = indexes.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indexes.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Self {
            table_name: self.table_name.clone(),
            columns,
            rows,
        })
    }

    /// Stable sort by the named column's natural ordering; DESC flips the
    /// comparator, so equal keys keep their original relative order either
    /// way.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHeader` when the field does not resolve.
    pub fn order_by(&self, field: &ColumnRef, direction: OrderDirection) -> Result<Self> {
        let index = self.column_index(&field.header())?;

        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            // Columns are homogeneous, so a cross-type comparison cannot
            // occur here; Equal keeps the sort stable if it somehow did.
            let ordering = a[index].compare(&b[index]).unwrap_or(Ordering::Equal);
            match direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            }
        });

        Ok(Self {
            table_name: self.table_name.clone(),
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Truncates to the first `n` rows.
    #[must_use]
    pub fn limit(&self, n: usize) -> Self {
        let mut rows = self.rows.clone();
        rows.truncate(n);
        Self {
            table_name: self.table_name.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// Evaluates a predicate tree against one row: AND requires both sides, OR
/// either side.
fn eval_predicate(
    predicate: &Predicate,
    row: &[Value],
    columns: &[Column],
    headers: &[String],
) -> Result<bool> {
    match predicate {
        Predicate::Comparison(cmp) => eval_comparison(cmp, row, columns, headers),
        Predicate::And(left, right) => Ok(eval_predicate(left, row, columns, headers)?
            && eval_predicate(right, row, columns, headers)?),
        Predicate::Or(left, right) => Ok(eval_predicate(left, row, columns, headers)?
            || eval_predicate(right, row, columns, headers)?),
    }
}

/// Evaluates one comparison. The left side must resolve to a column; the
/// right side is a column if it names one, otherwise a literal coerced by
/// the left column's type.
fn eval_comparison(
    cmp: &Comparison,
    row: &[Value],
    columns: &[Column],
    headers: &[String],
) -> Result<bool> {
    let left_ref = cmp
        .left
        .as_column()
        .ok_or_else(|| EngineError::UnknownHeader(cmp.left.to_string()))?;
    let left_index = find_header(headers, &left_ref.header())?;
    let left_val = &row[left_index];
    let left_ty = columns[left_index].ty;

    let right_val = match &cmp.right {
        Operand::Column(col) => {
            let right_index = find_header(headers, &col.header())?;
            row[right_index].clone()
        }
        Operand::Literal(literal) => Value::from_literal(literal, left_ty)?,
    };

    let ordering = left_val
        .compare(&right_val)
        .ok_or(EngineError::TypeMismatch {
            left: left_ty,
            right: right_val.ty(),
        })?;

    Ok(match cmp.op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::NotEq => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::LtEq => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::GtEq => ordering != Ordering::Less,
    })
}

fn find_header(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| EngineError::UnknownHeader(name.to_string()))
}
