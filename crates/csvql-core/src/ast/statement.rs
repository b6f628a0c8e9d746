//! SQL statement AST types.

use core::fmt;

use super::predicate::{ColumnRef, Literal, Predicate};

/// Order direction for ORDER BY.
///
/// The dialect requires an explicit direction; there is no implicit ASC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The column to order by.
    pub field: ColumnRef,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

/// An inner-join clause. USING is desugared by the parser, so the join
/// condition is always a predicate here.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The table to join, lowercase.
    pub table: String,
    /// The join condition.
    pub on: Predicate,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JOIN {} ON {}", self.table, self.on)
    }
}

/// The projected columns of a SELECT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*`: every column of the source result set.
    All,
    /// An explicit column list.
    Columns(Vec<ColumnRef>),
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Columns(cols) => {
                for (i, col) in cols.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{col}")?;
                }
                Ok(())
            }
        }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// The columns to project.
    pub projection: Projection,
    /// The source table, lowercase.
    pub table: String,
    /// At most one inner join.
    pub join: Option<JoinClause>,
    /// The WHERE clause.
    pub where_clause: Option<Predicate>,
    /// The ORDER BY clause.
    pub order_by: Option<OrderBy>,
    /// The LIMIT clause.
    pub limit: Option<u64>,
}

impl SelectStatement {
    /// Returns true when this statement joins a second table.
    #[must_use]
    pub const fn is_join(&self) -> bool {
        self.join.is_some()
    }

    /// Sets a limit when the query did not carry one. The calling surface
    /// uses this to cap unbounded SELECTs.
    pub fn default_limit(&mut self, limit: u64) {
        if self.limit.is_none() {
            self.limit = Some(limit);
        }
    }
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Table name, lowercase.
    pub table: String,
    /// Column names, lowercase.
    pub columns: Vec<String>,
    /// Values, positionally matching `columns`.
    pub values: Vec<Literal>,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column name, lowercase.
    pub column: String,
    /// The new value.
    pub value: Literal,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Table name, lowercase.
    pub table: String,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// The WHERE clause.
    pub where_clause: Option<Predicate>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// Table name, lowercase.
    pub table: String,
    /// The WHERE clause.
    pub where_clause: Option<Predicate>,
}

/// A parsed SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
}

// ===================================================================
// Display implementations
// ===================================================================

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.projection, self.table)?;
        if let Some(join) = &self.join {
            write!(f, " {join}")?;
        }
        if let Some(w) = &self.where_clause {
            write!(f, " WHERE {w}")?;
        }
        if let Some(o) = &self.order_by {
            write!(f, " ORDER BY {o}")?;
        }
        if let Some(l) = &self.limit {
            write!(f, " LIMIT {l}")?;
        }
        Ok(())
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {} (", self.table)?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{col}")?;
        }
        write!(f, ") VALUES (")?;
        for (i, val) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{val}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {} SET", self.table)?;
        for (i, a) in self.assignments.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {a}")?;
        }
        if let Some(w) = &self.where_clause {
            write!(f, " WHERE {w}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(w) = &self.where_clause {
            write!(f, " WHERE {w}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Insert(i) => write!(f, "{i}"),
            Self::Update(u) => write!(f, "{u}"),
            Self::Delete(d) => write!(f, "{d}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction() {
        assert_eq!(OrderDirection::Asc.as_str(), "ASC");
        assert_eq!(OrderDirection::Desc.as_str(), "DESC");
    }

    #[test]
    fn test_default_limit_only_fills_gaps() {
        let mut select = SelectStatement {
            projection: Projection::All,
            table: String::from("users"),
            join: None,
            where_clause: None,
            order_by: None,
            limit: Some(5),
        };
        select.default_limit(100);
        assert_eq!(select.limit, Some(5));

        select.limit = None;
        select.default_limit(100);
        assert_eq!(select.limit, Some(100));
    }

    #[test]
    fn test_select_display() {
        let select = SelectStatement {
            projection: Projection::Columns(vec![ColumnRef::bare("name")]),
            table: String::from("users"),
            join: None,
            where_clause: None,
            order_by: Some(OrderBy {
                field: ColumnRef::bare("age"),
                direction: OrderDirection::Desc,
            }),
            limit: Some(5),
        };
        assert_eq!(
            select.to_string(),
            "SELECT name FROM users ORDER BY age DESC LIMIT 5"
        );
    }
}
