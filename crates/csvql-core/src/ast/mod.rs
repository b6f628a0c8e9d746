//! AST types for parsed csvql statements.

mod predicate;
mod statement;

pub use predicate::{ColumnRef, CompareOp, Comparison, Literal, Operand, Predicate};
pub use statement::{
    Assignment, DeleteStatement, InsertStatement, JoinClause, OrderBy, OrderDirection, Projection,
    SelectStatement, Statement, UpdateStatement,
};
