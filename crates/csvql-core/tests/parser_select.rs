//! Tests for SELECT statements.

mod common;
use common::*;

use csvql_core::ast::{
    ColumnRef, CompareOp, Comparison, Literal, Operand, OrderDirection, Predicate, Projection,
};

// ===================================================================
// Projection and FROM
// ===================================================================

#[test]
fn select_star() {
    let s = parse_select("SELECT * FROM users");
    assert_eq!(s.projection, Projection::All);
    assert_eq!(s.table, "users");
    assert!(s.join.is_none());
    assert!(s.where_clause.is_none());
    assert!(s.order_by.is_none());
    assert_eq!(s.limit, None);
    round_trip("SELECT * FROM users");
}

#[test]
fn select_column_list() {
    let s = parse_select("SELECT name, age FROM users");
    assert_eq!(
        s.projection,
        Projection::Columns(vec![ColumnRef::bare("name"), ColumnRef::bare("age")])
    );
    round_trip("SELECT name, age FROM users");
}

#[test]
fn select_qualified_columns() {
    let s = parse_select("SELECT users.name, orders.total FROM users JOIN orders ON users.__id = orders.user_id");
    assert_eq!(
        s.projection,
        Projection::Columns(vec![
            ColumnRef::qualified("users", "name"),
            ColumnRef::qualified("orders", "total"),
        ])
    );
}

#[test]
fn select_identifiers_lowercased() {
    let s = parse_select("SELECT Name FROM Users");
    assert_eq!(s.table, "users");
    assert_eq!(
        s.projection,
        Projection::Columns(vec![ColumnRef::bare("name")])
    );
}

#[test]
fn select_trailing_semicolon() {
    let s = parse_select("SELECT * FROM users;");
    assert_eq!(s.table, "users");
}

#[test]
fn select_newlines_and_tabs() {
    let s = parse_select("SELECT *\nFROM\tusers\n WHERE age > 18");
    assert_eq!(s.table, "users");
    assert!(s.where_clause.is_some());
}

// ===================================================================
// JOIN
// ===================================================================

#[test]
fn select_join_on() {
    let s = parse_select("SELECT * FROM users JOIN orders ON users.__id = orders.user_id");
    let join = s.join.expect("join");
    assert_eq!(join.table, "orders");
    assert_eq!(
        join.on,
        Predicate::comparison(
            Operand::Column(ColumnRef::qualified("users", "__id")),
            CompareOp::Eq,
            Operand::Column(ColumnRef::qualified("orders", "user_id")),
        )
    );
}

#[test]
fn select_inner_join_keyword() {
    let s = parse_select("SELECT * FROM users INNER JOIN orders ON users.__id = orders.user_id");
    assert!(s.is_join());
}

#[test]
fn select_join_using_desugars_to_on_equality() {
    let using = parse_select("SELECT * FROM users JOIN orders USING (user_id)");
    let on = parse_select("SELECT * FROM users JOIN orders ON users.user_id = orders.user_id");
    assert_eq!(using.join, on.join);
}

#[test]
fn select_join_without_condition_is_error() {
    let _ = parse_err("SELECT * FROM users JOIN orders WHERE age > 1");
}

// ===================================================================
// WHERE
// ===================================================================

#[test]
fn select_where_comparison() {
    let s = parse_select("SELECT * FROM users WHERE age >= 18");
    assert_eq!(
        s.where_clause,
        Some(Predicate::comparison(
            Operand::Column(ColumnRef::bare("age")),
            CompareOp::GtEq,
            Operand::Literal(Literal::Int(18)),
        ))
    );
}

#[test]
fn select_where_and() {
    let s = parse_select("SELECT * FROM users WHERE age > 18 AND name = 'ana'");
    assert!(matches!(s.where_clause, Some(Predicate::And(_, _))));
}

#[test]
fn select_where_or() {
    let s = parse_select("SELECT * FROM users WHERE age > 40 OR age < 20");
    assert!(matches!(s.where_clause, Some(Predicate::Or(_, _))));
}

#[test]
fn select_where_keyword_inside_string_literal() {
    // A substring-scanning parser would see the FROM inside the quotes.
    let s = parse_select("SELECT * FROM users WHERE name = \"from\"");
    assert_eq!(
        s.where_clause,
        Some(Predicate::comparison(
            Operand::Column(ColumnRef::bare("name")),
            CompareOp::Eq,
            Operand::Literal(Literal::Str(String::from("from"))),
        ))
    );
}

#[test]
fn select_where_three_conditions_is_error() {
    let _ = parse_err("SELECT * FROM users WHERE a = 1 AND b = 2 AND c = 3");
    let _ = parse_err("SELECT * FROM users WHERE a = 1 AND b = 2 OR c = 3");
    let _ = parse_err("SELECT * FROM users WHERE a = 1 OR b = 2 OR c = 3");
}

#[test]
fn select_where_missing_closing_quote_is_error() {
    let _ = parse_err("SELECT * FROM users WHERE name = 'ana");
}

#[test]
fn select_where_operator_precedence_in_scan() {
    // >= must win over both > and = when scanning the comparison.
    let s = parse_select("SELECT * FROM users WHERE age >= 18");
    let Some(Predicate::Comparison(Comparison { op, .. })) = s.where_clause else {
        panic!("expected comparison");
    };
    assert_eq!(op, CompareOp::GtEq);
}

// ===================================================================
// ORDER BY and LIMIT
// ===================================================================

#[test]
fn select_order_by_desc() {
    let s = parse_select("SELECT * FROM users ORDER BY age DESC");
    let order = s.order_by.expect("order by");
    assert_eq!(order.field, ColumnRef::bare("age"));
    assert_eq!(order.direction, OrderDirection::Desc);
}

#[test]
fn select_order_by_requires_direction() {
    let _ = parse_err("SELECT * FROM users ORDER BY age");
    let _ = parse_err("SELECT * FROM users ORDER BY age sideways");
}

#[test]
fn select_limit() {
    let s = parse_select("SELECT * FROM users LIMIT 5");
    assert_eq!(s.limit, Some(5));
}

#[test]
fn select_limit_zero() {
    let s = parse_select("SELECT * FROM users LIMIT 0");
    assert_eq!(s.limit, Some(0));
}

#[test]
fn select_limit_rejects_negative_and_non_integer() {
    let _ = parse_err("SELECT * FROM users LIMIT -1");
    let _ = parse_err("SELECT * FROM users LIMIT five");
    let _ = parse_err("SELECT * FROM users LIMIT 1.5");
}

#[test]
fn select_full_clause_order() {
    let s = parse_select(
        "SELECT name, age FROM users WHERE age >= 18 ORDER BY age DESC LIMIT 5",
    );
    assert!(s.where_clause.is_some());
    assert!(s.order_by.is_some());
    assert_eq!(s.limit, Some(5));
    round_trip("SELECT name, age FROM users WHERE age >= 18 ORDER BY age DESC LIMIT 5");
}
