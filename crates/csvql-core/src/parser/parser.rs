//! Recursive-descent parsers for the four statement kinds.

use super::error::ParseError;
use crate::ast::{
    Assignment, ColumnRef, CompareOp, Comparison, DeleteStatement, InsertStatement, JoinClause,
    Literal, Operand, OrderBy, OrderDirection, Predicate, Projection, SelectStatement, Statement,
    UpdateStatement,
};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// SQL statement parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parses a single SQL statement, consuming the whole input (a trailing
    /// `;` is allowed).
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid statement of this
    /// dialect.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = match self.current.as_keyword() {
            Some(Keyword::Select) => Statement::Select(self.parse_select_statement()?),
            Some(Keyword::Insert) => Statement::Insert(self.parse_insert_statement()?),
            Some(Keyword::Update) => Statement::Update(self.parse_update_statement()?),
            Some(Keyword::Delete) => Statement::Delete(self.parse_delete_statement()?),
            _ => {
                return Err(ParseError::unexpected(
                    "SELECT, INSERT, UPDATE, or DELETE",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };

        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current.is_eof() {
            return Err(ParseError::unexpected(
                "end of statement",
                self.current.kind.clone(),
                self.current.span,
            ));
        }

        Ok(statement)
    }

    // ===============================================================
    // Statements
    // ===============================================================

    fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        let projection = if self.check(&TokenKind::Star) {
            self.advance();
            Projection::All
        } else {
            let mut columns = vec![self.parse_column_ref()?];
            while self.check(&TokenKind::Comma) {
                self.advance();
                columns.push(self.parse_column_ref()?);
            }
            Projection::Columns(columns)
        };

        self.expect_keyword(Keyword::From)?;
        let table = self.expect_identifier()?;

        // At most one inner join; bare JOIN means INNER JOIN.
        let join = if self.check_keyword(Keyword::Inner) {
            self.advance();
            self.expect_keyword(Keyword::Join)?;
            Some(self.parse_join_clause(&table)?)
        } else if self.check_keyword(Keyword::Join) {
            self.advance();
            Some(self.parse_join_clause(&table)?)
        } else {
            None
        };

        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_predicate()?)
        } else {
            None
        };

        let order_by = if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            Some(self.parse_order_by()?)
        } else {
            None
        };

        let limit = if self.check_keyword(Keyword::Limit) {
            self.advance();
            Some(self.parse_limit()?)
        } else {
            None
        };

        Ok(SelectStatement {
            projection,
            table,
            join,
            where_clause,
            order_by,
            limit,
        })
    }

    fn parse_join_clause(&mut self, left_table: &str) -> Result<JoinClause, ParseError> {
        let table = self.expect_identifier()?;

        let on = if self.check_keyword(Keyword::On) {
            self.advance();
            self.parse_predicate()?
        } else if self.check_keyword(Keyword::Using) {
            // USING (c) desugars to the equality left.c = right.c.
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            let column = self.expect_identifier()?;
            self.expect(&TokenKind::RightParen)?;
            Predicate::comparison(
                Operand::Column(ColumnRef::qualified(left_table, column.clone())),
                CompareOp::Eq,
                Operand::Column(ColumnRef::qualified(table.clone(), column)),
            )
        } else {
            return Err(ParseError::new(
                "JOIN without ON or USING",
                self.current.span,
            ));
        };

        Ok(JoinClause { table, on })
    }

    fn parse_order_by(&mut self) -> Result<OrderBy, ParseError> {
        let field = self.parse_column_ref()?;

        // The direction is mandatory in this dialect.
        let direction = match self.current.as_keyword() {
            Some(Keyword::Asc) => {
                self.advance();
                OrderDirection::Asc
            }
            Some(Keyword::Desc) => {
                self.advance();
                OrderDirection::Desc
            }
            _ => {
                return Err(ParseError::unexpected(
                    "ASC or DESC after ORDER BY field",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };

        Ok(OrderBy { field, direction })
    }

    fn parse_limit(&mut self) -> Result<u64, ParseError> {
        match self.current.kind {
            TokenKind::Integer(n) => {
                let limit = u64::try_from(n).map_err(|_| {
                    ParseError::new("LIMIT must be a non-negative integer", self.current.span)
                })?;
                self.advance();
                Ok(limit)
            }
            _ => Err(ParseError::new(
                "LIMIT must be a non-negative integer",
                self.current.span,
            )),
        }
    }

    fn parse_insert_statement(&mut self) -> Result<InsertStatement, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.expect_identifier()?;

        self.expect(&TokenKind::LeftParen)?;
        let columns = self.parse_identifier_list()?;
        self.expect(&TokenKind::RightParen)?;

        self.expect_keyword(Keyword::Values)?;

        self.expect(&TokenKind::LeftParen)?;
        let mut values = vec![self.parse_literal()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            values.push(self.parse_literal()?);
        }
        self.expect(&TokenKind::RightParen)?;

        Ok(InsertStatement {
            table,
            columns,
            values,
        })
    }

    fn parse_update_statement(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.expect_identifier()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = vec![self.parse_assignment()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            assignments.push(self.parse_assignment()?);
        }

        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(UpdateStatement {
            table,
            assignments,
            where_clause,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let column = self.expect_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_literal()?;
        Ok(Assignment { column, value })
    }

    fn parse_delete_statement(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.expect_identifier()?;

        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(DeleteStatement {
            table,
            where_clause,
        })
    }

    // ===============================================================
    // Predicates
    // ===============================================================

    /// Parses a predicate: one comparison, optionally joined to a second by
    /// a single AND or OR. A third conjunct is rejected.
    fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        let first = self.parse_comparison()?;

        let predicate = match self.current.as_keyword() {
            Some(Keyword::And) => {
                self.advance();
                let second = self.parse_comparison()?;
                Predicate::And(
                    Box::new(Predicate::Comparison(first)),
                    Box::new(Predicate::Comparison(second)),
                )
            }
            Some(Keyword::Or) => {
                self.advance();
                let second = self.parse_comparison()?;
                Predicate::Or(
                    Box::new(Predicate::Comparison(first)),
                    Box::new(Predicate::Comparison(second)),
                )
            }
            _ => Predicate::Comparison(first),
        };

        if matches!(
            self.current.as_keyword(),
            Some(Keyword::And | Keyword::Or)
        ) {
            return Err(ParseError::new(
                "Invalid WHERE clause: only two conditions are supported",
                self.current.span,
            ));
        }

        Ok(predicate)
    }

    fn parse_comparison(&mut self) -> Result<Comparison, ParseError> {
        let left = self.parse_operand()?;

        let op = match self.current.kind {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::NotEq,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::LtEq => CompareOp::LtEq,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::GtEq => CompareOp::GtEq,
            _ => {
                return Err(ParseError::unexpected(
                    "a comparison operator",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        self.advance();

        let right = self.parse_operand()?;

        Ok(Comparison { left, op, right })
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        match &self.current.kind {
            TokenKind::Identifier(_) => Ok(Operand::Column(self.parse_column_ref()?)),
            TokenKind::Integer(_) | TokenKind::Float(_) | TokenKind::String(_)
            | TokenKind::Minus => Ok(Operand::Literal(self.parse_literal()?)),
            TokenKind::Error(message) => {
                Err(ParseError::new(message.clone(), self.current.span))
            }
            _ => Err(ParseError::unexpected(
                "a column or literal",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    // ===============================================================
    // Terminals
    // ===============================================================

    fn parse_column_ref(&mut self) -> Result<ColumnRef, ParseError> {
        let first = self.expect_identifier()?;
        if self.check(&TokenKind::Dot) {
            self.advance();
            let name = self.expect_identifier()?;
            Ok(ColumnRef::qualified(first, name))
        } else {
            Ok(ColumnRef::bare(first))
        }
    }

    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let negate = if self.check(&TokenKind::Minus) {
            self.advance();
            true
        } else {
            false
        };

        let literal = match &self.current.kind {
            TokenKind::Integer(n) => Literal::Int(if negate { -n } else { *n }),
            TokenKind::Float(f) => Literal::Float(if negate { -f } else { *f }),
            TokenKind::String(s) if !negate => Literal::Str(s.clone()),
            TokenKind::Error(message) => {
                return Err(ParseError::new(message.clone(), self.current.span));
            }
            _ => {
                return Err(ParseError::unexpected(
                    "a literal value",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        self.advance();
        Ok(literal)
    }

    fn parse_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut identifiers = vec![self.expect_identifier()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            identifiers.push(self.expect_identifier()?);
        }
        Ok(identifiers)
    }

    // ===============================================================
    // Token machinery
    // ===============================================================

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_keyword() == Some(keyword)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                format!("{kind:?}"),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                keyword.as_str(),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Consumes an identifier and returns it lowercased; identifiers are
    /// case-insensitive and stored in lowercase throughout the system.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.to_ascii_lowercase();
                self.advance();
                Ok(name)
            }
            TokenKind::Error(message) => {
                Err(ParseError::new(message.clone(), self.current.span))
            }
            _ => Err(ParseError::unexpected(
                "an identifier",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }
}
