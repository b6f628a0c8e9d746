//! Predicate (WHERE / ON condition) AST types.

use core::fmt;

/// A literal value as it appeared in the query text.
///
/// String literals cover both `str` and `datetime` operands; which one a
/// given literal is becomes known only once a column type is in hand.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// Quoted string literal (quotes already stripped).
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "'{v}'"),
        }
    }
}

/// A column reference, optionally qualified with a table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Table qualifier (`table.col` form), lowercase.
    pub table: Option<String>,
    /// Column name, lowercase.
    pub name: String,
}

impl ColumnRef {
    /// Creates a bare column reference.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a table-qualified column reference.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Returns the header form of this reference: `table.col` when
    /// qualified, the bare name otherwise.
    #[must_use]
    pub fn header(&self) -> String {
        match &self.table {
            Some(table) => format!("{table}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write!(f, "{table}.")?;
        }
        f.write_str(&self.name)
    }
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A column reference.
    Column(ColumnRef),
    /// A literal value.
    Literal(Literal),
}

impl Operand {
    /// Returns the column reference if this operand is one.
    #[must_use]
    pub const fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Self::Column(col) => Some(col),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(col) => write!(f, "{col}"),
            Self::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// =
    Eq,
    /// !=
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
}

impl CompareOp {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single binary comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Left operand.
    pub left: Operand,
    /// Operator.
    pub op: CompareOp,
    /// Right operand.
    pub right: Operand,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// A boolean predicate tree.
///
/// The dialect allows at most two comparisons joined by a single AND or OR;
/// the parser enforces that depth limit, so evaluation can recurse without a
/// nesting bound of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A single comparison.
    Comparison(Comparison),
    /// Both sides must hold.
    And(Box<Predicate>, Box<Predicate>),
    /// Either side must hold.
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// Creates a comparison predicate.
    #[must_use]
    pub const fn comparison(left: Operand, op: CompareOp, right: Operand) -> Self {
        Self::Comparison(Comparison { left, op, right })
    }

    /// Visits every comparison in the tree.
    pub fn for_each_comparison<'a>(&'a self, f: &mut impl FnMut(&'a Comparison)) {
        match self {
            Self::Comparison(cmp) => f(cmp),
            Self::And(left, right) | Self::Or(left, right) => {
                left.for_each_comparison(f);
                right.for_each_comparison(f);
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison(cmp) => write!(f, "{cmp}"),
            Self::And(left, right) => write!(f, "{left} AND {right}"),
            Self::Or(left, right) => write!(f, "{left} OR {right}"),
        }
    }
}
