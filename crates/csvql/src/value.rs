//! Typed cell values and their text encoding.

use core::cmp::Ordering;
use core::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use csvql_core::ast::Literal;

use crate::catalog::{Column, ColumnType};
use crate::error::{EngineError, Result};

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    Str(String),
    /// Datetime value.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub const fn ty(&self) -> ColumnType {
        match self {
            Self::Int(_) => ColumnType::Int,
            Self::Float(_) => ColumnType::Float,
            Self::Str(_) => ColumnType::Str,
            Self::DateTime(_) => ColumnType::DateTime,
        }
    }

    /// Returns the zero value of a column type: `0`, `0.0`, `""`, or the
    /// epoch. Empty cells decode to these.
    #[must_use]
    pub fn zero(ty: ColumnType) -> Self {
        match ty {
            ColumnType::Int => Self::Int(0),
            ColumnType::Float => Self::Float(0.0),
            ColumnType::Str => Self::Str(String::new()),
            ColumnType::DateTime => Self::DateTime(NaiveDateTime::UNIX_EPOCH),
        }
    }

    /// Decodes a raw cell from a table file.
    ///
    /// # Errors
    ///
    /// Returns `CorruptCell` when the text does not parse as the column's
    /// type.
    pub fn decode(text: &str, column: &Column) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::zero(column.ty));
        }

        let corrupt = || EngineError::CorruptCell {
            column: column.name.clone(),
            ty: column.ty,
            value: text.to_string(),
        };

        match column.ty {
            ColumnType::Int => text.trim().parse().map(Self::Int).map_err(|_| corrupt()),
            ColumnType::Float => text.trim().parse().map(Self::Float).map_err(|_| corrupt()),
            ColumnType::Str => Ok(Self::Str(unquote(text).to_string())),
            ColumnType::DateTime => parse_datetime(unquote(text))
                .map(Self::DateTime)
                .ok_or_else(corrupt),
        }
    }

    /// Encodes this value for a table file: datetimes as ISO-8601, floats
    /// with exactly four fractional digits, ints and strings in their
    /// natural form.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => format!("{v:.4}"),
            Self::Str(v) => v.clone(),
            Self::DateTime(v) => v.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        }
    }

    /// Converts a query literal to a value of the given column type.
    ///
    /// Int literals widen to float columns; string literals carry both str
    /// and datetime values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLiteral` when the literal's shape does not fit the
    /// column type.
    pub fn from_literal(literal: &Literal, ty: ColumnType) -> Result<Self> {
        let invalid = || EngineError::InvalidLiteral {
            ty,
            value: literal.to_string(),
        };

        match (ty, literal) {
            (ColumnType::Int, Literal::Int(v)) => Ok(Self::Int(*v)),
            #[allow(clippy::cast_precision_loss)]
            (ColumnType::Float, Literal::Int(v)) => Ok(Self::Float(*v as f64)),
            (ColumnType::Float, Literal::Float(v)) => Ok(Self::Float(*v)),
            (ColumnType::Str, Literal::Str(v)) => Ok(Self::Str(v.clone())),
            (ColumnType::DateTime, Literal::Str(v)) => {
                parse_datetime(v).map(Self::DateTime).ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }

    /// Compares two values of the same type; returns `None` for mixed
    /// types. Ordering on str is lexicographic, on datetime chronological,
    /// on numerics numeric.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Some(a.total_cmp(b)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Returns true when the string is surrounded by a matching pair of quotes.
#[must_use]
pub fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')))
}

/// Strips a matching pair of surrounding quotes, if present.
#[must_use]
pub fn unquote(s: &str) -> &str {
    let trimmed = s.trim();
    if is_quoted(trimmed) {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Parses an ISO-8601 datetime. Accepts the extended `T` form, a space
/// separator, and a bare date (midnight).
#[must_use]
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    s.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
