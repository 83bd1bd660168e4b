//! Deletion queries over the factbase.
//!
//! The supported language is a single parenthesized term `(op prop value)`
//! with `op` one of `lt`, `gt`, `eq`. Value literals are integers, RFC3339
//! timestamps, or bare strings. Facts lacking the property never match, and
//! comparisons across types never match.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::factbase::{Fact, Scalar};

/// Comparison operator of a query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Lt,
    Gt,
    Eq,
}

/// A parsed deletion query.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    op: Op,
    prop: String,
    value: Scalar,
}

impl Predicate {
    /// Parse a query expression like `(lt time 2024-01-01T00:00:00Z)`.
    pub fn parse(expr: &str) -> CoreResult<Self> {
        let inner = expr
            .trim()
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| CoreError::Query {
                message: format!("expected a parenthesized term, got '{}'", expr),
            })?;

        let mut tokens = inner.split_whitespace();
        let op = match tokens.next() {
            Some("lt") => Op::Lt,
            Some("gt") => Op::Gt,
            Some("eq") => Op::Eq,
            Some(other) => {
                return Err(CoreError::Query {
                    message: format!("unknown operator '{}'", other),
                })
            }
            None => {
                return Err(CoreError::Query {
                    message: "empty term".to_string(),
                })
            }
        };
        let prop = tokens.next().ok_or_else(|| CoreError::Query {
            message: "missing property name".to_string(),
        })?;
        let literal = tokens.next().ok_or_else(|| CoreError::Query {
            message: "missing value literal".to_string(),
        })?;
        if tokens.next().is_some() {
            return Err(CoreError::Query {
                message: format!("trailing tokens in '{}'", expr),
            });
        }

        Ok(Self {
            op,
            prop: prop.to_string(),
            value: parse_literal(literal),
        })
    }

    /// Whether a fact satisfies this predicate.
    pub fn matches(&self, fact: &Fact) -> bool {
        let Some(actual) = fact.get(&self.prop) else {
            return false;
        };
        let ordering = match (actual, &self.value) {
            (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
            (Scalar::Time(a), Scalar::Time(b)) => a.cmp(b),
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            _ => return false,
        };
        match self.op {
            Op::Lt => ordering == Ordering::Less,
            Op::Gt => ordering == Ordering::Greater,
            Op::Eq => ordering == Ordering::Equal,
        }
    }
}

fn parse_literal(literal: &str) -> Scalar {
    if let Ok(number) = literal.parse::<i64>() {
        return Scalar::Int(number);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(literal) {
        return Scalar::Time(time.with_timezone(&Utc));
    }
    Scalar::Str(literal.to_string())
}
