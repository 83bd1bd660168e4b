//! In-memory fact database with opaque byte import/export.
//!
//! A factbase is an ordered list of facts; a fact maps property names to
//! typed scalars (integer, UTC timestamp, or string). The serialized form
//! is JSON — callers that ship it over the wire treat it as opaque bytes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::query::Predicate;

/// A single typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer value.
    Int(i64),

    /// UTC timestamp, serialized as RFC3339.
    Time(DateTime<Utc>),

    /// String value.
    Str(String),
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

/// One fact: a map from property name to scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fact(BTreeMap<String, Scalar>);

impl Fact {
    /// Set a property.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Read a property.
    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.0.get(name)
    }
}

/// The fact database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Factbase {
    facts: Vec<Fact>,
}

impl Factbase {
    /// Create an empty factbase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// True when no facts are present.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Append a new empty fact and return it for population.
    pub fn insert(&mut self) -> &mut Fact {
        self.facts.push(Fact::default());
        let last = self.facts.len() - 1;
        &mut self.facts[last]
    }

    /// Iterate over facts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Parse a factbase from its serialized bytes.
    pub fn import(bytes: &[u8]) -> CoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::Import {
            message: e.to_string(),
        })
    }

    /// Serialize the factbase to bytes.
    pub fn export(&self) -> CoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CoreError::Export {
            message: e.to_string(),
        })
    }

    /// Delete every fact matching the predicate; returns how many went.
    pub fn delete(&mut self, predicate: &Predicate) -> usize {
        let before = self.facts.len();
        self.facts.retain(|fact| !predicate.matches(fact));
        before - self.facts.len()
    }
}
