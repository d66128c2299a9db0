//! The closed set of template helpers.
//!
//! Helpers are resolved by name when a template is parsed; an unknown name or
//! a wrong argument count is a parse error, never a runtime surprise.

use std::fmt;

use serde_json::Value;

use super::evaluate::is_truthy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Helper {
    Eq,
    Ne,
    And,
    Or,
    Includes,
    Not,
    Json,
}

/// Accepted argument counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(1) => f.write_str("exactly 1 argument"),
            Self::Exactly(n) => write!(f, "exactly {n} arguments"),
            Self::AtLeast(1) => f.write_str("at least 1 argument"),
            Self::AtLeast(n) => write!(f, "at least {n} arguments"),
        }
    }
}

impl Helper {
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Ne,
        Self::And,
        Self::Or,
        Self::Includes,
        Self::Not,
        Self::Json,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::And => "and",
            Self::Or => "or",
            Self::Includes => "includes",
            Self::Not => "not",
            Self::Json => "json",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    pub const fn arity(self) -> Arity {
        match self {
            Self::Eq | Self::Ne | Self::Includes => Arity::Exactly(2),
            Self::And | Self::Or => Arity::AtLeast(1),
            Self::Not | Self::Json => Arity::Exactly(1),
        }
    }

    /// Apply to already-evaluated arguments. Arity was checked at parse time.
    pub fn apply(self, args: &[Value]) -> Value {
        match (self, args) {
            (Self::Eq, [a, b]) => Value::Bool(a == b),
            (Self::Ne, [a, b]) => Value::Bool(a != b),
            (Self::And, args) => Value::Bool(args.iter().all(is_truthy)),
            (Self::Or, args) => Value::Bool(args.iter().any(is_truthy)),
            (Self::Includes, [collection, item]) => Value::Bool(includes(collection, item)),
            (Self::Not, [a]) => Value::Bool(!is_truthy(a)),
            (Self::Json, [a]) => Value::String(a.to_string()),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Array membership, substring, or object key presence.
fn includes(collection: &Value, item: &Value) -> bool {
    match collection {
        Value::Array(items) => items.contains(item),
        Value::String(haystack) => match item {
            Value::String(needle) => haystack.contains(needle.as_str()),
            Value::Null => false,
            other => haystack.contains(&other.to_string()),
        },
        Value::Object(map) => item.as_str().is_some_and(|key| map.contains_key(key)),
        _ => false,
    }
}
