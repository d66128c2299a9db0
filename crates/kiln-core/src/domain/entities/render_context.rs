//! The value templates are evaluated against.
//!
//! A [`RenderContext`] is built once per generation run from a
//! [`ProjectConfig`]: the configuration serialised to a JSON object, plus a
//! handful of derived project-name variants.
//!
//! ## Derived variables
//!
//! | Variable | Example |
//! |----------|---------|
//! | `projectName` | "My Awesome App" |
//! | `projectNameKebab` | "my-awesome-app" |
//! | `projectNameSnake` | "my_awesome_app" |
//! | `projectNamePascal` | "MyAwesomeApp" |
//! | `displayName` | falls back to `projectName` |

use serde_json::{Map, Value};

use crate::domain::{entities::project_config::ProjectConfig, error::DomainError};

/// Immutable template evaluation context.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    root: Value,
}

impl RenderContext {
    /// Build the context for `config`.
    pub fn new(config: &ProjectConfig) -> Result<Self, DomainError> {
        let value = serde_json::to_value(config)
            .map_err(|e| DomainError::ContextUnavailable(e.to_string()))?;

        let Value::Object(mut map) = value else {
            return Err(DomainError::ContextUnavailable(
                "configuration did not serialise to an object".into(),
            ));
        };

        let name = config.project_name();
        insert_str(&mut map, "displayName", config.display_name());
        insert_str(&mut map, "projectNameKebab", &to_kebab_case(name));
        insert_str(&mut map, "projectNameSnake", &to_snake_case(name));
        insert_str(&mut map, "projectNamePascal", &to_pascal_case(name));

        Ok(Self {
            root: Value::Object(map),
        })
    }

    /// Wrap an arbitrary value (mainly for renderer tests).
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The whole context object.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a member path (`["designSystem", "theme"]`).
    ///
    /// Arrays accept numeric segments. Missing members yield `None`.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Value> {
        segments
            .iter()
            .try_fold(&self.root, |current, segment| match current {
                Value::Object(map) => map.get(segment.as_ref()),
                Value::Array(items) => segment
                    .as_ref()
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            })
    }

    /// Resolve a dotted path (`"designSystem.theme"`).
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        let segments: Vec<&str> = dotted.split('.').collect();
        self.lookup(&segments)
    }
}

fn insert_str(map: &mut Map<String, Value>, key: &str, value: &str) {
    map.insert(key.to_string(), Value::String(value.to_string()));
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// Convert a string to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "MyApp" | "my_app" |
/// | "my-app" | "my_app" |
/// | "HTTPRequest" | "http_request" |
fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Same as `to_snake_case` but joins with `-`.
/// Used for package names and directory names.
fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to PascalCase.
///
/// | Input | Output |
/// |-------|--------|
/// | "my-app" | "MyApp" |
/// | "HTTPRequest" | "HttpRequest" |
fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lowercase words on separators and case boundaries.
///
/// 1. `_`, `-`, `.`, whitespace always split
/// 2. `aB` splits between `a` and `B`
/// 3. `HTTPRequest` splits between `P` and `R` (Upper Upper Lower)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
