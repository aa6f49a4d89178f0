//! Dotted field paths over JSON appointment records.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{LayoutError, LayoutResult};

/// Physical location of a logical field.
///
/// Deserializes from a dotted string (`"a.b.text"`) or from `null`, which
/// disables the field entirely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum FieldPath {
    Path(Vec<String>),
    Disabled,
}

impl FieldPath {
    /// Builds a path from dotted notation. An empty string disables the field.
    #[must_use]
    pub fn parse(expr: &str) -> Self {
        if expr.is_empty() {
            return Self::Disabled;
        }
        Self::Path(expr.split('.').map(str::to_string).collect())
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// ## Summary
    /// Reads the value stored under this path.
    ///
    /// Returns `None` for a disabled path, a missing level, or a non-object
    /// intermediate value.
    #[must_use]
    pub fn get<'a>(&self, target: &'a Value) -> Option<&'a Value> {
        let Self::Path(segments) = self else {
            return None;
        };
        segments
            .iter()
            .try_fold(target, |current, segment| current.as_object()?.get(segment))
    }

    /// ## Summary
    /// Writes `value` under this path, creating missing levels.
    ///
    /// Sibling keys at every level are preserved. A disabled path leaves the
    /// target untouched.
    ///
    /// ## Errors
    /// Returns `LayoutError::PathConflict` if an existing intermediate value
    /// (or the target itself) is not an object.
    pub fn set(&self, target: &mut Value, value: Value) -> LayoutResult<()> {
        let Self::Path(segments) = self else {
            return Ok(());
        };
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut current = target;
        for segment in parents {
            let object = as_object_mut(current, segment)?;
            current = object
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        as_object_mut(current, last)?.insert(last.clone(), value);
        Ok(())
    }
}

impl From<Option<String>> for FieldPath {
    fn from(expr: Option<String>) -> Self {
        expr.map_or(Self::Disabled, |expr| Self::parse(&expr))
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(segments) => f.write_str(&segments.join(".")),
            Self::Disabled => f.write_str("<disabled>"),
        }
    }
}

fn as_object_mut<'a>(value: &'a mut Value, segment: &str) -> LayoutResult<&'a mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    value
        .as_object_mut()
        .ok_or_else(|| LayoutError::PathConflict(segment.to_string()))
}
