//! Field access over opaque appointment records.

mod accessor;
mod path;
mod serialization;

pub use accessor::FieldAccessor;
pub use path::FieldPath;
pub use serialization::{DateSerialization, parse_basic};

use serde::Deserialize;

/// Logical appointment fields the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Text,
    Description,
    StartDate,
    EndDate,
    AllDay,
    RecurrenceRule,
    RecurrenceException,
}

impl Field {
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Text,
        Self::Description,
        Self::StartDate,
        Self::EndDate,
        Self::AllDay,
        Self::RecurrenceRule,
        Self::RecurrenceException,
    ];

    /// Property name used when no expression is configured.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Description => "description",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::AllDay => "allDay",
            Self::RecurrenceRule => "recurrenceRule",
            Self::RecurrenceException => "recurrenceException",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Configured expression per logical field.
///
/// A missing key keeps the default property name; an explicit `null`
/// disables the field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldExpressions {
    pub text_expr: FieldPath,
    pub description_expr: FieldPath,
    pub start_date_expr: FieldPath,
    pub end_date_expr: FieldPath,
    pub all_day_expr: FieldPath,
    pub recurrence_rule_expr: FieldPath,
    pub recurrence_exception_expr: FieldPath,
}

impl FieldExpressions {
    #[must_use]
    pub const fn path(&self, field: Field) -> &FieldPath {
        match field {
            Field::Text => &self.text_expr,
            Field::Description => &self.description_expr,
            Field::StartDate => &self.start_date_expr,
            Field::EndDate => &self.end_date_expr,
            Field::AllDay => &self.all_day_expr,
            Field::RecurrenceRule => &self.recurrence_rule_expr,
            Field::RecurrenceException => &self.recurrence_exception_expr,
        }
    }
}

impl Default for FieldExpressions {
    fn default() -> Self {
        let default = |field: Field| FieldPath::parse(field.default_name());
        Self {
            text_expr: default(Field::Text),
            description_expr: default(Field::Description),
            start_date_expr: default(Field::StartDate),
            end_date_expr: default(Field::EndDate),
            all_day_expr: default(Field::AllDay),
            recurrence_rule_expr: default(Field::RecurrenceRule),
            recurrence_exception_expr: default(Field::RecurrenceException),
        }
    }
}
