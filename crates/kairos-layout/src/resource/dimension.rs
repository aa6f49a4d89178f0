use serde::Deserialize;
use serde_json::Value;

use crate::field::FieldPath;

fn default_value_expr() -> String {
    "id".to_string()
}

fn default_color_expr() -> String {
    "color".to_string()
}

/// One resource dimension (rooms, owners, priorities, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDimension {
    /// Appointment field holding the resource value(s); also the name used
    /// in `groups`.
    #[serde(alias = "field")]
    pub field_expr: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub data_source: Vec<Value>,
    #[serde(default = "default_value_expr")]
    pub value_expr: String,
    #[serde(default = "default_color_expr")]
    pub color_expr: String,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub use_color_as_default: bool,
}

impl ResourceDimension {
    #[must_use]
    pub fn new(field_expr: &str, data_source: Vec<Value>) -> Self {
        Self {
            field_expr: field_expr.to_string(),
            label: None,
            data_source,
            value_expr: default_value_expr(),
            color_expr: default_color_expr(),
            allow_multiple: false,
            use_color_as_default: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.field_expr
    }

    /// ## Summary
    /// Values the appointment carries for this dimension.
    ///
    /// Arrays are flattened; single-valued dimensions keep only the first
    /// element of an array.
    #[must_use]
    pub fn appointment_values<'a>(&self, appointment: &'a Value) -> Vec<&'a Value> {
        match FieldPath::parse(&self.field_expr).get(appointment) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) if self.allow_multiple => values.iter().collect(),
            Some(Value::Array(values)) => values.first().into_iter().collect(),
            Some(value) => vec![value],
        }
    }

    /// Value identifying a data-source item.
    #[must_use]
    pub fn item_value<'a>(&self, item: &'a Value) -> Option<&'a Value> {
        FieldPath::parse(&self.value_expr).get(item)
    }

    /// Position of the data-source item whose value matches `value`.
    #[must_use]
    pub fn position_of(&self, value: &Value) -> Option<usize> {
        self.data_source.iter().position(|item| {
            self.item_value(item)
                .is_some_and(|candidate| values_match(candidate, value))
        })
    }

    /// Color of the data-source item whose value matches `value`.
    #[must_use]
    pub fn color_of(&self, value: &Value) -> Option<String> {
        let item = self.data_source.get(self.position_of(value)?)?;
        FieldPath::parse(&self.color_expr)
            .get(item)?
            .as_str()
            .map(str::to_string)
    }
}

/// Equality that also treats `1` and `"1"` as the same resource key.
fn values_match(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(number), Value::String(text)) | (Value::String(text), Value::Number(number)) => {
            number.to_string() == *text
        }
        _ => left == right,
    }
}
