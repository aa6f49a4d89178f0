use std::cell::OnceCell;

use chrono::NaiveDateTime;
use serde_json::Value;

use super::{DateSerialization, Field, FieldExpressions, FieldPath};
use crate::error::LayoutResult;
use crate::format::{ChronoFormatter, DateFormatter};

/// Reads and writes logical fields through the configured expressions.
///
/// The expression table is fixed at construction. The only mutable state is
/// the per-field detected date format, which is set by the first successful
/// read or write of a serialized value and never changes afterwards.
pub struct FieldAccessor {
    exprs: FieldExpressions,
    configured: Option<DateSerialization>,
    detected: [OnceCell<DateSerialization>; Field::COUNT],
    formatter: Box<dyn DateFormatter>,
}

impl FieldAccessor {
    #[must_use]
    pub fn new(exprs: FieldExpressions, configured: Option<DateSerialization>) -> Self {
        Self::with_formatter(exprs, configured, Box::new(ChronoFormatter))
    }

    #[must_use]
    pub fn with_formatter(
        exprs: FieldExpressions,
        configured: Option<DateSerialization>,
        formatter: Box<dyn DateFormatter>,
    ) -> Self {
        Self {
            exprs,
            configured,
            detected: std::array::from_fn(|_| OnceCell::new()),
            formatter,
        }
    }

    #[must_use]
    pub const fn expressions(&self) -> &FieldExpressions {
        &self.exprs
    }

    #[must_use]
    pub const fn path(&self, field: Field) -> &FieldPath {
        self.exprs.path(field)
    }

    /// Format used for writes when set; reads never change it.
    #[must_use]
    pub const fn configured_serialization(&self) -> Option<&DateSerialization> {
        self.configured.as_ref()
    }

    /// Format inferred from the first serialized value seen for `field`.
    #[must_use]
    pub fn detected_serialization(&self, field: Field) -> Option<&DateSerialization> {
        self.detected[field.index()].get()
    }

    #[must_use]
    pub fn formatter(&self) -> &dyn DateFormatter {
        self.formatter.as_ref()
    }

    /// ## Summary
    /// Reads the raw value of `field`. Disabled fields read as absent.
    #[must_use]
    pub fn get<'a>(&self, field: Field, appointment: &'a Value) -> Option<&'a Value> {
        self.path(field).get(appointment)
    }

    /// ## Summary
    /// Writes the raw value of `field`. Disabled fields are left untouched.
    ///
    /// ## Errors
    /// Returns `LayoutError::PathConflict` if the path crosses a non-object value.
    pub fn set(&self, field: Field, appointment: &mut Value, value: Value) -> LayoutResult<()> {
        self.path(field).set(appointment, value)
    }

    #[must_use]
    pub fn get_str<'a>(&self, field: Field, appointment: &'a Value) -> Option<&'a str> {
        self.get(field, appointment)?.as_str()
    }

    /// Truthy read; absent or non-boolean values are `false`.
    #[must_use]
    pub fn get_bool(&self, field: Field, appointment: &Value) -> bool {
        self.get(field, appointment)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// ## Summary
    /// Reads a date field, whatever representation it is stored in.
    ///
    /// ## Side Effects
    /// The first string that parses fixes the detected format for `field`.
    #[must_use]
    pub fn get_date(&self, field: Field, appointment: &Value) -> Option<NaiveDateTime> {
        let value = self.get(field, appointment)?;
        self.read_date(field, value)
    }

    /// ## Summary
    /// Converts a stored value into a wall-clock date for `field`.
    ///
    /// Used directly for list-valued fields such as recurrence exceptions,
    /// whose items share the field's format.
    #[must_use]
    pub fn read_date(&self, field: Field, value: &Value) -> Option<NaiveDateTime> {
        let formatter = self.formatter();

        let known = self
            .configured
            .as_ref()
            .or_else(|| self.detected_serialization(field));
        if let Some(date) = known.and_then(|known| known.read(value, formatter)) {
            return Some(date);
        }

        let detected = DateSerialization::detect(value)?;
        let date = detected.read(value, formatter)?;
        if value.is_string() && self.detected[field.index()].set(detected.clone()).is_ok() {
            tracing::trace!(field = %field, format = ?detected, "Detected date serialization");
        }
        Some(date)
    }

    /// ## Summary
    /// Writes a date field.
    ///
    /// The representation is, in order: the configured format, the format
    /// detected for this field, the format of the value being overwritten,
    /// then epoch milliseconds.
    ///
    /// ## Errors
    /// Returns `LayoutError::PathConflict` if the path crosses a non-object value.
    pub fn set_date(
        &self,
        field: Field,
        appointment: &mut Value,
        date: NaiveDateTime,
    ) -> LayoutResult<()> {
        let serialization = self.serialization_for_write(field, appointment);
        let value = serialization.write(date, self.formatter());
        self.set(field, appointment, value)
    }

    fn serialization_for_write(&self, field: Field, appointment: &Value) -> DateSerialization {
        if let Some(configured) = &self.configured {
            return configured.clone();
        }
        if let Some(detected) = self.detected_serialization(field) {
            return detected.clone();
        }
        let existing = self
            .get(field, appointment)
            .and_then(DateSerialization::detect);
        match existing {
            Some(existing @ (DateSerialization::EpochMillis | DateSerialization::Custom(_))) => existing,
            Some(existing) => {
                let stable = self.detected[field.index()].get_or_init(|| existing);
                stable.clone()
            }
            None => DateSerialization::EpochMillis,
        }
    }
}

impl Default for FieldAccessor {
    fn default() -> Self {
        Self::new(FieldExpressions::default(), None)
    }
}

impl std::fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("exprs", &self.exprs)
            .field("configured", &self.configured)
            .field("detected", &self.detected)
            .finish_non_exhaustive()
    }
}
