//! JSON layout requests read by the binary.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use kairos_core::config::SchedulerConfig;
use kairos_layout::Scheduler;
use kairos_layout::field::FieldExpressions;
use kairos_layout::recurrence::StartOverrides;
use kairos_layout::resource::ResourceDimension;
use kairos_layout::view::SchedulerOptions;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::cli::Mode;

/// One layout pass: options, resources and the appointments to lay out.
///
/// `options` holds scheduler options and field expressions side by side.
/// Keys it leaves out fall back to the loaded settings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutRequest {
    pub options: Map<String, Value>,
    pub resources: Vec<ResourceDimension>,
    pub appointments: Vec<Value>,
    /// Start overrides, matched to `appointments` by position.
    pub overrides: Vec<RequestOverrides>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestOverrides {
    pub start: Option<NaiveDateTime>,
    pub original_start: Option<NaiveDateTime>,
}

impl From<RequestOverrides> for StartOverrides {
    fn from(value: RequestOverrides) -> Self {
        Self {
            start: value.start,
            original_start: value.original_start,
        }
    }
}

impl LayoutRequest {
    /// ## Summary
    /// Runs the request in `mode` and returns the JSON result.
    ///
    /// Coordinates mode yields one coordinate list per appointment; agenda
    /// mode yields the per-group day counts.
    ///
    /// ## Errors
    /// Fails on invalid options or when the current view cannot produce the
    /// requested layout.
    pub fn run(&self, defaults: &SchedulerConfig, mode: Mode) -> Result<Value> {
        let scheduler = self.scheduler(defaults)?;

        let output = match mode {
            Mode::Coordinates => {
                let mut coordinates = Vec::with_capacity(self.appointments.len());
                for (index, appointment) in self.appointments.iter().enumerate() {
                    let overrides = self.overrides.get(index).copied().unwrap_or_default();
                    coordinates.push(scheduler.compute_coordinates(appointment, overrides.into())?);
                }
                serde_json::to_value(coordinates)?
            }
            Mode::Agenda => serde_json::to_value(scheduler.pack_agenda_rows(&self.appointments)?)?,
        };

        tracing::info!(
            mode = ?mode,
            appointments = self.appointments.len(),
            "Layout request processed"
        );
        Ok(output)
    }

    fn scheduler(&self, defaults: &SchedulerConfig) -> Result<Scheduler> {
        let mut merged = seed(defaults);
        merged.extend(self.options.clone());
        let merged = Value::Object(merged);

        let options: SchedulerOptions =
            serde_json::from_value(merged.clone()).context("Invalid scheduler options")?;
        let expressions: FieldExpressions =
            serde_json::from_value(merged).context("Invalid field expressions")?;
        Ok(Scheduler::new(options, expressions, self.resources.clone())?)
    }
}

/// Option keys seeded from the `scheduler` settings section.
fn seed(defaults: &SchedulerConfig) -> Map<String, Value> {
    let mut seed = Map::new();
    seed.insert("startDayHour".into(), defaults.start_day_hour.into());
    seed.insert("endDayHour".into(), defaults.end_day_hour.into());
    seed.insert("cellDuration".into(), defaults.cell_duration.into());
    seed.insert(
        "appointmentDuration".into(),
        defaults.appointment_duration.into(),
    );
    seed.insert("firstDayOfWeek".into(), defaults.first_day_of_week.into());
    seed.insert("maxOccurrences".into(), defaults.max_occurrences.into());
    if let Some(zone) = &defaults.time_zone {
        seed.insert("timeZone".into(), zone.clone().into());
    }
    if let Some(format) = &defaults.date_serialization_format {
        seed.insert("dateSerializationFormat".into(), format.clone().into());
    }
    seed
}
