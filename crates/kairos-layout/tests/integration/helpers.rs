#![expect(clippy::expect_used, reason = "test scenarios panic on invalid fixtures")]
//! Builders shared by the scenario tests.

use chrono::{NaiveDate, NaiveDateTime};
use kairos_layout::Scheduler;
use kairos_layout::field::FieldExpressions;
use kairos_layout::grid::GridCoordinate;
use kairos_layout::resource::ResourceDimension;
use kairos_layout::view::SchedulerOptions;
use serde_json::{Value, json};

/// Wall-clock instant.
///
/// ## Panics
/// Panics on an impossible calendar date.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid date")
}

/// Local ISO-8601 text, the way appointments store dates.
pub fn iso(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> String {
    at(year, month, day, hour, minute)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// ## Summary
/// Session built from a single JSON object.
///
/// The object holds scheduler options, field expressions (`startDateExpr`,
/// ...) and an optional `resources` array.
///
/// ## Panics
/// Panics if any part of the configuration is invalid.
pub fn scheduler(config: &Value) -> Scheduler {
    let options: SchedulerOptions =
        serde_json::from_value(config.clone()).expect("valid scheduler options");
    let expressions: FieldExpressions =
        serde_json::from_value(config.clone()).expect("valid field expressions");
    let resources: Vec<ResourceDimension> = config
        .get("resources")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .expect("valid resources")
        .unwrap_or_default();
    Scheduler::new(options, expressions, resources).expect("valid scheduler")
}

/// Two-item priority dimension with colors.
pub fn priorities() -> Value {
    json!([{
        "fieldExpr": "priorityId",
        "label": "Priority",
        "allowMultiple": false,
        "dataSource": [
            { "text": "Low Priority", "id": 1, "color": "#1e90ff" },
            { "text": "High Priority", "id": 2, "color": "#ff9747" }
        ]
    }])
}

/// Asserts two pixel values are equal up to rounding noise.
pub fn assert_px(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}px but got {actual}px"
    );
}

/// `(row_index, cell_index)` of every coordinate.
pub fn cells(coordinates: &[GridCoordinate]) -> Vec<(usize, usize)> {
    coordinates
        .iter()
        .map(|coordinate| (coordinate.row_index, coordinate.cell_index))
        .collect()
}
