#![expect(clippy::expect_used, reason = "test scenarios panic on invalid fixtures")]
//! Coordinates of ungrouped layouts: recurrence, clamping and field mapping.

use kairos_layout::error::LayoutError;
use kairos_layout::recurrence::StartOverrides;
use serde_json::{Value, json};

use super::helpers::*;

fn march_week() -> Value {
    json!({
        "currentView": "week",
        "startDayHour": 2,
        "endDayHour": 10,
        "currentDate": "2015-03-02",
        "firstDayOfWeek": 1
    })
}

fn displayed_at_midnight() -> StartOverrides {
    StartOverrides {
        start: Some(at(2015, 3, 2, 0, 0)),
        original_start: None,
    }
}

#[test]
fn daily_full_day_series_fills_the_week() {
    let scheduler = scheduler(&march_week());

    for all_day in [false, true] {
        let appointment = json!({
            "startDate": iso(2015, 3, 2, 0, 0),
            "endDate": iso(2015, 3, 3, 0, 0),
            "recurrenceRule": "FREQ=DAILY",
            "allDay": all_day
        });
        let result = scheduler
            .compute_coordinates(&appointment, displayed_at_midnight())
            .expect("grid view");
        assert_eq!(result.len(), 7, "allDay = {all_day}");
        assert!(result.iter().all(|coordinate| coordinate.all_day));
    }
}

#[test]
fn original_start_anchors_the_expansion() {
    let scheduler = scheduler(&march_week());
    let appointment = json!({
        "startDate": iso(2015, 3, 2, 0, 0),
        "endDate": iso(2015, 3, 3, 0, 0),
        "recurrenceRule": "FREQ=DAILY",
        "allDay": true
    });
    let overrides = StartOverrides {
        start: Some(at(2015, 3, 2, 0, 0)),
        original_start: Some(at(2015, 3, 2, 1, 0)),
    };

    let range = scheduler.geometry().expect("valid geometry").visible_range();
    let occurrences = scheduler.expand(&appointment, range, overrides);
    assert_eq!(occurrences[0].start, at(2015, 3, 2, 1, 0));

    let before = range;
    let result = scheduler
        .compute_coordinates(&appointment, overrides)
        .expect("grid view");
    assert_eq!(result.len(), 7);
    assert_eq!(
        scheduler.geometry().expect("valid geometry").visible_range(),
        before
    );
}

#[test]
fn long_timeline_appointment_starts_at_its_cell() {
    let scheduler = scheduler(&json!({
        "currentView": "timelineDay",
        "currentDate": "2015-03-03",
        "cellWidth": 200.0
    }));
    let appointment = json!({
        "startDate": iso(2015, 3, 3, 0, 30),
        "endDate": iso(2015, 3, 5, 15, 30)
    });

    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].cell_index, 1);
    assert_px(result[0].left, 200.0);
}

#[test]
fn custom_start_expression_falls_back_to_displayed_start() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "currentDate": "2015-03-02",
        "firstDayOfWeek": 1,
        "startDateExpr": "Start"
    }));
    let appointment = json!({ "startDate": iso(2015, 3, 2, 0, 0) });

    let result = scheduler
        .compute_coordinates(&appointment, displayed_at_midnight())
        .expect("grid view");
    assert_eq!(result.len(), 1);
    assert_eq!(cells(&result), vec![(0, 0)]);
}

#[test_log::test]
fn exception_instances_are_not_drawn() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "currentDate": "2015-03-02",
        "firstDayOfWeek": 1
    }));
    let appointment = json!({
        "startDate": iso(2015, 3, 2, 10, 0),
        "endDate": iso(2015, 3, 2, 11, 0),
        "recurrenceRule": "FREQ=DAILY;COUNT=5",
        "recurrenceException": "20150303T100000Z,20150305T100000Z"
    });

    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");
    let days: Vec<_> = result.iter().map(|c| c.cell_index).collect();
    assert_eq!(days, vec![0, 2, 4]);
}

#[test]
fn epoch_dates_and_nested_paths_are_read() {
    let scheduler = scheduler(&json!({
        "currentView": "day",
        "currentDate": "2015-03-02",
        "startDayHour": 8,
        "cellDuration": 60,
        "startDateExpr": "time.from",
        "endDateExpr": "time.to"
    }));
    let start = at(2015, 3, 2, 9, 0).and_utc().timestamp_millis();
    let appointment = json!({
        "time": { "from": start, "to": start + 2 * 3_600_000 }
    });

    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");
    assert_eq!(cells(&result), vec![(1, 0)]);
}

#[test]
fn hidden_hours_snap_to_the_nearest_cell() {
    let scheduler = scheduler(&json!({
        "currentView": "day",
        "currentDate": "2015-03-02",
        "startDayHour": 8,
        "endDayHour": 20,
        "cellDuration": 60,
        "cellHeight": 40.0
    }));

    let early = json!({
        "startDate": iso(2015, 3, 2, 6, 0),
        "endDate": iso(2015, 3, 2, 9, 30)
    });
    let result = scheduler
        .compute_coordinates(&early, StartOverrides::default())
        .expect("grid view");
    assert_eq!(cells(&result), vec![(0, 0)]);
    assert_px(result[0].top, 0.0);

    let late = json!({
        "startDate": iso(2015, 3, 2, 21, 0),
        "endDate": iso(2015, 3, 2, 22, 0)
    });
    let result = scheduler
        .compute_coordinates(&late, StartOverrides::default())
        .expect("grid view");
    assert_eq!(cells(&result), vec![(11, 0)]);
    assert_px(result[0].top, 440.0);
}

#[test]
fn late_start_with_uneven_cells_moves_to_next_morning() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "currentDate": "2015-03-02",
        "firstDayOfWeek": 1,
        "startDayHour": 8,
        "endDayHour": 20,
        "cellDuration": 50
    }));
    let appointment = json!({
        "startDate": iso(2015, 3, 2, 22, 0),
        "endDate": iso(2015, 3, 3, 10, 0)
    });

    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");
    assert_eq!(cells(&result), vec![(0, 1)]);
}

#[test]
fn agenda_view_is_not_a_grid() {
    let scheduler = scheduler(&json!({ "currentView": "agenda" }));
    let appointment = json!({ "startDate": iso(2015, 3, 2, 10, 0) });
    let error = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect_err("list view");
    assert!(matches!(error, LayoutError::NotAGridView(_)));
}
