#![expect(clippy::expect_used, reason = "test scenarios panic on invalid fixtures")]
//! Coordinates of grouped layouts, with and without grouping by date.

use kairos_layout::recurrence::StartOverrides;
use serde_json::json;

use super::helpers::*;

#[test_log::test]
fn day_view_interleaves_groups_per_date() {
    let scheduler = scheduler(&json!({
        "currentView": "day",
        "views": [{ "type": "day", "intervalCount": 2 }],
        "currentDate": "2018-05-21",
        "groupByDate": true,
        "startDayHour": 9,
        "cellWidth": 224.0,
        "groups": ["priorityId"],
        "resources": priorities()
    }));

    let high = json!({ "startDate": iso(2018, 5, 21, 9, 0), "priorityId": 2 });
    let result = scheduler
        .compute_coordinates(&high, StartOverrides::default())
        .expect("grid view");
    assert_eq!(cells(&result)[0], (0, 0));
    assert_px(result[0].top, 0.0);
    assert_px(result[0].left, 224.0);

    let low = json!({ "startDate": iso(2018, 5, 22, 9, 0), "priorityId": 1 });
    let result = scheduler
        .compute_coordinates(&low, StartOverrides::default())
        .expect("grid view");
    assert_eq!(cells(&result)[0], (0, 1));
    assert_px(result[0].top, 0.0);
    assert_px(result[0].left, 448.0);
}

#[test]
fn all_day_appointment_gets_one_coordinate_per_date() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "views": [{ "type": "week", "intervalCount": 2 }],
        "currentDate": "2018-05-21",
        "groupByDate": true,
        "startDayHour": 9,
        "cellWidth": 32.0,
        "groups": ["priorityId"],
        "resources": priorities()
    }));

    let appointment = json!({
        "startDate": iso(2018, 5, 21, 9, 0),
        "endDate": iso(2018, 5, 23, 9, 0),
        "priorityId": 2,
        "allDay": true
    });
    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");

    assert_eq!(cells(&result), vec![(0, 1), (0, 2)]);
    assert!(result.iter().all(|coordinate| coordinate.all_day));
    assert_px(result[0].top, 0.0);
    assert_px(result[0].left, 3.0 * 32.0);
    assert_px(result[1].left, 5.0 * 32.0);
}

#[test]
fn week_view_places_timed_cells_by_date_then_group() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "currentDate": "2018-05-21",
        "groupByDate": true,
        "startDayHour": 9,
        "cellWidth": 64.0,
        "cellHeight": 50.0,
        "groups": ["priorityId"],
        "resources": priorities()
    }));

    let high = json!({ "startDate": iso(2018, 5, 22, 10, 0), "priorityId": 2 });
    let result = scheduler
        .compute_coordinates(&high, StartOverrides::default())
        .expect("grid view");
    assert_eq!(cells(&result)[0], (2, 2));
    assert_px(result[0].top, 100.0);
    assert_px(result[0].left, 5.0 * 64.0);

    let low = json!({ "startDate": iso(2018, 5, 25, 1, 0), "priorityId": 1 });
    let displayed = StartOverrides {
        start: Some(at(2018, 5, 25, 11, 0)),
        original_start: None,
    };
    let result = scheduler
        .compute_coordinates(&low, displayed)
        .expect("grid view");
    assert_eq!(cells(&result)[0], (4, 5));
    assert_px(result[0].top, 200.0);
    assert_px(result[0].left, 10.0 * 64.0);
}

#[test]
fn month_view_splits_days_when_grouped_by_date() {
    let scheduler = scheduler(&json!({
        "currentView": "month",
        "views": [{ "type": "month", "groupOrientation": "horizontal" }],
        "currentDate": "2018-05-21",
        "groupByDate": true,
        "cellWidth": 100.0,
        "cellHeight": 80.0,
        "groups": ["priorityId"],
        "resources": priorities()
    }));

    let appointment = json!({
        "startDate": iso(2018, 5, 22, 10, 0),
        "endDate": iso(2018, 5, 24, 0, 0),
        "priorityId": 2
    });
    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");

    assert_eq!(cells(&result), vec![(3, 2), (3, 3)]);
    assert_px(result[0].top, 240.0);
    assert_px(result[0].left, 500.0);
    assert_px(result[1].top, 240.0);
    assert_px(result[1].left, 700.0);
}

#[test_log::test]
fn recurring_month_appointment_repeats_per_occurrence() {
    let scheduler = scheduler(&json!({
        "currentView": "month",
        "views": [{ "type": "month", "groupOrientation": "horizontal" }],
        "currentDate": "2018-05-21",
        "groupByDate": true,
        "cellWidth": 100.0,
        "cellHeight": 80.0,
        "groups": ["priorityId"],
        "resources": priorities()
    }));

    let appointment = json!({
        "startDate": iso(2018, 5, 22, 10, 0),
        "endDate": iso(2018, 5, 23, 12, 0),
        "priorityId": 2,
        "recurrenceRule": "FREQ=DAILY;COUNT=3"
    });
    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");

    let cell_indices: Vec<_> = result.iter().map(|c| c.cell_index).collect();
    assert_eq!(cell_indices, vec![2, 3, 3, 4, 4, 5]);
    assert!(result.iter().all(|c| c.row_index == 3));
    for (coordinate, left_cells) in result.iter().zip([5.0, 7.0, 7.0, 9.0, 9.0, 11.0]) {
        assert_px(coordinate.top, 240.0);
        assert_px(coordinate.left, left_cells * 100.0);
    }
}

#[test]
fn timeline_splits_time_cells_when_grouped_by_date() {
    let scheduler = scheduler(&json!({
        "currentView": "timelineWeek",
        "views": [{ "type": "timelineWeek", "groupOrientation": "horizontal" }],
        "currentDate": "2018-05-21",
        "cellDuration": 60,
        "groupByDate": true,
        "startDayHour": 10,
        "endDayHour": 12,
        "cellWidth": 200.0,
        "groups": ["priorityId"],
        "resources": priorities()
    }));

    let appointment = json!({
        "startDate": iso(2018, 5, 21, 10, 0),
        "endDate": iso(2018, 5, 21, 12, 0),
        "priorityId": 2
    });
    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");

    assert_eq!(cells(&result), vec![(0, 2), (0, 3)]);
    assert_px(result[0].left, 5.0 * 200.0);
    assert_px(result[1].left, 7.0 * 200.0);
}

#[test]
fn vertical_grouping_ignores_group_by_date() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "views": [{ "type": "week", "groupOrientation": "vertical" }],
        "currentDate": "2018-05-21",
        "groupByDate": true,
        "startDayHour": 9,
        "endDayHour": 11,
        "cellWidth": 64.0,
        "cellHeight": 50.0,
        "allDayPanelHeight": 25.0,
        "groups": ["priorityId"],
        "resources": priorities()
    }));

    let appointment = json!({
        "startDate": iso(2018, 5, 22, 10, 0),
        "endDate": iso(2018, 5, 22, 11, 0),
        "priorityId": 2
    });
    let result = scheduler
        .compute_coordinates(&appointment, StartOverrides::default())
        .expect("grid view");

    assert_eq!(result.len(), 1);
    assert_eq!(cells(&result)[0], (2, 2));
    assert_eq!(result[0].group_index, 1);
    // One block is four rows plus the all-day panel.
    assert_px(result[0].top, 225.0 + 25.0 + 100.0);
    assert_px(result[0].left, 2.0 * 64.0);
}

#[test]
fn appointment_outside_every_group_has_no_coordinates() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "currentDate": "2018-05-21",
        "groups": ["priorityId"],
        "resources": priorities()
    }));

    let orphan = json!({ "startDate": iso(2018, 5, 22, 10, 0), "priorityId": 7 });
    let result = scheduler
        .compute_coordinates(&orphan, StartOverrides::default())
        .expect("grid view");
    assert!(result.is_empty());
}

#[test]
fn multi_valued_resource_is_drawn_in_each_group() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "currentDate": "2018-05-21",
        "cellWidth": 50.0,
        "groups": ["ownerId"],
        "resources": [{
            "field": "ownerId",
            "allowMultiple": true,
            "dataSource": [{ "id": 1 }, { "id": 2 }, { "id": 3 }]
        }]
    }));

    let shared = json!({
        "startDate": iso(2018, 5, 22, 10, 0),
        "endDate": iso(2018, 5, 22, 11, 0),
        "ownerId": [3, 1]
    });
    let result = scheduler
        .compute_coordinates(&shared, StartOverrides::default())
        .expect("grid view");

    let groups: Vec<_> = result.iter().map(|c| c.group_index).collect();
    assert_eq!(groups, vec![0, 2]);
    assert_px(result[1].left, (2.0 * 7.0 + 2.0) * 50.0);
}
