#![expect(clippy::expect_used, reason = "test scenarios panic on invalid fixtures")]
//! Agenda row packing scenarios.

use serde_json::{Value, json};

use super::helpers::*;

fn appointment(start: String, end: String) -> Value {
    json!({ "startDate": start, "endDate": end })
}

fn agenda(current_date: &str, days: u32) -> Value {
    json!({
        "currentView": "agenda",
        "currentDate": current_date,
        "agendaDuration": days
    })
}

#[test_log::test]
fn counts_every_day_an_appointment_touches() {
    let scheduler = scheduler(&agenda("2016-02-01", 65));
    let appointments = vec![
        appointment(iso(2016, 2, 2, 0, 0), iso(2016, 2, 2, 0, 30)),
        appointment(iso(2016, 2, 20, 0, 0), iso(2016, 2, 20, 0, 30)),
        appointment(iso(2016, 2, 18, 0, 0), iso(2016, 2, 18, 0, 30)),
        appointment(iso(2016, 2, 18, 0, 0), iso(2016, 2, 18, 0, 30)),
        appointment(iso(2016, 2, 22, 0, 0), iso(2016, 2, 22, 0, 30)),
        appointment(iso(2016, 3, 2, 0, 0), iso(2016, 3, 22, 0, 30)),
        appointment(iso(2016, 1, 30, 0, 0), iso(2016, 2, 1, 5, 30)),
        appointment(iso(2016, 3, 23, 0, 0), iso(2016, 3, 24, 5, 30)),
    ];

    let rows = scheduler
        .pack_agenda_rows(&appointments)
        .expect("valid agenda geometry");

    let mut expected = vec![0_u32; 65];
    for index in [0, 1, 19, 21].into_iter().chain(30..=52) {
        expected[index] = 1;
    }
    expected[17] = 2;
    assert_eq!(rows, vec![expected]);
}

#[test]
fn recurring_appointments_count_per_instance() {
    let scheduler = scheduler(&agenda("2016-02-01", 5));
    let appointments = vec![
        appointment(iso(2016, 2, 2, 0, 0), iso(2016, 2, 2, 0, 30)),
        json!({
            "startDate": iso(2016, 2, 3, 0, 0),
            "endDate": iso(2016, 2, 3, 0, 30),
            "recurrenceRule": "FREQ=DAILY"
        }),
        json!({
            "startDate": iso(2016, 1, 31, 0, 0),
            "endDate": iso(2016, 1, 31, 0, 30),
            "recurrenceRule": "FREQ=DAILY"
        }),
    ];

    let rows = scheduler
        .pack_agenda_rows(&appointments)
        .expect("valid agenda geometry");
    assert_eq!(rows, vec![vec![1, 2, 2, 2, 2]]);
}

#[test]
fn inverted_end_date_counts_once() {
    let scheduler = scheduler(&agenda("2016-02-01", 5));
    let appointments = vec![
        appointment(iso(2016, 2, 2, 0, 0), iso(2016, 2, 2, 0, 30)),
        appointment(iso(2016, 2, 3, 3, 30), iso(2016, 2, 3, 0, 0)),
        appointment(iso(2016, 2, 4, 0, 0), iso(2016, 2, 4, 0, 30)),
    ];

    let rows = scheduler
        .pack_agenda_rows(&appointments)
        .expect("valid agenda geometry");
    assert_eq!(rows, vec![vec![0, 1, 1, 1, 0]]);
}

#[test]
fn long_appointment_counts_on_each_day() {
    let scheduler = scheduler(&agenda("2016-02-01", 5));
    let appointments = vec![appointment(
        iso(2016, 2, 1, 1, 0),
        iso(2016, 2, 4, 10, 30),
    )];

    let rows = scheduler
        .pack_agenda_rows(&appointments)
        .expect("valid agenda geometry");
    assert_eq!(rows, vec![vec![1, 1, 1, 1, 0]]);
}

#[test]
fn long_recurring_appointment_with_custom_fields() {
    let scheduler = scheduler(&json!({
        "currentView": "agenda",
        "currentDate": "2016-02-24",
        "agendaDuration": 7,
        "startDateExpr": "Start",
        "endDateExpr": "End",
        "recurrenceRuleExpr": "RecurrenceRule"
    }));
    let appointments = vec![json!({
        "Start": iso(2016, 2, 22, 1, 0),
        "End": iso(2016, 2, 23, 1, 30),
        "RecurrenceRule": "FREQ=DAILY;INTERVAL=3"
    })];

    let rows = scheduler
        .pack_agenda_rows(&appointments)
        .expect("valid agenda geometry");
    assert_eq!(rows, vec![vec![0, 1, 1, 0, 1, 1, 0]]);
}

#[test]
fn grouped_agenda_has_one_row_per_group() {
    let scheduler = scheduler(&json!({
        "currentView": "agenda",
        "currentDate": "2016-02-01",
        "agendaDuration": 7,
        "groups": ["ownerId"],
        "resources": [{
            "field": "ownerId",
            "allowMultiple": true,
            "dataSource": [{ "id": 1 }, { "id": 2 }, { "id": 3 }]
        }]
    }));
    let owned = |day: u32, hour: u32, owner: Value| {
        json!({
            "startDate": iso(2016, 2, day, hour, 0),
            "endDate": iso(2016, 2, day, hour + 1, 0),
            "ownerId": owner
        })
    };
    let appointments = vec![
        owned(2, 0, json!(1)),
        owned(3, 0, json!(2)),
        owned(3, 0, json!(1)),
        owned(3, 2, json!(1)),
        owned(5, 0, json!([1, 2])),
        owned(4, 0, json!(2)),
    ];

    let rows = scheduler
        .pack_agenda_rows(&appointments)
        .expect("valid agenda geometry");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec![0, 1, 2, 0, 1, 0, 0]);
    assert_eq!(rows[1], vec![0, 0, 1, 1, 1, 0, 0]);
    assert!(rows[2].is_empty());
}

#[test]
fn excluded_instances_are_not_counted() {
    let scheduler = scheduler(&agenda("2016-02-01", 4));
    let appointments = vec![json!({
        "startDate": iso(2016, 2, 1, 9, 0),
        "endDate": iso(2016, 2, 1, 10, 0),
        "recurrenceRule": "FREQ=DAILY",
        "recurrenceException": [iso(2016, 2, 2, 9, 0)]
    })];

    let rows = scheduler
        .pack_agenda_rows(&appointments)
        .expect("valid agenda geometry");
    assert_eq!(rows, vec![vec![1, 0, 1, 1]]);
}
