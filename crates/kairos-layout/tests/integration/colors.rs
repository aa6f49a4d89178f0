#![expect(clippy::expect_used, reason = "test scenarios panic on invalid fixtures")]
//! Appointment colors through the scheduler session.

use futures::executor::block_on;
use kairos_core::types::ViewType;
use serde_json::json;

use super::helpers::*;

fn typed_and_prioritized() -> serde_json::Value {
    json!({
        "currentView": "day",
        "views": [
            { "type": "day", "groups": ["priorityId"] },
            { "type": "week", "groups": ["typeId"] }
        ],
        "currentDate": "2015-03-02",
        "resources": [
            { "field": "typeId", "dataSource": [{ "id": 1, "color": "red" }] },
            { "field": "priorityId", "dataSource": [{ "id": 1, "color": "black" }] }
        ]
    })
}

#[test]
fn color_follows_the_current_view_grouping() {
    let mut scheduler = scheduler(&typed_and_prioritized());
    let appointment = json!({ "typeId": 1, "priorityId": 1 });

    assert_eq!(
        scheduler.resolve_color(&appointment, Some(0)).as_deref(),
        Some("black")
    );

    scheduler
        .set_current_view(ViewType::Week)
        .expect("valid week geometry");
    assert_eq!(
        scheduler.resolve_color(&appointment, Some(0)).as_deref(),
        Some("red")
    );
}

#[test]
fn nested_resource_field_with_default_color() {
    let scheduler = scheduler(&json!({
        "currentView": "week",
        "currentDate": "2015-03-02",
        "groups": ["TheatreId"],
        "resources": [
            {
                "fieldExpr": "Movie.ID",
                "valueExpr": "ID",
                "colorExpr": "Color",
                "useColorAsDefault": true,
                "dataSource": [{ "ID": 1, "Color": "blue" }, { "ID": 3, "Color": "red" }]
            },
            { "fieldExpr": "TheatreId", "dataSource": [{ "id": 1 }, { "id": 2 }] }
        ]
    }));

    let appointment = json!({ "Movie": { "ID": 3 }, "TheatreId": 1 });
    assert_eq!(
        scheduler.resolve_color(&appointment, Some(0)).as_deref(),
        Some("red")
    );
}

#[test_log::test]
fn deferred_color_arrives_once_resources_load() {
    let mut scheduler = scheduler(&typed_and_prioritized());
    scheduler
        .resources_mut()
        .defer("priorityId")
        .expect("declared resource");

    let mut receiver = scheduler.request_color(&json!({ "priorityId": 4 }), Some(0));
    assert_eq!(receiver.try_recv().expect("request pending"), None);

    scheduler
        .resources_mut()
        .load("priorityId", vec![json!({ "id": 4, "color": "plum" })])
        .expect("declared resource");
    assert_eq!(
        block_on(receiver).expect("answered").as_deref(),
        Some("plum")
    );
}
