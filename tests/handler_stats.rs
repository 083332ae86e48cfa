mod common;

use common::{HOST, click, create_test_app};
use serde_json::{Value, json};

#[tokio::test]
async fn test_stats_by_day_for_one_code() {
    let app = create_test_app();
    app.click_stats.put(click("promo", "1", "2024-06-02 08:00", 1));
    app.click_stats.put(click("promo", "2", "2024-06-01 23:59", 1));
    app.click_stats.put(click("promo", "3", "2024-06-02 17:30", 3));
    app.click_stats.put(click("other", "4", "2024-06-02 12:00", 1));

    let response = app
        .post("/api/stats/by-day")
        .json(&json!({
            "vanity": "promo",
            "start_date": "2024-06-01",
            "end_date": "2024-06-30"
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["url"], format!("{HOST}/promo"));
    assert_eq!(
        json["items"],
        json!([
            { "date_clicked": "2024-06-01", "count": 1 },
            { "date_clicked": "2024-06-02", "count": 4 }
        ])
    );
}

#[tokio::test]
async fn test_stats_by_day_for_all_codes() {
    let app = create_test_app();
    app.click_stats.put(click("a", "1", "2024-06-02 08:00", 1));
    app.click_stats.put(click("b", "2", "2024-06-02 09:00", 1));
    app.click_stats.put(click("b", "3", "2024-07-01 09:00", 1));

    let response = app
        .post("/api/stats/by-day")
        .json(&json!({ "start_date": "2024-06-01", "end_date": "2024-06-30" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["url"], format!("{HOST}/"));
    assert_eq!(json["items"], json!([{ "date_clicked": "2024-06-02", "count": 2 }]));
}

#[tokio::test]
async fn test_stats_skips_unparseable_timestamps() {
    let app = create_test_app();
    app.click_stats.put(click("promo", "1", "June 2nd", 5));
    app.click_stats.put(click("promo", "2", "2024-06-02 10:00", 1));

    let response = app
        .post("/api/stats/by-day")
        .json(&json!({
            "vanity": "promo",
            "start_date": "2024-06-01",
            "end_date": "2024-06-30"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["items"],
        json!([{ "date_clicked": "2024-06-02", "count": 1 }])
    );
}

#[tokio::test]
async fn test_stats_empty_range() {
    let app = create_test_app();

    let response = app
        .post("/api/stats/by-day")
        .json(&json!({
            "vanity": "promo",
            "start_date": "2024-06-01",
            "end_date": "2024-06-01"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["items"], json!([]));
}

#[tokio::test]
async fn test_stats_inverted_range_rejected() {
    let app = create_test_app();

    let response = app
        .post("/api/stats/by-day")
        .json(&json!({ "start_date": "2024-06-30", "end_date": "2024-06-01" }))
        .await;

    response.assert_status_bad_request();
}
