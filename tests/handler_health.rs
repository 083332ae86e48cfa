mod common;

use common::create_test_app;
use serde_json::Value;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = create_test_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_reports_database_failure() {
    let app = create_test_app();
    app.short_urls.unavailable.store(true, Ordering::SeqCst);

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_closed_click_queue() {
    let common::TestApp { server, clicks, .. } = create_test_app();
    drop(clicks);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    assert_eq!(
        response.json::<Value>()["checks"]["click_queue"]["status"],
        "error"
    );
}
