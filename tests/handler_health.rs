mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use telegram_web_auth::api::handlers::health_handler;

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let (state, _sender) = common::create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["webhook_secret"]["message"], "Disabled");
    assert!(json.get("version").is_some());
}

#[sqlx::test]
async fn test_health_reports_webhook_secret(pool: PgPool) {
    let (state, _sender) = common::create_test_state_with_secret(pool, Some("S1"));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let json = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(json["checks"]["webhook_secret"]["message"], "Enabled");
}
