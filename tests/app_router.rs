mod common;

use axum::ServiceExt;
use axum::extract::Request;
use reqwest::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::net::SocketAddr;
use telegram_web_auth::api::middleware::rate_limit::RedeemRateLimit;
use telegram_web_auth::routes::app_router;
use telegram_web_auth::state::AppState;

/// Serves the full router with connect info on an ephemeral port.
async fn spawn_app(state: AppState, limits: RedeemRateLimit) -> String {
    let app = app_router(state, limits);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
        )
        .await
        .unwrap();
    });
    format!("http://{addr}")
}

async fn redeem_statuses(client: &reqwest::Client, base: &str, count: usize) -> Vec<StatusCode> {
    let mut statuses = Vec::with_capacity(count);
    for _ in 0..count {
        let response = client
            .post(format!("{base}/auth/telegram/redeem"))
            .json(&json!({ "token": "bad token!" }))
            .send()
            .await
            .unwrap();
        statuses.push(response.status());
    }
    statuses
}

#[sqlx::test]
async fn test_webhook_with_trailing_slash(pool: PgPool) {
    let (state, sender) = common::create_test_state(pool.clone());
    let base = spawn_app(state, RedeemRateLimit::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/webhook/telegram/"))
        .json(&common::start_update("/start", 777))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(sender.sent().len(), 1);
    assert_eq!(common::count_tokens(&pool).await, 0);
}

#[sqlx::test]
async fn test_issue_and_redeem_through_full_stack(pool: PgPool) {
    let (state, sender) = common::create_test_state(pool);
    let base = spawn_app(state, RedeemRateLimit::default()).await;
    let client = reqwest::Client::new();

    let issued = client
        .post(format!("{base}/webhook/telegram"))
        .json(&common::start_update("/start web_auth", 12345))
        .send()
        .await
        .unwrap();
    assert_eq!(issued.status(), StatusCode::OK);

    let sent = sender.sent();
    let link = &sent[0].1.button.as_ref().unwrap().url;
    let raw = link.split_once("token=").unwrap().1.to_string();

    let response = client
        .post(format!("{base}/auth/telegram/redeem"))
        .json(&json!({ "token": raw }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["telegram_id"], "12345");
}

#[sqlx::test]
async fn test_default_limit_lets_backend_burst_through(pool: PgPool) {
    let (state, _sender) = common::create_test_state(pool);
    let base = spawn_app(state, RedeemRateLimit::default()).await;

    let statuses = redeem_statuses(&reqwest::Client::new(), &base, 30).await;

    assert!(
        statuses.iter().all(|s| *s == StatusCode::BAD_REQUEST),
        "unexpected statuses: {statuses:?}"
    );
}

#[sqlx::test]
async fn test_limit_applies_past_configured_burst(pool: PgPool) {
    let (state, _sender) = common::create_test_state(pool);
    let limits = RedeemRateLimit {
        per_second: 1,
        burst: 3,
        behind_proxy: false,
    };
    let base = spawn_app(state, limits).await;

    let statuses = redeem_statuses(&reqwest::Client::new(), &base, 5).await;

    assert_eq!(&statuses[..3], &[StatusCode::BAD_REQUEST; 3]);
    assert_eq!(statuses[4], StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test]
async fn test_behind_proxy_limits_each_forwarded_client(pool: PgPool) {
    let (state, _sender) = common::create_test_state(pool);
    let limits = RedeemRateLimit {
        per_second: 1,
        burst: 1,
        behind_proxy: true,
    };
    let base = spawn_app(state, limits).await;
    let client = reqwest::Client::new();

    for i in 1..=5 {
        let response = client
            .post(format!("{base}/auth/telegram/redeem"))
            .header("x-forwarded-for", format!("203.0.113.{i}"))
            .json(&json!({ "token": "bad token!" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let repeated = client
        .post(format!("{base}/auth/telegram/redeem"))
        .header("x-forwarded-for", "203.0.113.1")
        .json(&json!({ "token": "bad token!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(repeated.status(), StatusCode::TOO_MANY_REQUESTS);
}
