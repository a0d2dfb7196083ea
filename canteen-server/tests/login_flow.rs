//! End-to-end login flow over the HTTP surface (no network, tower oneshot).
//! Run: cargo test -p canteen-server --test login_flow

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tower::ServiceExt;

use canteen_server::auth::{JwtConfig, JwtService};
use canteen_server::core::server::build_app_with_state;
use canteen_server::db::define_schema;
use canteen_server::{Config, ServerState, SessionStore};

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();

    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path().join("db"))
        .await
        .unwrap();
    db.use_ns("canteen").use_db("main").await.unwrap();
    define_schema(&db).await.unwrap();

    let jwt_service = Arc::new(JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-at-least-32b!".to_string(),
        expiration_minutes: 120,
        issuer: "canteen-server".to_string(),
        audience: "canteen-owners".to_string(),
    }));

    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::new(config, db, jwt_service, Arc::new(SessionStore::new()));
    (state, tmp)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn signup_payload() -> Value {
    json!({
        "email": "maria@example.com",
        "password": "hunter2!",
        "name": "Maria Lopez",
        "phone": "1234567890",
        "username": "maria_lopez",
    })
}

async fn signup(app: &Router) {
    let (status, body) = send_json(app, "POST", "/api/owners", None, Some(signup_payload())).await;
    assert_eq!(status, StatusCode::OK, "signup failed: {body}");
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let (state, _tmp) = test_state().await;
    let app = build_app_with_state(state);
    signup(&app).await;

    let (bad_pass_status, bad_pass_body) = login(&app, "maria_lopez", "wrong-password").await;
    let (no_user_status, no_user_body) = login(&app, "ghost_owner", "hunter2!").await;

    assert_eq!(bad_pass_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    // 同一错误码 + 同一消息：响应体无法区分两种失败
    assert_eq!(bad_pass_body, no_user_body);
    assert_eq!(bad_pass_body["code"], "E1001");
}

#[tokio::test]
async fn first_login_prompts_restaurant_setup() {
    let (state, _tmp) = test_state().await;
    let app = build_app_with_state(state);
    signup(&app).await;

    let (status, body) = login(&app, "maria_lopez", "hunter2!").await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    assert!(!body["token"].as_str().unwrap().is_empty());
    // 2 小时窗口
    assert_eq!(body["expires_in"], 7200);
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    assert_eq!(body["owner"]["username"], "maria_lopez");

    assert_eq!(body["view"]["view"], "setup_required");
    assert_eq!(body["view"]["message"], "Please add your restaurant details");
}

#[tokio::test]
async fn login_after_setup_returns_assembled_dashboard() {
    let (state, _tmp) = test_state().await;
    let app = build_app_with_state(state);
    signup(&app).await;

    let (_, login_body) = login(&app, "maria_lopez", "hunter2!").await;
    let token = login_body["token"].as_str().unwrap().to_string();

    // 建餐厅
    let (status, restaurant) = send_json(
        &app,
        "POST",
        "/api/restaurants",
        Some(&token),
        Some(json!({"name": "Noodle Corner", "address": "1 Campus Way"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "restaurant create failed: {restaurant}");
    let restaurant_id = restaurant["id"].as_str().unwrap().to_string();

    // 加菜单项 + 一张订单
    let (status, item) = send_json(
        &app,
        "POST",
        "/api/menu-items",
        Some(&token),
        Some(json!({"name": "Ramen", "price": 9.5, "restaurant": restaurant_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "menu item create failed: {item}");
    let item_id = item["id"].as_str().unwrap().to_string();

    let (status, order) = send_json(
        &app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "restaurant": restaurant_id,
            "order_items": [{"item": item_id, "quantity": 2}],
            "status": "PLACED",
            "order_total": 19.0,
            "expected_pickup_time": "12:30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "order create failed: {order}");

    // 再登录：这次是完整看板
    let (status, body) = login(&app, "maria_lopez", "hunter2!").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["view"], "dashboard");
    assert_eq!(body["view"]["restaurant"]["name"], "Noodle Corner");

    let orders = body["view"]["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["canteenName"], "Noodle Corner");
    assert_eq!(orders[0]["orderItems"][0]["menuItemName"], "Ramen");
    assert_eq!(orders[0]["orderItems"][0]["quantity"], 2);
    assert_eq!(body["view"]["missing_menu_items"], 0);

    // GET /api/dashboard 走同一条聚合路径
    let (status, refreshed) = send_json(&app, "GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["view"], "dashboard");
    assert_eq!(refreshed["orders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (state, _tmp) = test_state().await;
    let app = build_app_with_state(state);

    let (status, body) = send_json(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, body) = send_json(&app, "GET", "/api/dashboard", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn logout_destroys_server_side_sessions() {
    let (state, _tmp) = test_state().await;
    let app = build_app_with_state(state.clone());
    signup(&app).await;

    let (_, body) = login(&app, "maria_lopez", "hunter2!").await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(state.sessions.len(), 1);

    let (status, _) = send_json(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (state, _tmp) = test_state().await;
    let app = build_app_with_state(state);

    let (status, body) = send_json(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send_json(&app, "GET", "/health/detailed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
}
