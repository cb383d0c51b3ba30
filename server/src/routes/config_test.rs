use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use panel::net::types::BackendKind;
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::routes::api_routes;
use crate::state::AppState;

fn state() -> AppState {
    let config = ServerConfig::from_lookup(|key| match key {
        "FIREBASE_API_KEY" => Some("key-1".to_owned()),
        "FIREBASE_PROJECT_ID" => Some("mensajeria".to_owned()),
        _ => None,
    })
    .unwrap();
    AppState::new(&config)
}

#[tokio::test]
async fn backend_config_serves_public_settings() {
    let response = api_routes(state())
        .oneshot(Request::builder().uri("/api/config").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let served: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(served["backend"], "firebase");
    assert_eq!(served["api_key"], "key-1");
    assert_eq!(served["project_id"], "mensajeria");
    assert_eq!(served["store_base_url"], "https://firestore.googleapis.com/v1");
}

#[tokio::test]
async fn backend_config_body_decodes_as_client_dto() {
    let response = api_routes(state())
        .oneshot(Request::builder().uri("/api/config").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let served: panel::net::types::BackendConfig = serde_json::from_slice(&body).unwrap();
    assert_eq!(served.backend, BackendKind::Firebase);
    assert_eq!(served.auth_base_url, "https://identitytoolkit.googleapis.com/v1");
}

#[tokio::test]
async fn healthz_returns_ok() {
    let response = api_routes(state())
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let response = api_routes(state())
        .oneshot(Request::builder().uri("/api/records").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
