use super::helpers::{call, json_request, lazy_app, read_json, send};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use uuid::Uuid;
use vidshare::presentation::http::middleware::user::UserClaims;

fn token_signed_with(secret: &str) -> String {
    let claims = UserClaims {
        sub: Uuid::now_v7().to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to sign token")
}

#[tokio::test]
async fn mutations_without_a_token_are_unauthorized() {
    let app = lazy_app();
    let id = Uuid::now_v7();

    let requests = [
        ("PUT", format!("/api/videos/{id}/like"), None),
        ("PUT", format!("/api/videos/{id}/dislike"), None),
        ("PUT", format!("/api/comments/{id}/like"), None),
        ("PUT", format!("/api/channels/{id}/subscribe"), None),
        ("PUT", format!("/api/users/{id}/subscribe"), None),
        ("DELETE", format!("/api/videos/{id}"), None),
        ("DELETE", format!("/api/comments/{id}"), None),
        ("GET", "/api/auth/me".to_string(), None),
        ("GET", "/api/users/subscriptions".to_string(), None),
        (
            "POST",
            "/api/videos".to_string(),
            Some(json!({ "title": "t", "video_url": "https://cdn.example.com/v.mp4" })),
        ),
        (
            "POST",
            "/api/comments".to_string(),
            Some(json!({ "text": "hi", "video_id": id })),
        ),
        (
            "POST",
            "/api/channels".to_string(),
            Some(json!({ "channel_name": "mine" })),
        ),
    ];

    for (method, uri, body) in requests {
        let body: Value = call(
            &app.app,
            json_request(method, &uri, None, body),
            StatusCode::UNAUTHORIZED,
        )
        .await;
        assert_eq!(body["success"], false, "{method} {uri}");
        assert_eq!(body["message"], "Not authorized, no token", "{method} {uri}");
    }
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_rejected() {
    let app = lazy_app();
    let forged = token_signed_with("not-the-server-secret");

    let body: Value = call(
        &app.app,
        json_request(
            "PUT",
            &format!("/api/videos/{}/like", Uuid::now_v7()),
            Some(&forged),
            None,
        ),
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(body["message"], "Not authorized, token failed");
}

#[tokio::test]
async fn garbage_bearer_value_is_rejected() {
    let app = lazy_app();
    let res = send(
        &app.app,
        json_request("GET", "/api/auth/me", Some("definitely.not.a-jwt"), None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = lazy_app();
    let res = send(&app.app, json_request("GET", "/api/auth/me", None, None)).await;
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn malformed_input_gets_a_json_bad_request() {
    let app = lazy_app();

    let body: Value = call(
        &app.app,
        json_request("PUT", "/api/videos/not-a-uuid/like", None, None),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid id");

    let body: Value = call(
        &app.app,
        json_request("GET", "/api/comments/video/123", None, None),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["message"], "Invalid id");

    let body: Value = call(
        &app.app,
        json_request("POST", "/api/auth/login", None, Some(json!({}))),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("email"));

    let body: Value = call(
        &app.app,
        json_request("GET", "/api/videos?page=first", None, None),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["success"], false);

    let res = send(
        &app.app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .body(Body::from("name=plain"))
            .unwrap(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body["success"], false);
}
