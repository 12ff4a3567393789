use super::helpers::{JWT_SECRET, TestApp, call, json_request, spawn_app, unique_email};
use axum::http::StatusCode;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use uuid::Uuid;
use vidshare::presentation::http::middleware::user::UserClaims;

struct Account {
    id: String,
    token: String,
}

async fn register(app: &TestApp, name: &str) -> Account {
    let body = call(
        &app.app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": name,
                "email": unique_email(name),
                "password": "secret-pass",
                "passwordConfirm": "secret-pass",
            })),
        ),
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(body["success"], true);
    Account {
        id: body["user"]["id"].as_str().expect("missing user id").to_string(),
        token: body["token"].as_str().expect("missing token").to_string(),
    }
}

async fn upload(app: &TestApp, owner: &Account, title: &str) -> String {
    let body = call(
        &app.app,
        json_request(
            "POST",
            "/api/videos",
            Some(&owner.token),
            Some(json!({
                "title": title,
                "videoUrl": "https://cdn.example.com/clip.mp4",
                "duration": "02:05",
                "tags": ["flow", "flow", " test "],
            })),
        ),
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(body["video"]["duration"], 125);
    assert_eq!(body["video"]["tags"], json!(["flow", "test"]));
    body["video"]["id"].as_str().expect("missing video id").to_string()
}

/// A correctly signed token for an account that does not exist.
fn ghost_token() -> String {
    encode(
        &Header::default(),
        &UserClaims {
            sub: Uuid::now_v7().to_string(),
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        },
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign token")
}

fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|v| v.as_str().expect("expected id string").to_string())
        .collect()
}

#[tokio::test]
async fn video_reactions_stay_exclusive_and_counted() {
    let Some(app) = spawn_app().await else { return };
    let owner = register(&app, "owner").await;
    let fan = register(&app, "fan").await;
    let video_id = upload(&app, &owner, "Reaction flow").await;
    let like = format!("/api/videos/{video_id}/like");
    let dislike = format!("/api/videos/{video_id}/dislike");

    let body = call(&app.app, json_request("PUT", &like, Some(&fan.token), None), StatusCode::OK).await;
    assert_eq!(body["video"]["likes"], 1);
    assert_eq!(ids(&body["video"]["liked_by"]), vec![fan.id.clone()]);

    let me = call(&app.app, json_request("GET", "/api/auth/me", Some(&fan.token), None), StatusCode::OK).await;
    assert_eq!(ids(&me["user"]["liked_videos"]), vec![video_id.clone()]);

    let body = call(&app.app, json_request("PUT", &dislike, Some(&fan.token), None), StatusCode::OK).await;
    assert_eq!(body["video"]["likes"], 0);
    assert_eq!(body["video"]["dislikes"], 1);
    assert!(ids(&body["video"]["liked_by"]).is_empty());
    assert_eq!(ids(&body["video"]["disliked_by"]), vec![fan.id.clone()]);

    let me = call(&app.app, json_request("GET", "/api/auth/me", Some(&fan.token), None), StatusCode::OK).await;
    assert!(ids(&me["user"]["liked_videos"]).is_empty());

    let body = call(&app.app, json_request("PUT", &dislike, Some(&fan.token), None), StatusCode::OK).await;
    assert_eq!(body["video"]["dislikes"], 0);
    assert!(ids(&body["video"]["disliked_by"]).is_empty());

    // Watching counts a view and attaches the uploader.
    let body = call(
        &app.app,
        json_request("GET", &format!("/api/videos/{video_id}"), None, None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["video"]["views"], 1);
    assert_eq!(body["video"]["channel"]["id"], owner.id.as_str());
}

#[tokio::test]
async fn only_the_owner_may_change_a_video() {
    let Some(app) = spawn_app().await else { return };
    let owner = register(&app, "owner").await;
    let other = register(&app, "other").await;
    let video_id = upload(&app, &owner, "Owned").await;
    let uri = format!("/api/videos/{video_id}");

    let body = call(
        &app.app,
        json_request("PUT", &uri, Some(&other.token), Some(json!({ "title": "Stolen" }))),
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Not authorized to update this video");

    call(&app.app, json_request("DELETE", &uri, Some(&other.token), None), StatusCode::FORBIDDEN).await;

    let body = call(
        &app.app,
        json_request("PUT", &uri, Some(&owner.token), Some(json!({ "title": "Renamed" }))),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["video"]["title"], "Renamed");

    call(&app.app, json_request("DELETE", &uri, Some(&owner.token), None), StatusCode::OK).await;
    let body = call(&app.app, json_request("GET", &uri, None, None), StatusCode::NOT_FOUND).await;
    assert_eq!(body["message"], "Video not found");
}

#[tokio::test]
async fn comment_threads_likes_and_cascading_delete() {
    let Some(app) = spawn_app().await else { return };
    let owner = register(&app, "owner").await;
    let viewer = register(&app, "viewer").await;
    let video_id = upload(&app, &owner, "Discussed").await;

    let root = call(
        &app.app,
        json_request(
            "POST",
            "/api/comments",
            Some(&viewer.token),
            Some(json!({ "text": "  first!  ", "videoId": video_id })),
        ),
        StatusCode::CREATED,
    )
    .await;
    let root_id = root["comment"]["id"].as_str().unwrap().to_string();
    assert_eq!(root["comment"]["text"], "first!");
    assert_eq!(root["comment"]["author"]["id"], viewer.id.as_str());

    call(
        &app.app,
        json_request(
            "POST",
            "/api/comments",
            Some(&owner.token),
            Some(json!({ "text": "thanks", "videoId": video_id, "parentCommentId": root_id })),
        ),
        StatusCode::CREATED,
    )
    .await;

    let liked = call(
        &app.app,
        json_request("PUT", &format!("/api/comments/{root_id}/like"), Some(&owner.token), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(liked["comment"]["likes"], 1);

    let list_uri = format!("/api/comments/video/{video_id}");
    let threads = call(&app.app, json_request("GET", &list_uri, None, None), StatusCode::OK).await;
    assert_eq!(threads["count"], 1);
    assert_eq!(threads["comments"][0]["replies"].as_array().unwrap().len(), 1);
    assert_eq!(threads["comments"][0]["replies"][0]["text"], "thanks");

    let watched = call(
        &app.app,
        json_request("GET", &format!("/api/videos/{video_id}"), None, None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(watched["comments"], threads["comments"]);

    call(
        &app.app,
        json_request("DELETE", &format!("/api/comments/{root_id}"), Some(&owner.token), None),
        StatusCode::FORBIDDEN,
    )
    .await;
    let deleted = call(
        &app.app,
        json_request("DELETE", &format!("/api/comments/{root_id}"), Some(&viewer.token), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(deleted["removed"], 2);

    let threads = call(&app.app, json_request("GET", &list_uri, None, None), StatusCode::OK).await;
    assert_eq!(threads["count"], 0);
}

#[tokio::test]
async fn channel_and_user_subscriptions_toggle() {
    let Some(app) = spawn_app().await else { return };
    let creator = register(&app, "creator").await;
    let follower = register(&app, "follower").await;

    let channel_name = format!("chan-{}", Uuid::now_v7().simple());
    let created = call(
        &app.app,
        json_request(
            "POST",
            "/api/channels",
            Some(&creator.token),
            Some(json!({ "channelName": channel_name, "description": "clips" })),
        ),
        StatusCode::CREATED,
    )
    .await;
    let channel_id = created["channel"]["id"].as_str().unwrap().to_string();

    let again = call(
        &app.app,
        json_request(
            "POST",
            "/api/channels",
            Some(&creator.token),
            Some(json!({ "channelName": format!("{channel_name}-2") })),
        ),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(again["message"], "User already has a channel");

    let subscribe = format!("/api/channels/{channel_id}/subscribe");
    let body = call(&app.app, json_request("PUT", &subscribe, Some(&follower.token), None), StatusCode::OK).await;
    assert_eq!(body["subscribed"], true);
    assert_eq!(body["channel"]["subscribers"], 1);
    assert_eq!(body["channel"]["owner"]["id"], creator.id.as_str());
    let body = call(&app.app, json_request("PUT", &subscribe, Some(&follower.token), None), StatusCode::OK).await;
    assert_eq!(body["channel"]["subscribers"], 0);

    let user_subscribe = format!("/api/users/{}/subscribe", creator.id);
    let body = call(&app.app, json_request("PUT", &user_subscribe, Some(&follower.token), None), StatusCode::OK).await;
    assert_eq!(body["message"], "Subscribed");
    assert_eq!(body["channel"]["subscribers"], 1);

    let subs = call(
        &app.app,
        json_request("GET", "/api/users/subscriptions", Some(&follower.token), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(subs["count"], 1);
    assert_eq!(subs["subscriptions"][0]["id"], creator.id.as_str());

    let body = call(&app.app, json_request("PUT", &user_subscribe, Some(&follower.token), None), StatusCode::OK).await;
    assert_eq!(body["message"], "Unsubscribed");
    assert_eq!(body["channel"]["subscribers"], 0);

    let own = format!("/api/users/{}/subscribe", follower.id);
    let body = call(&app.app, json_request("PUT", &own, Some(&follower.token), None), StatusCode::BAD_REQUEST).await;
    assert_eq!(body["message"], "You cannot subscribe to yourself");
}

#[tokio::test]
async fn login_and_stale_tokens() {
    let Some(app) = spawn_app().await else { return };
    let email = unique_email("login");
    call(
        &app.app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Login",
                "email": email,
                "password": "secret-pass",
                "password_confirm": "secret-pass",
            })),
        ),
        StatusCode::CREATED,
    )
    .await;

    let body = call(
        &app.app,
        json_request("POST", "/api/auth/login", None, Some(json!({ "email": email, "password": "wrong" }))),
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(body["message"], "Invalid credentials");

    let body = call(
        &app.app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Dup",
                "email": email,
                "password": "secret-pass",
                "password_confirm": "secret-pass",
            })),
        ),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["message"], "Email is already in use");

    let ghost = ghost_token();
    let body = call(&app.app, json_request("GET", "/api/auth/me", Some(&ghost), None), StatusCode::NOT_FOUND).await;
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn tokens_for_missing_accounts_cannot_react() {
    let Some(app) = spawn_app().await else { return };
    let owner = register(&app, "owner").await;
    let video_id = upload(&app, &owner, "Haunted").await;
    let channel = call(
        &app.app,
        json_request(
            "POST",
            "/api/channels",
            Some(&owner.token),
            Some(json!({ "channelName": format!("chan-{}", Uuid::now_v7().simple()) })),
        ),
        StatusCode::CREATED,
    )
    .await;
    let channel_id = channel["channel"]["id"].as_str().unwrap().to_string();
    let comment = call(
        &app.app,
        json_request(
            "POST",
            "/api/comments",
            Some(&owner.token),
            Some(json!({ "text": "pinned", "videoId": video_id })),
        ),
        StatusCode::CREATED,
    )
    .await;
    let comment_id = comment["comment"]["id"].as_str().unwrap().to_string();

    let ghost = ghost_token();
    for uri in [
        format!("/api/videos/{video_id}/like"),
        format!("/api/videos/{video_id}/dislike"),
        format!("/api/comments/{comment_id}/like"),
        format!("/api/channels/{channel_id}/subscribe"),
        format!("/api/users/{}/subscribe", owner.id),
    ] {
        let body = call(&app.app, json_request("PUT", &uri, Some(&ghost), None), StatusCode::NOT_FOUND).await;
        assert_eq!(body["success"], false, "{uri}");
        assert_eq!(body["message"], "User not found", "{uri}");
    }

    let body = call(
        &app.app,
        json_request("POST", "/api/comments", Some(&ghost), Some(json!({ "text": "boo", "videoId": video_id }))),
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body["message"], "User not found");

    let video = call(
        &app.app,
        json_request("GET", &format!("/api/videos/{video_id}"), None, None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(video["video"]["likes"], 0);
    assert_eq!(video["video"]["dislikes"], 0);
    assert!(ids(&video["video"]["liked_by"]).is_empty());

    let channel = call(
        &app.app,
        json_request("GET", &format!("/api/channels/{channel_id}"), None, None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(channel["channel"]["subscribers"], 0);
}

#[tokio::test]
async fn legacy_rows_toggle_without_rewriting_other_fields() {
    let Some(app) = spawn_app().await else { return };
    let owner = register(&app, "owner").await;
    let fan = register(&app, "fan").await;
    let owner_id = Uuid::parse_str(&owner.id).unwrap();

    // Stored shapes the API never writes itself: a clock-string duration,
    // non-array sets and counters that disagree with them.
    let video_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO videos (id, title, owner_id, video_url, duration, likes, dislikes, liked_by, disliked_by)
         VALUES ($1, 'Legacy', $2, 'https://cdn.example.com/old.mp4',
                 '\"04:05\"'::jsonb, 7, 3, '\"oops\"'::jsonb, '{\"stale\": true}'::jsonb)",
    )
    .bind(video_id)
    .bind(owner_id)
    .execute(&app.db)
    .await
    .expect("failed to insert legacy video");

    let body = call(
        &app.app,
        json_request("PUT", &format!("/api/videos/{video_id}/like"), Some(&fan.token), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["video"]["likes"], 1);
    assert_eq!(body["video"]["dislikes"], 0);
    assert_eq!(ids(&body["video"]["liked_by"]), vec![fan.id.clone()]);
    assert!(ids(&body["video"]["disliked_by"]).is_empty());
    assert_eq!(body["video"]["duration"], 245);

    let (duration, likes, dislikes, liked_by, disliked_by): (Value, i64, i64, Value, Value) = sqlx::query_as(
        "SELECT duration, likes, dislikes, liked_by, disliked_by FROM videos WHERE id = $1",
    )
    .bind(video_id)
    .fetch_one(&app.db)
    .await
    .expect("failed to read legacy video");
    assert_eq!(duration, json!("04:05"));
    assert_eq!(likes, 1);
    assert_eq!(dislikes, 0);
    assert_eq!(liked_by, json!([fan.id]));
    assert_eq!(disliked_by, json!([]));

    let body = call(
        &app.app,
        json_request("PUT", &format!("/api/videos/{video_id}/dislike"), Some(&fan.token), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["video"]["likes"], 0);
    assert_eq!(body["video"]["dislikes"], 1);
}
