use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use clips_api_structs::{Clip, ClipStats, ClipUpdated, Clips, Status};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open an in-memory database");
    clips::db::MIGRATIONS
        .run(&pool)
        .await
        .expect("Failed to run the migrations");
    pool
}

async fn test_router() -> Router {
    clips::web::create_router(test_pool().await)
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create_clip(router: &Router, body: serde_json::Value) -> Clip {
    let response = router
        .clone()
        .oneshot(post_json("/api/clips/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn create_clip_returns_the_new_clip() {
    let router = test_router().await;

    let clip = create_clip(
        &router,
        json!({
            "name": "Test Song",
            "description": "A test song for API",
            "url": "https://example.com/test.mp3",
            "duration": 180,
            "tags": "test,api,song",
        }),
    )
    .await;

    assert_eq!(clip.name, "Test Song");
    assert_eq!(clip.description.as_deref(), Some("A test song for API"));
    assert_eq!(clip.url, "https://example.com/test.mp3");
    assert_eq!(clip.duration, Some(180));
    assert_eq!(clip.tags.as_deref(), Some("test,api,song"));
    assert_eq!(clip.play_count, 0);
}

#[tokio::test]
async fn create_clip_requires_a_url() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(post_json("/api/clips/", json!({"name": "No URL"})))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn create_clip_rejects_an_oversized_name() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/clips/",
            json!({"name": "x".repeat(201), "url": "https://example.com/x.mp3"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_returns_the_newest_clip_first() {
    let router = test_router().await;

    create_clip(
        &router,
        json!({"name": "Older", "url": "https://x/older.mp3"}),
    )
    .await;
    create_clip(
        &router,
        json!({"name": "Newer", "url": "https://x/newer.mp3"}),
    )
    .await;

    let response = router.clone().oneshot(get("/api/clips/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let clips: Clips = body_json(response).await;
    assert_eq!(clips.items, 2);
    assert_eq!(clips.clips[0].name, "Newer");
    assert_eq!(clips.clips[1].name, "Older");
}

#[tokio::test]
async fn search_only_returns_matching_clips() {
    let router = test_router().await;

    create_clip(
        &router,
        json!({
            "name": "Rock Song",
            "description": "A rock test song",
            "url": "https://example.com/rock.mp3",
            "tags": "rock,test",
        }),
    )
    .await;
    create_clip(
        &router,
        json!({
            "name": "Pop Song",
            "description": "A pop test song",
            "url": "https://example.com/pop.mp3",
            "tags": "pop,test",
        }),
    )
    .await;

    let response = router
        .clone()
        .oneshot(get("/api/clips/?search=rock"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let clips: Clips = body_json(response).await;
    assert_eq!(clips.items, 1);
    assert_eq!(clips.clips[0].name, "Rock Song");
}

#[tokio::test]
async fn get_clip_by_id() {
    let router = test_router().await;

    let clip = create_clip(&router, json!({"name": "A", "url": "https://x/a.mp3"})).await;

    let response = router
        .clone()
        .oneshot(get(&format!("/api/clips/{}/", clip.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Clip = body_json(response).await;
    assert_eq!(fetched.id, clip.id);
    assert_eq!(fetched.name, "A");

    let response = router.clone().oneshot(get("/api/clips/999/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(response).await;
    assert_eq!(body["error"], "Clip not found");
}

#[tokio::test]
async fn edit_clip_applies_a_partial_update() {
    let router = test_router().await;

    let clip = create_clip(
        &router,
        json!({
            "name": "Edit Me",
            "url": "https://x/edit.mp3",
            "duration": 120,
            "tags": "test,edit",
        }),
    )
    .await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/clips/{}/", clip.id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({"description": "Now with a description"})).unwrap(),
        ))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ClipUpdated = body_json(response).await;

    assert_eq!(updated.old_clip.description, None);
    assert_eq!(
        updated.new_clip.description.as_deref(),
        Some("Now with a description")
    );
    assert_eq!(updated.new_clip.name, clip.name);
    assert_eq!(updated.new_clip.duration, clip.duration);
    assert_eq!(updated.new_clip.tags, clip.tags);
    assert_eq!(updated.new_clip.updated_at, clip.updated_at);
}

#[tokio::test]
async fn delete_clip_removes_it() {
    let router = test_router().await;

    let clip = create_clip(&router, json!({"name": "Doomed", "url": "https://x/d.mp3"})).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/clips/{}/", clip.id))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let removed: Clip = body_json(response).await;
    assert_eq!(removed.id, clip.id);

    let response = router
        .clone()
        .oneshot(get(&format!("/api/clips/{}/", clip.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stream_redirects_and_counts_the_play() {
    let router = test_router().await;

    let clip = create_clip(
        &router,
        json!({"name": "Stream Me", "url": "https://example.com/a.mp3"}),
    )
    .await;

    let response = router
        .clone()
        .oneshot(get(&format!("/api/clips/{}/stream", clip.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/a.mp3"
    );

    let response = router
        .clone()
        .oneshot(get(&format!("/api/clips/{}/", clip.id)))
        .await
        .unwrap();
    let fetched: Clip = body_json(response).await;
    assert_eq!(fetched.play_count, 1);
}

#[tokio::test]
async fn stream_rejects_a_non_http_url() {
    let router = test_router().await;

    let clip = create_clip(
        &router,
        json!({"name": "Local File", "url": "file:///tmp/a.mp3"}),
    )
    .await;

    let response = router
        .clone()
        .oneshot(get(&format!("/api/clips/{}/stream", clip.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

    // The play was still counted before the scheme check.
    let response = router
        .clone()
        .oneshot(get(&format!("/api/clips/{}/", clip.id)))
        .await
        .unwrap();
    let fetched: Clip = body_json(response).await;
    assert_eq!(fetched.play_count, 1);
}

#[tokio::test]
async fn stream_missing_clip_is_not_found() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(get("/api/clips/999/stream"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_reports_the_play_count_and_genre() {
    let router = test_router().await;

    let clip = create_clip(
        &router,
        json!({
            "name": "Stats Test Song",
            "description": "A song to test statistics",
            "url": "https://example.com/stats.mp3",
            "duration": 240,
            "tags": "rock,test",
        }),
    )
    .await;

    let response = router
        .clone()
        .oneshot(get(&format!("/api/clips/{}/stats", clip.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats: ClipStats = body_json(response).await;
    assert_eq!(stats.id, clip.id);
    assert_eq!(stats.title, "Stats Test Song");
    assert_eq!(
        stats.description.as_deref(),
        Some("A song to test statistics")
    );
    assert_eq!(stats.genre.as_deref(), Some("r"));
    assert_eq!(stats.duration, Some(240));
    assert_eq!(stats.play_count, 0);
}

#[tokio::test]
async fn status_reports_the_pool() {
    let router = test_router().await;

    let response = router.clone().oneshot(get("/status/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status: Status = body_json(response).await;
    assert!(status.db_connections >= 1);
}

#[tokio::test]
async fn unknown_endpoints_are_not_found() {
    let router = test_router().await;

    let response = router.clone().oneshot(get("/nope/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
