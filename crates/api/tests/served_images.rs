//! Image serving over a real TCP listener.
//!
//! `oneshot` never frames a response, so these tests go through `axum::serve`
//! and hyper's HTTP/1 encoder, where `Content-Length` must match the body.

mod common;

use common::{b64, TestApp};
use serde_json::json;

/// Serve the app on an ephemeral port and return its base URL.
async fn spawn(app: &TestApp) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn project_with_size(size: i64) -> serde_json::Value {
    json!({
        "title": "Framed",
        "category": "Print",
        "images": [{ "data": b64(b"abcdef"), "size": size, "filename": "f.jpg" }],
    })
}

#[tokio::test]
async fn mismatched_size_never_reaches_the_wire() {
    let app = TestApp::new();
    let base = spawn(&app).await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{base}/api/projects"))
        .json(&project_with_size(3))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.store.len(), 0);

    let image = client
        .get(format!("{base}/api/projects/1/images/0"))
        .send()
        .await
        .unwrap();
    assert_eq!(image.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn served_image_length_matches_body() {
    let app = TestApp::new();
    let base = spawn(&app).await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{base}/api/projects"))
        .json(&project_with_size(6))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);

    let image = client
        .get(format!("{base}/api/projects/1/images/0"))
        .send()
        .await
        .unwrap();
    assert_eq!(image.status(), reqwest::StatusCode::OK);
    assert_eq!(image.headers()[reqwest::header::CONTENT_LENGTH], "6");
    assert_eq!(image.bytes().await.unwrap().as_ref(), b"abcdef");
}
