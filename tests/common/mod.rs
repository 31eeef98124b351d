#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

pub const ARTICLE: &str = r#"<html>
  <head><title>Release notes</title></head>
  <body><h1>Version 2</h1><p>Ships   today.</p></body>
</html>"#;

/// Serves `app` on an ephemeral local port for the lifetime of the test runtime.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A small site covering the content shapes the page loader has to handle.
pub fn fixture_site() -> Router {
    Router::new()
        .route("/article", get(|| async { Html(ARTICLE) }))
        .route(
            "/plain",
            get(|| async {
                ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "  hi there \n")
            }),
        )
        .route("/json", get(|| async { Json(json!({"title": "not a page"})) }))
        .route(
            "/empty",
            get(|| async { Html("<html><head></head><body>  </body></html>") }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Html("<h1>Not found</h1>")).into_response() }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html("<p>Too late</p>")
            }),
        )
}

pub async fn spawn_fixture_site() -> SocketAddr {
    spawn_server(fixture_site()).await
}
