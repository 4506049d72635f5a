//! HTTP front end.
//!
//! Every request, whatever its method or path, is resolved against the shared
//! rule set. Resolved paths get the `go-import` page, everything else a plain
//! 404.

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header::HOST},
    response::{Html, IntoResponse, Response},
};
use log::{debug, info};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::render::render_page;
use crate::resolver::{normalize_host, resolve};
use crate::rule::RuleSet;

pub const NOT_FOUND_BODY: &str = "404 Not Found";

#[derive(Clone)]
struct AppState {
    rules: Arc<RuleSet>,
}

/// Build the router serving `rules`.
pub fn router(rules: Arc<RuleSet>) -> Router {
    Router::new()
        .fallback(handle_import)
        .with_state(AppState { rules })
}

/// Bind `addr` and serve until Ctrl-C.
#[tracing::instrument(skip(rules))]
pub async fn serve(addr: &str, rules: Arc<RuleSet>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(
        "Serving {} import path rule(s) on {}",
        rules.len(),
        listener.local_addr()?
    );

    run(listener, rules).await
}

/// Serve on an already bound listener until Ctrl-C.
pub async fn run(listener: TcpListener, rules: Arc<RuleSet>) -> Result<()> {
    axum::serve(listener, router(rules))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

async fn handle_import(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let host = request_host(&headers, &uri);
    let path = uri.path();

    match resolve(&host, path, &state.rules) {
        Some(meta) => {
            debug!("{}{} -> {}", host, path, meta.vcs_root);
            Html(render_page(&meta)).into_response()
        }
        None => {
            debug!("{}{} -> not found", host, path);
            (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
        }
    }
}

/// Host from the `Host` header, or the URI authority for absolute-form requests.
fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.host())
        .map(normalize_host)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleEntry;
    use axum::http::HeaderValue;

    fn sample_rules() -> Arc<RuleSet> {
        Arc::new(
            RuleSet::from_entries(vec![
                RuleEntry {
                    path: "example.com".into(),
                    repo_path: "https://git.example.com/root.git".into(),
                    ..Default::default()
                },
                RuleEntry {
                    path: "example.com/*".into(),
                    repo_path: "https://git.example.com/*.git".into(),
                    ..Default::default()
                },
            ])
            .unwrap(),
        )
    }

    async fn spawn(rules: Arc<RuleSet>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(rules)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn get(base: &str, path: &str, host: &str) -> (u16, String, Option<String>) {
        let response = reqwest::Client::new()
            .get(format!("{}{}", base, path))
            .header("Host", host)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap().to_string());
        (status, response.text().await.unwrap(), content_type)
    }

    #[test]
    fn test_request_host_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("Example.com:8080"));
        let uri: Uri = "http://other.org/widget".parse().unwrap();
        assert_eq!(request_host(&headers, &uri), "example.com");
    }

    #[test]
    fn test_request_host_from_uri() {
        let uri: Uri = "http://Example.com/widget".parse().unwrap();
        assert_eq!(request_host(&HeaderMap::new(), &uri), "example.com");
    }

    #[test]
    fn test_request_host_missing() {
        let uri: Uri = "/widget".parse().unwrap();
        assert_eq!(request_host(&HeaderMap::new(), &uri), "");
    }

    #[tokio::test]
    async fn test_serves_wildcard_import() {
        let base = spawn(sample_rules()).await;
        let (status, body, content_type) = get(&base, "/widget?go-get=1", "example.com").await;

        assert_eq!(status, 200);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains(
            r#"content="example.com/widget git https://git.example.com/widget.git""#
        ));
    }

    #[tokio::test]
    async fn test_serves_exact_import_on_root() {
        let base = spawn(sample_rules()).await;
        let (status, body, _) = get(&base, "/", "example.com").await;

        assert_eq!(status, 200);
        assert!(body.contains(r#"content="example.com git https://git.example.com/root.git""#));
    }

    #[tokio::test]
    async fn test_unknown_host_is_not_found() {
        let base = spawn(sample_rules()).await;
        let (status, body, content_type) = get(&base, "/widget", "unknown.org").await;

        assert_eq!(status, 404);
        assert_eq!(body, NOT_FOUND_BODY);
        assert!(content_type.unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_invalid_path_is_not_found() {
        let base = spawn(sample_rules()).await;
        let (status, body, _) = get(&base, "/wid%20get", "example.com").await;

        assert_eq!(status, 404);
        assert_eq!(body, NOT_FOUND_BODY);
    }

    #[test]
    fn test_request_host_with_path_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("example.com/evil"));
        let uri: Uri = "/".parse().unwrap();
        assert_eq!(request_host(&headers, &uri), "");
    }

    #[tokio::test]
    async fn test_host_header_cannot_smuggle_project() {
        let base = spawn(sample_rules()).await;

        for host in ["example.com/evil", "example.com/..", "example.com/%3Cb%3E"] {
            let (status, body, _) = get(&base, "/", host).await;
            assert_eq!(status, 404, "host {} should not resolve", host);
            assert_eq!(body, NOT_FOUND_BODY);
        }
    }

    #[tokio::test]
    async fn test_empty_rule_set_is_not_found() {
        let base = spawn(Arc::new(RuleSet::default())).await;
        let (status, _, _) = get(&base, "/widget", "example.com").await;
        assert_eq!(status, 404);
    }
}
