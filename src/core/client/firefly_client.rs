use std::time::Instant;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::core::client::dto::BlobPayload;
use crate::core::client::fetch_error::FetchError;
use crate::core::config::AppConfig;

/// Read access to the backend REST API.
///
/// `path` is everything after the base URL, query string included.
#[async_trait]
pub trait FireflyApi: Send + Sync {
    async fn get_value(&self, path: &str) -> Result<Value, FetchError>;

    async fn get_blob(&self, path: &str) -> Result<BlobPayload, FetchError>;
}

#[derive(Clone)]
pub struct HttpFireflyClient {
    client: Client,
    base_url: String,
    credentials: Option<(String, Option<String>)>,
}

impl HttpFireflyClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.request_timeout())
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        let mut this = Self::new(client, cfg.backend_url.clone());
        if let Some(user) = cfg.backend_username.clone() {
            this.credentials = Some((user, cfg.backend_password.clone()));
        }
        Ok(this)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let req = self.client.get(url);
        match &self.credentials {
            Some((user, password)) => req.basic_auth(user, password.as_ref()),
            None => req,
        }
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let start = Instant::now();
        let resp = self.get(url).send().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        debug!(url = %url, status = status.as_u16(), duration_ms = start.elapsed().as_millis(), "backend request completed");

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl FireflyApi for HttpFireflyClient {
    async fn get_value(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.url(path);
        let resp = self.send(&url).await?;
        resp.json::<Value>()
            .await
            .map_err(|e| FetchError::decode(&url, e))
    }

    async fn get_blob(&self, path: &str) -> Result<BlobPayload, FetchError> {
        let url = self.url(path);
        let resp = self.send(&url).await?;
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp.bytes().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        Ok(BlobPayload {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::RawQuery;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route(
                "/api/v1/namespaces/default/messages",
                get(|RawQuery(q): RawQuery| async move {
                    Json(json!({ "total": 10, "query": q.unwrap_or_default() }))
                }),
            )
            .route(
                "/api/v1/namespaces/default/operations",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/api/v1/namespaces/default/events",
                get(|| async { "not json" }),
            )
            .route(
                "/api/v1/namespaces/default/identities",
                get(|headers: HeaderMap| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({ "auth": auth }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn success_decodes_json_and_keeps_query() {
        let base = spawn_backend().await;
        let client = HttpFireflyClient::new(Client::new(), format!("{}/", base));
        let value = client
            .get_value("/api/v1/namespaces/default/messages?count&created=>=100&limit=1")
            .await
            .unwrap();
        assert_eq!(value["total"], 10);
        let query = value["query"].as_str().unwrap();
        assert!(query.starts_with("count&created="), "unexpected query {}", query);
        assert!(query.ends_with("&limit=1"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let base = spawn_backend().await;
        let client = HttpFireflyClient::new(Client::new(), base);
        let err = client
            .get_value("/api/v1/namespaces/default/operations?count&limit=1")
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let base = spawn_backend().await;
        let client = HttpFireflyClient::new(Client::new(), base);
        let err = client
            .get_value("/api/v1/namespaces/default/events?limit=1")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let client = HttpFireflyClient::new(Client::new(), "http://127.0.0.1:9");
        let err = client.get_value("/api/v1/namespaces").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn credentials_are_sent_as_basic_auth() {
        let base = spawn_backend().await;
        let cfg = AppConfig {
            backend_url: base,
            backend_username: Some("admin".into()),
            backend_password: Some("pw".into()),
            ..AppConfig::default()
        };
        let client = HttpFireflyClient::from_config(&cfg).unwrap();
        let value = client
            .get_value("/api/v1/namespaces/default/identities")
            .await
            .unwrap();
        assert_eq!(value["auth"], "Basic YWRtaW46cHc=");
    }
}
