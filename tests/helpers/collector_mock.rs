//! Collector service mock server
//!
//! wiremock server answering the collector HTTP routes, for tests that
//! exercise the real HTTP client under the router.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use CollectorOuphe::config::CollectorConfig;

pub struct CollectorMockServer {
    pub server: MockServer,
}

impl CollectorMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> CollectorConfig {
        CollectorConfig {
            url: self.server.uri(),
            timeout_seconds: 2,
        }
    }

    /// `POST /login` recognizes `telegram_id` with `token`
    pub async fn mock_login(&self, telegram_id: i64, token: &str) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({"telegram_id": telegram_id})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token, "success": true})))
            .mount(&self.server)
            .await;
    }

    /// `GET /collections` for `token` returns `collections` as `(id, name)`
    pub async fn mock_list(&self, token: &str, collections: &[(&str, &str)]) {
        let body: Vec<_> = collections
            .iter()
            .map(|(id, name)| json!({"id": id, "name": name}))
            .collect();

        Mock::given(method("GET"))
            .and(path("/collections"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `POST /collections` with `name` succeeds exactly `times` times
    pub async fn expect_create(&self, name: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/collections"))
            .and(body_json(json!({"name": name})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "c-1", "name": name})))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// `PATCH /collections/{id}` fails with a 500
    pub async fn mock_rename_failure(&self, id: &str) {
        Mock::given(method("PATCH"))
            .and(path(format!("/collections/{}", id)))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "storage unavailable"})))
            .mount(&self.server)
            .await;
    }
}
