use std::sync::Arc;

use reqwest::Method;

use crate::http::{HttpClient, RequestOptions};

/// Upstream readiness, read straight from HTTP (never cached)
#[derive(Debug, Clone)]
pub struct HealthCheckApi {
    http: Arc<HttpClient>,
}

impl HealthCheckApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// `GET /api/healthcheck` without decoding the body
    pub async fn check(&self) -> bool {
        self.http
            .request(Method::GET, "/api/healthcheck", RequestOptions::default(), false)
            .await
            .success
    }
}
