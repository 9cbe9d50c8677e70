use std::sync::Arc;

use serde_json::Value;

use crate::api::CachedApi;
use crate::http::{Envelope, Query};

#[derive(Debug, Clone)]
pub struct LeaguesApi {
    api: Arc<CachedApi>,
}

impl LeaguesApi {
    pub fn new(api: Arc<CachedApi>) -> Self {
        Self { api }
    }

    /// `sources` is a single source name or a list of them
    pub async fn list(&self, sources: impl Into<Value>, query: &Query) -> Envelope {
        let mut params = Query::new();
        params.insert("sources".to_string(), sources.into());
        params.extend(query.clone());
        self.api.get_cached("api/leagues", &params).await
    }

    pub async fn schedule(&self, project_id: u64, sport: &str, url_segment: &str) -> Envelope {
        let uri = format!("/api/projects/{project_id}/{sport}/leagues/{url_segment}/schedule");
        self.api.get_cached(&uri, &Query::new()).await
    }
}
