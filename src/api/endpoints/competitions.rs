use std::sync::Arc;

use crate::api::CachedApi;
use crate::http::{Envelope, Query};

#[derive(Debug, Clone)]
pub struct CompetitionsApi {
    api: Arc<CachedApi>,
}

impl CompetitionsApi {
    pub fn new(api: Arc<CachedApi>) -> Self {
        Self { api }
    }

    /// `GET api/competitions`
    pub async fn list(&self, query: &Query) -> Envelope {
        self.api.get_cached("api/competitions", query).await
    }

    /// `GET api/competitions/summary`
    pub async fn summary(&self, query: &Query) -> Envelope {
        self.api.get_cached("api/competitions/summary", query).await
    }

    /// Fixtures and results for one competition
    pub async fn schedule(&self, project_id: u64, sport: &str, url_segment: &str) -> Envelope {
        let uri = format!("api/projects/{project_id}/{sport}/competitions/{url_segment}/schedule");
        self.api.get_cached(&uri, &Query::new()).await
    }
}
