use std::sync::Arc;

use crate::api::CachedApi;
use crate::http::{Envelope, Query};

/// Match centre pages for one project and sport
#[derive(Debug, Clone)]
pub struct MatchCentreApi {
    api: Arc<CachedApi>,
}

impl MatchCentreApi {
    pub fn new(api: Arc<CachedApi>) -> Self {
        Self { api }
    }

    pub async fn configuration(&self, project_id: u64, sport: &str, query: &Query) -> Envelope {
        let uri = format!("api/projects/{project_id}/matchcentre/{sport}/configuration");
        self.api.get_cached(&uri, query).await
    }

    pub async fn events(&self, project_id: u64, sport: &str, query: &Query) -> Envelope {
        let uri = format!("api/projects/{project_id}/matchcentre/{sport}/events");
        self.api.get_cached(&uri, query).await
    }

    /// Single event by its slug; `query` keys take precedence over `event`
    pub async fn event(&self, project_id: u64, sport: &str, event: &str, query: &Query) -> Envelope {
        let uri = format!("api/projects/{project_id}/matchcentre/{sport}/event");
        let mut params = Query::new();
        params.insert("event".to_string(), event.into());
        params.extend(query.clone());
        self.api.get_cached(&uri, &params).await
    }

    pub async fn categories(&self, project_id: u64, sport: &str) -> Envelope {
        let uri = format!("api/projects/{project_id}/matchcentre/{sport}/categories");
        self.api.get_cached(&uri, &Query::new()).await
    }

    pub async fn leagues_summary(&self, project_id: u64, sport: &str, query: &Query) -> Envelope {
        let uri = format!("api/projects/{project_id}/matchcentre/{sport}/leagues/summary");
        self.api.get_cached(&uri, query).await
    }
}
