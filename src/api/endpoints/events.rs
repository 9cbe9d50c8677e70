use std::sync::Arc;

use crate::api::CachedApi;
use crate::http::{Envelope, Query};

#[derive(Debug, Clone)]
pub struct EventsApi {
    api: Arc<CachedApi>,
}

impl EventsApi {
    pub fn new(api: Arc<CachedApi>) -> Self {
        Self { api }
    }

    /// Events from one data source. Keys in `query` take precedence over `source`.
    pub async fn list(&self, source: &str, query: &Query) -> Envelope {
        let mut params = Query::new();
        params.insert("source".to_string(), source.into());
        params.extend(query.clone());
        self.api.get_cached("api/events", &params).await
    }

    pub async fn by_id(&self, event_id: u64) -> Envelope {
        let uri = format!("/api/events/{event_id}");
        self.api.get_cached(&uri, &Query::new()).await
    }

    /// Resolve an event from its public URL parameters
    pub async fn by_url(&self, query: &Query) -> Envelope {
        self.api.get_cached("api/events/by-url", query).await
    }
}
