use std::sync::Arc;

use crate::api::CachedApi;
use crate::http::{Envelope, Query};

#[derive(Debug, Clone)]
pub struct SportsApi {
    api: Arc<CachedApi>,
}

impl SportsApi {
    pub fn new(api: Arc<CachedApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Envelope {
        self.api.get_cached("api/sports", &Query::new()).await
    }

    pub async fn schedule(&self, project_id: u64, sport: &str) -> Envelope {
        let uri = format!("api/projects/{project_id}/{sport}/schedule");
        self.api.get_cached(&uri, &Query::new()).await
    }
}
