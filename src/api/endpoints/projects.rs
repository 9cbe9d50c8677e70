use std::sync::Arc;

use crate::api::CachedApi;
use crate::http::{Envelope, Query};

#[derive(Debug, Clone)]
pub struct ProjectsApi {
    api: Arc<CachedApi>,
}

impl ProjectsApi {
    pub fn new(api: Arc<CachedApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Envelope {
        self.api.get_cached("api/projects", &Query::new()).await
    }
}
