use std::sync::Arc;

use crate::api::CachedApi;
use crate::http::{Envelope, Query};

#[derive(Debug, Clone)]
pub struct CountriesApi {
    api: Arc<CachedApi>,
}

impl CountriesApi {
    pub fn new(api: Arc<CachedApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &Query) -> Envelope {
        self.api.get_cached("/api/countries", query).await
    }
}
