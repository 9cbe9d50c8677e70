//! Endpoint registry handed to consumers

use std::sync::Arc;

use tracing::info;

use super::endpoints::{
    CompetitionsApi, CountriesApi, EventsApi, HealthCheckApi, LeaguesApi, MatchCentreApi,
    ProjectsApi, SportsApi,
};
use super::facade::CachedApi;
use crate::logging::HTTP_CHANNEL;

/// One instance of every endpoint wrapper over a shared [`CachedApi`].
///
/// The upstream health check runs once at construction and is kept as
/// `status`.
#[derive(Debug, Clone)]
pub struct ApiProvider {
    pub competitions: CompetitionsApi,
    pub countries: CountriesApi,
    pub events: EventsApi,
    pub healthcheck: HealthCheckApi,
    pub leagues: LeaguesApi,
    pub matchcentre: MatchCentreApi,
    pub projects: ProjectsApi,
    pub sports: SportsApi,
    status: bool,
}

impl ApiProvider {
    pub async fn new(api: Arc<CachedApi>) -> Self {
        let healthcheck = HealthCheckApi::new(api.http().clone());
        let status = healthcheck.check().await;
        info!(target: HTTP_CHANNEL, healthy = status, "API health check complete");

        Self {
            competitions: CompetitionsApi::new(api.clone()),
            countries: CountriesApi::new(api.clone()),
            events: EventsApi::new(api.clone()),
            healthcheck,
            leagues: LeaguesApi::new(api.clone()),
            matchcentre: MatchCentreApi::new(api.clone()),
            projects: ProjectsApi::new(api.clone()),
            sports: SportsApi::new(api),
            status,
        }
    }

    /// Result of the health check taken at construction
    pub fn status(&self) -> bool {
        self.status
    }
}
