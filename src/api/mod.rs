//! # API access
//!
//! [`CachedApi`] is the get-or-populate read path; [`ApiProvider`] bundles the
//! endpoint wrappers built on it.

pub mod endpoints;
pub mod facade;
pub mod provider;

pub use endpoints::{
    CompetitionsApi, CountriesApi, EventsApi, HealthCheckApi, LeaguesApi, MatchCentreApi,
    ProjectsApi, SportsApi,
};
pub use facade::{cache_key, CachePolicy, CachedApi};
pub use provider::ApiProvider;
