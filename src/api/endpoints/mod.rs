//! Thin per-resource wrappers over [`CachedApi`](super::CachedApi)

pub mod competitions;
pub mod countries;
pub mod events;
pub mod healthcheck;
pub mod leagues;
pub mod matchcentre;
pub mod projects;
pub mod sports;

pub use competitions::CompetitionsApi;
pub use countries::CountriesApi;
pub use events::EventsApi;
pub use healthcheck::HealthCheckApi;
pub use leagues::LeaguesApi;
pub use matchcentre::MatchCentreApi;
pub use projects::ProjectsApi;
pub use sports::SportsApi;
