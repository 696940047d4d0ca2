//! Data fetching: chunk planning, the monitoring API client, the retry
//! coordinator, and the per-request memoization cache.

pub mod api;
pub mod cache;
pub mod chunk;
pub mod fetch;

pub use api::{SiteCredentials, SolarClient};
pub use cache::FetchCache;
pub use chunk::{MAX_CHUNK_DAYS, plan_chunks};
pub use fetch::{EnergySource, FetchOutcome, fetch_energy_chunked};
