//! Pokedex - An interactive PokeAPI client
//!
//! Browses location areas, explores them, and catches Pokemon, with every
//! API response memoized in an expiring in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
mod tasks;

pub use api::PokeApiClient;
pub use cache::ExpiringCache;
pub use config::Config;
pub use repl::Repl;
