//! API Module
//!
//! HTTP access to the PokeAPI.
//!
//! # Endpoints used
//! - `GET /location-area` - Paginated location areas
//! - `GET /location-area/{name}` - Pokemon encounters in an area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;

pub use client::PokeApiClient;
