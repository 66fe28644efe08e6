//! Response models for the PokeAPI
//!
//! This module defines the types used to deserialize cached or freshly
//! fetched response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    LocationAreaDetail, LocationAreaPage, NamedResource, Pokemon, PokemonEncounter, PokemonStat,
    PokemonType,
};
