//! Pokedex Module
//!
//! In-memory collection of caught Pokemon and the catch roll.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::Pokemon;

/// Rolls below this value catch the Pokemon.
///
/// The roll is drawn from `0..base_experience`, so anything with a base
/// experience at or under the threshold is always caught.
pub const CATCH_THRESHOLD: u32 = 40;

/// Rolls a Pokeball throw against a Pokemon's base experience.
pub fn attempt_catch<R: Rng>(rng: &mut R, base_experience: u32) -> bool {
    if base_experience <= CATCH_THRESHOLD {
        return true;
    }
    rng.gen_range(0..base_experience) < CATCH_THRESHOLD
}

/// A caught Pokemon and when it was caught
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Pokemon caught during this session, keyed by name.
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch. Catching the same Pokemon again refreshes its entry.
    pub fn add(&mut self, pokemon: Pokemon) {
        let caught = CaughtPokemon {
            pokemon,
            caught_at: Utc::now(),
        };
        self.caught.insert(caught.pokemon.name.clone(), caught);
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.caught.get(name)
    }

    /// Caught Pokemon in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CaughtPokemon> {
        self.caught.values()
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}
