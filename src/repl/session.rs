//! Per-run REPL state: pagination cursor, caught Pokemon and the catch RNG.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::models::Pokemon;

/// Upper bound (exclusive) of a catch roll.
pub const CATCH_ROLL_MAX: u32 = 999;

/// A Pokemon in the player's Pokedex.
#[derive(Debug, Clone, Serialize)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Session {
    /// Link to the page after the last one shown
    pub next: Option<String>,
    /// Link to the page before the last one shown
    pub previous: Option<String>,
    /// False until the first `map` succeeds
    pub pages_loaded: bool,
    pub pokedex: BTreeMap<String, CaughtPokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Session with a reproducible catch sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            next: None,
            previous: None,
            pages_loaded: false,
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    /// Rolls for a catch. Higher base experience means harder to catch;
    /// a Pokemon with `base_experience >= CATCH_ROLL_MAX` always escapes.
    pub fn attempt_catch(&mut self, base_experience: u32) -> bool {
        let roll = self.rng.random_range(0..CATCH_ROLL_MAX);
        roll >= base_experience
    }

    /// Records a caught Pokemon, replacing an earlier catch of the same name.
    pub fn record_catch(&mut self, pokemon: Pokemon) {
        self.pokedex.insert(
            pokemon.name.clone(),
            CaughtPokemon {
                pokemon,
                caught_at: Utc::now(),
            },
        );
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
