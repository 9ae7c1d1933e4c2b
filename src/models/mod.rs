//! PokeAPI response models
//!
//! Only the fields the client displays are declared; serde skips the rest.

pub mod location;
pub mod pokemon;

use serde::{Deserialize, Serialize};

pub use location::{LocationArea, LocationAreaPage, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};

/// A `{ name, url }` reference to another PokeAPI resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}
