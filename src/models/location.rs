//! Location area models

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// One page of `GET /location-area`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaPage {
    pub count: u32,
    /// Absolute URL of the next page, absent on the last page
    pub next: Option<String>,
    /// Absolute URL of the previous page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// `GET /location-area/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

impl LocationArea {
    /// Names of the Pokemon that can be encountered here, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}
