//! Client Module
//!
//! HTTP access to PokeAPI, memoised through the response cache.

mod pokeapi;

pub use pokeapi::PokeApiClient;
