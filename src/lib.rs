//! Pokedex - an interactive PokeAPI client
//!
//! Browses location areas, explores them and catches Pokemon, memoising raw
//! API responses in a time-bounded in-memory cache.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use cache::TtlCache;
pub use client::PokeApiClient;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::{CommandRegistry, Repl, Session};
