//! Command handlers
//!
//! Each handler returns the text to print; the loop in `repl::Repl` does the I/O.

use crate::client::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::models::LocationAreaPage;
use crate::repl::registry::{CommandKind, CommandRegistry, CommandSpec};
use crate::repl::session::Session;

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Exit(String),
}

/// Runs `spec` with `args` against the session.
pub async fn execute(
    spec: &CommandSpec,
    args: &[String],
    registry: &CommandRegistry,
    client: &PokeApiClient,
    session: &mut Session,
) -> Result<Outcome> {
    let text = match spec.kind {
        CommandKind::Help => help(registry),
        CommandKind::Map => map_forward(client, session).await?,
        CommandKind::MapBack => map_back(client, session).await?,
        CommandKind::Explore => {
            let area = required(args, spec.name, "location area name")?;
            explore(client, area).await?
        }
        CommandKind::Catch => {
            let name = required(args, spec.name, "pokemon name")?;
            catch(client, session, name).await?
        }
        CommandKind::Inspect => {
            let name = required(args, spec.name, "pokemon name")?;
            inspect(session, name)
        }
        CommandKind::Pokedex => pokedex(session),
        CommandKind::Cache => cache_stats(client),
        CommandKind::Exit => {
            return Ok(Outcome::Exit("Closing the Pokedex... Goodbye!".to_string()));
        }
    };

    Ok(Outcome::Continue(text))
}

fn required<'a>(
    args: &'a [String],
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .ok_or(PokedexError::MissingArgument { command, argument })
}

fn help(registry: &CommandRegistry) -> String {
    let mut lines = vec![
        "Welcome to the Pokedex!".to_string(),
        "Usage:".to_string(),
        String::new(),
    ];
    lines.extend(
        registry
            .iter()
            .map(|command| format!("{}: {}", command.name, command.description)),
    );
    lines.join("\n")
}

async fn map_forward(client: &PokeApiClient, session: &mut Session) -> Result<String> {
    let url = match (&session.next, session.pages_loaded) {
        (Some(next), _) => next.clone(),
        (None, false) => client.location_areas_url(),
        (None, true) => return Ok("you're on the last page".to_string()),
    };
    show_page(client, session, &url).await
}

async fn map_back(client: &PokeApiClient, session: &mut Session) -> Result<String> {
    match session.previous.clone() {
        Some(previous) => show_page(client, session, &previous).await,
        None => Ok("you're on the first page".to_string()),
    }
}

async fn show_page(client: &PokeApiClient, session: &mut Session, url: &str) -> Result<String> {
    let LocationAreaPage {
        next,
        previous,
        results,
        ..
    } = client.location_areas(url).await?;

    session.next = next;
    session.previous = previous;
    session.pages_loaded = true;

    Ok(results
        .into_iter()
        .map(|area| area.name)
        .collect::<Vec<_>>()
        .join("\n"))
}

async fn explore(client: &PokeApiClient, area_name: &str) -> Result<String> {
    let area = client.location_area(area_name).await?;

    let mut lines = vec![
        format!("Exploring {}...", area.name),
        "Found Pokemon:".to_string(),
    ];
    lines.extend(area.pokemon_names().map(|name| format!(" - {}", name)));
    Ok(lines.join("\n"))
}

async fn catch(client: &PokeApiClient, session: &mut Session, name: &str) -> Result<String> {
    let mut lines = vec![format!("Throwing a Pokeball at {}...", name)];
    let pokemon = client.pokemon(name).await?;

    if session.attempt_catch(pokemon.base_experience.unwrap_or(0)) {
        lines.push(format!("{} was caught!", pokemon.name));
        lines.push("You may now inspect it with the inspect command.".to_string());
        session.record_catch(pokemon);
    } else {
        lines.push(format!("{} escaped!", pokemon.name));
    }
    Ok(lines.join("\n"))
}

fn inspect(session: &Session, name: &str) -> String {
    let Some(caught) = session.pokedex.get(name) else {
        return "you have not caught that pokemon".to_string();
    };
    let pokemon = &caught.pokemon;

    let mut lines = vec![
        format!("Name: {}", pokemon.name),
        format!("Height: {}", pokemon.height),
        format!("Weight: {}", pokemon.weight),
        "Stats:".to_string(),
    ];
    lines.extend(
        pokemon
            .stats
            .iter()
            .map(|s| format!("  -{}: {}", s.stat.name, s.base_stat)),
    );
    lines.push("Types:".to_string());
    lines.extend(pokemon.types.iter().map(|t| format!("  - {}", t.kind.name)));
    lines.push(format!(
        "Caught at: {}",
        caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.join("\n")
}

fn pokedex(session: &Session) -> String {
    if session.pokedex.is_empty() {
        return "Your Pokedex is empty".to_string();
    }
    let mut lines = vec!["Your Pokedex:".to_string()];
    lines.extend(session.pokedex.keys().map(|name| format!(" - {}", name)));
    lines.join("\n")
}

fn cache_stats(client: &PokeApiClient) -> String {
    let cache = client.cache();
    let stats = cache.stats();
    [
        format!("Cached responses: {}", stats.total_entries),
        format!("TTL: {}s", cache.ttl().as_secs()),
        format!("Hits: {}", stats.hits),
        format!("Misses: {}", stats.misses),
        format!("Expired: {}", stats.expired),
        format!("Hit rate: {:.1}%", stats.hit_rate() * 100.0),
    ]
    .join("\n")
}
