//! Command Registry
//!
//! Name to command mapping, built once at startup and handed to the REPL.

use std::collections::BTreeMap;

/// Which handler a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
    Cache,
    Exit,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

/// Registered commands, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full command set of the Pokedex.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("help", "Displays a help message", CommandKind::Help);
        registry.register(
            "map",
            "Displays the next 20 location areas in the Pokemon world",
            CommandKind::Map,
        );
        registry.register("mapb", "Displays the previous 20 location areas", CommandKind::MapBack);
        registry.register(
            "explore",
            "Lists the Pokemon found in a location area: explore <area>",
            CommandKind::Explore,
        );
        registry.register(
            "catch",
            "Throws a Pokeball at a Pokemon: catch <pokemon>",
            CommandKind::Catch,
        );
        registry.register(
            "inspect",
            "Shows details of a caught Pokemon: inspect <pokemon>",
            CommandKind::Inspect,
        );
        registry.register("pokedex", "Lists every Pokemon you have caught", CommandKind::Pokedex);
        registry.register("cache", "Shows response cache statistics", CommandKind::Cache);
        registry.register("exit", "Exit the Pokedex", CommandKind::Exit);
        registry
    }

    /// Adds or replaces a command.
    pub fn register(&mut self, name: &'static str, description: &'static str, kind: CommandKind) {
        self.commands.insert(
            name,
            CommandSpec {
                name,
                description,
                kind,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
