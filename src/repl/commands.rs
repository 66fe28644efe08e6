//! REPL Commands
//!
//! Parsing of cleaned input into commands, and the help table.

use crate::error::{PokedexError, Result};

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Next page of location areas
    Map,
    /// Previous page of location areas
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    /// Print cache statistics
    CacheStats,
}

/// Help entry for one command
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every command, in the order `help` lists them.
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        usage: "help",
        description: "Displays a help message",
    },
    CommandInfo {
        usage: "map",
        description: "Displays the names of the next 20 location areas",
    },
    CommandInfo {
        usage: "mapb",
        description: "Displays the names of the previous 20 location areas",
    },
    CommandInfo {
        usage: "explore <location-area>",
        description: "Lists the Pokemon found in a location area",
    },
    CommandInfo {
        usage: "catch <pokemon>",
        description: "Throws a Pokeball at a Pokemon",
    },
    CommandInfo {
        usage: "inspect <pokemon>",
        description: "Shows details of a caught Pokemon",
    },
    CommandInfo {
        usage: "pokedex",
        description: "Lists every Pokemon you have caught",
    },
    CommandInfo {
        usage: "cache",
        description: "Shows response cache statistics",
    },
    CommandInfo {
        usage: "exit",
        description: "Exits the Pokedex",
    },
];

/// Lower-cases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

impl Command {
    /// Parses cleaned input words. Extra words after a command are ignored.
    ///
    /// Returns `Ok(None)` for empty input.
    pub fn parse(words: &[String]) -> Result<Option<Self>> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let arg = args.first().cloned();

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "pokedex" => Command::Pokedex,
            "cache" => Command::CacheStats,
            "explore" => Command::Explore(arg.ok_or(PokedexError::MissingArgument(
                "explore <location-area>",
            ))?),
            "catch" => Command::Catch(arg.ok_or(PokedexError::MissingArgument("catch <pokemon>"))?),
            "inspect" => {
                Command::Inspect(arg.ok_or(PokedexError::MissingArgument("inspect <pokemon>"))?)
            }
            other => return Err(PokedexError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}
