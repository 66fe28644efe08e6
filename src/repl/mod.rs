//! REPL Module
//!
//! Interactive command loop over the PokeAPI client.

mod commands;
mod pokedex;

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::api::PokeApiClient;
use crate::error::Result;
use crate::models::LocationAreaPage;

pub use commands::{clean_input, Command, CommandInfo, COMMANDS};
pub use pokedex::{attempt_catch, CaughtPokemon, Pokedex, CATCH_THRESHOLD};

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";

/// Whether the loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Location-area pagination cursor
#[derive(Debug, Default, Clone)]
struct Pagination {
    next: Option<String>,
    previous: Option<String>,
    started: bool,
}

impl Pagination {
    fn update(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.started = true;
    }
}

/// One interactive session: the client plus per-session state.
pub struct Repl {
    client: PokeApiClient,
    pagination: Pagination,
    pokedex: Pokedex,
    rng: StdRng,
}

impl Repl {
    pub fn new(client: PokeApiClient) -> Self {
        Self {
            client,
            pagination: Pagination::default(),
            pokedex: Pokedex::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Reads lines from `input` until `exit` or end of input.
    ///
    /// Command failures are printed and the loop continues; only I/O errors
    /// on `input` or `out` end it early.
    pub async fn run<I, W>(&mut self, input: I, out: &mut W) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                return Ok(());
            };

            if self.handle_line(&line, out).await? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Parses and runs one line of input.
    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let command = match Command::parse(&clean_input(line)) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        debug!(?command, "Running command");
        match self.execute(command, out).await {
            Ok(flow) => Ok(flow),
            Err(e) => {
                warn!("Command failed: {}", e);
                writeln!(out, "{}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Runs a parsed command, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map_next(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
            Command::CacheStats => self.cache_stats(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for info in COMMANDS {
            writeln!(out, "{}: {}", info.usage, info.description)?;
        }
        Ok(())
    }

    async fn map_next<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.pagination.started && self.pagination.next.is_none() {
            writeln!(out, "You're on the last page")?;
            return Ok(());
        }

        let page = self
            .client
            .location_areas(self.pagination.next.as_deref())
            .await?;
        self.show_page(&page, out)
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(previous) = self.pagination.previous.clone() else {
            writeln!(out, "You're on the first page")?;
            return Ok(());
        };

        let page = self.client.location_areas(Some(&previous)).await?;
        self.show_page(&page, out)
    }

    fn show_page<W: Write>(&mut self, page: &LocationAreaPage, out: &mut W) -> Result<()> {
        self.pagination.update(page);

        writeln!(out, "Location Areas:")?;
        for area in &page.results {
            writeln!(out, " - {}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let detail = self.client.location_area(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for name in detail.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        let pokemon = self.client.pokemon(name).await?;

        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;
        let base_experience = pokemon.base_experience.unwrap_or(0);
        if attempt_catch(&mut self.rng, base_experience) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.add(pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(caught) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        let pokemon = &caught.pokemon;
        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        writeln!(
            out,
            "Caught at: {}",
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty. Go catch some Pokemon!")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for caught in self.pokedex.iter() {
            writeln!(out, " - {}", caught.pokemon.name)?;
        }
        Ok(())
    }

    fn cache_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let cache = self.client.cache();
        let stats = cache.stats();

        writeln!(out, "Cache TTL: {}s", cache.ttl().as_secs())?;
        writeln!(out, "Entries: {}", stats.total_entries)?;
        writeln!(out, "Hits: {}", stats.hits)?;
        writeln!(out, "Misses: {}", stats.misses)?;
        writeln!(out, "Hit rate: {:.1}%", stats.hit_rate() * 100.0)?;
        writeln!(out, "Expired: {} over {} sweeps", stats.expired, stats.sweeps)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ExpiringCache;
    use crate::config::Config;
    use std::sync::Arc;
    use std::time::Duration;

    // Nothing listens on the discard port; tests only touch cached URLs.
    const BASE_URL: &str = "http://127.0.0.1:9/api/v2";

    fn test_repl() -> Repl {
        let config = Config {
            api_base_url: BASE_URL.to_string(),
            ..Config::default()
        };
        let cache = Arc::new(ExpiringCache::new(Duration::from_secs(60)).unwrap());
        Repl::new(PokeApiClient::new(&config, cache).unwrap())
    }

    async fn run_line(repl: &mut Repl, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = repl.handle_line(line, &mut out).await.unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_help_lists_commands() {
        let mut repl = test_repl();
        let (flow, out) = run_line(&mut repl, "help").await;

        assert_eq!(flow, Flow::Continue);
        assert!(out.starts_with("Welcome to the Pokedex!"));
        assert!(out.contains("mapb: "));
        assert!(out.contains("explore <location-area>: "));
    }

    #[tokio::test]
    async fn test_exit_stops_loop() {
        let mut repl = test_repl();
        let (flow, out) = run_line(&mut repl, "exit").await;

        assert_eq!(flow, Flow::Exit);
        assert!(out.contains("Goodbye"));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut repl = test_repl();
        let (flow, out) = run_line(&mut repl, "teleport").await;

        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, "Unknown command\n");
    }

    #[tokio::test]
    async fn test_mapb_on_first_page() {
        let mut repl = test_repl();
        let (_, out) = run_line(&mut repl, "mapb").await;

        assert_eq!(out, "You're on the first page\n");
    }

    #[tokio::test]
    async fn test_inspect_uncaught() {
        let mut repl = test_repl();
        let (_, out) = run_line(&mut repl, "inspect mew").await;

        assert_eq!(out, "you have not caught that pokemon\n");
    }

    #[tokio::test]
    async fn test_map_served_from_cache() {
        let mut repl = test_repl();
        repl.client.cache().add(
            format!("{}/location-area", BASE_URL),
            br#"{"count": 2, "next": null, "previous": null,
                 "results": [{"name": "canalave-city-area"}, {"name": "eterna-city-area"}]}"#
                .to_vec(),
        );

        let (_, out) = run_line(&mut repl, "map").await;
        assert!(out.contains(" - canalave-city-area\n"));
        assert!(out.contains(" - eterna-city-area\n"));

        let (_, out) = run_line(&mut repl, "map").await;
        assert_eq!(out, "You're on the last page\n");
    }

    #[tokio::test]
    async fn test_catch_and_inspect_from_cache() {
        let mut repl = test_repl();
        repl.client.cache().add(
            format!("{}/pokemon/caterpie", BASE_URL),
            br#"{"name": "caterpie", "base_experience": 39, "height": 3, "weight": 29,
                 "stats": [{"base_stat": 45, "stat": {"name": "hp"}}],
                 "types": [{"slot": 1, "type": {"name": "bug"}}]}"#
                .to_vec(),
        );

        let (_, out) = run_line(&mut repl, "catch caterpie").await;
        assert!(out.contains("caterpie was caught!"));
        assert_eq!(repl.pokedex().len(), 1);

        let (_, out) = run_line(&mut repl, "inspect caterpie").await;
        assert!(out.contains("Name: caterpie\n"));
        assert!(out.contains("Weight: 29\n"));
        assert!(out.contains("  -hp: 45\n"));
        assert!(out.contains("  - bug\n"));

        let (_, out) = run_line(&mut repl, "pokedex").await;
        assert!(out.contains(" - caterpie\n"));
    }

    #[tokio::test]
    async fn test_command_error_is_printed() {
        let mut repl = test_repl();
        repl.client
            .cache()
            .add(format!("{}/location-area/broken", BASE_URL), b"{".to_vec());

        let (flow, out) = run_line(&mut repl, "explore broken").await;
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("Failed to decode response"));
    }

    #[tokio::test]
    async fn test_run_until_end_of_input() {
        let mut repl = test_repl();
        let mut out = Vec::new();

        repl.run(&b"\nhelp\n"[..], &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(PROMPT).count(), 3);
        assert!(out.contains("Welcome to the Pokedex!"));
    }

    #[tokio::test]
    async fn test_run_stops_at_exit() {
        let mut repl = test_repl();
        let mut out = Vec::new();

        repl.run(&b"exit\nhelp\n"[..], &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Goodbye"));
        assert!(!out.contains("Welcome"));
    }
}
