//! REPL Module
//!
//! The interactive command loop. Input is read line by line, normalised by
//! [`clean_input`], looked up in a [`CommandRegistry`] and dispatched.

mod commands;
mod registry;
mod session;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use crate::client::PokeApiClient;
use crate::error::Result;

pub use commands::Outcome;
pub use registry::{CommandKind, CommandRegistry, CommandSpec};
pub use session::{CaughtPokemon, Session, CATCH_ROLL_MAX};

pub const PROMPT: &str = "Pokedex > ";

/// Lower-cases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

// == REPL ==
pub struct Repl {
    registry: CommandRegistry,
    client: PokeApiClient,
    session: Session,
}

impl Repl {
    pub fn new(registry: CommandRegistry, client: PokeApiClient, session: Session) -> Self {
        Self {
            registry,
            client,
            session,
        }
    }

    /// Interprets one input line. Blank lines yield `None`.
    pub async fn dispatch(&mut self, line: &str) -> Result<Option<Outcome>> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let Some(spec) = self.registry.get(name) else {
            return Ok(Some(Outcome::Continue("Unknown command".to_string())));
        };

        commands::execute(spec, args, &self.registry, &self.client, &mut self.session)
            .await
            .map(Some)
    }

    /// Runs the prompt loop until `exit` or end of input.
    ///
    /// Command errors are printed and the loop continues; only I/O errors on
    /// `reader` or `writer` end it early. Bytes that are not valid UTF-8 are
    /// replaced rather than rejected.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            writer.write_all(PROMPT.as_bytes()).await?;
            writer.flush().await?;

            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                writer.write_all(b"\n").await?;
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);

            match self.dispatch(line).await {
                Ok(None) => {}
                Ok(Some(Outcome::Continue(text))) => write_block(&mut writer, &text).await?,
                Ok(Some(Outcome::Exit(text))) => {
                    write_block(&mut writer, &text).await?;
                    break;
                }
                Err(e) => {
                    warn!(error = %e, input = %line, "Command failed");
                    write_block(&mut writer, &format!("Error: {}", e)).await?;
                }
            }
        }

        writer.flush().await
    }
}

async fn write_block<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> std::io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cache::TtlCache;
    use crate::config::Config;
    use std::sync::Arc;

    fn offline_repl() -> Repl {
        let config = Config {
            api_url: "http://127.0.0.1:9/api/v2".to_string(),
            request_timeout: 1,
            ..Config::default()
        };
        let client = PokeApiClient::new(&config, Arc::new(TtlCache::with_ttl_secs(30))).unwrap();
        Repl::new(CommandRegistry::standard(), client, Session::with_seed(1))
    }

    #[tokio::test]
    async fn test_run_survives_invalid_utf8_line() {
        let mut repl = offline_repl();
        let mut output: Vec<u8> = Vec::new();

        repl.run(&b"caf\xe9\nhelp\nexit\n"[..], &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Unknown command\n"));
        assert!(output.contains("Welcome to the Pokedex!\n"));
        assert!(output.ends_with("Closing the Pokedex... Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_run_handles_crlf_and_missing_final_newline() {
        let mut repl = offline_repl();
        let mut output: Vec<u8> = Vec::new();

        repl.run(&b"pokedex\r\nmapb"[..], &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "Pokedex > Your Pokedex is empty\nPokedex > you're on the first page\nPokedex > \n"
        );
    }

    #[test]
    fn test_clean_input() {
        let cases = [
            ("  hello world  ", vec!["hello", "world"]),
            (
                "  Charmander Bulbasaur PIKACHU  ",
                vec!["charmander", "bulbasaur", "pikachu"],
            ),
            ("\tmap\n", vec!["map"]),
            ("   ", vec![]),
        ];

        for (input, expected) in cases {
            assert_eq!(clean_input(input), expected, "input: {:?}", input);
        }
    }
}
