use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use skyview_core::{Config, Session, Update, WeatherSource, provider::source_from_config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Current weather for a city, themed")]
pub struct Cli {
    /// More log output (-v debug for skyview, -vv debug everywhere).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Show the current weather for one city and exit.
    Show {
        /// City name, sent to the API as typed.
        city: String,
    },

    /// Open the weather screen and search cities line by line.
    Watch {
        /// City to show first; defaults to the configured city.
        city: Option<String>,
    },
}

/// Typing this on the watch screen exits.
const QUIT: &str = ":q";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
            Command::Watch { city } => watch(city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Reading API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Reading default city")?;
    if !city.trim().is_empty() {
        config.default_city = city.trim().to_string();
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn open_session(config: &Config) -> anyhow::Result<Session> {
    let source: Arc<dyn WeatherSource> = Arc::new(source_from_config(config)?);
    Ok(Session::new(source))
}

fn draw(session: &Session) {
    if let Some(display) = session.display() {
        print!("{}", render::screen(display));
    }
}

/// Apply completions until the most recent submission has landed.
async fn settle(session: &mut Session) {
    while !session.is_settled() {
        match session.next_update().await {
            Some(Update::Applied) => draw(session),
            Some(_) => {}
            None => break,
        }
    }
}

async fn show(city: String) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;

    session.submit(city);
    // A failed fetch is already logged by the session; nothing gets drawn.
    if session.next_update().await == Some(Update::Applied) {
        draw(&session);
    }

    Ok(())
}

async fn watch(city: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;

    session.submit(city.unwrap_or_else(|| config.default_city.clone()));
    eprintln!("Type a city and press Enter to search, {QUIT} to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Reading search input")? else {
                    // Input closed: still show the last search before leaving.
                    settle(&mut session).await;
                    break;
                };
                let query = line.trim();
                if query == QUIT {
                    break;
                }
                if !query.is_empty() {
                    session.submit(query);
                }
            }
            update = session.next_update() => {
                if update == Some(Update::Applied) {
                    draw(&session);
                }
            }
        }
    }

    info!("leaving weather screen");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clap::CommandFactory;
    use skyview_core::{FetchError, WeatherResult};

    /// Answers every city with clear weather; "Paris" after a short delay.
    #[derive(Debug)]
    struct ClearSkies;

    #[async_trait]
    impl WeatherSource for ClearSkies {
        async fn fetch(&self, city: &str) -> Result<WeatherResult, FetchError> {
            if city == "Paris" {
                tokio::task::yield_now().await;
            }
            Ok(WeatherResult {
                temperature: Some(12.0),
                humidity: 70,
                wind_speed: 2.0,
                pressure: 1020,
                temp_min: 10.0,
                temp_max: 14.0,
                sunrise: 1_700_000_000,
                sunset: 1_700_030_000,
                condition: "Clear".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn settle_waits_for_the_latest_search() {
        let mut session = Session::new(Arc::new(ClearSkies));
        session.submit("Mumbai");
        session.submit("Paris");

        settle(&mut session).await;

        assert!(session.is_settled());
        assert_eq!(session.display().map(|d| d.city.as_str()), Some("Paris"));
    }

    #[tokio::test]
    async fn settle_returns_at_once_without_pending_searches() {
        let mut session = Session::new(Arc::new(ClearSkies));

        settle(&mut session).await;

        assert!(session.display().is_none());
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_takes_city_verbatim() {
        let cli = Cli::try_parse_from(["skyview", "show", "New York"]).expect("valid args");
        match cli.command {
            Command::Show { city } => assert_eq!(city, "New York"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn watch_city_is_optional_and_verbose_counts() {
        let cli = Cli::try_parse_from(["skyview", "-vv", "watch"]).expect("valid args");

        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Watch { city: None }));
    }
}
