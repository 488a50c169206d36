use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use std::io;
use wxnow_core::{API_KEY_ENV, Config, provider_from_settings, resolver_from_settings};

use crate::session::{Session, TerminalPrompt};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "wxnow",
    version,
    about = "Current weather for your location or any place"
)]
pub struct Cli {
    /// Location used by menu option 2, e.g. "London" or "Paris,FR".
    #[arg(long)]
    pub location: Option<String>,

    /// Also print coordinates, wind direction, visibility and sun times.
    #[arg(long)]
    pub details: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => show(self.location, self.details).await,
        }
    }
}

async fn show(location: Option<String>, details: bool) -> Result<()> {
    let config = Config::load()?;
    let settings = config.settings(std::env::var(API_KEY_ENV).ok())?;

    let resolver = resolver_from_settings(&settings);
    let provider = provider_from_settings(&settings);

    let session = Session::new(resolver.as_ref(), provider.as_ref())
        .with_location(location)
        .with_details(details);

    session.run(&mut TerminalPrompt, &mut io::stdout()).await
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    config.api_key = Some(key.to_string());
    let path = config.save()?;

    tracing::info!(path = %path.display(), "configuration saved");
    println!("Saved API key to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_location_flag() {
        let args = ["wxnow", "--location", "London"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.location.as_deref(), Some("London"));
        assert!(!cli.details);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_location_with_equals() {
        let args = ["wxnow", "--location=New York", "--details"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.location.as_deref(), Some("New York"));
        assert!(cli.details);
    }

    #[test]
    fn parses_configure_subcommand() {
        let cli = Cli::try_parse_from(["wxnow", "configure"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Configure)));
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["wxnow", "--city", "Paris"]).is_err());
    }
}
