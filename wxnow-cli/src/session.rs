//! One interactive run: menu choice, location, fetch, render.

use anyhow::{Context, Result};
use std::{
    io::{self, BufRead, IsTerminal, Write},
    str::FromStr,
};
use thiserror::Error;
use wxnow_core::{LocationResolver, WeatherProvider, render, render_details};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid option '{0}'. Choose 1 or 2.")]
    InvalidChoice(String),

    #[error("Invalid location. Exiting.")]
    InvalidLocation,

    #[error("Error reading input: {0}")]
    Read(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DetectLocation,
    ManualLocation,
}

impl FromStr for MenuChoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(1) => Ok(MenuChoice::DetectLocation),
            Ok(2) => Ok(MenuChoice::ManualLocation),
            _ => Err(InputError::InvalidChoice(trimmed.to_string())),
        }
    }
}

/// Source of interactive answers.
pub trait Prompt {
    fn ask(&mut self, message: &str) -> io::Result<String>;
}

/// Reads from the terminal with `inquire`, or line by line when stdin is
/// piped.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str) -> io::Result<String> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return inquire::Text::new(message)
                .prompt()
                .map_err(io::Error::other);
        }

        print!("{message} ");
        io::stdout().flush()?;

        let mut line = String::new();
        stdin.lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[derive(Debug)]
pub struct Session<'a> {
    resolver: &'a dyn LocationResolver,
    provider: &'a dyn WeatherProvider,
    location: Option<String>,
    details: bool,
}

impl<'a> Session<'a> {
    pub fn new(resolver: &'a dyn LocationResolver, provider: &'a dyn WeatherProvider) -> Self {
        Self {
            resolver,
            provider,
            location: None,
            details: false,
        }
    }

    /// Location supplied up front, used by menu option 2.
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    pub async fn run(&self, prompt: &mut impl Prompt, out: &mut impl Write) -> Result<()> {
        writeln!(out, "Choose an option:")?;
        writeln!(out, "1. Get weather for your location")?;
        writeln!(out, "2. Enter a specific location")?;
        out.flush()?;

        let answer = prompt
            .ask("Enter your choice (1 or 2):")
            .map_err(InputError::from)?;
        let choice: MenuChoice = answer.parse()?;
        tracing::debug!(?choice, "menu choice");

        let location = match choice {
            MenuChoice::DetectLocation => self
                .resolver
                .resolve()
                .await
                .context("Error getting user location")?,
            MenuChoice::ManualLocation => self.manual_location(prompt)?,
        };

        let report = self
            .provider
            .current(&location)
            .await
            .context("Error fetching weather data")?;

        render(&report, out)?;
        if self.details {
            render_details(&report, out)?;
        }

        Ok(())
    }

    fn manual_location(&self, prompt: &mut impl Prompt) -> Result<String, InputError> {
        let preset = self
            .location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty());

        let location = match preset {
            Some(loc) => loc.to_string(),
            None => prompt.ask("Enter the location:")?.trim().to_string(),
        };

        if location.is_empty() {
            return Err(InputError::InvalidLocation);
        }
        Ok(location)
    }
}
