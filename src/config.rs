use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::cli::Cli;
use crate::clock::{Clock, FixedClock, SystemClock};

pub const TODAY_ENV: &str = "AGECALC_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pinned date; `None` reads the system clock.
    pub today: Option<NaiveDate>,
    pub format: OutputFormat,
}

impl Config {
    /// Resolves the effective settings: `--today` wins over `AGECALC_TODAY`.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let env_today = std::env::var(TODAY_ENV).ok();
        Self::resolve(cli, env_today.as_deref())
    }

    fn resolve(cli: &Cli, env_today: Option<&str>) -> Result<Self> {
        let today = match (cli.today.as_deref(), env_today) {
            (Some(flag), _) => Some(parse_date(flag).context("invalid --today value")?),
            (None, Some(env)) if !env.trim().is_empty() => {
                Some(parse_date(env).with_context(|| format!("invalid {TODAY_ENV} value"))?)
            }
            _ => None,
        };

        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Ok(Self { today, format })
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got `{text}`"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("agecalc").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_to_system_clock_and_text() {
        let config = Config::resolve(&cli(&[]), None).unwrap();
        assert_eq!(config.today, None);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn flag_wins_over_env() {
        let config = Config::resolve(&cli(&["--today", "2024-06-15"]), Some("2000-01-01")).unwrap();
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 6, 15));
    }

    #[test]
    fn env_is_used_without_flag() {
        let config = Config::resolve(&cli(&["--json"]), Some("2000-01-01")).unwrap();
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2000, 1, 1));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.clock().today(), NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    }

    #[test]
    fn blank_env_is_ignored() {
        let config = Config::resolve(&cli(&[]), Some("  ")).unwrap();
        assert_eq!(config.today, None);
    }

    #[test]
    fn malformed_date_names_its_source() {
        let err = Config::resolve(&cli(&[]), Some("15/06/2024")).unwrap_err();
        assert!(err.to_string().contains(TODAY_ENV));

        let err = Config::resolve(&cli(&["--today", "tomorrow"]), None).unwrap_err();
        assert!(err.to_string().contains("--today"));
    }
}
