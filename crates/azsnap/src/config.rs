use std::env;

use clap::{ArgAction, Parser};

use crate::error::ReportError;

pub const DEFAULT_AZ_BIN: &str = "az";
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// CLI surface. With no flags the tool prompts interactively for the
/// date window, defaulting to the current UTC month.
#[derive(Debug, Parser, Clone, Default)]
#[command(
    version,
    about = "Report Azure disk snapshots created within a date window"
)]
pub struct CliArgs {
    /// Start date (YYYY-MM-DD). Skips the start prompt when set.
    #[arg(long = "start", value_name = "DATE")]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD). Skips the end prompt when set.
    #[arg(long = "end", value_name = "DATE")]
    pub end: Option<String>,

    /// Never prompt; missing dates fall back to the current-month default.
    #[arg(long = "no-prompt", action = ArgAction::SetTrue)]
    pub no_prompt: bool,

    /// Azure CLI binary to invoke (overrides AZSNAP_AZ_BIN).
    #[arg(long = "az-bin", value_name = "PATH")]
    pub az_bin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Tunables {
    pub az_bin: String,
    pub fetch_concurrency: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub az_bin: String,
    pub fetch_concurrency: usize,
    pub start: Option<String>,
    pub end: Option<String>,
    pub no_prompt: bool,
}

impl CliArgs {
    pub fn resolve(self) -> Result<AppConfig, ReportError> {
        let tunables = Tunables::from_env()?;
        Ok(AppConfig {
            az_bin: self.az_bin.unwrap_or(tunables.az_bin),
            fetch_concurrency: tunables.fetch_concurrency,
            start: self.start,
            end: self.end,
            no_prompt: self.no_prompt,
        })
    }
}

impl Tunables {
    pub fn from_env() -> Result<Self, ReportError> {
        let az_bin = env::var("AZSNAP_AZ_BIN").unwrap_or_else(|_| DEFAULT_AZ_BIN.to_string());
        let fetch_concurrency =
            parse_concurrency(env::var("AZSNAP_FETCH_CONCURRENCY").ok())?;
        Ok(Self {
            az_bin,
            fetch_concurrency,
        })
    }
}

fn parse_concurrency(raw: Option<String>) -> Result<usize, ReportError> {
    match raw {
        Some(value) => match value.trim().parse::<usize>() {
            Ok(0) => Err(ReportError::Config(
                "AZSNAP_FETCH_CONCURRENCY must be at least 1".to_string(),
            )),
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(ReportError::Config(format!(
                "invalid value for AZSNAP_FETCH_CONCURRENCY: {err}"
            ))),
        },
        None => Ok(DEFAULT_FETCH_CONCURRENCY),
    }
}
