//! Command-line and environment configuration.
use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::app::DEFAULT_BACKEND;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// TUI to list, create, edit and delete users against a REST backend.
#[derive(Debug, Clone, Parser)]
#[command(name = "user-board", version, about)]
pub struct Cli {
    /// Base URL of the API server.
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Backend variant; repeat to cycle between several at runtime.
    #[arg(long = "backend", value_name = "NAME", default_value = DEFAULT_BACKEND)]
    pub backends: Vec<String>,

    /// Where tracing output goes; the terminal belongs to the UI.
    #[arg(long, default_value = "user-board.log")]
    pub log_file: PathBuf,

    /// Keybinding overrides, one `Action = Key` per line.
    #[arg(long)]
    pub keymap: Option<String>,
}

impl Cli {
    /// Reject values that would produce a broken request path.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            bail!("api url must not be empty");
        }
        for name in &self.backends {
            if name.trim().is_empty() || name.contains('/') || name.contains(char::is_whitespace) {
                bail!("invalid backend name {name:?}");
            }
        }
        Ok(())
    }
}
