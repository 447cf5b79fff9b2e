use anyhow::Result;

use tvmaze_tui::api::TvMazeClient;
use tvmaze_tui::config::Config;

pub mod episodes;
pub mod shows;

pub use episodes::EpisodesCommand;
pub use shows::ShowsCommand;

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Invalid format: {}. Use 'text' or 'json'", s),
        }
    }
}

/// Context for command execution
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// API client with progress spinners enabled for plain-terminal use.
    pub fn client(&self) -> Result<TvMazeClient> {
        let mut client = TvMazeClient::new(&self.config.api.base_url)?;
        client.enable_progress();
        Ok(client)
    }
}
