use super::{CommandContext, OutputFormat};
use anyhow::Result;

use tvmaze_tui::models::{self, Show};
use tvmaze_tui::tui::ui::episode_count_line;

pub struct EpisodesCommand {
    /// Numeric show id or exact show name.
    pub show: String,
    pub query: Option<String>,
    pub episode: Option<String>,
    pub format: OutputFormat,
}

impl EpisodesCommand {
    pub async fn execute(self, context: CommandContext) -> Result<()> {
        let client = context.client()?;
        let shows = client.fetch_shows().await?;
        let show = resolve_show(&shows, &self.show)?;

        eprintln!("Fetching episodes for {}...", show.name);
        let episodes = client.fetch_episodes(show.id).await?;
        let total = episodes.len();

        // Exact lookup by SxxEyy code trumps the substring filter
        if let Some(code) = &self.episode {
            let code = code.to_uppercase();
            let Some(episode) = models::find_episode(&episodes, &code) else {
                anyhow::bail!("Episode '{}' not found in {}", code, show.name);
            };

            match self.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(episode)?);
                }
                OutputFormat::Text => {
                    println!("{}", episode.label());
                    println!("  Runtime: {}", episode.runtime_text());
                    if !episode.url.is_empty() {
                        println!("  Link: {}", episode.url);
                    }
                    println!("  {}", episode.summary_text());
                    println!("\n{}", episode_count_line(1, total));
                }
            }
            return Ok(());
        }

        let results: Vec<_> = match &self.query {
            Some(query) => {
                let query_lower = query.to_lowercase();
                episodes
                    .iter()
                    .filter(|episode| episode.matches(&query_lower))
                    .collect()
            }
            None => episodes.iter().collect(),
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
            OutputFormat::Text => {
                for episode in &results {
                    println!("{}", episode.label());
                }
                println!("\n{}", episode_count_line(results.len(), total));
            }
        }

        Ok(())
    }
}

fn resolve_show<'a>(shows: &'a [Show], wanted: &str) -> Result<&'a Show> {
    if let Ok(id) = wanted.parse::<u64>() {
        if let Some(show) = shows.iter().find(|s| s.id == id) {
            return Ok(show);
        }
    }

    let wanted_lower = wanted.to_lowercase();
    shows
        .iter()
        .find(|s| s.name.to_lowercase() == wanted_lower)
        .ok_or_else(|| anyhow::anyhow!("Show '{}' not found", wanted))
}
