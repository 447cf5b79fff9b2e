use super::{CommandContext, OutputFormat};
use anyhow::Result;

pub struct ShowsCommand {
    pub query: Option<String>,
    pub format: OutputFormat,
}

impl ShowsCommand {
    pub async fn execute(self, context: CommandContext) -> Result<()> {
        let client = context.client()?;
        let mut shows = client.fetch_shows().await?;
        shows.sort_by_cached_key(|show| show.name.to_lowercase());

        let results: Vec<_> = match &self.query {
            Some(query) => {
                let query_lower = query.to_lowercase();
                shows
                    .iter()
                    .filter(|show| show.matches(&query_lower))
                    .collect()
            }
            None => shows.iter().collect(),
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
            OutputFormat::Text => {
                if results.is_empty() {
                    match &self.query {
                        Some(query) => println!("No results found for '{}'", query),
                        None => println!("No shows available"),
                    }
                } else {
                    for show in &results {
                        println!(
                            "[{}] {} | {} | {} | Rating: {}",
                            show.id,
                            show.name,
                            show.genres_text(),
                            show.status,
                            show.rating_text()
                        );
                    }
                    println!("\n{} shows", results.len());
                }
            }
        }

        Ok(())
    }
}
