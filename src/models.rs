// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use serde::{Deserialize, Serialize};

/// One show from the catalog endpoint. Unknown JSON fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
}

/// One episode of a show. Identity within a show is the (season, number)
/// pair; the endpoint returns episodes ordered by season then number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub name: String,
    pub season: u32,
    pub number: u32,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// Strips paragraph wrappers from summary markup. Only `<p>` and `</p>`
/// are removed; inner markup is left as-is.
fn strip_paragraph_tags(raw: &str) -> String {
    raw.replace("<p>", "").replace("</p>", "")
}

impl Show {
    /// Case-insensitive filter predicate over name, genres (joined with a
    /// space), and raw summary. `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.genres.join(" ").to_lowercase().contains(needle)
            || self
                .summary
                .as_ref()
                .map(|s| s.to_lowercase().contains(needle))
                .unwrap_or(false)
    }

    /// Display summary: paragraph tags stripped, empty when absent.
    pub fn summary_text(&self) -> String {
        self.summary
            .as_deref()
            .map(strip_paragraph_tags)
            .unwrap_or_default()
    }

    pub fn rating_text(&self) -> String {
        match self.rating.average {
            Some(average) => average.to_string(),
            None => "N/A".to_string(),
        }
    }

    pub fn runtime_text(&self) -> String {
        match self.runtime {
            Some(minutes) => format!("{} minutes", minutes),
            None => "N/A".to_string(),
        }
    }

    pub fn genres_text(&self) -> String {
        self.genres.join(", ")
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.medium.as_deref())
    }
}

impl std::fmt::Display for Show {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Episode {
    /// Season/number key, zero-padded to two digits: `S01E02`. Used both
    /// as the display prefix and as the exact match key for selecting a
    /// single episode.
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.number)
    }

    /// Row label: `S01E02 - Pilot`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code(), self.name)
    }

    /// Case-insensitive filter predicate over name and raw summary.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .summary
                .as_ref()
                .map(|s| s.to_lowercase().contains(needle))
                .unwrap_or(false)
    }

    /// Display summary: paragraph tags stripped, `No summary.` when absent.
    pub fn summary_text(&self) -> String {
        self.summary
            .as_deref()
            .map(strip_paragraph_tags)
            .unwrap_or_else(|| "No summary.".to_string())
    }

    pub fn runtime_text(&self) -> String {
        match self.runtime {
            Some(minutes) => format!("{} minutes", minutes),
            None => "N/A".to_string(),
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.medium.as_deref())
    }
}

impl std::fmt::Display for Episode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Looks up an episode by its exact season/number key (`S01E02`).
pub fn find_episode<'a>(episodes: &'a [Episode], code: &str) -> Option<&'a Episode> {
    episodes.iter().find(|ep| ep.code() == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(season: u32, number: u32, name: &str) -> Episode {
        Episode {
            name: name.to_string(),
            season,
            number,
            runtime: Some(60),
            summary: None,
            image: None,
            url: String::new(),
        }
    }

    fn show(name: &str) -> Show {
        Show {
            id: 1,
            name: name.to_string(),
            genres: Vec::new(),
            status: "Running".to_string(),
            rating: Rating::default(),
            runtime: None,
            summary: None,
            image: None,
        }
    }

    #[test]
    fn episode_code_zero_pads_to_two_digits() {
        assert_eq!(episode(1, 2, "Pilot").code(), "S01E02");
        assert_eq!(episode(12, 3, "Late").code(), "S12E03");
    }

    #[test]
    fn episode_label_combines_code_and_name() {
        assert_eq!(episode(1, 2, "Pilot").label(), "S01E02 - Pilot");
    }

    #[test]
    fn find_episode_requires_exact_code() {
        let episodes = vec![episode(1, 2, "Pilot"), episode(12, 3, "Late")];

        assert_eq!(find_episode(&episodes, "S01E02").map(|e| e.name.as_str()), Some("Pilot"));
        assert_eq!(find_episode(&episodes, "S12E03").map(|e| e.name.as_str()), Some("Late"));
        assert!(find_episode(&episodes, "S1E2").is_none());
        assert!(find_episode(&episodes, "s01e02").is_none());
    }

    #[test]
    fn summaries_are_stripped_of_paragraph_tags() {
        let mut s = show("Dome");
        s.summary = Some("<p>Under the <b>dome</b>.</p>".to_string());
        assert_eq!(s.summary_text(), "Under the <b>dome</b>.");

        let mut ep = episode(1, 1, "Pilot");
        ep.summary = Some("<p>First one.</p>".to_string());
        assert_eq!(ep.summary_text(), "First one.");
    }

    #[test]
    fn missing_summary_falls_back_per_entity() {
        assert_eq!(show("Dome").summary_text(), "");
        assert_eq!(episode(1, 1, "Pilot").summary_text(), "No summary.");
    }

    #[test]
    fn rating_text_prefers_number_over_fallback() {
        let mut s = show("Dome");
        assert_eq!(s.rating_text(), "N/A");

        s.rating.average = Some(8.1);
        assert_eq!(s.rating_text(), "8.1");

        s.rating.average = Some(0.0);
        assert_eq!(s.rating_text(), "0");
    }

    #[test]
    fn runtime_text_formats_minutes() {
        let mut ep = episode(1, 1, "Pilot");
        assert_eq!(ep.runtime_text(), "60 minutes");

        ep.runtime = None;
        assert_eq!(ep.runtime_text(), "N/A");
    }

    #[test]
    fn show_matches_name_genres_and_summary() {
        let mut s = show("Under the Dome");
        s.genres = vec!["Drama".to_string(), "Science-Fiction".to_string()];
        s.summary = Some("<p>A small town is sealed off.</p>".to_string());

        assert!(s.matches("dome"));
        assert!(s.matches("science-fiction"));
        assert!(s.matches("sealed off"));
        assert!(!s.matches("zombie"));
    }

    #[test]
    fn show_without_summary_still_matches_other_fields() {
        let s = show("Alpha House");
        assert!(s.matches("alpha"));
        assert!(!s.matches("senate"));
    }

    #[test]
    fn episode_matches_name_and_summary() {
        let mut ep = episode(1, 1, "Fire");
        ep.summary = Some("<p>The town burns.</p>".to_string());

        assert!(ep.matches("fire"));
        assert!(ep.matches("burns"));
        assert!(!ep.matches("water"));
    }
}
