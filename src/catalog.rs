// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use std::collections::HashMap;
use std::future::Future;

use crate::api::NetworkError;
use crate::models::{Episode, Show};

/// In-memory session caches for the two endpoints. The show catalog is
/// populated once and the episode map lazily per show; neither is ever
/// invalidated or evicted while the process runs.
#[derive(Debug, Default)]
pub struct Catalog {
    shows: Vec<Show>,
    episodes: HashMap<u64, Vec<Episode>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_shows(&self) -> bool {
        !self.shows.is_empty()
    }

    /// The cached catalog, verbatim in API order.
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Cache probe without fetching.
    pub fn episodes(&self, show_id: u64) -> Option<&[Episode]> {
        self.episodes.get(&show_id).map(|eps| eps.as_slice())
    }

    /// Returns the cached catalog if non-empty; otherwise runs `fetch`,
    /// stores the result verbatim, and returns it. A failed fetch leaves
    /// the cache empty so a later call fetches again.
    pub async fn shows_or_fetch<F, Fut>(&mut self, fetch: F) -> Result<&[Show], NetworkError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Show>, NetworkError>>,
    {
        if self.shows.is_empty() {
            self.shows = fetch().await?;
        }

        Ok(&self.shows)
    }

    /// Returns the cached episode sequence for `show_id` if present;
    /// otherwise runs `fetch` and stores the result under that id. At
    /// most one entry per show id ever exists.
    pub async fn episodes_or_fetch<F, Fut>(
        &mut self,
        show_id: u64,
        fetch: F,
    ) -> Result<&[Episode], NetworkError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Episode>, NetworkError>>,
    {
        if self.episodes.contains_key(&show_id) {
            return Ok(self.episodes[&show_id].as_slice());
        }

        let episodes = fetch().await?;
        Ok(self.episodes.entry(show_id).or_insert(episodes).as_slice())
    }

    /// A sorted copy for rendering: ascending by name, case-insensitive,
    /// stable. Recomputed per call; the cache order is never changed.
    pub fn sorted_shows(&self) -> Vec<Show> {
        let mut shows = self.shows.clone();
        shows.sort_by_cached_key(|s| s.name.to_lowercase());
        shows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use std::cell::Cell;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            genres: Vec::new(),
            status: String::new(),
            rating: Rating::default(),
            runtime: None,
            summary: None,
            image: None,
        }
    }

    fn episode(season: u32, number: u32, name: &str) -> Episode {
        Episode {
            name: name.to_string(),
            season,
            number,
            runtime: None,
            summary: None,
            image: None,
            url: String::new(),
        }
    }

    #[tokio::test]
    async fn catalog_is_fetched_once() {
        let mut catalog = Catalog::new();
        let calls = Cell::new(0);

        for _ in 0..2 {
            let shows = catalog
                .shows_or_fetch(|| {
                    calls.set(calls.get() + 1);
                    async { Ok(vec![show(1, "Zeta"), show(2, "Alpha")]) }
                })
                .await
                .unwrap();
            assert_eq!(shows.len(), 2);
        }

        assert_eq!(calls.get(), 1);
        assert!(catalog.has_shows());
    }

    #[tokio::test]
    async fn selecting_the_same_show_twice_fetches_once() {
        let mut catalog = Catalog::new();
        let calls = Cell::new(0);

        for _ in 0..2 {
            let episodes = catalog
                .episodes_or_fetch(7, || {
                    calls.set(calls.get() + 1);
                    async { Ok(vec![episode(1, 1, "Pilot")]) }
                })
                .await
                .unwrap();
            assert_eq!(episodes.len(), 1);
        }

        assert_eq!(calls.get(), 1);
        assert!(catalog.episodes(7).is_some());
    }

    #[tokio::test]
    async fn each_show_id_gets_its_own_entry() {
        let mut catalog = Catalog::new();

        catalog
            .episodes_or_fetch(1, || async { Ok(vec![episode(1, 1, "A")]) })
            .await
            .unwrap();
        catalog
            .episodes_or_fetch(2, || async { Ok(vec![episode(1, 1, "B"), episode(1, 2, "C")]) })
            .await
            .unwrap();

        assert_eq!(catalog.episodes(1).map(|eps| eps.len()), Some(1));
        assert_eq!(catalog.episodes(2).map(|eps| eps.len()), Some(2));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_the_cache_empty() {
        let mut catalog = Catalog::new();

        let result = catalog
            .episodes_or_fetch(7, || async { Err(NetworkError::Parse("bad".to_string())) })
            .await;
        assert!(result.is_err());
        assert!(catalog.episodes(7).is_none());

        // The next attempt fetches again instead of serving a poisoned entry.
        let calls = Cell::new(0);
        catalog
            .episodes_or_fetch(7, || {
                calls.set(calls.get() + 1);
                async { Ok(vec![episode(1, 1, "Pilot")]) }
            })
            .await
            .unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn sorted_shows_orders_by_name_without_touching_cache_order() {
        let mut catalog = Catalog::new();
        catalog
            .shows_or_fetch(|| async {
                Ok(vec![show(1, "Zeta"), show(2, "Alpha"), show(3, "beta")])
            })
            .await
            .unwrap();

        let sorted: Vec<String> = catalog
            .sorted_shows()
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(sorted, ["Alpha", "beta", "Zeta"]);

        let cached: Vec<String> = catalog.shows().iter().map(|s| s.name.clone()).collect();
        assert_eq!(cached, ["Zeta", "Alpha", "beta"]);
    }
}
