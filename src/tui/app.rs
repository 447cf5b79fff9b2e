// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::TvMazeClient;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::{self, Episode, Show};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogDisplayMode {
    Side,
    None,
    Full,
}

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
}

/// Cursor position for a list screen. Saved when leaving the show list
/// and restored on the way back; filters always start cleared.
#[derive(Debug, Clone)]
struct NavigationState {
    selected_index: usize,
    scroll_offset: usize,
}

impl NavigationState {
    fn new() -> Self {
        Self {
            selected_index: 0,
            scroll_offset: 0,
        }
    }
}

/// Everything needed to render a single episode full-screen and to put
/// the episode list back exactly as it was left.
#[derive(Debug, Clone)]
pub struct EpisodeDetailState {
    pub show: Show,
    pub episode: Episode,
    pub content_scroll: usize,
    saved_query: String,
    saved_selected: usize,
    saved_filtered_indices: Vec<usize>,
    saved_scroll: usize,
}

#[derive(Debug, Clone)]
pub enum AppState {
    ShowList,
    EpisodeList(Show),
    EpisodeDetail(EpisodeDetailState),
    Loading(String),
    Error(String),
}

pub struct App {
    pub state: AppState,
    pub config: Config,
    pub client: TvMazeClient,
    pub catalog: Catalog,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub items: Vec<String>,
    pub status_message: Option<String>,
    pub logs: Vec<(DateTime<Local>, String)>,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub log_display_mode: LogDisplayMode,
    pub log_selected_index: usize,
    pub log_scroll_offset: usize,
    pub visible_height: usize,
    pub search_query: String,
    pub search_active: bool,
    pub filtered_indices: Vec<usize>,
    shows: Vec<Show>,
    episodes: Vec<Episode>,
    show_list_state: NavigationState,
}

impl App {
    pub fn new(config: Config, client: TvMazeClient) -> Self {
        let log_display_mode = if config.ui.show_logs {
            LogDisplayMode::Side
        } else {
            LogDisplayMode::None
        };

        Self {
            state: AppState::Loading("Loading shows...".to_string()),
            config,
            client,
            catalog: Catalog::new(),
            selected_index: 0,
            scroll_offset: 0,
            items: Vec::new(),
            status_message: None,
            logs: Vec::new(),
            show_help: false,
            help_scroll_offset: 0,
            log_display_mode,
            log_selected_index: 0,
            log_scroll_offset: 0,
            visible_height: 20, // Will be updated on first render
            search_query: String::new(),
            search_active: false,
            filtered_indices: Vec::new(),
            shows: Vec::new(),
            episodes: Vec::new(),
            show_list_state: NavigationState::new(),
        }
    }

    pub fn update_visible_height(&mut self, height: usize) {
        self.visible_height = height.max(1);
    }

    pub fn tick(&mut self) {
        // Time-based UI updates would go here; network work lives in
        // async_tick so the render loop stays synchronous.
    }

    /// Runs deferred async work. Returns true when the screen changed
    /// and a redraw is needed.
    pub async fn async_tick(&mut self) -> bool {
        // Load the catalog once the first frame is up, so the loading
        // screen is visible while the request runs.
        if matches!(self.state, AppState::Loading(_)) && !self.catalog.has_shows() {
            self.load_catalog().await;
            return true;
        }

        false
    }

    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        // Toggle log panel with Ctrl+.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('.') {
            self.log_display_mode = match self.log_display_mode {
                LogDisplayMode::Side => LogDisplayMode::None,
                LogDisplayMode::None => LogDisplayMode::Full,
                LogDisplayMode::Full => LogDisplayMode::Side,
            };
            self.add_log(match self.log_display_mode {
                LogDisplayMode::Side => "Log panel: side view".to_string(),
                LogDisplayMode::None => "Log panel: hidden".to_string(),
                LogDisplayMode::Full => "Log panel: full window".to_string(),
            });
            return None;
        }

        // Handle log scrolling when in full window mode
        if matches!(self.log_display_mode, LogDisplayMode::Full) {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    if self.log_selected_index > 0 {
                        self.log_selected_index -= 1;
                        if self.log_selected_index < self.log_scroll_offset {
                            self.log_scroll_offset = self.log_selected_index;
                        }
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.log_selected_index < self.logs.len().saturating_sub(1) {
                        self.log_selected_index += 1;
                    }
                }
                KeyCode::PageUp => {
                    let page_size = self.visible_height.saturating_sub(2).max(1);
                    self.log_selected_index = self.log_selected_index.saturating_sub(page_size);
                    if self.log_selected_index < self.log_scroll_offset {
                        self.log_scroll_offset = self.log_selected_index;
                    }
                }
                KeyCode::PageDown => {
                    let page_size = self.visible_height.saturating_sub(2).max(1);
                    let max_index = self.logs.len().saturating_sub(1);
                    self.log_selected_index = (self.log_selected_index + page_size).min(max_index);
                }
                KeyCode::Home | KeyCode::Char('H') => {
                    self.log_selected_index = 0;
                    self.log_scroll_offset = 0;
                }
                KeyCode::End | KeyCode::Char('G') => {
                    self.log_selected_index = self.logs.len().saturating_sub(1);
                }
                KeyCode::Esc => {
                    self.log_display_mode = LogDisplayMode::Side;
                    self.add_log("Log panel: side view".to_string());
                }
                _ => {
                    // Consume all other keys in full log mode so they do
                    // not reach the underlying screens
                }
            }
            return None;
        }

        // Handle search mode input
        if self.search_active {
            match key.code {
                KeyCode::Esc => self.cancel_search(),
                KeyCode::Enter => self.confirm_search(),
                KeyCode::Backspace => self.delete_search_char(),
                KeyCode::Char(c) => self.update_search(c),
                _ => {}
            }
            return None;
        }

        // Start search on '/' key; the detail screen and the loading and
        // error screens have no list to filter
        if key.code == KeyCode::Char('/')
            && matches!(self.state, AppState::ShowList | AppState::EpisodeList(_))
        {
            self.start_search();
            return None;
        }

        // If help is shown, handle help-specific navigation
        if self.show_help {
            match key.code {
                KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Esc => {
                    self.show_help = false;
                    self.help_scroll_offset = 0;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if self.help_scroll_offset > 0 {
                        self.help_scroll_offset -= 1;
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.help_scroll_offset += 1;
                }
                KeyCode::PageUp => {
                    self.help_scroll_offset = self.help_scroll_offset.saturating_sub(10);
                }
                KeyCode::PageDown => {
                    self.help_scroll_offset += 10;
                }
                KeyCode::Home => {
                    self.help_scroll_offset = 0;
                }
                KeyCode::End => {
                    // Clamped against the line count in rendering
                    self.help_scroll_offset = usize::MAX / 2;
                }
                _ => {}
            }
            return None;
        }

        if key.code == KeyCode::Char('q') {
            return Some(Action::Quit);
        }

        if key.code == KeyCode::Char('?') || key.code == KeyCode::F(1) {
            self.show_help = true;
            self.help_scroll_offset = 0;
            return None;
        }

        match self.state.clone() {
            AppState::Error(_) => {
                // Terminal screen: nothing to recover, only quitting above
            }
            AppState::Loading(_) => {}
            AppState::ShowList => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
                KeyCode::PageUp => self.move_selection_page_up(),
                KeyCode::PageDown => self.move_selection_page_down(),
                KeyCode::Home | KeyCode::Char('H') => self.move_selection_home(),
                KeyCode::End | KeyCode::Char('G') => self.move_selection_end(),
                KeyCode::Enter => {
                    if let Some(show) = self.selected_show().cloned() {
                        self.save_current_navigation_state();
                        self.open_show(show).await;
                    }
                }
                KeyCode::Esc => return Some(Action::Quit),
                _ => {}
            },
            AppState::EpisodeList(show) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
                KeyCode::PageUp => self.move_selection_page_up(),
                KeyCode::PageDown => self.move_selection_page_down(),
                KeyCode::Home | KeyCode::Char('H') => self.move_selection_home(),
                KeyCode::End | KeyCode::Char('G') => self.move_selection_end(),
                KeyCode::Enter => self.open_episode_detail(show),
                KeyCode::Esc | KeyCode::Char('b') => self.back_to_shows(),
                _ => {}
            },
            AppState::EpisodeDetail(detail) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.scroll_detail_by(-1),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_detail_by(1),
                KeyCode::PageUp => {
                    self.scroll_detail_by(-(self.visible_height.max(1) as isize))
                }
                KeyCode::PageDown => self.scroll_detail_by(self.visible_height.max(1) as isize),
                KeyCode::Esc | KeyCode::Char('b') => self.close_episode_detail(detail),
                _ => {}
            },
        }

        None
    }

    /// One-time catalog load. A failure here is terminal: the error
    /// screen stays up until the user quits.
    pub async fn load_catalog(&mut self) {
        self.state = AppState::Loading("Loading shows...".to_string());
        self.add_log("Loading show catalog".to_string());

        let client = &self.client;
        match self.catalog.shows_or_fetch(|| client.fetch_shows()).await {
            Ok(shows) => {
                let count = shows.len();
                self.enter_show_list();
                self.add_log(format!("Loaded {} shows", count));
            }
            Err(e) => {
                self.state = AppState::Error(format!("Error loading shows: {}", e));
                self.add_log(format!("Failed to load show catalog: {}", e));
            }
        }
    }

    /// Rebuilds the show list screen from the catalog. The visible rows
    /// are re-sorted by name every time this runs.
    fn enter_show_list(&mut self) {
        self.shows = self.catalog.sorted_shows();
        self.items = self.shows.iter().map(|s| s.name.clone()).collect();
        self.episodes.clear();
        self.reset_filter();
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.state = AppState::ShowList;
    }

    /// Opens a show's episode list, fetching episodes on first visit and
    /// reusing the catalog copy afterwards. On a failed fetch the show
    /// list is left exactly as it was.
    pub async fn open_show(&mut self, show: Show) {
        if self.catalog.episodes(show.id).is_some() {
            self.add_log(format!("Using cached episodes for {}", show.name));
        } else {
            self.state = AppState::Loading(format!("Loading episodes for {}...", show.name));
            self.add_log(format!("Loading episodes for {}", show.name));
        }

        let client = &self.client;
        let show_id = show.id;
        match self
            .catalog
            .episodes_or_fetch(show_id, || client.fetch_episodes(show_id))
            .await
        {
            Ok(episodes) => {
                let episodes = episodes.to_vec();
                let count = episodes.len();
                self.episodes = episodes;
                self.items = self.episodes.iter().map(|ep| ep.label()).collect();
                self.reset_filter();
                self.selected_index = 0;
                self.scroll_offset = 0;
                self.state = AppState::EpisodeList(show);
                self.add_log(format!("Loaded {} episodes", count));
            }
            Err(e) => {
                self.state = AppState::ShowList;
                self.status_message =
                    Some(format!("Failed to load episodes for {}: {}", show.name, e));
                self.add_log(format!("Failed to load episodes for {}: {}", show.name, e));
            }
        }
    }

    fn back_to_shows(&mut self) {
        self.enter_show_list();
        self.restore_navigation_state();
        self.add_log("Returned to show list".to_string());
    }

    /// Switches to the single-episode screen for the selected row. The
    /// episode is resolved from the active list by its season/number
    /// code rather than by row position.
    fn open_episode_detail(&mut self, show: Show) {
        let Some(selected) = self.selected_episode() else {
            return;
        };
        let code = selected.code();
        let Some(episode) = models::find_episode(&self.episodes, &code) else {
            return;
        };

        let detail = EpisodeDetailState {
            show,
            episode: episode.clone(),
            content_scroll: 0,
            saved_query: self.search_query.clone(),
            saved_selected: self.selected_index,
            saved_filtered_indices: self.filtered_indices.clone(),
            saved_scroll: self.scroll_offset,
        };
        self.status_message = None;
        self.state = AppState::EpisodeDetail(detail);
    }

    /// Back from the detail screen: the full episode list returns with
    /// its previous filter and cursor.
    fn close_episode_detail(&mut self, detail: EpisodeDetailState) {
        self.search_query = detail.saved_query;
        self.filtered_indices = detail.saved_filtered_indices;
        self.selected_index = detail.saved_selected;
        self.scroll_offset = detail.saved_scroll;
        self.search_active = false;
        self.status_message = if self.search_query.is_empty() {
            None
        } else {
            Some(format!(
                "Filtered: \"{}\" (Press '/' to search again)",
                self.search_query
            ))
        };
        self.state = AppState::EpisodeList(detail.show);
    }

    fn scroll_detail_by(&mut self, delta: isize) {
        if let AppState::EpisodeDetail(detail) = &mut self.state {
            detail.content_scroll = detail.content_scroll.saturating_add_signed(delta);
        }
    }

    pub fn selected_show(&self) -> Option<&Show> {
        if matches!(self.state, AppState::ShowList) {
            self.shows.get(self.selected_index)
        } else {
            None
        }
    }

    pub fn selected_episode(&self) -> Option<&Episode> {
        if matches!(self.state, AppState::EpisodeList(_)) {
            self.episodes.get(self.selected_index)
        } else {
            None
        }
    }

    pub fn episode_total(&self) -> usize {
        self.episodes.len()
    }

    /// Position of the selected row within the filtered view, for the
    /// "Item x of y" footer.
    pub fn selected_position(&self) -> usize {
        self.filtered_indices
            .iter()
            .position(|&idx| idx == self.selected_index)
            .unwrap_or(0)
    }

    fn move_selection_up(&mut self) {
        let indices = self.filtered_indices.clone();

        if indices.is_empty() {
            return;
        }

        if let Some(current_pos) = indices.iter().position(|&idx| idx == self.selected_index) {
            if current_pos > 0 {
                self.selected_index = indices[current_pos - 1];
            } else {
                // Wrap to bottom
                self.selected_index = indices[indices.len() - 1];
            }
            self.ensure_selected_visible();
        }
    }

    fn move_selection_down(&mut self) {
        let indices = self.filtered_indices.clone();

        if indices.is_empty() {
            return;
        }

        if let Some(current_pos) = indices.iter().position(|&idx| idx == self.selected_index) {
            if current_pos < indices.len() - 1 {
                self.selected_index = indices[current_pos + 1];
            } else {
                // Wrap to top
                self.selected_index = indices[0];
            }
            self.ensure_selected_visible();
        }
    }

    fn move_selection_page_up(&mut self) {
        let indices = self.filtered_indices.clone();

        if let Some(current_pos) = indices.iter().position(|&idx| idx == self.selected_index) {
            let page_size = self.visible_height.saturating_sub(2).max(1);
            let new_pos = current_pos.saturating_sub(page_size);
            self.selected_index = indices[new_pos];
            self.ensure_selected_visible();
        }
    }

    fn move_selection_page_down(&mut self) {
        let indices = self.filtered_indices.clone();

        if let Some(current_pos) = indices.iter().position(|&idx| idx == self.selected_index) {
            let page_size = self.visible_height.saturating_sub(2).max(1);
            let new_pos = (current_pos + page_size).min(indices.len() - 1);
            self.selected_index = indices[new_pos];
            self.ensure_selected_visible();
        }
    }

    fn move_selection_home(&mut self) {
        let indices = self.filtered_indices.clone();

        if !indices.is_empty() {
            self.selected_index = indices[0];
            self.scroll_offset = 0;
        }
    }

    fn move_selection_end(&mut self) {
        let indices = self.filtered_indices.clone();

        if !indices.is_empty() {
            self.selected_index = indices[indices.len() - 1];
            self.ensure_selected_visible();
        }
    }

    fn save_current_navigation_state(&mut self) {
        if matches!(self.state, AppState::ShowList) {
            self.show_list_state = NavigationState {
                selected_index: self.selected_index,
                scroll_offset: self.scroll_offset,
            };
        }
    }

    fn restore_navigation_state(&mut self) {
        // Cursor only; the filter has already been reset for the new
        // screen. Clamp in case the list shrank.
        self.selected_index = self
            .show_list_state
            .selected_index
            .min(self.items.len().saturating_sub(1));
        self.scroll_offset = self.show_list_state.scroll_offset;
        self.ensure_selected_visible();
    }

    fn start_search(&mut self) {
        self.search_active = true;
        self.search_query.clear();
        self.apply_filter();
        self.status_message =
            Some("Search: Type to filter, Enter to confirm, Esc to cancel".to_string());
    }

    fn update_search(&mut self, c: char) {
        if self.search_active {
            self.search_query.push(c);
            self.apply_filter();
            self.status_message = Some(format!("Search: {}", self.search_query));
        }
    }

    fn delete_search_char(&mut self) {
        if self.search_active && !self.search_query.is_empty() {
            self.search_query.pop();
            self.apply_filter();
            self.status_message = Some(if self.search_query.is_empty() {
                "Search: Type to filter, Enter to confirm, Esc to cancel".to_string()
            } else {
                format!("Search: {}", self.search_query)
            });
        }
    }

    /// Case-insensitive substring filter. Shows match on name, genres
    /// and summary; episodes on name and summary. Row text alone is not
    /// enough, so this goes through the underlying records.
    fn apply_filter(&mut self) {
        if self.search_query.is_empty() {
            self.filtered_indices = (0..self.items.len()).collect();
        } else {
            let query_lower = self.search_query.to_lowercase();
            self.filtered_indices = match &self.state {
                AppState::EpisodeList(_) => self
                    .episodes
                    .iter()
                    .enumerate()
                    .filter(|(_, episode)| episode.matches(&query_lower))
                    .map(|(idx, _)| idx)
                    .collect(),
                _ => self
                    .shows
                    .iter()
                    .enumerate()
                    .filter(|(_, show)| show.matches(&query_lower))
                    .map(|(idx, _)| idx)
                    .collect(),
            };
        }

        // Reset selection to first filtered item
        if !self.filtered_indices.is_empty() {
            self.selected_index = self.filtered_indices[0];
            self.scroll_offset = 0;
        }
    }

    fn cancel_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.filtered_indices = (0..self.items.len()).collect();
        self.status_message = None;
    }

    fn confirm_search(&mut self) {
        self.search_active = false;
        // Keep the filter applied
        self.status_message = if !self.search_query.is_empty() {
            Some(format!(
                "Filtered: \"{}\" (Press '/' to search again)",
                self.search_query
            ))
        } else {
            None
        };
    }

    fn add_log(&mut self, message: String) {
        self.logs.push((Local::now(), message));
        // Keep only last 100 logs
        if self.logs.len() > 100 {
            self.logs.remove(0);
        }
    }

    fn ensure_selected_visible(&mut self) {
        let visible_height = self.visible_height.max(1);

        if self.filtered_indices.is_empty() {
            return;
        }

        let position = self
            .filtered_indices
            .iter()
            .position(|&i| i == self.selected_index)
            .unwrap_or(0);

        // Keep 1 line of context when scrolling (if possible)
        let context_lines = 1;

        if position < self.scroll_offset + context_lines {
            self.scroll_offset = position.saturating_sub(context_lines);
        } else if position >= self.scroll_offset + visible_height - context_lines {
            let max_scroll = self.filtered_indices.len().saturating_sub(visible_height);
            self.scroll_offset = (position + context_lines + 1)
                .saturating_sub(visible_height)
                .min(max_scroll);
        }
    }

    fn reset_filter(&mut self) {
        self.search_query.clear();
        self.search_active = false;
        self.filtered_indices = (0..self.items.len()).collect();
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            genres: vec!["Drama".to_string()],
            status: "Running".to_string(),
            rating: Rating::default(),
            runtime: Some(60),
            summary: None,
            image: None,
        }
    }

    fn show_with_summary(id: u64, name: &str, summary: &str) -> Show {
        Show {
            summary: Some(summary.to_string()),
            ..show(id, name)
        }
    }

    fn episode(season: u32, number: u32, name: &str) -> Episode {
        Episode {
            name: name.to_string(),
            season,
            number,
            runtime: Some(42),
            summary: Some(format!("<p>About {}.</p>", name)),
            image: None,
            url: String::new(),
        }
    }

    fn offline_client() -> TvMazeClient {
        // Nothing listens on this port; fetches fail fast.
        TvMazeClient::new("http://127.0.0.1:9").unwrap()
    }

    async fn app_with_catalog(shows: Vec<Show>) -> App {
        let mut app = App::new(Config::default(), offline_client());
        app.catalog
            .shows_or_fetch(move || async move { Ok(shows) })
            .await
            .unwrap();
        app.enter_show_list();
        app
    }

    async fn seed_episodes(app: &mut App, show_id: u64, episodes: Vec<Episode>) {
        app.catalog
            .episodes_or_fetch(show_id, move || async move { Ok(episodes) })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn show_list_renders_sorted_by_name() {
        let app = app_with_catalog(vec![
            show(1, "Zeta"),
            show(2, "alpha"),
            show(3, "Beta"),
        ])
        .await;

        assert!(matches!(app.state, AppState::ShowList));
        assert_eq!(app.items, ["alpha", "Beta", "Zeta"]);
        assert_eq!(app.filtered_indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn opening_a_show_enters_episode_browsing_with_a_clean_filter() {
        let mut app = app_with_catalog(vec![show(1, "Alpha")]).await;
        seed_episodes(
            &mut app,
            1,
            vec![episode(1, 1, "Pilot"), episode(1, 2, "Second")],
        )
        .await;

        app.start_search();
        app.update_search('a');

        let selected = app.selected_show().cloned().unwrap();
        app.save_current_navigation_state();
        app.open_show(selected).await;

        assert!(matches!(app.state, AppState::EpisodeList(_)));
        assert_eq!(app.items, ["S01E01 - Pilot", "S01E02 - Second"]);
        assert!(app.search_query.is_empty());
        assert_eq!(app.filtered_indices, vec![0, 1]);
    }

    #[tokio::test]
    async fn filtering_shows_keeps_only_matching_rows() {
        let mut app = app_with_catalog(vec![
            show_with_summary(1, "Under the Dome", "<p>A sealed-off town.</p>"),
            show_with_summary(2, "Alpha House", "<p>Senators share a rental.</p>"),
            show_with_summary(3, "Dome Again", "<p>More domes.</p>"),
        ])
        .await;

        app.start_search();
        for c in "dome".chars() {
            app.update_search(c);
        }

        assert!(!app.filtered_indices.is_empty());
        assert!(app.filtered_indices.len() < app.items.len());
        for &idx in &app.filtered_indices {
            assert!(app.shows[idx].matches("dome"));
        }

        app.cancel_search();
        assert_eq!(app.filtered_indices, vec![0, 1, 2]);
        assert!(app.search_query.is_empty());
    }

    #[tokio::test]
    async fn show_search_matches_summary_text_not_just_names() {
        let mut app = app_with_catalog(vec![
            show_with_summary(1, "Alpha House", "<p>Senators share a rental.</p>"),
            show_with_summary(2, "Beta", "<p>Nothing relevant.</p>"),
        ])
        .await;

        app.start_search();
        for c in "senators".chars() {
            app.update_search(c);
        }

        assert_eq!(app.filtered_indices.len(), 1);
        assert_eq!(app.shows[app.filtered_indices[0]].name, "Alpha House");
    }

    #[tokio::test]
    async fn back_returns_to_a_sorted_show_list_with_controls_reset() {
        let mut app = app_with_catalog(vec![show(1, "Zeta"), show(2, "Alpha")]).await;
        // Sorted list is [Alpha, Zeta]; the first row is show id 2.
        seed_episodes(&mut app, 2, vec![episode(1, 1, "Pilot")]).await;

        let selected = app.selected_show().cloned().unwrap();
        app.save_current_navigation_state();
        app.open_show(selected).await;
        assert!(matches!(app.state, AppState::EpisodeList(_)));

        app.start_search();
        app.update_search('p');
        app.confirm_search();

        app.back_to_shows();

        assert!(matches!(app.state, AppState::ShowList));
        assert_eq!(app.items, ["Alpha", "Zeta"]);
        assert!(app.search_query.is_empty());
        assert_eq!(app.filtered_indices, vec![0, 1]);
        assert_eq!(app.episode_total(), 0);
    }

    #[tokio::test]
    async fn reopening_a_show_does_not_refetch_episodes() {
        let mut app = app_with_catalog(vec![show(1, "Alpha")]).await;
        seed_episodes(&mut app, 1, vec![episode(1, 1, "Pilot")]).await;

        let selected = app.selected_show().cloned().unwrap();
        app.open_show(selected).await;
        app.back_to_shows();

        // The client would fail if this hit the network again.
        let selected = app.selected_show().cloned().unwrap();
        app.open_show(selected).await;

        assert!(matches!(app.state, AppState::EpisodeList(_)));
        assert_eq!(app.items, ["S01E01 - Pilot"]);
    }

    #[tokio::test]
    async fn selecting_one_episode_keeps_the_rest_of_the_list_restorable() {
        let mut app = app_with_catalog(vec![show(1, "Alpha")]).await;
        seed_episodes(
            &mut app,
            1,
            vec![
                episode(1, 1, "Pilot"),
                episode(1, 2, "Second"),
                episode(2, 1, "Premiere"),
            ],
        )
        .await;

        let selected = app.selected_show().cloned().unwrap();
        app.open_show(selected).await;
        app.move_selection_down();

        let AppState::EpisodeList(current_show) = app.state.clone() else {
            panic!("expected episode list");
        };
        app.open_episode_detail(current_show);

        let AppState::EpisodeDetail(detail) = app.state.clone() else {
            panic!("expected episode detail");
        };
        assert_eq!(detail.episode.code(), "S01E02");
        assert_eq!(app.episode_total(), 3);

        app.close_episode_detail(detail);
        assert!(matches!(app.state, AppState::EpisodeList(_)));
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.filtered_indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn failed_episode_fetch_leaves_the_show_list_untouched() {
        let mut app = app_with_catalog(vec![show(1, "Alpha"), show(2, "Beta")]).await;
        app.move_selection_down();
        let before_selected = app.selected_index;

        let selected = app.selected_show().cloned().unwrap();
        app.save_current_navigation_state();
        app.open_show(selected).await;

        assert!(matches!(app.state, AppState::ShowList));
        assert_eq!(app.selected_index, before_selected);
        assert_eq!(app.episode_total(), 0);
        assert!(app.catalog.episodes(2).is_none());
        assert!(
            app.status_message
                .as_deref()
                .unwrap_or_default()
                .contains("Failed to load episodes")
        );
    }

    #[tokio::test]
    async fn failed_catalog_load_is_terminal() {
        let mut app = App::new(Config::default(), offline_client());
        app.load_catalog().await;

        assert!(matches!(app.state, AppState::Error(_)));
        assert!(!app.catalog.has_shows());
    }

    #[tokio::test]
    async fn back_restores_the_saved_show_cursor() {
        let mut app = app_with_catalog(vec![
            show(1, "Alpha"),
            show(2, "Beta"),
            show(3, "Gamma"),
        ])
        .await;
        seed_episodes(&mut app, 3, vec![episode(1, 1, "Pilot")]).await;

        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_index, 2);

        let selected = app.selected_show().cloned().unwrap();
        app.save_current_navigation_state();
        app.open_show(selected).await;
        app.back_to_shows();

        assert_eq!(app.selected_index, 2);
    }
}
