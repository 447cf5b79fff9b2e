// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::app::{App, AppState, LogDisplayMode};
use super::widgets::{centered_rect, create_scrollable_help_widget};
use crate::models::{Episode, Show};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Main layout: Header, Content, Footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, app, chunks[0]);
    draw_content(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);

    if app.show_help {
        draw_help_overlay(frame, app, size);
    }

    match &app.state {
        AppState::Loading(msg) => draw_loading_overlay(frame, size, msg),
        AppState::Error(msg) => draw_error_overlay(frame, size, msg),
        _ => {}
    }
}

/// Title line of the count readout above the episode list.
pub fn episode_count_line(displayed: usize, total: usize) -> String {
    format!("Displaying {} / {} episodes", displayed, total)
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_text = match &app.state {
        AppState::ShowList => "TV Shows".to_string(),
        AppState::EpisodeList(show) => format!("{} - Episodes", show.name),
        AppState::EpisodeDetail(detail) => {
            format!("{} - {}", detail.show.name, detail.episode.code())
        }
        _ => "TVMaze Browser".to_string(),
    };

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );

    frame.render_widget(header, area);
}

fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    if matches!(app.log_display_mode, LogDisplayMode::Full) {
        draw_full_logs(frame, app, area);
        return;
    }

    // The detail screen takes the whole content area; there is exactly
    // one episode on it.
    if matches!(app.state, AppState::EpisodeDetail(_)) {
        draw_episode_detail(frame, app, area);
        return;
    }

    match app.log_display_mode {
        LogDisplayMode::Side => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Min(50),    // Main content
                    Constraint::Length(40), // Side panel (logs/card)
                ])
                .split(area);

            draw_main_list(frame, app, chunks[0]);
            draw_side_panel(frame, app, chunks[1]);
        }
        _ => draw_main_list(frame, app, area),
    }
}

fn draw_main_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = match &app.state {
        AppState::EpisodeList(_) => format!(
            " {} ",
            episode_count_line(app.filtered_indices.len(), app.episode_total())
        ),
        _ => " Shows ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    app.update_visible_height(inner_area.height as usize);

    if app.items.is_empty() {
        let empty_msg = Paragraph::new("No items to display")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    if app.filtered_indices.is_empty() {
        let empty_msg = Paragraph::new(format!("No matches for \"{}\"", app.search_query))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    // Rows come from the filtered view, not the full list
    let visible_height = inner_area.height as usize;
    let start = app
        .scroll_offset
        .min(app.filtered_indices.len().saturating_sub(1));
    let end = (start + visible_height).min(app.filtered_indices.len());

    let items: Vec<ListItem> = app.filtered_indices[start..end]
        .iter()
        .map(|&idx| {
            let label = app.items.get(idx).cloned().unwrap_or_default();
            let content = if idx == app.selected_index {
                Line::from(vec![Span::raw(" ▶ "), Span::raw(label)]).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(vec![Span::raw("   "), Span::raw(label)])
            };
            ListItem::new(content)
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));
    frame.render_widget(list, inner_area);

    if app.filtered_indices.len() > visible_height {
        draw_scrollbar(
            frame,
            inner_area,
            start,
            app.filtered_indices.len(),
            visible_height,
        );
    }
}

fn draw_side_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),     // Logs
            Constraint::Length(14), // Card for the selected row
        ])
        .split(area);

    draw_logs_panel(frame, app, chunks[0]);
    draw_card_panel(frame, app, chunks[1]);
}

fn draw_logs_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Logs ");

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.logs.is_empty() {
        return;
    }

    // Show most recent logs that fit in the area
    let visible_count = inner_area.height as usize;
    let start = app.logs.len().saturating_sub(visible_count);

    let log_lines: Vec<Line> = app.logs[start..]
        .iter()
        .map(|(when, msg)| {
            Line::from(format!("{} {}", when.format("%H:%M:%S"), msg))
                .style(Style::default().fg(Color::Gray))
        })
        .collect();

    let logs = Paragraph::new(log_lines).wrap(Wrap { trim: true });

    frame.render_widget(logs, inner_area);
}

fn draw_full_logs(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Logs (Esc to close) ");

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    app.update_visible_height(inner_area.height as usize);

    if app.logs.is_empty() {
        return;
    }

    // Keep the selected line in view
    let visible_count = (inner_area.height as usize).max(1);
    if app.log_selected_index >= app.log_scroll_offset + visible_count {
        app.log_scroll_offset = (app.log_selected_index + 1).saturating_sub(visible_count);
    }
    let max_scroll = app.logs.len().saturating_sub(visible_count);
    app.log_scroll_offset = app.log_scroll_offset.min(max_scroll);

    let start = app.log_scroll_offset;
    let end = (start + visible_count).min(app.logs.len());

    let log_lines: Vec<Line> = app.logs[start..end]
        .iter()
        .enumerate()
        .map(|(i, (when, msg))| {
            let line = Line::from(format!("{} {}", when.format("%H:%M:%S"), msg));
            if start + i == app.log_selected_index {
                line.style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                line.style(Style::default().fg(Color::Gray))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(log_lines), inner_area);
}

/// Card text for a show, top to bottom.
pub fn show_card_lines(show: &Show) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            show.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Genres: {}", show.genres_text())),
        Line::from(format!("Status: {}", show.status)),
        Line::from(format!("Rating: {}", show.rating_text())),
        Line::from(format!("Runtime: {}", show.runtime_text())),
    ];
    if let Some(url) = show.image_url() {
        lines.push(Line::from(format!("Image: {}", url)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(show.summary_text()));
    lines
}

/// Card text for an episode, top to bottom.
pub fn episode_card_lines(episode: &Episode) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            episode.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Code: {}", episode.code())),
        Line::from(format!("Runtime: {}", episode.runtime_text())),
    ];
    if let Some(url) = episode.image_url() {
        lines.push(Line::from(format!("Image: {}", url)));
    }
    if !episode.url.is_empty() {
        lines.push(Line::from(format!("Link: {}", episode.url)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(episode.summary_text()));
    lines
}

fn draw_card_panel(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match &app.state {
        AppState::ShowList => match app.selected_show() {
            Some(show) => (" Show ", show_card_lines(show)),
            None => (" Info ", info_lines()),
        },
        AppState::EpisodeList(_) => match app.selected_episode() {
            Some(episode) => (" Episode ", episode_card_lines(episode)),
            None => (" Info ", info_lines()),
        },
        _ => (" Info ", info_lines()),
    };

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(card, area);
}

fn info_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from("Press '?' for help"),
        Line::from("Press 'q' to quit"),
    ]
}

fn draw_episode_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    let AppState::EpisodeDetail(detail) = &app.state else {
        return;
    };

    let title = format!(" {} ", episode_count_line(1, app.episode_total()));
    let lines = episode_card_lines(&detail.episode);
    let scroll = detail.content_scroll.min(u16::MAX as usize) as u16;

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title),
        )
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));

    let inner_height = area.height.saturating_sub(2) as usize;
    frame.render_widget(card, area);

    app.update_visible_height(inner_height);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer_text = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match &app.state {
            AppState::EpisodeDetail(_) => {
                " ↑↓/jk: Scroll | Esc/b: All episodes | q: Quit ".to_string()
            }
            AppState::EpisodeList(_) => format!(
                " Item {} of {} | ↑↓/jk: Navigate | /: Search | Enter: View | Esc/b: Shows | q: Quit ",
                app.selected_position() + 1,
                app.filtered_indices.len().max(1)
            ),
            _ => format!(
                " Item {} of {} | ↑↓/jk: Navigate | /: Search | Enter: Episodes | q: Quit ",
                app.selected_position() + 1,
                app.filtered_indices.len().max(1)
            ),
        }
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(footer, area);
}

fn draw_scrollbar(frame: &mut Frame, area: Rect, offset: usize, total: usize, visible: usize) {
    if total <= visible {
        return;
    }

    let scrollbar_height = area.height as usize;
    let scrollbar_pos = (offset * scrollbar_height) / total;
    let scrollbar_size = ((visible * scrollbar_height) / total).max(1);

    let mut scrollbar_chars = vec!['│'; scrollbar_height];
    for c in scrollbar_chars
        .iter_mut()
        .skip(scrollbar_pos)
        .take(scrollbar_size)
    {
        *c = '█';
    }

    let scrollbar_text: String = scrollbar_chars.into_iter().collect();
    let scrollbar = Paragraph::new(scrollbar_text).style(Style::default().fg(Color::DarkGray));

    let scrollbar_area = Rect {
        x: area.x + area.width - 1,
        y: area.y,
        width: 1,
        height: area.height,
    };

    frame.render_widget(scrollbar, scrollbar_area);
}

fn draw_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let help_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, help_area);

    let visible_height = help_area.height.saturating_sub(2) as usize;
    frame.render_widget(
        create_scrollable_help_widget(app.help_scroll_offset, visible_height.max(1)),
        help_area,
    );
}

fn draw_loading_overlay(frame: &mut Frame, area: Rect, message: &str) {
    let loading_area = centered_rect(40, 20, area);
    frame.render_widget(Clear, loading_area);

    let loading = Paragraph::new(vec![
        Line::from(""),
        Line::from("⏳ Loading...").style(Style::default().fg(Color::Yellow)),
        Line::from(""),
        Line::from(message).style(Style::default().fg(Color::Gray)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Please Wait "),
    )
    .alignment(Alignment::Center);

    frame.render_widget(loading, loading_area);
}

fn draw_error_overlay(frame: &mut Frame, area: Rect, message: &str) {
    let error_area = centered_rect(50, 30, area);
    frame.render_widget(Clear, error_area);

    let error = Paragraph::new(vec![
        Line::from(""),
        Line::from("❌ Error").style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(message).style(Style::default().fg(Color::White)),
        Line::from(""),
        Line::from("Press q to quit").style(Style::default().fg(Color::Gray)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error "),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(error, error_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;

    fn flatten(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn count_line_matches_the_readout_format() {
        assert_eq!(episode_count_line(2, 13), "Displaying 2 / 13 episodes");
        assert_eq!(episode_count_line(1, 13), "Displaying 1 / 13 episodes");
        assert_eq!(episode_count_line(0, 0), "Displaying 0 / 0 episodes");
    }

    #[test]
    fn show_card_uses_fallbacks_for_missing_fields() {
        let show = Show {
            id: 1,
            name: "Alpha".to_string(),
            genres: Vec::new(),
            status: "Ended".to_string(),
            rating: Rating::default(),
            runtime: None,
            summary: None,
            image: None,
        };

        let text = flatten(&show_card_lines(&show));
        assert_eq!(text[0], "Alpha");
        assert!(text.contains(&"Rating: N/A".to_string()));
        assert!(text.contains(&"Runtime: N/A".to_string()));
        // Missing summary renders as an empty line, not placeholder text
        assert_eq!(text.last().unwrap(), "");
    }

    #[test]
    fn episode_card_has_the_code_and_summary_fallback() {
        let episode = Episode {
            name: "Pilot".to_string(),
            season: 1,
            number: 2,
            runtime: Some(60),
            summary: None,
            image: None,
            url: "https://www.tvmaze.com/episodes/1/pilot".to_string(),
        };

        let text = flatten(&episode_card_lines(&episode));
        assert_eq!(text[0], "Pilot");
        assert!(text.contains(&"Code: S01E02".to_string()));
        assert!(text.contains(&"Runtime: 60 minutes".to_string()));
        assert_eq!(text.last().unwrap(), "No summary.");
    }
}
