// UI module for rendering the viewer.
// Contains the tab bar, project and activity lists, and the status bar.

mod list;
mod tabs;

pub use list::{format_relative_time, format_relative_time_at};

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Selected link
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Projects => list::render_projects_list(frame, &mut app.portfolio.projects, chunks[1]),
        Tab::Activity => list::render_activity_list(frame, &mut app.portfolio.activity, chunks[1]),
    }

    draw_link_bar(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);
}

/// Show the link of the selected item.
fn draw_link_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.selected_link() {
        Some(link) => Line::from(vec![
            Span::styled(" ↗ ", Style::default().fg(Color::DarkGray)),
            Span::styled(link, Style::default().fg(Color::Blue)),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the status bar with keybinding hints and rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
        Span::raw("  Tab "),
        Span::styled("Switch", Style::default().fg(Color::DarkGray)),
        Span::raw("  r "),
        Span::styled("Retry", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    if let Some(rate) = &app.rate_limit {
        if rate.limit > 0 {
            let rate_color = if rate.remaining < 10 {
                Color::Red
            } else if rate.remaining < 30 {
                Color::Yellow
            } else {
                Color::DarkGray
            };
            hints.push(Span::styled(
                format!("  API: {}/{}", rate.remaining, rate.limit),
                Style::default().fg(rate_color),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
