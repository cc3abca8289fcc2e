// List rendering for projects and activity.
// Provides styled list views with loading, error, and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::activity::ActivityItem;
use crate::github::Project;
use crate::state::{LoadingState, Section};

const YEAR: i64 = 31_536_000;
const MONTH: i64 = 2_592_000;
const WEEK: i64 = 604_800;
const DAY: i64 = 86_400;
const HOUR: i64 = 3_600;
const MINUTE: i64 = 60;
const SECOND: i64 = 1;

const UNITS: [(i64, &str); 7] = [
    (YEAR, "year"),
    (MONTH, "month"),
    (WEEK, "week"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
    (SECOND, "second"),
];

/// Format a timestamp relative to `now` (e.g., "3 days ago").
pub fn format_relative_time_at(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(*dt).num_seconds();

    for (unit, name) in UNITS {
        let count = seconds / unit;
        if count >= 1 {
            let plural = if count == 1 { "" } else { "s" };
            return format!("{} {}{} ago", count, name, plural);
        }
    }

    "just now".to_string()
}

/// Format a timestamp as relative time from the current clock.
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    format_relative_time_at(dt, Utc::now())
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(text, area);
}

/// Render an error message with the retry hint.
pub fn render_error(frame: &mut Frame, area: Rect, block: Block, error: &str) {
    let text = Paragraph::new(vec![
        Line::styled(format!("❌ {}", error), Style::default().fg(Color::Red)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

fn highlighted(list: List) -> List {
    list.highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ")
}

fn project_item(project: &Project) -> ListItem<'_> {
    let mut header = vec![
        Span::styled(&project.name, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("  ★ {}", project.stars),
            Style::default().fg(Color::Yellow),
        ),
    ];
    if let Some(language) = &project.language {
        header.push(Span::styled(
            format!("  {}", language),
            Style::default().fg(Color::Magenta),
        ));
    }
    header.push(Span::styled(
        format!("  {}", format_relative_time(&project.updated_at)),
        Style::default().fg(Color::DarkGray),
    ));

    let mut lines = vec![Line::from(header)];
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(Span::raw(format!("  {}", description))));
    }
    if !project.topics.is_empty() {
        lines.push(Line::styled(
            format!("  #{}", project.topics.join(" #")),
            Style::default().fg(Color::Blue),
        ));
    }

    ListItem::new(lines)
}

/// Render the projects list.
pub fn render_projects_list(frame: &mut Frame, section: &mut Section<Project>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Projects ");

    if section.is_empty_state() {
        render_empty(frame, area, block, "No public projects yet");
        return;
    }

    match &section.data {
        LoadingState::Idle => render_empty(frame, area, block, "Press r to load"),
        LoadingState::Loading => render_loading(frame, area, block, "Loading projects"),
        LoadingState::Error(e) => render_error(frame, area, block, e),
        LoadingState::Loaded(projects) => {
            let items: Vec<ListItem> = projects.iter().map(project_item).collect();
            let list = highlighted(List::new(items).block(block));
            frame.render_stateful_widget(list, area, &mut section.list_state);
        }
    }
}

/// Render the recent activity list.
pub fn render_activity_list(frame: &mut Frame, section: &mut Section<ActivityItem>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Activity ");

    if section.is_empty_state() {
        render_empty(frame, area, block, "No recent activity");
        return;
    }

    match &section.data {
        LoadingState::Idle => render_empty(frame, area, block, "Press r to load"),
        LoadingState::Loading => render_loading(frame, area, block, "Loading activity"),
        LoadingState::Error(e) => render_error(frame, area, block, e),
        LoadingState::Loaded(items) => {
            let rows: Vec<ListItem> = items
                .iter()
                .map(|item| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:>16}  ", format_relative_time(&item.created_at)),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw(item.text.as_str()),
                    ]))
                })
                .collect();
            let list = highlighted(List::new(rows).block(block));
            frame.render_stateful_widget(list, area, &mut section.list_state);
        }
    }
}
