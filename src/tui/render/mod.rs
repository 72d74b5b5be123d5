pub mod autocomplete;
pub mod editor_popup;
pub mod notes_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use crate::util::unicode;

use super::app::{App, Mode};

/// Main render function, dispatching to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    // header | notes list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    notes_view::render_notes_view(frame, app, chunks[1]);

    if app.mode == Mode::Navigate {
        app.editor_area = None;
    } else {
        editor_popup::render_editor_popup(frame, app, chunks[1]);
        autocomplete::render_autocomplete(frame, app);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![
        Span::styled(
            format!(" {}", app.notebook.name()),
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} of {} notes", app.visible.len(), app.snapshot.notes.len()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];
    if !app.query.is_empty() {
        spans.push(Span::styled(
            format!("  /{}", app.query.text),
            Style::default().fg(app.theme.cyan).bg(bg),
        ));
    }
    let width = area.width as usize;
    let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let date = app.today.format("%a %Y-%m-%d ").to_string();
    if used + date.len() < width {
        spans.push(Span::styled(
            " ".repeat(width - used - date.len()),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(date, Style::default().fg(app.theme.dim).bg(bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Push spans for text with regex match highlighting. Without a regex or a
/// match this is a single span in `base_style`.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(text[last_end..m.start()].to_string(), base_style));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub(super) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
