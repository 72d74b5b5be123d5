use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen): a pending message on the left
/// when there is one, key hints for the current mode on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(message) = app.status_message.as_deref() {
        let fg = if app.status_is_error {
            app.theme.red
        } else {
            app.theme.text
        };
        spans.push(Span::styled(format!(" {}", message), Style::default().fg(fg).bg(bg)));
    }

    let hint = hint_for(app);
    let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let hint_width = unicode::display_width(&hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn hint_for(app: &App) -> String {
    let dropdown = app
        .editor
        .as_ref()
        .is_some_and(|e| e.completion.active && !e.completion.items.is_empty());
    let base = match app.mode {
        Mode::Navigate => "/ search  e edit  n new  p parent  q quit",
        Mode::EditNote => "Ctrl+S save  Esc cancel",
        Mode::Search | Mode::PickParent | Mode::NewNote => "Enter apply  Esc cancel",
    };
    if dropdown && app.mode != Mode::Navigate {
        format!("Tab accept  {} ", base)
    } else {
        format!("{} ", base)
    }
}
