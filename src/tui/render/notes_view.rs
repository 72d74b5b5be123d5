use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::push_highlighted_spans;

/// Notes list: one row per visible note with its parent path and tags.
pub fn render_notes_view(frame: &mut Frame, app: &mut App, area: Rect) {
    app.list_area = Some(area);
    let theme = &app.theme;
    if app.visible.is_empty() {
        let message = if app.query.is_empty() {
            " No notes yet. Press n to create one.".to_string()
        } else {
            format!(" No notes match /{}", app.query.text)
        };
        let empty = Paragraph::new(message).style(Style::default().fg(theme.dim).bg(theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll + height {
        app.scroll = app.cursor + 1 - height;
    }

    let theme = &app.theme;
    let search_re = app.query.highlight_re();
    let highlight = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    let width = area.width as usize;

    let mut lines = Vec::new();
    for (row, &idx) in app.visible.iter().enumerate().skip(app.scroll).take(height) {
        let note = &app.snapshot.notes[idx];
        let is_cursor = row == app.cursor;
        let bg = if is_cursor { theme.selection_bg } else { theme.background };

        let mut spans: Vec<Span> = Vec::new();
        let marker = if is_cursor { "\u{25B8} " } else { "  " };
        spans.push(Span::styled(marker, Style::default().fg(theme.highlight).bg(bg)));

        let mut title_style = Style::default().fg(theme.text_bright).bg(bg);
        if is_cursor {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        push_highlighted_spans(&mut spans, &note.title, title_style, highlight, search_re.as_ref());

        if let Some(parent) = note.parent.as_deref() {
            spans.push(Span::styled(
                format!("  {}", app.snapshot.path_label(parent)),
                Style::default().fg(theme.dim).bg(bg),
            ));
        }
        for tag in &note.tags {
            spans.push(Span::styled(
                format!("  #{}", tag),
                Style::default().fg(theme.tag_color(tag)).bg(bg),
            ));
        }

        if is_cursor {
            let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
            if used < width {
                spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
            }
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
