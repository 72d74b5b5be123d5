use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::complete::coords;
use crate::tui::app::{App, Mode};
use crate::util::unicode::TAB_WIDTH;

use super::centered;

/// Rows a single-line input may grow to before it scrolls
const MAX_INPUT_ROWS: usize = 3;

/// Draw the open editor as a bordered popup over `area` and place the
/// terminal cursor in it. Records the popup's text area and wrap width for
/// mouse mapping and dropdown placement.
pub fn render_editor_popup(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = popup_title(app);
    let soft_wrap = app.notebook.config.ui.soft_wrap;
    let theme = app.theme.clone();
    let Some(editor) = app.editor.as_mut() else {
        app.editor_area = None;
        return;
    };

    let multiline = editor.buffer.is_multiline();
    let popup = if multiline {
        centered(area, area.width.saturating_sub(8), area.height.saturating_sub(2))
    } else {
        let width = area.width.saturating_sub(4).min(64);
        // wrap against the inner width to size the popup
        let inner_w = width.saturating_sub(2) as usize;
        let rows = coords::soft_wrap(editor.buffer.content(), inner_w)
            .split('\n')
            .count()
            .clamp(1, MAX_INPUT_ROWS);
        let mut rect = centered(area, width, rows as u16 + 2);
        rect.y = area.y + 1u16.min(area.height.saturating_sub(rect.height));
        rect
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border).bg(theme.background))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.highlight)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    editor.wrap_width = if multiline && !soft_wrap {
        0
    } else {
        inner.width as usize
    };
    let height = inner.height as usize;
    editor.scroll_to_cursor(height);

    let wrapped = coords::soft_wrap(editor.buffer.content(), editor.wrap_width);
    let tab = " ".repeat(TAB_WIDTH);
    let lines: Vec<Line> = wrapped
        .split('\n')
        .skip(editor.scroll)
        .take(height)
        .map(|row| {
            Line::from(Span::styled(
                row.replace('\t', &tab),
                Style::default().fg(theme.text_bright).bg(theme.background),
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.background)),
        inner,
    );

    let (col, row) = editor.buffer.cursor_screen(editor.wrap_width);
    if row >= editor.scroll && (col as u16) < inner.width {
        let y = inner.y + (row - editor.scroll) as u16;
        if y < inner.y + inner.height {
            frame.set_cursor_position((inner.x + col as u16, y));
        }
    }
    app.editor_area = Some(inner);
}

fn popup_title(app: &App) -> String {
    let target = app
        .target_id
        .as_deref()
        .and_then(|id| app.snapshot.note(id));
    match (app.mode, target) {
        (Mode::Search, _) => " Search ".to_string(),
        (Mode::NewNote, _) => " New note title ".to_string(),
        (Mode::EditNote, Some(note)) => format!(" {} ", note.title),
        (Mode::PickParent, Some(note)) => match note.parent.as_deref() {
            Some(parent) => format!(
                " Parent of {} (now {}) ",
                note.title,
                app.snapshot.path_label(parent)
            ),
            None => format!(" Parent of {} ", note.title),
        },
        _ => String::new(),
    }
}
