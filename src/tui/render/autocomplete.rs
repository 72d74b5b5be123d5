use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::complete::coords;
use crate::tui::app::App;
use crate::util::unicode;

/// Maximum number of visible entries in the dropdown
const MAX_VISIBLE: usize = 8;
const MAX_DETAIL: usize = 24;

/// Render the completion dropdown of the open editor, anchored under the
/// trigger (above it when there is no room below).
pub fn render_autocomplete(frame: &mut Frame, app: &App) {
    let (Some(editor), Some(text_area)) = (app.editor.as_ref(), app.editor_area) else {
        return;
    };
    let state = &editor.completion;
    if !state.active || state.items.is_empty() {
        return;
    }

    let term = frame.area();
    let (col, row) = coords::offset_to_screen(
        editor.buffer.content(),
        editor.wrap_width,
        state.trigger_start,
    );
    let Some(visible_row) = row.checked_sub(editor.scroll) else {
        return;
    };
    let anchor_x = text_area.x.saturating_add(col as u16);
    let anchor_y = text_area.y.saturating_add(visible_row as u16);

    let count = state.items.len().min(MAX_VISIBLE);
    let label_w = state
        .items
        .iter()
        .map(|i| unicode::display_width(&i.label))
        .max()
        .unwrap_or(0);
    let detail_w = state
        .items
        .iter()
        .map(|i| unicode::display_width(first_line(&i.detail)).min(MAX_DETAIL))
        .max()
        .unwrap_or(0);
    let inner_w = 3 + label_w + if detail_w > 0 { 2 + detail_w } else { 0 } + 1;
    let popup_w = (inner_w as u16 + 2).min(term.width).max(12);
    let popup_h = count as u16 + 2;

    let y = if anchor_y + 1 + popup_h <= term.height {
        anchor_y + 1
    } else {
        anchor_y.saturating_sub(popup_h)
    };
    let x = anchor_x.min(term.width.saturating_sub(popup_w));
    let popup_area = Rect::new(x, y, popup_w, popup_h.min(term.height));

    // scroll window around the selection
    let scroll_start = (state.selected + 1).saturating_sub(MAX_VISIBLE);
    let theme = &app.theme;
    let row_w = popup_w.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (i, item) in state.items.iter().enumerate().skip(scroll_start).take(MAX_VISIBLE) {
        let is_selected = i == state.selected;
        let style = if is_selected {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).bg(theme.background)
        };
        let detail_style = style.fg(theme.dim).remove_modifier(Modifier::BOLD);

        let prefix = if is_selected { " \u{25B8} " } else { "   " };
        let marker = if item.drillable { "\u{203A}" } else { " " };
        let detail = unicode::truncate_to_width(first_line(&item.detail), MAX_DETAIL);
        let used = 3 + unicode::display_width(&item.label) + 1;
        let gap = row_w.saturating_sub(used + unicode::display_width(&detail));

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(item.label.clone(), style),
            Span::styled(" ".repeat(gap), style),
            Span::styled(detail, detail_style),
            Span::styled(marker, detail_style),
        ]));
    }

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .style(Style::default().bg(theme.background));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, popup_area);
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
