use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::form::Form;
use crate::ui::theme;

const LABEL_WIDTH: usize = 10;

/// Centered popup with one line per field and the cursor on the focused one.
pub(crate) fn render(f: &mut Frame, area: Rect, form: &Form) {
    let mut lines = vec![Line::from("")];
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focused;
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<LABEL_WIDTH$}", field.label), label_style),
            Span::styled(field.value.as_str(), theme::normal_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Tab next field | Enter save | Esc cancel",
        theme::dim_style(),
    )));

    let popup_height = (lines.len() as u16 + 2).min(area.height);
    let popup_width = 56.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                format!(" {} ", form.kind),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);

    if let Some(field) = form.fields.get(form.focused) {
        let value_width = u16::try_from(field.value.chars().count()).unwrap_or(u16::MAX);
        if let Some(pos) = cursor_position(popup_area, form.focused, value_width) {
            f.set_cursor_position(pos);
        }
    }
}

/// Cursor cell for the focused field, or `None` when it falls outside the
/// popup (tiny terminals clip the popup before the fields fit).
fn cursor_position(popup: Rect, focused: usize, value_width: u16) -> Option<(u16, u16)> {
    // border + blank line, then one row per field
    let row = u16::try_from(focused).ok()?.saturating_add(2);
    // border + leading space + label column
    let col = (LABEL_WIDTH as u16).saturating_add(2).saturating_add(value_width);

    let y = popup.y.saturating_add(row);
    let x = popup.x.saturating_add(col);
    let bottom = popup.y.saturating_add(popup.height);
    let right = popup.x.saturating_add(popup.width);
    (y < bottom && x < right).then_some((x, y))
}
