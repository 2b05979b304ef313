use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{bar_value, format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.rows.is_empty() {
        render_empty(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45), // Budget table
            Constraint::Min(8),         // Budgeted vs actual chart
        ])
        .split(area);

    render_table(f, chunks[0], app);
    render_chart(f, chunks[1], app);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budget categories yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Press b to set a budget or a to add a transaction",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Budget ", theme::title_style())),
    );
    f.render_widget(msg, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Category", "Budgeted", "Actual", "Remaining"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .enumerate()
        .skip(app.row_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, row)| {
            let style = if i == app.row_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let spend_style = Style::default().fg(theme::spend_color(row.over));

            Row::new(vec![
                Cell::from(truncate(&row.name, 24)),
                Cell::from(format_amount(row.budgeted)),
                Cell::from(Span::styled(format_amount(row.spent), spend_style)),
                Cell::from(Span::styled(format_amount(row.remaining()), spend_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let totals = &app.totals;
    let over_note = if totals.over_count > 0 {
        format!(" | {} over", totals.over_count)
    } else {
        String::new()
    };
    let title = format!(
        " Budget: {} of {} spent{over_note} ",
        format_amount(totals.spent),
        format_amount(totals.budgeted),
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(title, theme::title_style())),
    );
    f.render_widget(table, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let legend = Line::from(vec![
        Span::styled(" Budgeted vs. Actual ", theme::title_style()),
        Span::styled("■ budgeted ", Style::default().fg(theme::BUDGETED)),
        Span::styled("■ within ", Style::default().fg(theme::GREEN)),
        Span::styled("■ over ", Style::default().fg(theme::RED)),
    ]);

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(legend),
        )
        .bar_width(5)
        .bar_gap(0)
        .group_gap(2)
        .value_style(
            Style::default()
                .fg(theme::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        );

    for row in &app.rows {
        let bars = [
            Bar::default()
                .value(bar_value(row.budgeted))
                .style(Style::default().fg(theme::BUDGETED)),
            Bar::default()
                .value(bar_value(row.spent))
                .style(Style::default().fg(theme::spend_color(row.over))),
        ];
        let group = BarGroup::default()
            .label(Line::from(truncate(&row.name, 10)))
            .bars(&bars);
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}
