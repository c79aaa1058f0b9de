use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::app::AppState;

/// Roles table: name and permission badges. Read-only.
pub fn render_roles_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let roles = app.filtered_roles();
    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(roles.len());
    let slice = &roles[start.min(end)..end];

    let badge = Style::default().fg(app.theme.badge_fg).bg(app.theme.badge_bg);
    let rows = slice.iter().enumerate().map(|(i, r)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let mut perms: Vec<Span> = Vec::with_capacity(r.permissions.len() * 2);
        for p in &r.permissions {
            perms.push(Span::styled(format!(" {p} "), badge));
            perms.push(Span::raw(" "));
        }
        Row::new(vec![
            Cell::from(r.name.clone()),
            Cell::from(Line::from(perms)),
            Cell::from(Span::styled("read-only", Style::default().fg(app.theme.muted))),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(16),
        Constraint::Percentage(100),
        Constraint::Length(10),
    ];
    let header = Row::new(vec!["ROLE", "PERMISSIONS", "ACTIONS"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Roles")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}
