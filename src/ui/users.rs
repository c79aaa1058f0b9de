//! Users table and the user form / delete prompt overlays.
//!
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::form::FormField;
use crate::app::{AppState, ModalState};
use crate::store::UserStatus;
use crate::ui::components::Modal;

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 { app.rows_per_page = body_height; }

    let users = app.filtered_users();
    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(users.len());
    let slice = &users[start.min(end)..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_index {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else { Style::default().fg(app.theme.text) };
        let status_fg = match u.status {
            UserStatus::Active => app.theme.active_fg,
            UserStatus::Inactive => app.theme.inactive_fg,
        };
        Row::new(vec![
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(Span::styled(format!("[{}]", u.role), Style::default().fg(app.theme.badge_fg).bg(app.theme.badge_bg))),
            Cell::from(Span::styled(format!("● {}", u.status), Style::default().fg(status_fg))),
            Cell::from("e edit  d delete  s status"),
        ]).style(style)
    });

    let widths = [Constraint::Percentage(22), Constraint::Percentage(30), Constraint::Length(12), Constraint::Length(12), Constraint::Min(10)];
    let header = Row::new(vec!["NAME", "EMAIL", "ROLE", "STATUS", "ACTIONS"]).style(
        Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
    );

    let title = if users.is_empty() && !app.search_query.is_empty() {
        format!("Users - no match for \"{}\"", app.search_query)
    } else {
        "Users".to_string()
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)))
        .column_spacing(1);

    f.render_widget(table, area);
}

/// Add/edit form. Select fields show their value between arrows.
pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::UserForm { focus, error } = state else { return };
    let focus = *focus;
    let marker = |field: FormField| if field == focus { "▶" } else { " " };
    let field_style = |field: FormField| {
        if field == focus {
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        }
    };
    let cursor = |field: FormField| if field == focus { "_" } else { "" };

    let text_row = |field: FormField, label: &str, value: &str| {
        Line::from(vec![
            Span::raw(format!("{} {:<7} ", marker(field), label)),
            Span::styled(format!("{}{}", value, cursor(field)), field_style(field)),
        ])
    };
    let select_row = |field: FormField, label: &str, value: &str| {
        Line::from(vec![
            Span::raw(format!("{} {:<7} ", marker(field), label)),
            Span::styled(format!("◀ {} ▶", value), field_style(field)),
        ])
    };
    let button = |field: FormField, label: &str| {
        let text = if field == focus { format!("[{label}]") } else { format!(" {label} ") };
        Span::styled(text, field_style(field))
    };

    let submit_label = if app.editing_user.is_some() { "Update" } else { "Add" };
    let mut lines = vec![
        text_row(FormField::Name, "Name*", &app.draft.name),
        text_row(FormField::Email, "Email*", &app.draft.email),
        select_row(FormField::Role, "Role", &app.draft.role),
        select_row(FormField::Status, "Status", app.draft.status.as_str()),
        Line::raw(""),
        Line::from(vec![
            Span::raw("          "),
            button(FormField::Cancel, "Cancel"),
            Span::raw("  "),
            button(FormField::Submit, submit_label),
        ]),
    ];
    if let Some(err) = error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(err.clone(), Style::default().fg(app.theme.error_fg)));
    }

    let title = if app.editing_user.is_some() { "Edit User" } else { "Add New User" };
    let width = 56u16.min(area.width.saturating_sub(4)).max(40);
    Modal::new(title, width, 12, &app.theme).render(f, area, true, Paragraph::new(lines));
}

pub fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::DeleteConfirm { user_id, name, selected } = state else { return };
    let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
    let no = if *selected == 1 { "[No]" } else { " No " };
    let body = format!("Are you sure you want to delete '{name}' (id {user_id})?\n\n  {yes}    {no}");
    Modal::new("Confirm delete", 50, 7, &app.theme).render(f, area, true, Paragraph::new(body));
}
