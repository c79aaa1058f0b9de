pub mod components;
pub mod roles;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{ActiveTab, AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    render_header(f, root[0], app);
    render_search(f, root[1], app);

    match app.active_tab {
        ActiveTab::Users => users::render_users_table(f, root[2], app),
        ActiveTab::Roles => roles::render_roles_table(f, root[2], app),
    }

    components::render_status_bar(f, root[3], app);

    if app.modal.is_some() {
        let area = f.area();
        render_modal(f, area, app);
    }
}

/// Title plus the two tab controls; the active one is filled.
fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let tab = |label: &str, active: bool| {
        let style = if active {
            Style::default()
                .fg(app.theme.tab_active_fg)
                .bg(app.theme.tab_active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.muted)
        };
        Span::styled(format!(" {label} "), style)
    };
    let line = Line::from(vec![
        tab("Users", app.active_tab == ActiveTab::Users),
        Span::raw("  "),
        tab("Roles", app.active_tab == ActiveTab::Roles),
        Span::styled(
            format!("   users:{}  roles:{}", app.users().len(), app.roles.len()),
            Style::default().fg(app.theme.muted),
        ),
    ]);
    let p = Paragraph::new(line)
        .block(
            Block::default()
                .title("RBAC Dashboard")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

/// Search box on the left, the add control on the right.
fn render_search(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(18)].as_ref())
        .split(area);

    let editing = app.input_mode == InputMode::Search;
    let body = if app.search_query.is_empty() && !editing {
        Span::styled("Search... (/)", Style::default().fg(app.theme.muted))
    } else {
        let cursor = if editing { "_" } else { "" };
        Span::styled(format!("{}{}", app.search_query, cursor), Style::default().fg(app.theme.text))
    };
    let border = if editing { app.theme.highlight_fg } else { app.theme.border };
    let search = Paragraph::new(Line::from(body)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(search, cols[0]);

    // opens the user form from either tab
    let mut add_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    if app.active_tab == ActiveTab::Roles {
        add_block = add_block.title(Span::styled("roles read-only", Style::default().fg(app.theme.muted)));
    }
    let add = Paragraph::new("+ Add User (n)")
        .style(Style::default().fg(app.theme.tab_active_fg).bg(app.theme.tab_active_bg))
        .block(add_block);
    f.render_widget(add, cols[1]);
}

fn render_modal(f: &mut Frame, area: Rect, app: &mut AppState) {
    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::UserForm { .. } => users::render_user_form(f, area, app, &state),
            ModalState::DeleteConfirm { .. } => users::render_delete_confirm(f, area, app, &state),
            ModalState::Info { .. } => components::render_info_modal(f, area, app, &state),
            ModalState::Help { scroll } => components::render_help_modal(f, area, app, scroll),
        }
    }
}
