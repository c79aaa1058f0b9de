use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;
use tracing::info;

use crate::app::form::{self, FormField};
use crate::app::keymap::KeyAction;
use crate::app::{ActiveTab, AppState, InputMode, ModalState};
use crate::ui;

/// Draw, wait for a key, apply it; until the user quits.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    info!("dashboard started");
    while !app.should_quit {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
    }
    info!(users = app.directory.len(), "dashboard closed");
    Ok(())
}

/// Apply one key press to the dashboard.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // text entry never takes Ctrl chords; only a bound Quit gets through
    if app.input_mode != InputMode::Normal
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(_))
    {
        if app.keymap.resolve(&key) == Some(KeyAction::Quit) {
            app.should_quit = true;
        }
        return;
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key.code),
        InputMode::Modal => handle_modal_key(app, key.code),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) {
    let Some(action) = app.keymap.resolve(&key) else {
        return;
    };
    let page = app.rows_per_page.max(1) as isize;
    match action {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::SwitchTab => {
            let next = app.active_tab.other();
            app.switch_tab(next);
        }
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::ClearSearch => app.set_search(""),
        KeyAction::AddUser => app.open_add_modal(),
        KeyAction::EditSelection => match app.active_tab {
            ActiveTab::Users => {
                if let Some(id) = app.selected_user().map(|u| u.id) {
                    app.open_edit_modal(id);
                }
            }
            ActiveTab::Roles => app.notify_roles_read_only(),
        },
        KeyAction::DeleteSelection => match app.active_tab {
            ActiveTab::Users => {
                if let Some(id) = app.selected_user().map(|u| u.id) {
                    app.request_delete(id);
                }
            }
            ActiveTab::Roles => app.notify_roles_read_only(),
        },
        KeyAction::ToggleStatus => {
            if let Some(id) = app.selected_user().map(|u| u.id) {
                app.toggle_status(id);
            }
        }
        KeyAction::MoveUp => app.move_selection(-1),
        KeyAction::MoveDown => app.move_selection(1),
        KeyAction::PageUp => app.move_selection(-page),
        KeyAction::PageDown => app.move_selection(page),
        KeyAction::OpenHelp => app.open_help(),
        KeyAction::Ignore => {}
    }
}

/// The search prompt filters live; Enter keeps the text, Esc drops it.
fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_search("");
        }
        KeyCode::Backspace => {
            let mut q = app.search_query.clone();
            q.pop();
            app.set_search(q);
        }
        KeyCode::Char(c) => {
            let q = format!("{}{}", app.search_query, c);
            app.set_search(q);
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::UserForm { .. }) => handle_form_key(app, code),
        Some(ModalState::DeleteConfirm { selected, .. }) => match code {
            KeyCode::Esc | KeyCode::Char('n') => {
                app.resolve_delete(false);
            }
            KeyCode::Char('y') => {
                app.resolve_delete(true);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                *selected = if *selected == 0 { 1 } else { 0 };
            }
            KeyCode::Enter => {
                let confirmed = *selected == 0;
                app.resolve_delete(confirmed);
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                close_overlay(app)
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        Some(ModalState::Info { .. }) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                close_overlay(app);
            }
        }
        None => app.input_mode = InputMode::Normal,
    }
}

fn handle_form_key(app: &mut AppState, code: KeyCode) {
    let focus = match &app.modal {
        Some(ModalState::UserForm { focus, .. }) => *focus,
        _ => return,
    };
    let mut next_focus = focus;
    match code {
        KeyCode::Esc => {
            app.close_modal();
            return;
        }
        KeyCode::Tab | KeyCode::Down => next_focus = focus.next(),
        KeyCode::BackTab | KeyCode::Up => next_focus = focus.prev(),
        KeyCode::Enter => {
            if focus == FormField::Cancel {
                app.close_modal();
            } else {
                // a refused submit leaves the reason on the form
                let _ = app.submit_form();
            }
            return;
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if focus.is_select() => {
            let forward = code != KeyCode::Left;
            match focus {
                FormField::Role => form::cycle_role(&mut app.draft, &app.roles, forward),
                _ => form::cycle_status(&mut app.draft),
            }
        }
        KeyCode::Backspace if focus.is_text() => {
            text_field(app, focus).pop();
        }
        KeyCode::Char(c) if focus.is_text() => text_field(app, focus).push(c),
        _ => {}
    }
    if let Some(ModalState::UserForm { focus, error }) = &mut app.modal {
        *focus = next_focus;
        *error = None;
    }
}

fn text_field(app: &mut AppState, focus: FormField) -> &mut String {
    match focus {
        FormField::Email => &mut app.draft.email,
        _ => &mut app.draft.name,
    }
}

/// Close an info or help overlay without touching the form draft.
fn close_overlay(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}
