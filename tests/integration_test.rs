// Integration tests for rbac-dashboard

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use rbac_dashboard::app::update::handle_key;
use rbac_dashboard::app::{ActiveTab, AppState, InputMode, ModalState};
use rbac_dashboard::store::UserStatus;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}

fn temp_path(tag: &str) -> std::path::PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    std::env::temp_dir().join(format!("rbac_dash_{}_{}_{}", tag, std::process::id(), nonce))
}

/// Render once and flatten the buffer into lines of text.
fn render_to_string(app: &mut AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal
        .draw(|f| rbac_dashboard::ui::render(f, app))
        .expect("draw");
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// 1) Add a user entirely through key presses
#[test]
fn add_user_via_keys() {
    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Char('n')));
    assert_eq!(app.input_mode, InputMode::Modal);

    type_text(&mut app, "Alice");
    handle_key(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "a@x.com");
    handle_key(&mut app, key(KeyCode::Tab));
    // role: manager -> admin
    handle_key(&mut app, key(KeyCode::Right));
    handle_key(&mut app, key(KeyCode::Tab));
    // status: active -> inactive
    handle_key(&mut app, key(KeyCode::Char(' ')));
    handle_key(&mut app, key(KeyCode::Enter));

    assert!(app.modal.is_none());
    let u = app.users().last().unwrap();
    assert_eq!((u.id, u.name.as_str(), u.email.as_str(), u.role.as_str()), (3, "Alice", "a@x.com", "admin"));
    assert_eq!(u.status, UserStatus::Inactive);
}

// 2) Empty submit keeps the form open with a message
#[test]
fn empty_submit_is_refused() {
    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Char('n')));
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.users().len(), 2);
    assert!(matches!(app.modal, Some(ModalState::UserForm { error: Some(_), .. })));

    // typing clears the message
    type_text(&mut app, "B");
    assert!(matches!(app.modal, Some(ModalState::UserForm { error: None, .. })));

    handle_key(&mut app, key(KeyCode::Esc));
    assert!(app.modal.is_none());
    assert!(app.draft.name.is_empty());
}

// 3) Cancel button closes without changes
#[test]
fn cancel_button_closes_form() {
    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Char('n')));
    type_text(&mut app, "Temp");
    // Cancel sits two steps back from Name
    for _ in 0..2 {
        handle_key(&mut app, key(KeyCode::BackTab));
    }
    handle_key(&mut app, key(KeyCode::Enter));
    assert!(app.modal.is_none());
    assert_eq!(app.users().len(), 2);
}

// 4) Edit the selected row through keys
#[test]
fn edit_selected_user_via_keys() {
    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Char('j')));
    handle_key(&mut app, key(KeyCode::Char('e')));
    assert_eq!(app.editing_user, Some(2));
    for _ in 0.."Jane Smith".len() {
        handle_key(&mut app, key(KeyCode::Backspace));
    }
    type_text(&mut app, "Janet");
    handle_key(&mut app, key(KeyCode::Enter));

    let u = app.directory.get(2).unwrap();
    assert_eq!(u.name, "Janet");
    assert_eq!(u.email, "jane@example.com");
    assert_eq!(app.users().len(), 2);
}

// 5) Delete prompt defaults to No; y confirms
#[test]
fn delete_prompt_flow() {
    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Char('d')));
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.users().len(), 2, "default answer is No");

    handle_key(&mut app, key(KeyCode::Delete));
    handle_key(&mut app, key(KeyCode::Left));
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.users().len(), 1);
    assert_eq!(app.users()[0].id, 2);

    handle_key(&mut app, key(KeyCode::Char('d')));
    handle_key(&mut app, key(KeyCode::Char('y')));
    assert!(app.users().is_empty());
}

// 6) Search prompt filters live, Esc clears
#[test]
fn search_prompt_filters_live() {
    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Char('/')));
    assert_eq!(app.input_mode, InputMode::Search);
    type_text(&mut app, "JOHN");
    assert_eq!(app.visible_len(), 1);
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.search_query, "JOHN");

    // toggle applies to the filtered row
    handle_key(&mut app, key(KeyCode::Char('s')));
    assert_eq!(app.directory.get(1).unwrap().status, UserStatus::Inactive);

    handle_key(&mut app, key(KeyCode::Char('/')));
    handle_key(&mut app, key(KeyCode::Esc));
    assert!(app.search_query.is_empty());
    assert_eq!(app.visible_len(), 2);
}

// 7) Roles tab: edit/delete only inform
#[test]
fn roles_tab_actions_are_inert() {
    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.active_tab, ActiveTab::Roles);
    let roles = app.roles.clone();
    handle_key(&mut app, key(KeyCode::Char('d')));
    assert!(matches!(app.modal, Some(ModalState::Info { .. })));
    handle_key(&mut app, key(KeyCode::Enter));
    assert!(app.modal.is_none());
    handle_key(&mut app, key(KeyCode::Char('s')));
    assert_eq!(app.roles, roles);
    assert!(app.users().iter().all(|u| u.status == UserStatus::Active));

    // add still opens the user form
    handle_key(&mut app, key(KeyCode::Char('n')));
    assert!(matches!(app.modal, Some(ModalState::UserForm { .. })));
}

// 8) Quit and help
#[test]
fn quit_and_help_keys() {
    let mut app = AppState::default();
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT));
    assert!(matches!(app.modal, Some(ModalState::Help { .. })));
    handle_key(&mut app, key(KeyCode::Char('q')));
    assert!(app.modal.is_none());
    assert!(!app.should_quit);
    handle_key(&mut app, key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

// 8b) Ctrl chords are not typed into text fields; Ctrl+C still quits
#[test]
fn ctrl_keys_in_text_entry() {
    let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Char('/')));
    type_text(&mut app, "jo");
    handle_key(&mut app, ctrl('u'));
    assert_eq!(app.search_query, "jo");
    assert!(!app.should_quit);
    handle_key(&mut app, ctrl('c'));
    assert!(app.should_quit);
    assert_eq!(app.search_query, "jo");

    let mut app = AppState::default();
    handle_key(&mut app, key(KeyCode::Char('n')));
    type_text(&mut app, "Al");
    handle_key(&mut app, ctrl('w'));
    assert_eq!(app.draft.name, "Al");
    handle_key(&mut app, ctrl('c'));
    assert!(app.should_quit);
    assert_eq!(app.draft.name, "Al");
}

// 9) Rendering shows the tables and modals
#[test]
fn render_users_roles_and_form() {
    let mut app = AppState::default();
    let screen = render_to_string(&mut app, 110, 24);
    assert!(screen.contains("RBAC Dashboard"));
    assert!(screen.contains("John Doe"));
    assert!(screen.contains("jane@example.com"));
    assert!(screen.contains("active"));
    assert!(!screen.contains("roles read-only"));

    app.switch_tab(ActiveTab::Roles);
    let screen = render_to_string(&mut app, 110, 24);
    assert!(screen.contains("users_delete"));
    assert!(!screen.contains("John Doe"));
    // the add control still adds users and says roles are fixed
    assert!(screen.contains("+ Add User (n)"));
    assert!(screen.contains("roles read-only"));

    app.open_add_modal();
    let screen = render_to_string(&mut app, 110, 24);
    assert!(screen.contains("Add New User"));

    app.close_modal();
    app.switch_tab(ActiveTab::Users);
    app.open_edit_modal(1);
    let screen = render_to_string(&mut app, 110, 24);
    assert!(screen.contains("Edit User"));
    assert!(screen.contains("Update"));
}

// 10) Closed modal draws nothing
#[test]
fn closed_modal_renders_nothing() {
    use rbac_dashboard::app::theme::Theme;
    use rbac_dashboard::ui::components::Modal;
    use ratatui::widgets::Paragraph;

    let theme = Theme::mocha();
    let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
    let mut drawn = None;
    terminal
        .draw(|f| {
            let area = f.area();
            drawn = Modal::new("Hidden", 20, 5, &theme).render(f, area, false, Paragraph::new("secret"));
        })
        .unwrap();
    assert!(drawn.is_none());
    let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
    assert!(!text.contains("secret"));
}

// 11) Theme and keymap files are created and read back
#[test]
fn settings_files_roundtrip() {
    use rbac_dashboard::app::config::{KEYBINDS_FILE, THEME_FILE, load_settings, resolve_config_dir};
    use rbac_dashboard::app::keymap::{KeyAction, Keymap};
    use rbac_dashboard::app::theme::Theme;

    let dir = temp_path("cfg");
    let dir = resolve_config_dir(Some(dir.as_path())).expect("config dir");
    let first = load_settings(&dir);
    assert!(dir.join(THEME_FILE).exists());
    assert!(dir.join(KEYBINDS_FILE).exists());
    assert_eq!(first.theme, Theme::mocha());

    // the written keymap reads back with the same bindings
    let reread = Keymap::from_file(&dir.join(KEYBINDS_FILE)).expect("keybinds");
    let mut a = first.keymap.all_bindings();
    let mut b = reread.all_bindings();
    a.sort_by_key(|(k, act)| (*act, format!("{:?}", k)));
    b.sort_by_key(|(k, act)| (*act, format!("{:?}", k)));
    assert_eq!(a, b);

    std::fs::write(dir.join(KEYBINDS_FILE), "Quit = x\n").unwrap();
    let custom = load_settings(&dir);
    assert_eq!(custom.keymap.resolve(&key(KeyCode::Char('x'))), Some(KeyAction::Quit));

    let _ = std::fs::remove_dir_all(&dir);
}

// 12) A file where the config dir should be is rejected
#[test]
fn config_dir_must_be_a_directory() {
    use rbac_dashboard::app::config::resolve_config_dir;

    let path = temp_path("file");
    std::fs::write(&path, "x").unwrap();
    let err = resolve_config_dir(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("not a directory"));
    let _ = std::fs::remove_file(&path);
}
