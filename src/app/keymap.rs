//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only the table view goes through the keymap. Text entry in the search prompt
//! and inside modals reads keys directly.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

/// Dashboard actions that can be bound to keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyAction {
    Quit,
    /// Flip between the Users and Roles tabs.
    SwitchTab,
    StartSearch,
    /// Drop the current search text.
    ClearSearch,
    /// Open the empty user form.
    AddUser,
    /// Open the form for the selected user.
    EditSelection,
    /// Ask to delete the selected user.
    DeleteSelection,
    /// Flip active/inactive on the selected user.
    ToggleStatus,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    OpenHelp,
    Ignore,
}

impl KeyAction {
    pub const ALL: [KeyAction; 14] = [
        KeyAction::Quit,
        KeyAction::SwitchTab,
        KeyAction::StartSearch,
        KeyAction::ClearSearch,
        KeyAction::AddUser,
        KeyAction::EditSelection,
        KeyAction::DeleteSelection,
        KeyAction::ToggleStatus,
        KeyAction::MoveUp,
        KeyAction::MoveDown,
        KeyAction::PageUp,
        KeyAction::PageDown,
        KeyAction::OpenHelp,
        KeyAction::Ignore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KeyAction::Quit => "Quit",
            KeyAction::SwitchTab => "SwitchTab",
            KeyAction::StartSearch => "StartSearch",
            KeyAction::ClearSearch => "ClearSearch",
            KeyAction::AddUser => "AddUser",
            KeyAction::EditSelection => "EditSelection",
            KeyAction::DeleteSelection => "DeleteSelection",
            KeyAction::ToggleStatus => "ToggleStatus",
            KeyAction::MoveUp => "MoveUp",
            KeyAction::MoveDown => "MoveDown",
            KeyAction::PageUp => "PageUp",
            KeyAction::PageDown => "PageDown",
            KeyAction::OpenHelp => "OpenHelp",
            KeyAction::Ignore => "Ignore",
        }
    }

    /// Label shown in the help modal.
    pub fn label(self) -> &'static str {
        match self {
            KeyAction::Quit => "Quit",
            KeyAction::SwitchTab => "Switch tab",
            KeyAction::StartSearch => "Search",
            KeyAction::ClearSearch => "Clear search",
            KeyAction::AddUser => "Add user",
            KeyAction::EditSelection => "Edit user",
            KeyAction::DeleteSelection => "Delete user",
            KeyAction::ToggleStatus => "Toggle status",
            KeyAction::MoveUp => "Move up",
            KeyAction::MoveDown => "Move down",
            KeyAction::PageUp => "Page up",
            KeyAction::PageDown => "Page down",
            KeyAction::OpenHelp => "Help",
            KeyAction::Ignore => "Ignore",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|a| a.name() == s)
    }
}

/// Mapping from `(modifiers, code)` to [`KeyAction`].
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Tab), KeyAction::SwitchTab);
        bindings.insert((M::NONE, BackTab), KeyAction::SwitchTab);
        // some terminals report Shift+Tab as BackTab with SHIFT set
        bindings.insert((M::SHIFT, BackTab), KeyAction::SwitchTab);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Esc), KeyAction::ClearSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::AddUser);
        bindings.insert((M::NONE, Char('a')), KeyAction::AddUser);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('s')), KeyAction::ToggleStatus);
        bindings.insert((M::NONE, Char(' ')), KeyAction::ToggleStatus);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        Self { bindings }
    }

    /// Load `path`, or write the defaults there when it does not exist yet.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            warn!(path = %path.display(), error = %e, "could not write default keybinds");
        }
        km
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse `Action = KeySpec` lines on top of the defaults.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (KeyAction::parse(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => debug!(line, "ignoring keybind entry"),
            }
        }
        map
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# rbac-dashboard keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Tab, BackTab, Up, Down, PageUp, PageDown, Delete, Space, /\n");
        buf.push_str("# Actions: ");
        let names: Vec<&str> = KeyAction::ALL.iter().map(|a| a.name()).collect();
        buf.push_str(&names.join(", "));
        buf.push_str("\n\n");

        let mut entries = self.all_bindings();
        entries.sort_by_key(|(key, action)| (*action, Self::format_key(key.0, key.1)));
        for ((mods, code), action) in entries {
            let _ = writeln!(&mut buf, "{} = {}", action.name(), Self::format_key(mods, code));
        }
        std::fs::write(path, buf)
    }

    /// Look up the action for a key press.
    ///
    /// Shifted characters such as `?` arrive with SHIFT set on most terminals,
    /// so a miss on a shifted `Char` retries without the modifier.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(a) = self.bindings.get(&(key.modifiers, key.code)) {
            return Some(*a);
        }
        match key.code {
            KeyCode::Char(_) if key.modifiers == KeyModifiers::SHIFT => {
                self.bindings.get(&(KeyModifiers::NONE, key.code)).copied()
            }
            _ => None,
        }
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Human-readable spec like "Ctrl+c" or "BackTab".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(' ') => "Space".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Space" => Char(' '),
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}
