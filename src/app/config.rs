//! Config directory resolution and loading of the on-disk settings.

use std::path::{Path, PathBuf};

use tracing::info;

use super::keymap::Keymap;
use super::theme::Theme;
use crate::error::{IoContext, SetupError};

pub const APP_DIR: &str = "rbac-dashboard";
pub const THEME_FILE: &str = "theme.conf";
pub const KEYBINDS_FILE: &str = "keybinds.conf";

/// Settings read from the config directory.
#[derive(Clone, Debug)]
pub struct Settings {
    pub theme: Theme,
    pub keymap: Keymap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::mocha(),
            keymap: Keymap::default(),
        }
    }
}

/// Directory used when none is given: `$XDG_CONFIG_HOME/rbac-dashboard`,
/// then `$HOME/.config/rbac-dashboard`, then the working directory.
pub fn default_config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config").join(APP_DIR);
    }
    PathBuf::from(".")
}

/// Pick the config directory and make sure it exists.
pub fn resolve_config_dir(explicit: Option<&Path>) -> Result<PathBuf, SetupError> {
    let dir = explicit.map(Path::to_path_buf).unwrap_or_else(default_config_dir);
    if dir.exists() && !dir.is_dir() {
        return Err(SetupError::NotADirectory(dir));
    }
    std::fs::create_dir_all(&dir).at_path("create config dir", &dir)?;
    Ok(dir)
}

/// Read (or initialise) `theme.conf` and `keybinds.conf` under `dir`.
pub fn load_settings(dir: &Path) -> Settings {
    let theme = Theme::load_or_init(&dir.join(THEME_FILE));
    let keymap = Keymap::load_or_init(&dir.join(KEYBINDS_FILE));
    info!(dir = %dir.display(), "settings loaded");
    Settings { theme, keymap }
}
