//! Dashboard state and the operations the UI triggers on it.
//!
//! `AppState` owns every piece of state the screen shows: the user directory,
//! the static role list, the search text, the draft behind the user form and
//! which modal (if any) is open. Key handling lives in [`update`]; rendering
//! in [`crate::ui`].
//!
pub mod config;
pub mod form;
pub mod keymap;
pub mod theme;
pub mod update;

use tracing::{debug, warn};

use crate::search::filter_items;
use crate::store::{Role, User, UserDirectory, UserDraft, seed_roles};
use form::{FormError, FormField};
use keymap::Keymap;
use theme::Theme;

pub use config::Settings;

/// Top-level active tab in the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveTab {
    Users,
    Roles,
}

impl ActiveTab {
    pub fn other(self) -> Self {
        match self {
            ActiveTab::Users => ActiveTab::Roles,
            ActiveTab::Roles => ActiveTab::Users,
        }
    }
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Which overlay is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    /// Add or edit form; the target and draft live on `AppState`.
    UserForm {
        focus: FormField,
        error: Option<String>,
    },
    /// Yes/No prompt before removing a user. `selected` 0 = Yes, 1 = No.
    DeleteConfirm {
        user_id: u32,
        name: String,
        selected: usize,
    },
    Info {
        message: String,
    },
    Help {
        scroll: u16,
    },
}

pub struct AppState {
    pub active_tab: ActiveTab,
    pub directory: UserDirectory,
    pub roles: Vec<Role>,
    pub search_query: String,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    /// Id of the user the form is editing; `None` while adding.
    pub editing_user: Option<u32>,
    pub draft: UserDraft,
    /// Index into the filtered active list.
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub keymap: Keymap,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    /// Dashboard seeded with the sample users and roles.
    pub fn new(settings: Settings) -> Self {
        Self::with_data(UserDirectory::seeded(), seed_roles(), settings)
    }

    pub fn with_data(directory: UserDirectory, roles: Vec<Role>, settings: Settings) -> Self {
        Self {
            active_tab: ActiveTab::Users,
            directory,
            roles,
            search_query: String::new(),
            input_mode: InputMode::Normal,
            modal: None,
            editing_user: None,
            draft: UserDraft::default(),
            selected_index: 0,
            rows_per_page: 10,
            theme: settings.theme,
            keymap: settings.keymap,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn users(&self) -> &[User] {
        self.directory.users()
    }

    pub fn switch_tab(&mut self, tab: ActiveTab) {
        if self.active_tab != tab {
            debug!(?tab, "switch tab");
        }
        self.active_tab = tab;
        self.selected_index = 0;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
        debug!(query = %self.search_query, "search changed");
        self.clamp_selection();
    }

    pub fn filtered_users(&self) -> Vec<&User> {
        filter_items(self.directory.users(), &self.search_query)
    }

    pub fn filtered_roles(&self) -> Vec<&Role> {
        filter_items(&self.roles, &self.search_query)
    }

    /// Row count of the filtered active list.
    pub fn visible_len(&self) -> usize {
        match self.active_tab {
            ActiveTab::Users => self.filtered_users().len(),
            ActiveTab::Roles => self.filtered_roles().len(),
        }
    }

    pub fn selected_user(&self) -> Option<&User> {
        match self.active_tab {
            ActiveTab::Users => self.filtered_users().get(self.selected_index).copied(),
            ActiveTab::Roles => None,
        }
    }

    pub fn selected_role(&self) -> Option<&Role> {
        match self.active_tab {
            ActiveTab::Roles => self.filtered_roles().get(self.selected_index).copied(),
            ActiveTab::Users => None,
        }
    }

    /// Move the selection by `delta` rows, stopping at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let next = self.selected_index as isize + delta;
        self.selected_index = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    pub fn open_add_modal(&mut self) {
        self.editing_user = None;
        self.draft = UserDraft::default();
        self.open_form();
    }

    /// Open the form pre-filled with user `id`. Returns false if there is no such user.
    pub fn open_edit_modal(&mut self, id: u32) -> bool {
        let Some(user) = self.directory.get(id) else {
            return false;
        };
        self.draft = UserDraft::from(user);
        self.editing_user = Some(id);
        self.open_form();
        true
    }

    fn open_form(&mut self) {
        debug!(editing = ?self.editing_user, "open user form");
        self.modal = Some(ModalState::UserForm {
            focus: FormField::Name,
            error: None,
        });
        self.input_mode = InputMode::Modal;
    }

    /// Hide any modal and drop the edit target and draft.
    pub fn close_modal(&mut self) {
        self.editing_user = None;
        self.draft = UserDraft::default();
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    /// Submit the form in whichever mode it was opened.
    pub fn submit_form(&mut self) -> Result<u32, FormError> {
        match self.editing_user {
            Some(id) => self.submit_edit(id).map(|_| id),
            None => self.submit_add(),
        }
    }

    /// Append the draft as a new user. Returns the new id.
    pub fn submit_add(&mut self) -> Result<u32, FormError> {
        self.check_draft()?;
        let draft = std::mem::take(&mut self.draft);
        let name = draft.name.clone();
        let id = self.directory.add(draft);
        self.close_modal();
        self.status_message = Some(format!("Added user '{}' (id {})", name, id));
        Ok(id)
    }

    /// Replace user `target_id` with the draft, keeping its id.
    pub fn submit_edit(&mut self, target_id: u32) -> Result<(), FormError> {
        self.check_draft()?;
        let draft = std::mem::take(&mut self.draft);
        let name = draft.name.clone();
        let updated = self.directory.update(target_id, draft);
        self.close_modal();
        self.clamp_selection();
        if updated {
            self.status_message = Some(format!("Updated user '{}'", name));
        }
        Ok(())
    }

    fn check_draft(&mut self) -> Result<(), FormError> {
        // email inputs drop surrounding whitespace before the value is used
        let trimmed = self.draft.email.trim();
        if trimmed.len() != self.draft.email.len() {
            self.draft.email = trimmed.to_string();
        }
        if let Err(e) = form::validate(&self.draft) {
            warn!(error = %e, "form submission rejected");
            if let Some(ModalState::UserForm { error, .. }) = &mut self.modal {
                *error = Some(e.to_string());
            }
            return Err(e);
        }
        Ok(())
    }

    /// Ask for confirmation before deleting user `id`. Returns false if there is no such user.
    pub fn request_delete(&mut self, id: u32) -> bool {
        let Some(user) = self.directory.get(id) else {
            return false;
        };
        self.modal = Some(ModalState::DeleteConfirm {
            user_id: id,
            name: user.name.clone(),
            selected: 1,
        });
        self.input_mode = InputMode::Modal;
        true
    }

    /// Answer the open delete prompt. Returns the removed user when confirmed.
    pub fn resolve_delete(&mut self, confirmed: bool) -> Option<User> {
        let Some(ModalState::DeleteConfirm { user_id, .. }) = self.modal.as_ref() else {
            return None;
        };
        let id = *user_id;
        self.modal = None;
        self.input_mode = InputMode::Normal;
        if !confirmed {
            debug!(user_id = id, "delete cancelled");
            return None;
        }
        let removed = self.directory.remove(id);
        self.clamp_selection();
        if let Some(u) = &removed {
            self.status_message = Some(format!("Deleted user '{}'", u.name));
        }
        removed
    }

    /// Flip active/inactive on user `id`.
    pub fn toggle_status(&mut self, id: u32) {
        if let Some(status) = self.directory.toggle_status(id) {
            self.status_message = Some(format!("User {} is now {}", id, status));
        }
    }

    /// Roles are display-only; say so instead of acting.
    pub fn notify_roles_read_only(&mut self) {
        let name = self
            .selected_role()
            .map(|r| format!("'{}'", r.name))
            .unwrap_or_else(|| "Roles".to_string());
        self.show_info(format!("{} cannot be changed here: roles are read-only.", name));
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.modal = Some(ModalState::Info {
            message: message.into(),
        });
        self.input_mode = InputMode::Modal;
    }

    pub fn open_help(&mut self) {
        self.modal = Some(ModalState::Help { scroll: 0 });
        self.input_mode = InputMode::Modal;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
