//! In-memory user and role records.
//!
//! `UserDirectory` owns the ordered user list for the session and hands out
//! ids from a counter that only moves forward. Roles are a static list.
//!
use std::fmt;

use tracing::{debug, info};

/// Account state shown (and toggled) in the users table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: u32,
    pub name: String,
    /// Opaque permission tags, in display order.
    pub permissions: Vec<String>,
}

impl Role {
    pub fn new(id: u32, name: &str, permissions: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Editable fields of a user, without the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: DEFAULT_ROLE.to_string(),
            status: UserStatus::Active,
        }
    }
}

impl From<&User> for UserDraft {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.clone(),
            status: u.status,
        }
    }
}

/// Role preselected in a fresh draft.
pub const DEFAULT_ROLE: &str = "manager";

/// Roles the dashboard starts with.
pub fn seed_roles() -> Vec<Role> {
    vec![
        Role::new(1, "admin", &["users_read", "users_write", "users_delete"]),
        Role::new(2, "manager", &["users_read", "users_write"]),
    ]
}

/// Users the dashboard starts with.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role: "admin".to_string(),
            status: UserStatus::Active,
        },
        User {
            id: 2,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            role: "manager".to_string(),
            status: UserStatus::Active,
        },
    ]
}

/// Ordered user list plus the id counter.
#[derive(Clone, Debug)]
pub struct UserDirectory {
    users: Vec<User>,
    next_id: u32,
}

impl UserDirectory {
    /// Build a directory from existing records; the counter starts past the highest id.
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self { users, next_id }
    }

    pub fn seeded() -> Self {
        Self::new(seed_users())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Id the next `add` will assign.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Append a user built from `draft`; returns the assigned id.
    pub fn add(&mut self, draft: UserDraft) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.users.push(User {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            status: draft.status,
        });
        info!(user_id = id, "user added");
        id
    }

    /// Overwrite the fields of user `id` with `draft`, keeping the id. Returns false if absent.
    pub fn update(&mut self, id: u32, draft: UserDraft) -> bool {
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.name = draft.name;
                u.email = draft.email;
                u.role = draft.role;
                u.status = draft.status;
                info!(user_id = id, "user updated");
                true
            }
            None => {
                debug!(user_id = id, "update skipped, no such user");
                false
            }
        }
    }

    /// Remove user `id`, returning the removed record.
    pub fn remove(&mut self, id: u32) -> Option<User> {
        let pos = self.users.iter().position(|u| u.id == id);
        match pos {
            Some(idx) => {
                let removed = self.users.remove(idx);
                info!(user_id = id, "user deleted");
                Some(removed)
            }
            None => {
                debug!(user_id = id, "delete skipped, no such user");
                None
            }
        }
    }

    /// Flip active/inactive for user `id`; returns the new status.
    pub fn toggle_status(&mut self, id: u32) -> Option<UserStatus> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        user.status = user.status.toggled();
        info!(user_id = id, status = %user.status, "user status toggled");
        Some(user.status)
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str) -> UserDraft {
        UserDraft {
            name: name.to_string(),
            email: email.to_string(),
            ..UserDraft::default()
        }
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut dir = UserDirectory::seeded();
        let id3 = dir.add(draft("Alice", "a@x.com"));
        assert_eq!(id3, 3);
        dir.remove(1);
        let id4 = dir.add(draft("Bob", "b@x.com"));
        assert_eq!(id4, 4);
        let mut ids: Vec<u32> = dir.users().iter().map(|u| u.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), dir.len());
    }

    #[test]
    fn counter_starts_past_highest_seed_id() {
        let mut users = seed_users();
        users[1].id = 7;
        let dir = UserDirectory::new(users);
        assert_eq!(dir.next_id(), 8);
        assert_eq!(UserDirectory::new(Vec::new()).next_id(), 1);
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let mut dir = UserDirectory::seeded();
        assert!(!dir.update(42, draft("x", "x@y")));
        assert!(dir.remove(42).is_none());
        assert!(dir.toggle_status(42).is_none());
        assert_eq!(dir.users(), seed_users().as_slice());
    }
}
