//! The add/edit user form: field focus order and submission checks.

use std::fmt;

use crate::store::{Role, UserDraft};

/// Focusable elements of the user form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Role,
    Status,
    Cancel,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Email,
        FormField::Role,
        FormField::Status,
        FormField::Cancel,
        FormField::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Name | FormField::Email)
    }

    pub fn is_select(self) -> bool {
        matches!(self, FormField::Role | FormField::Status)
    }
}

/// Why a form submission was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    NameRequired,
    EmailRequired,
    EmailMalformed,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::NameRequired => f.write_str("Name is required"),
            FormError::EmailRequired => f.write_str("Email is required"),
            FormError::EmailMalformed => f.write_str("Email must look like name@domain"),
        }
    }
}

impl std::error::Error for FormError {}

/// Required fields must be filled and the email must have a local part and a domain.
pub fn validate(draft: &UserDraft) -> Result<(), FormError> {
    if draft.name.is_empty() {
        return Err(FormError::NameRequired);
    }
    let email = draft.email.trim();
    if email.is_empty() {
        return Err(FormError::EmailRequired);
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(FormError::EmailMalformed),
    }
}

/// Step the draft's role through the known role names, wrapping around.
pub fn cycle_role(draft: &mut UserDraft, roles: &[Role], forward: bool) {
    if roles.is_empty() {
        return;
    }
    let len = roles.len();
    let next = match roles.iter().position(|r| r.name == draft.role) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    draft.role = roles[next].name.clone();
}

pub fn cycle_status(draft: &mut UserDraft) {
    draft.status = draft.status.toggled();
}
