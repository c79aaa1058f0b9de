use crate::store::{Role, User};

/// Records that the search box can match against.
pub trait Searchable {
    fn name(&self) -> &str;

    /// Secondary field matched alongside the name, if the record has one.
    fn email(&self) -> Option<&str> {
        None
    }
}

impl Searchable for User {
    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl Searchable for Role {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive substring match on name or email.
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    let q = query.to_lowercase();
    item.name().to_lowercase().contains(&q)
        || item.email().map(|e| e.to_lowercase().contains(&q)).unwrap_or(false)
}

/// Items matching `query`, in input order. An empty query keeps everything.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| matches(*item, query)).collect()
}
