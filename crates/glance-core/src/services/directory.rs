//! User lookups for profile pages.

use crate::domain::{Glance, User};
use crate::seed;

/// Find a user by username among the seed users and the feed's authors.
pub fn find_by_username(glances: &[Glance], username: &str) -> Option<User> {
    seed::users()
        .into_iter()
        .chain(glances.iter().map(|g| g.author.clone()))
        .find(|u| u.username == username)
}

/// Glances written by `user_id`, in feed order.
pub fn glances_by<'a>(glances: &'a [Glance], user_id: &str) -> Vec<&'a Glance> {
    glances.iter().filter(|g| g.author.id == user_id).collect()
}
