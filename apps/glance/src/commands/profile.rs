use std::path::Path;

use glance_core::services::{find_by_username, glances_by};
use glance_core::{DomainError, Notice};

use crate::render;
use crate::state::AppState;

pub async fn show(state: &AppState, username: Option<&str>) -> Result<(), DomainError> {
    let feed = state.feed().await?;

    let user = match username {
        Some(username) => find_by_username(feed.glances(), username).ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "User",
                id: username.to_string(),
            }
        })?,
        None => state.session.require_user().await?,
    };

    let glances = glances_by(feed.glances(), &user.id);
    println!("{}\n", render::profile(&user, glances.len()));
    if glances.is_empty() {
        println!("No glances yet.");
    }
    for glance in glances {
        println!("{}\n", render::card(glance, None));
    }
    Ok(())
}

pub async fn edit(state: &AppState, name: &str, bio: &str) -> Result<(), DomainError> {
    state.profiles.update_profile(name, bio).await?;
    render::notice(&Notice::success("Profile updated", "Your changes have been saved."));
    Ok(())
}

pub async fn avatar(state: &AppState, path: &Path) -> Result<(), DomainError> {
    let image = super::read_media(path).await?;
    state.profiles.update_avatar(&image).await?;
    render::notice(&Notice::success("Avatar updated", "Your new picture is saved locally."));
    Ok(())
}
