//! Command dispatch.

mod auth;
mod compose;
mod feed;
mod onboard;
mod profile;
mod shell;

use std::path::Path;

use glance_core::DomainError;
use glance_core::domain::{MediaFile, mime_for_extension};
use glance_core::services::{Redirect, Surface};

use crate::cli::{Command, PostCommand, ProfileCommand};
use crate::state::AppState;

pub async fn run(state: &AppState, command: Command) -> Result<(), DomainError> {
    let auth_surface = matches!(
        command,
        Command::Signup { .. } | Command::Login { .. } | Command::Logout | Command::Whoami
    );
    if !auth_surface && state.session.route(Surface::App) == Redirect::ToLogin {
        return Err(DomainError::Unauthenticated);
    }

    match command {
        Command::Signup { email, password } => auth::signup(state, &email, &password).await,
        Command::Login { email, password } => auth::login(state, &email, &password).await,
        Command::Logout => auth::logout(state).await,
        Command::Whoami => auth::whoami(state).await,
        Command::Feed { order } => feed::list(state, order.into()).await,
        Command::Show { id } => feed::show(state, &id).await,
        Command::Comment { id, text } => feed::comment(state, &id, &text).await,
        Command::Post(PostCommand::Text { content }) => compose::text(state, content).await,
        Command::Post(PostCommand::Media {
            path,
            caption,
            suggest,
        }) => compose::media(state, &path, caption, suggest).await,
        Command::Post(PostCommand::Audio { caption, seconds }) => {
            compose::audio(state, caption, seconds).await
        }
        Command::Profile(ProfileCommand::Show { username }) => {
            profile::show(state, username.as_deref()).await
        }
        Command::Profile(ProfileCommand::Edit { name, bio }) => profile::edit(state, &name, &bio).await,
        Command::Profile(ProfileCommand::Avatar { path }) => profile::avatar(state, &path).await,
        Command::Onboard { interests } => onboard::run(state, &interests).await,
        Command::Shell => shell::run(state).await,
    }
}

/// Read a local file as a media payload, typed by its extension.
async fn read_media(path: &Path) -> Result<MediaFile, DomainError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::Validation(format!("Could not read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(MediaFile::new(file_name.clone(), mime_for_extension(&file_name), bytes))
}
