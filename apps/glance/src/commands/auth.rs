use glance_core::services::{Redirect, Surface};
use glance_core::{DomainError, Notice};

use crate::render;
use crate::state::AppState;

/// Auth surfaces bounce a signed-in user back to the feed.
fn already_signed_in(state: &AppState) -> bool {
    if state.session.route(Surface::Auth) == Redirect::ToFeed {
        let email = state.session.identity().map(|i| i.email).unwrap_or_default();
        render::notice(&Notice::success(
            "Already signed in",
            format!("Signed in as {email}. Run `glance logout` first."),
        ));
        return true;
    }
    false
}

pub async fn signup(state: &AppState, email: &str, password: &str) -> Result<(), DomainError> {
    if already_signed_in(state) {
        return Ok(());
    }
    let identity = state.session.sign_up(email, password).await?;
    render::notice(&Notice::success(
        "Account created",
        format!("Welcome to Glance, {}! Try `glance onboard`.", identity.email),
    ));
    Ok(())
}

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<(), DomainError> {
    if already_signed_in(state) {
        return Ok(());
    }
    let identity = state.session.sign_in(email, password).await?;
    render::notice(&Notice::success("Login successful", format!("Welcome back, {}!", identity.email)));
    Ok(())
}

pub async fn logout(state: &AppState) -> Result<(), DomainError> {
    state.session.sign_out().await?;
    render::notice(&Notice::success("Signed out", "See you soon."));
    Ok(())
}

pub async fn whoami(state: &AppState) -> Result<(), DomainError> {
    match state.session.current_user().await? {
        Some(user) => println!("{} @{} ({})", user.name, user.username, user.id),
        None => println!("Not signed in"),
    }
    Ok(())
}
