use glance_core::{DomainError, Notice};

use crate::render;
use crate::state::AppState;

pub async fn run(state: &AppState, interests: &str) -> Result<(), DomainError> {
    let user = state.session.require_user().await?;

    println!("Generating your feed...");
    let added = state.onboarding.seed_feed(&user, interests).await?;
    if added.is_empty() {
        render::notice(&Notice::success(
            "Already set up",
            "Your feed was personalized before.",
        ));
        return Ok(());
    }

    render::notice(&Notice::success(
        "Feed personalized",
        format!("Added {} glances picked for you.", added.len()),
    ));
    for glance in &added {
        println!("{}\n", render::card(glance, None));
    }
    Ok(())
}
