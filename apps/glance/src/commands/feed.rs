use glance_core::services::{FeedOrder, FeedView};
use glance_core::{DomainError, Notice};

use crate::render;
use crate::state::AppState;

pub async fn list(state: &AppState, order: FeedOrder) -> Result<(), DomainError> {
    let mut feed = state.feed().await?;
    feed.set_order(order);

    match feed.view() {
        FeedView::Loading => println!("Loading feed..."),
        FeedView::Ready(glances) => {
            for glance in glances {
                println!("{}\n", render::card(glance, None));
            }
        }
    }
    Ok(())
}

pub async fn show(state: &AppState, id: &str) -> Result<(), DomainError> {
    let mut feed = state.feed().await?;
    let glance = feed.open_overlay(id)?;
    println!("{}", render::detail(glance));
    Ok(())
}

pub async fn comment(state: &AppState, id: &str, text: &str) -> Result<(), DomainError> {
    let author = state.session.require_user().await?;
    let mut feed = state.feed().await?;

    let added = feed.add_comment(id, author, text).await?;
    match &added.notice {
        Some(notice) => render::notice(notice),
        None => render::notice(&Notice::success("Comment added", added.comment.content.clone())),
    }
    Ok(())
}
