use std::path::Path;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use glance_core::domain::{Glance, MediaKind};
use glance_core::ports::AudioCapture;
use glance_core::services::Composer;
use glance_core::{DomainError, Notice};

use crate::render;
use crate::state::AppState;

pub async fn text(state: &AppState, content: String) -> Result<(), DomainError> {
    let mut composer = Composer::new();
    composer.choose_text()?;
    composer.set_content(content);
    publish(state, &mut composer).await
}

pub async fn media(
    state: &AppState,
    path: &Path,
    caption: String,
    suggest: bool,
) -> Result<(), DomainError> {
    let file = super::read_media(path).await?;
    let is_image = file.kind() == Some(MediaKind::Image);

    let mut composer = Composer::new();
    composer.select_file(file)?;
    composer.set_content(caption);

    if suggest && is_image {
        println!("Getting trending hashtags...");
        match composer.suggest_hashtags(state.suggester.as_ref()).await {
            Ok(tags) if tags.is_empty() => println!("No hashtags suggested."),
            Ok(tags) => {
                println!("Suggested: {}", tags.join(" "));
                for tag in &tags {
                    composer.append_hashtag(tag);
                }
            }
            // A failed suggestion never blocks the post.
            Err(e) => render::notice(&Notice::from(&e)),
        }
    } else if suggest {
        println!("Hashtag suggestions are only available for images.");
    }

    publish(state, &mut composer).await
}

pub async fn audio(state: &AppState, caption: String, seconds: Option<u64>) -> Result<(), DomainError> {
    let mut composer = Composer::new();
    composer.choose_audio()?;
    composer.start_recording(state.capture.as_ref()).await?;

    match seconds {
        Some(secs) => {
            println!("Recording for {secs}s...");
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
        None => {
            println!("Recording... press Enter to stop.");
            let mut line = String::new();
            let _ = BufReader::new(tokio::io::stdin()).read_line(&mut line).await;
        }
    }

    composer.stop_recording(state.capture.as_ref()).await?;
    let recording = composer.recording().cloned();
    composer.set_content(caption);
    let result = publish(state, &mut composer).await;

    // The draft does not outlive this command, posted or not.
    if let Some(recording) = recording {
        state.capture.discard(&recording).await;
    }
    result
}

async fn publish(state: &AppState, composer: &mut Composer) -> Result<(), DomainError> {
    let author = state.session.current_user().await?;
    let glance: Glance = composer
        .submit(author.as_ref(), state.uploader.as_ref(), &state.glances)
        .await?;

    render::notice(&Notice::success("Glance posted!", "Your glance is now live."));
    println!("{}", render::card(&glance, None));
    Ok(())
}
