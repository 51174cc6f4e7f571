//! Plain-text rendering of glances, profiles and notices.

use chrono::{DateTime, Utc};

use glance_core::domain::{Glance, GlanceMedia, User};
use glance_core::services::{CardInteractions, CardLayout};
use glance_core::{Notice, NoticeLevel};

pub fn notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("✓ {}: {}", notice.title, notice.description),
        NoticeLevel::Error => eprintln!("✗ {}: {}", notice.title, notice.description),
    }
}

/// "just now", "5m ago", "3h ago", "2d ago", then the date.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        at.format("%b %e, %Y").to_string()
    }
}

fn media_line(media: &GlanceMedia) -> Option<String> {
    match media {
        GlanceMedia::Text => None,
        GlanceMedia::Image { url } => Some(format!("[image] {url}")),
        GlanceMedia::Video { url } => Some(format!("[video] {url}")),
        GlanceMedia::Audio { url } => Some(format!("[audio] {url}")),
    }
}

/// One feed card. `card` overrides the persisted counters when present.
pub fn card(glance: &Glance, card: Option<&CardInteractions>) -> String {
    let now = Utc::now();
    let mut out = format!(
        "{}  {} @{} · {}\n",
        glance.id,
        glance.author.name,
        glance.author.username,
        relative_time(glance.created_at, now)
    );

    let media = media_line(&glance.media);
    match CardLayout::for_glance(glance) {
        CardLayout::Visual | CardLayout::Audio => {
            if let Some(media) = &media {
                out.push_str(&format!("  {media}\n"));
            }
            if !glance.content.is_empty() {
                out.push_str(&format!("  {}\n", glance.content));
            }
        }
        CardLayout::Text => out.push_str(&format!("  {}\n", glance.content)),
    }

    let (likes, liked, shares, following) = match card {
        Some(c) => (c.likes, c.liked, c.shares, c.following),
        None => (glance.likes, false, glance.shares, false),
    };
    out.push_str(&format!(
        "  {} {}   💬 {}   ↗ {}{}",
        if liked { "♥" } else { "♡" },
        likes,
        glance.comments.len(),
        shares,
        if following { "   · following" } else { "" }
    ));
    out
}

/// A glance with its full comment thread.
pub fn detail(glance: &Glance) -> String {
    let now = Utc::now();
    let mut out = card(glance, None);
    out.push_str("\n  Comments\n");
    if glance.comments.is_empty() {
        out.push_str("  No comments yet.\n");
    }
    for comment in &glance.comments {
        out.push_str(&format!(
            "  - {} @{} ({}): {}\n",
            comment.author.name,
            comment.author.username,
            relative_time(comment.created_at, now),
            comment.content
        ));
    }
    out
}

pub fn profile(user: &User, glance_count: usize) -> String {
    let mut out = format!("{} @{}\n", user.name, user.username);
    if !user.bio.is_empty() {
        out.push_str(&format!("{}\n", user.bio));
    }
    if !user.interests.is_empty() {
        out.push_str(&format!("Interests: {}\n", user.interests.join(", ")));
    }
    out.push_str(&format!("Avatar: {}\n", abbreviate(&user.avatar_url, 60)));
    out.push_str(&format!("{glance_count} glances"));
    out
}

fn abbreviate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}…")
    }
}
