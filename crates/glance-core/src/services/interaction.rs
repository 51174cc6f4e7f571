//! Per-card like/share/follow state.
//!
//! This state is transient: it is seeded from the glance record when a card
//! is first shown and is never written back to the stored glance.

use crate::domain::Glance;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInteractions {
    pub liked: bool,
    pub shared: bool,
    pub following: bool,
    pub likes: u64,
    pub shares: u64,
}

impl CardInteractions {
    pub fn for_glance(glance: &Glance) -> Self {
        Self {
            liked: false,
            shared: false,
            following: false,
            likes: glance.likes,
            shares: glance.shares,
        }
    }

    /// Flip the like and move the counter by exactly one. Returns the new state.
    pub fn toggle_like(&mut self) -> bool {
        if self.liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes += 1;
        }
        self.liked = !self.liked;
        self.liked
    }

    /// Count a share once. There is no unshare; returns whether it counted.
    pub fn share(&mut self) -> bool {
        if self.shared {
            return false;
        }
        self.shares += 1;
        self.shared = true;
        true
    }

    pub fn toggle_follow(&mut self) -> bool {
        self.following = !self.following;
        self.following
    }
}

/// Follow is only offered on other people's glances.
pub fn can_follow(glance: &Glance, viewer_id: Option<&str>) -> bool {
    viewer_id != Some(glance.author.id.as_str())
}
