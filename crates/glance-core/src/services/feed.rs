//! Feed assembly: the loaded list, per-card state and the comment overlay.

use std::collections::HashMap;

use crate::domain::{Comment, Glance, GlanceMedia, User};
use crate::error::{DomainError, Notice, StoreError};
use crate::services::{CardInteractions, GlanceStore};

/// How a card is laid out, chosen by the glance's media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    /// Full-bleed image or video with overlaid text and reactions.
    Visual,
    /// Header, caption and an audio player.
    Audio,
    Text,
}

impl CardLayout {
    pub fn for_glance(glance: &Glance) -> Self {
        match glance.media {
            GlanceMedia::Image { .. } | GlanceMedia::Video { .. } => CardLayout::Visual,
            GlanceMedia::Audio { .. } => CardLayout::Audio,
            GlanceMedia::Text => CardLayout::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedOrder {
    /// Stored order; new glances are prepended.
    #[default]
    Latest,
    /// Most liked first.
    Popular,
}

/// What the feed surface should show.
#[derive(Debug)]
pub enum FeedView<'a> {
    Loading,
    Ready(Vec<&'a Glance>),
}

/// Outcome of [`Feed::add_comment`].
///
/// `notice` is set when the comment is visible in this session but could not
/// be saved durably.
#[derive(Debug, Clone)]
pub struct CommentAdded {
    pub comment: Comment,
    pub notice: Option<Notice>,
}

pub struct Feed {
    store: GlanceStore,
    glances: Vec<Glance>,
    cards: HashMap<String, CardInteractions>,
    overlay: Option<String>,
    order: FeedOrder,
}

impl Feed {
    pub fn new(store: GlanceStore) -> Self {
        Self {
            store,
            glances: Vec::new(),
            cards: HashMap::new(),
            overlay: None,
            order: FeedOrder::default(),
        }
    }

    /// Load the persisted (or seed) list. Resets card state and the overlay.
    pub async fn activate(&mut self) -> Result<(), StoreError> {
        let glances = self.store.load_or_seed().await?;

        tracing::debug!(count = glances.len(), "Feed activated");
        self.glances = glances;
        self.cards.clear();
        self.overlay = None;
        Ok(())
    }

    /// An empty list is shown as still loading.
    pub fn view(&self) -> FeedView<'_> {
        if self.glances.is_empty() {
            return FeedView::Loading;
        }

        let mut ordered: Vec<&Glance> = self.glances.iter().collect();
        if self.order == FeedOrder::Popular {
            ordered.sort_by(|a, b| b.likes.cmp(&a.likes));
        }
        FeedView::Ready(ordered)
    }

    pub fn glances(&self) -> &[Glance] {
        &self.glances
    }

    pub fn glance(&self, id: &str) -> Option<&Glance> {
        self.glances.iter().find(|g| g.id == id)
    }

    pub fn order(&self) -> FeedOrder {
        self.order
    }

    pub fn set_order(&mut self, order: FeedOrder) {
        self.order = order;
    }

    /// Open the comment overlay bound to glance `id`.
    pub fn open_overlay(&mut self, id: &str) -> Result<&Glance, DomainError> {
        let index = self.index_of(id)?;
        self.overlay = Some(id.to_string());
        Ok(&self.glances[index])
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// The glance behind the open overlay, read live from the list.
    pub fn overlay(&self) -> Option<&Glance> {
        self.overlay.as_deref().and_then(|id| self.glance(id))
    }

    /// Interaction state for a card, seeded from its glance on first use.
    pub fn card(&mut self, id: &str) -> Option<&mut CardInteractions> {
        let glance = self.glances.iter().find(|g| g.id == id)?;
        Some(
            self.cards
                .entry(id.to_string())
                .or_insert_with(|| CardInteractions::for_glance(glance)),
        )
    }

    /// Append a comment to glance `id` and save the whole list.
    pub async fn add_comment(
        &mut self,
        id: &str,
        author: User,
        text: &str,
    ) -> Result<CommentAdded, DomainError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("Comment cannot be empty".to_string()));
        }

        let index = self.index_of(id)?;
        let comment = Comment::new(author, content.to_string());
        self.glances[index].comments.push(comment.clone());

        let notice = match self.store.save(&self.glances).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(glance_id = %id, error = %e, "Comment kept in memory only");
                Some(Notice::from(&e))
            }
        };

        Ok(CommentAdded { comment, notice })
    }

    fn index_of(&self, id: &str) -> Result<usize, DomainError> {
        self.glances
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Glance",
                id: id.to_string(),
            })
    }
}
