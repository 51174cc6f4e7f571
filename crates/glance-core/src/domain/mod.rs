//! Domain entities - the core content objects.

mod comment;
mod glance;
mod media;
mod user;

pub use comment::Comment;
pub use glance::{Glance, GlanceMedia};
pub use media::{MediaFile, MediaKind, Recording, extension_for_mime, mime_for_extension};
pub use user::User;
