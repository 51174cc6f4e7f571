//! # Glance Core
//!
//! The domain layer of the Glance client.
//! This crate contains the content/interaction model with zero infrastructure
//! dependencies: collaborators are reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod seed;
pub mod services;

pub use error::{DomainError, Notice, NoticeLevel};
