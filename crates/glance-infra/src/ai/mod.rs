//! Generative-AI collaborators.

mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};
