//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use glance_core::services::FeedOrder;

#[derive(Debug, Parser)]
#[command(name = "glance", version, about = "Share moments at a glance")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List the feed
    Feed {
        #[arg(long, value_enum, default_value_t = Order::Latest)]
        order: Order,
    },
    /// Show one glance with its comments
    Show { id: String },
    /// Comment on a glance
    Comment { id: String, text: String },
    /// Publish a glance
    #[command(subcommand)]
    Post(PostCommand),
    /// View or edit profiles
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Seed your feed with AI-curated glances about your interests
    Onboard { interests: String },
    /// Interactive feed: like, share, follow and comment
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// A text-only glance
    Text { content: String },
    /// An image, video or audio file
    Media {
        path: PathBuf,
        #[arg(long, default_value = "")]
        caption: String,
        /// Ask the AI for hashtags (images only) and append them to the caption
        #[arg(long)]
        suggest: bool,
    },
    /// Record from the microphone
    Audio {
        #[arg(long, default_value = "")]
        caption: String,
        /// Stop after this many seconds instead of waiting for Enter
        #[arg(long)]
        seconds: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show a profile and its glances (yours by default)
    Show { username: Option<String> },
    /// Change display name and bio
    Edit {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        bio: String,
    },
    /// Set a local avatar image
    Avatar { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Order {
    Latest,
    Popular,
}

impl From<Order> for FeedOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Latest => FeedOrder::Latest,
            Order::Popular => FeedOrder::Popular,
        }
    }
}
