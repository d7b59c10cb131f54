//! # Chatgraph
//!
//! A Rust library (and CLI) for turning a personal Discord data export into
//! per-conversation time-series statistics: cumulative message counts over
//! time, and cumulative filler-word or phrase match counts per message.
//!
//! ## Overview
//!
//! A run is a single pass over the export:
//!
//! 1. [`archive`] opens the `.zip` (into a scoped temp dir) or an extracted
//!    directory
//! 2. [`index`] discovers the one-to-one conversations from
//!    `messages/index.json` and the per-channel descriptors
//! 3. [`reader`] streams each conversation's `messages.csv` into a
//!    chronological event sequence
//! 4. [`pattern`] optionally classifies every message against a builtin
//!    filler-word set or user-supplied phrases
//! 5. [`series`] accumulates running totals and extends every series to a
//!    common time horizon
//! 6. [`rank`] filters, ranks and windows the conversations
//! 7. [`render`] draws the selected series as an SVG line chart
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use chatgraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let archive = Archive::open(Path::new("package.zip"))?;
//!     let discovery = chatgraph::index::discover(&archive.messages_root())?;
//!
//!     let mut bundles = Vec::new();
//!     for conversation in discovery.conversations.into_values() {
//!         let events = chatgraph::reader::read_log(&conversation)?;
//!         bundles.extend(accumulate(conversation, &events, None));
//!     }
//!     let bundles = extend_to_horizon(bundles);
//!
//!     let selection = rank_and_select(bundles, &SelectConfig::new(10));
//!     for bundle in &selection.selected {
//!         println!("{}: {}", bundle.conversation.name, bundle.total());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`archive`] — export unpacking ([`Archive`](archive::Archive))
//! - [`index`] — conversation discovery ([`discover`](index::discover))
//! - [`reader`] — message log reading ([`read_log`](reader::read_log))
//! - [`pattern`] — message classification ([`PatternClassifier`](pattern::PatternClassifier))
//! - [`series`] — cumulative series ([`accumulate`](series::accumulate),
//!   [`extend_to_horizon`](series::extend_to_horizon))
//! - [`rank`] — ranking and selection ([`rank_and_select`](rank::rank_and_select))
//! - [`render`] — SVG chart output ([`render_chart`](render::render_chart),
//!   feature `render`)
//! - [`cli`] — CLI argument surface (feature `cli`)
//! - [`error`] — unified error types ([`ChatgraphError`], [`Result`])

pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod index;
pub mod pattern;
pub mod rank;
pub mod reader;
#[cfg(feature = "render")]
pub mod render;
pub mod series;

// Re-export the main types at the crate root for convenience
pub use error::{ChatgraphError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatgraph::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatgraphError, Result};

    // Archive handling
    pub use crate::archive::Archive;

    // Discovery
    pub use crate::index::{Conversation, Discovery, discover};

    // Log reading
    pub use crate::reader::{MessageEvent, read_log};

    // Classification
    pub use crate::pattern::{PatternClassifier, PatternMatch, PatternMode};

    // Accumulation
    pub use crate::series::{ConversationSeries, Series, accumulate, extend_to_horizon};

    // Ranking
    pub use crate::rank::{RankKey, SelectConfig, Selection, SelectWarning, rank_and_select};

    // Rendering
    #[cfg(feature = "render")]
    pub use crate::render::{ChartSpec, render_chart};
}
