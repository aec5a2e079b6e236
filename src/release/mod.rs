//! Release resolution layer
//!
//! Turns a flat release index into a short list of releases, one per
//! minor family by default, with every release tagged by the families it
//! represents.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐
//! │   Source    │──▶│ Aggregator │──▶│   Tagger   │──▶│  Selector  │──▶│  Resolver  │
//! │   (fetch)   │   │ (families) │   │  (tags)    │   │  (window)  │   │  (rename)  │
//! └─────────────┘   └────────────┘   └────────────┘   └────────────┘   └────────────┘
//! ```
//!
//! # Modules
//!
//! - [`aggregator`]: Builds `major` and `major.minor` family entries
//! - [`tagger`]: Tags entries with their families and marks the latest release
//! - [`selector`]: Window and pattern selection
//! - [`resolver`]: Renames family entries to the concrete release they hold
//! - [`pipeline`]: Runs the stages above over one snapshot
//! - [`source`]: Fetches the release index over HTTP
//! - [`semver`]: Version key parsing and ordering
//! - [`types`]: Records, tags and the index document
//! - [`error`]: Error types for resolution and retrieval

pub mod aggregator;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod selector;
pub mod semver;
pub mod source;
pub mod tagger;
pub mod types;
