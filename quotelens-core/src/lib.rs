//! Quotelens Core - cursor-aware string and entity matching
//!
//! This library locates the quoted string literal or configured entity
//! under a cursor position and builds the search queries used to find
//! related occurrences across a codebase. It is pure: no I/O beyond
//! config loading, no async, no shared state.

pub mod config;
pub mod entity;
pub mod error;
pub mod hover;
pub mod scan;
pub mod search;
pub mod text;
pub mod uri;

pub use config::{EntitiesConfig, DEFAULT_CONFIG};
pub use entity::{entity_at, interpolate, CapturePattern, EntityDefinition, EntityMatch, PatternKind};
pub use error::{ErrorEnvelope, QuotelensError};
pub use hover::{hover_at, Hover};
pub use scan::{string_at, string_in_line, LiteralMatch};
pub use search::{FileMatch, LineMatch, Location, SearchQuery, SearchResults};
pub use text::{line_at, Position, Span};
pub use uri::DocumentUri;

/// Result type alias for quotelens operations
pub type Result<T> = std::result::Result<T, QuotelensError>;
