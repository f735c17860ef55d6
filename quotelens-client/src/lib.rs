//! Quotelens Client - backend access shared by the service and the CLI
//!
//! Provides the `CodeIntel` runtime that owns the entity configuration,
//! the search backend client, and the memoizing cache, so the service
//! and CLI stay in sync without duplicating the matching path.

pub mod cache;
pub mod intel;
pub mod search_client;

pub use cache::{SearchCache, SEARCH_CACHE_MAX_ENTRIES};
pub use intel::CodeIntel;
pub use search_client::{is_error_code, InstanceInfo, SearchClient};
