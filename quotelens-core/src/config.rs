//! Entities configuration
//!
//! Entities are supplied wholesale from a TOML file and stay immutable
//! for the lifetime of a matching operation. Declaration order matters:
//! it is the match-priority order (see [`crate::entity::entity_at`]).

use crate::entity::EntityDefinition;
use crate::error::QuotelensError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default entities configuration as TOML
pub const DEFAULT_CONFIG: &str = r#"# Quotelens entities
#
# Entities are matched in declaration order: the first pattern whose
# match contains the cursor wins. Within an entity, definition patterns
# are consulted before references, then implementations.
#
# Search templates fill $1, $2, ... from the capture pattern's groups.

[[entities]]
name = "i18n key"
preview = " `$1`"
definitions = [
    { capture = '"([\w.-]+)"\s*:', search = '"$1":' },
]
references = [
    { capture = 't\("([\w.-]+)"\)', search = 't("$1")' },
]
implementations = []

[[entities]]
name = "event"
references = [
    { capture = 'emit\("([\w:-]+)"\)', search = '"$1"' },
    { capture = 'on\("([\w:-]+)"\)', search = '"$1"' },
]
definitions = []
implementations = []
"#;

/// Ordered entity definitions loaded from configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitiesConfig {
    #[serde(default)]
    pub entities: Vec<EntityDefinition>,
}

impl EntitiesConfig {
    /// Load and validate config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate config from a TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| QuotelensError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults.
    pub fn builtin() -> Self {
        // DEFAULT_CONFIG is covered by tests; parse cannot fail.
        Self::from_toml(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Compile every non-empty capture pattern, failing fast on the
    /// first malformed one. Runs at load time so matching never trips
    /// over a bad pattern per keystroke.
    pub fn validate(&self) -> crate::Result<()> {
        for entity in &self.entities {
            for pattern in entity.all_patterns() {
                if pattern.capture.is_empty() {
                    continue;
                }
                Regex::new(&pattern.capture).map_err(|source| {
                    QuotelensError::InvalidPattern {
                        entity: entity.name.clone(),
                        pattern: pattern.capture.clone(),
                        source,
                    }
                })?;
            }
        }
        Ok(())
    }
}
