//! Entity matcher: find a configured entity under a cursor
//!
//! Entities generalize the quote scanner: each one carries regex capture
//! patterns grouped into definition, reference, and implementation
//! categories, plus search templates filled from the captured groups.
//!
//! Matching order is a priority list. Entities are consulted in
//! declaration order, and within an entity the categories are consulted
//! definitions, then references, then implementations, each in
//! declaration order. The first pattern whose match contains the cursor
//! wins, regardless of match length or specificity.

use crate::error::QuotelensError;
use crate::text::{line_at, Position, Span};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A regex capture pattern paired with a search template.
///
/// `search` may contain `$1`, `$2`, ... placeholders filled from the
/// pattern's captured groups. An empty `capture` is inert: the pattern
/// never matches but may still sit in a category as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturePattern {
    #[serde(default)]
    pub capture: String,
    #[serde(default)]
    pub search: String,
}

/// A user-configured entity: a display name plus capture patterns per
/// category and an optional hover preview template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default)]
    pub definitions: Vec<CapturePattern>,
    #[serde(default)]
    pub references: Vec<CapturePattern>,
    #[serde(default)]
    pub implementations: Vec<CapturePattern>,
}

/// Pattern category selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Definition,
    Reference,
    Implementation,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Reference => "reference",
            Self::Implementation => "implementation",
        }
    }
}

impl EntityDefinition {
    /// Patterns of one category, in declaration order.
    pub fn patterns(&self, kind: PatternKind) -> &[CapturePattern] {
        match kind {
            PatternKind::Definition => &self.definitions,
            PatternKind::Reference => &self.references,
            PatternKind::Implementation => &self.implementations,
        }
    }

    /// All patterns in match-priority order: definitions, references,
    /// implementations.
    pub fn all_patterns(&self) -> impl Iterator<Item = &CapturePattern> {
        self.definitions
            .iter()
            .chain(self.references.iter())
            .chain(self.implementations.iter())
    }
}

/// An entity found under the cursor.
///
/// `groups` holds the whole match at index 0 followed by the capture
/// groups in order; a group that did not participate captures the empty
/// string.
#[derive(Debug, Clone)]
pub struct EntityMatch<'a> {
    pub entity: &'a EntityDefinition,
    pub span: Span,
    pub groups: Vec<String>,
}

/// Find the first entity whose pattern match contains `position`.
///
/// Errors only on a malformed capture pattern; configuration loaded
/// through [`crate::EntitiesConfig`] is validated up front, so for a
/// validated entity list this cannot fail at match time.
pub fn entity_at<'a>(
    entities: &'a [EntityDefinition],
    text: &str,
    position: Position,
) -> crate::Result<Option<EntityMatch<'a>>> {
    let Some(line) = line_at(text, position.line) else {
        return Ok(None);
    };

    for entity in entities {
        for pattern in entity.all_patterns() {
            if pattern.capture.is_empty() {
                continue;
            }
            let re = Regex::new(&pattern.capture).map_err(|source| {
                QuotelensError::InvalidPattern {
                    entity: entity.name.clone(),
                    pattern: pattern.capture.clone(),
                    source,
                }
            })?;
            let Some(found) = re.find(line) else {
                continue;
            };

            // The engine reports byte offsets; spans use char offsets.
            let start = line[..found.start()].chars().count();
            let end = start + found.as_str().chars().count();
            if start <= position.character && position.character <= end {
                let Some(caps) = re.captures(line) else {
                    continue;
                };
                let groups = caps
                    .iter()
                    .map(|g| g.map(|m| m.as_str().to_string()).unwrap_or_default())
                    .collect();
                return Ok(Some(EntityMatch {
                    entity,
                    span: Span {
                        line: position.line,
                        start,
                        end,
                    },
                    groups,
                }));
            }
        }
    }

    Ok(None)
}

/// Fill `$1`, `$2`, ... placeholders in `template` from `groups`.
///
/// Every occurrence of a placeholder is replaced. Indices are
/// substituted highest first so `$12` is never clipped by `$1`.
/// Placeholders whose index exceeds the available groups are left as
/// literal text; `$0` is not a placeholder (group 0 is the whole match).
pub fn interpolate(template: &str, groups: &[String]) -> String {
    let mut out = template.to_string();
    for (i, group) in groups.iter().enumerate().skip(1).rev() {
        out = out.replace(&format!("${}", i), group);
    }
    out
}
