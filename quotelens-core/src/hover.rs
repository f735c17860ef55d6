//! Hover content built purely from local text
//!
//! Hover output never depends on a network call, so hover latency is
//! decoupled from search latency. Configured entities take precedence
//! over the generic string-literal fallback.

use crate::entity::{entity_at, interpolate, EntityDefinition, EntityMatch};
use crate::scan::{string_at, LiteralMatch};
use crate::text::{Position, Span};
use serde::{Deserialize, Serialize};

/// Markdown hover content anchored to a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hover {
    pub contents: String,
    pub span: Span,
}

/// Hover text for a string literal.
pub fn literal_hover(found: &LiteralMatch) -> String {
    format!("**string literal** `\"{}\"`", found.value)
}

/// Hover text for an entity: its display name plus the interpolated
/// preview template, when one is configured.
pub fn entity_hover(found: &EntityMatch<'_>) -> String {
    match &found.entity.preview {
        Some(preview) => format!(
            "**{}**{}",
            found.entity.name,
            interpolate(preview, &found.groups)
        ),
        None => format!("**{}**", found.entity.name),
    }
}

/// Hover for whatever sits under the cursor: a configured entity first,
/// the string literal fallback second, `None` when neither applies.
pub fn hover_at(
    entities: &[EntityDefinition],
    text: &str,
    position: Position,
) -> crate::Result<Option<Hover>> {
    if let Some(found) = entity_at(entities, text, position)? {
        return Ok(Some(Hover {
            contents: entity_hover(&found),
            span: found.span,
        }));
    }

    Ok(string_at(text, position).map(|found| Hover {
        contents: literal_hover(&found),
        span: found.span,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CapturePattern;

    fn event_entity() -> EntityDefinition {
        EntityDefinition {
            name: "event".to_string(),
            preview: Some(" `$1`".to_string()),
            references: vec![CapturePattern {
                capture: r#"emit\("(\w+)"\)"#.to_string(),
                search: r#"on("$1")"#.to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn literal_hover_quotes_the_value() {
        let found = string_at("jumped \"over\"", Position::new(0, 9)).unwrap();
        assert_eq!(literal_hover(&found), "**string literal** `\"over\"`");
    }

    #[test]
    fn entity_hover_interpolates_preview() {
        let entities = vec![event_entity()];
        let hover = hover_at(&entities, r#"bus.emit("saved")"#, Position::new(0, 12))
            .unwrap()
            .unwrap();
        assert_eq!(hover.contents, "**event** `saved`");
    }

    #[test]
    fn entity_without_preview_shows_name_only() {
        let mut ent = event_entity();
        ent.preview = None;
        let hover = hover_at(&[ent], r#"bus.emit("saved")"#, Position::new(0, 12))
            .unwrap()
            .unwrap();
        assert_eq!(hover.contents, "**event**");
    }

    #[test]
    fn entity_takes_precedence_over_literal() {
        let entities = vec![event_entity()];
        // The cursor is inside both the emit(...) match and the "saved"
        // literal; the configured entity wins.
        let hover = hover_at(&entities, r#"bus.emit("saved")"#, Position::new(0, 11))
            .unwrap()
            .unwrap();
        assert!(hover.contents.starts_with("**event**"));
    }

    #[test]
    fn falls_back_to_literal_hover() {
        let hover = hover_at(&[], "jumped 'over'", Position::new(0, 9))
            .unwrap()
            .unwrap();
        assert_eq!(hover.contents, "**string literal** `\"over\"`");
        assert_eq!(hover.span.start, 8);
        assert_eq!(hover.span.end, 12);
    }

    #[test]
    fn nothing_under_cursor_is_none() {
        let hover = hover_at(&[], "plain text", Position::new(0, 3)).unwrap();
        assert!(hover.is_none());
    }
}
