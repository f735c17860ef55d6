//! Search queries and backend result shapes
//!
//! The search backend is an external collaborator: it accepts a query
//! string with an optional repository filter and returns file matches
//! with per-line offset/length pairs. This module owns the wire shapes
//! and the query construction; it performs no I/O.

use crate::uri::DocumentUri;
use serde::{Deserialize, Serialize};

/// A query handed to the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, repo: Option<String>) -> Self {
        Self {
            query: query.into(),
            repo,
        }
    }

    /// Query matching a string literal under either quoting style:
    /// `(\"value\"|'value')`, optionally scoped with ` r:repo`.
    pub fn for_literal(value: &str, repo: Option<&str>) -> Self {
        let mut query = format!(r#"(\"{}\"|'{}')"#, value, value);
        if let Some(repo) = repo {
            query.push_str(&format!(" r:{}", repo));
        }
        Self {
            query,
            repo: repo.map(str::to_string),
        }
    }
}

/// One matching line within a file match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineMatch {
    pub line_number: usize,
    /// `(start offset, length)` pairs, one per occurrence on the line.
    pub offsets_and_lengths: Vec<(usize, usize)>,
}

/// One file returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMatch {
    pub repository: String,
    pub revision: String,
    pub path: String,
    pub line_matches: Vec<LineMatch>,
}

/// Backend response body for a search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<FileMatch>,
}

/// A single occurrence: an opaque document URI plus a line-local span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub uri: String,
    pub line: usize,
    pub start: usize,
    pub length: usize,
}

impl SearchResults {
    /// Flatten file matches into one `Location` per offset/length pair,
    /// preserving backend order.
    pub fn into_locations(self) -> Vec<Location> {
        let mut locations = Vec::new();
        for file in self.results {
            let uri = DocumentUri {
                repo: file.repository,
                revision: file.revision,
                path: file.path,
            }
            .to_string();
            for line_match in file.line_matches {
                for (start, length) in line_match.offsets_and_lengths {
                    locations.push(Location {
                        uri: uri.clone(),
                        line: line_match.line_number,
                        start,
                        length,
                    });
                }
            }
        }
        locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_query_matches_both_quote_styles() {
        let query = SearchQuery::for_literal("over", None);
        assert_eq!(query.query, r#"(\"over\"|'over')"#);
        assert_eq!(query.repo, None);
    }

    #[test]
    fn literal_query_appends_repo_filter() {
        let query = SearchQuery::for_literal("over", Some("github.com/acme/site"));
        assert_eq!(query.query, r#"(\"over\"|'over') r:github.com/acme/site"#);
        assert_eq!(query.repo.as_deref(), Some("github.com/acme/site"));
    }

    #[test]
    fn flattens_every_offset_into_a_location() {
        let results = SearchResults {
            results: vec![FileMatch {
                repository: "github.com/acme/site".to_string(),
                revision: "deadbeef".to_string(),
                path: "src/app.ts".to_string(),
                line_matches: vec![
                    LineMatch {
                        line_number: 3,
                        offsets_and_lengths: vec![(4, 6), (18, 6)],
                    },
                    LineMatch {
                        line_number: 9,
                        offsets_and_lengths: vec![(0, 6)],
                    },
                ],
            }],
        };

        let locations = results.into_locations();
        assert_eq!(locations.len(), 3);
        assert_eq!(locations[0].uri, "git://github.com/acme/site?deadbeef#src/app.ts");
        assert_eq!(locations[0].line, 3);
        assert_eq!(locations[0].start, 4);
        assert_eq!(locations[1].start, 18);
        assert_eq!(locations[2].line, 9);
        assert_eq!(locations[2].length, 6);
    }

    #[test]
    fn empty_results_flatten_to_nothing() {
        assert!(SearchResults::default().into_locations().is_empty());
    }
}
