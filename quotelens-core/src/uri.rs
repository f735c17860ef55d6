//! Document URI decomposition
//!
//! Document URIs have the fixed shape `git://repo?revision#path`. The
//! repo component scopes searches when the backend is not a private
//! instance; revision and path are carried through untouched.

use crate::error::QuotelensError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUri {
    pub repo: String,
    pub revision: String,
    pub path: String,
}

impl DocumentUri {
    /// Parse `git://repo?revision#path`, failing with a format error
    /// when the scheme prefix or either separator is missing.
    pub fn parse(uri: &str) -> crate::Result<Self> {
        let malformed = || QuotelensError::UriFormat(uri.to_string());

        let rest = uri.strip_prefix("git://").ok_or_else(malformed)?;
        let (repo, rev_path) = rest.split_once('?').ok_or_else(malformed)?;
        let (revision, path) = rev_path.split_once('#').ok_or_else(malformed)?;

        Ok(Self {
            repo: repo.to_string(),
            revision: revision.to_string(),
            path: path.to_string(),
        })
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git://{}?{}#{}", self.repo, self.revision, self.path)
    }
}

impl FromStr for DocumentUri {
    type Err = QuotelensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
