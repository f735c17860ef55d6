//! Shared code-intel runtime for the service and the CLI
//!
//! `CodeIntel` owns the entity configuration, the backend client, and
//! the search cache, so callers get one matching path instead of
//! near-duplicate per-category plumbing. Hover is local-only; the
//! occurrence operations are the only ones that talk to the backend.

use crate::cache::SearchCache;
use crate::search_client::SearchClient;
use quotelens_core::{
    entity_at, hover_at, interpolate, string_at, DocumentUri, EntitiesConfig, EntityDefinition,
    EntityMatch, Hover, LiteralMatch, Location, PatternKind, Position, QuotelensError, SearchQuery,
};
use tokio::sync::OnceCell;

pub struct CodeIntel {
    entities: EntitiesConfig,
    client: SearchClient,
    cache: SearchCache,
    /// Instance privacy, fetched once per runtime.
    instance_private: OnceCell<bool>,
}

/// Build one search query per non-empty template of the matched
/// entity's category, groups interpolated, in template order.
pub fn queries_for(
    found: &EntityMatch<'_>,
    kind: PatternKind,
    repo: Option<&str>,
) -> Vec<SearchQuery> {
    found
        .entity
        .patterns(kind)
        .iter()
        .filter(|p| !p.search.is_empty())
        .map(|p| {
            let mut query = interpolate(&p.search, &found.groups);
            if let Some(repo) = repo {
                query.push_str(&format!(" r:{}", repo));
            }
            SearchQuery::new(query, repo.map(str::to_string))
        })
        .collect()
}

impl CodeIntel {
    pub fn new(entities: EntitiesConfig, client: SearchClient) -> Self {
        Self {
            entities,
            client,
            cache: SearchCache::default(),
            instance_private: OnceCell::new(),
        }
    }

    pub fn entities(&self) -> &[EntityDefinition] {
        &self.entities.entities
    }

    pub fn backend_url(&self) -> &str {
        self.client.base_url()
    }

    /// Hover content for whatever sits under the cursor. Local text
    /// only; never touches the backend.
    pub fn hover(&self, text: &str, position: Position) -> Result<Option<Hover>, QuotelensError> {
        hover_at(self.entities(), text, position)
    }

    /// The string literal under the cursor, if any.
    pub fn literal_at(&self, text: &str, position: Position) -> Option<LiteralMatch> {
        string_at(text, position)
    }

    /// Repository filter for a search: none on a private instance
    /// (searches run across all repositories there), otherwise the repo
    /// component of the document's URI.
    async fn repo_scope(&self, uri: Option<&str>) -> Result<Option<String>, QuotelensError> {
        let private = self
            .instance_private
            .get_or_try_init(|| self.client.is_private())
            .await?;
        if *private {
            return Ok(None);
        }
        match uri {
            Some(uri) => Ok(Some(DocumentUri::parse(uri)?.repo)),
            None => Ok(None),
        }
    }

    /// Search occurrences of the string literal under the cursor.
    pub async fn literal_references(
        &self,
        uri: Option<&str>,
        text: &str,
        position: Position,
    ) -> Result<Vec<Location>, QuotelensError> {
        let Some(literal) = string_at(text, position) else {
            return Ok(Vec::new());
        };
        let repo = self.repo_scope(uri).await?;
        let query = SearchQuery::for_literal(&literal.value, repo.as_deref());
        let locations = self
            .cache
            .get_or_fetch(&query, || self.client.search(&query))
            .await?;
        Ok(locations.as_ref().clone())
    }

    /// Search occurrences of the entity under the cursor in one pattern
    /// category. Every template's search runs concurrently; results are
    /// concatenated in template order.
    pub async fn occurrences(
        &self,
        kind: PatternKind,
        uri: Option<&str>,
        text: &str,
        position: Position,
    ) -> Result<Vec<Location>, QuotelensError> {
        let Some(found) = entity_at(self.entities(), text, position)? else {
            return Ok(Vec::new());
        };
        let repo = self.repo_scope(uri).await?;
        let queries = queries_for(&found, kind, repo.as_deref());

        let searches = queries
            .iter()
            .map(|query| self.cache.get_or_fetch(query, move || self.client.search(query)));
        let results = futures::future::try_join_all(searches).await?;

        Ok(results
            .into_iter()
            .flat_map(|locations| locations.as_ref().clone())
            .collect())
    }

    /// References surface: the matched entity's reference patterns when
    /// an entity is under the cursor, the quoted-literal search
    /// otherwise.
    pub async fn references(
        &self,
        uri: Option<&str>,
        text: &str,
        position: Position,
    ) -> Result<Vec<Location>, QuotelensError> {
        if entity_at(self.entities(), text, position)?.is_some() {
            return self
                .occurrences(PatternKind::Reference, uri, text, position)
                .await;
        }
        self.literal_references(uri, text, position).await
    }
}
