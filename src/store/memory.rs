// src/store/memory.rs
//! A content store held entirely in memory.

use super::ContentStore;
use crate::content::{Content, RevisionRecord};
use crate::error::AppError;
use crate::types::{PageTitle, ValidationError};
use async_trait::async_trait;
use std::collections::HashMap;

/// Pages and their revision history, oldest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pages: HashMap<PageTitle, Vec<RevisionRecord>>,
    next_revision_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a new revision with `content` in its main slot.
    pub fn with_page(mut self, title: PageTitle, content: Content) -> Self {
        self.save(title, content);
        self
    }

    /// Saves a new wikitext revision under a page name that still needs resolving.
    pub fn with_text_page(
        self,
        name: &str,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = PageTitle::parse(name)?;
        Ok(self.with_page(title, Content::wikitext(text)))
    }

    /// Appends a fully built revision to the page's history.
    pub fn with_revision(mut self, title: PageTitle, revision: RevisionRecord) -> Self {
        self.next_revision_id = self.next_revision_id.max(revision.id);
        self.pages.entry(title).or_default().push(revision);
        self
    }

    /// Saves a new revision and returns its id.
    pub fn save(&mut self, title: PageTitle, content: Content) -> u64 {
        self.next_revision_id += 1;
        let id = self.next_revision_id;
        self.pages
            .entry(title)
            .or_default()
            .push(RevisionRecord::with_main(id, content));
        id
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn page_exists(&self, title: &PageTitle) -> Result<bool, AppError> {
        Ok(self
            .pages
            .get(title)
            .is_some_and(|history| !history.is_empty()))
    }

    async fn latest_revision(
        &self,
        title: &PageTitle,
    ) -> Result<Option<RevisionRecord>, AppError> {
        Ok(self
            .pages
            .get(title)
            .and_then(|history| history.last())
            .cloned())
    }
}
