// src/store/mod.rs
//! The content store — where source pages and their revisions live.
//!
//! The preload logic depends on the [`ContentStore`] capability only, never on
//! how a particular store reaches its pages. Three interpreters ship with the
//! crate: an in-memory map, a directory of page files, and a remote wiki
//! reached through its Action API.

pub mod api;
pub mod directory;
pub mod memory;

use crate::content::{Content, RevisionRecord};
use crate::error::AppError;
use crate::types::PageTitle;
use async_trait::async_trait;

/// Read access to the host wiki's pages.
///
/// # Laws
///
/// - **L1 (Existence)**: `latest_revision(t)` is `Some` only if `page_exists(t)`.
/// - **L2 (Read-only)**: no operation changes what a later call observes.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Whether a page with this title has been created.
    async fn page_exists(&self, title: &PageTitle) -> Result<bool, AppError>;

    /// The current revision of the page, `None` if the page does not exist.
    async fn latest_revision(&self, title: &PageTitle)
        -> Result<Option<RevisionRecord>, AppError>;
}

/// Convenience reads built from the [`ContentStore`] operations.
#[async_trait]
pub trait ContentStoreExt: ContentStore {
    /// Text of the main slot of the current revision.
    ///
    /// A main slot holding non-textual content, or a revision without a main
    /// slot, reads as the empty string. `None` means there is no revision.
    async fn latest_main_text(&self, title: &PageTitle) -> Result<Option<String>, AppError> {
        let revision = match self.latest_revision(title).await? {
            Some(revision) => revision,
            None => return Ok(None),
        };

        let text = match revision.main() {
            Some(Content::Text { text, .. }) => text.clone(),
            Some(Content::NonText { model }) => {
                log::debug!(
                    "Main slot of '{}' holds non-textual content ({}), reading as empty",
                    title,
                    model
                );
                String::new()
            }
            None => String::new(),
        };
        Ok(Some(text))
    }
}

impl<T: ContentStore + ?Sized> ContentStoreExt for T {}

pub use api::WikiApiStore;
pub use directory::DirectoryStore;
pub use memory::InMemoryStore;
