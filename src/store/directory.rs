// src/store/directory.rs
//! A content store backed by a directory of page files.
//!
//! Each page is one file named after the title's storage key, with `/`
//! escaped as `%2F` (and `%` as `%25`). A file matches only when its name is
//! the stem itself or the stem plus one of [`PAGE_EXTENSIONS`], tried in that
//! order, so dots inside a title never read as an extension. No extension or
//! `.wiki` is wikitext; `.txt`, `.css`, `.js` and `.json` are the other textual
//! models; `.bin` is non-textual and never read.

use super::ContentStore;
use crate::content::{Content, ContentModel, RevisionRecord};
use crate::error::AppError;
use crate::types::PageTitle;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Extensions a page file may carry, in lookup priority after the bare stem.
pub const PAGE_EXTENSIONS: &[&str] = &["wiki", "txt", "css", "js", "json", "bin"];

/// Pages stored as files under one directory, each file holding the current text.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens a store over an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AppError::InvalidConfiguration {
                origin: root.display().to_string(),
                reason: "pages directory does not exist".to_string(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File stem a title is stored under.
    pub fn file_stem(title: &PageTitle) -> String {
        title.db_key().replace('%', "%25").replace('/', "%2F")
    }

    /// Finds the file holding the page and the model its name implies.
    async fn locate(
        &self,
        title: &PageTitle,
    ) -> Result<Option<(PathBuf, ContentModel)>, AppError> {
        let stem = Self::file_stem(title);
        let candidates =
            std::iter::once(None).chain(PAGE_EXTENSIONS.iter().map(|ext| Some(*ext)));
        for extension in candidates {
            let name = match extension {
                Some(ext) => format!("{}.{}", stem, ext),
                None => stem.clone(),
            };
            let path = self.root.join(name);
            match tokio::fs::metadata(&path).await {
                Ok(metadata) if metadata.is_file() => {
                    return Ok(Some((path, model_for(extension))));
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }
}

/// Content model implied by a page file's extension.
fn model_for(extension: Option<&str>) -> ContentModel {
    match extension {
        None | Some("wiki") => ContentModel::Wikitext,
        Some("txt") => ContentModel::Text,
        Some("css") => ContentModel::Css,
        Some("js") => ContentModel::JavaScript,
        Some("json") => ContentModel::Json,
        Some(other) => ContentModel::Other(other.to_string()),
    }
}

#[async_trait]
impl ContentStore for DirectoryStore {
    async fn page_exists(&self, title: &PageTitle) -> Result<bool, AppError> {
        Ok(self.locate(title).await?.is_some())
    }

    async fn latest_revision(
        &self,
        title: &PageTitle,
    ) -> Result<Option<RevisionRecord>, AppError> {
        let (path, model) = match self.locate(title).await? {
            Some(found) => found,
            None => return Ok(None),
        };
        log::debug!("Reading '{}' from {}", title, path.display());

        let metadata = tokio::fs::metadata(&path).await?;
        let revision_id = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let content = if model.is_textual() {
            Content::new(model, tokio::fs::read_to_string(&path).await?)
        } else {
            Content::NonText { model }
        };

        Ok(Some(RevisionRecord::with_main(revision_id, content)))
    }
}
