// src/types/title.rs
//! Title resolution: turning a configured page name into a canonical title.

use super::{Namespace, ValidationError};
use crate::constants::{TITLE_ILLEGAL_CHARS, TITLE_MAX_BYTES};
use std::fmt;

/// A resolved page title in display form (`Project:Preload template`).
///
/// Two names that refer to the same page resolve to equal titles, so
/// `PageTitle` is the key every content store indexes by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageTitle(String);

impl PageTitle {
    /// Resolves a page name the way the wiki does when it builds a title
    /// from user text.
    ///
    /// Underscores read as spaces, whitespace runs collapse and one leading
    /// colon is dropped. A prefix naming a known namespace takes its
    /// canonical spelling and the page part after it is trimmed and
    /// upper-cased; any other colon is part of the page name, and only the
    /// first letter of the whole name is upper-cased.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if let Some(ch) = input.chars().find(|c| c.is_control() && !c.is_whitespace()) {
            return Err(ValidationError::IllegalCharacter {
                title: input.to_string(),
                ch,
            });
        }

        let spaced = input.replace('_', " ");
        let mut text = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some(rest) = text.strip_prefix(':') {
            text = rest.trim_start().to_string();
        }

        if text.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(ch) = text.chars().find(|c| TITLE_ILLEGAL_CHARS.contains(c)) {
            return Err(ValidationError::IllegalCharacter { title: text, ch });
        }
        if is_relative_path(&text) {
            return Err(ValidationError::RelativePath(text));
        }

        let namespaced = text.split_once(':').and_then(|(prefix, page)| {
            let name = Namespace::from_prefix(prefix)?.canonical_name()?;
            Some((name, page.trim()))
        });
        let canonical = match namespaced {
            Some((_, "")) => return Err(ValidationError::EmptyTitle),
            Some((name, page)) => format!("{}:{}", name, capitalize(page)),
            None => capitalize(&text),
        };

        if canonical.len() > TITLE_MAX_BYTES {
            return Err(ValidationError::TitleTooLong {
                bytes: canonical.len(),
                title: canonical,
                max: TITLE_MAX_BYTES,
            });
        }

        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The underscore form used in URLs and storage keys.
    pub fn db_key(&self) -> String {
        self.0.replace(' ', "_")
    }
}

impl fmt::Display for PageTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_relative_path(text: &str) -> bool {
    text == "."
        || text == ".."
        || text.starts_with("./")
        || text.starts_with("../")
        || text.contains("/./")
        || text.contains("/../")
        || text.ends_with("/.")
        || text.ends_with("/..")
}
