// src/content.rs
//! Revision content as the content store hands it back.

use crate::constants::MAIN_SLOT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The kind of data a slot holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentModel {
    Wikitext,
    Text,
    Css,
    JavaScript,
    Json,
    /// Anything structured or binary: flow boards, data maps, media.
    Other(String),
}

impl ContentModel {
    /// Textual models carry their content as a plain string.
    pub fn is_textual(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Wikitext => "wikitext",
            Self::Text => "text",
            Self::Css => "css",
            Self::JavaScript => "javascript",
            Self::Json => "json",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ContentModel {
    fn from(name: &str) -> Self {
        match name {
            "wikitext" => Self::Wikitext,
            "text" => Self::Text,
            "css" | "sanitized-css" => Self::Css,
            "javascript" => Self::JavaScript,
            "json" => Self::Json,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ContentModel {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ContentModel> for String {
    fn from(model: ContentModel) -> Self {
        model.as_str().to_string()
    }
}

impl fmt::Display for ContentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text { model: ContentModel, text: String },
    NonText { model: ContentModel },
}

impl Content {
    /// Builds content of the given model; textual models keep `body`,
    /// others discard it.
    pub fn new(model: ContentModel, body: impl Into<String>) -> Self {
        if model.is_textual() {
            Self::Text {
                model,
                text: body.into(),
            }
        } else {
            Self::NonText { model }
        }
    }

    pub fn wikitext(text: impl Into<String>) -> Self {
        Self::Text {
            model: ContentModel::Wikitext,
            text: text.into(),
        }
    }

    pub fn model(&self) -> &ContentModel {
        match self {
            Self::Text { model, .. } | Self::NonText { model } => model,
        }
    }

    /// The text of a textual slot, `None` for any other kind.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::NonText { .. } => None,
        }
    }
}

/// Which container of a revision a piece of content sits in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotRole {
    Main,
    Auxiliary(String),
}

impl From<&str> for SlotRole {
    fn from(role: &str) -> Self {
        if role == MAIN_SLOT {
            Self::Main
        } else {
            Self::Auxiliary(role.to_string())
        }
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str(MAIN_SLOT),
            Self::Auxiliary(role) => f.write_str(role),
        }
    }
}

/// One saved version of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRecord {
    pub id: u64,
    pub slots: BTreeMap<SlotRole, Content>,
}

impl RevisionRecord {
    /// A revision with only a main slot.
    pub fn with_main(id: u64, content: Content) -> Self {
        let mut slots = BTreeMap::new();
        slots.insert(SlotRole::Main, content);
        Self { id, slots }
    }

    pub fn with_slot(mut self, role: SlotRole, content: Content) -> Self {
        self.slots.insert(role, content);
        self
    }

    pub fn content(&self, role: &SlotRole) -> Option<&Content> {
        self.slots.get(role)
    }

    pub fn main(&self) -> Option<&Content> {
        self.content(&SlotRole::Main)
    }
}
