use thiserror::Error;

mod namespace;
mod title;

pub use namespace::*;
pub use title::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Page title is empty")]
    EmptyTitle,

    #[error("Page title {title:?} contains illegal character {ch:?}")]
    IllegalCharacter { title: String, ch: char },

    #[error("Page title {title:?} is {bytes} bytes, the limit is {max}")]
    TitleTooLong {
        title: String,
        bytes: usize,
        max: usize,
    },

    #[error("Page title {0:?} is a relative path")]
    RelativePath(String),

    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("Invalid source entry {entry:?} - {reason}")]
    InvalidSourceEntry { entry: String, reason: String },
}
