// src/types/namespace.rs
//! Integer-keyed partitions of the wiki's page space.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A namespace number as the host wiki assigns it.
///
/// Negative numbers are virtual namespaces (`Special:`, `Media:`). Titles
/// carry the namespace as a name prefix; see [`Namespace::from_prefix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(i32);

impl Namespace {
    pub const MEDIA: Namespace = Namespace(-2);
    pub const SPECIAL: Namespace = Namespace(-1);
    pub const MAIN: Namespace = Namespace(0);
    pub const TALK: Namespace = Namespace(1);
    pub const USER: Namespace = Namespace(2);
    pub const USER_TALK: Namespace = Namespace(3);
    pub const PROJECT: Namespace = Namespace(4);
    pub const PROJECT_TALK: Namespace = Namespace(5);
    pub const FILE: Namespace = Namespace(6);
    pub const TEMPLATE: Namespace = Namespace(10);
    pub const HELP: Namespace = Namespace(12);
    pub const CATEGORY: Namespace = Namespace(14);

    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> i32 {
        self.0
    }

    /// Canonical prefix of this namespace, `None` for the main namespace
    /// and for numbers the table does not know.
    pub fn canonical_name(self) -> Option<&'static str> {
        CANONICAL_NAMES
            .iter()
            .find(|(ns, _)| *ns == self)
            .map(|(_, name)| *name)
    }

    /// Looks up a title prefix, ignoring ASCII case and treating `_` as a space.
    ///
    /// Site-specific names (the project's own name, extension namespaces) are
    /// not known and resolve to `None`.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let prefix = prefix.replace('_', " ");
        CANONICAL_NAMES
            .iter()
            .chain(NAME_ALIASES)
            .find(|(_, name)| name.eq_ignore_ascii_case(prefix.trim()))
            .map(|(ns, _)| *ns)
    }
}

/// Canonical namespace names shipped with every wiki.
const CANONICAL_NAMES: &[(Namespace, &str)] = &[
    (Namespace::MEDIA, "Media"),
    (Namespace::SPECIAL, "Special"),
    (Namespace::TALK, "Talk"),
    (Namespace::USER, "User"),
    (Namespace::USER_TALK, "User talk"),
    (Namespace::PROJECT, "Project"),
    (Namespace::PROJECT_TALK, "Project talk"),
    (Namespace::FILE, "File"),
    (Namespace(7), "File talk"),
    (Namespace(8), "MediaWiki"),
    (Namespace(9), "MediaWiki talk"),
    (Namespace::TEMPLATE, "Template"),
    (Namespace(11), "Template talk"),
    (Namespace::HELP, "Help"),
    (Namespace(13), "Help talk"),
    (Namespace::CATEGORY, "Category"),
    (Namespace(15), "Category talk"),
];

/// Legacy prefixes that still resolve to a canonical namespace.
const NAME_ALIASES: &[(Namespace, &str)] = &[
    (Namespace::FILE, "Image"),
    (Namespace(7), "Image talk"),
];

impl From<i32> for Namespace {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl FromStr for Namespace {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|e| ValidationError::InvalidNamespace(format!("{:?}: {}", s, e)))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
