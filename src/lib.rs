// src/lib.rs
//! preloader library — fills the edit form of new wiki pages with the text
//! of a per-namespace source page.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `WikiErrorCode`, `ValidationError`
//! - **Configuration** — `NamespaceSourceMap`, `PreloaderConfig`
//! - **Domain types** — `Namespace`, `PageTitle`, `Content`, `RevisionRecord`
//! - **Content stores** — `ContentStore`, `InMemoryStore`, `DirectoryStore`, `WikiApiStore`
//! - **Preloading** — `transform`, `PreloadTextResolver`, `PreloadDecision`
//! - **Host hook** — `EditFormPreloadTextHook`, `HookOutcome`

pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod error_recovery;
pub mod hook;
pub mod preload;
pub mod store;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, WikiErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, NamespaceSourceMap, PreloaderConfig, StoreLocation};

// --- Domain Types ---
pub use crate::content::{Content, ContentModel, RevisionRecord, SlotRole};
pub use crate::types::{Namespace, PageTitle};

// --- Content Stores ---
pub use crate::store::{ContentStore, ContentStoreExt, DirectoryStore, InMemoryStore, WikiApiStore};

// --- Preloading ---
pub use crate::preload::{transform, PreloadDecision, PreloadTextResolver};

// --- Host Hook ---
pub use crate::hook::{EditFormPreloadTextHook, HookOutcome};
