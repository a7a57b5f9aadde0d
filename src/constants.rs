// src/constants.rs
//! Domain constants that define the operational boundaries of the preloader.
//!
//! Each constant is named for the wiki concept it constrains. Reading these
//! tells you how titles are validated, which slot is read, and how patient
//! the remote store is.

// ---------------------------------------------------------------------------
// Transclusion markup
// ---------------------------------------------------------------------------

/// Matches both `<includeonly>` and `</includeonly>` anywhere in the text.
pub const INCLUDEONLY_PATTERN: &str = r"(?s)</?includeonly>";

/// Matches from the first `<noinclude>` to the last `</noinclude>`.
///
/// The match is a single greedy span, so text sitting between two
/// `noinclude` blocks is removed along with them.
pub const NOINCLUDE_PATTERN: &str = r"(?s)<noinclude>.*</noinclude>";

/// Characters stripped from both ends of the text after each removal pass.
///
/// This is the PHP `trim()` set, not Unicode whitespace: a leading
/// non-breaking space survives.
pub const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

/// Maximum length of a page title in bytes (UTF-8).
pub const TITLE_MAX_BYTES: usize = 255;

/// Characters that can never appear in a page title.
pub const TITLE_ILLEGAL_CHARS: &[char] = &['#', '<', '>', '[', ']', '|', '{', '}'];

// ---------------------------------------------------------------------------
// Revision slots
// ---------------------------------------------------------------------------

/// Role name of the primary content slot of every revision.
pub const MAIN_SLOT: &str = "main";

// ---------------------------------------------------------------------------
// Remote store
// ---------------------------------------------------------------------------

/// How many times a read against a remote wiki is attempted.
pub const WIKI_API_MAX_ATTEMPTS: u32 = 3;

/// First backoff delay between remote read attempts, in milliseconds.
pub const WIKI_API_INITIAL_BACKOFF_MS: u64 = 250;

/// Ceiling for the backoff delay, in milliseconds.
pub const WIKI_API_MAX_BACKOFF_MS: u64 = 2_000;

/// Per-request timeout for remote reads, in seconds.
pub const WIKI_API_TIMEOUT_SECS: u64 = 15;

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
