// src/preload.rs
//! Preload text resolution: namespace → source page → transformed text.
//!
//! When someone opens the edit form for a page that does not exist yet, the
//! wiki proposes starting text. For namespaces with a configured source page,
//! that page's current text replaces the proposal after transclusion-only
//! markup is stripped.

use crate::config::NamespaceSourceMap;
use crate::constants::{INCLUDEONLY_PATTERN, NOINCLUDE_PATTERN, TRIM_CHARS};
use crate::store::{ContentStore, ContentStoreExt};
use crate::types::{Namespace, PageTitle};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static INCLUDEONLY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(INCLUDEONLY_PATTERN).expect("includeonly pattern is a valid regex")
});

static NOINCLUDE_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(NOINCLUDE_PATTERN).expect("noinclude pattern is a valid regex")
});

/// Strips transclusion markup so template source reads as page source.
///
/// `<includeonly>` and `</includeonly>` tags are dropped (their contents
/// kept), then everything from the first `<noinclude>` to the last
/// `</noinclude>` is removed. Both steps trim the result.
pub fn transform(text: &str) -> String {
    let unwrapped = INCLUDEONLY_TAG.replace_all(text, "");
    let unwrapped = unwrapped.trim_matches(TRIM_CHARS);
    let stripped = NOINCLUDE_SPAN.replace_all(unwrapped, "");
    stripped.trim_matches(TRIM_CHARS).to_string()
}

/// What the edit form should start with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreloadDecision {
    /// Keep whatever text the host already proposed.
    UseDefault,
    /// Replace the proposed text with this.
    Replace(String),
}

impl PreloadDecision {
    /// Applies the decision to the host's proposed text.
    pub fn apply(self, proposed: &mut String) {
        if let Self::Replace(text) = self {
            *proposed = text;
        }
    }
}

/// Resolves the preload text for new pages from per-namespace source pages.
#[derive(Clone)]
pub struct PreloadTextResolver {
    sources: Arc<NamespaceSourceMap>,
    store: Arc<dyn ContentStore>,
}

impl PreloadTextResolver {
    pub fn new(sources: NamespaceSourceMap, store: Arc<dyn ContentStore>) -> Self {
        Self {
            sources: Arc::new(sources),
            store,
        }
    }

    pub fn sources(&self) -> &NamespaceSourceMap {
        &self.sources
    }

    /// The page configured as preload source for `namespace`, if any.
    pub fn resolve_source_page(&self, namespace: Namespace) -> Option<&str> {
        self.sources.source_for(namespace)
    }

    /// Reads the current text of `page` and transforms it.
    ///
    /// `None` when the name does not resolve to a title, the page does not
    /// exist, or the store cannot be read. A non-textual main slot yields
    /// `Some("")`.
    pub async fn fetch_and_transform(&self, page: &str) -> Option<String> {
        let title = match PageTitle::parse(page) {
            Ok(title) => title,
            Err(e) => {
                log::warn!("Preload source '{}' is not a valid title: {}", page, e);
                return None;
            }
        };

        match self.store.page_exists(&title).await {
            Ok(true) => {}
            Ok(false) => {
                log::debug!("Preload source '{}' does not exist", title);
                return None;
            }
            Err(e) => {
                log::warn!("Could not check whether '{}' exists: {}", title, e);
                return None;
            }
        }

        match self.store.latest_main_text(&title).await {
            Ok(Some(text)) => Some(transform(&text)),
            Ok(None) => {
                log::debug!("Preload source '{}' has no current revision", title);
                None
            }
            Err(e) => {
                log::warn!("Could not read preload source '{}': {}", title, e);
                None
            }
        }
    }

    /// Decides what a new page in `namespace` should be preloaded with.
    ///
    /// An empty transformed text is not worth substituting, so it also
    /// leaves the proposed text in place. Any other text replaces it,
    /// including `"0"`, which a PHP truthiness check would have skipped.
    pub async fn resolve_preload_text(&self, namespace: Namespace) -> PreloadDecision {
        let page = match self.resolve_source_page(namespace) {
            Some(page) => page,
            None => {
                log::debug!("No preload source configured for namespace {}", namespace);
                return PreloadDecision::UseDefault;
            }
        };

        match self.fetch_and_transform(page).await {
            Some(text) if !text.is_empty() => {
                log::info!(
                    "Preloading namespace {} from '{}' ({} bytes)",
                    namespace,
                    page,
                    text.len()
                );
                PreloadDecision::Replace(text)
            }
            Some(_) => {
                log::info!("Preload source '{}' is empty after transform", page);
                PreloadDecision::UseDefault
            }
            None => PreloadDecision::UseDefault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, ContentModel, RevisionRecord};
    use crate::error::AppError;
    use crate::store::InMemoryStore;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    #[test]
    fn transform_unwraps_includeonly() {
        assert_eq!(transform("  <includeonly>A</includeonly>  "), "A");
    }

    #[test]
    fn transform_drops_noinclude_block() {
        assert_eq!(transform("<noinclude>skip this</noinclude>KEEP"), "KEEP");
    }

    #[test]
    fn transform_noinclude_span_is_greedy() {
        assert_eq!(
            transform("a<noinclude>X</noinclude>b<noinclude>Y</noinclude>c"),
            "ac"
        );
    }

    #[test]
    fn transform_empty() {
        assert_eq!(transform(""), "");
        assert_eq!(transform(" \n\t "), "");
    }

    #[test]
    fn transform_spans_newlines() {
        let text = "<includeonly>\n{{Infobox\n| name = }}\n</includeonly>\n<noinclude>\nDocs\nmore docs\n</noinclude>\n";
        assert_eq!(transform(text), "{{Infobox\n| name = }}");
    }

    #[test]
    fn transform_is_case_sensitive() {
        assert_eq!(
            transform("<NOINCLUDE>x</NOINCLUDE><IncludeOnly>y"),
            "<NOINCLUDE>x</NOINCLUDE><IncludeOnly>y"
        );
    }

    #[test]
    fn transform_leaves_unmatched_noinclude() {
        assert_eq!(transform("keep <noinclude>open"), "keep <noinclude>open");
    }

    #[test]
    fn transform_trims_only_ascii_whitespace() {
        assert_eq!(transform("\u{a0}text\0"), "\u{a0}text");
    }

    #[test]
    fn transform_is_idempotent_on_clean_output() {
        for input in [
            "  <includeonly>A</includeonly>  ",
            "a<noinclude>X</noinclude>b<noinclude>Y</noinclude>c",
            "== Heading ==\n\nBody text\n",
            "",
        ] {
            let once = transform(input);
            assert_eq!(transform(&once), once);
        }
    }

    #[test]
    fn decision_apply() {
        let mut proposed = "default".to_string();
        PreloadDecision::UseDefault.apply(&mut proposed);
        assert_eq!(proposed, "default");
        PreloadDecision::Replace("new".to_string()).apply(&mut proposed);
        assert_eq!(proposed, "new");
    }

    fn resolver(store: InMemoryStore, sources: &[(i32, &str)]) -> PreloadTextResolver {
        let sources = sources
            .iter()
            .map(|(ns, page)| (Namespace::new(*ns), page.to_string()))
            .collect();
        PreloadTextResolver::new(sources, Arc::new(store))
    }

    #[tokio::test]
    async fn unconfigured_namespace_uses_default() {
        let resolver = resolver(InMemoryStore::new(), &[(2, "Project:PreloadTemplate")]);
        assert_eq!(resolver.resolve_source_page(Namespace::MAIN), None);
        assert_eq!(
            resolver.resolve_preload_text(Namespace::MAIN).await,
            PreloadDecision::UseDefault
        );
    }

    #[tokio::test]
    async fn missing_source_page_uses_default() {
        let resolver = resolver(InMemoryStore::new(), &[(2, "Project:PreloadTemplate")]);
        assert_eq!(
            resolver.resolve_source_page(Namespace::USER),
            Some("Project:PreloadTemplate")
        );
        assert_eq!(resolver.fetch_and_transform("Project:PreloadTemplate").await, None);
        assert_eq!(
            resolver.resolve_preload_text(Namespace::USER).await,
            PreloadDecision::UseDefault
        );
    }

    #[tokio::test]
    async fn unresolvable_source_name_is_absent() {
        let resolver = resolver(InMemoryStore::new(), &[(4, "")]);
        assert_eq!(resolver.fetch_and_transform("").await, None);
        assert_eq!(resolver.fetch_and_transform("Bad{{name}}").await, None);
        assert_eq!(
            resolver.resolve_preload_text(Namespace::PROJECT).await,
            PreloadDecision::UseDefault
        );
    }

    #[tokio::test]
    async fn configured_source_replaces_text() {
        let store = InMemoryStore::new()
            .with_text_page(
                "Project:PreloadTemplate",
                "<includeonly>Hello</includeonly>\n<noinclude>ignore</noinclude>",
            )
            .unwrap();
        let resolver = resolver(store, &[(2, "Project:PreloadTemplate")]);

        assert_eq!(
            resolver.resolve_preload_text(Namespace::new(2)).await,
            PreloadDecision::Replace("Hello".to_string())
        );
    }

    #[tokio::test]
    async fn non_textual_source_transforms_to_empty() {
        let store = InMemoryStore::new().with_page(
            PageTitle::parse("Project:Board").unwrap(),
            Content::new(ContentModel::from("flow-board"), ""),
        );
        let resolver = resolver(store, &[(0, "Project:Board")]);

        assert_eq!(
            resolver.fetch_and_transform("Project:Board").await,
            Some(String::new())
        );
        assert_eq!(
            resolver.resolve_preload_text(Namespace::MAIN).await,
            PreloadDecision::UseDefault
        );
    }

    #[tokio::test]
    async fn zero_text_still_replaces() {
        let store = InMemoryStore::new()
            .with_text_page("Template:Counter", "<includeonly>0</includeonly>")
            .unwrap();
        let resolver = resolver(store, &[(10, "Template:Counter")]);

        assert_eq!(
            resolver.resolve_preload_text(Namespace::TEMPLATE).await,
            PreloadDecision::Replace("0".to_string())
        );
    }

    struct BrokenStore;

    #[async_trait]
    impl ContentStore for BrokenStore {
        async fn page_exists(&self, _title: &PageTitle) -> Result<bool, AppError> {
            Ok(true)
        }

        async fn latest_revision(
            &self,
            _title: &PageTitle,
        ) -> Result<Option<RevisionRecord>, AppError> {
            Err(AppError::MalformedResponse("truncated body".to_string()))
        }
    }

    #[tokio::test]
    async fn store_failures_degrade_to_default() {
        let sources = [(Namespace::HELP, "Help:Preload".to_string())]
            .into_iter()
            .collect();
        let resolver = PreloadTextResolver::new(sources, Arc::new(BrokenStore));

        assert_eq!(resolver.fetch_and_transform("Help:Preload").await, None);
        assert_eq!(
            resolver.resolve_preload_text(Namespace::HELP).await,
            PreloadDecision::UseDefault
        );
    }
}
