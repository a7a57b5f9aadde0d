// src/hook.rs
//! The edit-form hook: how the host asks for preload text.

use crate::preload::PreloadTextResolver;
use crate::types::Namespace;
use async_trait::async_trait;

/// What the host should do after a hook handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Carry on with the remaining handlers and show the form.
    Continue,
}

/// Called while the host prepares the edit form of a page that does not
/// exist yet.
///
/// Handlers may overwrite `text` or leave it alone. They always return
/// [`HookOutcome::Continue`]: a handler never aborts the host's flow, even
/// when its own work failed.
#[async_trait]
pub trait EditFormPreloadTextHook: Send + Sync {
    async fn on_edit_form_preload_text(&self, text: &mut String, namespace: Namespace)
        -> HookOutcome;
}

#[async_trait]
impl EditFormPreloadTextHook for PreloadTextResolver {
    async fn on_edit_form_preload_text(
        &self,
        text: &mut String,
        namespace: Namespace,
    ) -> HookOutcome {
        self.resolve_preload_text(namespace).await.apply(text);
        HookOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamespaceSourceMap;
    use crate::store::InMemoryStore;
    use std::sync::Arc;

    fn preloader() -> PreloadTextResolver {
        let store = InMemoryStore::new()
            .with_text_page(
                "Project:PreloadTemplate",
                "<includeonly>Hello</includeonly>\n<noinclude>ignore</noinclude>",
            )
            .unwrap()
            .with_text_page("Project:Docs only", "<noinclude>{{Documentation}}</noinclude>")
            .unwrap();
        let sources = NamespaceSourceMap::new()
            .with_source(Namespace::USER, "Project:PreloadTemplate")
            .with_source(Namespace::HELP, "Project:Missing")
            .with_source(Namespace::TEMPLATE, "Project:Docs only");
        PreloadTextResolver::new(sources, Arc::new(store))
    }

    #[tokio::test]
    async fn replaces_proposed_text_from_source() {
        let mut text = "proposed".to_string();
        let outcome = preloader()
            .on_edit_form_preload_text(&mut text, Namespace::USER)
            .await;
        assert_eq!(outcome, HookOutcome::Continue);
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn leaves_text_alone_otherwise() {
        let hook = preloader();
        for namespace in [Namespace::MAIN, Namespace::HELP, Namespace::TEMPLATE] {
            let mut text = "proposed".to_string();
            let outcome = hook.on_edit_form_preload_text(&mut text, namespace).await;
            assert_eq!(outcome, HookOutcome::Continue);
            assert_eq!(text, "proposed", "namespace {}", namespace);
        }
    }
}
