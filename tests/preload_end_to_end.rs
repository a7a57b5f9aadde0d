//! End-to-end preloading through the public API.
//!
//! Exercises the full chain: namespace lookup, title resolution, store read,
//! markup stripping, and the edit-form hook contract.

use preloader::{
    transform, DirectoryStore, EditFormPreloadTextHook, HookOutcome, InMemoryStore, Namespace,
    NamespaceSourceMap, PreloadDecision, PreloadTextResolver,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const PRELOAD_TEMPLATE: &str = "<includeonly>Hello</includeonly>\n<noinclude>ignore</noinclude>";

#[tokio::test]
async fn user_namespace_preloads_from_project_page() {
    let store = InMemoryStore::new()
        .with_text_page("Project:PreloadTemplate", PRELOAD_TEMPLATE)
        .unwrap();
    let sources =
        NamespaceSourceMap::new().with_source(Namespace::new(2), "Project:PreloadTemplate");
    let resolver = PreloadTextResolver::new(sources, Arc::new(store));

    assert_eq!(
        resolver.resolve_preload_text(Namespace::new(2)).await,
        PreloadDecision::Replace("Hello".to_string())
    );
}

#[tokio::test]
async fn pages_directory_feeds_the_hook() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("Template:Article_skeleton.wiki"),
        "<noinclude>\nThis template preloads new articles. Do not subst.\n</noinclude>\n\
         <includeonly>{{Short description|}}\n\n'''Subject''' is</includeonly>\n",
    )
    .unwrap();
    let store = DirectoryStore::open(dir.path()).unwrap();
    let sources = NamespaceSourceMap::from_json_str(
        r#"{"0": "Template:Article skeleton", "2": "Template:No such page"}"#,
        "inline",
    )
    .unwrap();
    let resolver = PreloadTextResolver::new(sources, Arc::new(store));

    let mut article = String::new();
    let outcome = resolver
        .on_edit_form_preload_text(&mut article, Namespace::MAIN)
        .await;
    assert_eq!(outcome, HookOutcome::Continue);
    insta::assert_snapshot!(article, @r"
    {{Short description|}}

    '''Subject''' is
    ");

    let mut user_page = "{{User page}}".to_string();
    let outcome = resolver
        .on_edit_form_preload_text(&mut user_page, Namespace::USER)
        .await;
    assert_eq!(outcome, HookOutcome::Continue);
    assert_eq!(user_page, "{{User page}}");
}

#[tokio::test]
async fn unconfigured_namespaces_never_touch_the_store() {
    let resolver =
        PreloadTextResolver::new(NamespaceSourceMap::new(), Arc::new(InMemoryStore::new()));
    for id in [-2, -1, 0, 1, 2, 4, 10, 14, 100, 2600] {
        let mut text = format!("proposed for {}", id);
        resolver
            .on_edit_form_preload_text(&mut text, Namespace::new(id))
            .await;
        assert_eq!(text, format!("proposed for {}", id));
    }
}

#[test]
fn greedy_noinclude_removal() {
    assert_eq!(
        transform("a<noinclude>X</noinclude>b<noinclude>Y</noinclude>c"),
        "ac"
    );
}
