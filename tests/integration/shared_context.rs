//! Reload by publishing a whole new context while searches are running.

use std::sync::Arc;
use std::thread;

use docket::{search_lexical, search_semantic, SharedContext};

use super::common::{agenda_corpus, build_context, make_doc, make_snippet};

#[test]
fn test_readers_never_see_a_mixed_context() {
    let (docs, snippets) = agenda_corpus();
    let shared = Arc::new(SharedContext::new(build_context(docs, snippets).unwrap()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..50 {
                    let ctx = shared.snapshot();
                    assert_eq!(ctx.index().len(), ctx.snippets().len());
                    let results = search_semantic(&ctx, "liquor", 10).unwrap();
                    assert!(results.len() <= ctx.snippets().len());
                }
            })
        })
        .collect();

    for generation in 0..5 {
        let docs = vec![make_doc("2025-01-01", "Reloaded agenda")];
        let snippets: Vec<_> = (0..=generation)
            .map(|i| make_snippet("2025-01-01", "liquor permit", &format!("gen/{i}")))
            .collect();
        shared.publish(build_context(docs, snippets).unwrap());
    }

    for reader in readers {
        reader.join().unwrap();
    }

    let latest = shared.snapshot();
    assert_eq!(latest.snippets().len(), 5);
    assert_eq!(search_lexical(latest.documents(), "reloaded").len(), 1);
}

#[test]
fn test_snapshot_outlives_publish() {
    let (docs, snippets) = agenda_corpus();
    let shared = SharedContext::new(build_context(docs, snippets).unwrap());

    let old = shared.snapshot();
    shared.publish(build_context(vec![], vec![]).unwrap());

    // The old snapshot still answers from the old corpus.
    assert_eq!(search_lexical(old.documents(), "liquor").len(), 2);
    assert!(shared.snapshot().documents().is_empty());
}
