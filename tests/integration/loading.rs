//! Loading a corpus from disk and the checks that guard it.

use std::fs;
use std::sync::Arc;

use docket::{
    embedder_for, search_lexical, search_semantic, CorpusPaths, DocketError, FlatIndex,
    IndexFormatError, SearchConfig, SearchContext, VectorIndex,
};

use super::common::{agenda_corpus, make_snippet, test_config, test_embedder, write_corpus};

fn load(paths: &CorpusPaths) -> Result<SearchContext, DocketError> {
    SearchContext::load(paths, Arc::new(test_embedder()), test_config())
}

#[test]
fn test_load_and_search() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, snippets) = agenda_corpus();
    let paths = write_corpus(dir.path(), &docs, &snippets);

    let ctx = load(&paths).unwrap();
    assert_eq!(ctx.documents().len(), 3);
    assert_eq!(ctx.snippets().len(), 5);
    assert_eq!(ctx.index().len(), 5);

    assert_eq!(search_lexical(ctx.documents(), "playground").len(), 1);
    let semantic = search_semantic(&ctx, "playground", 10).unwrap();
    assert_eq!(semantic[0].source_path.as_deref(), Some("2024-01-09/item-1"));
}

#[test]
fn test_config_file_drives_embedder() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, snippets) = agenda_corpus();
    let paths = write_corpus(dir.path(), &docs, &snippets);

    let config_path = dir.path().join("docket.toml");
    fs::write(
        &config_path,
        format!("model_id = \"{}\"\ndefault_k = 5\n", test_config().model_id),
    )
    .unwrap();

    let config = SearchConfig::load(&config_path).unwrap();
    let embedder = embedder_for(&config.model_id).unwrap();
    let ctx = SearchContext::load(&paths, embedder, config).unwrap();
    assert_eq!(ctx.config().default_k, 5);
}

#[test]
fn test_snippet_table_edited_after_indexing() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, mut snippets) = agenda_corpus();
    let paths = write_corpus(dir.path(), &docs, &snippets);

    // Same row count, different content: only the fingerprint can tell.
    snippets.swap(0, 1);
    let lines: Vec<String> = snippets
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
    fs::write(&paths.snippets, lines.join("\n")).unwrap();

    assert!(matches!(
        load(&paths),
        Err(DocketError::FingerprintMismatch { .. })
    ));
}

#[test]
fn test_snippet_row_added_after_indexing() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, snippets) = agenda_corpus();
    let paths = write_corpus(dir.path(), &docs, &snippets);

    let mut extra = fs::read_to_string(&paths.snippets).unwrap();
    extra.push('\n');
    extra.push_str(&serde_json::to_string(&make_snippet("2024-09-09", "late item", "late")).unwrap());
    fs::write(&paths.snippets, extra).unwrap();

    assert!(matches!(
        load(&paths),
        Err(DocketError::RowCountMismatch { index_rows: 5, table_rows: 6 })
    ));
}

#[test]
fn test_truncated_index_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, snippets) = agenda_corpus();
    let paths = write_corpus(dir.path(), &docs, &snippets);

    let bytes = fs::read(&paths.index).unwrap();
    fs::write(&paths.index, &bytes[..bytes.len() / 2]).unwrap();

    assert!(matches!(load(&paths), Err(DocketError::IndexFormat(_))));
}

#[test]
fn test_corrupted_index_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, snippets) = agenda_corpus();
    let paths = write_corpus(dir.path(), &docs, &snippets);

    let mut bytes = fs::read(&paths.index).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x55;
    fs::write(&paths.index, &bytes).unwrap();

    assert!(matches!(
        load(&paths),
        Err(DocketError::IndexFormat(IndexFormatError::ChecksumMismatch { .. }))
    ));
}

#[test]
fn test_index_for_other_model_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, snippets) = agenda_corpus();
    let paths = write_corpus(dir.path(), &docs, &snippets);

    let rows: Vec<Vec<f32>> = (0..snippets.len()).map(|_| vec![0.0; 8]).collect();
    FlatIndex::from_rows("docket-hashing-8", 8, rows)
        .unwrap()
        .write_to(&paths.index)
        .unwrap();

    assert!(matches!(
        load(&paths),
        Err(DocketError::ModelMismatch { component: "index", .. })
    ));
}

#[test]
fn test_missing_documents_file() {
    let dir = tempfile::tempdir().unwrap();
    let (docs, snippets) = agenda_corpus();
    let mut paths = write_corpus(dir.path(), &docs, &snippets);
    paths.documents = dir.path().join("nope.json");

    assert!(matches!(load(&paths), Err(DocketError::Io { .. })));
}
