use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use docket::index::format::{self, IndexFooter, IndexHeader};
use docket::{
    embedder_for, search_hybrid, search_lexical_with_context, search_semantic, CorpusPaths,
    DocumentStore, HybridResult, LexicalResult, SearchConfig, SearchContext, SemanticResult,
};

mod cli;
use cli::display::*;
use cli::{Cli, Commands, Mode};

/// Snippet text shown per result line.
const SNIPPET_WIDTH: usize = BOX_WIDTH - 4;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Search {
            query,
            mode,
            documents,
            snippets,
            index,
            config,
            k,
            json,
        } => run_search(SearchArgs {
            query,
            mode,
            documents,
            snippets,
            index,
            config,
            k,
            json,
        }),
        Commands::Inspect { file } => run_inspect(&file),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `DOCKET_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DOCKET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig, String> {
    match path {
        Some(path) => SearchConfig::load(path).map_err(|e| e.to_string()),
        None => Ok(SearchConfig::default()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

struct SearchArgs {
    query: String,
    mode: Mode,
    documents: PathBuf,
    snippets: Option<PathBuf>,
    index: Option<PathBuf>,
    config: Option<PathBuf>,
    k: Option<usize>,
    json: bool,
}

fn run_search(args: SearchArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let k = args.k.unwrap_or(config.default_k);

    match args.mode {
        Mode::Lexical => {
            let documents = DocumentStore::load(&args.documents).map_err(|e| e.to_string())?;
            let results =
                search_lexical_with_context(&documents, &args.query, config.context_lines);
            emit(&results, args.json, |r| print_lexical(&args.query, r))
        }
        Mode::Semantic => {
            let context = load_context(args.documents, args.snippets, args.index, config)?;
            let results = search_semantic(&context, &args.query, k).map_err(|e| e.to_string())?;
            let threshold = context.config().distance_threshold;
            emit(&results, args.json, |r| print_semantic(&args.query, r, threshold))
        }
        Mode::Hybrid => {
            let context = load_context(args.documents, args.snippets, args.index, config)?;
            let results = search_hybrid(&context, &args.query, k).map_err(|e| e.to_string())?;
            emit(&results, args.json, |r| print_hybrid(&args.query, r))
        }
    }
}

fn load_context(
    documents: PathBuf,
    snippets: Option<PathBuf>,
    index: Option<PathBuf>,
    config: SearchConfig,
) -> Result<SearchContext, String> {
    let (Some(snippets), Some(index)) = (snippets, index) else {
        return Err("semantic and hybrid search need --snippets and --index".to_string());
    };
    let paths = CorpusPaths {
        documents,
        snippets,
        index,
    };
    let embedder = embedder_for(&config.model_id).map_err(|e| e.to_string())?;
    SearchContext::load(&paths, embedder, config).map_err(|e| e.to_string())
}

/// JSON to stdout, or the pretty printer.
fn emit<T: serde::Serialize>(
    results: &[T],
    json: bool,
    pretty: impl FnOnce(&[T]),
) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(results).map_err(|e| e.to_string())?;
        println!("{}", out);
    } else {
        pretty(results);
    }
    Ok(())
}

fn print_lexical(query: &str, results: &[LexicalResult]) {
    section_top(&format!("LEXICAL \"{}\"", query));
    if results.is_empty() {
        row(&themed(GRAY, &[DIM], " no matches"));
    }
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            section_mid(&result.document_id);
        } else {
            row(&format!(" {}", themed(BRIGHT_CYAN, &[BOLD], &result.document_id)));
        }
        for snippet in &result.snippets {
            row(&format!("  {}", truncate_visible(&html_to_terminal(snippet), SNIPPET_WIDTH)));
        }
    }
    section_bot();
}

fn print_semantic(query: &str, results: &[SemanticResult], threshold: f32) {
    section_top(&format!("SEMANTIC \"{}\"", query));
    if results.is_empty() {
        row(&themed(GRAY, &[DIM], " no matches"));
    }
    for result in results {
        row(&format!(
            " {} {} {} {}",
            distance_colored(result.distance, threshold),
            pad_right(&literal_badge(result.contains_query), 10),
            themed(BRIGHT_CYAN, &[BOLD], &result.document_id),
            themed(GRAY, &[], result.source_path.as_deref().unwrap_or("-")),
        ));
        row(&format!(
            "   {}",
            truncate_visible(&html_to_terminal(&result.snippet_html), SNIPPET_WIDTH - 2)
        ));
    }
    section_bot();
}

fn print_hybrid(query: &str, results: &[HybridResult]) {
    section_top(&format!("HYBRID \"{}\"", query));
    if results.is_empty() {
        row(&themed(GRAY, &[DIM], " no matches"));
    }
    for result in results {
        row(&format!(
            " {} {}  {} lexical, {} semantic",
            themed(YELLOW, &[], &format!("{:.4}", result.score)),
            themed(BRIGHT_CYAN, &[BOLD], &result.document_id),
            result.lexical_snippets.len(),
            result.semantic.len(),
        ));
        let first = result
            .lexical_snippets
            .first()
            .map(|s| html_to_terminal(s))
            .or_else(|| result.semantic.first().map(|s| html_to_terminal(&s.snippet_html)));
        if let Some(text) = first {
            row(&format!("   {}", truncate_visible(&text, SNIPPET_WIDTH - 2)));
        }
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn run_inspect(path: &Path) -> Result<(), String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let header = IndexHeader::read(&bytes).map_err(|e| e.to_string())?;
    let footer = IndexFooter::read(&bytes).map_err(|e| e.to_string())?;
    let content_len = bytes.len().saturating_sub(IndexFooter::SIZE);
    let computed = IndexFooter::compute_crc32(&bytes[..content_len]);

    let ok = |good: bool| {
        if good {
            themed(GREEN, &[BOLD], "ok")
        } else {
            themed(RED, &[BOLD], "MISMATCH")
        }
    };
    let field = |name: &str, value: String| {
        row(&format!(" {} {}", pad_right(&themed(GRAY, &[], name), 14), value));
    };

    section_top(&path.display().to_string());
    field("size", format_size(bytes.len()));
    field("version", header.version.to_string());
    field("dimension", header.dimension.to_string());
    field("rows", header.row_count.to_string());
    field(
        "fingerprint",
        header
            .fingerprint()
            .map(|f| format!("{:08x}", f))
            .unwrap_or_else(|| "-".to_string()),
    );

    section_mid("LAYOUT");
    let model_len = header.model_id_len as usize;
    let vectors_len = content_len.saturating_sub(IndexHeader::SIZE + model_len);
    field("header", format_size(IndexHeader::SIZE));
    field("model id", format_size(model_len));
    field("vectors", format_size(vectors_len));
    field("footer", format_size(IndexFooter::SIZE));

    section_mid("INTEGRITY");
    field(
        "crc32",
        format!("{:08x} {}", footer.crc32, ok(footer.crc32 == computed)),
    );
    match format::decode(&bytes) {
        Ok(decoded) => {
            field("model", decoded.model_id);
            field("decode", ok(true));
        }
        Err(e) => field("decode", format!("{} {}", ok(false), e)),
    }
    section_bot();
    Ok(())
}
