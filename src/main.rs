// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use serde::Serialize;

use postsearch::build::{format_bytes, run_build};
use postsearch::{
    extract_snippet, format_display_date, highlight, load_through_cache, Document, Error,
    FileSource, FileStore, IndexCache, IndexSource, QueryEngine, SearchConfig, SearchHistory,
    SystemClock,
};

mod cli;
use cli::display::{self, BOX_WIDTH};
use cli::{init_logging, Cli, Commands};

/// Width available for wrapped snippet text inside a result row.
const SNIPPET_WIDTH: usize = BOX_WIDTH - 8;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", display::error_line(&e.to_string()));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => SearchConfig::from_path(path)?,
        None => SearchConfig::default(),
    };

    match cli.command {
        Commands::Build { input, output } => build(&input, &output),
        Commands::Search {
            file,
            query,
            limit,
            no_history,
            refresh,
            json,
        } => {
            let options = SearchOptions {
                limit,
                record_history: !no_history,
                refresh,
                json,
            };
            search(&config, &state_dir(cli.state_dir), &file, &query, options)
        }
        Commands::Inspect { file } => inspect(&config, &file),
        Commands::History { clear } => history(&config, &state_dir(cli.state_dir), clear),
    }
}

/// `--state-dir`, else the platform data dir, else `./.postsearch`.
fn state_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        directories::ProjectDirs::from("dev", "postsearch", "postsearch")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".postsearch"))
    })
}

fn open_store(dir: &Path) -> Result<FileStore, Error> {
    FileStore::open(dir).map_err(|e| Error::Fetch {
        location: dir.display().to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// BUILD
// ============================================================================

fn build(input: &Path, output: &Path) -> Result<(), Error> {
    let summary = run_build(input, output, Utc::now())?;
    eprintln!("  ✓ {}", output.display());
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} documents │ {} drafts skipped │ {}",
        summary.documents,
        summary.drafts_skipped,
        format_bytes(summary.bytes)
    );
    Ok(())
}

// ============================================================================
// SEARCH
// ============================================================================

struct SearchOptions {
    limit: usize,
    record_history: bool,
    refresh: bool,
    json: bool,
}

#[derive(Serialize)]
struct JsonHit<'a> {
    score: u64,
    #[serde(flatten)]
    document: &'a Document,
}

fn search(
    config: &SearchConfig,
    state_dir: &Path,
    file: &Path,
    query: &str,
    options: SearchOptions,
) -> Result<(), Error> {
    let source = FileSource::new(file);
    let cache = IndexCache::from_config(config);
    let mut store = open_store(state_dir)?;

    let (documents, from_cache) = if options.refresh {
        let documents = source.fetch()?;
        cache.scoped(&source.identity()).store(&mut store, &documents);
        (documents, false)
    } else {
        let loaded = load_through_cache(&source, &cache, &mut store)?;
        (loaded.documents, loaded.from_cache)
    };

    let engine = QueryEngine::from_config(documents, config);
    let history = SearchHistory::from_config(config);
    let hits = if options.record_history {
        engine.search_with_history(query, &mut store, &history, &SystemClock)
    } else {
        engine.search(query, &SystemClock)
    }?;

    let total = hits.len();
    let shown: Vec<(u64, &Document)> = hits
        .iter()
        .take(options.limit)
        .filter_map(|hit| Some((hit.score, engine.document(hit.position)?)))
        .collect();

    if options.json {
        let out: Vec<JsonHit> = shown
            .iter()
            .map(|&(score, document)| JsonHit { score, document })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let query = query.trim();
    display::section_top("SEARCH");
    display::row(&format!(
        " \"{}\" │ {} result{} │ {} documents {}",
        query,
        total,
        if total == 1 { "" } else { "s" },
        engine.documents().len(),
        display::cache_badge(from_cache)
    ));

    if shown.is_empty() {
        display::section_mid("RESULTS");
        display::row(&format!(" No results found for \"{}\"", query));
        display::section_bot();
        return Ok(());
    }

    display::section_mid("RESULTS");
    for (rank, (score, doc)) in shown.iter().enumerate() {
        if rank > 0 {
            display::row("");
        }
        let title = display::segments(&highlight(&doc.title, query));
        display::row(&format!(
            " {:>2}. {} {}",
            rank + 1,
            title,
            display::score_value(*score)
        ));
        display::row(&format!(
            "     {} · {}",
            format_display_date(&doc.date),
            display::themed(display::BLUE, &[], &doc.url)
        ));
        if !doc.tags.is_empty() {
            display::row(&format!("     {}", display::tag_list(&doc.tags)));
        }
        let snippet = extract_snippet(&doc.content, query, config.snippet_length, config.snippet_lead);
        for line in display::wrap(&snippet, SNIPPET_WIDTH) {
            display::row(&format!("     {}", display::segments(&highlight(&line, query))));
        }
    }
    if total > shown.len() {
        display::row("");
        display::row(&format!(" … {} more (use --limit)", total - shown.len()));
    }
    display::section_bot();
    Ok(())
}

// ============================================================================
// INSPECT
// ============================================================================

fn inspect(config: &SearchConfig, file: &Path) -> Result<(), Error> {
    let documents = FileSource::new(file).fetch()?;
    let newest = documents.first().map(|d| format_display_date(&d.date));
    let oldest = documents.last().map(|d| format_display_date(&d.date));
    let engine = QueryEngine::from_config(documents, config);
    let index = engine.index();

    display::section_top("INDEX");
    display::row(&format!(" file      {}", file.display()));
    display::row(&format!(" version   {}", config.index_version));
    display::section_mid("CONTENTS");
    display::row(&format!(" documents {}", index.doc_count()));
    display::row(&format!(" tokens    {}", index.token_count()));
    display::row(&format!(" postings  {}", index.posting_count()));
    if let (Some(newest), Some(oldest)) = (newest, oldest) {
        display::row(&format!(" newest    {}", newest));
        display::row(&format!(" oldest    {}", oldest));
    }
    display::section_mid("RECENT POSTS");
    for doc in engine.recent(config.recent_posts) {
        display::row(&format!(" {}  {}", doc.title, display::themed(display::GRAY, &[], &doc.url)));
    }
    display::section_bot();
    Ok(())
}

// ============================================================================
// HISTORY
// ============================================================================

fn history(config: &SearchConfig, state_dir: &Path, clear: bool) -> Result<(), Error> {
    let mut store = open_store(state_dir)?;
    let history = SearchHistory::from_config(config);

    if clear {
        history.clear(&mut store);
        eprintln!("✅ Search history cleared");
        return Ok(());
    }

    let entries = history.entries(&store);
    display::section_top("RECENT SEARCHES");
    if entries.is_empty() {
        display::row(" (none)");
    }
    for (i, entry) in entries.iter().enumerate() {
        display::row(&format!(" {:>2}. {}", i + 1, entry));
    }
    display::section_bot();
    Ok(())
}
