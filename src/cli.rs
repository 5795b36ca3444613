//! Command-line interface: `serve`, `search`, `tui` and `convert`.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zensearch_core::config::{Config, CorpusConfig};
use zensearch_core::{SearchEngine, SearchRequest, SearchResponse, SynonymTable};
use zensearch_corpus::watch::DEFAULT_DEBOUNCE;
use zensearch_corpus::{
    convert_csv, load_with_fallback, spawn_file_watcher, to_json, CorpusHandle, CorpusSource,
    Origin, WatchGuard,
};

use crate::server::{self, ApiState};

#[derive(Debug, Parser)]
#[command(name = "zensearch", version, about = "Search a meditation course catalog")]
pub struct Cli {
    /// Config file to use instead of ~/.config/zensearch/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logs. The TUI writes them to /tmp/zensearch-debug.log.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP search API.
    Serve(ServeArgs),
    /// Run one search and print the results.
    Search(SearchArgs),
    /// Interactive terminal search.
    Tui(CorpusArgs),
    /// Convert a course spreadsheet export (CSV) into corpus JSON.
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct CorpusArgs {
    /// Corpus JSON file, overriding `[corpus] path`.
    #[arg(long)]
    pub corpus: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overriding `[server] bind`.
    #[arg(long)]
    pub bind: Option<String>,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Fetch the corpus over plain HTTP instead of reading a file.
    #[arg(long)]
    pub url: Option<String>,

    /// Do not reload the corpus file when it changes.
    #[arg(long)]
    pub no_watch: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub query: String,

    /// Expand the query through the synonym table.
    #[arg(long)]
    pub semantic: bool,

    /// Only score whole-query matches.
    #[arg(long)]
    pub no_fuzzy: bool,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Print the raw response as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    pub csv: PathBuf,

    /// Write here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::Convert(args) = &cli.command {
        return convert(args);
    }

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let engine = build_engine(&config)?;

    match cli.command {
        Command::Serve(args) => {
            apply_corpus_args(&mut config.corpus, &args.corpus);
            if let Some(url) = args.url {
                config.corpus.url = Some(url);
            }
            if args.no_watch {
                config.corpus.watch = false;
            }
            if let Some(bind) = args.bind {
                config.server.bind = bind;
            }
            serve(config, engine).await
        }
        Command::Search(args) => {
            apply_corpus_args(&mut config.corpus, &args.corpus);
            search(&config, &engine, args).await
        }
        Command::Tui(args) => {
            apply_corpus_args(&mut config.corpus, &args);
            let (handle, _watch) = open_corpus(&config.corpus).await;
            tokio::task::block_in_place(|| zensearch_tui::run(&config, engine, Box::new(handle)))
        }
        Command::Convert(_) => Ok(()),
    }
}

fn apply_corpus_args(cfg: &mut CorpusConfig, args: &CorpusArgs) {
    if let Some(path) = &args.corpus {
        cfg.path = path.clone();
        cfg.url = None;
    }
}

/// The engine with the configured synonym table, or the built-in one.
pub fn build_engine(config: &Config) -> anyhow::Result<SearchEngine> {
    let table = match &config.synonyms.path {
        Some(path) => SynonymTable::load(path)
            .with_context(|| format!("loading synonyms from {}", path.display()))?,
        None => SynonymTable::builtin(),
    };
    tracing::debug!(concepts = table.len(), "synonym table ready");
    Ok(SearchEngine::new(Arc::new(table)))
}

/// Load the configured corpus into a handle and start watching it.
///
/// Never fails: without a corpus the handle reports the load error to every
/// search until a reload succeeds.
pub async fn open_corpus(cfg: &CorpusConfig) -> (CorpusHandle, Option<WatchGuard>) {
    let source = CorpusSource::from_config(cfg);
    let handle = match load_with_fallback(&source, cfg.fallback_to_sample).await {
        Ok(loaded) => {
            if loaded.origin == Origin::Sample {
                tracing::warn!(source = %source, "serving the built-in sample catalog");
            }
            CorpusHandle::from_corpus(loaded.corpus)
        }
        Err(err) => {
            tracing::error!(source = %source, error = %err, "corpus unavailable");
            CorpusHandle::unavailable(err.into())
        }
    };

    let guard = match source.watch_path() {
        Some(path) if cfg.watch => match spawn_file_watcher(path, handle.clone(), DEFAULT_DEBOUNCE) {
            Ok(guard) => Some(guard),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "corpus file not watched");
                None
            }
        },
        _ => None,
    };
    (handle, guard)
}

async fn serve(config: Config, engine: SearchEngine) -> anyhow::Result<()> {
    let (handle, _watch) = open_corpus(&config.corpus).await;
    let app = server::router(
        ApiState::new(handle, engine, &config),
        &config.server.cors_allow_origin,
    )?;
    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    server::serve(listener, app).await
}

async fn search(config: &Config, engine: &SearchEngine, args: SearchArgs) -> anyhow::Result<()> {
    let source = CorpusSource::from_config(&config.corpus);
    let loaded = load_with_fallback(&source, config.corpus.fallback_to_sample)
        .await
        .with_context(|| format!("loading corpus from {source}"))?;

    let request = SearchRequest::new(args.query)
        .semantic(args.semantic || config.search.semantic)
        .fuzzy(!args.no_fuzzy && config.search.fuzzy)
        .page(args.limit.unwrap_or(config.search.limit), args.offset);
    let response = engine.execute(&request, &loaded.corpus)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_plain(&response));
    }
    Ok(())
}

/// Human-readable listing of one response page.
pub fn render_plain(response: &SearchResponse) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if response.items.is_empty() {
        let _ = writeln!(out, "没有找到匹配的结果");
        return out;
    }

    let _ = write!(out, "找到 {} 个结果", response.total);
    if let Some(page) = response.page_info() {
        let _ = write!(out, " (page {}/{})", page.current, page.total_pages);
    }
    out.push('\n');

    for item in &response.items {
        let c = &item.course;
        let badge = if item.semantic_match { "语义匹配" } else { "直接匹配" };
        let _ = writeln!(out, "{:>6.1}  {}  [{badge}]", item.score, c.title);
        let _ = writeln!(out, "        {} · {}分钟 · {}", c.level, c.duration, c.teacher);
        if let Some(term) = &item.matched_term {
            let _ = writeln!(out, "        via {term}");
        }
    }

    if let Some(terms) = response.expanded_terms.as_ref().filter(|t| t.len() > 1) {
        let _ = writeln!(out, "expanded: {}", terms.join(", "));
    }
    out
}

fn convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.csv)
        .with_context(|| format!("reading {}", args.csv.display()))?;
    let json = to_json(&convert_csv(&text))?;
    match &args.output {
        Some(path) => write_output(path, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "corpus json written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_flags_parse() {
        let cli = Cli::try_parse_from([
            "zensearch", "--debug", "search", "睡眠", "--semantic", "--no-fuzzy", "--limit", "5",
            "--offset", "10", "--json",
        ])
        .unwrap();
        assert!(cli.debug);
        let Command::Search(args) = cli.command else { panic!("expected search") };
        assert_eq!(args.query, "睡眠");
        assert!(args.semantic && args.no_fuzzy && args.json);
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.offset, 10);
    }

    #[test]
    fn negative_limit_is_rejected() {
        assert!(Cli::try_parse_from(["zensearch", "search", "冥想", "--limit", "-1"]).is_err());
    }

    #[test]
    fn corpus_flag_overrides_url() {
        let mut cfg = CorpusConfig { url: Some("http://127.0.0.1:9/c.json".into()), ..Default::default() };
        apply_corpus_args(&mut cfg, &CorpusArgs { corpus: Some(PathBuf::from("local.json")) });
        assert_eq!(cfg.url, None);
        assert_eq!(cfg.path, PathBuf::from("local.json"));
    }

    #[test]
    fn plain_output_for_empty_response() {
        let corpus = Arc::new(zensearch_core::Corpus::default());
        let response = SearchEngine::default()
            .execute(&SearchRequest::new("冥想"), &corpus)
            .unwrap();
        assert_eq!(render_plain(&response), "没有找到匹配的结果\n");
    }
}
