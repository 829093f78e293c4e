//! charscope CLI: Rick and Morty character search from the terminal.
//!
//! Calls `charscope-core` directly: `lookup` runs a single query, `interactive`
//! runs the debounced search session with stdin lines as keystrokes.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use charscope_core::search::CharacterRow;
use charscope_core::{
    Character, CharacterLookup, Config, FetchGate, HttpLookup, SearchController, SearchSnapshot,
    SearchView,
};

/// charscope CLI: find Rick and Morty characters by name.
#[derive(Parser)]
#[command(name = "chs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ./.charscope.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, e.g. https://rickandmortyapi.com/api
    #[arg(long, global = true)]
    api: Option<String>,

    /// Quiet period before a typed query is searched, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Also search when the settled query is empty
    #[arg(long, global = true)]
    fetch_on_empty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up characters matching a name, once
    Lookup {
        /// Name filter
        term: String,
    },
    /// Debounced search session: every stdin line replaces the query
    Interactive,
    /// Print the effective configuration
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn resolve_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => Config::load_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => match std::env::current_dir() {
            Ok(cwd) => Config::load(&cwd),
            Err(_) => Config::default(),
        },
    };

    if let Some(api) = &cli.api {
        config.api.base_url = api.trim_end_matches('/').to_string();
    }
    if let Some(ms) = cli.delay_ms {
        config.search.delay = Duration::from_millis(ms);
    }
    if cli.fetch_on_empty {
        config.search.gate = FetchGate::Always;
    }
    config
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Could not encode JSON: {e}"),
    }
}

fn describe(c: &Character) -> String {
    let extras: Vec<&str> =
        [c.status.as_deref(), c.species.as_deref()].into_iter().flatten().collect();
    extras.join(", ")
}

fn print_rows(rows: &[CharacterRow], characters: &[Character]) {
    for (row, c) in rows.iter().zip(characters) {
        println!("{:>5}  {:<36} {:<20} {}", row.key, row.label, describe(c), row.image_src);
    }
}

async fn run_lookup(config: &Config, term: &str, json: bool) {
    let lookup = HttpLookup::new(&config.api);
    let page = match lookup.fetch_characters(term).await {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!("Lookup failed: {e}");
            eprintln!("No characters match '{term}'");
            std::process::exit(1);
        }
    };

    if json {
        print_json(&page);
        return;
    }
    if page.results.is_empty() {
        eprintln!("No characters match '{term}'");
        std::process::exit(1);
    }
    let snapshot = SearchSnapshot { results: page.results.clone(), ..Default::default() };
    print_rows(&SearchView::from(&snapshot).rows, &page.results);
    eprintln!("\n{} of {} matches", page.results.len(), page.total());
}

/// Print what a UI would show each time the snapshot changes.
async fn render(mut snapshots: watch::Receiver<SearchSnapshot>, json: bool) {
    let mut shown = SearchView::default();
    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        if json {
            if let Ok(line) = serde_json::to_string(&snapshot) {
                println!("{line}");
            }
        } else {
            let view = SearchView::from(&snapshot);
            if view.show_loading && !shown.show_loading {
                println!("Loading...");
            }
            if view.rows != shown.rows && view.show_results() {
                print_rows(&view.rows, &snapshot.results);
                println!();
            }
            shown = view;
        }
        if snapshots.changed().await.is_err() {
            break;
        }
    }
}

async fn run_interactive(config: &Config, json: bool) {
    let lookup: Arc<dyn CharacterLookup> = Arc::new(HttpLookup::new(&config.api));
    let (handle, task) = SearchController::new(lookup, config.search.clone()).spawn();
    let renderer = tokio::spawn(render(handle.subscribe(), json));

    if !json {
        eprintln!(
            "Type a name and press Enter; searching starts {}ms after the last line. Ctrl-D to quit.",
            config.search.delay.as_millis()
        );
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                handle.input(line);
            }
            Ok(None) => break,
            Err(e) => {
                eprintln!("Could not read stdin: {e}");
                break;
            }
        }
    }

    let last = handle.wait_idle().await;
    drop(handle);
    let _ = task.await;
    let _ = renderer.await;

    if !json && last.results.is_empty() && last.debounced.as_deref().is_some_and(|q| !q.is_empty())
    {
        eprintln!("No characters match '{}'", last.query);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("charscope=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    match cli.command {
        Commands::Lookup { ref term } => run_lookup(&config, term, cli.json).await,
        Commands::Interactive => run_interactive(&config, cli.json).await,
        Commands::Config => {
            if cli.json {
                print_json(&config);
            } else {
                println!("API:          {}", config.api.base_url);
                println!("Delay:        {}ms", config.search.delay.as_millis());
                println!(
                    "Empty query:  {}",
                    match config.search.gate {
                        FetchGate::NonEmpty => "skipped",
                        FetchGate::Always => "searched",
                    }
                );
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "chs", &mut std::io::stdout());
        }
    }
}
