//! newtab headless host: entry point.
//!
//! Plays the role of the new-tab page from a terminal: every invocation
//! "loads the page" (opens the configuration store, restores the theme,
//! renders the view) and then performs one user action.
//!
//! # Usage
//!
//! ```text
//! newtab [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show                          Print theme, greeting, clock, variables, placements
//!   clock    [--ticks N]          Re-render the clock every second until Ctrl+C
//!   search   <QUERY>...           Print the navigation target for a query
//!   set      <SETTING> <VALUE>    Change one setting by its JSON name
//!   position <ELEMENT> [--anchor A] [--x X] [--y Y]
//!   engine   list | add <PREFIX> <URL> | remove <PREFIX>
//!   theme    [dark|light|toggle]
//!   export   [--out DIR]          Write config.json
//!   import   <FILE>               Import a config.json
//!   reset    [--yes]              Reset every setting to its default
//!
//! Options:
//!   --data-dir    <DIR>    Key-value data directory      [env: NEWTAB_DATA_DIR]
//!   --host-config <FILE>   Host settings file (host.toml) [env: NEWTAB_HOST_CONFIG]
//! ```
//!
//! # Architecture overview
//!
//! ```text
//! main.rs          CLI, logging, runtime
//!   application/   ConfigStore, SettingsPanel, theme, PageView
//!   infrastructure/
//!     storage/     FileStorage (default), MemoryStorage
//!     host_config  host.toml
//!     terminal     confirm/alert on stdin/stdout
//!       ↕
//! newtab-core      schema, deep merge, render models
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use newtab_core::{resolve_search, Anchor, ConfigError, PositionedElement, Theme};
use tracing::info;
use tracing_subscriber::EnvFilter;

use newtab::application::config_store::{ConfigStore, LoadOutcome};
use newtab::application::page::{clock_text, PageView};
use newtab::application::ports::{KeyValueStore, Prompt};
use newtab::application::settings::{Axis, ResetOutcome, SettingsPanel};
use newtab::application::theme::{apply_theme, load_theme, toggle_theme};
use newtab::infrastructure::host_config::{host_config_path, load_host_config, HostConfig};
use newtab::infrastructure::storage::FileStorage;
use newtab::infrastructure::terminal::TerminalPrompt;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Headless host for the newtab page configuration.
#[derive(Debug, Parser)]
#[command(
    name = "newtab",
    about = "Inspect and edit the newtab page configuration from a terminal",
    version
)]
struct Cli {
    /// Directory holding the persisted configuration and theme.
    ///
    /// Overrides `[storage] data_dir` from the host config.
    #[arg(long, global = true, env = "NEWTAB_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path of the host settings file.
    #[arg(long, global = true, env = "NEWTAB_HOST_CONFIG")]
    host_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the rendered page.
    Show,

    /// Re-render the clock every second.
    Clock {
        /// Stop after this many ticks instead of waiting for Ctrl+C.
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Print where a search would navigate.
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Change one setting: a colour slot, slider, text or checkbox.
    Set {
        /// JSON name, e.g. `accent`, `clockFontSize`, `greetingText`, `showCredit`.
        setting: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Move a positioned element.
    Position {
        element: PositionedElement,
        #[arg(long)]
        anchor: Option<Anchor>,
        #[arg(long, allow_hyphen_values = true)]
        x: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<String>,
    },

    /// Manage search-engine prefixes.
    Engine {
        #[command(subcommand)]
        action: EngineAction,
    },

    /// Print or change the theme: `dark`, `light` (or their stored names
    /// `dark-mode`, `light-mode`) or `toggle`.
    Theme { choice: Option<ThemeChoice> },

    /// Write the configuration to `config.json`.
    Export {
        /// Target directory; defaults to the current directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace the configuration with a previously exported file.
    Import { file: PathBuf },

    /// Reset every setting to its default.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum EngineAction {
    List,
    Add { prefix: String, url: String },
    Remove { prefix: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThemeChoice {
    Set(Theme),
    Toggle,
}

impl FromStr for ThemeChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toggle" => Ok(ThemeChoice::Toggle),
            other => other.parse().map(ThemeChoice::Set),
        }
    }
}

/// Confirms everything; used for `reset --yes`.
struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }

    fn alert(&mut self, message: &str) {
        println!("{message}");
    }
}

// ── Startup helpers ───────────────────────────────────────────────────────────

/// Reads the host config from `explicit`, or from the platform default
/// location.  No platform directory means defaults.
fn load_host(explicit: Option<&Path>) -> anyhow::Result<HostConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match host_config_path() {
            Ok(path) => path,
            Err(_) => return Ok(HostConfig::default()),
        },
    };
    load_host_config(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// `RUST_LOG` wins; otherwise the host config's level.  Logs go to stderr so
/// command output on stdout stays clean.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// The page model is single-threaded (listeners and the shared view are
/// `Rc`-based), so the runtime is tokio's current-thread flavour.  It drives
/// the clock timer, the Ctrl+C signal and the asynchronous import read.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let host = load_host(cli.host_config.as_deref())?;
    init_logging(&host.logging.level);

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => host
            .data_dir()
            .context("no --data-dir given and no platform config directory")?,
    };

    // ── Page load ─────────────────────────────────────────────────────────────
    let (mut store, outcome) = ConfigStore::open(FileStorage::new(&data_dir));
    match &outcome {
        LoadOutcome::Recovered { reason } => {
            eprintln!("warning: stored configuration was unusable ({reason}); using defaults")
        }
        other => info!(outcome = ?other, data_dir = %data_dir.display(), "configuration loaded"),
    }

    let theme = load_theme(&store, host.appearance.prefers_dark);
    let view = Rc::new(RefCell::new(PageView::new(store.get(), theme)));
    PageView::attach(&view, &mut store);

    run(cli.command, &mut store, &view).await
}

async fn run<S: KeyValueStore>(
    command: Command,
    store: &mut ConfigStore<S>,
    view: &Rc<RefCell<PageView>>,
) -> anyhow::Result<()> {
    match command {
        Command::Show => {
            print!("{}", view.borrow().page());
            println!("clock:    {}", clock_text(store.get(), &chrono::Local::now()));
        }

        Command::Clock { ticks } => run_clock(store, ticks).await?,

        Command::Search { query } => {
            if let Some(target) = resolve_search(store.get(), &query.join(" ")) {
                println!("{target}");
            }
        }

        Command::Set { setting, value } => {
            let setting = SettingsPanel::new(store).apply_named(&setting, &value)?;
            println!("{setting} = {value}");
        }

        Command::Position {
            element,
            anchor,
            x,
            y,
        } => {
            let mut panel = SettingsPanel::new(store);
            if let Some(anchor) = anchor {
                panel.set_anchor(element, anchor)?;
            }
            if let Some(x) = &x {
                panel.preview_offset(element, Axis::X, x);
            }
            if let Some(y) = &y {
                panel.preview_offset(element, Axis::Y, y);
            }
            if x.is_some() || y.is_some() {
                panel.commit()?;
            }
            if let Some(placement) = view.borrow().page().placement(element) {
                println!("#{} {}", element.as_str(), placement.to_css());
            }
        }

        Command::Engine { action } => run_engine(store, action)?,

        Command::Theme { choice } => {
            let current = view.borrow().theme();
            let next = match choice {
                None => current,
                Some(ThemeChoice::Toggle) => toggle_theme(store, current)?,
                Some(ThemeChoice::Set(theme)) => {
                    apply_theme(store, theme)?;
                    theme
                }
            };
            view.borrow_mut().set_theme(next, store.get());
            println!("{next} {}", next.icon());
        }

        Command::Export { out } => {
            let dir = match out {
                Some(dir) => dir,
                None => std::env::current_dir().context("could not resolve current directory")?,
            };
            let path = SettingsPanel::new(store).export_to(&dir)?;
            println!("{}", path.display());
        }

        Command::Import { file } => {
            let mut prompt = TerminalPrompt::stdio();
            SettingsPanel::new(store)
                .import_from(&file, &mut prompt)
                .await
                .with_context(|| format!("import of {} failed", file.display()))?;
        }

        Command::Reset { yes } => {
            let outcome = if yes {
                SettingsPanel::new(store).reset(&mut AssumeYes)?
            } else {
                SettingsPanel::new(store).reset(&mut TerminalPrompt::stdio())?
            };
            if outcome == ResetOutcome::Declined {
                println!("reset cancelled");
            } else {
                println!("settings reset to defaults");
            }
        }
    }
    Ok(())
}

/// Prints the clock once per second until Ctrl+C or until `ticks` lines
/// have been printed.
async fn run_clock<S: KeyValueStore>(
    store: &ConfigStore<S>,
    ticks: Option<u64>,
) -> anyhow::Result<()> {
    if ticks == Some(0) {
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut printed = 0u64;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                println!("{}", clock_text(store.get(), &chrono::Local::now()));
                printed += 1;
                if ticks.is_some_and(|limit| printed >= limit) {
                    break;
                }
            }
            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl+C")?;
                info!("received Ctrl+C, stopping clock");
                break;
            }
        }
    }
    Ok(())
}

fn run_engine<S: KeyValueStore>(
    store: &mut ConfigStore<S>,
    action: EngineAction,
) -> anyhow::Result<()> {
    match action {
        EngineAction::List => {
            let config = store.get();
            for (prefix, url) in &config.search_engines {
                println!("{prefix:<8} {url}");
            }
            println!("{:<8} {}", "(default)", config.default_search_engine);
        }
        EngineAction::Add { prefix, url } => {
            let mut rows: Vec<(String, String)> = store
                .get()
                .search_engines
                .iter()
                .map(|(p, u)| (p.clone(), u.clone()))
                .collect();
            rows.push((prefix, url));
            SettingsPanel::new(store).apply_search_engines(&rows)?;
        }
        EngineAction::Remove { prefix } => {
            if !SettingsPanel::new(store).remove_search_engine(&prefix)? {
                println!("no engine registered for {prefix}");
            }
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
