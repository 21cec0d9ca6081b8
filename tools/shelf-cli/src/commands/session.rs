//! Interactive session over a single product store.
//!
//! The session owns one store for its whole lifetime, the way a product
//! screen does. Loads run as background tasks so the prompt stays usable
//! while a fetch is in flight; a second `load` issued meanwhile is skipped.
//! A watcher task subscribes to the store and reports loading transitions.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dialoguer::Input;
use serde_json::json;
use shelf_model::ProductId;
use shelf_store::{LoadOutcome, ProductStoreState};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::SessionArgs;
use crate::context::{Context, Store};
use crate::output::Output;
use crate::render;

const WATCHER_GRACE: Duration = Duration::from_millis(500);

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Load,
    Refresh,
    Filter(String),
    Fav(ProductId),
    Select(ProductId),
    List,
    Show,
    State,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse an input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "load" => SessionCommand::Load,
            "refresh" | "r" => SessionCommand::Refresh,
            "filter" | "f" => {
                if rest.is_empty() {
                    return Err("usage: filter <label>".to_string());
                }
                SessionCommand::Filter(rest.to_string())
            }
            "fav" => SessionCommand::Fav(parse_id(rest, "fav")?),
            "select" | "s" => SessionCommand::Select(parse_id(rest, "select")?),
            "list" | "ls" => SessionCommand::List,
            "show" => SessionCommand::Show,
            "state" => SessionCommand::State,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };
        Ok(Some(command))
    }
}

fn parse_id(arg: &str, command: &str) -> Result<ProductId, String> {
    if arg.is_empty() {
        return Err(format!("usage: {} <id>", command));
    }
    arg.parse()
        .map_err(|_| format!("'{}' is not a product id", arg))
}

/// A loading transition seen by the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Started,
    Loaded(usize),
    Failed,
}

/// Watcher-side view of the fetch lifecycle.
///
/// A watch receiver only sees the latest snapshot, so a fast load can go
/// from `Idle` to `Idle` between two wakeups. Completed loads are detected
/// through the store's load counter instead of the loading flag alone.
#[derive(Debug)]
pub struct LoadTracker {
    was_loading: bool,
    completed: u64,
}

impl LoadTracker {
    /// Start from the snapshot current at subscription time.
    pub fn new(state: &ProductStoreState) -> Self {
        Self {
            was_loading: state.is_loading(),
            completed: state.completed_loads(),
        }
    }

    /// Transitions between the previously observed snapshot and `state`,
    /// in the order they happened.
    pub fn observe(&mut self, state: &ProductStoreState) -> Vec<Transition> {
        let mut transitions = Vec::new();
        let finished = state.completed_loads() != self.completed;

        if finished {
            if !self.was_loading {
                transitions.push(Transition::Started);
            }
            transitions.push(if state.has_error() {
                Transition::Failed
            } else {
                Transition::Loaded(state.products().len())
            });
        }
        if state.is_loading() && (finished || !self.was_loading) {
            transitions.push(Transition::Started);
        }

        self.was_loading = state.is_loading();
        self.completed = state.completed_loads();
        transitions
    }
}

/// Load tasks started from the prompt.
#[derive(Default)]
struct LoadTasks {
    handles: Vec<JoinHandle<()>>,
}

impl LoadTasks {
    fn push(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Wait for every load still in flight.
    async fn wait_all(&mut self) {
        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "load task failed");
            }
        }
    }
}

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let store = Arc::new(ctx.build_store());
    let watcher = tokio::spawn(report_transitions(store.subscribe(), ctx.output.clone()));

    let mut loads = LoadTasks::default();
    if !args.no_load {
        loads.push(spawn_load(&store, &ctx.output, false));
    }
    ctx.output.info("Type 'help' for commands, 'quit' to leave.");

    let mut prompt = Prompt::new();
    while let Some(line) = prompt.next_line().await? {
        match SessionCommand::parse(&line) {
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(command)) => {
                if let Some(load) = execute(command, &store, &ctx.output) {
                    loads.push(load);
                }
            }
            Ok(None) => {}
            Err(msg) => ctx.output.warn(&msg),
        }
    }

    loads.wait_all().await;
    // Dropping the last sender closes the channel; the watcher drains the
    // final snapshot and returns.
    drop(store);
    if tokio::time::timeout(WATCHER_GRACE, watcher).await.is_err() {
        tracing::debug!("watcher still running at session end");
    }
    Ok(())
}

/// Run one command. Returns the task handle when it started a load.
fn execute(
    command: SessionCommand,
    store: &Arc<Store>,
    output: &Output,
) -> Option<JoinHandle<()>> {
    match command {
        SessionCommand::Load => return Some(spawn_load(store, output, false)),
        SessionCommand::Refresh => return Some(spawn_load(store, output, true)),
        SessionCommand::Filter(label) => {
            if !store.state().filters_enabled() {
                output.warn("Filters are disabled until products load again");
                return None;
            }
            store.set_filter(label);
            render::listing(output, &store.state());
        }
        SessionCommand::Fav(id) => {
            let known = store.state().product(id).is_some();
            let favorite = store.toggle_favorite_id(id);
            if !known {
                output.warn(&format!("Product {} is not in the current feed", id));
            }
            if favorite {
                output.success(&format!("Product {} vorgemerkt", id));
            } else {
                output.success(&format!("Product {} nicht mehr vorgemerkt", id));
            }
        }
        SessionCommand::Select(id) => {
            let product = store.state().product(id).cloned();
            match product {
                Some(product) => {
                    store.select_product(product);
                    show_selected(store, output);
                }
                None => output.warn(&format!("Product {} is not in the current feed", id)),
            }
        }
        SessionCommand::List => render::listing(output, &store.state()),
        SessionCommand::Show => show_selected(store, output),
        SessionCommand::State => print_state(&store.state(), output),
        SessionCommand::Help => print_help(output),
        SessionCommand::Quit => {}
    }
    None
}

fn show_selected(store: &Store, output: &Output) {
    let state = store.state();
    match state.selected_product() {
        Some(product) => render::details(output, product, state.is_favorite(product.id)),
        None => output.info("No product selected. Use 'select <id>'."),
    }
}

/// Start a load in the background. The watcher reports progress; this task
/// only reports what the watcher cannot see.
fn spawn_load(store: &Arc<Store>, output: &Output, refresh: bool) -> JoinHandle<()> {
    let store = Arc::clone(store);
    let output = output.clone();
    tokio::spawn(async move {
        let outcome = if refresh {
            store.refresh().await
        } else {
            store.load().await
        };
        match outcome {
            LoadOutcome::Loaded { .. } => {}
            LoadOutcome::Failed(e) => output.warn(&e.to_string()),
            LoadOutcome::Skipped => output.info("A load is already in progress"),
        }
    })
}

async fn report_transitions(mut rx: watch::Receiver<ProductStoreState>, output: Output) {
    let mut tracker = LoadTracker::new(&rx.borrow_and_update());
    while rx.changed().await.is_ok() {
        let transitions = tracker.observe(&rx.borrow_and_update());

        let at = chrono::Local::now().format("%H:%M:%S");
        for transition in transitions {
            match transition {
                Transition::Started => output.info(&format!("[{}] Loading products...", at)),
                Transition::Loaded(n) => {
                    output.success(&format!("[{}] Loaded {} products", at, n))
                }
                Transition::Failed => {
                    output.warn(&format!("[{}] Products could not be loaded", at))
                }
            }
        }
    }
}

fn print_state(state: &ProductStoreState, output: &Output) {
    let mut favorites: Vec<u64> = state.favorites().iter().map(|id| id.get()).collect();
    favorites.sort_unstable();

    if output.is_json() {
        output.json(&json!({
            "loading": state.is_loading(),
            "hasError": state.has_error(),
            "filter": state.selected_filter().as_str(),
            "filterKind": state.filter_kind().as_str(),
            "filtersEnabled": state.filters_enabled(),
            "products": state.products().len(),
            "filtered": state.filtered_products().len(),
            "favorites": favorites,
            "selected": state.selected_product().map(|p| p.id),
        }));
        return;
    }

    output.header("Session state");
    output.kv("loading", &state.is_loading().to_string());
    output.kv("has_error", &state.has_error().to_string());
    output.kv(
        "filter",
        &format!("{} ({})", state.selected_filter(), state.filter_kind().as_str()),
    );
    output.kv("products", &state.products().len().to_string());
    output.kv("filtered", &state.filtered_products().len().to_string());
    let favorites: Vec<String> = favorites.iter().map(u64::to_string).collect();
    output.kv("favorites", &favorites.join(", "));
    if let Some(product) = state.selected_product() {
        output.kv("selected", &format!("{} {}", product.id, product.name));
    }
}

fn print_help(output: &Output) {
    output.header("Commands");
    for line in [
        "load              fetch products",
        "refresh           fetch products with the refresh delay",
        "filter <label>    select a filter (Alle, Verfügbar, Vorgemerkt)",
        "fav <id>          toggle a favorite",
        "select <id>       open the details view of a product",
        "list              show the filtered product list",
        "show              show the selected product",
        "state             print the store state",
        "quit              leave the session",
    ] {
        output.list_item(line);
    }
}

/// Source of input lines: a dialoguer prompt on a terminal, plain lines
/// when stdin is piped.
enum Prompt {
    Terminal,
    Piped(Lines<BufReader<Stdin>>),
}

impl Prompt {
    fn new() -> Self {
        if console::user_attended() {
            Prompt::Terminal
        } else {
            Prompt::Piped(BufReader::new(tokio::io::stdin()).lines())
        }
    }

    async fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            Prompt::Terminal => {
                let line = tokio::task::spawn_blocking(|| {
                    Input::<String>::new()
                        .with_prompt("shelf")
                        .allow_empty(true)
                        .interact_text()
                })
                .await??;
                Ok(Some(line))
            }
            Prompt::Piped(lines) => Ok(lines.next_line().await?),
        }
    }
}
