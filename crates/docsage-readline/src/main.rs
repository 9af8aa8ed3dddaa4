use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer as _;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use docsage_core::document::DocumentId;
use docsage_core::transcript::{Message, Sender};
use docsage_core::{DocsageError, SessionController, SessionEvent};
use docsage_interaction::GeminiApiAgent;
use docsage_interaction::config::{self, API_KEY_ENV, ConfigPaths};

mod commands;
mod toast_layer;
mod upload;

use commands::{COMMANDS, Command, HELP};
use toast_layer::{Toast, ToastLayer};

#[derive(Parser)]
#[command(name = "docsage")]
#[command(about = "Docsage - ask an AI about your documents", long_about = None)]
struct Cli {
    /// Path to config.toml (secret.json is read from the same directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gemini model to use, overriding the configuration
    #[arg(long)]
    model: Option<String>,

    /// Files to upload at startup; the last one is opened
    files: Vec<PathBuf>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Installs the toast layer, plus a stderr log when `RUST_LOG` is set.
fn init_tracing(toasts: mpsc::UnboundedSender<Toast>) {
    let fmt_layer = std::env::var("RUST_LOG").ok().map(|_| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(ToastLayer::new(toasts))
        .with(fmt_layer)
        .init();
}

fn print_message(message: &Message) {
    match message.sender {
        Sender::User => println!("{}", format!("> {}", message.content).green()),
        Sender::Ai => {
            for line in message.content.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
    }
}

fn print_error(err: &DocsageError) {
    if err.is_usage_error() {
        println!("{}", err.to_string().yellow());
    } else {
        eprintln!("{}", format!("Error: {err}").red());
    }
}

/// Renders session events as they arrive.
fn spawn_event_printer(controller: &SessionController) -> tokio::task::JoinHandle<()> {
    let mut events = controller.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::MessageAppended { message }) => print_message(&message),
                Ok(SessionEvent::ActionStarted { action }) => {
                    println!("{}", format!("… running {}", action.kind).bright_black());
                }
                Ok(SessionEvent::DocumentSelected { document_id }) => {
                    println!("{}", format!("Selected document #{document_id}").bright_black());
                }
                Ok(SessionEvent::HighlightRaised { highlight }) => {
                    println!(
                        "{}",
                        format!("Highlighting document #{}", highlight.document_id).bright_yellow()
                    );
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    eprintln!("{}", format!("({skipped} updates skipped)").bright_black());
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn spawn_toast_printer(mut toasts: mpsc::UnboundedReceiver<Toast>) {
    tokio::spawn(async move {
        while let Some(toast) = toasts.recv().await {
            let line = format!("[{}] {}", toast.level, toast.message);
            if toast.level == "ERROR" {
                eprintln!("{}", line.red());
            } else {
                eprintln!("{}", line.yellow());
            }
        }
    });
}

/// Runs an action in the background so the prompt stays responsive.
fn spawn_action<F, Fut, T>(controller: &Arc<SessionController>, action: F)
where
    F: FnOnce(Arc<SessionController>) -> Fut,
    Fut: std::future::Future<Output = docsage_core::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let fut = action(Arc::clone(controller));
    tokio::spawn(async move {
        if let Err(err) = fut.await {
            print_error(&err);
        }
    });
}

/// Reads a file into the session and returns the new document's id.
fn upload_file(controller: &SessionController, path: &Path) -> Option<DocumentId> {
    match upload::read_upload(path) {
        Ok(file) => {
            let document = controller.add_document(file.name, file.payload);
            println!(
                "{}",
                format!("Uploaded #{} {}", document.id, document.name).bright_green()
            );
            Some(document.id)
        }
        Err(err) => {
            eprintln!("{}", format!("Error: {err:#}").red());
            None
        }
    }
}

fn open_in_background(controller: &Arc<SessionController>, id: DocumentId) {
    spawn_action(controller, move |c| async move { c.open_document(id).await });
}

fn handle_command(controller: &Arc<SessionController>, command: Command) -> Result<bool> {
    match command {
        Command::Quit => return Ok(false),
        Command::Help => println!("{}", HELP.bright_black()),
        Command::Invalid(reason) => println!("{}", reason.yellow()),
        Command::Open(path) => {
            if let Some(id) = upload_file(controller, &path) {
                open_in_background(controller, id);
            }
        }
        Command::Docs => {
            let snapshot = controller.snapshot();
            if snapshot.documents.is_empty() {
                println!("{}", "No documents uploaded yet. Use /open <path>.".bright_black());
            }
            let selected = snapshot.selected_document.map(|d| d.id);
            for doc in &snapshot.documents {
                let marker = if Some(doc.id) == selected { "*" } else { " " };
                println!("{marker} #{} {}", doc.id, doc.name);
            }
        }
        Command::Select(id) => {
            if let Err(err) = controller.select_document(DocumentId(id)) {
                print_error(&err);
            }
        }
        Command::Summary => spawn_action(controller, |c| async move { c.request_summary().await }),
        Command::Risks => spawn_action(controller, |c| async move { c.request_risks().await }),
        Command::Define(term) => {
            spawn_action(controller, move |c| async move { c.define_term(&term).await })
        }
        Command::Ask(question) => {
            spawn_action(controller, move |c| async move { c.send_question(&question).await })
        }
        Command::Cite => {
            if let Err(err) = controller.on_citation_click() {
                print_error(&err);
            }
        }
        Command::State => {
            let json = serde_json::to_string_pretty(&controller.snapshot())
                .context("Failed to serialize session state")?;
            println!("{json}");
        }
    }
    Ok(true)
}

/// The main entry point for the Docsage readline REPL.
///
/// 1. Loads `config.toml` and the Gemini key
/// 2. Builds a session backed by the Gemini agent
/// 3. Prints transcript entries and toasts from background tasks
/// 4. Reads commands until `quit` or EOF
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (toast_tx, toast_rx) = mpsc::unbounded_channel();
    init_tracing(toast_tx);
    spawn_toast_printer(toast_rx);

    // ===== Backend Initialization =====
    let paths = match cli.config {
        Some(path) => ConfigPaths::with_config_file(path),
        None => ConfigPaths::default_paths()?,
    };
    let loaded = config::load(&paths).context("Failed to load configuration")?;
    let credentials = loaded.gemini.with_context(|| {
        format!(
            "No Gemini API key found. Set {API_KEY_ENV} or add it to {}",
            paths.secret_file.display()
        )
    })?;

    let mut agent = GeminiApiAgent::from_config(&credentials, &loaded.app.gemini);
    if let Some(model) = cli.model {
        agent = agent.with_model(model);
    }
    tracing::info!(model = agent.model(), "Gemini agent ready");

    let controller = Arc::new(SessionController::new(Arc::new(agent), loaded.app.session));
    let printer = spawn_event_printer(&controller);

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Docsage ===".bright_magenta().bold());
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();

    let uploaded: Vec<_> = cli
        .files
        .iter()
        .filter_map(|path| upload_file(&controller, path))
        .collect();
    if let Some(&last) = uploaded.last() {
        open_in_background(&controller, last);
    }

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let Some(command) = commands::parse(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(line.trim());

                if !handle_command(&controller, command)? {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    printer.abort();
    Ok(())
}
