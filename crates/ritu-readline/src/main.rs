use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use ritu_application::routine_text::{self, Block, Span};
use ritu_application::projector::{CatalogView, DetailView, PanelView};
use ritu_application::{ChatOutcome, NotificationSink, NoticeSeverity, Renderer, RoutineController};
use ritu_core::catalog::Catalog;
use ritu_core::locale::Locale;
use ritu_infrastructure::storage::SlotStorage;
use ritu_infrastructure::{JsonPreferencesRepository, JsonSelectionRepository, RituPaths};
use ritu_interaction::ChatCompletionsClient;

const COMMANDS: &[&str] = &[
    "/list",
    "/category",
    "/search",
    "/toggle",
    "/show",
    "/selected",
    "/clear",
    "/routine",
    "/lang",
    "/live",
    "/help",
];

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

        if line.starts_with('/') {
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

/// Replies arriving from background assistant tasks.
enum AssistantEvent {
    ChatReply(String),
    RoutineReply(String),
}

/// Terminal implementation of the rendering surface.
struct TerminalSurface;

impl NotificationSink for TerminalSurface {
    fn notify(&self, severity: NoticeSeverity, text: String) {
        for line in text.lines() {
            match severity {
                NoticeSeverity::Info => println!("{}", line.bright_black()),
                NoticeSeverity::Warning => println!("{}", line.yellow()),
                NoticeSeverity::Error => println!("{}", line.red()),
            }
        }
    }
}

impl Renderer for TerminalSurface {
    fn render_catalog(&self, view: &CatalogView) {
        if let Some(placeholder) = &view.placeholder {
            println!("{}", placeholder.bright_black().italic());
            return;
        }
        for card in &view.cards {
            let marker = if card.selected { "✓" } else { " " };
            println!(
                "{} {} {} {} {}",
                marker.bright_green(),
                format!("[{}]", card.product.id).bright_black(),
                card.product.brand.bright_magenta(),
                card.product.name.bold(),
                format!("({})", card.category_label).bright_black(),
            );
        }
    }

    fn render_panel(&self, view: &PanelView) {
        println!("{}", format!("── {} ──", view.title).bright_magenta());
        if let Some(empty) = &view.empty_message {
            println!("{}", empty.bright_black().italic());
            return;
        }
        for row in &view.rows {
            println!(
                "  {} {} {}",
                format!("[{}]", row.product.id).bright_black(),
                row.product.name,
                format!("(/toggle {} = {})", row.product.id, row.remove_label).bright_black(),
            );
        }
    }

    fn render_detail(&self, view: &DetailView) {
        println!("{}", view.product.name.bold());
        println!(
            "{} · {}",
            view.product.brand.bright_magenta(),
            view.category_label.bright_black()
        );
        println!("{}", view.product.description);
        println!("{}", view.product.image.bright_black().underline());
        println!("{}", view.select_label.bright_green());
    }
}

/// Prints a formatted routine reply.
fn print_routine(content: &str) {
    for block in routine_text::format_routine(content) {
        match block {
            Block::Step { number, spans } => {
                println!("  {} {}", format!("{number}.").bold(), render_spans(&spans));
            }
            Block::Bullet(spans) => println!("  • {}", render_spans(&spans)),
            Block::TipHeader(heading) => println!("\n💡 {}", heading.bold().yellow()),
            Block::Paragraph(spans) => println!("{}", render_spans(&spans)),
        }
    }
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.normal().to_string(),
            Span::Bold(text) => text.bold().to_string(),
            Span::Frequency(text) => format!("⏰ {}", text.yellow()),
            Span::Timing(text) => format!("⏱️ {}", text.cyan()),
        })
        .collect::<Vec<_>>()
        .join("")
}

fn print_chat_reply(content: &str) {
    for line in content.lines() {
        println!("{}", line.bright_blue());
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  /list                 show the product grid");
    println!("  /category <key>       filter by category (no key = all)");
    println!("  /search <term>        search by name, brand, or description");
    println!("  /toggle <id>          add or remove a product");
    println!("  /show <id>            product details");
    println!("  /selected             show the selection panel");
    println!("  /clear                empty the selection");
    println!("  /routine              generate a personalized routine");
    println!("  /lang <code>          switch language (en, ar, he, fr, es)");
    println!("  /live                 toggle real-time product updates");
    println!("  anything else         chat with the assistant");
}

/// The main entry point for the Ritu readline REPL application.
///
/// Sets up the backend components, a channel for assistant replies, and a
/// rustyline loop with slash-command completion. Assistant calls run in
/// background tasks so the prompt stays responsive while a request is in
/// flight; a second submission on a busy path is refused with a notice.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend Initialization =====
    let config = ritu_infrastructure::config_service::load_app_config();

    let surface = Arc::new(TerminalSurface);
    let catalog = match std::fs::read_to_string(&config.catalog_path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| Catalog::from_json_str(&raw).map_err(anyhow::Error::from))
    {
        Ok(catalog) => catalog,
        Err(e) => {
            // Browsing is disabled but the session continues.
            surface.notify(
                NoticeSeverity::Error,
                format!("❌ Failed to load products ({e}). Browsing is disabled."),
            );
            Catalog::empty()
        }
    };

    let slots = RituPaths::slots_dir()
        .map_err(|e| anyhow::anyhow!("cannot resolve data directory: {e}"))?;
    let controller = Arc::new(RoutineController::new(
        catalog,
        Arc::new(ChatCompletionsClient::from_config(&config)),
        Arc::new(JsonSelectionRepository::new(SlotStorage::new(slots.clone()))),
        Arc::new(JsonPreferencesRepository::new(SlotStorage::new(slots))),
        surface.clone(),
        surface.clone(),
        &config,
    ));

    // Channel for assistant replies produced by background tasks
    let (reply_tx, mut reply_rx) = mpsc::channel::<AssistantEvent>(32);

    // Spawn reply printer task
    let printer = tokio::spawn(async move {
        while let Some(event) = reply_rx.recv().await {
            match event {
                AssistantEvent::ChatReply(reply) => print_chat_reply(&reply),
                AssistantEvent::RoutineReply(reply) => print_routine(&reply),
            }
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Ritu ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    controller.initialize().await;

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if let Some(rest) = trimmed.strip_prefix('/') {
                    let mut parts = rest.splitn(2, ' ');
                    let command = parts.next().unwrap_or_default();
                    let argument = parts.next().map(str::trim).unwrap_or_default();
                    handle_command(&controller, &reply_tx, command, argument).await;
                } else {
                    // Free text goes to the assistant.
                    println!("{}", format!("> {trimmed}").green());
                    let controller = Arc::clone(&controller);
                    let tx = reply_tx.clone();
                    let message = trimmed.to_string();
                    tokio::spawn(async move {
                        if let Ok(ChatOutcome::Reply(reply)) = controller.chat(&message).await {
                            let _ = tx.send(AssistantEvent::ChatReply(reply)).await;
                        }
                    });
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

    // Drop the channel to signal shutdown
    drop(reply_tx);
    let _ = printer.await;

    Ok(())
}

async fn handle_command(
    controller: &Arc<RoutineController>,
    reply_tx: &mpsc::Sender<AssistantEvent>,
    command: &str,
    argument: &str,
) {
    match command {
        "list" => {
            let surface = TerminalSurface;
            surface.render_catalog(&controller.catalog_view());
        }
        "category" => {
            if argument.is_empty() {
                controller.set_category(None);
                let categories = controller.categories().join(", ");
                println!("{}", format!("Categories: {categories}").bright_black());
            } else if controller.categories().iter().any(|c| c.as_str() == argument) {
                controller.set_category(Some(argument.to_string()));
            } else {
                println!(
                    "{}",
                    format!("Unknown category '{argument}'").yellow()
                );
            }
        }
        "search" => {
            controller.search_input(argument).await;
        }
        "toggle" => match argument.parse::<u32>() {
            Ok(id) => controller.toggle(id).await,
            Err(_) => println!("{}", "Usage: /toggle <id>".yellow()),
        },
        "show" => match argument.parse::<u32>() {
            Ok(id) => controller.show_detail(id),
            Err(_) => println!("{}", "Usage: /show <id>".yellow()),
        },
        "selected" => {
            let surface = TerminalSurface;
            surface.render_panel(&controller.panel_view());
        }
        "clear" => controller.clear().await,
        "routine" => {
            let controller = Arc::clone(controller);
            let tx = reply_tx.clone();
            tokio::spawn(async move {
                if let Ok(reply) = controller.generate_routine().await {
                    let _ = tx.send(AssistantEvent::RoutineReply(reply)).await;
                }
            });
        }
        "lang" => {
            if controller.set_locale(argument).await.is_none() {
                let codes = Locale::iter()
                    .map(|l| format!("{} ({})", l.code(), l.native_name()))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}", format!("Usage: /lang <code> (one of: {codes})").yellow());
            }
        }
        "live" => {
            controller.toggle_live_search().await;
        }
        "help" => print_help(),
        other => println!("{}", format!("Unknown command '/{other}'").bright_black()),
    }
}
