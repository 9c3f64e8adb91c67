use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use ihub_api::RemoteInsightClient;
use ihub_application::{AppController, EditField};
use ihub_core::config::ClientConfig;
use ihub_core::insight::{Insight, InsightDraft};
use ihub_core::view::ViewState;
use ihub_core::IhubError;
use ihub_infrastructure::{ConfigStorage, FileSessionStore};

const COMMANDS: &[&str] = &[
    "login", "register", "logout", "whoami", "list", "refresh", "show", "new", "edit", "set",
    "save", "cancel", "delete", "extract", "analyze", "clusters", "back", "help", "quit",
];

/// Terminal client for the InsightHub note service.
#[derive(Parser, Debug)]
#[command(name = "ihub", version, about)]
struct Args {
    /// Base URL of the InsightHub API (overrides config and IHUB_API_URL).
    #[arg(long)]
    api_url: Option<String>,
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

        // Only the command word completes; arguments are free text.
        if !line.contains(' ') {
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
        let command = line.split_whitespace().next().unwrap_or("");
        if self.commands.iter().any(|c| c == command) {
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

        if !line.is_empty() && !line.contains(' ') {
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

fn print_error(err: &IhubError) {
    let label = if err.is_auth() {
        "auth"
    } else if err.is_validation() {
        "invalid"
    } else if err.is_not_found() {
        "not found"
    } else if err.is_upstream() {
        "service"
    } else {
        "error"
    };
    eprintln!("{}", format!("[{}] {}", label, err).red());
    if err.is_auth() {
        eprintln!("{}", "Use 'login <email>' to sign in.".bright_black());
    }
}

fn print_insight_line(insight: &Insight) {
    let summary = insight.summary.as_deref().unwrap_or("");
    println!(
        "  {} {}  {}",
        format!("#{}", insight.id).bright_yellow(),
        insight.title.bold(),
        summary.bright_black()
    );
}

fn print_insight(insight: &Insight) {
    println!("{}", format!("#{} {}", insight.id, insight.title).bold());
    println!("{}", insight.content);
    if !insight.tags.is_empty() {
        println!("{}", format!("tags: {}", insight.tags).bright_black());
    }
    if let Some(summary) = &insight.summary {
        println!("{}", format!("summary: {}", summary).bright_blue());
    }
    if let Some(sentiment) = &insight.sentiment {
        println!("{}", format!("sentiment: {}", sentiment).bright_black());
    }
}

fn print_section(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}", heading.bright_yellow());
    for item in items {
        println!("  - {}", item);
    }
}

fn render_view(controller: &AppController<FileSessionStore, RemoteInsightClient>) {
    match controller.view() {
        ViewState::Login => {
            println!(
                "{}",
                "Not signed in. 'login <email>' or 'register <email>'.".bright_black()
            );
        }
        ViewState::Register => {
            println!(
                "{}",
                "Registration: 'register <email>' or 'back' to login.".bright_black()
            );
        }
        ViewState::Dashboard => {
            let entries = controller.cache().entries();
            if entries.is_empty() {
                println!("{}", "No insights yet. 'new' creates one.".bright_black());
            } else {
                println!("{}", format!("{} insights:", entries.len()).bold());
                for insight in entries {
                    print_insight_line(insight);
                }
            }
        }
        ViewState::Clusters(clusters) => {
            if clusters.is_empty() {
                println!("{}", "No clusters (empty corpus).".bright_black());
            }
            for cluster in clusters {
                let representative = cluster.representative.as_deref().unwrap_or("(no theme)");
                println!(
                    "{} {}",
                    format!("cluster {}:", cluster.cluster_id).bright_yellow(),
                    representative.bold()
                );
                let ids: Vec<String> = cluster.insight_ids.iter().map(|id| id.to_string()).collect();
                println!("  {}", format!("insights: {}", ids.join(", ")).bright_black());
            }
        }
        ViewState::Extract(extraction) => {
            print_section("Key points", &extraction.key_points);
            print_section("Action items", &extraction.action_items);
            print_section("Questions", &extraction.questions);
            println!("{}", format!("tone: {}", extraction.tone).bright_black());
            if !extraction.tags.is_empty() {
                println!(
                    "{}",
                    format!("tags: {}", extraction.tags.join(", ")).bright_black()
                );
            }
        }
    }
}

fn print_help() {
    println!("{}", "Session:".bold());
    println!("  login <email>        sign in (prompts for password)");
    println!("  register <email>     create an account (prompts for password)");
    println!("  whoami               show the signed-in user");
    println!("  logout               end the session");
    println!("{}", "Insights:".bold());
    println!("  list | refresh       fetch the insight list");
    println!("  show <id>            print one insight in full");
    println!("  new                  create an insight (prompts for fields)");
    println!("  edit <id>            open an insight for editing");
    println!("  set <field> <value>  change title, content or tags in the open edit");
    println!("  save | cancel        commit or discard the open edit");
    println!("  delete <id>          delete an insight");
    println!("{}", "Analysis:".bold());
    println!("  extract <id>         extract structure from a saved insight");
    println!("  analyze              extract structure from unsaved text (prompts)");
    println!("  clusters             show thematic clusters");
    println!("  back                 return to the dashboard");
    println!("  quit                 exit");
}

fn prompt(rl: &mut Editor<CliHelper, rustyline::history::FileHistory>, label: &str) -> Result<String> {
    Ok(rl.readline(&format!("{}> ", label))?.trim().to_string())
}

/// Prompts with a pre-filled, editable value (retry after a failed create).
fn prompt_with_initial(
    rl: &mut Editor<CliHelper, rustyline::history::FileHistory>,
    label: &str,
    initial: &str,
) -> Result<String> {
    Ok(rl
        .readline_with_initial(&format!("{}> ", label), (initial, ""))?
        .trim()
        .to_string())
}

fn parse_id(arg: Option<&str>) -> Option<i64> {
    match arg.and_then(|raw| raw.parse::<i64>().ok()) {
        Some(id) => Some(id),
        None => {
            eprintln!("{}", "Expected a numeric insight id.".red());
            None
        }
    }
}

async fn handle_command(
    controller: &mut AppController<FileSessionStore, RemoteInsightClient>,
    rl: &mut Editor<CliHelper, rustyline::history::FileHistory>,
    pending_draft: &mut Option<InsightDraft>,
    line: &str,
) -> Result<()> {
    let mut parts = line.splitn(3, ' ');
    let command = parts.next().unwrap_or("");
    let arg1 = parts.next();
    let rest = parts.next();

    match command {
        "help" => print_help(),
        "login" => {
            let Some(email) = arg1 else {
                eprintln!("{}", "Usage: login <email>".red());
                return Ok(());
            };
            let password = prompt(rl, "password")?;
            match controller.login(email, &password).await {
                Ok(()) => {
                    println!("{}", format!("Signed in as {}", email).green());
                    render_view(controller);
                }
                Err(err) => print_error(&err),
            }
        }
        "register" => {
            let Some(email) = arg1 else {
                eprintln!("{}", "Usage: register <email>".red());
                return Ok(());
            };
            if controller.view().requires_session() {
                eprintln!("{}", "Already signed in; 'logout' first.".red());
                return Ok(());
            }
            controller.show_register();
            let password = prompt(rl, "password")?;
            match controller.register(email, &password).await {
                Ok(profile) => {
                    println!(
                        "{}",
                        format!("Account created for {}. You can log in now.", profile.email)
                            .green()
                    );
                }
                Err(err) => print_error(&err),
            }
        }
        "logout" => match controller.logout().await {
            Ok(()) => println!("{}", "Signed out.".green()),
            Err(err) => print_error(&err),
        },
        "whoami" => match controller.whoami().await {
            Ok(profile) => println!("{}", format!("{} (id {})", profile.email, profile.id)),
            Err(err) => print_error(&err),
        },
        "list" | "refresh" => match controller.refresh().await {
            Ok(()) => render_view(controller),
            Err(err) => print_error(&err),
        },
        "show" => {
            let Some(id) = parse_id(arg1) else {
                return Ok(());
            };
            match controller.cache().get(id) {
                Some(insight) => print_insight(insight),
                None => eprintln!(
                    "{}",
                    format!("No cached insight #{}; try 'refresh'.", id).red()
                ),
            }
        }
        "new" => {
            // A failed create keeps the entered values for the next try.
            let initial = pending_draft.take().unwrap_or_default();
            let title = prompt_with_initial(rl, "title", &initial.title)?;
            let content = prompt_with_initial(rl, "content", &initial.content)?;
            let tags = prompt_with_initial(rl, "tags", &initial.tags)?;
            let draft = InsightDraft::new(title, content, tags);
            match controller.create_insight(&draft).await {
                Ok(()) => {
                    println!("{}", "Created.".green());
                    render_view(controller);
                }
                Err(err) => {
                    print_error(&err);
                    *pending_draft = Some(draft);
                    println!(
                        "{}",
                        "Your input is kept; 'new' again to retry.".bright_black()
                    );
                }
            }
        }
        "edit" => {
            let Some(id) = parse_id(arg1) else {
                return Ok(());
            };
            match controller.begin_edit(id) {
                Ok(()) => println!(
                    "{}",
                    format!("Editing #{}. 'set <field> <value>', then 'save' or 'cancel'.", id)
                        .bright_black()
                ),
                Err(err) => print_error(&err),
            }
        }
        "set" => {
            let (Some(field_raw), Some(value)) = (arg1, rest) else {
                eprintln!("{}", "Usage: set <title|content|tags> <value>".red());
                return Ok(());
            };
            let result = field_raw
                .parse::<EditField>()
                .and_then(|field| controller.edit_field(field, value));
            if let Err(err) = result {
                print_error(&err);
            }
        }
        "save" => match controller.save_edit().await {
            Ok(()) => {
                println!("{}", "Saved.".green());
                render_view(controller);
            }
            Err(err) => print_error(&err),
        },
        "cancel" => {
            controller.cancel_edit();
            println!("{}", "Edit discarded.".bright_black());
        }
        "delete" => {
            let Some(id) = parse_id(arg1) else {
                return Ok(());
            };
            match controller.delete_insight(id).await {
                Ok(()) => {
                    println!("{}", format!("Deleted #{}.", id).green());
                    render_view(controller);
                }
                Err(err) => print_error(&err),
            }
        }
        "extract" => {
            let Some(id) = parse_id(arg1) else {
                return Ok(());
            };
            match controller.open_extraction(id).await {
                Ok(()) => render_view(controller),
                Err(err) => print_error(&err),
            }
        }
        "analyze" => {
            let content = prompt(rl, "content")?;
            let draft = InsightDraft::new("", content, "");
            match controller.extract_unsaved(&draft).await {
                Ok(()) => render_view(controller),
                Err(err) => print_error(&err),
            }
        }
        "clusters" => match controller.open_clusters().await {
            Ok(()) => render_view(controller),
            Err(err) => print_error(&err),
        },
        "back" => {
            if matches!(controller.view(), ViewState::Register) {
                controller.show_login();
            } else {
                controller.back_to_dashboard();
            }
            render_view(controller);
        }
        other => {
            eprintln!(
                "{}",
                format!("Unknown command '{}'. Type 'help'.", other).bright_black()
            );
        }
    }
    Ok(())
}

fn load_config(args: &Args) -> ClientConfig {
    let mut config = match ConfigStorage::new() {
        Ok(storage) => match storage.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Failed to load config, using defaults: {}", err);
                ClientConfig::default()
            }
        },
        Err(err) => {
            tracing::warn!("Config directory unavailable, using defaults: {}", err);
            ClientConfig::default()
        }
    };
    if let Ok(url) = std::env::var("IHUB_API_URL") {
        config.api_base_url = url;
    }
    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args);

    let session = FileSessionStore::new()?;
    let client = RemoteInsightClient::from_config(&config);
    let mut controller = AppController::new(session, client).await;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== ihub ===".bright_magenta().bold());
    println!(
        "{}",
        format!("API: {}", config.api_base_url).bright_black()
    );
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!();

    // Populate the dashboard from a persisted session, if any.
    if matches!(controller.view(), ViewState::Dashboard) {
        if let Err(err) = controller.refresh().await {
            print_error(&err);
        }
    }
    render_view(&controller);

    let mut pending_draft: Option<InsightDraft> = None;

    loop {
        let readline = rl.readline(&format!("{}> ", controller.view().name()));

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

                handle_command(&mut controller, &mut rl, &mut pending_draft, trimmed).await?;
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

    Ok(())
}
