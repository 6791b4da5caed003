use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use interview_console::View;
use interview_console::api::{HttpBackend, SchedulerBackend};
use interview_console::core::calendar::{CalendarState, format_time};
use interview_console::core::config::{self, CliOverrides, ConsoleConfig, ResolvedConfig};
use interview_console::core::conversation::{Conversation, Role};
use interview_console::core::store::SnapshotStore;
use interview_console::tui;

#[derive(Parser)]
#[command(
    name = "interview-console",
    about = "Terminal front-end for the interview scheduling assistant"
)]
struct Args {
    /// Backend base URL (overrides INTERVIEW_API_URL and the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory holding the conversation snapshot
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// View to open on start
    #[arg(long, value_enum)]
    view: Option<View>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send one message to the assistant and print the reply
    Chat {
        message: String,
        /// Start a new conversation instead of continuing the saved one
        #[arg(long)]
        new: bool,
    },
    /// Print the scheduled interviews
    Interviews {
        /// Only rows whose id, candidate name or interviewer id contain this
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger: the TUI owns stdout
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("interview-console.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("warning: {e}; using defaults");
        ConsoleConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url.clone(),
        data_dir: args.data_dir.clone(),
        start_view: args.view,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!(
        "Interview console starting: backend={}, data_dir={}",
        resolved.base_url,
        resolved.data_dir.display()
    );

    let backend = HttpBackend::new(resolved.base_url.clone(), resolved.request_timeout)
        .map_err(std::io::Error::other)?;
    let store = SnapshotStore::new(&resolved.data_dir);

    match args.command {
        None => tui::run(&resolved, Arc::new(backend), store),
        Some(Command::Chat { message, new }) => chat_once(&backend, store, &message, new).await,
        Some(Command::Interviews { query }) => print_interviews(&backend, &resolved, &query).await,
    }
}

/// Sends one message through the same controller and store the TUI uses.
async fn chat_once(
    backend: &dyn SchedulerBackend,
    mut store: SnapshotStore,
    message: &str,
    new: bool,
) -> std::io::Result<()> {
    let mut conversation = Conversation::new();
    if new {
        conversation.start_new();
    } else if let Some(snapshot) = store.load() {
        conversation.restore(snapshot);
    }

    let before = conversation.session.messages.len();
    if !conversation.send_message(backend, message).await {
        eprintln!("Nothing to send.");
        return Ok(());
    }
    store.sync(&conversation.session);

    for msg in &conversation.session.messages[before..] {
        if msg.role == Role::Assistant {
            println!("{}", msg.text);
        }
    }
    println!(
        "\n[agent: {}] [conversation: {}]",
        conversation.session.active_agent, conversation.session.conversation_id
    );
    Ok(())
}

async fn print_interviews(
    backend: &dyn SchedulerBackend,
    config: &ResolvedConfig,
    query: &str,
) -> std::io::Result<()> {
    log::debug!("Listing interviews from {}", config.base_url);
    let mut calendar = CalendarState::new();
    let seq = calendar.begin_fetch();
    let result = backend.list_interviews().await;
    calendar.apply_fetch(seq, result);
    calendar.query = query.to_string();

    let rows = calendar.filtered();
    if rows.is_empty() {
        println!("No interviews found");
        return Ok(());
    }

    println!(
        "{:<4} {:<24} {:<14} {:<24} {}",
        "#", "Candidate", "Interviewer", "Time", "Status"
    );
    for (i, interview) in rows.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:<14} {:<24} {}",
            i + 1,
            interview.candidate_display(),
            interview.interviewer_id,
            format_time(interview.scheduled_time.as_deref()),
            interview.status
        );
    }
    Ok(())
}
