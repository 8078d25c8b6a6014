mod prompt;
mod state;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use hearting_board::{DetailLoad, DetailView, ReportOutcome};
use hearting_core::{MessageId, ViewMode};
use prompt::TerminalPrompter;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "hearting", version, about = "Read, react to and report hearts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the hearts in the inbox.
    Inbox,
    /// Open one heart and show its content and expiry.
    Open {
        #[arg(value_parser = parse_message_id)]
        id: MessageId,
        #[arg(long, default_value = "received")]
        mode: ViewMode,
    },
    /// React to a heart with an emoji.
    React {
        #[arg(value_parser = parse_message_id)]
        id: MessageId,
        emoji_id: u32,
    },
    /// Report a heart, optionally deleting it afterwards.
    Report {
        #[arg(value_parser = parse_message_id)]
        id: MessageId,
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// Delete a heart.
    Delete {
        #[arg(value_parser = parse_message_id)]
        id: MessageId,
    },
    /// Close the currently open heart.
    Close,
    /// Switch the "my board" flag.
    Board {
        #[arg(value_parser = ["on", "off"])]
        value: String,
    },
    /// Show the persisted UI state and config location.
    Status,
}

fn parse_message_id(raw: &str) -> Result<MessageId, String> {
    MessageId::parse(raw).ok_or_else(|| format!("`{raw}` is not a message id"))
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config_manager, config) = AppState::load_config()?;
    init_tracing(&config.logging.filter);

    let app = AppState::initialize(config_manager, config, Arc::new(TerminalPrompter))?;
    run(&app, cli.command).await
}

async fn run(app: &AppState, command: Command) -> anyhow::Result<()> {
    let board = &app.board;

    match command {
        Command::Inbox => {
            board.inbox.load_inbox().await.context("fetch inbox")?;
            let items = board.inbox.items().await;
            if items.is_empty() {
                println!("inbox is empty");
            }
            for item in items {
                let reaction = match item.emoji_id {
                    0 => "-".to_string(),
                    id => format!("emoji {id}"),
                };
                println!(
                    "{:>6}  heart {:<3} {:<8} {}",
                    item.message_id, item.heart_id, reaction, item.context
                );
            }
        }
        Command::Open { id, mode } => {
            board.inbox.open_message(id);
            match board.detail.load_selected(mode).await {
                Ok(DetailLoad::Loaded(_)) => {
                    if let Some(view) = board.detail.view(&Utc::now()).await? {
                        print_view(&view);
                    }
                }
                Ok(DetailLoad::Skipped | DetailLoad::Superseded) => {}
                Err(err) => println!("heart {id} is not available ({err})"),
            }
        }
        Command::React { id, emoji_id } => {
            let reaction = board
                .detail
                .react_with_emoji(id, emoji_id)
                .await
                .context("send emoji reaction")?;
            println!("reacted with {}", reaction.emoji_url);
        }
        Command::Report { id, content } => {
            board.detail.open_reporting();
            match board.detail.report_message(id, &content.join(" ")).await {
                ReportOutcome::Reported { deleted: true } => println!("reported and deleted"),
                ReportOutcome::Reported { deleted: false } => println!("reported"),
                ReportOutcome::Failed(failure) => println!("report not filed ({failure:?})"),
            }
        }
        Command::Delete { id } => {
            board.detail.delete_message(id).await.context("delete message")?;
        }
        Command::Close => {
            board.detail.close_modal().await;
        }
        Command::Board { value } => {
            let on = value == "on";
            board.store.update(|state| state.with_my_board(on));
        }
        Command::Status => {
            let state = board.store.snapshot();
            println!("config       {}", app.config_manager.config_path().display());
            println!("api          {}", app.config.api.base_url);
            println!("open         {}", state.read_message);
            match state.selected_message_id {
                Some(id) => println!("selected     {id}"),
                None => println!("selected     -"),
            }
            println!("my board     {}", state.is_my_board);
        }
    }

    Ok(())
}

fn print_view(view: &DetailView) {
    let detail = &view.detail;
    println!("[{}] {} ({})", view.mode, detail.title, detail.heart_name);
    println!("{}", detail.short_description);
    println!();
    println!("{}", detail.content);
    println!();
    println!("sent     {}", detail.created_date);
    match view.expiry.remaining() {
        Some(left) => println!(
            "expires  {} ({}h {}m left)",
            detail.expired_date,
            left.num_hours(),
            left.num_minutes() % 60
        ),
        None => println!("expired  {}", detail.expired_date),
    }
    if !view.selected_emoji_url.is_empty() {
        println!("reaction {}", view.selected_emoji_url);
    }
    if detail.is_stored {
        println!("saved to your board");
    }
}
