use anyhow::Result;
use clap::Parser;
use mdchat::cli::{Cli, Commands};
use mdchat::storage::filesystem::FileStorage;
use mdchat::storage::memory::InMemoryStorage;
use mdchat::{utils, CompletionClient, RelayClient, RelayState, SessionStore, Settings};
use mdchat::{Role, SessionStorage, Turn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => handle_serve(settings, port).await,
        Commands::Chat {
            relay_url,
            storage,
            ephemeral,
        } => handle_chat(settings, relay_url, storage, ephemeral).await,
    }
}

async fn handle_serve(settings: Settings, port: Option<u16>) -> Result<()> {
    let api_key = Settings::api_key()?;

    let completion = CompletionClient::new(&settings.llm.base_url, api_key, &settings.llm.model);
    let state = RelayState::new(completion);

    let port = port.unwrap_or(settings.relay.port);
    mdchat::relay::serve(state, port).await
}

async fn handle_chat(
    settings: Settings,
    relay_url: Option<String>,
    storage: Option<String>,
    ephemeral: bool,
) -> Result<()> {
    let relay_url = relay_url.unwrap_or(settings.client.relay_url);
    let storage_path = storage.unwrap_or(settings.client.storage_path);

    let storage: Arc<dyn SessionStorage> = if ephemeral {
        Arc::new(InMemoryStorage::new())
    } else {
        Arc::new(FileStorage::new(PathBuf::from(&storage_path)))
    };

    let relay = RelayClient::new(&relay_url);
    let mut store = SessionStore::new(relay, storage).await;

    utils::print_header("Mdchat");
    utils::print_info(&format!("Relay: {}", relay_url));
    if ephemeral {
        utils::print_info("Records: in memory only");
    } else {
        utils::print_info(&format!("Records: {}", storage_path));
    }
    if !store.records().is_empty() {
        utils::print_success(&format!(
            "Restored {} session records",
            store.records().len()
        ));
    }
    utils::print_info("Type a message, or /help for commands\n");

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin);

    loop {
        utils::print_prompt("You: ");
        let mut input = String::new();
        if reader.read_line(&mut input).await? == 0 {
            println!();
            break;
        }

        let line = input.trim_end_matches(['\r', '\n']);
        let command = line.trim();

        if command.is_empty() {
            continue;
        }

        if command == "/quit" {
            break;
        }

        if command == "/new" {
            store.start_new();
            utils::print_success("Started a new conversation");
            println!();
            continue;
        }

        if command == "/sessions" {
            if store.records().is_empty() {
                utils::print_info("No session records yet");
            } else {
                for (i, record) in store.records().iter().enumerate() {
                    println!("  {}: {}", i + 1, record.summary());
                }
            }
            println!();
            continue;
        }

        if let Some(rest) = command.strip_prefix("/open") {
            let opened = rest
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(|index| store.select_record(index))
                .unwrap_or(false);

            if opened {
                render_transcript(store.active());
            } else {
                utils::print_error("Usage: /open <number> (see /sessions)");
                println!();
            }
            continue;
        }

        if command == "/help" {
            println!("Commands:");
            println!("  /new       - Start a new conversation");
            println!("  /sessions  - List saved session records");
            println!("  /open <n>  - Continue from a saved record");
            println!("  /help      - Show this help");
            println!("  /quit      - Exit\n");
            continue;
        }

        if command.starts_with('/') {
            utils::print_error(&format!("Unknown command: {} (try /help)", command));
            println!();
            continue;
        }

        if !store.append_user_turn(line) {
            continue;
        }

        utils::print_info("Assistant: ");
        match store.submit_exchange().await {
            Ok(reply) => {
                println!("{}\n", utils::render_markdown(&reply.content));
            }
            Err(e) => {
                utils::print_error(&format!("Error: {:#}", e));
                println!();
            }
        }
    }

    Ok(())
}

fn render_transcript(turns: &[Turn]) {
    for turn in turns {
        match turn.role {
            Role::User => {
                utils::print_prompt("You: ");
                println!("{}", turn.content);
            }
            Role::Assistant => {
                utils::print_info("Assistant: ");
                println!("{}\n", utils::render_markdown(&turn.content));
            }
        }
    }
}
