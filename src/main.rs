use std::io::IsTerminal;
use std::sync::Arc;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ragchat::adapters::{FileConversationStore, ReqwestHttpClient, TerminalView};
use ragchat::api::{ChatApi, DocumentApi};
use ragchat::app::App;
use ragchat::cli::{parse_args, run_cli_command, version_line};
use ragchat::config::ClientConfig;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "ragchat=warn";

/// Logs go to stderr; stdout is the chat surface.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // --version, --help and bad flags exit here
    let Some(options) = run_cli_command(parse_args(std::env::args())) else {
        return Ok(());
    };

    color_eyre::install()?;
    init_tracing();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = options.base_url {
        config = config.with_base_url(base_url);
    }

    let runtime = tokio::runtime::Runtime::new().wrap_err("failed to start tokio runtime")?;
    runtime.block_on(run(config, options.new_conversation))
}

async fn run(config: ClientConfig, new_conversation: bool) -> Result<()> {
    info!(base_url = %config.base_url, state_dir = %config.state_dir.display(), "starting");

    let http = Arc::new(
        ReqwestHttpClient::with_connect_timeout(config.request_timeout())
            .wrap_err("failed to build HTTP client")?,
    );
    let chat = ChatApi::with_shared_client(config.base_url.clone(), Arc::clone(&http));
    let documents = DocumentApi::with_shared_client(config.base_url.clone(), http);
    let store = FileConversationStore::new(&config.state_dir);

    println!("{} connected to {}", version_line(), config.base_url);
    println!("Type a question, or /help for commands.\n");

    let mut app = App::new(chat, documents, store, TerminalView::stdout());
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;

    app.start(new_conversation).await;
    app.set_queue_input(!std::io::stdin().is_terminal());
    app.ready_for_input();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line.wrap_err("failed to read stdin")? {
                    Some(line) => app.handle_input(&line).await,
                    // Piped input: let the last answer finish before exiting
                    None => stdin_open = false,
                }
            }
            Some(message) = message_rx.recv() => {
                app.handle_message(message).await;
            }
            _ = tokio::signal::ctrl_c() => {
                if app.is_sending() {
                    app.cancel_stream();
                    app.ready_for_input();
                } else {
                    app.should_quit = true;
                }
            }
        }

        if app.should_quit || (!stdin_open && !app.is_sending()) {
            break;
        }
    }

    app.cancel_stream();
    println!();
    Ok(())
}
