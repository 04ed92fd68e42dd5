//! Version and usage output for ragchat.

/// The current version of ragchat, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: ragchat [OPTIONS]

Options:
  --base-url <URL>  Chat server base URL (env: RAGCHAT_BASE_URL)
  --new             Start a new conversation instead of resuming
  -V, --version     Print version
  -h, --help        Print this help

Environment:
  RAGCHAT_BASE_URL      Server base URL (default: http://localhost:8080)
  RAGCHAT_STATE_DIR     Where the conversation id is kept
  RAGCHAT_TIMEOUT_SECS  Connect timeout in seconds
  RUST_LOG              Log filter (default: ragchat=warn), logs go to stderr

Type /help inside the chat for commands.";

/// Version line, e.g. `ragchat 0.1.0`.
pub fn version_line() -> String {
    format!("ragchat {}", VERSION)
}

/// Handle the --version command.
///
/// Prints the version string and exits successfully.
pub fn handle_version_command() -> ! {
    println!("{}", version_line());
    std::process::exit(0)
}

/// Handle the --help command.
pub fn handle_help_command() -> ! {
    println!("{}\n\n{}", version_line(), USAGE);
    std::process::exit(0)
}
