//! CLI module for ragchat.
//!
//! Argument parsing plus the commands that exit before the chat starts:
//!
//! ```ignore
//! use ragchat::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(options) = run_cli_command(command) {
//!     // start the chat with `options`
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ChatOptions, CliCommand};
pub use version::{handle_help_command, handle_version_command, version_line, USAGE, VERSION};

/// Run a CLI command if applicable.
///
/// # Returns
///
/// * `Some(options)` - If the chat should start
///
/// # Note
///
/// `Version`, `Help` and `Invalid` never return; they exit the process.
pub fn run_cli_command(command: CliCommand) -> Option<ChatOptions> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => handle_help_command(),
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            std::process::exit(2)
        }
        CliCommand::Chat(options) => Some(options),
    }
}
