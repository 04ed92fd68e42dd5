//! Command-line flags.

/// Options for an interactive chat session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions {
    /// Ignore the stored conversation id and start a new one
    pub new_conversation: bool,
    /// Server base URL, overriding config and environment
    pub base_url: Option<String>,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the interactive chat (default)
    Chat(ChatOptions),
    /// Arguments could not be parsed
    Invalid(String),
}

/// Turn `argv` (program name first) into a [`CliCommand`].
///
/// `--version` and `--help` end parsing where they appear. Unknown flags are
/// ignored.
///
/// # Examples
///
/// ```
/// use ragchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["ragchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = ChatOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--new" => options.new_conversation = true,
            "--base-url" => match args.next() {
                Some(url) if !url.starts_with('-') => options.base_url = Some(url),
                _ => return CliCommand::Invalid("--base-url requires a value".to_string()),
            },
            other => {
                if let Some(url) = other.strip_prefix("--base-url=") {
                    if url.is_empty() {
                        return CliCommand::Invalid("--base-url requires a value".to_string());
                    }
                    options.base_url = Some(url.to_string());
                }
            }
        }
    }

    CliCommand::Chat(options)
}
