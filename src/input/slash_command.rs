//! Slash commands.
//!
//! Plain lines are questions. Lines starting with `/` are commands that
//! manage conversations and the document store.

/// A command typed after `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    /// Start a new conversation
    New,

    /// List conversations
    Sessions,

    /// Switch to another conversation
    Switch,

    /// Delete a conversation
    Delete,

    /// List documents
    Docs,

    /// Show one document
    Doc,

    /// Ingest a text file's content as a document
    Ingest,

    /// Upload a file as a document
    Upload,

    /// Update a document's content, title or category
    Edit,

    /// Delete a document
    RemoveDoc,

    /// Show help
    Help,

    /// Leave the client
    Quit,
}

impl SlashCommand {
    /// Every command, in help order.
    pub const ALL: [SlashCommand; 12] = [
        SlashCommand::New,
        SlashCommand::Sessions,
        SlashCommand::Switch,
        SlashCommand::Delete,
        SlashCommand::Docs,
        SlashCommand::Doc,
        SlashCommand::Ingest,
        SlashCommand::Upload,
        SlashCommand::Edit,
        SlashCommand::RemoveDoc,
        SlashCommand::Help,
        SlashCommand::Quit,
    ];

    /// Resolve a typed word, leading `/` optional and case ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::input::slash_command::SlashCommand;
    ///
    /// assert_eq!(SlashCommand::parse("/new"), Some(SlashCommand::New));
    /// assert_eq!(SlashCommand::parse("CLEAR"), Some(SlashCommand::New));
    /// assert_eq!(SlashCommand::parse("/nope"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let word = input.trim().trim_start_matches('/');
        Self::ALL.into_iter().find(|cmd| {
            cmd.aliases()
                .iter()
                .any(|alias| alias[1..].eq_ignore_ascii_case(word))
        })
    }

    /// Canonical spelling, slash included.
    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted spellings; the canonical one comes first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SlashCommand::New => &["/new", "/clear"],
            SlashCommand::Sessions => &["/sessions"],
            SlashCommand::Switch => &["/switch", "/resume"],
            SlashCommand::Delete => &["/delete"],
            SlashCommand::Docs => &["/docs"],
            SlashCommand::Doc => &["/doc"],
            SlashCommand::Ingest => &["/ingest"],
            SlashCommand::Upload => &["/upload"],
            SlashCommand::Edit => &["/edit"],
            SlashCommand::RemoveDoc => &["/rmdoc"],
            SlashCommand::Help => &["/help"],
            SlashCommand::Quit => &["/quit", "/exit"],
        }
    }

    /// Argument synopsis shown in help.
    pub fn usage(&self) -> &'static str {
        match self {
            SlashCommand::Switch | SlashCommand::Delete => "<conversation-id>",
            SlashCommand::Doc | SlashCommand::RemoveDoc => "<document-id>",
            SlashCommand::Ingest | SlashCommand::Upload => "<path> <title> [category]",
            SlashCommand::Edit => "<document-id> <path|-> [title] [category]",
            _ => "",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SlashCommand::New => "Start a new conversation",
            SlashCommand::Sessions => "List conversations (* marks the active one)",
            SlashCommand::Switch => "Switch to a conversation and replay its history",
            SlashCommand::Delete => "Delete a conversation",
            SlashCommand::Docs => "List documents",
            SlashCommand::Doc => "Show a document",
            SlashCommand::Ingest => "Add a document from a text file's content",
            SlashCommand::Upload => "Upload a file as a document",
            SlashCommand::Edit => "Update a document; - keeps content, blanks keep the rest",
            SlashCommand::RemoveDoc => "Delete a document",
            SlashCommand::Help => "Show this help",
            SlashCommand::Quit => "Quit",
        }
    }

    /// One help line per command, aliases in parentheses.
    pub fn help_text() -> String {
        Self::ALL
            .iter()
            .map(|cmd| {
                let synopsis = [cmd.name(), cmd.usage()].join(" ");
                let description = match cmd.aliases() {
                    [_, rest @ ..] if !rest.is_empty() => {
                        format!("{} (also {})", cmd.description(), rest.join(", "))
                    }
                    _ => cmd.description().to_string(),
                };
                format!("  {:<40} {}", synopsis.trim_end(), description)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_slash() {
        for cmd in SlashCommand::ALL {
            assert_eq!(SlashCommand::parse(cmd.name()), Some(cmd));
            assert_eq!(
                SlashCommand::parse(cmd.name().trim_start_matches('/')),
                Some(cmd)
            );
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(SlashCommand::parse("/clear"), Some(SlashCommand::New));
        assert_eq!(SlashCommand::parse("/resume"), Some(SlashCommand::Switch));
        assert_eq!(SlashCommand::parse("/exit"), Some(SlashCommand::Quit));
    }

    #[test]
    fn test_parse_ignores_case_and_padding() {
        assert_eq!(SlashCommand::parse("  /DOCS "), Some(SlashCommand::Docs));
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert_eq!(SlashCommand::parse("/docz"), None);
        assert_eq!(SlashCommand::parse("/"), None);
        assert_eq!(SlashCommand::parse(""), None);
    }

    #[test]
    fn test_help_text_lists_every_command() {
        let help = SlashCommand::help_text();
        for cmd in SlashCommand::ALL {
            assert!(help.contains(cmd.name()));
        }
        assert!(help.contains("/ingest <path> <title> [category]"));
        assert!(help.contains("(also /exit)"));
    }
}
