//! Line-based terminal view.
//!
//! Renders the transcript, session list and document tables as plain lines
//! with crossterm colouring. Answer tokens are printed inline as they arrive
//! and flushed on [`ChatView::scroll_to_latest`].

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tracing::warn;

use crate::models::{
    display_category, ChatMessage, DocumentDetail, DocumentSummary, Role, SessionSummary,
};
use crate::traits::ChatView;

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Date format used in session and document listings.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Cyan,
        Role::Bot => Color::Green,
        Role::System => Color::Yellow,
    }
}

/// Terminal view writing to any [`Write`] sink (stdout in production).
pub struct TerminalView<W: Write + Send> {
    out: W,
    answer_open: bool,
    input_enabled: bool,
}

impl TerminalView<io::Stdout> {
    /// View writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            answer_open: false,
            input_enabled: true,
        }
    }

    /// Whether the send affordance is currently enabled.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Consume the view and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn label(&mut self, role: Role) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(role_color(role)),
            Print(format!("{}> ", role.label())),
            ResetColor
        )
    }

    fn separator(&mut self) -> io::Result<()> {
        queue!(self.out, Print("─".repeat(LINE_WIDTH)), Print("\n"))
    }

    fn prompt(&mut self) -> io::Result<()> {
        if self.input_enabled {
            queue!(
                self.out,
                SetForegroundColor(role_color(Role::User)),
                Print(format!("{}> ", Role::User.label())),
                ResetColor
            )?;
        }
        self.out.flush()
    }

    /// Run a write, logging instead of propagating IO errors.
    fn write_with<F>(&mut self, what: &str, f: F)
    where
        F: FnOnce(&mut Self) -> io::Result<()>,
    {
        if let Err(e) = f(self) {
            warn!("terminal write failed ({}): {}", what, e);
        }
    }
}

impl<W: Write + Send> ChatView for TerminalView<W> {
    fn show_message(&mut self, message: &ChatMessage) {
        self.write_with("message", |v| {
            v.label(message.role)?;
            queue!(v.out, Print(&message.content), Print("\n"))?;
            v.out.flush()
        });
    }

    fn begin_answer(&mut self) {
        self.answer_open = true;
        self.write_with("begin answer", |v| {
            v.label(Role::Bot)?;
            v.out.flush()
        });
    }

    fn append_token(&mut self, text: &str) {
        if !self.answer_open {
            return;
        }
        self.write_with("token", |v| queue!(v.out, Print(text)));
    }

    fn replace_answer(&mut self, text: &str) {
        if !self.answer_open {
            return;
        }
        // Already-printed tokens cannot be unprinted; restart the answer line
        self.write_with("replace answer", |v| {
            queue!(v.out, Print("\n"))?;
            v.label(Role::Bot)?;
            queue!(
                v.out,
                SetForegroundColor(Color::Red),
                Print(text),
                ResetColor
            )?;
            v.out.flush()
        });
    }

    fn end_answer(&mut self) {
        if !self.answer_open {
            return;
        }
        self.answer_open = false;
        self.write_with("end answer", |v| {
            queue!(v.out, Print("\n"))?;
            v.out.flush()
        });
    }

    fn scroll_to_latest(&mut self) {
        self.write_with("flush", |v| v.out.flush());
    }

    fn clear(&mut self) {
        self.answer_open = false;
        self.write_with("clear", |v| {
            queue!(v.out, Clear(ClearType::All), MoveTo(0, 0))?;
            v.out.flush()
        });
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        if enabled {
            self.write_with("prompt", |v| v.prompt());
        }
    }

    fn show_sessions(&mut self, sessions: &[SessionSummary], active_id: &str) {
        self.write_with("sessions", |v| {
            v.separator()?;
            if sessions.is_empty() {
                queue!(v.out, Print("  (no conversations)\n"))?;
            }
            for session in sessions {
                let marker = if session.conversation_id == active_id {
                    "*"
                } else {
                    " "
                };
                let created = session
                    .created_at
                    .map(|t| t.format(DATE_FORMAT).to_string())
                    .unwrap_or_default();
                queue!(
                    v.out,
                    Print(format!(
                        "{} {}  {}  {}\n",
                        marker, session.conversation_id, created, session.title
                    ))
                )?;
            }
            v.separator()?;
            v.out.flush()
        });
    }

    fn show_documents(&mut self, documents: &[DocumentSummary]) {
        self.write_with("documents", |v| {
            v.separator()?;
            if documents.is_empty() {
                queue!(v.out, Print("  (no documents)\n"))?;
            }
            for doc in documents {
                let created = doc
                    .created_at
                    .map(|t| t.format(DATE_FORMAT).to_string())
                    .unwrap_or_default();
                queue!(
                    v.out,
                    Print(format!(
                        "{}  {}  [{}]  {} chunks  {}\n",
                        doc.document_id,
                        doc.title,
                        display_category(&doc.category),
                        doc.chunk_count,
                        created
                    ))
                )?;
            }
            v.separator()?;
            v.out.flush()
        });
    }

    fn show_document(&mut self, document: &DocumentDetail) {
        self.write_with("document", |v| {
            v.separator()?;
            queue!(
                v.out,
                Print(format!("{}\n", document.title)),
                Print(format!(
                    "id: {}  category: {}  chunks: {}\n",
                    document.document_id,
                    display_category(&document.category),
                    document.chunk_count
                ))
            )?;
            v.separator()?;
            queue!(v.out, Print(&document.content), Print("\n"))?;
            v.separator()?;
            v.out.flush()
        });
    }

    fn show_notice(&mut self, text: &str) {
        self.write_with("notice", |v| {
            queue!(
                v.out,
                SetForegroundColor(role_color(Role::System)),
                Print(text),
                ResetColor,
                Print("\n")
            )?;
            v.out.flush()
        });
    }
}
