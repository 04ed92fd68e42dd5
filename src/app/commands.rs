//! Input line dispatch for the App.

use super::App;
use crate::input::{parse_input, Command, SlashCommand, UserInput};
use crate::traits::{ChatView, ConversationStore, HttpClient};

impl<C, S, V> App<C, S, V>
where
    C: HttpClient + 'static,
    S: ConversationStore,
    V: ChatView,
{
    /// Handle one line typed by the user.
    pub async fn handle_input(&mut self, line: &str) {
        if self.queue_input && self.sending {
            self.queued.push_back(line.to_string());
            return;
        }

        match parse_input(line) {
            UserInput::Empty => self.ready_for_input(),
            UserInput::Question(question) => self.submit_question(&question),
            UserInput::Invalid(message) => {
                self.view.show_notice(&message);
                self.ready_for_input();
            }
            UserInput::Command(command) => {
                self.run_command(command).await;
                self.ready_for_input();
            }
        }
    }

    /// Replay queued lines until one starts a new answer.
    pub(super) async fn run_queued(&mut self) {
        while !self.sending && !self.should_quit {
            let Some(line) = self.queued.pop_front() else {
                break;
            };
            self.handle_input(&line).await;
        }
    }

    /// Re-offer the prompt unless an answer is streaming or the app is quitting.
    pub fn ready_for_input(&mut self) {
        if !self.sending && !self.should_quit {
            self.view.set_input_enabled(true);
        }
    }

    async fn run_command(&mut self, command: Command) {
        match command {
            Command::New => self.new_chat().await,
            Command::Sessions => self.show_sessions().await,
            Command::Switch(id) => self.switch_session(&id).await,
            Command::Delete(id) => self.delete_session(&id).await,
            Command::Docs => self.list_documents().await,
            Command::Doc(id) => self.show_document(&id).await,
            Command::Ingest {
                path,
                title,
                category,
            } => {
                self.ingest_document(&path, &title, category.as_deref())
                    .await
            }
            Command::Upload {
                path,
                title,
                category,
            } => {
                self.upload_document(&path, &title, category.as_deref())
                    .await
            }
            Command::Edit {
                id,
                path,
                title,
                category,
            } => {
                self.edit_document(&id, &path, title.as_deref(), category.as_deref())
                    .await
            }
            Command::RemoveDoc(id) => self.delete_document(&id).await,
            Command::Help => {
                let help = format!("Commands:\n{}", SlashCommand::help_text());
                self.view.show_notice(&help);
            }
            Command::Quit => {
                self.cancel_stream();
                self.should_quit = true;
            }
        }
    }
}
