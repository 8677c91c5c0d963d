#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::Scroll;
use super::Theme;
use crate::domain::models::Action;
use crate::domain::models::Answer;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Query;

pub const GREETING: &str =
    "Hello! I'm your health assistant. Ask me anything about medical topics!";
pub const CONNECTION_ERROR: &str =
    "Failed to connect to the chatbot server. Please try again later.";
pub const FALLBACK_ANSWER: &str =
    "⚠ Failed to connect to the chatbot server. Please try again later.";

/// Everything the chat screen knows about the current session. Owned by the
/// UI loop, never shared.
pub struct AppState {
    pub bubble_list: BubbleList,
    pub draft: String,
    pub last_error: Option<String>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub scroll: Scroll,
    pub theme: Theme,
    pub waiting_for_answer: bool,
}

impl AppState {
    pub fn new(theme: Theme) -> AppState {
        let mut app_state = AppState {
            bubble_list: BubbleList::new(theme.clone()),
            draft: "".to_string(),
            last_error: None,
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            scroll: Scroll::default(),
            theme,
            waiting_for_answer: false,
        };

        app_state.add_message(Message::new(Author::Bot, GREETING));

        return app_state;
    }

    pub fn update_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn can_submit(&self) -> bool {
        return !self.waiting_for_answer && !self.draft.trim().is_empty();
    }

    /// Starts a new turn. Returns false without touching anything when the
    /// text is blank or an answer is still pending.
    pub fn submit(&mut self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        let query = Query::new(text);
        if self.waiting_for_answer || query.is_empty() {
            return Ok(false);
        }

        tx.send(Action::AskQuestion(query))?;

        self.draft.clear();
        self.last_error = None;
        self.waiting_for_answer = true;
        self.add_message(Message::new(Author::User, text));

        return Ok(true);
    }

    pub fn handle_answer(&mut self, answer: Answer) {
        self.waiting_for_answer = false;
        self.add_message(
            Message::new(Author::Bot, &answer.answer).with_confidence(answer.confidence),
        );
    }

    pub fn handle_failure(&mut self, reason: &str) {
        tracing::debug!(reason, "question failed");

        self.waiting_for_answer = false;
        self.last_error = Some(CONNECTION_ERROR.to_string());
        self.add_message(Message::new_with_type(
            Author::Bot,
            MessageType::Error,
            FALLBACK_ANSWER,
        ));
    }

    pub fn handle_service_unavailable(&mut self, url: &str) {
        self.last_error = Some(format!(
            "Unable to reach the answer service at {url}. Questions will fail until it is running."
        ));
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, usize::from(self.last_known_width));

        self.scroll.set_state(
            self.bubble_list.len(),
            usize::from(self.last_known_height),
        );

        if self.waiting_for_answer {
            self.scroll.last();
        }
    }
}
