#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

/// A single transcript entry. Messages are never edited once pushed to the
/// transcript.
#[derive(Clone, Debug)]
pub struct Message {
    pub author: Author,
    pub text: String,
    /// Self reported certainty of the answer service, only set on answers.
    pub confidence: Option<f64>,
    pub timestamp: DateTime<Local>,
    mtype: MessageType,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message::new_with_type(author, MessageType::Normal, text);
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string().replace('\t', "  "),
            confidence: None,
            timestamp: Local::now(),
            mtype,
        };
    }

    pub fn with_confidence(mut self, confidence: Option<f64>) -> Message {
        self.confidence = confidence;
        return self;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn formatted_time(&self) -> String {
        return self.timestamp.format("%H:%M").to_string();
    }

    pub fn confidence_label(&self) -> Option<String> {
        return self.confidence.map(|confidence| {
            return format!("{:.0}% match", confidence * 100.0);
        });
    }
}
