use serde::{Deserialize, Serialize};

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One entry in a Q&A transcript. Identity is its position in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: &str) -> Self {
        Self { sender: Sender::User, text: text.to_string() }
    }
    pub fn ai(text: &str) -> Self {
        Self { sender: Sender::Ai, text: text.to_string() }
    }
}
