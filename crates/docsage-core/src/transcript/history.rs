use super::message::{Message, MessageId, Sender};

/// Append-only ordered log of messages for the selected document.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
    epoch: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message with the next id and returns it.
    pub fn append(&mut self, sender: Sender, content: impl Into<String>) -> Message {
        self.next_id += 1;
        let message = Message {
            id: MessageId(self.next_id),
            sender,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.messages.push(message.clone());
        message
    }

    /// Clears all messages. Ids keep counting from where they were.
    pub(crate) fn reset(&mut self) {
        self.messages.clear();
        self.epoch += 1;
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of resets so far. An action remembers the epoch it started in
    /// and only appends its outcome if the epoch is unchanged.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order_and_ids() {
        let mut transcript = Transcript::new();
        let a = transcript.append(Sender::User, "question");
        let b = transcript.append(Sender::Ai, "answer");

        assert!(a.id < b.id);
        assert_eq!(transcript.all(), &[a, b.clone()]);
    }

    #[test]
    fn test_ids_are_not_reused_after_reset() {
        let mut transcript = Transcript::new();
        let before = transcript.append(Sender::Ai, "one");
        transcript.reset();
        let after = transcript.append(Sender::Ai, "two");

        assert!(after.id > before.id);
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.epoch(), 1);
    }

    #[test]
    fn test_all_is_idempotent() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "Define: \"escrow\"");
        transcript.append(Sender::Ai, "Money held by a third party.");

        let first = transcript.all().to_vec();
        let second = transcript.all().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "same");
        transcript.append(Sender::User, "same");
        assert_eq!(transcript.len(), 2);
    }
}
