//! Message record and the deduplicating inbox store.

use serde::Serialize;
use std::collections::HashSet;

/// One message scraped from a fakemailgenerator inbox page.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Recipient address as rendered in the inbox list.
    pub to: String,
    /// Sender address.
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Site-formatted receipt timestamp.
    pub received: String,
    /// Site-formatted expiry timestamp.
    pub expires: String,
    /// Plain text extracted from the message's rendering frame.
    pub body: String,
    /// Relative time as rendered in the inbox list, distinct from `received`.
    pub display_time: String,
}

impl Message {
    /// Identity key used for deduplication.
    ///
    /// Only `to`, `from` and `subject` participate, in that order. Two records
    /// that agree on those three fields are the same message even when their
    /// timestamps differ between refreshes.
    pub fn fingerprint(&self) -> String {
        format!("{}-{}-{}", self.to, self.from, self.subject)
    }
}

/// Messages accumulated for one watch session, deduplicated by fingerprint.
///
/// Grows monotonically and preserves first-seen order. One session owns one
/// `Inbox`; there is no concurrent-mutation support.
#[derive(Debug, Default)]
pub struct Inbox {
    seen: HashSet<String>,
    messages: Vec<Message>,
}

impl Inbox {
    /// Create an empty inbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a message with this fingerprint has already been accepted.
    pub fn contains(&self, fingerprint: &str) -> bool {
        self.seen.contains(fingerprint)
    }

    /// Insert a message, preserving first-seen order.
    ///
    /// Returns `false` and changes nothing when the fingerprint is already
    /// present; earlier fields are never updated by a later sighting.
    pub fn push(&mut self, message: Message) -> bool {
        if !self.seen.insert(message.fingerprint()) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// All accepted messages in first-seen order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of accepted messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no messages have been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
