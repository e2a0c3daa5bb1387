use serde::{Deserialize, Serialize};

/// One exchange: a user message and the assistant reply shown for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    /// What the visitor sent.
    pub user: String,
    /// What the assistant answered, after post-processing.
    pub bot: String,
}

impl Turn {
    /// Creates a turn from a user message and a reply.
    #[inline]
    pub fn new<U: Into<String>, B: Into<String>>(user: U, bot: B) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
        }
    }
}

/// A request to be sent to the completion service.
///
/// On the wire this is `{"message": ..., "history": [...]}`, with
/// `"suggestionsOnly": true` added for the lightweight suggestions path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// The message just sent by the visitor.
    pub message: String,
    /// The most recent turns, oldest first.
    pub history: Vec<Turn>,
    /// Asks the service for prompt suggestions only, without a reply.
    #[serde(default, skip_serializing_if = "is_false")]
    pub suggestions_only: bool,
}

impl CompletionRequest {
    /// Creates a regular request carrying the `window` most recent turns
    /// of `history`.
    pub fn new<S: Into<String>>(
        message: S,
        history: &[Turn],
        window: usize,
    ) -> Self {
        Self {
            message: message.into(),
            history: tail(history, window).to_vec(),
            suggestions_only: false,
        }
    }

    /// Creates a suggestions-only request for the given history.
    pub fn suggestions_only(history: &[Turn], window: usize) -> Self {
        Self {
            message: String::new(),
            history: tail(history, window).to_vec(),
            suggestions_only: true,
        }
    }
}

/// Returns at most `n` trailing items of `items`.
#[inline]
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

#[inline]
fn is_false(value: &bool) -> bool {
    !*value
}
