use folio_chat_service::{CompletionReply, ErrorKind};
use serde::{Deserialize, Serialize};

/// One scripted answer of the test service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetStep {
    /// Answer with the given reply.
    #[serde(rename = "reply")]
    Reply(PresetReply),
    /// Fail with the given error kind.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
}

/// The preset reply for a successful step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetReply {
    /// The reply text.
    pub reply: String,
    /// Suggestions attached to the reply.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl PresetReply {
    /// Creates a `PresetReply` with the specified text.
    #[inline]
    pub fn with_text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            suggestions: vec![],
        }
    }

    /// Attaches suggestions to the reply.
    #[inline]
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }
}

impl From<PresetReply> for CompletionReply {
    fn from(preset: PresetReply) -> Self {
        CompletionReply {
            reply: preset.reply,
            suggestions: preset.suggestions,
        }
    }
}
