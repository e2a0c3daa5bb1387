use serde::{Deserialize, Serialize};

/// A successful reply from the completion service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionReply {
    /// The raw reply text, before any post-processing.
    pub reply: String,
    /// Prompt suggestions the service chose to attach, if any.
    ///
    /// The chip flow never reads these; they are kept so that front ends
    /// can surface them separately.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl CompletionReply {
    /// Creates a reply without suggestions.
    #[inline]
    pub fn text<S: Into<String>>(reply: S) -> Self {
        Self {
            reply: reply.into(),
            suggestions: vec![],
        }
    }
}

/// The reply of the suggestions-only call path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionsReply {
    /// Up to six short prompt ideas.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_reply() {
        let reply: CompletionReply =
            serde_json::from_str(r#"{"reply":"Hi there"}"#).unwrap();
        assert_eq!(reply, CompletionReply::text("Hi there"));

        let reply: CompletionReply = serde_json::from_str(
            r#"{"reply":"Hi","suggestions":["What do you do?"]}"#,
        )
        .unwrap();
        assert_eq!(reply.suggestions, vec!["What do you do?".to_owned()]);

        assert!(
            serde_json::from_str::<CompletionReply>(r#"{"suggestions":[]}"#)
                .is_err()
        );
    }
}
