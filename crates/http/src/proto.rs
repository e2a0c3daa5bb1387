use std::sync::LazyLock;

use folio_chat_service::{
    CompletionReply, CompletionRequest, ErrorKind, SuggestionsReply, Turn,
    tail,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, OpenAIConfig};

const SUGGESTIONS_PROMPT: &str = "\
You generate short, helpful prompt suggestions for a portfolio AI assistant.
Use ONLY a strict JSON object: {\"suggestions\":[\"...\",\"...\",\"...\",\"...\"]} \
with 4 concise suggestions (5-8 words each).
Base suggestions on the conversation history if provided.
Avoid punctuation at the end. No extra text outside JSON.";

const MAX_SUGGESTIONS: usize = 6;

static TRAILING_SUGGESTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{\s*"suggestions".*\}$"#)
        .expect("trailing suggestions pattern")
});

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System { content: String },
    User { content: String },
    Assistant { content: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: u32,
}

// -----------
// Conversions
// -----------

pub fn create_request(
    req: &CompletionRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    let mut messages = vec![Message::System {
        content: config.system_prompt.clone(),
    }];
    messages.extend(history_messages(&req.history, config.history_window));
    messages.push(Message::User {
        content: req.message.clone(),
    });

    ChatCompletionRequest {
        model: config.model.clone(),
        messages,
        temperature: 0.3,
        max_tokens: 150,
    }
}

pub fn create_suggestions_request(
    history: &[Turn],
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    let mut messages = vec![Message::System {
        content: SUGGESTIONS_PROMPT.to_owned(),
    }];
    messages.extend(history_messages(history, 4));

    ChatCompletionRequest {
        model: config.model.clone(),
        messages,
        temperature: 0.4,
        max_tokens: 120,
    }
}

#[inline]
fn history_messages(
    history: &[Turn],
    window: usize,
) -> impl Iterator<Item = Message> + '_ {
    tail(history, window).iter().flat_map(|turn| {
        [
            Message::User {
                content: turn.user.clone(),
            },
            Message::Assistant {
                content: turn.bot.clone(),
            },
        ]
    })
}

/// Turns a chat completion into a reply, splitting off a trailing
/// `{"suggestions": [...]}` block if the model appended one.
pub fn parse_reply(completion: ChatCompletion) -> Result<CompletionReply, Error> {
    let Some(choice) = completion.choices.into_iter().next() else {
        return Err(Error::new(
            "no choices in completion",
            ErrorKind::MalformedResponse,
        ));
    };
    let Some(content) = choice.message.content else {
        return Err(Error::new(
            "completion has no content",
            ErrorKind::MalformedResponse,
        ));
    };

    let (reply, suggestions) = split_suggestions(&content);
    Ok(CompletionReply { reply, suggestions })
}

pub fn split_suggestions(content: &str) -> (String, Vec<String>) {
    let Some(found) = TRAILING_SUGGESTIONS.find(content) else {
        return (content.to_owned(), vec![]);
    };
    let Ok(parsed) = serde_json::from_str::<SuggestionsReply>(found.as_str())
    else {
        return (content.to_owned(), vec![]);
    };

    let reply = content[..found.start()].trim().to_owned();
    (reply, clean_suggestions(parsed.suggestions))
}

/// Reads the suggestions-only answer. Anything but the expected JSON object
/// yields no suggestions.
pub fn parse_suggestions(completion: ChatCompletion) -> Vec<String> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();
    match serde_json::from_str::<SuggestionsReply>(&content) {
        Ok(parsed) => clean_suggestions(parsed.suggestions),
        Err(err) => {
            debug!("ignored unparsable suggestions: {err}");
            vec![]
        }
    }
}

#[inline]
fn clean_suggestions(suggestions: Vec<String>) -> Vec<String> {
    suggestions
        .into_iter()
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::OpenAIConfigBuilder;

    fn completion(content: &str) -> ChatCompletion {
        serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
        }))
        .unwrap()
    }

    #[test]
    fn test_create_request() {
        let history: Vec<_> = (0..8)
            .map(|i| Turn::new(format!("q{i}"), format!("a{i}")))
            .collect();
        let request = CompletionRequest {
            message: "Skills".to_owned(),
            history,
            suggestions_only: false,
        };
        let config = OpenAIConfigBuilder::with_api_key("xxx")
            .with_model("custom")
            .with_system_prompt("You speak for the designer.")
            .build();

        let body = serde_json::to_value(create_request(&request, &config))
            .unwrap();
        assert_eq!(body["model"], "custom");
        assert_eq!(body["max_tokens"], 150);

        let messages = body["messages"].as_array().unwrap();
        // System prompt, six turns as pairs, then the new message.
        assert_eq!(messages.len(), 1 + 6 * 2 + 1);
        assert_eq!(
            messages[0],
            json!({ "role": "system", "content": "You speak for the designer." })
        );
        assert_eq!(messages[1], json!({ "role": "user", "content": "q2" }));
        assert_eq!(
            messages[2],
            json!({ "role": "assistant", "content": "a2" })
        );
        assert_eq!(
            messages.last().unwrap(),
            &json!({ "role": "user", "content": "Skills" })
        );
    }

    #[test]
    fn test_create_suggestions_request() {
        let history: Vec<_> =
            (0..5).map(|i| Turn::new(format!("q{i}"), "a")).collect();
        let config = OpenAIConfigBuilder::with_api_key("xxx").build();
        let body =
            serde_json::to_value(create_suggestions_request(&history, &config))
                .unwrap();
        assert_eq!(body["max_tokens"], 120);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1 + 4 * 2);
        assert_eq!(body["messages"][1]["content"], "q1");
    }

    #[test]
    fn test_parse_reply() {
        let reply = parse_reply(completion("I moved to Boston in **2022**."))
            .unwrap();
        assert_eq!(reply.reply, "I moved to Boston in **2022**.");
        assert!(reply.suggestions.is_empty());

        let reply = parse_reply(completion(
            "I design for Samsung.\n{\"suggestions\":[\"What do you design\",\"\",\"Where did you study\"]}",
        ))
        .unwrap();
        assert_eq!(reply.reply, "I design for Samsung.");
        assert_eq!(
            reply.suggestions,
            vec!["What do you design".to_owned(), "Where did you study".to_owned()]
        );
    }

    #[test]
    fn test_parse_reply_keeps_broken_block() {
        let content = "Sure! {\"suggestions\": [oops]}";
        let reply = parse_reply(completion(content)).unwrap();
        assert_eq!(reply.reply, content);
        assert!(reply.suggestions.is_empty());
    }

    #[test]
    fn test_parse_reply_without_choices() {
        let completion: ChatCompletion =
            serde_json::from_value(json!({ "error": { "message": "nope" } }))
                .unwrap();
        let err = parse_reply(completion).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_parse_suggestions() {
        let ideas = parse_suggestions(completion(
            r#"{"suggestions":["a","b","c","d","e","f","g"]}"#,
        ));
        assert_eq!(ideas.len(), 6);

        assert!(parse_suggestions(completion("Here are some ideas")).is_empty());
    }
}
