use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::time::Duration;

use folio_chat_service::{
    CompletionReply, CompletionRequest, CompletionService,
    CompletionServiceError, ErrorKind, Turn, tail,
};
use tokio::time::sleep;

#[derive(Debug)]
struct EchoServiceError(ErrorKind);

impl Display for EchoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for EchoServiceError {}

impl CompletionServiceError for EchoServiceError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

struct EchoService;

impl CompletionService for EchoService {
    type Error = EchoServiceError;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionReply, Self::Error>> + Send + 'static
    {
        let result = if req.message.is_empty() {
            Err(EchoServiceError(ErrorKind::MalformedResponse))
        } else {
            Ok(CompletionReply::text(format!(
                "You said {} after {} turns",
                req.message,
                req.history.len()
            )))
        };
        async move {
            sleep(Duration::from_millis(1)).await;
            result
        }
    }

    fn suggest(
        &self,
        history: &[Turn],
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + 'static
    {
        let ideas = tail(history, 4)
            .iter()
            .map(|turn| format!("Tell me more about {}", turn.user))
            .collect();
        ready(Ok(ideas))
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion() {
        let service = EchoService;
        let history = vec![Turn::new("Hi", "Hello!")];
        let req = CompletionRequest::new("Skills", &history, 4);
        let reply = service.complete(&req).await.unwrap();
        assert_eq!(reply.reply, "You said Skills after 1 turns");
        assert!(reply.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_error() {
        let service = EchoService;
        let req = CompletionRequest::suggestions_only(&[], 4);
        let err = service.complete(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_suggest_uses_recent_turns() {
        let service = EchoService;
        let history: Vec<_> = (0..6)
            .map(|i| Turn::new(format!("topic {i}"), "ok"))
            .collect();
        let ideas = service.suggest(&history).await.unwrap();
        assert_eq!(ideas.len(), 4);
        assert_eq!(ideas[0], "Tell me more about topic 2");
    }
}
