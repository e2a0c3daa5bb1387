use std::sync::Arc;

use folio_chat_service::{
    CompletionReply, CompletionRequest, CompletionService, Turn,
};
use reqwest::{Client, RequestBuilder, header};

use crate::io::send_json;
use crate::proto::{self, ChatCompletion, ChatCompletionRequest};
use crate::{Error, OpenAIConfig};

/// Completion service talking to an OpenAI-compatible API directly.
#[derive(Clone, Debug)]
pub struct OpenAIService {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIService {
    /// Creates a new `OpenAIService` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    fn post(&self, body: &ChatCompletionRequest) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.config.base_url, "/chat/completions"))
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
    }
}

impl CompletionService for OpenAIService {
    type Error = Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionReply, Self::Error>> + Send + 'static
    {
        let builder = self.post(&proto::create_request(req, &self.config));

        async move {
            let completion = send_json::<ChatCompletion>(builder)
                .await
                .inspect_err(|err| error!("completion failed: {err}"))?;
            proto::parse_reply(completion)
        }
    }

    fn suggest(
        &self,
        history: &[Turn],
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + 'static
    {
        let builder = self.post(&proto::create_suggestions_request(
            history,
            &self.config,
        ));

        async move {
            let completion = send_json::<ChatCompletion>(builder).await?;
            Ok(proto::parse_suggestions(completion))
        }
    }
}
