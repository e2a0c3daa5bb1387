use std::sync::Arc;

use folio_chat_service::{
    CompletionReply, CompletionRequest, CompletionService, SuggestionsReply,
    Turn,
};
use reqwest::{Client, header};

use crate::Error;
use crate::io::send_json;

/// Completion service backed by the site's chat endpoint.
///
/// The request body is the [`CompletionRequest`] itself, posted as JSON.
/// The suggestions path posts the same shape with `suggestionsOnly` set
/// and only the history filled in.
#[derive(Clone, Debug)]
pub struct EndpointService {
    client: Client,
    url: Arc<str>,
}

impl EndpointService {
    /// Creates a new `EndpointService` posting to the given URL.
    #[inline]
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            client: Client::new(),
            url: Arc::from(url.into()),
        }
    }

    /// Returns the endpoint URL.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CompletionService for EndpointService {
    type Error = Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionReply, Self::Error>> + Send + 'static
    {
        let builder = self
            .client
            .post(&*self.url)
            .header(header::ACCEPT, "application/json")
            .json(req);

        async move {
            let reply = send_json::<CompletionReply>(builder).await;
            if let Err(err) = &reply {
                error!("endpoint request failed: {err}");
            }
            reply
        }
    }

    fn suggest(
        &self,
        history: &[Turn],
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + 'static
    {
        let req = CompletionRequest::suggestions_only(history, 4);
        let builder = self
            .client
            .post(&*self.url)
            .header(header::ACCEPT, "application/json")
            .json(&req);

        async move {
            let reply = send_json::<SuggestionsReply>(builder).await?;
            Ok(reply
                .suggestions
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .take(6)
                .collect())
        }
    }
}
