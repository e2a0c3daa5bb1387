use std::pin::Pin;
use std::sync::Arc;

use folio_chat_service::{
    CompletionReply, CompletionRequest, CompletionService,
    CompletionServiceError, Turn,
};
use tracing::Instrument;

type CompleteResult = Result<CompletionReply, Box<dyn CompletionServiceError>>;
type SuggestResult = Result<Vec<String>, Box<dyn CompletionServiceError>>;
type BoxedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type CompleteFn =
    Arc<dyn Fn(CompletionRequest) -> BoxedFuture<CompleteResult> + Send + Sync>;
type SuggestFn =
    Arc<dyn Fn(Vec<Turn>) -> BoxedFuture<SuggestResult> + Send + Sync>;

/// A wrapper around a completion service that provides a type-erased
/// interface for the controller.
#[derive(Clone)]
pub struct ServiceClient {
    complete_fn: CompleteFn,
    suggest_fn: SuggestFn,
}

impl ServiceClient {
    pub fn new<S: CompletionService + 'static>(service: S) -> Self {
        let service = Arc::new(service);

        let complete_fn: CompleteFn = {
            let service = Arc::clone(&service);
            Arc::new(move |req| {
                // The service sees the request here, before the returned
                // future is first polled.
                let fut = service.complete(&req);
                Box::pin(
                    async move {
                        trace!("sending a request: {req:?}");
                        let reply = fut.await.map_err(|err| {
                            error!("got an error: {err:?}");
                            Box::new(err) as Box<dyn CompletionServiceError>
                        })?;
                        trace!("got a reply: {reply:?}");
                        Ok(reply)
                    }
                    .instrument(trace_span!("service client req")),
                )
            })
        };

        let suggest_fn: SuggestFn = Arc::new(move |history| {
            let fut = service.suggest(&history);
            Box::pin(
                async move {
                    fut.await.map_err(|err| {
                        warn!("could not get ideas: {err:?}");
                        Box::new(err) as Box<dyn CompletionServiceError>
                    })
                }
                .instrument(trace_span!("service client ideas")),
            )
        });

        Self {
            complete_fn,
            suggest_fn,
        }
    }

    /// Starts a completion request.
    ///
    /// The request is handed to the service synchronously; only waiting for
    /// the reply happens in the returned future.
    #[inline]
    pub fn complete(&self, req: CompletionRequest) -> BoxedFuture<CompleteResult> {
        (self.complete_fn)(req)
    }

    /// Starts a suggestions-only request.
    #[inline]
    pub fn suggest(&self, history: Vec<Turn>) -> BoxedFuture<SuggestResult> {
        (self.suggest_fn)(history)
    }
}
