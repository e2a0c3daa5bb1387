use std::error::Error;

use crate::error::ErrorKind;
use crate::request::{CompletionRequest, Turn};
use crate::response::CompletionReply;

/// The error type for a completion service.
pub trait CompletionServiceError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a completion service, which answers visitor
/// messages given a short window of history.
///
/// Once the service is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the service should be prepared for being dropped anytime.
pub trait CompletionService: Send + Sync {
    /// The error type that may be returned by the service.
    type Error: CompletionServiceError;

    /// Sends a request and waits for the complete reply.
    ///
    /// The returned future must not borrow `self`.
    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionReply, Self::Error>> + Send + 'static;

    /// Asks for short prompt ideas based on `history`.
    ///
    /// This is the lightweight `suggestionsOnly` path. Implementations
    /// should return at most six non-empty suggestions.
    fn suggest(
        &self,
        history: &[Turn],
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + 'static;
}
