//! A local fake completion service for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use folio_chat_service::{
    CompletionReply, CompletionRequest, CompletionService,
    CompletionServiceError, ErrorKind, Turn,
};
use tokio::sync::Semaphore;
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl CompletionServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Holds requests in flight until released.
#[derive(Clone, Debug)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
    /// Lets `n` more requests through.
    #[inline]
    pub fn release(&self, n: usize) {
        self.0.add_permits(n);
    }
}

#[derive(Default)]
struct Inner {
    script: VecDeque<PresetStep>,
    ideas: Vec<String>,
    ideas_failure: Option<ErrorKind>,
    requests: Vec<CompletionRequest>,
    delay: Option<Duration>,
    gate: Option<Gate>,
}

/// A local fake completion service for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// service should answer consecutive requests. Each request consumes one
/// step; when the script runs out, requests fail with a transport error.
///
/// Clones share the same script and request log, so a test can keep one
/// clone for assertions while the controller owns another.
#[derive(Clone, Default)]
pub struct TestCompletionService {
    inner: Arc<Mutex<Inner>>,
}

impl TestCompletionService {
    #[inline]
    pub fn add_step(&self, step: PresetStep) {
        self.lock().script.push_back(step);
    }

    #[inline]
    pub fn add_reply(&self, reply: PresetReply) {
        self.add_step(PresetStep::Reply(reply));
    }

    #[inline]
    pub fn add_failure(&self, kind: ErrorKind) {
        self.add_step(PresetStep::Failure(kind));
    }

    /// Sets the answer of the suggestions-only path.
    #[inline]
    pub fn set_ideas<I, S>(&self, ideas: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock().ideas = ideas.into_iter().map(Into::into).collect();
    }

    /// Makes the suggestions-only path fail with `kind`.
    #[inline]
    pub fn fail_ideas(&self, kind: ErrorKind) {
        self.lock().ideas_failure = Some(kind);
    }

    #[inline]
    pub fn set_delay(&self, duration: Duration) {
        self.lock().delay = Some(duration);
    }

    /// Installs a gate: every later request waits until the gate is
    /// released for it.
    pub fn gate(&self) -> Gate {
        let gate = Gate(Arc::new(Semaphore::new(0)));
        self.lock().gate = Some(gate.clone());
        gate
    }

    /// Returns all requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking test thread must not hide the script from the others.
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl CompletionService for TestCompletionService {
    type Error = crate::Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionReply, Self::Error>> + Send + 'static
    {
        let (step, delay, gate) = {
            let mut inner = self.lock();
            inner.requests.push(req.clone());
            (inner.script.pop_front(), inner.delay, inner.gate.clone())
        };

        async move {
            if let Some(Gate(semaphore)) = gate {
                if let Ok(permit) = semaphore.acquire().await {
                    permit.forget();
                }
            }
            sleep(delay.unwrap_or(Duration::from_millis(1))).await;

            match step {
                Some(PresetStep::Reply(preset)) => Ok(preset.into()),
                Some(PresetStep::Failure(kind)) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
                None => Err(Error {
                    message: "no enough steps",
                    kind: ErrorKind::Transport,
                }),
            }
        }
    }

    fn suggest(
        &self,
        history: &[Turn],
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + 'static
    {
        let ideas = {
            let mut inner = self.lock();
            inner.requests.push(CompletionRequest::suggestions_only(
                history,
                history.len(),
            ));
            match inner.ideas_failure {
                Some(kind) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
                None => Ok(inner.ideas.clone()),
            }
        };
        async move { ideas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_steps() {
        let service = TestCompletionService::default();
        service.add_reply(PresetReply::with_text("Hello, world!"));
        service.add_failure(ErrorKind::MalformedResponse);

        let req = CompletionRequest::new("Hi", &[], 4);
        let reply = service.complete(&req).await.unwrap();
        assert_eq!(reply.reply, "Hello, world!");

        let err = service.complete(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);

        // The script is exhausted now.
        let err = service.complete(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        assert_eq!(service.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_gate() {
        let service = TestCompletionService::default();
        service.add_reply(PresetReply::with_text("Released"));
        let gate = service.gate();

        let fut = service.complete(&CompletionRequest::new("Hi", &[], 4));
        let handle = tokio::spawn(fut);
        tokio::task::yield_now().await;
        assert!(!handle.is_finished());

        gate.release(1);
        let reply = handle.await.unwrap().unwrap();
        assert_eq!(reply.reply, "Released");
    }

    #[tokio::test]
    async fn test_delay() {
        let service = TestCompletionService::default();
        service.add_reply(PresetReply::with_text("Slow"));
        service.set_delay(Duration::from_millis(30));

        let start = std::time::Instant::now();
        let reply = service
            .complete(&CompletionRequest::new("Hi", &[], 4))
            .await
            .unwrap();
        assert_eq!(reply.reply, "Slow");
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_ideas() {
        let service = TestCompletionService::default();
        service.set_ideas(["What tools do you use", "Tell me about Samsung"]);
        let ideas = service.suggest(&[Turn::new("Hi", "Hello")]).await.unwrap();
        assert_eq!(ideas.len(), 2);
        assert!(service.requests()[0].suggestions_only);

        service.fail_ideas(ErrorKind::Transport);
        let err = service.suggest(&[]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
