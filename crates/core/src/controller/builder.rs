use folio_chat_service::CompletionService;

use super::Controller;
use crate::conversation::{APOLOGY, HISTORY_WINDOW};
use crate::service_client::ServiceClient;

/// [`Controller`] builder.
pub struct ControllerBuilder {
    pub(crate) client: ServiceClient,
    pub(crate) history_window: usize,
    pub(crate) apology: String,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified completion service.
    #[inline]
    pub fn with_service<S: CompletionService + 'static>(service: S) -> Self {
        Self {
            client: ServiceClient::new(service),
            history_window: HISTORY_WINDOW,
            apology: APOLOGY.to_owned(),
        }
    }

    /// Sets how many previous turns are sent with a message. Defaults to 4.
    #[inline]
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Sets the reply recorded when a request fails.
    #[inline]
    pub fn with_apology<S: Into<String>>(mut self, apology: S) -> Self {
        self.apology = apology.into();
        self
    }

    /// Builds the controller and starts its task.
    ///
    /// Must be called within a Tokio runtime.
    #[inline]
    pub fn build(self) -> Controller {
        Controller::spawn_from_builder(self)
    }
}
