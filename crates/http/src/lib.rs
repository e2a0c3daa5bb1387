//! Completion services reached over HTTP.
//!
//! [`EndpointService`] talks to the site's own chat endpoint, which takes
//! `{message, history}` and answers `{reply}`. [`OpenAIService`] skips
//! that hop and talks to an OpenAI-compatible chat completions API
//! directly, doing the prompt assembly the endpoint would otherwise do.

#[macro_use]
extern crate tracing;

mod config;
mod endpoint;
mod io;
mod openai;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};

use folio_chat_service::{CompletionServiceError, ErrorKind};

pub use config::{OpenAIConfig, OpenAIConfigBuilder};
pub use endpoint::EndpointService;
pub use openai::OpenAIService;

/// Error type for the HTTP completion services.
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {}

impl CompletionServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}
