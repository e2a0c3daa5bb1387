use std::env;
use std::fmt::{self, Debug, Display, Formatter};

/// Where replies come from.
#[derive(Clone, PartialEq, Eq)]
pub enum Backend {
    /// The site's own chat endpoint.
    Endpoint { url: String },
    /// An OpenAI-compatible API, called directly.
    OpenAI {
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
    },
}

impl Debug for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Endpoint { url } => {
                f.debug_struct("Endpoint").field("url", url).finish()
            }
            Backend::OpenAI {
                base_url, model, ..
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"<deducted>")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
        }
    }
}

/// Settings read from the environment at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: Backend,
}

#[derive(Debug)]
pub struct ConfigError(&'static str);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Reads `FOLIO_CHAT_ENDPOINT`, falling back to `OPENAI_API_KEY` with
    /// optional `OPENAI_BASE_URL` and `OPENAI_MODEL`.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = var("FOLIO_CHAT_ENDPOINT") {
            return Ok(Self {
                backend: Backend::Endpoint { url },
            });
        }
        let Some(api_key) = var("OPENAI_API_KEY") else {
            return Err(ConfigError(
                "neither FOLIO_CHAT_ENDPOINT nor OPENAI_API_KEY is set",
            ));
        };
        Ok(Self {
            backend: Backend::OpenAI {
                api_key,
                base_url: var("OPENAI_BASE_URL"),
                model: var("OPENAI_MODEL"),
            },
        })
    }
}
