use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The service is unreachable, or it answered with a non-2xx status.
    Transport,
    /// The service answered 2xx, but the body is unusable.
    MalformedResponse,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => "transport failure".fmt(f),
            ErrorKind::MalformedResponse => "malformed response".fmt(f),
        }
    }
}
