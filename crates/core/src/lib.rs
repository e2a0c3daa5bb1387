//! Core logic of the portfolio chat assistant: dialogue history, the
//! suggestion-chip flow, reply post-processing and the controller task
//! tying them to a completion service.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod controller;
pub mod conversation;
mod emphasis;
pub mod flow;
mod service_client;

pub use controller::{Controller, ControllerBuilder};
pub use conversation::{APOLOGY, HISTORY_WINDOW, Snapshot};
pub use emphasis::emphasize_metrics;
