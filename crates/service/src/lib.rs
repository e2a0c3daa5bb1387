//! The contract between the chat controller and a completion service.
//!
//! A completion service takes the visitor's message plus a short window
//! of previous turns, and answers with a reply text. It is treated as a
//! black box: latency is unspecified and requests may fail at any time.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to. The HTTP clients
//! and the scripted test service live in their own crates.

#![deny(missing_docs)]

mod error;
mod request;
mod response;
mod service;

pub use error::*;
pub use request::*;
pub use response::*;
pub use service::*;
