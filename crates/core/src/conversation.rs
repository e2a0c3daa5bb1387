//! Conversation-related types.
//!
//! [`Conversation`] is the whole dialogue state without any I/O: the
//! controller asks it for a request with [`Conversation::begin`], runs the
//! request, and hands the outcome back with [`Conversation::finish`].

use folio_chat_service::{CompletionReply, CompletionRequest, ErrorKind, Turn};
use serde::Serialize;

use crate::emphasis::emphasize_metrics;
use crate::flow::{ClickedChips, FlowState, Topic};

/// The reply shown when a request fails.
pub const APOLOGY: &str = "Sorry, I couldn't connect to the AI. Please try again.";

/// How many previous turns are sent along with a message.
pub const HISTORY_WINDOW: usize = 4;

/// Identifies the request in flight.
///
/// A ticket issued before a reset is stale: its outcome is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    message: String,
}

impl Ticket {
    /// The trimmed message this ticket was issued for.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An immutable view of the conversation for presentation layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// All turns of this session, oldest first.
    pub history: Vec<Turn>,
    /// Whether a request is in flight.
    pub pending: bool,
    /// The active topic.
    pub topic: Topic,
    /// Clicked-chip markers.
    pub clicked: ClickedChips,
    /// The chips to show.
    pub suggestions: Vec<&'static str>,
    /// The text in the input field.
    pub draft: String,
}

/// The dialogue state.
#[derive(Clone, Debug)]
pub struct Conversation {
    history: Vec<Turn>,
    flow: FlowState,
    in_flight: Option<Ticket>,
    epoch: u64,
    draft: String,
    history_window: usize,
    apology: String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(HISTORY_WINDOW, APOLOGY)
    }
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new<S: Into<String>>(history_window: usize, apology: S) -> Self {
        Self {
            history: vec![],
            flow: FlowState::default(),
            in_flight: None,
            epoch: 0,
            draft: String::new(),
            history_window,
            apology: apology.into(),
        }
    }

    /// Starts an exchange for `text`.
    ///
    /// Returns `None`, changing nothing, if `text` is blank or another
    /// request is still in flight.
    pub fn begin(&mut self, text: &str) -> Option<(Ticket, CompletionRequest)> {
        let message = text.trim();
        if message.is_empty() {
            debug!("ignored blank message");
            return None;
        }
        if self.in_flight.is_some() {
            debug!("ignored message while pending: {message:?}");
            return None;
        }

        let ticket = Ticket {
            epoch: self.epoch,
            message: message.to_owned(),
        };
        let request =
            CompletionRequest::new(message, &self.history, self.history_window);
        self.in_flight = Some(ticket.clone());
        Some((ticket, request))
    }

    /// Records the outcome of the exchange started for `ticket`.
    ///
    /// On success the reply is post-processed and the flow table is applied
    /// to the sent message. On failure the apology is recorded and the flow
    /// stays where it was. Returns whether a turn was appended.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        outcome: Result<CompletionReply, ErrorKind>,
    ) -> bool {
        if self.in_flight.as_ref() == Some(&ticket) {
            self.in_flight = None;
        }
        if ticket.epoch != self.epoch {
            debug!("dropped the reply for a reset conversation");
            return false;
        }

        let bot = match outcome {
            Ok(reply) => {
                if let Some(flow) = self.flow.transition(&ticket.message) {
                    trace!("topic {} -> {}", self.flow.topic, flow.topic);
                    self.flow = flow;
                }
                emphasize_metrics(&reply.reply)
            }
            Err(kind) => {
                warn!("answered with an apology after {kind}");
                self.apology.clone()
            }
        };
        self.history.push(Turn::new(ticket.message, bot));
        true
    }

    /// Goes back to the home topic and forgets every clicked chip.
    pub fn more_options(&mut self) {
        self.flow = FlowState::default();
    }

    /// Starts over. A request in flight stays pending, but its outcome will
    /// be dropped.
    pub fn reset(&mut self) {
        self.history.clear();
        self.flow = FlowState::default();
        self.draft.clear();
        if self.in_flight.is_some() {
            self.epoch += 1;
        }
    }

    /// Replaces the input field text.
    #[inline]
    pub fn set_draft<S: Into<String>>(&mut self, text: S) {
        self.draft = text.into();
    }

    /// Takes the input field text, leaving it empty.
    #[inline]
    pub fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }

    /// Returns all turns, oldest first.
    #[inline]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Returns whether a request is in flight.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns the topic and clicked-chip markers.
    #[inline]
    pub fn flow(&self) -> FlowState {
        self.flow
    }

    /// Returns the chips to show.
    #[inline]
    pub fn suggestions(&self) -> Vec<&'static str> {
        self.flow.suggestions()
    }

    /// Returns the input field text.
    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The number of turns sent along with a message.
    #[inline]
    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Captures the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            history: self.history.clone(),
            pending: self.is_pending(),
            topic: self.flow.topic,
            clicked: self.flow.clicked,
            suggestions: self.suggestions(),
            draft: self.draft.clone(),
        }
    }
}
