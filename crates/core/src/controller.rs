mod builder;
mod state;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;

use crate::conversation::Snapshot;
pub use builder::ControllerBuilder;
use state::{Command, ControllerState, run_controller};

/// A conversation controller, which owns the dialogue history, the chip
/// flow and the single outstanding completion request.
///
/// Every operation is a message to the controller task and returns
/// immediately. The task handles messages one at a time, so the state is
/// never touched concurrently; observers read it through [`Snapshot`]s.
/// The task stops when the last handle is dropped.
#[derive(Clone)]
pub struct Controller {
    cmd_tx: mpsc::UnboundedSender<Command>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl Controller {
    /// Sends a visitor message.
    ///
    /// Blank text, or any text while a reply is pending, is ignored.
    pub fn submit<S: Into<String>>(&self, text: S) {
        self.send(Command::Submit(text.into()));
    }

    /// Handles a click on a suggestion chip.
    ///
    /// "More Options" goes back to the home chips without sending anything.
    /// Any other chip is sent like a message.
    pub fn click_chip<S: Into<String>>(&self, label: S) {
        self.send(Command::ClickChip(label.into()));
    }

    /// Handles a chip dropped on the input: it becomes the draft.
    pub fn drop_chip<S: Into<String>>(&self, label: S) {
        self.send(Command::DropChip(label.into()));
    }

    /// Replaces the draft with typed text.
    pub fn set_draft<S: Into<String>>(&self, text: S) {
        self.send(Command::SetDraft(text.into()));
    }

    /// Sends the draft and clears it.
    ///
    /// While a reply is pending this does nothing and the draft is kept.
    pub fn submit_draft(&self) {
        self.send(Command::SubmitDraft);
    }

    /// Clears history, chips and draft.
    pub fn reset(&self) {
        self.send(Command::Reset);
    }

    /// Asks the service for free-form prompt ideas based on the latest
    /// turns. Returns an empty list on failure.
    pub async fn request_ideas(&self) -> Vec<String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Ideas(reply_tx));
        reply_rx.await.unwrap_or_default()
    }

    /// Returns the latest state.
    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    fn send(&self, cmd: Command) {
        if self.cmd_tx.send(cmd).is_err() {
            warn!("controller task has terminated, discard the command");
        }
    }
}

impl Controller {
    fn spawn_from_builder(builder: ControllerBuilder) -> Self {
        let ControllerBuilder {
            client,
            history_window,
            apology,
        } = builder;

        let state = ControllerState::new(client, history_window, apology);
        let snapshot_rx = state.subscribe();

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(
            run_controller(state, cmd_tx.downgrade(), cmd_rx)
                .instrument(trace_span!("controller")),
        );
        Self {
            cmd_tx,
            snapshot_rx,
        }
    }
}
