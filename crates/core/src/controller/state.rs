use folio_chat_service::{CompletionReply, ErrorKind, tail};
use tokio::sync::{mpsc, oneshot, watch};

use crate::conversation::{Conversation, Snapshot, Ticket};
use crate::flow::MORE_OPTIONS;
use crate::service_client::ServiceClient;

#[derive(Debug)]
pub enum Command {
    Submit(String),
    ClickChip(String),
    DropChip(String),
    SetDraft(String),
    SubmitDraft,
    Reset,
    Ideas(oneshot::Sender<Vec<String>>),
    RequestFinished {
        ticket: Ticket,
        outcome: Result<CompletionReply, ErrorKind>,
    },
}

pub struct ControllerState {
    client: ServiceClient,
    conversation: Conversation,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl ControllerState {
    pub fn new(
        client: ServiceClient,
        history_window: usize,
        apology: String,
    ) -> Self {
        let conversation = Conversation::new(history_window, apology);
        let (snapshot_tx, _) = watch::channel(conversation.snapshot());
        Self {
            client,
            conversation,
            snapshot_tx,
        }
    }

    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    fn handle(
        &mut self,
        cmd: Command,
        cmd_tx: &mpsc::WeakUnboundedSender<Command>,
    ) {
        match cmd {
            Command::Submit(text) => self.submit(&text, cmd_tx),
            Command::ClickChip(label) if label == MORE_OPTIONS => {
                self.conversation.more_options();
            }
            Command::ClickChip(label) => self.submit(&label, cmd_tx),
            Command::DropChip(label) => self.conversation.set_draft(label),
            Command::SetDraft(text) => self.conversation.set_draft(text),
            Command::SubmitDraft => {
                if self.conversation.is_pending() {
                    debug!("kept the draft while pending");
                } else {
                    let draft = self.conversation.take_draft();
                    self.submit(&draft, cmd_tx);
                }
            }
            Command::Reset => self.conversation.reset(),
            Command::Ideas(reply_tx) => self.request_ideas(reply_tx),
            Command::RequestFinished { ticket, outcome } => {
                self.conversation.finish(ticket, outcome);
            }
        }
        self.publish();
    }

    fn submit(
        &mut self,
        text: &str,
        cmd_tx: &mpsc::WeakUnboundedSender<Command>,
    ) {
        let Some((ticket, request)) = self.conversation.begin(text) else {
            return;
        };

        let fut = self.client.complete(request);
        let cmd_tx = cmd_tx.clone();
        tokio::spawn(async move {
            let outcome = fut.await.map_err(|err| err.kind());
            // Nobody is listening anymore if the controller is gone.
            if let Some(cmd_tx) = cmd_tx.upgrade() {
                cmd_tx.send(Command::RequestFinished { ticket, outcome }).ok();
            }
        });
    }

    fn request_ideas(&self, reply_tx: oneshot::Sender<Vec<String>>) {
        let history = tail(
            self.conversation.history(),
            self.conversation.history_window(),
        );
        let fut = self.client.suggest(history.to_vec());
        tokio::spawn(async move {
            let ideas = fut.await.unwrap_or_default();
            reply_tx.send(ideas).ok();
        });
    }

    fn publish(&self) {
        let snapshot = self.conversation.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
    }
}

pub async fn run_controller(
    mut state: ControllerState,
    cmd_tx: mpsc::WeakUnboundedSender<Command>,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
) {
    debug!("started");
    while let Some(cmd) = cmd_rx.recv().await {
        trace!("received command: {cmd:?}");

        let proc_span = trace_span!("proc cmd");
        proc_span.in_scope(|| {
            state.handle(cmd, &cmd_tx);
            trace!("finished");
        });
    }
    debug!("will terminate");
}
