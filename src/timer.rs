use crate::logger;
use crate::session::AdvanceTicket;
use crossbeam_channel::{Receiver, Sender};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

/// Spawns one-shot timers that hand tickets back to the UI loop.
#[derive(Debug, Clone)]
pub struct AdvanceScheduler {
    runtime: Handle,
    delay: Duration,
    tx: Sender<AdvanceTicket>,
}

impl AdvanceScheduler {
    pub fn new(runtime: Handle, delay: Duration, tx: Sender<AdvanceTicket>) -> Self {
        Self { runtime, delay, tx }
    }

    pub fn channel(runtime: Handle, delay: Duration) -> (Self, Receiver<AdvanceTicket>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(runtime, delay, tx), rx)
    }

    pub fn schedule(&self, ticket: AdvanceTicket) -> ScheduledAdvance {
        let tx = self.tx.clone();
        let delay = self.delay;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ticket).is_err() {
                logger::log("Advance receiver dropped before timer fired");
            }
        });

        ScheduledAdvance { ticket, task }
    }
}

/// Handle to a pending deferred transition.
#[derive(Debug)]
pub struct ScheduledAdvance {
    ticket: AdvanceTicket,
    task: JoinHandle<()>,
}

impl ScheduledAdvance {
    pub fn ticket(&self) -> AdvanceTicket {
        self.ticket
    }

    pub fn cancel(self) {
        self.task.abort();
    }
}
