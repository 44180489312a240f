/// Status signal relay — a single-slot, non-blocking mailbox.
///
/// Producers call [`StatusRelay::request`]; if a request is already pending
/// the new one is dropped. Traversal units poll [`StatusRelay::take`] once
/// per entry, so whichever unit polls first answers the request and the rest
/// keep walking.
use crossbeam_channel::{bounded, Receiver, Sender};

#[derive(Debug, Clone)]
pub struct StatusRelay {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl Default for StatusRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRelay {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }

    /// Enqueue a status request. Returns `false` if one was already pending.
    pub fn request(&self) -> bool {
        // Both ends live in `self`, so `Full` is the only possible error.
        self.tx.try_send(()).is_ok()
    }

    /// Consume the pending request, if any. Never blocks.
    #[inline]
    pub fn take(&self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// `true` while a request is waiting to be consumed.
    pub fn is_pending(&self) -> bool {
        !self.rx.is_empty()
    }
}
