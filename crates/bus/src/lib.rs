use dom::Id;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Structural-change notifications emitted by the live document.
///
/// Events are delivered in edit order. Consumers drain them cooperatively;
/// the channel is a queue, not a parallelism mechanism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocEvent {
    /// A fragment rooted at `root` was attached under `parent`.
    SubtreeInserted { parent: Id, root: Id },
}

pub struct Bus {
    pub evt_tx: Sender<DocEvent>,
    pub evt_rx: Receiver<DocEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (evt_tx, evt_rx) = channel();
        Self { evt_tx, evt_rx }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
