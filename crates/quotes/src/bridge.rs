//! Change-notification bridge: watches the live document for inserted
//! subtrees and re-invokes the driver on the ones that carry legacy quotes.
//!
//! Two cooperative phases mirror "observe now, transform on the next idle
//! tick": `on_mutations` only queues, `idle_tick` runs the driver. The host
//! event loop calls both from its one thread; a driver run therefore always
//! sees a tree state consistent with the insertion that queued it.

use crate::markup::contains_legacy_quote;
use crate::{LiveDoc, QuoteEngine, TransformStats};
use bus::DocEvent;
use dom::{Id, find_node_by_id};
use std::sync::mpsc::Receiver;

pub struct MutationBridge {
    evt_rx: Receiver<DocEvent>,
    pending: Vec<Id>,
}

impl MutationBridge {
    /// Installed once at startup; lives as long as the document does.
    pub fn new(evt_rx: Receiver<DocEvent>) -> Self {
        Self {
            evt_rx,
            pending: Vec::new(),
        }
    }

    /// Drain queued insertion events, keeping the subtrees worth a driver
    /// run. Insertions are handled independently; only exact duplicates of
    /// an already-queued subtree are dropped.
    pub fn on_mutations(&mut self, doc: &LiveDoc) {
        while let Ok(DocEvent::SubtreeInserted { root, .. }) = self.evt_rx.try_recv() {
            let Some(subtree) = find_node_by_id(doc.root(), root) else {
                continue;
            };
            if contains_legacy_quote(subtree) && !self.pending.contains(&root) {
                self.pending.push(root);
                log::trace!(target: "quotes.bridge", "queued inserted subtree {}", root.0);
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Run the driver over every queued subtree. Subtrees detached since
    /// queueing are dropped silently; the driver's idempotence makes a
    /// redundant run harmless.
    pub fn idle_tick(&mut self, engine: &QuoteEngine, doc: &mut LiveDoc) -> TransformStats {
        let mut total = TransformStats::default();
        for id in std::mem::take(&mut self.pending) {
            if let Some(stats) = engine.transform_in_doc(doc, id) {
                total.merge(stats);
            }
        }
        total
    }
}
