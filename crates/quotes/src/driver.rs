//! Subtree transformation driver: a bounded fixed-point sweep.
//!
//! Contract:
//! - Quotes are rewritten deepest-first; ties keep document order.
//! - Each pass strictly shrinks the set of collectable legacy quotes:
//!   a collected quote is either destroyed by its rewrite or lands in the
//!   run's skip set and is excluded from every later collection.
//! - Re-collection between passes picks up quotes a rewrite exposed.

use crate::EngineConfig;
use crate::depth::nesting_depth;
use crate::markup::is_legacy_quote;
use crate::rewrite::rewrite_quote;
use dom::{Id, IdGen, Node};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Legacy quotes replaced by their normalized form.
    pub rewritten: usize,
    /// Legacy quotes left in place (malformed structure).
    pub skipped: usize,
    /// Fixed-point iterations performed.
    pub passes: usize,
}

impl TransformStats {
    pub fn merge(&mut self, other: TransformStats) {
        self.rewritten += other.rewritten;
        self.skipped += other.skipped;
        self.passes += other.passes;
    }

    pub fn is_noop(&self) -> bool {
        self.rewritten == 0 && self.skipped == 0
    }
}

pub(crate) fn transform_subtree(
    root: &mut Node,
    ids: &mut IdGen,
    config: &EngineConfig,
) -> TransformStats {
    let mut stats = TransformStats::default();
    let mut skip_set: HashSet<Id> = HashSet::new();

    while stats.passes < config.max_passes {
        let mut worklist = Vec::new();
        collect_legacy(root, &skip_set, &mut worklist);
        if worklist.is_empty() {
            return stats;
        }
        stats.passes += 1;

        let mut ordered: Vec<(Id, u32)> = worklist
            .into_iter()
            .map(|id| (id, nesting_depth(root, id).unwrap_or(0)))
            .collect();
        // stable sort: equal depths keep the document order of collection
        ordered.sort_by(|a, b| b.1.cmp(&a.1));

        for (id, depth) in ordered {
            match rewrite_quote(root, id, ids) {
                Ok(()) => {
                    stats.rewritten += 1;
                    log::trace!(target: "quotes.driver", "rewrote quote {} at depth {depth}", id.0);
                }
                Err(reason) => {
                    stats.skipped += 1;
                    skip_set.insert(id);
                    log::debug!(
                        target: "quotes.driver",
                        "left quote {} in legacy form: {}",
                        id.0,
                        reason.label()
                    );
                }
            }
        }
        log::debug!(
            target: "quotes.driver",
            "pass {}: {} rewritten, {} skipped so far",
            stats.passes,
            stats.rewritten,
            stats.skipped
        );
    }

    let mut remaining = Vec::new();
    collect_legacy(root, &skip_set, &mut remaining);
    if !remaining.is_empty() {
        log::warn!(
            target: "quotes.driver",
            "pass budget exhausted with {} legacy quotes remaining",
            remaining.len()
        );
    }
    stats
}

fn collect_legacy(node: &Node, skip_set: &HashSet<Id>, out: &mut Vec<Id>) {
    if is_legacy_quote(node) && !skip_set.contains(&node.id()) {
        out.push(node.id());
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_legacy(child, skip_set, out);
        }
    }
}
