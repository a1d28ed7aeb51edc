pub mod bridge;
pub mod depth;
pub mod driver;
pub mod golden_corpus;
pub mod live;
pub mod markup;
pub mod reveal;

mod rewrite;

use dom::{IdGen, Node, assign_node_ids};

pub use crate::bridge::MutationBridge;
pub use crate::driver::TransformStats;
pub use crate::live::{DocEditError, LiveDoc};

/// Tunables held by the engine instance. There is no ambient global state;
/// hosts construct one engine at startup and keep it for the process lifetime.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Upper bound on the driver's fixed-point iterations per run.
    pub max_passes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_passes: 16 }
    }
}

pub struct QuoteEngine {
    config: EngineConfig,
}

impl QuoteEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Rewrite every legacy quote reachable under the document root.
    /// Called once at load; later runs are no-ops on already-normalized trees.
    pub fn transform_document(&self, root: &mut Node) -> TransformStats {
        self.transform_fragment(root)
    }

    /// Rewrite every legacy quote reachable under an arbitrary subtree root,
    /// e.g. a freshly injected fragment. Nodes without ids get them here;
    /// the driver relies on ids being unique within the tree.
    pub fn transform_fragment(&self, root: &mut Node) -> TransformStats {
        let mut ids = IdGen::after(root);
        assign_node_ids(root, &mut ids);
        driver::transform_subtree(root, &mut ids, &self.config)
    }

    /// Rewrite a subtree addressed by id inside a live document. Fresh nodes
    /// draw ids from the document's allocator so ids stay unique doc-wide.
    /// Returns `None` when the subtree is no longer attached.
    pub fn transform_in_doc(&self, doc: &mut LiveDoc, subtree: dom::Id) -> Option<TransformStats> {
        let (root, ids) = doc.subtree_and_ids(subtree)?;
        Some(driver::transform_subtree(root, ids, &self.config))
    }

    /// Activate a load-more marker: reveal the collapsed quotes around it and
    /// delete the marker. One-shot; returns whether the marker was found.
    pub fn reveal_collapsed(&self, region: &mut Node, marker: dom::Id) -> bool {
        reveal::reveal_collapsed(region, marker)
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new()
    }
}
