//! Minimal-disruption application of rebuilt content onto a live node.
//!
//! ## Algorithm
//!
//! Single pass, left to right, greedy:
//!
//! 1. Walk the live children in order.
//! 2. For each, scan the scratch children from the current scan position for
//!    the first structurally equal node. On a hit the live node takes that
//!    scratch slot and the scan position moves past it. On a miss the live
//!    child is dropped.
//! 3. Clear the target and append the scratch list in order.
//!
//! Scratch nodes displaced by a live node are freed, so repeated passes do
//! not grow the document. Dropped live children are only detached: the host
//! may still hold their ids.
//!
//! Only structural equality is needed, so untouched text nodes survive even
//! though they were re-parsed. The scan never looks backwards: with
//! duplicate equal siblings in a different relative order some of them are
//! rebuilt rather than kept.

use super::HybridText;
use crate::dom::{Document, NodeId};

/// Counts describing what a reconcile kept, added and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Live children kept with their identity.
    pub preserved: usize,
    /// New nodes adopted from the scratch tree.
    pub inserted: usize,
    /// Live children removed from the target.
    pub dropped: usize,
}

impl HybridText {
    /// Rebuilds `target`'s children from [`HybridText::materialize`], keeping
    /// every live child that has a structurally equal counterpart.
    pub fn reconcile(&self, doc: &mut Document, target: NodeId) -> ReconcileOutcome {
        if !doc.contains(target) {
            log::debug!("reconcile target {target:?} is not in this document");
            return ReconcileOutcome::default();
        }
        let markup = self.materialize();
        let scratch = doc.parse_fragment(&markup);
        let outcome = reconcile_children(doc, target, scratch);
        log::debug!("reconciled {target:?}: {outcome:?}");
        outcome
    }
}

/// Applies the detached `scratch` nodes as the new children of `target`.
///
/// A `target` that is not a live element of `doc` is left alone; the scratch
/// nodes are freed and the outcome is all zeros.
pub fn reconcile_children(
    doc: &mut Document,
    target: NodeId,
    mut scratch: Vec<NodeId>,
) -> ReconcileOutcome {
    scratch.retain(|&node| doc.contains(node));
    if !doc.contains(target) || !doc.is_element(target) {
        log::debug!("reconcile target {target:?} is not a live element");
        for node in scratch {
            doc.remove(node);
        }
        return ReconcileOutcome::default();
    }

    let live = doc.children(target).to_vec();
    let mut scan = 0;
    let mut preserved = 0;

    for &live_child in &live {
        let hit = scratch[scan..]
            .iter()
            .position(|&candidate| doc.structurally_eq(live_child, candidate));
        if let Some(offset) = hit {
            let slot = scan + offset;
            let displaced = std::mem::replace(&mut scratch[slot], live_child);
            doc.remove(displaced);
            scan = slot + 1;
            preserved += 1;
        }
    }

    doc.clear_children(target);
    for &node in &scratch {
        doc.append_child(target, node);
    }

    ReconcileOutcome {
        preserved,
        inserted: scratch.len() - preserved,
        dropped: live.len() - preserved,
    }
}
