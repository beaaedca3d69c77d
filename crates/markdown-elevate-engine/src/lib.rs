//! Live block elevation for markdown-style typing.
//!
//! A host editor hands the engine a freshly typed block; the engine
//! recognises a leading marker and restructures the block in place, keeping
//! every node it did not need to touch.
//!
//! - [`dom`]: the arena document the engine mutates
//! - [`hybrid`]: markup-free text views, rewriting and reconciliation
//! - [`elevate`]: container descriptors and the block elevator
//! - [`inline`]: delimiter-wrapped inline spans

pub mod dom;
pub mod elevate;
pub mod error;
pub mod hybrid;
pub mod inline;

// Re-export key types for easier usage
pub use dom::{Attribute, Document, NodeId, NodeKind};
pub use elevate::{
    BlockElevator, ContainerDescriptor, Elevation, ElevationKind, ElevationResult, TagSet,
};
pub use error::EngineError;
pub use hybrid::{HybridText, ReconcileOutcome};
pub use inline::{InlineRule, apply_inline_rules};
