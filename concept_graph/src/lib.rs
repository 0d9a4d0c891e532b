//! # Concept Graph
//!
//! The knowledge store behind Life. This crate owns the directed graph of
//! labeled concepts and relations and answers structural questions about it.
//! It contains no question answering or perspective scoring logic.
//!
//! ## Core Components
//!
//! - **store**: `ConceptStore` - concepts, labeled edges, neighbor iteration
//! - **path**: `PathFinder` - shortest reasoning chains with deterministic tie-breaks
//! - **interchange**: snapshot records for import/export
//! - **shared**: lock wrapper for hosts that share a store across threads

pub mod error;
pub mod interchange;
pub mod path;
pub mod shared;
pub mod store;

pub use error::*;
pub use interchange::*;
pub use path::*;
pub use shared::*;
pub use store::*;
