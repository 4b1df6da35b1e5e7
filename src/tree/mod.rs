//! The navigation tree: slotmap-backed page arena with a path index.

pub mod nav;
pub mod node;

pub use nav::NavTree;
pub use node::{ContainerId, PageData, PageId};
