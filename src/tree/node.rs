//! Page node types: PageId, ContainerId, PageData.

use slotmap::new_key_type;

use crate::path;
use crate::widget::WidgetDecl;

new_key_type! {
    /// Unique identifier for a page node. Copy, lightweight (u64).
    pub struct PageId;
}

/// Opaque handle to a page's rendered container.
///
/// Assigned by the surface when it first materializes the page; the core
/// stores it but never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// Data associated with a single page node.
///
/// The widget registry is folded into the node: an ordered list of
/// declarations with a (kind, label) dedup rule.
#[derive(Debug, Clone)]
pub struct PageData {
    /// Normalized path of this page.
    pub path: String,
    /// Widget declarations in declared order.
    pub widgets: Vec<WidgetDecl>,
    /// Render container, once the surface has materialized this page.
    pub container: Option<ContainerId>,
}

impl PageData {
    /// Create an empty page at `path` (must be normalized).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            widgets: Vec::new(),
            container: None,
        }
    }

    /// The last path segment, or `"Root"` for the root page.
    pub fn leaf_name(&self) -> &str {
        path::segments(&self.path).last().unwrap_or("Root")
    }

    /// Append `decl` unless a declaration with the same (kind, label)
    /// identity already exists.
    ///
    /// Returns `true` when the declaration was added, `false` for the
    /// silent duplicate no-op. Duplicates are ignored, never merged: the
    /// existing declaration keeps its configuration.
    pub fn declare(&mut self, decl: WidgetDecl) -> bool {
        if self.widgets.iter().any(|w| w.same_identity(&decl)) {
            return false;
        }
        self.widgets.push(decl);
        true
    }
}
