//! Tree operations: ensure, lookup, walk.
//!
//! All pages live in a single slotmap arena; parent/child edges are stored
//! in secondary maps and a string index maps normalized paths to ids.
//! [`NavTree::ensure_path`] auto-creates every missing ancestor of a path,
//! idempotently — a page exists for every prefix of every path that has
//! ever been referenced, and none is ever deleted while the session lives.

use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use crate::path::{self, ROOT};
use crate::tree::node::{PageData, PageId};

/// Empty slice constant for returning when a page has no children.
const EMPTY_CHILDREN: &[PageId] = &[];

/// The navigation tree.
pub struct NavTree {
    nodes: SlotMap<PageId, PageData>,
    children: SecondaryMap<PageId, Vec<PageId>>,
    parent: SecondaryMap<PageId, PageId>,
    index: HashMap<String, PageId>,
    root: PageId,
}

impl NavTree {
    /// Create a tree holding only the root page `/`.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut children = SecondaryMap::new();
        let mut index = HashMap::new();
        let root = nodes.insert(PageData::new(ROOT));
        children.insert(root, Vec::new());
        index.insert(ROOT.to_owned(), root);
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            index,
            root,
        }
    }

    /// The root page id.
    pub fn root(&self) -> PageId {
        self.root
    }

    /// Look up a page id by normalized path.
    pub fn lookup(&self, path: &str) -> Option<PageId> {
        self.index.get(path).copied()
    }

    /// Whether a page exists at `path` (normalized).
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Immutable access to a page's data.
    pub fn get(&self, id: PageId) -> Option<&PageData> {
        self.nodes.get(id)
    }

    /// Mutable access to a page's data.
    pub fn get_mut(&mut self, id: PageId) -> Option<&mut PageData> {
        self.nodes.get_mut(id)
    }

    /// The children of a page, in creation order.
    pub fn children(&self, id: PageId) -> &[PageId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// The parent of a page, if it is not the root.
    pub fn parent(&self, id: PageId) -> Option<PageId> {
        self.parent.get(id).copied()
    }

    /// Number of pages, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Walk `path` (normalized) root-down, creating any missing page for
    /// every prefix, and return the id of the final page.
    ///
    /// Idempotent: existing pages are reused, never duplicated, so a path
    /// whose prefix was declared separately earlier gains exactly the
    /// missing suffix pages.
    pub fn ensure_path(&mut self, path: &str) -> PageId {
        let mut current = String::new();
        let mut parent_id = self.root;
        for segment in path::segments(path) {
            current.push('/');
            current.push_str(segment);
            let existing = self.index.get(current.as_str()).copied();
            parent_id = match existing {
                Some(id) => id,
                None => self.insert_child(parent_id, &current),
            };
        }
        parent_id
    }

    /// Pre-order depth-first traversal of the whole tree, root first.
    ///
    /// This is the sidebar display order.
    pub fn flatten(&self) -> Vec<PageId> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    fn insert_child(&mut self, parent: PageId, child_path: &str) -> PageId {
        let id = self.nodes.insert(PageData::new(child_path));
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        self.index.insert(child_path.to_owned(), id);
        id
    }
}

impl Default for NavTree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
