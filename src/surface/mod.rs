//! The rendering surface: contract, control set, line view, terminal driver.
//!
//! The core only depends on the [`Surface`] trait; [`TermSurface`] is the
//! built-in crossterm backend. A session constructed headless attaches no
//! surface at all, and the data model behaves identically either way.

pub mod controls;
pub mod driver;
pub mod term;
pub mod view;

pub use term::TermSurface;

use crate::error::Result;
use crate::tree::NavTree;
use crate::value::ValueStore;

/// Contract between the session core and a rendering backend.
///
/// `render_node` must replace whatever controls currently occupy the node's
/// container with one control per declaration, in declared order, each bound
/// write-through to its value cell: user interaction writes into the store
/// immediately, and the store's *current* value (not the declaration
/// default) is what the control displays. The rendering model is a full
/// rebuild, not an incremental patch.
pub trait Surface {
    /// Rebuild and draw the controls for the page at `path`.
    ///
    /// The tree is mutable so the surface can record the container handle it
    /// assigns on first materialization.
    fn render_node(&mut self, tree: &mut NavTree, store: &ValueStore, path: &str) -> Result<()>;

    /// Tear down everything the surface put on screen.
    fn teardown(&mut self) -> Result<()>;
}

/// What the surface asks the core to do after handling input.
///
/// `Navigate` is the renderer-initiated navigation of the contract: a
/// sidebar selection on the render side updates the current path through
/// the same machinery as a host `navigate_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceReaction {
    /// Nothing consumed the input.
    None,
    /// A control mutated state or focus moved; redraw the frame.
    Redraw,
    /// The user selected another page in the sidebar.
    Navigate(String),
    /// The user asked to quit the surface.
    Quit,
}
