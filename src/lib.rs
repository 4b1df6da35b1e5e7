//! # formtree
//!
//! A path-addressed, declarative form-state manager. A host program
//! describes a tree of pages holding typed input widgets (textboxes,
//! selectors, sliders, checkboxes, file-path entries, momentary buttons)
//! and polls or pushes their live values by path, while an optional
//! terminal surface reflects and edits the same state.
//!
//! ```no_run
//! use formtree::Session;
//!
//! let ui = Session::headless("example");
//! ui.add_textbox("Person/Name", "John")?;
//! ui.add_selector("Person/Gender", ["M", "F"], "M")?;
//! assert!(ui.navigate_to("/Person"));
//! ui.set("/Person/Name", "Jane")?;
//! assert_eq!(ui.get_text("/Person/Name")?, "Jane");
//! # Ok::<(), formtree::Error>(())
//! ```
//!
//! ## Core Systems
//!
//! - **[`path`]** — Path normalization, label parsing, value-key derivation
//! - **[`value`]** — Tagged value cells and the key-addressed store
//! - **[`tree`]** — Slotmap-backed page arena with ancestor auto-creation
//! - **[`widget`]** — Widget declarations and their dedup identity
//! - **[`event`]** — Input events, decoupled from the terminal backend
//! - **[`surface`]** — The renderer contract and the built-in crossterm surface
//! - **[`session`]** — The host-facing facade and lifecycle

// Foundation
pub mod error;
pub mod path;

// Core systems
pub mod tree;
pub mod value;
pub mod widget;

// Surface
pub mod event;
pub mod surface;

// Session
pub mod session;
mod runtime;

pub use error::Error;
pub use session::{Session, SessionConfig};
pub use value::Value;
