//! The built-in terminal surface.
//!
//! Ties the driver, view, and control set together behind the [`Surface`]
//! contract. Key handling resolves quit and sidebar-navigation chords first,
//! then falls through to the focused control.

use crate::error::Result;
use crate::event::{Key, KeyEvent, Modifiers};
use crate::surface::controls::ControlSet;
use crate::surface::driver::Driver;
use crate::surface::view;
use crate::surface::{Surface, SurfaceReaction};
use crate::tree::{ContainerId, NavTree};
use crate::value::ValueStore;

/// Crossterm-backed surface: sidebar plus the current page's controls.
pub struct TermSurface {
    driver: Driver,
    controls: ControlSet,
    title: String,
    width: u16,
    height: u16,
    next_container: u64,
}

impl TermSurface {
    /// Set up the terminal (raw mode, alternate screen) and size the frame.
    pub fn new(title: &str) -> Result<Self> {
        let mut driver = Driver::new()?;
        driver.setup()?;
        let (width, height) = Driver::terminal_size()?;
        Ok(Self {
            driver,
            controls: ControlSet::empty(),
            title: title.to_owned(),
            width,
            height,
            next_container: 0,
        })
    }

    /// Track a terminal resize; the next draw uses the new dimensions.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Redraw the current frame without rebuilding controls.
    pub fn redraw(&mut self, tree: &NavTree, store: &ValueStore, current: &str) -> Result<()> {
        let frame = view::build_frame(tree, store, current, &self.controls, &self.title);
        self.driver.draw(&frame, self.width, self.height)?;
        Ok(())
    }

    /// Handle a key event, returning what the runtime should do next.
    pub fn handle_key(
        &mut self,
        ev: &KeyEvent,
        tree: &NavTree,
        store: &mut ValueStore,
        current: &str,
    ) -> SurfaceReaction {
        if ev.code == Key::Escape
            || (ev.code == Key::Char('c') && ev.modifiers.contains(Modifiers::CTRL))
        {
            return SurfaceReaction::Quit;
        }
        match ev.code {
            Key::PageUp => {
                return match sidebar_step(tree, current, false) {
                    Some(path) => SurfaceReaction::Navigate(path),
                    None => SurfaceReaction::None,
                };
            }
            Key::PageDown => {
                return match sidebar_step(tree, current, true) {
                    Some(path) => SurfaceReaction::Navigate(path),
                    None => SurfaceReaction::None,
                };
            }
            _ => {}
        }
        if self.controls.handle_key(ev, store) {
            SurfaceReaction::Redraw
        } else {
            SurfaceReaction::None
        }
    }
}

impl Surface for TermSurface {
    fn render_node(&mut self, tree: &mut NavTree, store: &ValueStore, path: &str) -> Result<()> {
        match tree.lookup(path) {
            Some(id) => {
                // First materialization claims a container handle.
                if tree.get(id).is_some_and(|page| page.container.is_none()) {
                    let handle = ContainerId(self.next_container);
                    self.next_container += 1;
                    if let Some(page) = tree.get_mut(id) {
                        page.container = Some(handle);
                    }
                }
                // Replace the control list wholesale, in declared order.
                self.controls = tree
                    .get(id)
                    .map(|page| ControlSet::build(page, store))
                    .unwrap_or_else(ControlSet::empty);
            }
            None => self.controls = ControlSet::empty(),
        }
        self.redraw(tree, store, path)
    }

    fn teardown(&mut self) -> Result<()> {
        self.driver.restore()?;
        Ok(())
    }
}

/// Step the sidebar selection one page forward or backward in preorder.
///
/// Returns `None` when already at the corresponding end.
pub fn sidebar_step(tree: &NavTree, current: &str, forward: bool) -> Option<String> {
    let order: Vec<String> = tree
        .flatten()
        .into_iter()
        .filter_map(|id| tree.get(id).map(|page| page.path.clone()))
        .collect();
    let idx = order.iter().position(|p| p == current)?;
    let next = if forward {
        if idx + 1 >= order.len() {
            return None;
        }
        idx + 1
    } else {
        idx.checked_sub(1)?
    };
    Some(order[next].clone())
}
