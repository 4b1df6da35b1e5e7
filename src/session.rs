//! Session facade: lifecycle, declarations, data access, navigation.
//!
//! A [`Session`] is an explicit object with an explicit lifecycle: `open`
//! spawns the render thread and blocks on a oneshot rendezvous until the
//! first frame is up, `close` (or drop) tears it down.
//! With [`SessionConfig::headless`] no render thread exists and the data
//! model behaves identically.
//!
//! `get`/`set` are pure data operations, safe from the host thread without
//! marshaling; everything that touches rendering state goes through the
//! command channel to the render thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};

use crate::error::{Error, Result};
use crate::path::{self, ROOT};
use crate::runtime::{self, Command};
use crate::tree::NavTree;
use crate::value::{Value, ValueStore};
use crate::widget::WidgetDecl;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Window title, shown by the surface.
    pub title: String,
    /// Target frames per second for the render loop.
    pub fps: u32,
    /// Run without any rendering surface.
    pub nogui: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title: "formtree".to_owned(),
            fps: 30,
            nogui: false,
        }
    }
}

impl SessionConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Enable or disable headless mode (builder).
    pub fn headless(mut self, nogui: bool) -> Self {
        self.nogui = nogui;
        self
    }
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// State shared between the host thread and the render thread.
pub(crate) struct Shared {
    pub alive: AtomicBool,
    pub tree: Mutex<NavTree>,
    pub store: Mutex<ValueStore>,
    pub current: Mutex<String>,
}

impl Shared {
    fn new() -> Self {
        Self {
            alive: AtomicBool::new(true),
            tree: Mutex::new(NavTree::new()),
            store: Mutex::new(ValueStore::new()),
            current: Mutex::new(ROOT.to_owned()),
        }
    }
}

/// Lock a mutex, recovering the data from a poisoned lock. A panic on the
/// render thread must not wedge the host's polling loop.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A live form-state session.
///
/// Declarations (`add_*`) build the page tree and seed value cells; `get`
/// and `set` read and write cells by fully-qualified path; `navigate_to`
/// switches the visible page. All entities live until the session closes.
pub struct Session {
    shared: Arc<Shared>,
    cmd_tx: Option<mpsc::UnboundedSender<Command>>,
    render: Option<JoinHandle<()>>,
}

impl Session {
    /// Open a session. Unless configured headless, this spawns the render
    /// thread and blocks until it has constructed its first frame.
    pub fn open(config: SessionConfig) -> Result<Self> {
        let shared = Arc::new(Shared::new());
        if config.nogui {
            debug!("opened headless session {:?}", config.title);
            return Ok(Self {
                shared,
                cmd_tx: None,
                render: None,
            });
        }
        let (ready_tx, ready_rx) = oneshot::channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let render = runtime::spawn(
            Arc::clone(&shared),
            config.title.clone(),
            config.fps,
            ready_tx,
            cmd_rx,
        )?;
        match ready_rx.blocking_recv() {
            Ok(Ok(())) => {
                debug!("opened session {:?}", config.title);
                Ok(Self {
                    shared,
                    cmd_tx: Some(cmd_tx),
                    render: Some(render),
                })
            }
            Ok(Err(err)) => {
                let _ = render.join();
                Err(err)
            }
            // The render thread died before signaling.
            Err(_) => {
                let _ = render.join();
                Err(Error::Closed)
            }
        }
    }

    /// Open a headless session: full data model, no rendering surface.
    pub fn headless(title: &str) -> Self {
        debug!("opened headless session {title:?}");
        Self {
            shared: Arc::new(Shared::new()),
            cmd_tx: None,
            render: None,
        }
    }

    /// Whether the session is still running.
    pub fn is_alive(&self) -> bool {
        self.shared.alive.load(Ordering::SeqCst)
    }

    /// The currently visible path.
    pub fn current_path(&self) -> String {
        lock(&self.shared.current).clone()
    }

    // ── declarations ─────────────────────────────────────────────────

    /// Declare a textbox. The label may carry a path: `"Person/Name"`.
    pub fn add_textbox(&self, label: &str, default: &str) -> Result<()> {
        let default = default.to_owned();
        self.declare(label, move |leaf| WidgetDecl::Textbox {
            label: leaf,
            default,
        })
    }

    /// Declare a dropdown selector.
    pub fn add_selector<I, S>(&self, label: &str, options: I, default: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let default = default.to_owned();
        self.declare(label, move |leaf| WidgetDecl::Selector {
            label: leaf,
            options,
            default,
        })
    }

    /// Declare a numeric slider. The default is snapped to the step grid
    /// once, when the cell is seeded.
    pub fn add_slider(&self, label: &str, min: f64, max: f64, step: f64, default: f64) -> Result<()> {
        self.declare(label, move |leaf| WidgetDecl::Slider {
            label: leaf,
            min,
            max,
            step,
            default,
        })
    }

    /// Declare a checkbox.
    pub fn add_checkbox(&self, label: &str, default: bool) -> Result<()> {
        self.declare(label, move |leaf| WidgetDecl::Checkbox {
            label: leaf,
            default,
        })
    }

    /// Declare a file-path entry. Always starts empty.
    pub fn add_browse_file(&self, label: &str) -> Result<()> {
        self.declare(label, |leaf| WidgetDecl::FileBrowse { label: leaf })
    }

    /// Declare a momentary button. The surface only ever writes `true`;
    /// resetting is the host loop's job.
    pub fn add_button(&self, label: &str, default: bool) -> Result<()> {
        self.declare(label, move |leaf| WidgetDecl::Button {
            label: leaf,
            default,
        })
    }

    // ── data access ──────────────────────────────────────────────────

    /// Read the live value at `target` (normalized before lookup).
    pub fn get(&self, target: &str) -> Result<Value> {
        self.ensure_alive()?;
        let key = path::normalize(target);
        lock(&self.shared.store).get(&key)
    }

    /// Write the live value at `target`. The value must match the variant
    /// the cell was declared with.
    pub fn set(&self, target: &str, value: impl Into<Value>) -> Result<()> {
        self.ensure_alive()?;
        let key = path::normalize(target);
        lock(&self.shared.store).set(&key, value.into())
    }

    /// Read a text cell, failing on type mismatch.
    pub fn get_text(&self, target: &str) -> Result<String> {
        let value = self.get(target)?;
        value
            .as_text()
            .map(str::to_owned)
            .ok_or_else(|| Error::TypeMismatch {
                expected: "text",
                found: value.type_name(),
            })
    }

    /// Read a number cell, failing on type mismatch.
    pub fn get_number(&self, target: &str) -> Result<f64> {
        let value = self.get(target)?;
        value.as_number().ok_or_else(|| Error::TypeMismatch {
            expected: "number",
            found: value.type_name(),
        })
    }

    /// Read a toggle cell, failing on type mismatch.
    pub fn get_toggle(&self, target: &str) -> Result<bool> {
        let value = self.get(target)?;
        value.as_toggle().ok_or_else(|| Error::TypeMismatch {
            expected: "toggle",
            found: value.type_name(),
        })
    }

    // ── navigation ───────────────────────────────────────────────────

    /// Switch the visible page. Returns `false` (leaving the current path
    /// unchanged) when the target page does not exist or the session is
    /// closed.
    pub fn navigate_to(&self, target: &str) -> bool {
        if !self.is_alive() {
            return false;
        }
        let target = path::normalize(target);
        if !lock(&self.shared.tree).contains(&target) {
            warn!("navigate to unknown path {target:?}");
            return false;
        }
        *lock(&self.shared.current) = target.clone();
        if let Some(tx) = &self.cmd_tx {
            let _ = tx.send(Command::Navigate(target));
        }
        true
    }

    /// Shut the session down: tear down the surface, join the render
    /// thread, and flip `alive`. Idempotent; also run on drop.
    pub fn close(&mut self) {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(Command::Close);
        }
        if let Some(handle) = self.render.take() {
            let _ = handle.join();
        }
        if self.shared.alive.swap(false, Ordering::SeqCst) {
            debug!("session closed");
        }
    }

    // ── internals ────────────────────────────────────────────────────

    fn ensure_alive(&self) -> Result<()> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(Error::Closed)
        }
    }

    /// Shared declaration path: parse the label, ensure the page chain,
    /// dedup on (kind, label), seed the cell, and re-render if the target
    /// page is the visible one.
    fn declare<F>(&self, label: &str, build: F) -> Result<()>
    where
        F: FnOnce(String) -> WidgetDecl,
    {
        self.ensure_alive()?;
        let (parent, leaf) =
            path::parse_label(label).ok_or_else(|| Error::InvalidLabel(label.to_owned()))?;
        let decl = build(leaf);
        let key = path::full_key(&parent, decl.label());
        let seed = decl.seed_value();
        {
            let mut tree = lock(&self.shared.tree);
            let id = tree.ensure_path(&parent);
            match tree.get_mut(id) {
                Some(page) => {
                    if !page.declare(decl) {
                        debug!("duplicate declaration at {key:?} ignored");
                        return Ok(());
                    }
                }
                None => return Ok(()),
            }
        }
        // Only the very first declaration seeds the cell.
        lock(&self.shared.store).ensure(&key, seed);
        if *lock(&self.shared.current) == parent {
            if let Some(tx) = &self.cmd_tx {
                let _ = tx.send(Command::Refresh);
            }
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
