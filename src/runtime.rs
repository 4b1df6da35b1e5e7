//! The render thread.
//!
//! Each session with a surface owns one render thread running a
//! current-thread tokio runtime: a `select!` loop over the crossterm event
//! stream, the session's command channel, and a frame-pacing ticker. All
//! control construction and destruction happens here — the host thread
//! never touches the surface. Readiness is a oneshot rendezvous resolved
//! after the first frame.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use crossterm::event::EventStream;
use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::error::{Error, Result};
use crate::event::{self, InputEvent};
use crate::session::{lock, Shared};
use crate::surface::{Surface, SurfaceReaction, TermSurface};

/// Messages the session marshals onto the render thread.
#[derive(Debug)]
pub(crate) enum Command {
    /// Declarations changed on the visible page; rebuild its controls.
    Refresh,
    /// The current path changed to the given page.
    Navigate(String),
    /// Tear the surface down and exit the loop.
    Close,
}

/// Spawn the render thread.
pub(crate) fn spawn(
    shared: Arc<Shared>,
    title: String,
    fps: u32,
    ready_tx: oneshot::Sender<Result<()>>,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("formtree-render".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    shared.alive.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(Error::from(err)));
                    return;
                }
            };
            runtime.block_on(run_loop(shared, title, fps, ready_tx, cmd_rx));
        })
}

async fn run_loop(
    shared: Arc<Shared>,
    title: String,
    fps: u32,
    ready_tx: oneshot::Sender<Result<()>>,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut surface = match TermSurface::new(&title) {
        Ok(surface) => surface,
        Err(err) => {
            shared.alive.store(false, Ordering::SeqCst);
            let _ = ready_tx.send(Err(err));
            return;
        }
    };

    // First frame before signaling: construction is a one-time barrier.
    render_current(&mut surface, &shared);
    let _ = ready_tx.send(Ok(()));

    let mut events = EventStream::new();
    let period = (1000 / fps.max(1)).max(1);
    let mut ticker = interval(Duration::from_millis(u64::from(period)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut seen_revision = lock(&shared.store).revision();

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(Command::Refresh) => render_current(&mut surface, &shared),
                Some(Command::Navigate(path)) => {
                    debug!("navigate to {path:?}");
                    render_current(&mut surface, &shared);
                }
                Some(Command::Close) | None => break,
            },
            maybe_event = events.next() => match maybe_event {
                Some(Ok(raw)) => match event::convert(raw) {
                    Some(InputEvent::Key(key)) => {
                        let reaction = {
                            let current = lock(&shared.current).clone();
                            let tree = lock(&shared.tree);
                            let mut store = lock(&shared.store);
                            surface.handle_key(&key, &tree, &mut store, &current)
                        };
                        match reaction {
                            SurfaceReaction::Quit => break,
                            SurfaceReaction::Navigate(path) => {
                                // Renderer-initiated navigation: same shared
                                // current-path machinery as the host side.
                                *lock(&shared.current) = path;
                                render_current(&mut surface, &shared);
                            }
                            SurfaceReaction::Redraw => redraw_current(&mut surface, &shared),
                            SurfaceReaction::None => {}
                        }
                        seen_revision = lock(&shared.store).revision();
                    }
                    Some(InputEvent::Resize { width, height }) => {
                        surface.resize(width, height);
                        redraw_current(&mut surface, &shared);
                    }
                    None => {}
                },
                Some(Err(err)) => warn!("input stream error: {err}"),
                None => break,
            },
            _ = ticker.tick() => {
                // Host-side `set` calls never trigger rendering themselves;
                // the ticker picks up the store revision instead.
                let revision = lock(&shared.store).revision();
                if revision != seen_revision {
                    seen_revision = revision;
                    redraw_current(&mut surface, &shared);
                }
            }
        }
    }

    if let Err(err) = surface.teardown() {
        warn!("surface teardown failed: {err}");
    }
    shared.alive.store(false, Ordering::SeqCst);
    debug!("render thread exited");
}

fn render_current(surface: &mut TermSurface, shared: &Shared) {
    let current = lock(&shared.current).clone();
    let mut tree = lock(&shared.tree);
    let store = lock(&shared.store);
    if let Err(err) = surface.render_node(&mut tree, &store, &current) {
        warn!("render of {current:?} failed: {err}");
    }
}

fn redraw_current(surface: &mut TermSurface, shared: &Shared) {
    let current = lock(&shared.current).clone();
    let tree = lock(&shared.tree);
    let store = lock(&shared.store);
    if let Err(err) = surface.redraw(&tree, &store, &current) {
        warn!("redraw of {current:?} failed: {err}");
    }
}
