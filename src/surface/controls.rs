//! The control set: one interactive control per widget declaration.
//!
//! Controls hold no value of their own — every mutation is written through
//! to the owning value cell immediately, and every display read goes back to
//! the store, so the host's `get`/`set` and the surface always agree. Text
//! editing keeps only a cursor here; cursor operations are char-boundary
//! safe.

use log::debug;

use crate::event::{Key, KeyEvent};
use crate::path;
use crate::tree::PageData;
use crate::value::{Value, ValueStore};
use crate::widget::WidgetDecl;

// ---------------------------------------------------------------------------
// Control state
// ---------------------------------------------------------------------------

/// Cursor state for a text-entry control. The text itself lives in the
/// value cell.
#[derive(Debug, Clone, Default)]
pub struct TextEdit {
    cursor: usize,
}

impl TextEdit {
    fn at_end(text: &str) -> Self {
        Self { cursor: text.len() }
    }

    /// Pull the cursor back onto a char boundary inside `text`. Needed when
    /// the host shortened the value underneath us.
    fn clamp(&mut self, text: &str) {
        if self.cursor > text.len() {
            self.cursor = text.len();
        }
        while self.cursor > 0 && !text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn prev_boundary(&self, text: &str) -> usize {
        let mut pos = self.cursor.saturating_sub(1);
        while pos > 0 && !text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_boundary(&self, text: &str) -> usize {
        let mut pos = self.cursor + 1;
        while pos < text.len() && !text.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }

    /// Current cursor byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Kind-specific interaction state of one control.
#[derive(Debug, Clone)]
pub enum ControlState {
    /// Textbox and FileBrowse: free text editing.
    Text(TextEdit),
    /// Selector: cycles through its options.
    Select { options: Vec<String> },
    /// Slider: steps within `[min, max]`.
    Gauge { min: f64, max: f64, step: f64 },
    /// Checkbox: flips its cell.
    Toggle,
    /// Button: writes `true`, never `false`.
    Push,
}

/// One materialized control, bound to its value cell by key.
#[derive(Debug, Clone)]
pub struct Control {
    pub key: String,
    pub label: String,
    pub state: ControlState,
}

// ---------------------------------------------------------------------------
// ControlSet
// ---------------------------------------------------------------------------

/// The controls of the currently visible page, plus the focus position.
///
/// Rebuilt wholesale whenever declarations or navigation change what should
/// be visible; there is no incremental patching.
#[derive(Debug, Clone, Default)]
pub struct ControlSet {
    controls: Vec<Control>,
    focus: Option<usize>,
}

impl ControlSet {
    /// An empty set with nothing focused.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Materialize one control per declaration, in declared order, bound to
    /// the page's value cells. Focus starts on the first control.
    pub fn build(page: &PageData, store: &ValueStore) -> Self {
        let controls: Vec<Control> = page
            .widgets
            .iter()
            .map(|decl| {
                let key = path::full_key(&page.path, decl.label());
                let state = match decl {
                    WidgetDecl::Textbox { .. } | WidgetDecl::FileBrowse { .. } => {
                        let text = read_text(store, &key);
                        ControlState::Text(TextEdit::at_end(&text))
                    }
                    WidgetDecl::Selector { options, .. } => ControlState::Select {
                        options: options.clone(),
                    },
                    WidgetDecl::Slider {
                        min, max, step, ..
                    } => ControlState::Gauge {
                        min: *min,
                        max: *max,
                        step: *step,
                    },
                    WidgetDecl::Checkbox { .. } => ControlState::Toggle,
                    WidgetDecl::Button { .. } => ControlState::Push,
                };
                Control {
                    key,
                    label: decl.label().to_owned(),
                    state,
                }
            })
            .collect();
        let focus = if controls.is_empty() { None } else { Some(0) };
        Self { controls, focus }
    }

    /// The controls in display order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Index of the focused control.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the set holds no controls.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Move focus to the next control, wrapping.
    pub fn focus_next(&mut self) {
        if let Some(current) = self.focus {
            self.focus = Some((current + 1) % self.controls.len());
        }
    }

    /// Move focus to the previous control, wrapping.
    pub fn focus_prev(&mut self) {
        if let Some(current) = self.focus {
            self.focus = Some((current + self.controls.len() - 1) % self.controls.len());
        }
    }

    /// Handle a key event against the focused control.
    ///
    /// Returns `true` when the event was consumed (focus moved or a cell
    /// was written). Value writes go through [`ValueStore::set`]
    /// immediately.
    pub fn handle_key(&mut self, ev: &KeyEvent, store: &mut ValueStore) -> bool {
        match ev.code {
            Key::Tab | Key::Down => {
                if self.focus.is_some() {
                    self.focus_next();
                    return true;
                }
                return false;
            }
            Key::BackTab | Key::Up => {
                if self.focus.is_some() {
                    self.focus_prev();
                    return true;
                }
                return false;
            }
            _ => {}
        }

        let Some(idx) = self.focus else {
            return false;
        };
        let control = &mut self.controls[idx];
        match &mut control.state {
            ControlState::Text(edit) => {
                let mut text = read_text(store, &control.key);
                edit.clamp(&text);
                match ev.code {
                    Key::Char(c) => {
                        text.insert(edit.cursor, c);
                        edit.cursor += c.len_utf8();
                        write(store, &control.key, Value::Text(text));
                        true
                    }
                    Key::Backspace => {
                        if edit.cursor > 0 {
                            let prev = edit.prev_boundary(&text);
                            text.drain(prev..edit.cursor);
                            edit.cursor = prev;
                            write(store, &control.key, Value::Text(text));
                        }
                        true
                    }
                    Key::Delete => {
                        if edit.cursor < text.len() {
                            let next = edit.next_boundary(&text);
                            text.drain(edit.cursor..next);
                            write(store, &control.key, Value::Text(text));
                        }
                        true
                    }
                    Key::Left => {
                        if edit.cursor > 0 {
                            edit.cursor = edit.prev_boundary(&text);
                        }
                        true
                    }
                    Key::Right => {
                        if edit.cursor < text.len() {
                            edit.cursor = edit.next_boundary(&text);
                        }
                        true
                    }
                    Key::Home => {
                        edit.cursor = 0;
                        true
                    }
                    Key::End => {
                        edit.cursor = text.len();
                        true
                    }
                    _ => false,
                }
            }
            ControlState::Select { options } => {
                if options.is_empty() {
                    return false;
                }
                let step: isize = match ev.code {
                    Key::Left => -1,
                    Key::Right => 1,
                    _ => return false,
                };
                // Resync from the cell so a host `set` is respected.
                let current = read_text(store, &control.key);
                let idx = options.iter().position(|o| *o == current).unwrap_or(0);
                let len = options.len() as isize;
                let next = (idx as isize + step).rem_euclid(len) as usize;
                write(store, &control.key, Value::Text(options[next].clone()));
                true
            }
            ControlState::Gauge { min, max, step } => {
                let current = store
                    .get(&control.key)
                    .ok()
                    .and_then(|v| v.as_number())
                    .unwrap_or(*min);
                let next = match ev.code {
                    Key::Left => current - *step,
                    Key::Right => current + *step,
                    Key::Home => *min,
                    Key::End => *max,
                    _ => return false,
                };
                write(store, &control.key, Value::Number(next.clamp(*min, *max)));
                true
            }
            ControlState::Toggle => match ev.code {
                Key::Char(' ') | Key::Enter => {
                    let current = store
                        .get(&control.key)
                        .ok()
                        .and_then(|v| v.as_toggle())
                        .unwrap_or(false);
                    write(store, &control.key, Value::Toggle(!current));
                    true
                }
                _ => false,
            },
            ControlState::Push => match ev.code {
                Key::Char(' ') | Key::Enter => {
                    // Only ever writes true; the host loop resets.
                    write(store, &control.key, Value::Toggle(true));
                    true
                }
                _ => false,
            },
        }
    }
}

fn read_text(store: &ValueStore, key: &str) -> String {
    store
        .get(key)
        .ok()
        .and_then(|v| v.as_text().map(str::to_owned))
        .unwrap_or_default()
}

fn write(store: &mut ValueStore, key: &str, value: Value) {
    if let Err(err) = store.set(key, value) {
        debug!("control write to {key:?} failed: {err}");
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page_with(decls: Vec<WidgetDecl>) -> (PageData, ValueStore) {
        let mut page = PageData::new("/Person");
        let mut store = ValueStore::new();
        for decl in decls {
            let key = path::full_key(&page.path, decl.label());
            store.ensure(&key, decl.seed_value());
            page.declare(decl);
        }
        (page, store)
    }

    fn press(set: &mut ControlSet, store: &mut ValueStore, key: Key) -> bool {
        set.handle_key(&KeyEvent::plain(key), store)
    }

    // ── build ────────────────────────────────────────────────────────

    #[test]
    fn build_one_control_per_decl() {
        let (page, store) = page_with(vec![
            WidgetDecl::Textbox {
                label: "Name".into(),
                default: "John".into(),
            },
            WidgetDecl::Checkbox {
                label: "Flag".into(),
                default: false,
            },
        ]);
        let set = ControlSet::build(&page, &store);
        assert_eq!(set.len(), 2);
        assert_eq!(set.focus(), Some(0));
        assert_eq!(set.controls()[0].key, "/Person/Name");
        assert_eq!(set.controls()[1].key, "/Person/Flag");
    }

    #[test]
    fn build_empty_page() {
        let (page, store) = page_with(vec![]);
        let set = ControlSet::build(&page, &store);
        assert!(set.is_empty());
        assert_eq!(set.focus(), None);
    }

    // ── focus cycling ────────────────────────────────────────────────

    #[test]
    fn tab_cycles_focus() {
        let (page, mut store) = page_with(vec![
            WidgetDecl::Checkbox {
                label: "A".into(),
                default: false,
            },
            WidgetDecl::Checkbox {
                label: "B".into(),
                default: false,
            },
        ]);
        let mut set = ControlSet::build(&page, &store);
        assert!(press(&mut set, &mut store, Key::Tab));
        assert_eq!(set.focus(), Some(1));
        assert!(press(&mut set, &mut store, Key::Tab));
        assert_eq!(set.focus(), Some(0));
        assert!(press(&mut set, &mut store, Key::BackTab));
        assert_eq!(set.focus(), Some(1));
    }

    #[test]
    fn focus_keys_on_empty_set() {
        let (page, mut store) = page_with(vec![]);
        let mut set = ControlSet::build(&page, &store);
        assert!(!press(&mut set, &mut store, Key::Tab));
    }

    // ── text editing ─────────────────────────────────────────────────

    #[test]
    fn typing_appends_to_cell() {
        let (page, mut store) = page_with(vec![WidgetDecl::Textbox {
            label: "Name".into(),
            default: "Jo".into(),
        }]);
        let mut set = ControlSet::build(&page, &store);
        press(&mut set, &mut store, Key::Char('h'));
        press(&mut set, &mut store, Key::Char('n'));
        assert_eq!(
            store.get("/Person/Name"),
            Ok(Value::Text("John".into()))
        );
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let (page, mut store) = page_with(vec![WidgetDecl::Textbox {
            label: "Name".into(),
            default: "abc".into(),
        }]);
        let mut set = ControlSet::build(&page, &store);
        press(&mut set, &mut store, Key::Backspace);
        assert_eq!(store.get("/Person/Name"), Ok(Value::Text("ab".into())));
    }

    #[test]
    fn insert_in_middle_after_cursor_moves() {
        let (page, mut store) = page_with(vec![WidgetDecl::Textbox {
            label: "Name".into(),
            default: "ac".into(),
        }]);
        let mut set = ControlSet::build(&page, &store);
        press(&mut set, &mut store, Key::Left);
        press(&mut set, &mut store, Key::Char('b'));
        assert_eq!(store.get("/Person/Name"), Ok(Value::Text("abc".into())));
    }

    #[test]
    fn unicode_editing_is_boundary_safe() {
        let (page, mut store) = page_with(vec![WidgetDecl::Textbox {
            label: "Name".into(),
            default: "a\u{00e9}b".into(),
        }]);
        let mut set = ControlSet::build(&page, &store);
        press(&mut set, &mut store, Key::Backspace); // remove 'b'
        press(&mut set, &mut store, Key::Backspace); // remove e-acute
        assert_eq!(store.get("/Person/Name"), Ok(Value::Text("a".into())));
    }

    #[test]
    fn cursor_survives_host_truncation() {
        let (page, mut store) = page_with(vec![WidgetDecl::Textbox {
            label: "Name".into(),
            default: "a long value".into(),
        }]);
        let mut set = ControlSet::build(&page, &store);
        // Host shrinks the value while the cursor sits at the old end.
        store.set("/Person/Name", Value::Text("x".into())).unwrap();
        press(&mut set, &mut store, Key::Char('y'));
        assert_eq!(store.get("/Person/Name"), Ok(Value::Text("xy".into())));
    }

    #[test]
    fn filebrowse_edits_like_text() {
        let (page, mut store) = page_with(vec![WidgetDecl::FileBrowse {
            label: "File".into(),
        }]);
        let mut set = ControlSet::build(&page, &store);
        for c in "/tmp".chars() {
            press(&mut set, &mut store, Key::Char(c));
        }
        assert_eq!(store.get("/Person/File"), Ok(Value::Text("/tmp".into())));
    }

    // ── selector ─────────────────────────────────────────────────────

    #[test]
    fn selector_cycles_options() {
        let (page, mut store) = page_with(vec![WidgetDecl::Selector {
            label: "Gender".into(),
            options: vec!["M".into(), "F".into()],
            default: "M".into(),
        }]);
        let mut set = ControlSet::build(&page, &store);
        press(&mut set, &mut store, Key::Right);
        assert_eq!(store.get("/Person/Gender"), Ok(Value::Text("F".into())));
        press(&mut set, &mut store, Key::Right);
        assert_eq!(store.get("/Person/Gender"), Ok(Value::Text("M".into())));
        press(&mut set, &mut store, Key::Left);
        assert_eq!(store.get("/Person/Gender"), Ok(Value::Text("F".into())));
    }

    #[test]
    fn selector_resyncs_after_host_set() {
        let (page, mut store) = page_with(vec![WidgetDecl::Selector {
            label: "Gender".into(),
            options: vec!["M".into(), "F".into(), "X".into()],
            default: "M".into(),
        }]);
        let mut set = ControlSet::build(&page, &store);
        store.set("/Person/Gender", Value::Text("F".into())).unwrap();
        press(&mut set, &mut store, Key::Right);
        assert_eq!(store.get("/Person/Gender"), Ok(Value::Text("X".into())));
    }

    // ── gauge ────────────────────────────────────────────────────────

    #[test]
    fn gauge_steps_and_clamps() {
        let (page, mut store) = page_with(vec![WidgetDecl::Slider {
            label: "Age".into(),
            min: 0.0,
            max: 10.0,
            step: 3.0,
            default: 9.0,
        }]);
        let mut set = ControlSet::build(&page, &store);
        press(&mut set, &mut store, Key::Right);
        // 9 + 3 clamps to 10.
        assert_eq!(store.get("/Person/Age"), Ok(Value::Number(10.0)));
        press(&mut set, &mut store, Key::Home);
        assert_eq!(store.get("/Person/Age"), Ok(Value::Number(0.0)));
        press(&mut set, &mut store, Key::Left);
        assert_eq!(store.get("/Person/Age"), Ok(Value::Number(0.0)));
    }

    // ── toggle / push ────────────────────────────────────────────────

    #[test]
    fn toggle_flips() {
        let (page, mut store) = page_with(vec![WidgetDecl::Checkbox {
            label: "Flag".into(),
            default: false,
        }]);
        let mut set = ControlSet::build(&page, &store);
        press(&mut set, &mut store, Key::Char(' '));
        assert_eq!(store.get("/Person/Flag"), Ok(Value::Toggle(true)));
        press(&mut set, &mut store, Key::Enter);
        assert_eq!(store.get("/Person/Flag"), Ok(Value::Toggle(false)));
    }

    #[test]
    fn push_only_writes_true() {
        let (page, mut store) = page_with(vec![WidgetDecl::Button {
            label: "Go".into(),
            default: false,
        }]);
        let mut set = ControlSet::build(&page, &store);
        press(&mut set, &mut store, Key::Enter);
        assert_eq!(store.get("/Person/Go"), Ok(Value::Toggle(true)));
        // Pressing again never resets it.
        press(&mut set, &mut store, Key::Enter);
        assert_eq!(store.get("/Person/Go"), Ok(Value::Toggle(true)));
    }

    // ── unhandled keys ───────────────────────────────────────────────

    #[test]
    fn unhandled_key_not_consumed() {
        let (page, mut store) = page_with(vec![WidgetDecl::Checkbox {
            label: "Flag".into(),
            default: false,
        }]);
        let mut set = ControlSet::build(&page, &store);
        assert!(!press(&mut set, &mut store, Key::PageUp));
        assert_eq!(store.get("/Person/Flag"), Ok(Value::Toggle(false)));
    }
}
