//! Frame construction: sidebar and content lines from tree + store.
//!
//! The view is a plain text frame — a title, the navigation sidebar in
//! preorder, and one content line per control — so it can be asserted on
//! directly in tests and handed to the driver for drawing.

use crate::surface::controls::{Control, ControlSet, ControlState};
use crate::tree::NavTree;
use crate::value::ValueStore;
use crate::{path, value::Value};

/// One display line. `selected` marks the current page in the sidebar and
/// the focused control in the content column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub selected: bool,
}

/// A fully built frame, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub title: String,
    pub sidebar: Vec<Line>,
    pub content: Vec<Line>,
}

/// Build the frame for the page at `current`.
pub fn build_frame(
    tree: &NavTree,
    store: &ValueStore,
    current: &str,
    controls: &ControlSet,
    title: &str,
) -> Frame {
    let sidebar = tree
        .flatten()
        .into_iter()
        .filter_map(|id| tree.get(id))
        .map(|page| Line {
            text: format!(
                "{}{}",
                "  ".repeat(path::depth(&page.path)),
                page.leaf_name()
            ),
            selected: page.path == current,
        })
        .collect();

    let content = controls
        .controls()
        .iter()
        .enumerate()
        .map(|(i, control)| Line {
            text: control_line(control, store),
            selected: controls.focus() == Some(i),
        })
        .collect();

    Frame {
        title: title.to_owned(),
        sidebar,
        content,
    }
}

/// Render one control as a display line, reading its current value from the
/// store (never the declaration default).
fn control_line(control: &Control, store: &ValueStore) -> String {
    let value = store.get(&control.key).ok();
    match &control.state {
        ControlState::Text(_) => {
            format!("{}: {}", control.label, text_of(value.as_ref()))
        }
        ControlState::Select { .. } => {
            format!("{}: < {} >", control.label, text_of(value.as_ref()))
        }
        ControlState::Gauge { min, max, step } => format!(
            "{}: {} [{}..{} step {}]",
            control.label,
            fmt_number(number_of(value.as_ref())),
            fmt_number(*min),
            fmt_number(*max),
            fmt_number(*step),
        ),
        ControlState::Toggle => {
            let mark = if toggle_of(value.as_ref()) { 'x' } else { ' ' };
            format!("[{mark}] {}", control.label)
        }
        ControlState::Push => format!("[ {} ]", control.label),
    }
}

/// Format a number without a trailing `.0` for whole values.
pub fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

/// Flatten a frame to plain text, selected lines starred. Test helper, also
/// handy for logging.
pub fn frame_to_text(frame: &Frame) -> String {
    let mut out = String::new();
    out.push_str(&frame.title);
    out.push('\n');
    let rows = frame.sidebar.len().max(frame.content.len());
    for row in 0..rows {
        let side = frame.sidebar.get(row);
        let body = frame.content.get(row);
        let side_text = side.map_or(String::new(), |l| {
            format!("{}{}", if l.selected { "*" } else { " " }, l.text)
        });
        let body_text = body.map_or(String::new(), |l| {
            format!("{}{}", if l.selected { "*" } else { " " }, l.text)
        });
        out.push_str(&format!("{side_text:<24}| {body_text}\n"));
    }
    out
}

fn text_of(value: Option<&Value>) -> String {
    value
        .and_then(|v| v.as_text())
        .unwrap_or_default()
        .to_owned()
}

fn number_of(value: Option<&Value>) -> f64 {
    value.and_then(|v| v.as_number()).unwrap_or(0.0)
}

fn toggle_of(value: Option<&Value>) -> bool {
    value.and_then(|v| v.as_toggle()).unwrap_or(false)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::controls::ControlSet;
    use crate::widget::WidgetDecl;
    use pretty_assertions::assert_eq;

    fn fixture() -> (NavTree, ValueStore, ControlSet) {
        let mut tree = NavTree::new();
        let id = tree.ensure_path("/Person");
        let mut store = ValueStore::new();
        let decls = vec![
            WidgetDecl::Textbox {
                label: "Name".into(),
                default: "John".into(),
            },
            WidgetDecl::Selector {
                label: "Gender".into(),
                options: vec!["M".into(), "F".into()],
                default: "M".into(),
            },
            WidgetDecl::Slider {
                label: "Age".into(),
                min: 0.0,
                max: 100.0,
                step: 1.0,
                default: 30.0,
            },
            WidgetDecl::Checkbox {
                label: "Member".into(),
                default: true,
            },
            WidgetDecl::Button {
                label: "Submit".into(),
                default: false,
            },
        ];
        {
            let page = tree.get_mut(id).unwrap();
            for decl in decls {
                let key = path::full_key(&page.path, decl.label());
                store.ensure(&key, decl.seed_value());
                page.declare(decl);
            }
        }
        let controls = ControlSet::build(tree.get(id).unwrap(), &store);
        (tree, store, controls)
    }

    #[test]
    fn sidebar_reflects_tree_with_indent() {
        let (tree, store, controls) = fixture();
        let frame = build_frame(&tree, &store, "/Person", &controls, "demo");
        let texts: Vec<&str> = frame.sidebar.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Root", "  Person"]);
        assert!(!frame.sidebar[0].selected);
        assert!(frame.sidebar[1].selected);
    }

    #[test]
    fn content_lines_read_current_values() {
        let (tree, mut store, controls) = fixture();
        store.set("/Person/Name", Value::Text("Jane".into())).unwrap();
        let frame = build_frame(&tree, &store, "/Person", &controls, "demo");
        let texts: Vec<&str> = frame.content.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Name: Jane",
                "Gender: < M >",
                "Age: 30 [0..100 step 1]",
                "[x] Member",
                "[ Submit ]",
            ]
        );
    }

    #[test]
    fn focused_control_is_selected() {
        let (tree, store, controls) = fixture();
        let frame = build_frame(&tree, &store, "/Person", &controls, "demo");
        assert!(frame.content[0].selected);
        assert!(!frame.content[1].selected);
    }

    #[test]
    fn fmt_number_trims_whole_values() {
        assert_eq!(fmt_number(30.0), "30");
        assert_eq!(fmt_number(0.5), "0.5");
    }

    #[test]
    fn frame_to_text_stars_selection() {
        let (tree, store, controls) = fixture();
        let frame = build_frame(&tree, &store, "/Person", &controls, "demo");
        let text = frame_to_text(&frame);
        assert!(text.starts_with("demo\n"));
        assert!(text.contains("*  Person"));
        assert!(text.contains("*Name: John"));
    }
}
