//! Widget declarations.
//!
//! A [`WidgetDecl`] is a declared input control's kind plus configuration,
//! independent of any rendering backend. Within one page no two declarations
//! may share both kind and label; a second declaration of the same identity
//! is silently ignored, even when its defaults differ.

use crate::value::Value;

/// Discriminant of a widget declaration, used for the dedup identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Textbox,
    Selector,
    Slider,
    Checkbox,
    FileBrowse,
    Button,
}

/// A declared input control.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetDecl {
    /// Free-form text entry.
    Textbox { label: String, default: String },
    /// Single-select dropdown.
    Selector {
        label: String,
        options: Vec<String>,
        default: String,
    },
    /// Numeric slider with stepper.
    Slider {
        label: String,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    /// Boolean checkbox.
    Checkbox { label: String, default: bool },
    /// File-path entry. No default — always starts empty.
    FileBrowse { label: String },
    /// Momentary button. The control only ever writes `true`; resetting to
    /// `false` is the host loop's responsibility.
    Button { label: String, default: bool },
}

impl WidgetDecl {
    /// The leaf name this control is declared under.
    pub fn label(&self) -> &str {
        match self {
            WidgetDecl::Textbox { label, .. }
            | WidgetDecl::Selector { label, .. }
            | WidgetDecl::Slider { label, .. }
            | WidgetDecl::Checkbox { label, .. }
            | WidgetDecl::FileBrowse { label }
            | WidgetDecl::Button { label, .. } => label,
        }
    }

    /// The kind discriminant.
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetDecl::Textbox { .. } => WidgetKind::Textbox,
            WidgetDecl::Selector { .. } => WidgetKind::Selector,
            WidgetDecl::Slider { .. } => WidgetKind::Slider,
            WidgetDecl::Checkbox { .. } => WidgetKind::Checkbox,
            WidgetDecl::FileBrowse { .. } => WidgetKind::FileBrowse,
            WidgetDecl::Button { .. } => WidgetKind::Button,
        }
    }

    /// Whether `other` declares the same (kind, label) identity.
    pub fn same_identity(&self, other: &WidgetDecl) -> bool {
        self.kind() == other.kind() && self.label() == other.label()
    }

    /// The value this declaration seeds its cell with.
    ///
    /// Sliders are snapped to the step grid here, once, so the live value
    /// starts aligned; later `get`/`set` never re-snap.
    pub fn seed_value(&self) -> Value {
        match self {
            WidgetDecl::Textbox { default, .. } => Value::Text(default.clone()),
            WidgetDecl::Selector { default, .. } => Value::Text(default.clone()),
            WidgetDecl::Slider {
                min,
                max,
                step,
                default,
                ..
            } => Value::Number(snap_to_step(*default, *min, *max, *step)),
            WidgetDecl::Checkbox { default, .. } => Value::Toggle(*default),
            WidgetDecl::FileBrowse { .. } => Value::Text(String::new()),
            WidgetDecl::Button { default, .. } => Value::Toggle(*default),
        }
    }
}

/// Round `value` to the nearest multiple of `step`, then clamp to
/// `[min, max]`.
///
/// Ties round away from zero (`f64::round` semantics): a value exactly
/// halfway between two steps lands on the larger magnitude. A zero or
/// negative `step` disables snapping and only clamps.
pub fn snap_to_step(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let snapped = if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    };
    snapped.clamp(min, max)
}
