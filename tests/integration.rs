//! Integration tests for formtree.
//!
//! These tests exercise the public API from outside the crate, headless:
//! the data model must behave identically with and without a surface.

use formtree::{Error, Session, SessionConfig, Value};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn person_form_scenario() {
    let ui = Session::headless("scenario");

    ui.add_textbox("Person/Name", "John").unwrap();
    ui.add_selector("Person/Gender", ["M", "F"], "M").unwrap();

    assert!(ui.navigate_to("/Person"));
    assert_eq!(ui.get("/Person/Name"), Ok(Value::Text("John".into())));

    ui.set("/Person/Name", "Jane").unwrap();
    assert_eq!(ui.get("/Person/Name"), Ok(Value::Text("Jane".into())));

    assert!(!ui.navigate_to("/Nonexistent"));
    assert_eq!(ui.current_path(), "/Person");
}

#[test]
fn headless_config_round_trip() {
    let ui = Session::open(SessionConfig::new().with_title("cfg").headless(true)).unwrap();
    assert!(ui.is_alive());
    ui.add_textbox("Title", "Personal Data").unwrap();
    assert_eq!(ui.get_text("/Title"), Ok("Personal Data".into()));
}

// ---------------------------------------------------------------------------
// Declaration semantics
// ---------------------------------------------------------------------------

#[test]
fn duplicate_declaration_keeps_first_default() {
    let ui = Session::headless("dup");
    ui.add_textbox("Person/Name", "John").unwrap();
    ui.add_textbox("Person/Name", "Ignored").unwrap();
    assert_eq!(ui.get_text("/Person/Name"), Ok("John".into()));
}

#[test]
fn duplicate_declaration_preserves_live_value() {
    let ui = Session::headless("dup-live");
    ui.add_checkbox("Flag", false).unwrap();
    ui.set("/Flag", true).unwrap();
    ui.add_checkbox("Flag", false).unwrap();
    assert_eq!(ui.get_toggle("/Flag"), Ok(true));
}

#[test]
fn same_label_different_kinds_coexist() {
    let ui = Session::headless("kinds");
    ui.add_textbox("Name", "John").unwrap();
    // A selector with the same label is a distinct control. Value keys
    // carry no kind, so both address the same cell; the first seed wins.
    ui.add_selector("Name", ["A", "B"], "A").unwrap();
    assert_eq!(ui.get_text("/Name"), Ok("John".into()));
}

#[test]
fn auto_creation_closure() {
    let ui = Session::headless("closure");
    // Declare the /A/B prefix first, then a deeper path through it.
    ui.add_textbox("A/B/First", "prefix").unwrap();
    ui.add_textbox("A/B/C/Leaf", "deeper").unwrap();
    for p in ["/A", "/A/B", "/A/B/C"] {
        assert!(ui.navigate_to(p), "expected page at {p}");
    }
}

#[test]
fn slider_snaps_default_once() {
    let ui = Session::headless("snap");
    ui.add_slider("S", 0.0, 10.0, 3.0, 4.0).unwrap();
    assert_eq!(ui.get_number("/S"), Ok(3.0));
    // Later writes are not re-snapped.
    ui.set("/S", 4.0).unwrap();
    assert_eq!(ui.get_number("/S"), Ok(4.0));
}

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

#[test]
fn button_reset_discipline() {
    let ui = Session::headless("button");
    ui.add_button("Go", false).unwrap();
    ui.set("Go", true).unwrap();
    assert_eq!(ui.get_toggle("Go"), Ok(true));
    assert_eq!(ui.get_toggle("Go"), Ok(true));
    ui.set("Go", false).unwrap();
    assert_eq!(ui.get_toggle("Go"), Ok(false));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn lookup_failures_are_typed_not_fatal() {
    let ui = Session::headless("errors");
    assert_eq!(ui.get("/nope"), Err(Error::NotFound("/nope".into())));
    assert_eq!(
        ui.set("/nope", true),
        Err(Error::NotFound("/nope".into()))
    );
    assert!(!ui.navigate_to("/nope"));
    // The session keeps running after all of the above.
    assert!(ui.is_alive());
}

#[test]
fn malformed_labels_rejected() {
    let ui = Session::headless("labels");
    assert!(matches!(
        ui.add_textbox("", "x"),
        Err(Error::InvalidLabel(_))
    ));
    assert!(matches!(
        ui.add_browse_file("//"),
        Err(Error::InvalidLabel(_))
    ));
}

#[test]
fn closed_session_fails_softly() {
    let mut ui = Session::headless("closed");
    ui.add_button("Go", false).unwrap();
    ui.close();
    assert_eq!(ui.get("/Go"), Err(Error::Closed));
    assert_eq!(ui.set("/Go", true), Err(Error::Closed));
    assert!(!ui.navigate_to("/"));
    assert!(!ui.is_alive());
}
