//! A person form driven by a polling loop.
//!
//! Declares a small page tree, then polls the Submit button: when pressed,
//! the current form values are printed (visible after the surface closes)
//! and the button is reset. Quit with Esc.

use std::thread;
use std::time::Duration;

use formtree::{Session, SessionConfig};

fn main() -> Result<(), formtree::Error> {
    let ui = Session::open(SessionConfig::new().with_title("Person Form"))?;

    ui.add_textbox("Title", "Personal Data")?;

    // Pages are created automatically from the label paths.
    ui.add_textbox("Person/Name", "John Doe")?;
    ui.add_selector("Person/Gender", ["Male", "Female", "Other"], "Male")?;
    ui.add_slider("Person/Age", 0.0, 100.0, 1.0, 30.0)?;
    ui.add_checkbox("Person/Add File", true)?;
    ui.add_browse_file("Person/Select File")?;
    ui.add_button("Person/Submit", false)?;

    ui.add_textbox("Option/Country", "Japan")?;

    let mut submissions = Vec::new();
    while ui.is_alive() {
        if ui.get_toggle("Person/Submit").unwrap_or(false) {
            if let (Ok(title), Ok(name), Ok(gender), Ok(age)) = (
                ui.get_text("/Title"),
                ui.get_text("Person/Name"),
                ui.get_text("Person/Gender"),
                ui.get_number("Person/Age"),
            ) {
                submissions.push(format!("{title} / {name} / {gender} / {age}"));
            }
            let _ = ui.set("Person/Submit", false);
        }
        thread::sleep(Duration::from_millis(10));
    }

    for line in submissions {
        println!("submitted: {line}");
    }
    Ok(())
}
