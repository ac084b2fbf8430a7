use crate::{ConsoleDialogPresenter, DialogPresenter, DialogSeverity};

use std::sync::Mutex;

/// WHAT: Console fallback prefixes the title with the severity
/// WHY: Without a native dialog the severity must still be visible
#[test]
#[allow(clippy::unwrap_used)]
fn given_error_when_rendering_to_console_then_severity_prefixed() {
    // Given: A buffer
    let mut out = Vec::new();

    // When: Rendering an error and a warning
    ConsoleDialogPresenter::render(&mut out, DialogSeverity::Error, "Proxy", "Port in use").unwrap();
    ConsoleDialogPresenter::render(&mut out, DialogSeverity::Warning, "Update", "Restart soon")
        .unwrap();

    // Then: Two lines per notification
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "ERROR: Proxy\nPort in use\nWARNING: Update\nRestart soon\n"
    );
}

#[derive(Default)]
struct RecordingPresenter {
    shown: Mutex<Vec<(DialogSeverity, String, String)>>,
}

impl DialogPresenter for RecordingPresenter {
    #[allow(clippy::unwrap_used)]
    fn present(&self, severity: DialogSeverity, title: &str, message: &str) {
        self.shown
            .lock()
            .unwrap()
            .push((severity, title.to_string(), message.to_string()));
    }
}

/// WHAT: show_error and show_warning route through present
/// WHY: Implementations only have to provide one method
#[test]
#[allow(clippy::unwrap_used)]
fn given_presenter_when_showing_then_severity_forwarded() {
    // Given: A recording presenter
    let presenter = RecordingPresenter::default();

    // When: Showing an error then a warning
    presenter.show_error("A", "first");
    presenter.show_warning("B", "second");

    // Then: Both recorded with their severity
    let shown = presenter.shown.lock().unwrap();
    assert_eq!(shown[0], (DialogSeverity::Error, "A".to_string(), "first".to_string()));
    assert_eq!(shown[1], (DialogSeverity::Warning, "B".to_string(), "second".to_string()));
}
