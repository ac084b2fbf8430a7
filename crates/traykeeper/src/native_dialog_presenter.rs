use traykeeper_core::{ConsoleDialogPresenter, DialogPresenter, DialogSeverity};

/// Modal message boxes where the platform has them, console output elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDialogPresenter;

impl NativeDialogPresenter {
    /// Create a presenter.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "windows")]
impl DialogPresenter for NativeDialogPresenter {
    fn present(&self, severity: DialogSeverity, title: &str, message: &str) {
        use rfd::{MessageButtons, MessageDialog, MessageLevel};
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let level = match severity {
            DialogSeverity::Error => MessageLevel::Error,
            DialogSeverity::Warning => MessageLevel::Warning,
        };

        let shown = catch_unwind(AssertUnwindSafe(|| {
            MessageDialog::new()
                .set_level(level)
                .set_title(title)
                .set_description(message)
                .set_buttons(MessageButtons::Ok)
                .show()
        }));

        if shown.is_err() {
            tracing::warn!(%severity, title, "Message box failed, writing to console");
            ConsoleDialogPresenter.present(severity, title, message);
        }
    }
}

#[cfg(not(target_os = "windows"))]
impl DialogPresenter for NativeDialogPresenter {
    fn present(&self, severity: DialogSeverity, title: &str, message: &str) {
        ConsoleDialogPresenter.present(severity, title, message);
    }
}
