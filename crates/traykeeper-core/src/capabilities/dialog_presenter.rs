use std::{fmt, io::Write};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSeverity {
    /// Something failed.
    Error,
    /// Something needs the user's attention.
    Warning,
}

impl fmt::Display for DialogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogSeverity::Error => f.write_str("ERROR"),
            DialogSeverity::Warning => f.write_str("WARNING"),
        }
    }
}

/// Presents modal notifications to the user.
///
/// Best-effort: implementations swallow presentation failures.
pub trait DialogPresenter: Send + Sync {
    /// Present a notification of the given severity.
    fn present(&self, severity: DialogSeverity, title: &str, message: &str);

    /// Present an error notification.
    fn show_error(&self, title: &str, message: &str) {
        self.present(DialogSeverity::Error, title, message);
    }

    /// Present a warning notification.
    fn show_warning(&self, title: &str, message: &str) {
        self.present(DialogSeverity::Warning, title, message);
    }
}

/// Fallback presenter for platforms without a native modal facility.
///
/// Writes `SEVERITY: title` followed by the message to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDialogPresenter;

impl ConsoleDialogPresenter {
    /// Render a notification into `out`.
    pub fn render<W: Write>(
        out: &mut W,
        severity: DialogSeverity,
        title: &str,
        message: &str,
    ) -> std::io::Result<()> {
        writeln!(out, "{}: {}", severity, title)?;
        writeln!(out, "{}", message)
    }
}

impl DialogPresenter for ConsoleDialogPresenter {
    fn present(&self, severity: DialogSeverity, title: &str, message: &str) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = Self::render(&mut out, severity, title, message);
    }
}
