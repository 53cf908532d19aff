use std::io::Write;
use std::sync::Mutex;

/// User-facing notices. Fire-and-forget: callers never learn whether anyone saw them.
pub trait Alerts: Send + Sync {
    fn show_warning(&self, message: &str);
    fn show_error(&self, message: &str);
    fn show_information(&self, message: &str);
}

/// Prints notices to a terminal stream and mirrors them into the log.
pub struct ConsoleAlerts<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleAlerts<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> ConsoleAlerts<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self, label: &str, message: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{label}: {message}") {
            tracing::warn!("failed to print alert: {}", e);
        }
    }
}

impl<W: Write + Send> Alerts for ConsoleAlerts<W> {
    fn show_warning(&self, message: &str) {
        tracing::warn!("{}", message);
        self.write("Warning", message);
    }

    fn show_error(&self, message: &str) {
        tracing::error!("{}", message);
        self.write("Error", message);
    }

    fn show_information(&self, message: &str) {
        tracing::info!("{}", message);
        self.write("Information", message);
    }
}
