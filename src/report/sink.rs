//! Report output sinks.
//!
//! The reporter never writes to a process stream itself; it hands the
//! finished report to a [`ReportSink`].

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::report::render::{truncate_for_display, StartupReport};

/// Destination for a finished startup report.
pub trait ReportSink: Send + Sync {
    fn emit(&self, report: &StartupReport);
}

impl<T: ReportSink + ?Sized> ReportSink for Arc<T> {
    fn emit(&self, report: &StartupReport) {
        (**self).emit(report)
    }
}

/// Writes the text layout to any `io::Write`.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ReportSink for WriterSink<W> {
    fn emit(&self, report: &StartupReport) {
        let text = report.to_text();
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = write_text(&mut *writer, &text) {
            tracing::warn!(error = %e, "Failed to write startup report");
        }
    }
}

fn write_text<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

/// Emits the report as structured `tracing` events, one per entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&self, report: &StartupReport) {
        tracing::info!(
            service = %report.service_name(),
            environment = %report.environment(),
            categories = report.categories().len(),
            "Startup configuration"
        );
        for category in report.categories() {
            for entry in category.entries() {
                tracing::info!(
                    category = %category.name(),
                    key = %entry.key,
                    value = %truncate_for_display(entry.display_value()),
                    "config"
                );
            }
        }
    }
}

/// Keeps rendered reports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every report emitted so far.
    pub fn reports(&self) -> Vec<String> {
        match self.reports.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, report: &StartupReport) {
        let text = report.to_text();
        match self.reports.lock() {
            Ok(mut guard) => guard.push(text),
            Err(poisoned) => poisoned.into_inner().push(text),
        }
    }
}
