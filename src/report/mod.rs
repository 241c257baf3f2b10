//! Startup report subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigSnapshot
//!     → environment.rs (classify from discovery address)
//!     → categories.rs (name → prefixes table, in display order)
//!     → render.rs (StartupReport, text layout with truncation)
//!     → sink.rs (stdout, tracing, memory)
//! ```
//!
//! # Design Decisions
//! - The report is built once per process start and never stored
//! - Truncation is applied only to the text, never to report entries
//! - Output goes through an injected sink, not a global stream

pub mod categories;
pub mod environment;
pub mod render;
pub mod sink;

use std::sync::Arc;

pub use categories::{CategoryRule, CategoryTable};
pub use environment::{classify_environment, Environment};
pub use render::{truncate_for_display, StartupReport};
pub use sink::{MemorySink, ReportSink, TracingSink, WriterSink};

use crate::observability::metrics;
use crate::snapshot::ConfigSnapshot;

/// Renders snapshots with a fixed category table and emits them to a sink.
#[derive(Clone)]
pub struct StartupReporter {
    table: CategoryTable,
    sink: Arc<dyn ReportSink>,
}

impl StartupReporter {
    pub fn new(table: CategoryTable, sink: Arc<dyn ReportSink>) -> Self {
        Self { table, sink }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn classify_environment(&self, snapshot: &ConfigSnapshot) -> Environment {
        classify_environment(snapshot)
    }

    /// Build the report without emitting it.
    pub fn render(&self, service_name: &str, snapshot: &ConfigSnapshot) -> StartupReport {
        StartupReport::render(service_name, snapshot, &self.table)
    }

    /// Build the report and hand it to the sink.
    pub fn report(&self, service_name: &str, snapshot: &ConfigSnapshot) -> StartupReport {
        let report = self.render(service_name, snapshot);
        for category in report.categories() {
            metrics::record_report_entries(category.name(), category.set_count());
        }
        self.sink.emit(&report);
        report
    }
}

impl Default for StartupReporter {
    fn default() -> Self {
        Self::new(CategoryTable::default(), Arc::new(WriterSink::stdout()))
    }
}

impl std::fmt::Debug for StartupReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartupReporter")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
