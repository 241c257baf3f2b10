//! Startup report construction and text layout.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::report::categories::CategoryTable;
use crate::report::environment::{classify_environment, Environment};
use crate::snapshot::{ConfigCategory, ConfigSnapshot};

/// Longest value shown unmodified in the text report.
pub const MAX_DISPLAY_WIDTH: usize = 80;

const ELLIPSIS: &str = "...";
const RULE_WIDTH: usize = 80;
const CATEGORY_RULE_WIDTH: usize = 40;

/// Shorten `value` to at most [`MAX_DISPLAY_WIDTH`] characters for display.
///
/// Longer values keep their first 77 characters followed by `...`.
/// Counts characters, not bytes.
pub fn truncate_for_display(value: &str) -> Cow<'_, str> {
    if value.chars().count() <= MAX_DISPLAY_WIDTH {
        return Cow::Borrowed(value);
    }
    let keep = MAX_DISPLAY_WIDTH - ELLIPSIS.len();
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

/// Categorized view of a service's configuration at startup.
#[derive(Debug, Clone, Serialize)]
pub struct StartupReport {
    service_name: String,
    generated_at: DateTime<Local>,
    environment: Environment,
    categories: Vec<ConfigCategory>,
}

impl StartupReport {
    /// Build a report with one category per rule, in table order.
    pub fn render(service_name: &str, snapshot: &ConfigSnapshot, table: &CategoryTable) -> Self {
        let categories = table
            .iter()
            .map(|rule| snapshot.filter_by_prefix(rule.name.clone(), rule.prefixes.as_slice()))
            .collect();

        Self {
            service_name: service_name.to_string(),
            generated_at: Local::now(),
            environment: classify_environment(snapshot),
            categories,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn categories(&self) -> &[ConfigCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&ConfigCategory> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Operator-facing text. Empty categories are skipped and long values
    /// are truncated; the stored entries are left as they are.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StartupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "{} startup configuration", self.service_name)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "environment: {}", self.environment)?;
        writeln!(f, "started at: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;

        for category in self.categories.iter().filter(|c| !c.is_empty()) {
            writeln!(f)?;
            writeln!(f, "[{}]", category.name())?;
            writeln!(f, "{}", "-".repeat(CATEGORY_RULE_WIDTH))?;
            for entry in category.entries() {
                writeln!(
                    f,
                    "  {}: {}",
                    entry.key,
                    truncate_for_display(entry.display_value())
                )?;
            }
        }

        writeln!(f, "{rule}")?;
        writeln!(f, "{} configuration loaded", self.service_name)?;
        writeln!(f, "{rule}")
    }
}
