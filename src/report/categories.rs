//! Category membership table.
//!
//! Membership is data: each rule names a category and the key prefixes that
//! place an entry in it. The default table can be replaced wholesale from the
//! `[[report.categories]]` array of the config file.

use serde::{Deserialize, Serialize};

use crate::snapshot::keys::{APPLICATION_NAME, SERVER_PORT};

/// A category name and the prefixes that select its entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryRule {
    pub name: String,
    pub prefixes: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, P>(name: impl Into<String>, prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered list of category rules; report order follows table order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CategoryTable(Vec<CategoryRule>);

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self(rules)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CategoryRule> {
        self.0.iter().find(|rule| rule.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategoryTable {
    /// Base, Discovery, Datastore, Cache, ORM-mapping, Logging, Management.
    fn default() -> Self {
        Self(vec![
            CategoryRule::new("Base", [SERVER_PORT, APPLICATION_NAME]),
            CategoryRule::new("Discovery", ["spring.cloud.nacos"]),
            CategoryRule::new("Datastore", ["spring.datasource", "spring.data"]),
            CategoryRule::new("Cache", ["spring.data.redis"]),
            CategoryRule::new("ORM-mapping", ["mybatis-plus"]),
            CategoryRule::new("Logging", ["logging"]),
            CategoryRule::new("Management", ["management"]),
        ])
    }
}
