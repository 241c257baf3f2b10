//! Snapshot, entry and category types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::source::ConfigSource;
use crate::snapshot::keys::KNOWN_KEYS;

/// Literal shown for a key that was queried but has no value.
pub const NULL_VALUE: &str = "null";

/// A single queried key and its value, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Option<String>,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// The value, or `null` when unset.
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(NULL_VALUE)
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

/// Queried view of a service's resolved configuration.
///
/// Holds one entry per queried key. Keys that resolved to nothing are kept
/// with an absent value so they can be told apart from keys never queried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSnapshot {
    entries: BTreeMap<String, ConfigEntry>,
}

impl ConfigSnapshot {
    /// Pull every key in [`KNOWN_KEYS`] from `source`.
    pub fn load<S: ConfigSource + ?Sized>(source: &S) -> Self {
        Self::load_with(source, &[] as &[&str])
    }

    /// Pull [`KNOWN_KEYS`] plus `extra_keys`; repeated keys are queried once.
    pub fn load_with<S, K>(source: &S, extra_keys: &[K]) -> Self
    where
        S: ConfigSource + ?Sized,
        K: AsRef<str>,
    {
        let keys = KNOWN_KEYS
            .iter()
            .map(|key| -> &str { key })
            .chain(extra_keys.iter().map(|key| key.as_ref()));

        let mut entries: BTreeMap<String, ConfigEntry> = BTreeMap::new();
        for key in keys {
            if entries.contains_key(key) {
                continue;
            }
            entries.insert(key.to_string(), ConfigEntry::new(key, source.get(key)));
        }

        Self { entries }
    }

    pub fn from_entries<I: IntoIterator<Item = ConfigEntry>>(entries: I) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.key.clone(), e)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.get(key)
    }

    /// The value of `key`, if it was queried and is set.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|e| e.value.as_deref())
    }

    /// Entries in ascending key order.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose key starts with any of `prefixes`, as a named category.
    pub fn filter_by_prefix<P: AsRef<str>>(
        &self,
        name: impl Into<String>,
        prefixes: &[P],
    ) -> ConfigCategory {
        let entries = self
            .entries
            .iter()
            .filter(|(key, _)| prefixes.iter().any(|p| key.starts_with(p.as_ref())))
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();

        ConfigCategory {
            name: name.into(),
            prefixes: prefixes.iter().map(|p| p.as_ref().to_string()).collect(),
            entries,
        }
    }
}

/// Named, prefix-defined view over a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigCategory {
    name: String,
    prefixes: Vec<String>,
    entries: BTreeMap<String, ConfigEntry>,
}

impl ConfigCategory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn get(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.get(key)
    }

    /// Entries sorted ascending by key.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with a value.
    pub fn set_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_set()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::MapSource;
    use crate::snapshot::keys::*;

    fn user_source() -> MapSource {
        MapSource::new()
            .with(SERVER_PORT, "28081")
            .with(APPLICATION_NAME, "user-service")
            .with(DISCOVERY_SERVER_ADDR, "localhost:18848")
    }

    #[test]
    fn test_load_keeps_unset_keys() {
        let snapshot = ConfigSnapshot::load(&user_source());
        assert_eq!(snapshot.len(), KNOWN_KEYS.len());
        assert_eq!(snapshot.value(SERVER_PORT), Some("28081"));

        let unset = snapshot.get(REDIS_HOST).unwrap();
        assert!(!unset.is_set());
        assert_eq!(unset.display_value(), "null");
    }

    #[test]
    fn test_load_ignores_unknown_keys() {
        let source = user_source().with("spring.profiles.active", "dev");
        let snapshot = ConfigSnapshot::load(&source);
        assert!(snapshot.get("spring.profiles.active").is_none());
    }

    #[test]
    fn test_load_with_extra_keys() {
        let source = user_source().with("logging.level.com.cao.ecommerce.user.mapper", "debug");
        let extra = [mapper_logging_key("user"), SERVER_PORT.to_string()];
        let snapshot = ConfigSnapshot::load_with(&source, &extra);

        assert_eq!(snapshot.len(), KNOWN_KEYS.len() + 1);
        assert_eq!(
            snapshot.value("logging.level.com.cao.ecommerce.user.mapper"),
            Some("debug")
        );
    }

    #[test]
    fn test_load_from_empty_source() {
        let snapshot = ConfigSnapshot::load(&MapSource::new());
        assert_eq!(snapshot.len(), KNOWN_KEYS.len());
        assert!(snapshot.entries().all(|e| !e.is_set()));
    }

    #[test]
    fn test_filter_by_prefix_sorted_and_matching() {
        let snapshot = ConfigSnapshot::load(&user_source());
        let prefixes = ["spring.datasource", "spring.data"];
        let category = snapshot.filter_by_prefix("Datastore", &prefixes);

        assert_eq!(category.name(), "Datastore");
        assert_eq!(category.prefixes(), ["spring.datasource", "spring.data"]);
        let keys: Vec<&str> = category.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert!(keys.iter().all(|k| prefixes.iter().any(|p| k.starts_with(p))));
        // datasource (4) + redis (4), matched once even though both prefixes apply
        assert_eq!(category.len(), 8);
    }

    #[test]
    fn test_filter_by_prefix_exact_key() {
        let snapshot = ConfigSnapshot::load(&user_source());
        let base = snapshot.filter_by_prefix("Base", &[SERVER_PORT, APPLICATION_NAME]);

        assert_eq!(base.keys().collect::<Vec<_>>(), [SERVER_PORT, APPLICATION_NAME]);
        assert_eq!(base.set_count(), 2);
    }

    #[test]
    fn test_filter_by_prefix_no_match() {
        let snapshot = ConfigSnapshot::load(&user_source());
        let category = snapshot.filter_by_prefix("None", &["kafka"]);
        assert!(category.is_empty());
    }
}
