//! Key/value configuration sources.
//!
//! # Responsibilities
//! - Answer `key -> Option<String>` lookups for dot-delimited keys
//! - Flatten the `[properties]` table of a config file into dotted keys
//! - Map keys onto environment variables using relaxed binding
//! - Layer several sources with first-hit-wins precedence
//!
//! # Design Decisions
//! - Sources are read-only; nothing in the bootstrap ever writes back
//! - Environment variables are captured once at construction so lookups
//!   are pure and repeatable

use std::collections::BTreeMap;
use std::sync::Arc;

/// A read-only `key -> value` lookup.
pub trait ConfigSource: Send + Sync {
    /// Resolve a dot-delimited key. `None` means the key is unset.
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// In-memory source backed by a sorted map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    values: BTreeMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Source built from a nested TOML table, flattened into dotted keys.
///
/// ```toml
/// [properties.spring.cloud.nacos.discovery]
/// server-addr = "localhost:18848"
/// ```
///
/// resolves `spring.cloud.nacos.discovery.server-addr`. Arrays of scalars are
/// joined with `,`; arrays containing tables are indexed as `key[0].field`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesSource {
    inner: MapSource,
}

impl PropertiesSource {
    pub fn from_table(table: &toml::Table) -> Self {
        let mut inner = MapSource::new();
        for (key, value) in table {
            flatten_into(&mut inner, key.clone(), value);
        }
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ConfigSource for PropertiesSource {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }
}

fn flatten_into(out: &mut MapSource, prefix: String, value: &toml::Value) {
    match value {
        toml::Value::Table(table) => {
            for (key, nested) in table {
                flatten_into(out, format!("{prefix}.{key}"), nested);
            }
        }
        toml::Value::Array(items) => {
            if items.iter().all(is_scalar) {
                let joined = items
                    .iter()
                    .filter_map(scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                out.insert(prefix, joined);
            } else {
                for (i, item) in items.iter().enumerate() {
                    flatten_into(out, format!("{prefix}[{i}]"), item);
                }
            }
        }
        scalar => {
            if let Some(s) = scalar_to_string(scalar) {
                out.insert(prefix, s);
            }
        }
    }
}

fn is_scalar(value: &toml::Value) -> bool {
    !matches!(value, toml::Value::Table(_) | toml::Value::Array(_))
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

/// Environment-variable source using relaxed binding.
///
/// `spring.cloud.nacos.discovery.server-addr` is looked up as
/// `SPRING_CLOUD_NACOS_DISCOVERY_SERVERADDR`: dots become underscores,
/// dashes are dropped, everything is upper-cased.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: BTreeMap<String, String>,
}

impl EnvSource {
    /// Capture the current process environment. Non-UTF-8 variables are
    /// skipped.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Relaxed-binding variable name for a dotted key.
pub fn env_var_name(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-')
        .map(|c| match c {
            '.' | '[' | ']' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect::<String>()
        .replace("__", "_")
        .trim_end_matches('_')
        .to_string()
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(&env_var_name(key)).cloned()
    }
}

/// Ordered stack of sources; the first layer that knows a key wins.
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn ConfigSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower precedence than every existing one.
    pub fn with_layer(mut self, source: impl ConfigSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl ConfigSource for LayeredSource {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}

impl std::fmt::Debug for LayeredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSource")
            .field("layers", &self.layers.len())
            .finish()
    }
}
