//! Registry configuration

use serde::Deserialize;

/// Environment variable overriding [`RegistryOptions::max_load_depth`]
pub const ENV_MAX_LOAD_DEPTH: &str = "MIBREG_MAX_LOAD_DEPTH";
/// Environment variable overriding [`RegistryOptions::warn_on_republish`]
pub const ENV_WARN_ON_REPUBLISH: &str = "MIBREG_WARN_ON_REPUBLISH";
/// Environment variable overriding [`RegistryOptions::preload`] (comma-separated)
pub const ENV_PRELOAD: &str = "MIBREG_PRELOAD";

/// Registry options
///
/// Deserializable so hosts can embed it in their own configuration files:
///
/// ```toml
/// max_load_depth = 32
/// preload = ["SNMPv2-SMI", "SNMPv2-TC"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Maximum nesting of on-demand module loads
    pub max_load_depth: usize,

    /// Log a warning when an already loaded module is published again
    pub warn_on_republish: bool,

    /// Modules loaded by [`SymbolRegistry::preload`](crate::SymbolRegistry::preload)
    pub preload: Vec<String>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            max_load_depth: 64,
            warn_on_republish: true,
            preload: Vec::new(),
        }
    }
}

impl RegistryOptions {
    /// Defaults overlaid with `MIBREG_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup` (keyed by the `ENV_*` names)
    ///
    /// Unparsable values are skipped with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_LOAD_DEPTH) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => self.max_load_depth = depth,
                _ => tracing::warn!(key = ENV_MAX_LOAD_DEPTH, value = %raw, "ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_WARN_ON_REPUBLISH) {
            match parse_bool(&raw) {
                Some(flag) => self.warn_on_republish = flag,
                None => {
                    tracing::warn!(key = ENV_WARN_ON_REPUBLISH, value = %raw, "ignoring invalid value")
                }
            }
        }

        if let Some(raw) = lookup(ENV_PRELOAD) {
            self.preload = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
        }

        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
