//! Configuration of the worker pool used by a [`PGViewCache`](crate::PGViewCache).

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for the parallel builds performed by a view cache.
///
/// With the default (`num_threads: None`) builds run on rayon's global pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewCacheConfig {
    /// Size of a dedicated worker pool; `None` uses the global pool.
    pub num_threads: Option<usize>,
    /// Name prefix of the dedicated pool's threads.
    pub thread_name_prefix: String,
}

impl Default for ViewCacheConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "pgtopo-worker".to_owned(),
        }
    }
}

impl ViewCacheConfig {
    /// Uses a dedicated pool of `threads` workers.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`TopologyError::Config`](crate::TopologyError::Config) when
    /// the document is not valid JSON or has fields of the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the dedicated pool, if one is configured.
    pub(crate) fn build_pool(&self) -> Result<Option<ThreadPool>> {
        let Some(threads) = self.num_threads else {
            return Ok(None);
        };
        let prefix = self.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()?;
        Ok(Some(pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let cfg = ViewCacheConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ViewCacheConfig::default());
        assert!(cfg.build_pool().unwrap().is_none());
    }

    #[test]
    fn test_dedicated_pool_has_requested_size() {
        let cfg = ViewCacheConfig::from_json_str(r#"{ "num_threads": 3 }"#).unwrap();
        assert_eq!(cfg.num_threads, Some(3));
        let pool = cfg.build_pool().unwrap().unwrap();
        assert_eq!(pool.current_num_threads(), 3);
    }

    #[test]
    fn test_wrong_field_type_is_an_error() {
        assert!(ViewCacheConfig::from_json_str(r#"{ "num_threads": "many" }"#).is_err());
    }
}
