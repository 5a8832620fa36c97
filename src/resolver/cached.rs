//! Cached resolver.
//!
//! Memoizes `find` results by normalized postal code. Misses are cached
//! too; IO errors are not.

use quick_cache::sync::Cache;
use std::path::Path;

use super::{normalize_code, Listing, Resolver};
use crate::record::ResolvedCity;
use crate::{ResolverConfig, Result};

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Configuration for the cached resolver.
#[derive(Debug, Clone)]
pub struct CachedResolverConfig {
    /// Maximum number of entries in the cache.
    pub cache_capacity: usize,
    /// Whether to enable caching.
    pub cache_enabled: bool,
}

impl Default for CachedResolverConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_enabled: true,
        }
    }
}

impl CachedResolverConfig {
    /// Create a new configuration with the specified cache capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache_capacity: capacity,
            cache_enabled: true,
        }
    }

    /// Create a configuration with caching disabled.
    pub fn no_cache() -> Self {
        Self {
            cache_capacity: 0,
            cache_enabled: false,
        }
    }
}

/// Resolver with a bounded lookup cache.
///
/// Results are identical to the wrapped [`Resolver`]; the cache only saves
/// the index search and record parse for repeated codes, which is useful
/// for large batches with many repeats.
///
/// # Example
///
/// ```ignore
/// use brcep::{CachedResolver, Resolver};
/// use std::path::Path;
///
/// let resolver = Resolver::open(Path::new("cities.csv"), Path::new("cities.idx"))?;
/// let mut cached = CachedResolver::new(resolver);
///
/// for code in codes {
///     let city = cached.find(code)?;
/// }
/// ```
pub struct CachedResolver {
    inner: Resolver,
    cache: Option<Cache<u32, Option<ResolvedCity>>>,
    config: CachedResolverConfig,
}

impl CachedResolver {
    /// Wrap a resolver with default cache configuration.
    pub fn new(inner: Resolver) -> Self {
        Self::with_config(inner, CachedResolverConfig::default())
    }

    /// Wrap a resolver with custom cache configuration.
    pub fn with_config(inner: Resolver, config: CachedResolverConfig) -> Self {
        let cache = if config.cache_enabled && config.cache_capacity > 0 {
            Some(Cache::new(config.cache_capacity))
        } else {
            None
        };

        Self {
            inner,
            cache,
            config,
        }
    }

    /// Open a data file and its range index with a default cache.
    pub fn open(data_path: &Path, index_path: &Path, config: ResolverConfig) -> Result<Self> {
        let inner = Resolver::open_with_config(data_path, index_path, config)?;
        Ok(Self::new(inner))
    }

    /// Resolve a raw postal code with caching.
    pub fn find(&mut self, raw_code: &str) -> Result<Option<ResolvedCity>> {
        match normalize_code(raw_code) {
            Some(code) => self.find_code(code),
            None => Ok(None),
        }
    }

    /// Resolve a numeric postal code with caching.
    pub fn find_code(&mut self, code: u32) -> Result<Option<ResolvedCity>> {
        // Check cache first
        if let Some(ref cache) = self.cache {
            if let Some(result) = cache.get(&code) {
                return Ok(result);
            }
        }

        // Cache miss - perform lookup
        let result = self.inner.find_code(code)?;

        if let Some(ref cache) = self.cache {
            cache.insert(code, result.clone());
        }

        Ok(result)
    }

    /// Read every record. Listings bypass the cache.
    pub fn list(&mut self) -> Result<Listing> {
        self.inner.list()
    }

    /// Clear the cache.
    pub fn clear_cache(&self) {
        if let Some(ref cache) = self.cache {
            cache.clear();
        }
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        match self.cache {
            Some(ref cache) => CacheStats {
                capacity: self.config.cache_capacity,
                len: cache.len(),
                enabled: true,
            },
            None => CacheStats {
                capacity: 0,
                len: 0,
                enabled: false,
            },
        }
    }

    /// Unwrap the underlying resolver, dropping the cache.
    pub fn into_inner(self) -> Resolver {
        self.inner
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Maximum cache capacity.
    pub capacity: usize,
    /// Current number of entries in the cache.
    pub len: usize,
    /// Whether caching is enabled.
    pub enabled: bool,
}
