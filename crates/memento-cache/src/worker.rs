//! Offline lifecycle: precache a fixed manifest, prune stale cache
//! generations, then answer requests cache-first with origin fallback.

use crate::error::{CacheError, Result};
use crate::origin::{Asset, Origin, normalize_path};
use crate::store::CacheStorage;

pub struct OfflineWorker<O> {
    storage: CacheStorage,
    cache_name: String,
    manifest: Vec<String>,
    /// `None` runs cache-only: hits are served, misses and installs fail.
    origin: Option<O>,
}

/// How a request was answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Served {
    Cache,
    Network,
}

impl<O: Origin> OfflineWorker<O> {
    pub fn new(
        storage: CacheStorage,
        cache_name: impl Into<String>,
        manifest: Vec<String>,
        origin: Option<O>,
    ) -> Self {
        Self {
            storage,
            cache_name: cache_name.into(),
            manifest,
            origin,
        }
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    pub fn origin(&self) -> Option<&O> {
        self.origin.as_ref()
    }

    /// Where misses go, for logs.
    pub fn describe_origin(&self) -> String {
        self.origin
            .as_ref()
            .map_or_else(|| "no origin".to_string(), Origin::describe)
    }

    fn require_origin(&self, request: &str) -> Result<&O> {
        self.origin.as_ref().ok_or_else(|| {
            CacheError::Origin(format!("no origin configured and {request} is not cached"))
        })
    }

    /// Fetch every manifest entry and store them in the current cache.
    /// All-or-nothing: one failed or non-2xx asset aborts the install and
    /// nothing is written. Returns the number of assets stored.
    pub async fn install(&self) -> Result<usize> {
        let Some(origin) = self.origin.as_ref() else {
            return Err(CacheError::Config(
                "no origin configured; pass --origin or set cache.origin".to_string(),
            ));
        };
        let mut assets = Vec::with_capacity(self.manifest.len());
        for request in &self.manifest {
            let asset = origin.fetch(request).await?;
            if !asset.is_ok() {
                return Err(CacheError::Origin(format!(
                    "{request} answered {} from {}",
                    asset.status,
                    origin.describe()
                )));
            }
            assets.push(asset);
        }
        self.storage.put_all(&self.cache_name, &assets)?;
        tracing::info!(
            "installed {} assets into {} from {}",
            assets.len(),
            self.cache_name,
            origin.describe()
        );
        Ok(assets.len())
    }

    /// Delete every cache generation except the current one. Needs no
    /// origin.
    pub fn activate(&self) -> Result<Vec<String>> {
        let deleted = self.storage.retain_only(&self.cache_name)?;
        for name in &deleted {
            tracing::info!("deleted stale cache {name}");
        }
        Ok(deleted)
    }

    /// Cache-first lookup. On a miss, ask the origin; successful same-origin
    /// answers are stored for next time. Storage failures are logged and
    /// ignored; origin failures (or a miss with no origin) are returned.
    pub async fn fetch(&self, request: &str) -> Result<(Asset, Served)> {
        let path = normalize_path(request);
        match self.lookup(&path) {
            Ok(Some(hit)) => {
                tracing::debug!("cache hit {path}");
                return Ok((hit, Served::Cache));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("cache lookup for {path} failed: {e}"),
        }

        let origin = self.require_origin(&path)?;
        let asset = origin.fetch(request).await?;
        if asset.is_ok() && origin.is_same_origin(request) {
            if let Err(e) = self.storage.put(&self.cache_name, &asset) {
                tracing::warn!("failed to cache {path}: {e}");
            }
        }
        Ok((asset, Served::Network))
    }

    /// Current generation first, then any other cache still around.
    fn lookup(&self, path: &str) -> Result<Option<Asset>> {
        match self.storage.match_in(&self.cache_name, path)? {
            Some(hit) => Ok(Some(hit)),
            None => self.storage.match_any(path),
        }
    }
}
