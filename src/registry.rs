//! Catalog plus lazily loaded resources.
//!
//! An [`ExceptionRegistry`] pairs a catalog with a [`ResourceReader`] and
//! owns two independent caches: the compatibility mapping (one slot for the
//! whole registry) and the legal texts (one slot per exception id). Neither
//! cache is touched until first use, and failed loads are retried on the
//! next call.

use crate::catalog::{ExceptionCatalog, LicenseException};
use crate::cell::{KeyedCells, LoadCell};
use crate::compatibility::CompatibilityMap;
use crate::config::resource_root;
use crate::error::LoadError;
use crate::resources::{
    DirectoryResources, MAPPING_RESOURCE, ResourceReader, text_resource_name,
};
use std::sync::{Arc, OnceLock};

pub struct ExceptionRegistry {
    catalog: Arc<ExceptionCatalog>,
    reader: Box<dyn ResourceReader>,
    mapping: LoadCell<Arc<CompatibilityMap>, LoadError>,
    texts: KeyedCells<String, Arc<str>, LoadError>,
}

impl std::fmt::Debug for ExceptionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionRegistry")
            .field("entries", &self.catalog.len())
            .field("mapping", &self.mapping.state())
            .field("texts_loaded", &self.texts.populated())
            .finish()
    }
}

impl ExceptionRegistry {
    pub fn new(
        catalog: impl Into<Arc<ExceptionCatalog>>,
        reader: impl ResourceReader + 'static,
    ) -> Self {
        Self {
            catalog: catalog.into(),
            reader: Box::new(reader),
            mapping: LoadCell::new(),
            texts: KeyedCells::new(),
        }
    }

    /// Process-wide registry over the built-in catalog and the bundled
    /// resource directory.
    pub fn bundled() -> &'static ExceptionRegistry {
        static BUNDLED: OnceLock<ExceptionRegistry> = OnceLock::new();
        BUNDLED.get_or_init(|| {
            let root = resource_root();
            tracing::debug!(root = %root.display(), "using bundled license exception resources");
            ExceptionRegistry::with_builtin(DirectoryResources::new(root))
        })
    }

    /// Registry over the built-in catalog with a caller-provided reader.
    pub fn with_builtin(reader: impl ResourceReader + 'static) -> Self {
        Self::new(ExceptionCatalog::shared_builtin(), reader)
    }

    pub fn catalog(&self) -> &ExceptionCatalog {
        &self.catalog
    }

    pub fn resolve(&self, identifier: &str) -> Option<&LicenseException> {
        self.catalog.resolve(identifier)
    }

    /// The full mapping, loading and validating it on first use.
    pub fn compatibility_map(&self) -> Result<Arc<CompatibilityMap>, LoadError> {
        self.mapping.get_or_try_load(|| {
            tracing::debug!(resource = MAPPING_RESOURCE, "loading exception compatibility mapping");
            let loaded = self.reader.read(MAPPING_RESOURCE).and_then(|content| {
                CompatibilityMap::parse(&self.catalog, MAPPING_RESOURCE, &content)
            });
            match &loaded {
                Ok(map) => tracing::debug!(
                    resource = MAPPING_RESOURCE,
                    exceptions = map.len(),
                    "loaded exception compatibility mapping"
                ),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load exception compatibility mapping")
                }
            }
            loaded.map(Arc::new)
        })
    }

    /// Licenses `entry` may be appended to. An entry absent from the mapping
    /// has none.
    pub fn compatible_licenses(
        &self,
        entry: &LicenseException,
    ) -> Result<Vec<String>, LoadError> {
        Ok(self.compatibility_map()?.licenses_for(entry).to_vec())
    }

    /// The raw legal text of `entry`, loaded on first use and cached for the
    /// life of the registry.
    pub fn text(&self, entry: &LicenseException) -> Result<Arc<str>, LoadError> {
        let name = text_resource_name(entry);
        self.texts.get_or_try_load(entry.id.to_string(), || {
            tracing::debug!(resource = %name, "loading license exception text");
            match self.reader.read(&name) {
                Ok(text) => {
                    tracing::debug!(
                        resource = %name,
                        bytes = text.len(),
                        "loaded license exception text"
                    );
                    Ok(Arc::from(text))
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load license exception text");
                    Err(err)
                }
            }
        })
    }
}
