//! Read-by-name access to bundled resources.
//!
//! Loaders never touch the filesystem directly; they go through a
//! [`ResourceReader`] so tests can substitute in-memory or instrumented
//! readers. Resource names are `/`-separated paths relative to a resource
//! root, for example `exception-mapping.json` or `exceptions/LLVM-exception`.

use crate::catalog::LicenseException;
use crate::error::LoadError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Name of the compatibility mapping resource.
pub const MAPPING_RESOURCE: &str = "exception-mapping.json";

/// Directory holding one legal text per catalog entry.
pub const TEXT_DIR: &str = "exceptions";

/// Resource name of the legal text for `entry`.
pub fn text_resource_name(entry: &LicenseException) -> String {
    format!("{TEXT_DIR}/{}", entry.id)
}

/// Source of bundled resource contents.
pub trait ResourceReader: Send + Sync {
    /// Read the named resource as text.
    ///
    /// Implementations report an absent resource as
    /// [`LoadError::ResourceNotFound`].
    fn read(&self, name: &str) -> Result<String, LoadError>;
}

impl<R: ResourceReader + ?Sized> ResourceReader for std::sync::Arc<R> {
    fn read(&self, name: &str) -> Result<String, LoadError> {
        (**self).read(name)
    }
}

impl<R: ResourceReader + ?Sized> ResourceReader for Box<R> {
    fn read(&self, name: &str) -> Result<String, LoadError> {
        (**self).read(name)
    }
}

#[derive(Clone, Debug)]
/// Resources stored as files under a root directory.
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the named resource, or `None` if the name would escape the root.
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let contained = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        contained.then(|| self.root.join(relative))
    }
}

impl ResourceReader for DirectoryResources {
    fn read(&self, name: &str) -> Result<String, LoadError> {
        let Some(path) = self.path_of(name) else {
            return Err(LoadError::not_found(name));
        };
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(LoadError::not_found(name)),
            Err(err) => Err(LoadError::ResourceUnreadable {
                name: name.to_string(),
                reason: format!("{}: {err}", path.display()),
            }),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Resources held in memory, keyed by name.
pub struct MemoryResources {
    entries: BTreeMap<String, String>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(name.into(), content.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl ResourceReader for MemoryResources {
    fn read(&self, name: &str) -> Result<String, LoadError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::not_found(name))
    }
}
