//! SPDX license exception catalog.
//!
//! The crate answers three questions for a license scanner:
//!
//! 1. Which SPDX license exception does a free-form identifier name?
//!    [`resolve`] matches ids and full names case-insensitively.
//! 2. Which licenses may that exception be appended to?
//!    [`compatible_licenses`] reads the bundled compatibility mapping.
//! 3. What does the exception say? [`exception_text`] reads the bundled
//!    legal text.
//!
//! The catalog itself is compiled in. The mapping and the texts are bundled
//! files read through a [`ResourceReader`], each loaded at most once per
//! process and only when first asked for. [`ExceptionRegistry`] bundles a
//! catalog, a reader, and both caches; the free functions here use the
//! process-wide [`ExceptionRegistry::bundled`] instance.

pub mod catalog;
pub mod cell;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod registry;
pub mod resources;
pub mod scan_error;

pub use catalog::{ExceptionCatalog, LicenseException, SPDX_EXCEPTIONS};
pub use cell::{CellState, KeyedCells, LoadCell};
pub use compatibility::CompatibilityMap;
pub use config::{RESOURCES_ENV, bundled_resource_root, resource_root};
pub use error::{CatalogError, LoadError, MappingParseError};
pub use registry::ExceptionRegistry;
pub use resources::{
    DirectoryResources, MAPPING_RESOURCE, MemoryResources, ResourceReader, TEXT_DIR,
    text_resource_name,
};
pub use scan_error::ScanError;

use std::sync::Arc;

/// Resolve a free-form identifier against the built-in catalog.
///
/// Matches the id or the full name of an entry, ignoring case; the first
/// declared entry wins. Unknown identifiers yield `None`.
pub fn resolve(identifier: &str) -> Option<&'static LicenseException> {
    ExceptionCatalog::builtin().resolve(identifier)
}

/// Licenses `entry` may be appended to, per the bundled mapping.
pub fn compatible_licenses(entry: &LicenseException) -> Result<Vec<String>, LoadError> {
    ExceptionRegistry::bundled().compatible_licenses(entry)
}

/// The bundled legal text of `entry`.
pub fn exception_text(entry: &LicenseException) -> Result<Arc<str>, LoadError> {
    ExceptionRegistry::bundled().text(entry)
}
