//! Failures surfaced by the catalog and its resource loaders.
//!
//! An unrecognized identifier is not an error anywhere in this crate; it is
//! an absent lookup result. The enums here only cover bundled data that is
//! missing, unreadable, or inconsistent with the catalog. `LoadError` is
//! `Clone` because one failed load is reported to every caller that waited
//! on it.

use thiserror::Error;

/// Failure to load a bundled resource (mapping document or legal text).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The named resource does not exist under the resource root.
    #[error("bundled resource '{name}' not found")]
    ResourceNotFound { name: String },

    /// The resource exists but could not be read as UTF-8 text.
    #[error("bundled resource '{name}' could not be read: {reason}")]
    ResourceUnreadable { name: String, reason: String },

    /// The mapping resource was read but does not describe a valid mapping.
    #[error("malformed exception mapping '{resource}': {source}")]
    MappingParse {
        resource: String,
        #[source]
        source: MappingParseError,
    },
}

impl LoadError {
    pub fn not_found(name: impl Into<String>) -> Self {
        LoadError::ResourceNotFound { name: name.into() }
    }

    /// Name of the resource the failure refers to.
    pub fn resource(&self) -> &str {
        match self {
            LoadError::ResourceNotFound { name } | LoadError::ResourceUnreadable { name, .. } => {
                name
            }
            LoadError::MappingParse { resource, .. } => resource,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::ResourceNotFound { .. })
    }
}

/// Why a compatibility mapping document was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MappingParseError {
    #[error("invalid document: {0}")]
    Syntax(String),

    #[error("unknown license exception '{0}'")]
    UnknownException(String),

    #[error("license exception '{id}' is listed more than once (as '{first}' and '{second}')")]
    DuplicateException {
        id: String,
        first: String,
        second: String,
    },

    #[error("license exception '{exception}' lists invalid license identifier '{license}'")]
    InvalidLicenseId { exception: String, license: String },
}

/// Rejected fixture catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog entry at position {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate license exception id '{second}' (conflicts with '{first}')")]
    DuplicateId { first: String, second: String },
}
