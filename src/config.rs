//! Locating the bundled resource directory.
//!
//! Resolution order: the `SPDX_EXCEPTIONS_RESOURCES` environment variable,
//! the build-time `SPDX_EXCEPTIONS_RESOURCES_HINT` baked in by `build.rs`,
//! then the `resources/` directory shipped next to this crate's manifest. A
//! candidate only counts when it contains the mapping resource; the last
//! fallback is returned even when it is missing, in which case loads report
//! `ResourceNotFound`.

use crate::resources::MAPPING_RESOURCE;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a resource directory to use instead of the
/// bundled one.
pub const RESOURCES_ENV: &str = "SPDX_EXCEPTIONS_RESOURCES";

const BUNDLED_RESOURCES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");

/// The resource root bundled with this build.
pub fn bundled_resource_root() -> PathBuf {
    PathBuf::from(BUNDLED_RESOURCES)
}

/// The directory the process-wide registry reads resources from.
pub fn resource_root() -> PathBuf {
    resolve_resource_root(env::var(RESOURCES_ENV).ok().as_deref())
}

/// Pick the resource root given an optional override value.
pub fn resolve_resource_root(override_value: Option<&str>) -> PathBuf {
    if let Some(root) = override_value.and_then(root_from_hint) {
        return root;
    }

    if let Some(root) = option_env!("SPDX_EXCEPTIONS_RESOURCES_HINT").and_then(root_from_hint) {
        return root;
    }

    bundled_resource_root()
}

/// Whether `candidate` looks like a resource root.
pub fn is_resource_root(candidate: &Path) -> bool {
    candidate.join(MAPPING_RESOURCE).is_file()
}

fn root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !is_resource_root(&hint_path) {
        tracing::debug!(hint = %hint, "ignoring resource root without {MAPPING_RESOURCE}");
        return None;
    }
    fs::canonicalize(&hint_path).ok().or(Some(hint_path))
}
