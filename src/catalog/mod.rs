//! License exception catalog wiring.
//!
//! The catalog is the fixed SPDX exception list compiled into the crate
//! (`model::SPDX_EXCEPTIONS`). Callers use `ExceptionCatalog::builtin()` for
//! lookups; fixture catalogs for tests are built with `ExceptionCatalog::new`.

pub mod index;
pub mod model;

pub use index::ExceptionCatalog;
pub use model::{LicenseException, SPDX_EXCEPTIONS};
