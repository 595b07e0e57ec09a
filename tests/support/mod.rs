#![allow(dead_code)]

use spdx_exceptions::{
    ExceptionCatalog, LicenseException, LoadError, MAPPING_RESOURCE, MemoryResources,
    ResourceReader,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

pub const A: LicenseException = LicenseException::new("A-exception", "Alpha Exception");
pub const B: LicenseException = LicenseException::deprecated("B-exception", "Beta Exception");
pub const C: LicenseException = LicenseException::new("C-exception", "Gamma Exception");

pub const FIXTURE_MAPPING: &str = r#"{"A-exception": ["X-1.0"], "C-exception": []}"#;
pub const A_TEXT: &str = "  Alpha grants extra permission.\r\n\tKeep whitespace.\n";
pub const C_TEXT: &str = "Gamma text";

pub fn fixture_catalog() -> ExceptionCatalog {
    ExceptionCatalog::new(vec![A, B, C]).expect("fixture catalog")
}

/// Mapping plus texts for A and C; B's text is deliberately withheld.
pub fn fixture_resources() -> MemoryResources {
    MemoryResources::new()
        .with(MAPPING_RESOURCE, FIXTURE_MAPPING)
        .with("exceptions/A-exception", A_TEXT)
        .with("exceptions/C-exception", C_TEXT)
}

/// Reader that counts reads per resource name and can be edited while in use.
#[derive(Clone, Default)]
pub struct CountingReader {
    inner: Arc<Mutex<MemoryResources>>,
    reads: Arc<Mutex<BTreeMap<String, usize>>>,
    total: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl CountingReader {
    pub fn new(resources: MemoryResources) -> Self {
        Self {
            inner: Arc::new(Mutex::new(resources)),
            ..Self::default()
        }
    }

    /// Sleep inside every read, widening the window for concurrent callers.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn reads_of(&self, name: &str) -> usize {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn insert(&self, name: &str, content: &str) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, content);
    }

    pub fn remove(&self, name: &str) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }
}

impl ResourceReader for CountingReader {
    fn read(&self, name: &str) -> Result<String, LoadError> {
        *self
            .reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_default() += 1;
        self.total.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read(name)
    }
}
