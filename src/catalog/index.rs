//! Indexed view of a license exception catalog.
//!
//! Lookups are case-insensitive against both the id and the full name of an
//! entry. The index is precomputed once; when two entries normalize to the
//! same key the entry declared first keeps it, which matches a linear scan
//! in declaration order.

use crate::catalog::{LicenseException, SPDX_EXCEPTIONS};
use crate::error::CatalogError;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
/// Fixed, ordered list of license exceptions plus a lookup index.
pub struct ExceptionCatalog {
    entries: Vec<LicenseException>,
    by_key: HashMap<String, usize>,
    ambiguous: BTreeMap<String, Vec<usize>>,
}

impl ExceptionCatalog {
    /// The SPDX exception list compiled into this crate.
    pub fn builtin() -> &'static ExceptionCatalog {
        builtin_cell()
    }

    /// Shared handle to the built-in catalog, for owners that also accept
    /// fixture catalogs.
    pub fn shared_builtin() -> Arc<ExceptionCatalog> {
        Arc::clone(builtin_cell())
    }

    /// Build a catalog from caller-provided entries.
    ///
    /// Rejects empty ids and ids that collide case-insensitively, since the
    /// later entry could never be resolved by its id. Colliding full names
    /// are accepted and reported through [`ExceptionCatalog::ambiguous_names`].
    pub fn new(entries: Vec<LicenseException>) -> Result<Self, CatalogError> {
        let mut ids: HashMap<String, &'static str> = HashMap::new();
        for (position, entry) in entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if let Some(first) = ids.insert(normalize(entry.id), entry.id) {
                return Err(CatalogError::DuplicateId {
                    first: first.to_string(),
                    second: entry.id.to_string(),
                });
            }
        }
        Ok(Self::build(entries))
    }

    fn build(entries: Vec<LicenseException>) -> Self {
        let (by_key, ambiguous) = build_index(&entries);
        for (key, positions) in &ambiguous {
            let ids: Vec<&str> = positions.iter().map(|&pos| entries[pos].id).collect();
            tracing::warn!(
                key = %key,
                ids = ?ids,
                "identifier matches several license exceptions; the first declared wins"
            );
        }
        Self {
            entries,
            by_key,
            ambiguous,
        }
    }

    /// Resolve an identifier to the first declared entry whose id or full
    /// name equals it, ignoring case.
    ///
    /// Returns `None` for unknown identifiers; no trimming, prefix, or fuzzy
    /// matching is applied.
    pub fn resolve(&self, identifier: &str) -> Option<&LicenseException> {
        self.by_key
            .get(&normalize(identifier))
            .map(|&position| &self.entries[position])
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[LicenseException] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LicenseException> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declaration position of the entry with the same id, if it belongs here.
    pub fn position(&self, entry: &LicenseException) -> Option<usize> {
        self.entries.iter().position(|candidate| candidate.id == entry.id)
    }

    /// Normalized keys shared by more than one entry, each with the ids of
    /// the entries that share it in declaration order.
    pub fn ambiguous_names(&self) -> impl Iterator<Item = (&str, Vec<&'static str>)> {
        self.ambiguous.iter().map(|(key, positions)| {
            let ids = positions.iter().map(|&pos| self.entries[pos].id).collect();
            (key.as_str(), ids)
        })
    }
}

fn builtin_cell() -> &'static Arc<ExceptionCatalog> {
    static BUILTIN: OnceLock<Arc<ExceptionCatalog>> = OnceLock::new();
    BUILTIN.get_or_init(|| Arc::new(ExceptionCatalog::build(SPDX_EXCEPTIONS.to_vec())))
}

fn normalize(identifier: &str) -> String {
    identifier.to_lowercase()
}

fn build_index(
    entries: &[LicenseException],
) -> (HashMap<String, usize>, BTreeMap<String, Vec<usize>>) {
    let mut by_key: HashMap<String, usize> = HashMap::new();
    let mut ambiguous: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for (position, entry) in entries.iter().enumerate() {
        let id_key = normalize(entry.id);
        let name_key = normalize(entry.full_name);
        let keys = if id_key == name_key {
            vec![id_key]
        } else {
            vec![id_key, name_key]
        };

        for key in keys {
            match by_key.get(&key) {
                Some(&owner) if owner != position => {
                    ambiguous
                        .entry(key)
                        .or_insert_with(|| vec![owner])
                        .push(position);
                }
                Some(_) => {}
                None => {
                    by_key.insert(key, position);
                }
            }
        }
    }

    (by_key, ambiguous)
}
