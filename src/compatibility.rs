//! License compatibility mapping for license exceptions.
//!
//! The mapping resource is a JSON object whose keys name license exceptions
//! and whose values list the licenses each exception may be appended to:
//!
//! ```json
//! { "LLVM-exception": ["Apache-2.0"], "Classpath-exception-2.0": ["GPL-2.0-only"] }
//! ```
//!
//! Keys are resolved through the catalog the same way free-form identifiers
//! are (id or full name, ignoring case), so every key must name a catalog
//! entry. License lists keep their document order.

use crate::catalog::{ExceptionCatalog, LicenseException};
use crate::error::{LoadError, MappingParseError};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Parsed compatibility mapping keyed by exception id.
pub struct CompatibilityMap {
    by_id: BTreeMap<&'static str, Vec<String>>,
    // Mapped ids in catalog declaration order.
    order: Vec<&'static str>,
}

impl CompatibilityMap {
    /// Parse and validate a mapping document against `catalog`.
    pub fn parse(
        catalog: &ExceptionCatalog,
        resource: &str,
        content: &str,
    ) -> Result<Self, LoadError> {
        parse_mapping(catalog, content).map_err(|source| LoadError::MappingParse {
            resource: resource.to_string(),
            source,
        })
    }

    /// Licenses `entry` may be combined with; empty when the mapping has no
    /// record for it.
    pub fn licenses_for(&self, entry: &LicenseException) -> &[String] {
        self.by_id.get(entry.id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, entry: &LicenseException) -> bool {
        self.by_id.contains_key(entry.id)
    }

    /// Mapped exception ids with their licenses, in catalog order.
    pub fn exceptions(&self) -> impl Iterator<Item = (&'static str, &[String])> + '_ {
        self.order
            .iter()
            .map(|id| (*id, self.by_id.get(id).map(Vec::as_slice).unwrap_or(&[])))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn parse_mapping(
    catalog: &ExceptionCatalog,
    content: &str,
) -> Result<CompatibilityMap, MappingParseError> {
    let raw: RawMapping =
        serde_json::from_str(content).map_err(|err| MappingParseError::Syntax(err.to_string()))?;

    // Keys exactly as written, per resolved id, to report duplicates.
    let mut seen: BTreeMap<&'static str, String> = BTreeMap::new();
    let mut by_id: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();

    for (key, licenses) in raw.0 {
        let entry = catalog
            .resolve(&key)
            .ok_or_else(|| MappingParseError::UnknownException(key.clone()))?;
        if let Some(first) = seen.get(entry.id) {
            return Err(MappingParseError::DuplicateException {
                id: entry.id.to_string(),
                first: first.clone(),
                second: key,
            });
        }
        for license in &licenses {
            if !is_valid_license_id(license) {
                return Err(MappingParseError::InvalidLicenseId {
                    exception: entry.id.to_string(),
                    license: license.clone(),
                });
            }
        }
        seen.insert(entry.id, key);
        by_id.insert(entry.id, licenses);
    }

    let order = catalog
        .iter()
        .map(|entry| entry.id)
        .filter(|id| by_id.contains_key(id))
        .collect();

    Ok(CompatibilityMap { by_id, order })
}

/// Top-level mapping members in document order, repeated keys included.
struct RawMapping(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for RawMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawMappingVisitor)
    }
}

struct RawMappingVisitor;

impl<'de> Visitor<'de> for RawMappingVisitor {
    type Value = RawMapping;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping license exceptions to license id arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(member) = map.next_entry::<String, Vec<String>>()? {
            members.push(member);
        }
        Ok(RawMapping(members))
    }
}

/// SPDX short identifier syntax: letters, digits, `.` and `-`, optionally
/// followed by a single `+` ("or later").
fn is_valid_license_id(license: &str) -> bool {
    let base = license.strip_suffix('+').unwrap_or(license);
    !base.is_empty()
        && base
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
}
