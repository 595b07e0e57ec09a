// The resources shipped with the crate agree with the built-in catalog.
use anyhow::{Context, Result};
use spdx_exceptions::{
    CompatibilityMap, DirectoryResources, ExceptionCatalog, ExceptionRegistry, LicenseException,
    MAPPING_RESOURCE, SPDX_EXCEPTIONS, TEXT_DIR, bundled_resource_root, resolve,
};
use std::fs;

fn bundled_registry() -> ExceptionRegistry {
    ExceptionRegistry::with_builtin(DirectoryResources::new(bundled_resource_root()))
}

fn entry(id: &str) -> Result<&'static LicenseException> {
    resolve(id).with_context(|| format!("{id} missing from the catalog"))
}

#[test]
fn bundled_mapping_parses_against_the_builtin_catalog() -> Result<()> {
    let path = bundled_resource_root().join(MAPPING_RESOURCE);
    let content = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let map = CompatibilityMap::parse(ExceptionCatalog::builtin(), MAPPING_RESOURCE, &content)?;
    assert!(!map.is_empty());

    let catalog = ExceptionCatalog::builtin();
    let positions: Vec<_> = map
        .exceptions()
        .map(|(id, _)| catalog.resolve(id).and_then(|entry| catalog.position(entry)))
        .collect();
    assert!(positions.iter().all(Option::is_some));
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    Ok(())
}

#[test]
fn well_known_compatibilities() -> Result<()> {
    let registry = bundled_registry();
    assert_eq!(
        registry.compatible_licenses(entry("LLVM-exception")?)?,
        vec!["Apache-2.0".to_string()]
    );
    assert_eq!(
        registry.compatible_licenses(entry("Linux-syscall-note")?)?,
        vec!["GPL-2.0-only".to_string()]
    );
    assert!(
        registry
            .compatible_licenses(entry("Classpath exception 2.0")?)?
            .contains(&"GPL-2.0-only".to_string())
    );
    Ok(())
}

#[test]
fn unmapped_exception_has_no_compatible_licenses() -> Result<()> {
    let registry = bundled_registry();
    let universal = entry("Universal-FOSS-exception-1.0")?;
    assert!(!registry.compatibility_map()?.contains(universal));
    assert!(registry.compatible_licenses(universal)?.is_empty());
    Ok(())
}

#[test]
fn llvm_text_is_shipped() -> Result<()> {
    let text = bundled_registry().text(entry("llvm-exception")?)?;
    assert!(text.starts_with("---- LLVM Exceptions to the Apache 2.0 License ----"));
    Ok(())
}

#[test]
fn every_shipped_text_names_a_catalog_id() -> Result<()> {
    let dir = bundled_resource_root().join(TEXT_DIR);
    let mut shipped = 0;
    for item in fs::read_dir(&dir).with_context(|| format!("listing {}", dir.display()))? {
        let name = item?.file_name().to_string_lossy().into_owned();
        let known = ExceptionCatalog::builtin()
            .iter()
            .any(|entry| entry.id == name);
        assert!(known, "{name} is not an exact catalog id");
        shipped += 1;
    }
    assert!(shipped > 0);
    Ok(())
}

#[test]
fn every_catalog_entry_has_a_bundled_text() -> Result<()> {
    let registry = bundled_registry();
    let missing: Vec<&str> = SPDX_EXCEPTIONS
        .iter()
        .filter(|entry| registry.text(entry).is_err())
        .map(|entry| entry.id)
        .collect();
    assert!(missing.is_empty(), "no bundled text for {missing:?}");

    for entry in SPDX_EXCEPTIONS {
        let text = registry.text(entry)?;
        assert!(!text.trim().is_empty(), "{} text is blank", entry.id);
    }
    Ok(())
}

#[test]
fn free_functions_use_the_bundled_registry() -> Result<()> {
    let llvm = entry("LLVM Exception")?;
    assert_eq!(llvm.compatible_licenses()?, vec!["Apache-2.0".to_string()]);
    assert!(llvm.text()?.contains("LLVM"));
    Ok(())
}
