use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use toolflow_catalog::{Catalog, CatalogError};

#[test]
fn loads_json_catalog_from_disk() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("tools.json");
    fs::write(
        &path,
        r#"[
          {"slug": "csv-to-json", "name": "CSV to JSON", "description": "Convert CSV.", "category": "data", "icon": "table"},
          {"slug": "json-validator", "name": "JSON Validator", "category": "data"}
        ]"#,
    )
    .unwrap();

    let catalog = Catalog::from_path(&path).expect("json catalog");
    assert_eq!(catalog.len(), 2);
    let validator = catalog.get("json-validator").expect("tool");
    assert_eq!(validator.name, "JSON Validator");
    assert_eq!(validator.description, "");
}

#[test]
fn loads_toml_catalog_from_disk() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("tools.toml");
    fs::write(
        &path,
        r#"
[[tools]]
slug = "image-resizer"
name = "Image Resizer"
description = "Resize images."
category = "image"
icon = "crop"

[[tools]]
slug = "image-compressor"
name = "Image Compressor"
category = "image"
"#,
    )
    .unwrap();

    let catalog = Catalog::from_path(&path).expect("toml catalog");
    let slugs: Vec<_> = catalog.iter().map(|t| t.slug.clone()).collect();
    assert_eq!(slugs, vec!["image-resizer", "image-compressor"]);
}

#[test]
fn rejects_unknown_extension() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("tools.yaml");
    fs::write(&path, "- slug: x").unwrap();

    let err = Catalog::from_path(&path).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
}

#[test]
fn reports_invalid_slug_from_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("tools.json");
    fs::write(
        &path,
        r#"[{"slug": "Bad Slug", "name": "Bad", "category": "misc"}]"#,
    )
    .unwrap();

    let err = Catalog::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Bad Slug"), "unexpected error: {err}");
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = tempdir().unwrap();
    let err = Catalog::from_path(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::IoError(_)));
}
