//! Integration tests for resolving and loading headers by logical name

use std::fs;
use std::path::Path;

use cheader::frontend::module::{BuildEnvironment, MetaPathFinder, ModuleError};
use cheader::TranslateOptions;
use tempfile::TempDir;

fn write_header(
    root: &Path,
    relative: &str,
    content: &str,
) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Two search roots; `vendor` shadows nothing in `include`
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let include = dir.path().join("include");
    let vendor = dir.path().join("vendor");

    write_header(
        &include,
        "net/http/client.h",
        "#pragma once\n#include <stddef.h>\n\n// HTTP client\nint fetch(const char *url, size_t len);\n",
    );
    write_header(&include, "net/socket.h", "int open_socket(void); // fd\n");
    write_header(&vendor, "zlib/deep/zutil.h", "#define ZLIB_H\n");
    write_header(&vendor, "net/socket.h", "int vendor_socket(void);\n");
    dir
}

#[test]
fn test_import_nested_module() {
    let dir = workspace();
    let unit = cheader::import("net.http.client", vec![dir.path().join("include")]).unwrap();

    assert_eq!(
        unit.origin,
        dir.path().join("include/net/http/client.h")
    );
    let names: Vec<&str> = unit.directives().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["pragma", "include"]);
    assert_eq!(unit.directives()[1].body, "<stddef.h>");
    assert_eq!(
        unit.source(),
        Some("\n# HTTP client\nint fetch(const char *url, size_t len);\n")
    );
}

#[test]
fn test_first_root_wins() {
    let dir = workspace();
    let env = BuildEnvironment::new(vec![dir.path().join("include"), dir.path().join("vendor")]);

    let unit = env.import("net.socket").unwrap();
    assert_eq!(unit.origin, dir.path().join("include/net/socket.h"));
    assert_eq!(unit.source(), Some("int open_socket(void);  # fd\n"));
}

#[test]
fn test_last_segment_searches_below() {
    let dir = workspace();
    let env = BuildEnvironment::new(vec![dir.path().join("vendor")]);

    let unit = env.import("zlib.zutil").unwrap();
    assert_eq!(unit.origin, dir.path().join("vendor/zlib/deep/zutil.h"));
    assert_eq!(unit.directives()[0].to_string(), "#define ZLIB_H");
}

#[test]
fn test_missing_module_reports_searched_paths() {
    let dir = workspace();
    let env = BuildEnvironment::new(vec![dir.path().join("include"), dir.path().join("vendor")]);

    match env.import("net.ftp") {
        Err(ModuleError::NotFound { searched_paths, .. }) => {
            assert_eq!(
                searched_paths,
                vec![dir.path().join("include/net"), dir.path().join("vendor/net")]
            );
        }
        other => panic!("Expected not found, got {:?}", other),
    }

    let err = cheader::import("net.ftp", vec![dir.path().join("include")]).unwrap_err();
    assert!(err.to_string().contains("net.ftp"));
}

#[test]
fn test_find_spec_does_not_load() {
    let dir = workspace();
    let env = BuildEnvironment::new(vec![dir.path().join("include")]);

    let unit = env.find_spec("net.socket").unwrap().unwrap();
    assert!(!unit.is_loaded());
    assert_eq!(unit.source(), None);
}

#[test]
fn test_explicit_search_path_overrides_defaults() {
    let dir = workspace();
    let finder = cheader::frontend::module::HeaderMetaPathFinder::new(vec![dir.path().join("include")]);

    let vendor = vec![dir.path().join("vendor")];
    let unit = finder.find_spec("net.socket", Some(&vendor)).unwrap().unwrap();
    assert_eq!(unit.origin, dir.path().join("vendor/net/socket.h"));
}

#[test]
fn test_import_with_docstring_options() {
    let dir = workspace();
    let env = BuildEnvironment::new(vec![dir.path().join("include")]).with_options(
        TranslateOptions {
            docstring: true,
            ..Default::default()
        },
    );

    let unit = env.import("net.http.client").unwrap();
    assert_eq!(
        unit.source(),
        Some("\n\"\"\"\nHTTP client\n\"\"\"\nint fetch(const char *url, size_t len);\n")
    );
}
