//! Integration tests for whole-file comment translation

use std::fs;
use std::path::PathBuf;

use cheader::frontend::comments::{collect, Comment};
use cheader::{translate, translate_file, TranslateOptions};
use tempfile::TempDir;

fn create_header(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const POINT_H: &str = r#"/* A 2d point */
struct point {
    int x; // horizontal
    int y; // vertical
};

const char *label = "// not a comment";
int area(int w /* width */, int h /* height */);
"#;

#[test]
fn test_translate_file() {
    let dir = TempDir::new().unwrap();
    let path = create_header(&dir, "point.h", POINT_H);

    let out = translate_file(&path, &TranslateOptions::default()).unwrap();
    assert_eq!(
        out,
        r#"# A 2d point
struct point {
    int x;  # horizontal
    int y;  # vertical
};

const char *label = "// not a comment";
int area(int w, int h);
# width
# height
"#
    );
}

#[test]
fn test_translate_file_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = create_header(&dir, "point.h", POINT_H);
    let options = TranslateOptions::default();

    let once = translate_file(&path, &options).unwrap();
    assert_eq!(translate(&once, &options).unwrap(), once);
}

#[test]
fn test_translate_file_missing() {
    let dir = TempDir::new().unwrap();
    let err = translate_file(&dir.path().join("absent.h"), &TranslateOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_translate_file_unterminated_comment() {
    let dir = TempDir::new().unwrap();
    let path = create_header(&dir, "broken.h", "int x; /* open\n");

    let err = translate_file(&path, &TranslateOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to translate"));
}

#[test]
fn test_docstring_file() {
    let dir = TempDir::new().unwrap();
    let path = create_header(
        &dir,
        "doc.h",
        "/**\n * Adds two numbers.\n *\n * Overflow wraps.\n */\nint add(int a, int b);\n",
    );
    let options = TranslateOptions {
        docstring: true,
        ..Default::default()
    };

    let out = translate_file(&path, &options).unwrap();
    assert_eq!(
        out,
        "\"\"\"\n\nAdds two numbers.\n\nOverflow wraps.\n\n\"\"\"\nint add(int a, int b);\n"
    );
    assert_eq!(translate(&out, &options).unwrap(), out);
}

#[test]
fn test_collect_matches_file_layout() {
    let comments = collect(POINT_H, &TranslateOptions::default()).unwrap();
    let kinds: Vec<&str> = comments
        .iter()
        .map(|comment| match comment {
            Comment::SingleLine(_) => "single",
            Comment::MultiLine(_) => "multi",
            Comment::Group(_) => "group",
        })
        .collect();
    assert_eq!(kinds, vec!["multi", "single", "single", "multi", "multi"]);

    assert!(!comments[0].code_before());
    assert!(comments[1].code_before());
    assert!(comments[3].code_after());
}
