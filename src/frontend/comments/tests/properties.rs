//! Property tests for comment translation using proptest

use crate::frontend::comments::{collect, translate, TranslateOptions};
use crate::frontend::lexer::quoted_spans;
use proptest::prelude::*;

/// Strategy for generating identifiers
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

/// Strategy for generating literals that contain comment markers and quotes
fn literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "\"[a-z /*']{0,8}\"",
        Just("'a'".to_string()),
        Just("'\"'".to_string()),
        Just("'/'".to_string()),
    ]
}

/// Strategy for generating block comments (quotes and apostrophes included)
fn block_comment_strategy() -> impl Strategy<Value = String> {
    "/\\*[a-z '\"]{0,10}\\*/"
}

/// Strategy for generating one code atom
fn atom_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => identifier_strategy(),
        1 => "[0-9]{1,4}",
        2 => literal_strategy(),
        1 => Just("+".to_string()),
        1 => Just(",".to_string()),
        2 => block_comment_strategy(),
    ]
}

/// Strategy for generating one line: indentation, atoms, optional line comment
fn line_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("    "), Just("\t")],
        prop::collection::vec(atom_strategy(), 0..6),
        prop::option::of("//[a-z '\"]{0,10}"),
    )
        .prop_map(|(indent, atoms, comment)| {
            let mut line = format!("{}{}", indent, atoms.join(" "));
            if !atoms.is_empty() {
                line.push(';');
            }
            if let Some(comment) = comment {
                line.push(' ');
                line.push_str(&comment);
            }
            line
        })
}

/// Strategy for generating a `#define` line with comments and literals in its body
fn directive_strategy() -> impl Strategy<Value = String> {
    (
        identifier_strategy(),
        prop::collection::vec(atom_strategy(), 0..4),
        prop::option::of("//[a-z '\"]{0,10}"),
    )
        .prop_map(|(name, atoms, comment)| {
            let mut line = format!("#define {}", name);
            for atom in atoms {
                line.push(' ');
                line.push_str(&atom);
            }
            if let Some(comment) = comment {
                line.push(' ');
                line.push_str(&comment);
            }
            line
        })
}

/// Strategy for generating source text
fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![4 => line_strategy(), 1 => directive_strategy()],
        0..8,
    )
    .prop_map(|lines| lines.join("\n"))
}

fn literal_texts(text: &str) -> Vec<String> {
    quoted_spans(text)
        .unwrap()
        .into_iter()
        .map(|q| text[q.span.range()].to_string())
        .collect()
}

proptest! {
    /// Translating twice gives the same text as translating once
    #[test]
    fn test_translation_is_idempotent(source in source_strategy()) {
        let options = TranslateOptions::default();
        let once = translate(&source, &options).unwrap();
        let twice = translate(&once, &options).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Docstring output is idempotent too
    #[test]
    fn test_docstring_translation_is_idempotent(source in source_strategy()) {
        let options = TranslateOptions {
            docstring: true,
            ..Default::default()
        };
        let once = translate(&source, &options).unwrap();
        let twice = translate(&once, &options).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Quoted literals come out byte-for-byte and in order
    #[test]
    fn test_literals_are_untouched(source in source_strategy()) {
        let out = translate(&source, &TranslateOptions::default()).unwrap();
        prop_assert_eq!(literal_texts(&source), literal_texts(&out));
    }

    /// No foreign comment survives translation
    #[test]
    fn test_no_comment_survives(source in source_strategy()) {
        let out = translate(&source, &TranslateOptions::default()).unwrap();
        prop_assert!(collect(&out, &TranslateOptions::default()).unwrap().is_empty());
    }
}
