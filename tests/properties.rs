//! Property-based tests for the scanner.
//!
//! - tokens are never empty and never carry surrounding whitespace
//! - scanning never panics and is deterministic on arbitrary input
//! - documented declarations map one-to-one onto references

use proptest::prelude::*;
use subdoc::model::Reference;
use subdoc::parser::tokenizer::tokenize;

/// Source-like text: identifiers, brackets, operators, quotes, comments.
fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,6}",
            Just("function".to_string()),
            Just("class".to_string()),
            Just("exports.".to_string()),
            Just("this.".to_string()),
            Just("namespace(\"n\", function(exports) {".to_string()),
            Just("/* @name x */".to_string()),
            Just("/*".to_string()),
            Just("*/".to_string()),
            Just("//".to_string()),
            "[{}()\\[\\];=,.\"'*<>@]",
            "[ \n\t]{1,3}",
        ],
        0..60,
    )
    .prop_map(|parts| parts.concat())
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_map(|s| format!("fn_{}", s))
}

proptest! {
    #[test]
    fn tokens_are_non_empty_and_trimmed(source in "\\PC{0,200}") {
        let tokens = tokenize(&source);
        prop_assert!(tokens.last().is_some_and(|t| t.is_end()));
        for token in &tokens[..tokens.len() - 1] {
            let text = token.text().unwrap();
            prop_assert!(!text.is_empty());
            prop_assert_eq!(text, text.trim());
            prop_assert_eq!(&source[token.start()..token.end()], text);
        }
    }

    #[test]
    fn scan_is_deterministic(source in source_strategy()) {
        let first = subdoc::scan(&source);
        let second = subdoc::scan(&source);
        prop_assert!(first.namespaces.last().is_some_and(|n| n.is_global()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn each_documented_function_yields_one_reference(
        names in prop::collection::vec(name_strategy(), 0..12)
    ) {
        let source: String = names
            .iter()
            .map(|name| format!("/* @name {name} */\nfunction {name}(a, b) {{\n    return a;\n}}\n"))
            .collect();

        let namespaces = subdoc::parse(&source);
        prop_assert_eq!(namespaces.len(), 1);
        let found: Vec<_> = namespaces[0]
            .members
            .iter()
            .map(|m| m.doc().identifier.clone())
            .collect();
        prop_assert_eq!(found, names);
    }

    #[test]
    fn class_fields_match_documented_methods(
        methods in prop::collection::vec(name_strategy(), 0..8)
    ) {
        let body: String = methods
            .iter()
            .map(|name| format!("    /* @name Box.{name} */\n    {name}(value) {{\n        if (value) {{ return 1; }}\n    }}\n"))
            .collect();
        let source = format!("/* @name Box */\nclass Box {{\n{body}}}\n/* @name after */\nvar after = 1;\n");

        let namespaces = subdoc::parse(&source);
        let members = &namespaces[0].members;
        prop_assert_eq!(members.len(), 2);

        let Reference::Class(class) = &members[0] else {
            return Err(TestCaseError::fail("expected a class"));
        };
        let fields: Vec<_> = class.fields.iter().map(|f| f.doc().identifier.clone()).collect();
        prop_assert_eq!(fields, methods);
    }
}
