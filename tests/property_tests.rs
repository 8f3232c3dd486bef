//! Property-based tests for the syncmock generator
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use syncmock::frontend::model::TypeExpr;
use syncmock::frontend::signature::generated_name;

// =============================================================================
// Naming Properties
// =============================================================================

fn predeclared_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "bool", "int", "int8", "int64", "uint", "uint32", "byte", "rune", "float64", "string", "error", "any",
    ])
}

proptest! {
    /// Property: a lone field is `S`, `I` or `A` depending only on its type
    #[test]
    fn lone_field_name_depends_on_type(name in predeclared_type()) {
        let generated = generated_name(0, &TypeExpr::ident(name), 1);
        let expected = match name {
            "string" => "S",
            "int" | "int8" | "int64" | "uint" | "uint32" | "byte" | "rune" => "I",
            _ => "A",
        };
        prop_assert_eq!(generated, expected);
    }

    /// Property: in lists of two or more, the name depends only on the position
    #[test]
    fn positional_names_ignore_type(total in 2usize..20, name in predeclared_type()) {
        for index in 0..total {
            let generated = generated_name(index, &TypeExpr::ident(name), total);
            let expected = if index < 8 {
                char::from(b'A' + index as u8).to_string()
            } else {
                format!("A{index}")
            };
            prop_assert_eq!(generated, expected);
        }
    }

    /// Property: names within one list never repeat
    #[test]
    fn positional_names_are_distinct(total in 2usize..40) {
        let names: std::collections::HashSet<String> =
            (0..total).map(|i| generated_name(i, &TypeExpr::ident("int"), total)).collect();
        prop_assert_eq!(names.len(), total);
    }
}

// =============================================================================
// Lexer / Parser Robustness
// =============================================================================

#[cfg(test)]
mod syntax_properties {
    use super::*;
    use syncmock::frontend::{lexer, parser};

    // Strategy for generating exported Go identifiers
    fn ident_strategy() -> impl Strategy<Value = String> {
        "[A-Z][a-zA-Z0-9]{0,8}"
    }

    // Strategy for generating simple interface declarations
    fn interface_strategy() -> impl Strategy<Value = String> {
        (ident_strategy(), prop::collection::vec((ident_strategy(), predeclared_type()), 1..5)).prop_map(
            |(name, methods)| {
                let body: Vec<String> = methods
                    .iter()
                    .map(|(method, ty)| format!("\t{method}(v {ty}) {ty}\n"))
                    .collect();
                format!("package p\n\ntype {name} interface {{\n{}}}\n", body.concat())
            },
        )
    }

    proptest! {
        /// Property: arbitrary input never panics the lexer or parser
        #[test]
        fn arbitrary_input_does_not_panic(source in "\\PC{0,200}") {
            if let Ok(tokens) = lexer::lex(&source) {
                let _ = parser::parse(&tokens);
            }
        }

        /// Property: generated interface declarations parse to one declaration
        #[test]
        fn generated_interfaces_parse(source in interface_strategy()) {
            let file = parser::parse_source(&source).expect("Parse failed");
            prop_assert_eq!(file.declarations.len(), 1);
        }
    }
}
