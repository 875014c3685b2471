//! Property-based fuzzing tests for the Monkey lexer, parser and evaluator
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The lexer and parser never panic on arbitrary input
//! 2. Integer arithmetic agrees with a reference computation, precedence included
//! 3. Literal renderings re-evaluate to the same rendering

use monkey::{Evaluator, Lexer, Object, Parser, TokenKind};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break parsers
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,300}").unwrap()
}

/// Generate token soup from the language's own vocabulary
fn monkey_like_string() -> impl Strategy<Value = String> {
    prop::collection::vec(monkey_token(), 0..60).prop_map(|tokens| tokens.join(" "))
}

fn monkey_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(";".to_string()),
        Just("if".to_string()),
        Just("else".to_string()),
        Just("return".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
        Just("==".to_string()),
        Just("!=".to_string()),
        Just("!".to_string()),
        (0i64..1000).prop_map(|n| n.to_string()),
        "[a-z][a-z0-9_]{0,6}".prop_map(|s| s),
    ]
}

/// Integers whose decimal rendering is itself a valid (possibly negated) literal
fn literal_i64() -> impl Strategy<Value = i64> {
    (i64::MIN + 1)..=i64::MAX
}

fn render(n: i64) -> String {
    if n < 0 {
        format!("(-{})", n.unsigned_abs())
    } else {
        n.to_string()
    }
}

fn eval_source(source: &str) -> (Object, usize) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (Evaluator::new().eval(&program), parser.errors().len())
}

// =============================================================================
// LEXER / PARSER FUZZ TESTS
// =============================================================================

proptest! {
    /// The lexer should never panic and always ends with exactly one Eof
    #[test]
    fn lexer_never_panics(source in arbitrary_source_string()) {
        let tokens = Lexer::new(&source).scan_tokens();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    /// The parser should never panic on arbitrary input
    #[test]
    fn parser_never_panics(source in arbitrary_source_string()) {
        let mut parser = Parser::new(Lexer::new(&source));
        let _ = parser.parse_program();
    }

    /// Parsing and evaluating token soup never panics
    #[test]
    fn pipeline_handles_token_soup(source in monkey_like_string()) {
        let _ = eval_source(&source);
    }

    /// Parser handles deeply nested grouping
    #[test]
    fn parser_handles_deep_nesting(depth in 1usize..100) {
        let source = format!("{}1 + 1{}", "(".repeat(depth), ")".repeat(depth));
        let (result, errors) = eval_source(&source);
        prop_assert_eq!(errors, 0);
        prop_assert_eq!(result, Object::Integer(2));
    }

    /// Unbalanced parentheses are reported, never panic
    #[test]
    fn parser_handles_unbalanced_parens(opens in 0usize..30, closes in 0usize..30) {
        let source = format!("{}1{}", "(".repeat(opens), ")".repeat(closes));
        let mut parser = Parser::new(Lexer::new(&source));
        let _ = parser.parse_program();
        if opens != closes {
            prop_assert!(!parser.errors().is_empty());
        }
    }
}

// =============================================================================
// EVALUATOR PROPERTY TESTS
// =============================================================================

proptest! {
    /// `a + b * c` multiplies first, `(a + b) * c` adds first
    #[test]
    fn arithmetic_matches_reference(
        a in literal_i64(),
        b in literal_i64(),
        c in literal_i64()
    ) {
        let (result, errors) = eval_source(&format!("{} + {} * {}", render(a), render(b), render(c)));
        prop_assert_eq!(errors, 0);
        prop_assert_eq!(result, Object::Integer(a.wrapping_add(b.wrapping_mul(c))));

        let (result, _) = eval_source(&format!("({} + {}) * {}", render(a), render(b), render(c)));
        prop_assert_eq!(result, Object::Integer(a.wrapping_add(b).wrapping_mul(c)));
    }

    /// Division truncates toward zero; a zero divisor is an error object
    #[test]
    fn division_matches_reference(a in literal_i64(), b in literal_i64()) {
        let (result, _) = eval_source(&format!("{} / {}", render(a), render(b)));
        if b == 0 {
            prop_assert!(result.is_error());
        } else {
            prop_assert_eq!(result, Object::Integer(a.wrapping_div(b)));
        }
    }

    /// Comparisons agree with native comparisons
    #[test]
    fn comparisons_match_reference(a in -1000i64..1000, b in -1000i64..1000) {
        let cases = [
            ("<", a < b),
            (">", a > b),
            ("==", a == b),
            ("!=", a != b),
        ];
        for (op, expected) in cases {
            let (result, _) = eval_source(&format!("{} {} {}", render(a), op, render(b)));
            prop_assert_eq!(result, Object::from_native_bool(expected));
        }
    }

    /// Re-evaluating the inspect() rendering of a literal gives the same rendering
    #[test]
    fn literal_inspect_round_trips(n in literal_i64(), flag in any::<bool>()) {
        for source in [render(n), flag.to_string()] {
            let (first, _) = eval_source(&source);
            let (second, errors) = eval_source(&first.inspect());
            prop_assert_eq!(errors, 0);
            prop_assert_eq!(first.inspect(), second.inspect());
        }
    }

    /// Evaluation is deterministic for any parseable program
    #[test]
    fn evaluator_is_deterministic(source in monkey_like_string()) {
        let mut parser = Parser::new(Lexer::new(&source));
        if let Ok(program) = parser.parse() {
            let evaluator = Evaluator::new();
            prop_assert_eq!(evaluator.eval(&program), evaluator.eval(&program));
        }
    }
}
