//! Unit tests for the condition parser
//!
//! Covers the public parse entry points, error reporting and the guarantee
//! that separate parse calls never share state.

use ohmage_core::{ConditionNode, Literal, LogicalKind, OperatorKind};
use ohmage_parser::*;
use std::thread;

// =============================================================================
// Successful Parses
// =============================================================================

#[test]
fn test_parse_range_condition() {
    let tree = parse("[q1] >= 1 and [q1] <= 5").unwrap();

    match tree {
        ConditionNode::Logical { kind, left, right } => {
            assert_eq!(kind, LogicalKind::And);
            assert_eq!(*left, ConditionNode::comparison("q1", OperatorKind::Ge, 1_i64));
            assert_eq!(*right, ConditionNode::comparison("q1", OperatorKind::Le, 5_i64));
        }
        _ => panic!("Expected logical node"),
    }
}

#[test]
fn test_parse_mixed_case_keywords_and_whitespace() {
    let a = parse("[a]==1 AND\t[b]!=\"x\"\nOr [c] < 2.5").unwrap();
    let b = parse("[a] == 1 and [b] != \"x\" or [c] < 2.5").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_parse_negative_and_decimal_literals() {
    let tree = parse("[temp] > -3.5").unwrap();
    assert_eq!(
        tree,
        ConditionNode::Comparison {
            identifier: "temp".to_string(),
            operator: OperatorKind::Gt,
            literal: Literal::Numeric(-3.5),
        }
    );
}

#[test]
fn test_quoted_numeral_stays_text() {
    let tree = parse("[q1] == \"5\"").unwrap();
    assert_eq!(tree, ConditionNode::comparison("q1", OperatorKind::Eq, "5"));
}

#[test]
fn test_redundant_parentheses() {
    let plain = parse("[a] == 1").unwrap();
    let wrapped = parse("((([a] == 1)))").unwrap();
    assert_eq!(plain, wrapped);
}

#[test]
fn test_rendered_tree_parses_to_same_tree() {
    let sentences = [
        "[a]==1 or [a]==2 and [b]==3",
        "([a]==1 or [a]==2) and [b]==3",
        "[a]==1 or ([b]==2 or [c]==3)",
        "[q2] == \"yes\" and ([q1] < 0.25 or [q1] >= 10)",
    ];

    for sentence in sentences {
        let tree = parse(sentence).unwrap();
        let reparsed = parse(&tree.to_string()).unwrap();
        assert_eq!(tree, reparsed, "round trip failed for {}", sentence);
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_syntax_failures() {
    assert!(matches!(
        parse("[q1] >= ").unwrap_err(),
        ParseError::UnexpectedEnd { position: 8, .. }
    ));
    assert!(matches!(
        parse("([q1]==1").unwrap_err(),
        ParseError::UnmatchedParen { paren: '(', .. }
    ));
    assert!(parse("").is_err());
}

#[test]
fn test_error_messages_are_readable() {
    let err = parse("[q1] == [q2]").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("offset 8"), "{}", message);
    assert!(message.contains("[q2]"), "{}", message);
}

#[test]
fn test_out_of_range_literal_rejected() {
    let sentence = format!("[a] == {}", "9".repeat(400));
    let err = parse(&sentence).unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(err.position(), Some(7));

    // the largest finite value still renders to something that parses back
    let tree = parse(&format!("[a] == {}", f64::MAX)).unwrap();
    assert_eq!(parse(&tree.to_string()).unwrap(), tree);
}

#[test]
fn test_empty_group() {
    let err = parse("()").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { position: 1, .. }));
}

#[test]
fn test_deep_nesting_fails_without_overflow() {
    let depth = 10_000;
    let sentence = format!("{}[a]==1{}", "(".repeat(depth), ")".repeat(depth));

    let err = parse(&sentence).unwrap_err();
    assert!(matches!(
        err,
        ParseError::DepthExceeded {
            max_depth: DEFAULT_MAX_DEPTH,
            ..
        }
    ));
}

#[test]
fn test_flat_chain_counts_toward_depth() {
    let fits = vec!["[a]==1"; DEFAULT_MAX_DEPTH].join(" or ");
    let tree = parse(&fits).unwrap();
    assert_eq!(tree.depth(), DEFAULT_MAX_DEPTH);

    let too_long = vec!["[a]==1"; DEFAULT_MAX_DEPTH + 1].join(" or ");
    assert!(matches!(
        parse(&too_long).unwrap_err(),
        ParseError::DepthExceeded { .. }
    ));
}

#[test]
fn test_long_chain_fails_without_overflow() {
    let sentence = vec!["[a]==1"; 2_000].join(" and ");
    let err = parse(&sentence).unwrap_err();
    assert!(matches!(err, ParseError::DepthExceeded { .. }));

    let parser = ConditionParser::new().with_max_depth(5_000);
    assert!(parser.parse(&sentence).is_ok());
}

// =============================================================================
// Independence of Calls
// =============================================================================

#[test]
fn test_repeated_parse_is_identical() {
    let sentence = "[q1] >= 1 and [q1] <= 5 or [q2] == \"yes\"";
    let first = parse(sentence).unwrap();

    // an unrelated failing parse in between must not leave anything behind
    assert!(parse("([broken").is_err());

    let second = parse(sentence).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_interleaved_lexers_are_independent() {
    let mut a = tokenize("[a] == 1");
    let mut b = tokenize("[b] != \"x\"");

    assert_eq!(
        a.next().unwrap().unwrap().kind,
        TokenKind::Identifier("a".to_string())
    );
    assert_eq!(
        b.next().unwrap().unwrap().kind,
        TokenKind::Identifier("b".to_string())
    );
    assert_eq!(
        a.next().unwrap().unwrap().kind,
        TokenKind::Operator(OperatorKind::Eq)
    );
    assert_eq!(
        b.next().unwrap().unwrap().kind,
        TokenKind::Operator(OperatorKind::Ne)
    );
}

#[test]
fn test_concurrent_parses_match_sequential() {
    let sentences: Vec<String> = (0..1_000)
        .map(|i| format!("[q{}] >= {} and ([r{}] == \"v{}\" or [s] < {}.5)", i, i, i % 7, i, i))
        .collect();

    let sequential: Vec<ConditionNode> = sentences.iter().map(|s| parse(s).unwrap()).collect();

    let concurrent: Vec<ConditionNode> = thread::scope(|scope| {
        let handles: Vec<_> = sentences
            .chunks(50)
            .map(|chunk| {
                scope.spawn(move || chunk.iter().map(|s| parse(s).unwrap()).collect::<Vec<_>>())
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().expect("parser thread panicked"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
}
