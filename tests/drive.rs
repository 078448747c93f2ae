mod helpers;

use std::collections::HashSet;

use volley::{Matcher, Text};

use crate::helpers::{solutions, strs, values};

#[test]
fn an_exhausted_parse_stays_exhausted() {
    let source = Text::new("a");
    let mut parse = Matcher::dot().solutions(&source);
    assert!(parse.next().unwrap().is_some());
    assert!(parse.next().unwrap().is_none());
    assert!(parse.next().unwrap().is_none());
}

#[test]
fn unbound_delayed_is_fatal() {
    let source = Text::new("a");
    let matcher = Matcher::delayed();
    let err = matcher.solutions(&source).next().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid grammar: delayed matcher evaluated before being bound"
    );
}

#[test]
fn a_fatal_error_tears_the_parse_down() {
    let source = Text::new("a");
    let matcher = Matcher::alt([Matcher::delayed(), Matcher::equal("a")]);
    let mut parse = matcher.solutions(&source);
    assert!(parse.next().is_err());
    // No partial results survive: the second alternative is not tried.
    assert!(parse.next().unwrap().is_none());
}

#[test]
fn delayed_binds_exactly_once() {
    let matcher = Matcher::delayed();
    assert!(matcher.set(Matcher::dot()).is_ok());
    let err = matcher.set(Matcher::dot()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid grammar: delayed matcher is already bound"
    );
}

#[test]
fn only_delayed_matchers_can_be_bound() {
    let err = Matcher::dot().set(Matcher::epsilon()).unwrap_err();
    assert_eq!(err.to_string(), "invalid grammar: cannot bind a child to Dot");
}

#[test]
fn delayed_delegates_to_its_child() {
    let matcher = Matcher::delayed();
    matcher.set(Matcher::equal("ab")).unwrap();
    assert_eq!(values(&matcher, "ab"), [strs(&["ab"])]);
}

#[test]
fn right_recursive_grammar_parses() {
    // expr := "1" "+" expr | "1"
    let expr = Matcher::delayed();
    expr.set(Matcher::alt([
        Matcher::seq([Matcher::equal("1"), Matcher::equal("+"), expr.clone()]),
        Matcher::equal("1"),
    ]))
    .unwrap();

    let all = solutions(&expr, "1+1+1");
    assert_eq!(all[0].value, strs(&["1", "+", "1", "+", "1"]));
    assert_eq!(all[0].end.offset(), 5);
}

#[test]
fn greedy_repetition_parses_the_same_expression() {
    let expr = Matcher::seq([
        Matcher::equal("1"),
        Matcher::repeat(Matcher::seq([Matcher::equal("+"), Matcher::equal("1")]), 0..),
        Matcher::eos(),
    ]);
    assert_eq!(values(&expr, "1+1+1"), [strs(&["1", "+", "1", "+", "1"])]);
}

#[test]
fn left_recursion_fails_fast() {
    // expr := expr "+" "1" | "1" never consumes before recursing, so the
    // driver's depth bound is the only way out.
    let expr = Matcher::delayed();
    expr.set(Matcher::alt([
        Matcher::seq([expr.clone(), Matcher::equal("+"), Matcher::equal("1")]),
        Matcher::equal("1"),
    ]))
    .unwrap();

    let source = Text::new("1+1");
    let err = expr.solutions(&source).next().unwrap_err();
    assert_eq!(err.to_string(), "parse error: reached maximum parse depth (1024)");
}

#[test]
fn the_depth_bound_is_configurable() {
    let mut matcher = Matcher::equal("a");
    for _ in 0..10 {
        matcher = Matcher::seq([matcher]);
    }

    let source = Text::new("a");
    let mut parse = matcher.solutions(&source);
    parse.set_max_depth(4);
    let err = parse.next().unwrap_err();
    assert_eq!(err.to_string(), "parse error: reached maximum parse depth (4)");
}

#[test]
fn matcher_equality_is_structural() {
    assert_eq!(Matcher::equal("a"), Matcher::equal("a"));
    assert_ne!(Matcher::equal("a"), Matcher::equal("b"));
    assert_ne!(Matcher::equal("a"), Matcher::epsilon());

    let seq = Matcher::seq([Matcher::dot(), Matcher::eos()]);
    let and = Matcher::and([Matcher::dot(), Matcher::eos()]);
    assert_eq!(seq, Matcher::seq([Matcher::dot(), Matcher::eos()]));
    assert_ne!(seq, and);

    assert_eq!(
        Matcher::pattern("[a-z]").unwrap(),
        Matcher::pattern("[a-z]").unwrap()
    );
}

#[test]
fn delayed_equality_is_by_identity() {
    let a = Matcher::delayed();
    let b = Matcher::delayed();
    assert_eq!(a, a.clone());
    assert_ne!(a, b);

    // Comparing cyclic grammars terminates because the cycle point compares
    // by identity, not by structure.
    a.set(Matcher::seq([Matcher::dot(), a.clone()])).unwrap();
    b.set(Matcher::seq([Matcher::dot(), b.clone()])).unwrap();
    let outer_a = Matcher::seq([Matcher::dot(), a.clone()]);
    assert_eq!(outer_a, Matcher::seq([Matcher::dot(), a.clone()]));
    assert_ne!(outer_a, Matcher::seq([Matcher::dot(), b]));
}

#[test]
fn matchers_can_be_hashed() {
    let mut set = HashSet::new();
    set.insert(Matcher::equal("a"));
    set.insert(Matcher::equal("a"));
    set.insert(Matcher::equal("b"));
    set.insert(Matcher::delayed());
    set.insert(Matcher::delayed());
    assert_eq!(set.len(), 4);
}

#[test]
fn solutions_can_be_requested_one_at_a_time() {
    let source = Text::new("aa");
    let matcher = Matcher::breadth(Matcher::dot(), 0..);
    let mut parse = matcher.solutions(&source);

    let mut lens = Vec::new();
    while let Some(solution) = parse.next().unwrap() {
        lens.push(solution.value.len());
    }
    assert_eq!(lens, [0, 1, 2]);
}
