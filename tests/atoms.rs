mod helpers;

use volley::{Datum, Matcher, Source, State, Text, Tokens, Transition};

use crate::helpers::{solutions, strs, values};

#[test]
fn epsilon_matches_empty() {
    let all = solutions(&Matcher::epsilon(), "abc");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, vec![]);
    assert_eq!(all[0].end.offset(), 0);
}

#[test]
fn insert_injects_without_consuming() {
    let all = solutions(&Matcher::insert("x"), "abc");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, strs(&["x"]));
    assert_eq!(all[0].end.offset(), 0);
}

#[test]
fn insert_works_on_empty_source() {
    assert_eq!(values(&Matcher::insert('x'), ""), [vec![Datum::Char('x')]]);
}

#[test]
fn dot_consumes_one_token() {
    let all = solutions(&Matcher::dot(), "ab");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, vec![Datum::Char('a')]);
    assert_eq!(all[0].end.offset(), 1);
}

#[test]
fn dot_fails_at_end_of_input() {
    assert!(solutions(&Matcher::dot(), "").is_empty());
}

#[test]
fn fail_never_matches() {
    assert!(solutions(&Matcher::fail(), "anything").is_empty());
}

#[test]
fn equal_matches_whole_text_as_one_element() {
    let all = solutions(&Matcher::equal("ab"), "abc");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, strs(&["ab"]));
    assert_eq!(all[0].end.offset(), 2);
}

#[test]
fn equal_fails_on_mismatch() {
    assert!(solutions(&Matcher::equal("ax"), "abc").is_empty());
}

#[test]
fn equal_fails_on_premature_end() {
    assert!(solutions(&Matcher::equal("abcd"), "abc").is_empty());
}

#[test]
fn eos_succeeds_only_at_end() {
    let all = solutions(&Matcher::eos(), "");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, vec![]);
    assert!(solutions(&Matcher::eos(), "a").is_empty());
}

#[test]
fn pattern_matches_anchored_at_cursor() {
    let matcher = Matcher::pattern("[a-z]+").unwrap();
    let all = solutions(&matcher, "abc1");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, strs(&["abc"]));
    assert_eq!(all[0].end.offset(), 3);

    // A match further into the source does not count.
    let matcher = Matcher::pattern("b").unwrap();
    assert!(solutions(&matcher, "ab").is_empty());
}

#[test]
fn pattern_from_prebuilt_regex() {
    let regex = regex::Regex::new("[0-9]+").unwrap();
    let matcher = Matcher::regex(&regex);
    assert_eq!(values(&matcher, "42x"), [strs(&["42"])]);
}

#[test]
fn prebuilt_regex_keeps_its_configuration() {
    let regex = regex::RegexBuilder::new("abc")
        .case_insensitive(true)
        .build()
        .unwrap();
    let matcher = Matcher::regex(&regex);
    assert_eq!(values(&matcher, "ABCd"), [strs(&["ABC"])]);
}

#[test]
fn prebuilt_regex_is_still_anchored_at_the_cursor() {
    let regex = regex::Regex::new("b").unwrap();
    assert!(solutions(&Matcher::regex(&regex), "ab").is_empty());
}

#[test]
fn pattern_rejects_invalid_regex() {
    let err = Matcher::pattern("[").unwrap_err();
    assert!(err.to_string().starts_with("invalid pattern"));
}

#[test]
fn pattern_requires_a_text_source() {
    let tokens = [Datum::Char('a')];
    let source = Tokens::new(&tokens);
    let matcher = Matcher::pattern("a").unwrap();
    let err = matcher.solutions(&source).next().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported source: Pattern requires a text source"
    );
}

#[test]
fn atoms_are_one_shot() {
    let matchers = [
        Matcher::epsilon(),
        Matcher::insert("x"),
        Matcher::dot(),
        Matcher::equal("a"),
        Matcher::pattern("a").unwrap(),
    ];
    for matcher in matchers {
        assert_eq!(solutions(&matcher, "a").len(), 1, "{matcher:?}");
    }
}

#[test]
fn dirty_always_fails() {
    let source = Text::new("abc");
    let matchers = [
        Matcher::epsilon(),
        Matcher::insert("x"),
        Matcher::dot(),
        Matcher::fail(),
        Matcher::equal("a"),
        Matcher::eos(),
        Matcher::pattern("a").unwrap(),
        Matcher::drop(Matcher::dot()),
        Matcher::alt([Matcher::dot()]),
        Matcher::seq([Matcher::dot()]),
        Matcher::depth(Matcher::dot(), 0..),
        Matcher::breadth(Matcher::dot(), 0..),
    ];
    for matcher in matchers {
        let transition = matcher
            .execute(&source, State::Dirty, source.start())
            .unwrap();
        assert!(
            matches!(transition, Transition::Failure),
            "{matcher:?} did not fail from DIRTY"
        );
    }
}

#[test]
fn atoms_work_over_token_sources() {
    let tokens = [Datum::Str("if".into()), Datum::Char('(')];
    let source = Tokens::new(&tokens);

    let mut parse = Matcher::dot().solutions(&source);
    let solution = parse.next().unwrap().unwrap();
    assert_eq!(solution.value, vec![Datum::Str("if".into())]);
    assert_eq!(solution.end.offset(), 1);

    let mut parse = Matcher::eos().solutions(&source);
    assert!(parse.next().unwrap().is_none());
}
