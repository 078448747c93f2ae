#![allow(dead_code)]

use volley::{Datum, Matcher, Solution, Text, Value};

/// Drives `matcher` over `text` and returns every solution in order.
pub fn solutions(matcher: &Matcher, text: &str) -> Vec<Solution> {
    let source = Text::new(text);
    let mut parse = matcher.solutions(&source);
    let mut all = Vec::new();
    while let Some(solution) = parse.next().unwrap() {
        assert!(all.len() < 100, "matcher yields too many solutions");
        all.push(solution);
    }
    all
}

/// The values of every solution of `matcher` over `text`.
pub fn values(matcher: &Matcher, text: &str) -> Vec<Value> {
    solutions(matcher, text)
        .into_iter()
        .map(|s| s.value)
        .collect()
}

/// A value with one string element per item.
pub fn strs(items: &[&str]) -> Value {
    items.iter().map(|s| (*s).into()).collect()
}

/// A value with one char element per character of `text`.
pub fn chars(text: &str) -> Value {
    text.chars().map(Datum::Char).collect()
}
