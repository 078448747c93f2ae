mod helpers;

use volley::{Datum, Matcher, Repeat};

use crate::helpers::{chars, solutions, strs, values};

#[test]
fn depth_yields_deepest_first() {
    let matcher = Matcher::depth(Matcher::dot(), 2..=3);
    let all = solutions(&matcher, "aaaa");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].value, chars("aaa"));
    assert_eq!(all[0].end.offset(), 3);
    assert_eq!(all[1].value, chars("aa"));
    assert_eq!(all[1].end.offset(), 2);
}

#[test]
fn breadth_yields_shallowest_first() {
    let matcher = Matcher::breadth(Matcher::dot(), 2..=3);
    let all = solutions(&matcher, "aaaa");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].value, chars("aa"));
    assert_eq!(all[1].value, chars("aaa"));
}

#[test]
fn depth_counts_are_non_increasing() {
    let matcher = Matcher::depth(Matcher::dot(), 0..);
    let lens: Vec<_> = values(&matcher, "aaa").iter().map(Vec::len).collect();
    assert_eq!(lens, [3, 2, 1, 0]);
}

#[test]
fn breadth_counts_are_non_decreasing() {
    let matcher = Matcher::breadth(Matcher::dot(), 0..);
    let lens: Vec<_> = values(&matcher, "aaa").iter().map(Vec::len).collect();
    assert_eq!(lens, [0, 1, 2, 3]);
}

#[test]
fn bounded_repetition_has_one_solution_per_count() {
    // For a deterministic child there is exactly one solution per count in
    // range, whichever way it is enumerated.
    let depth = Matcher::depth(Matcher::dot(), 1..=3);
    let breadth = Matcher::breadth(Matcher::dot(), 1..=3);
    assert_eq!(solutions(&depth, "aaaa").len(), 3);
    assert_eq!(solutions(&breadth, "aaaa").len(), 3);
}

#[test]
fn depth_yields_the_zero_match_last() {
    let matcher = Matcher::depth(Matcher::equal("a"), 0..);
    let all = solutions(&matcher, "a");
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].value, vec![]);
    assert_eq!(all[1].end.offset(), 0);
}

#[test]
fn breadth_yields_the_zero_match_first() {
    let matcher = Matcher::breadth(Matcher::equal("a"), 0..);
    let all = solutions(&matcher, "a");
    assert_eq!(all[0].value, vec![]);
    assert_eq!(all[0].end.offset(), 0);
}

#[test]
fn depth_respects_the_lower_bound() {
    let matcher = Matcher::depth(Matcher::dot(), 2..);
    assert!(solutions(&matcher, "a").is_empty());
    let lens: Vec<_> = values(&matcher, "aaaa").iter().map(Vec::len).collect();
    assert_eq!(lens, [4, 3, 2]);
}

#[test]
fn exclusive_upper_bounds() {
    let matcher = Matcher::depth(Matcher::dot(), 0..3);
    let lens: Vec<_> = values(&matcher, "aaaa").iter().map(Vec::len).collect();
    assert_eq!(lens, [2, 1, 0]);
}

#[test]
fn depth_backtracks_ambiguous_children_in_order() {
    let child = Matcher::alt([Matcher::equal("a"), Matcher::equal("aa")]);
    let matcher = Matcher::depth(child, 0..=2);
    assert_eq!(
        values(&matcher, "aa"),
        [
            strs(&["a", "a"]),
            strs(&["a"]),
            strs(&["aa"]),
            strs(&[]),
        ]
    );
}

#[test]
fn breadth_explores_levels_in_sibling_order() {
    let child = Matcher::alt([Matcher::equal("a"), Matcher::equal("aa")]);
    let matcher = Matcher::breadth(child, 1..=2);
    assert_eq!(
        values(&matcher, "aa"),
        [strs(&["a"]), strs(&["aa"]), strs(&["a", "a"])]
    );
}

#[test]
fn unflattened_repetition_nests_each_match() {
    let matcher = Repeat::new(Matcher::equal("a"))
        .bounds(2..=2)
        .flatten(false)
        .build();
    let all = solutions(&matcher, "aa");
    assert_eq!(all.len(), 1);
    assert_eq!(
        all[0].value,
        vec![Datum::List(strs(&["a"])), Datum::List(strs(&["a"]))]
    );
}

#[test]
fn builder_picks_the_traversal() {
    let dot = Matcher::dot;
    let lazy = Repeat::new(dot()).bounds(1..=3).greedy(false).build();
    assert_eq!(lazy, Matcher::breadth(dot(), 1..=3));
    assert_ne!(lazy, Matcher::depth(dot(), 1..=3));

    // `repeat` defaults to greedy and flattening.
    assert_eq!(Matcher::repeat(dot(), 0..), Matcher::depth(dot(), 0..));
}

#[test]
fn repetition_composes_with_sequencing() {
    let word = Matcher::pattern("[a-z]+").unwrap();
    let space = Matcher::drop(Matcher::equal(" "));
    let line = Matcher::seq([
        word.clone(),
        Matcher::repeat(Matcher::seq([space, word]), 0..),
        Matcher::eos(),
    ]);
    assert_eq!(values(&line, "lorem ipsum dolor"), [strs(&["lorem", "ipsum", "dolor"])]);
}
