#![allow(unused)]
//! Search pipeline integration harness.
//!
//! # What this covers
//!
//! - **Basic matcher weights**: exact hits score 8 / 5 / 3 for title,
//!   keywords and description; fuzzy token hits score 4 / 2.5 / 1.5 and only
//!   run when nothing matched the whole query.
//! - **Expansion**: the built-in synonym table expands a query into its
//!   concept terms, query first, without duplicates.
//! - **Semantic merge**: courses reached only through an expanded term are
//!   discounted by 0.7, tagged `semantic-*`, and never duplicate a direct hit.
//! - **Property: results ⊆ corpus**: no result may appear that is not in the
//!   corpus, and every result has a positive score.
//! - **Property: semantic ⊇ direct**: turning semantic mode on never drops or
//!   re-scores a direct hit.
//! - **Property: discount**: a semantic score is 0.7 times the exact,
//!   non-fuzzy score of its matched term against that course.
//! - **Property: expansion head**: the query comes first and no term repeats.
//!
//! # What this does NOT cover
//!
//! - Pagination and the empty-query response (see facade_harness)
//! - Corpus loading (see corpus_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! cargo test --test search_harness -- --nocapture
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::collections::HashSet;
use zensearch_core::search::expander::expand;
use zensearch_core::search::matcher::match_courses;
use zensearch_core::search::semantic::{semantic_search, SEMANTIC_DISCOUNT};
use zensearch_core::{SearchEngine, SynonymTable};

fn tags(item: &zensearch_core::ScoredCourse) -> Vec<String> {
    item.match_types.iter().map(ToString::to_string).collect()
}

// ---------------------------------------------------------------------------
// Basic matcher
// ---------------------------------------------------------------------------

/// A lone title hit scores exactly the title weight.
#[test]
fn single_title_hit_scores_eight() {
    let corpus = corpus_of(vec![CourseBuilder::new(1, "7天基础冥想").build()]);
    let ranked = SearchEngine::default().rank("冥想", &corpus, false, true);

    assert_eq!(ids(&ranked.results), vec![1]);
    assert_eq!(ranked.results[0].score, 8.0);
    assert_eq!(tags(&ranked.results[0]), vec!["title-match"]);
}

/// Field hits add up; courses without any hit are dropped.
#[test]
fn field_hits_are_additive() {
    let corpus = meditation_corpus();
    let ranked = SearchEngine::default().rank("冥想", &corpus, false, true);

    assert_eq!(ids(&ranked.results), vec![1, 4]);
    assert_eq!(ranked.results[0].score, 11.0);
    assert_eq!(tags(&ranked.results[0]), vec!["title-match", "description-match"]);
    assert_eq!(ranked.results[1].score, 3.0);
    assert_eq!(ranked.expanded_terms, vec!["冥想"]);
}

#[rstest]
#[case::title("舒眠", 3, 8.0)]
#[case::keywords("姿势", 2, 5.0)]
#[case::description("坐姿", 2, 3.0)]
#[case::case_insensitive_latin("ZEN", 9, 8.0)]
fn exact_weight_per_field(#[case] query: &str, #[case] id: u64, #[case] score: f64) {
    let mut courses = meditation_corpus().as_ref().clone().into_courses();
    courses.push(CourseBuilder::new(9, "Zen Basics").build());
    let ranked = SearchEngine::default().rank(query, &corpus_of(courses), false, true);

    let hit = ranked.results.iter().find(|r| r.course.id == id).expect("course is a hit");
    assert_eq!(hit.score, score);
}

/// No field contains "睡眠 焦虑"; each token then scores on its own.
#[test]
fn fuzzy_tokens_score_partial_weights() {
    let corpus = meditation_corpus();
    let ranked = SearchEngine::default().rank("睡眠 焦虑", &corpus, false, true);

    assert_eq!(ids(&ranked.results), vec![3, 5]);
    for item in &ranked.results {
        assert_eq!(item.score, 2.5);
        assert_eq!(tags(item), vec!["keyword-partial-match"]);
    }
}

#[test]
fn fuzzy_off_requires_whole_query() {
    let corpus = meditation_corpus();
    let ranked = SearchEngine::default().rank("睡眠 焦虑", &corpus, false, false);
    assert!(ranked.results.is_empty());
}

/// Single-character tokens never take part in fuzzy matching.
#[test]
fn short_tokens_are_ignored() {
    let corpus = meditation_corpus();
    let ranked = SearchEngine::default().rank("冥 x", &corpus, false, true);
    assert!(ranked.results.is_empty());
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

#[test]
fn builtin_expansion_of_breathing() {
    let terms = expand("呼吸", &SynonymTable::builtin());
    insta::assert_debug_snapshot!(terms, @r#"
    [
        "呼吸",
        "呼吸法",
        "气息",
        "吸气",
        "呼气",
        "呼吸节奏",
    ]
    "#);
}

#[test]
fn unknown_query_expands_to_itself() {
    assert_eq!(expand("xyzzy", &SynonymTable::builtin()), vec!["xyzzy"]);
}

// ---------------------------------------------------------------------------
// Semantic merge
// ---------------------------------------------------------------------------

/// 打坐基础 never mentions 冥想 but is reached through the 冥想 concept.
#[test]
fn semantic_hit_is_discounted_and_ranked_by_score() {
    let corpus = meditation_corpus();
    let ranked = SearchEngine::default().rank("冥想", &corpus, true, true);

    assert_eq!(ids(&ranked.results), vec![1, 2, 4]);
    assert_sorted_desc!(ranked.results);
    assert_unique_ids!(ranked.results);

    let semantic = &ranked.results[1];
    assert!(semantic.semantic_match);
    assert_eq!(semantic.matched_term.as_deref(), Some("打坐"));
    assert!(approx(semantic.score, 8.0 * SEMANTIC_DISCOUNT));
    assert_eq!(tags(semantic), vec!["semantic-title-match"]);

    assert!(!ranked.results[0].semantic_match);
    assert!(!ranked.results[2].semantic_match);
}

#[test]
fn semantic_search_reports_expanded_terms() {
    let corpus = meditation_corpus();
    let out = semantic_search("呼吸", corpus.courses(), &SynonymTable::builtin(), true);
    assert_eq!(out.expanded_terms.len(), 6);
    assert_eq!(out.expanded_terms[0], "呼吸");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

const WORDS: &[&str] = &[
    "冥想", "打坐", "呼吸", "睡眠", "助眠", "专注", "放松", "焦虑", "入门", "进阶", "感恩", "身体",
];

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..4).prop_map(|w| w.join(", "))
}

fn arb_corpus() -> impl Strategy<Value = Vec<zensearch_core::Course>> {
    prop::collection::vec((phrase(), phrase(), phrase()), 0..20).prop_map(|rows| {
        rows.into_iter()
            .zip(1u64..)
            .map(|((title, keywords, description), id)| {
                CourseBuilder::new(id, title)
                    .keywords(keywords)
                    .description(description)
                    .build()
            })
            .collect()
    })
}

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..3).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn results_are_positive_sorted_and_from_the_corpus(
        courses in arb_corpus(),
        query in arb_query(),
        semantic in any::<bool>(),
        fuzzy in any::<bool>(),
    ) {
        let corpus_ids: HashSet<u64> = courses.iter().map(|c| c.id).collect();
        let corpus = corpus_of(courses);
        let ranked = SearchEngine::default().rank(&query, &corpus, semantic, fuzzy);

        for item in &ranked.results {
            prop_assert!(corpus_ids.contains(&item.course.id));
            prop_assert!(item.score > 0.0);
            prop_assert_eq!(item.semantic_match, item.matched_term.is_some());
        }
        assert_sorted_desc!(ranked.results);
        assert_unique_ids!(ranked.results);
    }

    #[test]
    fn semantic_mode_keeps_every_direct_hit(
        courses in arb_corpus(),
        query in arb_query(),
        fuzzy in any::<bool>(),
    ) {
        let corpus = corpus_of(courses);
        let engine = SearchEngine::default();
        let direct = engine.rank(&query, &corpus, false, fuzzy);
        let semantic = engine.rank(&query, &corpus, true, fuzzy);

        for hit in &direct.results {
            let same = semantic.results.iter().find(|r| r.course.id == hit.course.id);
            prop_assert!(same.is_some(), "course {} lost in semantic mode", hit.course.id);
            let same = same.unwrap();
            prop_assert!(!same.semantic_match);
            prop_assert_eq!(same.score, hit.score);
        }
    }

    #[test]
    fn semantic_score_is_discounted_exact_score(
        courses in arb_corpus(),
        query in arb_query(),
        fuzzy in any::<bool>(),
    ) {
        let out = semantic_search(&query, &courses, &SynonymTable::builtin(), fuzzy);
        for item in out.results.iter().filter(|r| r.semantic_match) {
            let term = item.matched_term.as_deref().unwrap();
            let exact = match_courses(term, std::slice::from_ref(&item.course), false);
            prop_assert_eq!(exact.len(), 1, "{} does not match course {}", term, item.course.id);
            prop_assert!(approx(item.score, SEMANTIC_DISCOUNT * exact[0].score));
        }
    }

    #[test]
    fn expansion_starts_with_query_without_duplicates(query in arb_query()) {
        let terms = expand(&query, &SynonymTable::builtin());
        prop_assert_eq!(&terms[0], &query);
        let unique: HashSet<&String> = terms.iter().collect();
        prop_assert_eq!(unique.len(), terms.len(), "duplicates in {:?}", terms);
    }
}
