//! Integration tests for the diff engine.
//!
//! The word scenario scores pairs by edit distance plus how far the word
//! moved, so a word that both changed and moved pays for both.

#![cfg(all(feature = "adapters", feature = "diff"))]

use ixseq::collection::Collection;
use ixseq::context::{CancellationToken, ExecutionContext};
use ixseq::diff::{Diff, DiffCollection, DiffOptions, DiffType, diff};
use ixseq::error::Error;
use ixseq::sequence::IndexedValue;
use rstest::{fixture, rstest};
use std::ops::ControlFlow;

// =============================================================================
// Helpers
// =============================================================================

fn edit_distance(left: &str, right: &str) -> usize {
    let right: Vec<char> = right.chars().collect();
    let mut previous: Vec<usize> = (0..=right.len()).collect();
    for (row, left_char) in left.chars().enumerate() {
        let mut current = Vec::with_capacity(previous.len());
        current.push(row + 1);
        for (column, right_char) in right.iter().enumerate() {
            let substitution = previous[column] + usize::from(left_char != *right_char);
            let deletion = previous[column + 1] + 1;
            let insertion = current[column] + 1;
            current.push(substitution.min(deletion).min(insertion));
        }
        previous = current;
    }
    previous[right.len()]
}

#[allow(clippy::cast_precision_loss, clippy::unnecessary_wraps)]
fn word_distance(
    before: &IndexedValue<usize, &'static str>,
    after: &IndexedValue<usize, &'static str>,
) -> Result<f64, Error> {
    let edits = edit_distance(before.value, after.value);
    let moved = before.index.abs_diff(after.index);
    Ok((edits + moved) as f64)
}

#[fixture]
fn before() -> Vec<&'static str> {
    vec!["alpha", "beta", "gamma", "delta"]
}

#[fixture]
fn after() -> Vec<&'static str> {
    vec!["gamma", "Alpha", "epsilon", "alpha"]
}

fn summary(changes: &DiffCollection<usize, &'static str>) -> Vec<String> {
    changes
        .iter()
        .map(|record| {
            let change = &record.index;
            match change.kind() {
                DiffType::REMOVE => format!(
                    "REMOVE {} @{}",
                    change.before_value().copied().unwrap_or_default(),
                    change.before_position().unwrap_or_default()
                ),
                DiffType::ADD => format!(
                    "ADD {} @{}",
                    record.value.unwrap_or_default(),
                    change.after_position().unwrap_or_default()
                ),
                kind => format!(
                    "{kind} {}->{} @{}->{}",
                    change.before_value().copied().unwrap_or_default(),
                    record.value.unwrap_or_default(),
                    change.before_position().unwrap_or_default(),
                    change.after_position().unwrap_or_default()
                ),
            }
        })
        .collect()
}

// =============================================================================
// Scenario
// =============================================================================

#[rstest]
#[case("alpha", "gamma", 4)]
#[case("alpha", "Alpha", 1)]
#[case("delta", "alpha", 4)]
#[case("", "abc", 3)]
#[case("same", "same", 0)]
fn test_edit_distance_helper(#[case] left: &str, #[case] right: &str, #[case] expected: usize) {
    assert_eq!(edit_distance(left, right), expected);
}

#[rstest]
fn test_word_scenario(before: Vec<&'static str>, after: Vec<&'static str>) {
    let context = ExecutionContext::new();
    let changes = diff(
        &context,
        &before,
        &after,
        &DiffOptions::any_index(2.0),
        word_distance,
    )
    .unwrap();

    assert_eq!(
        summary(&changes),
        vec![
            "MODIFY gamma->gamma @2->0",
            "REMOVE beta @1",
            "MODIFY alpha->Alpha @0->1",
            "ADD epsilon @2",
            "REMOVE delta @3",
            "ADD alpha @3",
        ]
    );
}

#[rstest]
fn test_every_input_element_is_accounted_for(before: Vec<&'static str>, after: Vec<&'static str>) {
    let context = ExecutionContext::new();
    let changes = diff(
        &context,
        &before,
        &after,
        &DiffOptions::any_index(2.0),
        word_distance,
    )
    .unwrap();

    let mut before_positions: Vec<usize> =
        changes.changes().filter_map(Diff::before_position).collect();
    let mut after_positions: Vec<usize> =
        changes.changes().filter_map(Diff::after_position).collect();
    before_positions.sort_unstable();
    after_positions.sort_unstable();
    assert_eq!(before_positions, vec![0, 1, 2, 3]);
    assert_eq!(after_positions, vec![0, 1, 2, 3]);
}

// =============================================================================
// Matching rules
// =============================================================================

#[rstest]
fn test_index_predicate_rejects_pairs() {
    let context = ExecutionContext::new();
    let before = vec!["same", "other"];
    let after = vec!["other", "same"];
    let same_slot = DiffOptions::new(10.0, |left: &usize, right: &usize| left == right);
    let exact = |left: &IndexedValue<usize, &str>, right: &IndexedValue<usize, &str>| -> Result<f64, Error> {
        Ok(if left.value == right.value { 0.0 } else { 3.0 })
    };

    let changes = diff(&context, &before, &after, &same_slot, exact).unwrap();

    let kinds: Vec<DiffType> = changes.changes().map(Diff::kind).collect();
    assert_eq!(kinds, vec![DiffType::MODIFY, DiffType::MODIFY]);
    for change in changes.changes() {
        assert_eq!(change.before_position(), change.after_position());
    }
}

#[rstest]
fn test_unchanged_elements_report_none() {
    let context = ExecutionContext::new();
    let words = vec!["one", "two"];
    let changes = diff(&context, &words, &words, &DiffOptions::any_index(0.0), word_distance).unwrap();
    assert_eq!(changes.count(DiffType::NONE), 2);
    assert_eq!(changes.count(DiffType::ALL), 2);
}

#[rstest]
fn test_distance_error_aborts() {
    let context = ExecutionContext::new();
    let failing = |_: &IndexedValue<usize, i32>, _: &IndexedValue<usize, i32>| -> Result<f64, Error> {
        Err(Error::distance("incomparable"))
    };
    let result = diff(&context, &vec![1], &vec![2], &DiffOptions::any_index(1.0), failing);
    assert_eq!(result.unwrap_err(), Error::distance("incomparable"));
}

#[rstest]
fn test_input_errors_propagate() {
    let context = ExecutionContext::new();
    let broken = ixseq::collection::generate(|context, visitor| {
        ixseq::sequence::emit(context, visitor, Ok(IndexedValue::new(0_usize, 1)))?;
        ixseq::sequence::emit(context, visitor, Err(Error::element("truncated")))
    });
    let gap = |left: &IndexedValue<usize, i32>, right: &IndexedValue<usize, i32>| -> Result<f64, Error> {
        Ok(f64::from(right.value - left.value))
    };
    let result = diff(&context, &broken, &vec![1], &DiffOptions::any_index(1.0), gap);
    assert_eq!(result.unwrap_err(), Error::element("truncated"));
}

#[rstest]
fn test_cancelled_context_aborts() {
    let token = CancellationToken::new();
    token.cancel();
    let context = ExecutionContext::new().with_cancellation(token);
    let result = diff(
        &context,
        &vec!["a"],
        &vec!["b"],
        &DiffOptions::any_index(1.0),
        word_distance,
    );
    assert!(result.unwrap_err().is_cancellation());
}

#[rstest]
fn test_iteration_can_be_cancelled_midway(before: Vec<&'static str>, after: Vec<&'static str>) {
    let changes = diff(
        &ExecutionContext::new(),
        &before,
        &after,
        &DiffOptions::any_index(2.0),
        word_distance,
    )
    .unwrap();

    let token = CancellationToken::new();
    let context = ExecutionContext::new().with_cancellation(token.clone());
    let mut seen = Vec::new();
    let flow = changes.iterate(&context, &mut |element| {
        seen.push(element.is_ok());
        token.cancel();
        ControlFlow::Continue(())
    });

    assert!(flow.is_break());
    assert_eq!(seen, vec![true, false]);
}

// =============================================================================
// Rewrite
// =============================================================================

#[rstest]
fn test_rewrite_with_everything_passing_through_drops_removals(
    before: Vec<&'static str>,
    after: Vec<&'static str>,
) {
    let context = ExecutionContext::new();
    let changes = diff(
        &context,
        &before,
        &after,
        &DiffOptions::any_index(2.0),
        word_distance,
    )
    .unwrap();

    let rewritten = changes
        .rewrite(&context, |_, _| Err(Error::element("never routed")))
        .unwrap();
    let values: Vec<&str> = rewritten.iter().map(|element| element.value).collect();
    assert_eq!(values, after);
}

#[rstest]
fn test_rewrite_can_reject_modifications(before: Vec<&'static str>, after: Vec<&'static str>) {
    let context = ExecutionContext::new();
    let options = DiffOptions::any_index(2.0).filter(DiffType::ADD | DiffType::NONE);
    let changes = diff(&context, &before, &after, &options, word_distance).unwrap();

    let rewritten = changes
        .rewrite(&context, |change, value| {
            Ok(change.before_value().copied().or(value))
        })
        .unwrap();
    let values: Vec<&str> = rewritten.iter().map(|element| element.value).collect();
    assert_eq!(values, vec!["gamma", "alpha", "epsilon", "alpha"]);
}

#[rstest]
fn test_length_matches_record_count(before: Vec<&'static str>, after: Vec<&'static str>) {
    let context = ExecutionContext::new();
    let changes = diff(
        &context,
        &before,
        &after,
        &DiffOptions::any_index(2.0),
        word_distance,
    )
    .unwrap();
    assert_eq!(changes.length(&context), Ok(changes.len()));
    assert_eq!(changes.len(), 6);
}
