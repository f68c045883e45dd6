//! Ranking and greedy matching.

use std::cmp::Ordering;
use std::ops::ControlFlow;

use tracing::{debug, trace};

use super::{Diff, DiffCollection, DiffOptions, DiffType, Distance};
use crate::collection::{Collection, materialize_with_capacity};
use crate::context::ExecutionContext;
use crate::error::Error;
use crate::ordering::PartialHeapSort;
use crate::sequence::{IndexedValue, LazySequence, from_values};

/// A scored before/after pair.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    before: usize,
    after: usize,
    distance: f64,
}

impl Candidate {
    /// Ascending by distance, then by before position, then by after
    /// position.
    fn rank(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.before.cmp(&other.before))
            .then(self.after.cmp(&other.after))
    }
}

#[allow(clippy::unnecessary_wraps)]
fn candidate_less(left: &Candidate, right: &Candidate) -> Result<bool, Error> {
    Ok(left.rank(right).is_lt())
}

/// What an after position was matched with.
#[derive(Debug, Clone, Copy)]
struct Match {
    before: usize,
    distance: f64,
    kind: DiffType,
}

/// Computes the changes turning `before` into `after`.
///
/// Both inputs are materialized, every before/after pair is scored with
/// `distance`, and pairs are consumed closest first:
///
/// - a pair with an already matched side, or whose indices fail the
///   options' index predicate, is skipped;
/// - distance `0` is [`NONE`](DiffType::NONE), or
///   [`MODIFY`](DiffType::MODIFY) when position changes are detected and the
///   positions differ;
/// - any other distance up to the threshold is `MODIFY`;
/// - matching stops at the first pair beyond the threshold, or once every
///   after element has a match.
///
/// Unmatched before elements become [`REMOVE`](DiffType::REMOVE) records and
/// unmatched after elements [`ADD`](DiffType::ADD) records. Records are
/// ordered by position: for each position, the removal of the before element
/// there (if any) comes first, followed by the record of the after element
/// there.
///
/// Ranking runs through [`PartialHeapSort`], so it stops paying for
/// comparisons as soon as matching stops.
///
/// # Errors
///
/// - the first element error of either input;
/// - the first distance error, or [`Error::Distance`] for a `NaN` distance;
/// - a cancellation error from the context.
///
/// # Examples
///
/// ```rust
/// use ixseq::context::ExecutionContext;
/// use ixseq::diff::{DiffOptions, DiffType, diff};
/// use ixseq::error::Error;
/// use ixseq::sequence::IndexedValue;
///
/// let context = ExecutionContext::new();
/// let before = vec![10, 20, 30];
/// let after = vec![10, 21, 99];
/// let gap = |left: &IndexedValue<usize, i32>, right: &IndexedValue<usize, i32>| -> Result<f64, Error> {
///     Ok(f64::from(right.value - left.value))
/// };
///
/// let changes = diff(&context, &before, &after, &DiffOptions::any_index(1.0), gap).unwrap();
/// let kinds: Vec<DiffType> = changes.iter().map(|record| record.index.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![DiffType::NONE, DiffType::MODIFY, DiffType::REMOVE, DiffType::ADD]
/// );
/// ```
pub fn diff<B, F, D>(
    context: &ExecutionContext,
    before: &B,
    after: &F,
    options: &DiffOptions<B::Index>,
    distance: D,
) -> Result<DiffCollection<B::Index, B::Value>, Error>
where
    B: Collection + ?Sized,
    F: Collection<Index = B::Index, Value = B::Value> + ?Sized,
    D: Distance<B::Index, B::Value>,
{
    let before = materialize_with_capacity(context, before, options.capacity())?.into_vec();
    let after = materialize_with_capacity(context, after, options.capacity())?.into_vec();

    let candidates = score(context, &before, &after, &distance)?;
    let candidate_count = candidates.len();
    let matches = match_greedily(context, &before, &after, candidates, options)?;

    let matched = matches.iter().flatten().count();
    debug!(
        before = before.len(),
        after = after.len(),
        candidates = candidate_count,
        matched,
        "diff ranked"
    );

    let records = emit_by_position(before, after, &matches);
    Ok(DiffCollection::new(records, options.clone()))
}

fn score<I, A, D>(
    context: &ExecutionContext,
    before: &[IndexedValue<I, A>],
    after: &[IndexedValue<I, A>],
    distance: &D,
) -> Result<Vec<Candidate>, Error>
where
    D: Distance<I, A>,
{
    let mut candidates = Vec::with_capacity(before.len().saturating_mul(after.len()));
    for (before_position, left) in before.iter().enumerate() {
        context.check()?;
        for (after_position, right) in after.iter().enumerate() {
            let value = distance.distance(context, left, right)?.abs();
            if value.is_nan() {
                return Err(Error::distance(format!(
                    "distance between positions {before_position} and {after_position} is NaN"
                )));
            }
            candidates.push(Candidate {
                before: before_position,
                after: after_position,
                distance: value,
            });
        }
    }
    Ok(candidates)
}

/// Returns, for each after position, the before element it was paired with.
fn match_greedily<I, A>(
    context: &ExecutionContext,
    before: &[IndexedValue<I, A>],
    after: &[IndexedValue<I, A>],
    candidates: Vec<Candidate>,
    options: &DiffOptions<I>,
) -> Result<Vec<Option<Match>>, Error> {
    let mut matches: Vec<Option<Match>> = vec![None; after.len()];
    if candidates.is_empty() {
        return Ok(matches);
    }
    let mut before_taken = vec![false; before.len()];
    let mut matched = 0_usize;
    let mut failure = None;

    let capacity = candidates.len();
    let ranked = PartialHeapSort::new(from_values(candidates), candidate_less)
        .with_capacity_hint(capacity);
    let _ = ranked.visit(context, &mut |item| {
        let candidate = match item {
            Ok(candidate) => candidate,
            Err(error) => {
                failure = Some(error);
                return ControlFlow::Break(());
            }
        };
        if before_taken[candidate.before] || matches[candidate.after].is_some() {
            return ControlFlow::Continue(());
        }
        if !options.indices_match(&before[candidate.before].index, &after[candidate.after].index)
        {
            return ControlFlow::Continue(());
        }
        if candidate.distance > options.threshold() {
            trace!(
                distance = candidate.distance,
                threshold = options.threshold(),
                "threshold reached"
            );
            return ControlFlow::Break(());
        }
        let moved =
            options.is_detecting_position_change() && candidate.before != candidate.after;
        let kind = if candidate.distance > 0.0 || moved {
            DiffType::MODIFY
        } else {
            DiffType::NONE
        };
        before_taken[candidate.before] = true;
        matches[candidate.after] = Some(Match {
            before: candidate.before,
            distance: candidate.distance,
            kind,
        });
        matched += 1;
        if matched == after.len() {
            debug!(matched, "every after element matched");
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    failure.map_or(Ok(matches), Err)
}

type Record<I, A> = IndexedValue<Diff<I, A>, Option<A>>;

fn emit_by_position<I, A>(
    before: Vec<IndexedValue<I, A>>,
    after: Vec<IndexedValue<I, A>>,
    matches: &[Option<Match>],
) -> Vec<Record<I, A>> {
    let span = before.len().max(after.len());
    let mut pending_before: Vec<Option<IndexedValue<I, A>>> = before.into_iter().map(Some).collect();
    let mut removed = vec![true; pending_before.len()];
    for found in matches.iter().flatten() {
        removed[found.before] = false;
    }

    let mut records = Vec::with_capacity(pending_before.len() + after.len());
    let mut after = after.into_iter();
    for position in 0..span {
        if removed.get(position).copied().unwrap_or(false)
            && let Some(element) = pending_before[position].take()
        {
            records.push(IndexedValue::new(Diff::removed(element, position), None));
        }
        let Some(element) = after.next() else {
            continue;
        };
        let (index, value) = element.into_pair();
        let record = match matches[position] {
            None => Diff::added(index, position),
            Some(found) => {
                let Some(partner) = pending_before[found.before].take() else {
                    unreachable!("before position {} matched twice", found.before)
                };
                if found.kind == DiffType::MODIFY {
                    Diff::modified(partner, found.before, index, position, found.distance)
                } else {
                    Diff::unchanged(partner, found.before, index, position)
                }
            }
        };
        records.push(IndexedValue::new(record, Some(value)));
    }
    records
}
