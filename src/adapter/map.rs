use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::ops::ControlFlow;

use crate::collection::Collection;
use crate::context::ExecutionContext;
use crate::error::Error;
use crate::sequence::{Element, IndexedValue, Visitor, emit};

fn entry<K: Clone, V: Clone>(key: &K, value: &V) -> Element<K, V> {
    Ok(IndexedValue::new(key.clone(), value.clone()))
}

impl<K, V> Collection for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    type Index = K;
    type Value = V;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<K, V>>,
    ) -> ControlFlow<()> {
        for (key, value) in self {
            emit(context, visitor, entry(key, value))?;
        }
        ControlFlow::Continue(())
    }

    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &K,
        visitor: &mut Visitor<'_, Element<K, V>>,
    ) -> ControlFlow<()> {
        match self.get_key_value(index) {
            Some((key, value)) => emit(context, visitor, entry(key, value)),
            None => ControlFlow::Continue(()),
        }
    }

    fn ix_equals(&self, left: &K, right: &K) -> bool {
        left == right
    }

    fn length(&self, _context: &ExecutionContext) -> Result<usize, Error> {
        Ok(self.len())
    }
}

/// Entries are sorted by key on every traversal, costing `O(n log n)` before
/// the first element is yielded.
impl<K, V, S> Collection for HashMap<K, V, S>
where
    K: Ord + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    type Index = K;
    type Value = V;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<K, V>>,
    ) -> ControlFlow<()> {
        let mut sorted: Vec<(&K, &V)> = self.iter().collect();
        sorted.sort_unstable_by(|left, right| left.0.cmp(right.0));
        for (key, value) in sorted {
            emit(context, visitor, entry(key, value))?;
        }
        ControlFlow::Continue(())
    }

    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &K,
        visitor: &mut Visitor<'_, Element<K, V>>,
    ) -> ControlFlow<()> {
        match self.get_key_value(index) {
            Some((key, value)) => emit(context, visitor, entry(key, value)),
            None => ControlFlow::Continue(()),
        }
    }

    fn ix_equals(&self, left: &K, right: &K) -> bool {
        left == right
    }

    fn length(&self, _context: &ExecutionContext) -> Result<usize, Error> {
        Ok(self.len())
    }
}
