use std::ops::ControlFlow;

use crate::collection::Collection;
use crate::context::ExecutionContext;
use crate::error::Error;
use crate::sequence::{Element, IndexedValue, Visitor, emit};

impl<A: Clone> Collection for [A] {
    type Index = usize;
    type Value = A;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<usize, A>>,
    ) -> ControlFlow<()> {
        for (position, value) in self.iter().enumerate() {
            emit(context, visitor, Ok(IndexedValue::new(position, value.clone())))?;
        }
        ControlFlow::Continue(())
    }

    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &usize,
        visitor: &mut Visitor<'_, Element<usize, A>>,
    ) -> ControlFlow<()> {
        match self.get(*index) {
            Some(value) => emit(context, visitor, Ok(IndexedValue::new(*index, value.clone()))),
            None => ControlFlow::Continue(()),
        }
    }

    fn ix_equals(&self, left: &usize, right: &usize) -> bool {
        left == right
    }

    fn length(&self, _context: &ExecutionContext) -> Result<usize, Error> {
        Ok(self.len())
    }
}

impl<A: Clone> Collection for Vec<A> {
    type Index = usize;
    type Value = A;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<usize, A>>,
    ) -> ControlFlow<()> {
        self.as_slice().iterate(context, visitor)
    }

    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &usize,
        visitor: &mut Visitor<'_, Element<usize, A>>,
    ) -> ControlFlow<()> {
        self.as_slice().index_get(context, index, visitor)
    }

    fn ix_equals(&self, left: &usize, right: &usize) -> bool {
        left == right
    }

    fn length(&self, _context: &ExecutionContext) -> Result<usize, Error> {
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionExt;
    use crate::context::CancellationToken;
    use rstest::rstest;

    fn lookup<C: Collection + ?Sized>(
        collection: &C,
        context: &ExecutionContext,
        index: &C::Index,
    ) -> Vec<Element<C::Index, C::Value>> {
        let mut found = Vec::new();
        let _ = collection.index_get(context, index, &mut |element| {
            found.push(element);
            ControlFlow::Continue(())
        });
        found
    }

    #[rstest]
    fn test_vec_yields_positions() {
        let context = ExecutionContext::new();
        let elements = CollectionExt::to_vec(&vec!["a", "b"], &context).unwrap();
        assert_eq!(
            elements,
            vec![IndexedValue::new(0, "a"), IndexedValue::new(1, "b")]
        );
    }

    #[rstest]
    #[case(0, vec![Ok(IndexedValue::new(0, 'p'))])]
    #[case(2, vec![Ok(IndexedValue::new(2, 'r'))])]
    #[case(3, vec![])]
    fn test_slice_index_get(#[case] index: usize, #[case] expected: Vec<Element<usize, char>>) {
        let letters: &[char] = &['p', 'q', 'r'];
        assert_eq!(lookup(letters, &ExecutionContext::new(), &index), expected);
    }

    #[rstest]
    fn test_length_is_constant_time_and_exact() {
        let context = ExecutionContext::new();
        assert_eq!(Vec::<u8>::new().length(&context), Ok(0));
        assert_eq!(vec![1, 2, 3].length(&context), Ok(3));
    }

    #[rstest]
    fn test_index_get_honours_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let context = ExecutionContext::new().with_cancellation(token);
        let found = lookup(&vec![7], &context, &0);
        assert_eq!(found.len(), 1);
        assert!(found[0].as_ref().unwrap_err().is_cancellation());
    }
}
