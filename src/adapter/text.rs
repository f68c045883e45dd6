use std::ops::ControlFlow;

use crate::collection::Collection;
use crate::context::ExecutionContext;
use crate::error::Error;
use crate::sequence::{Element, IndexedValue, Visitor, emit};

/// Indices are char positions, not byte offsets.
impl Collection for str {
    type Index = usize;
    type Value = char;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<usize, char>>,
    ) -> ControlFlow<()> {
        for (position, character) in self.chars().enumerate() {
            emit(context, visitor, Ok(IndexedValue::new(position, character)))?;
        }
        ControlFlow::Continue(())
    }

    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &usize,
        visitor: &mut Visitor<'_, Element<usize, char>>,
    ) -> ControlFlow<()> {
        match self.chars().nth(*index) {
            Some(character) => emit(context, visitor, Ok(IndexedValue::new(*index, character))),
            None => ControlFlow::Continue(()),
        }
    }

    fn ix_equals(&self, left: &usize, right: &usize) -> bool {
        left == right
    }

    fn length(&self, _context: &ExecutionContext) -> Result<usize, Error> {
        Ok(self.chars().count())
    }
}

impl Collection for String {
    type Index = usize;
    type Value = char;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<usize, char>>,
    ) -> ControlFlow<()> {
        self.as_str().iterate(context, visitor)
    }

    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &usize,
        visitor: &mut Visitor<'_, Element<usize, char>>,
    ) -> ControlFlow<()> {
        self.as_str().index_get(context, index, visitor)
    }

    fn ix_equals(&self, left: &usize, right: &usize) -> bool {
        left == right
    }

    fn length(&self, context: &ExecutionContext) -> Result<usize, Error> {
        self.as_str().length(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionExt;
    use rstest::rstest;

    #[rstest]
    #[case("", 0)]
    #[case("abc", 3)]
    #[case("naïve", 5)]
    fn test_length_counts_chars(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(text.length(&ExecutionContext::new()), Ok(expected));
        assert_eq!(text.to_owned().length(&ExecutionContext::new()), Ok(expected));
    }

    #[rstest]
    fn test_index_is_char_position() {
        let context = ExecutionContext::new();
        let mut found = Vec::new();
        let _ = "naïve".index_get(&context, &3, &mut |element| {
            found.push(element);
            ControlFlow::Continue(())
        });
        assert_eq!(found, vec![Ok(IndexedValue::new(3, 'v'))]);
    }

    #[rstest]
    fn test_string_views_compose() {
        let context = ExecutionContext::new();
        let vowels = String::from("rustacean")
            .filter(|element| "aeiou".contains(element.value))
            .to_vec(&context)
            .unwrap();
        let positions: Vec<usize> = vowels.iter().map(|element| element.index).collect();
        assert_eq!(positions, vec![1, 4, 6, 7]);
    }
}
