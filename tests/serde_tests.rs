#![cfg(feature = "serde")]

//! Integration tests for serde support in ixseq.
//!
//! These tests verify that elements, change records and change masks
//! serialize and deserialize with serde_json.

use ixseq::sequence::IndexedValue;
use rstest::rstest;

// =============================================================================
// IndexedValue Integration Tests
// =============================================================================

#[rstest]
fn test_indexed_value_json_shape() {
    let element = IndexedValue::new("kiwi", 3);
    let json = serde_json::to_value(&element).unwrap();
    assert_eq!(json, serde_json::json!({ "index": "kiwi", "value": 3 }));
}

#[rstest]
fn test_indexed_value_json_roundtrip() {
    let element = IndexedValue::new(7_usize, vec!['a', 'b']);
    let json = serde_json::to_string(&element).unwrap();
    let restored: IndexedValue<usize, Vec<char>> = serde_json::from_str(&json).unwrap();
    assert_eq!(element, restored);
}

// =============================================================================
// Diff Integration Tests
// =============================================================================

#[cfg(feature = "diff")]
mod diff {
    use super::*;
    use ixseq::diff::{Diff, DiffType};

    #[rstest]
    #[case(DiffType::ADD, "1")]
    #[case(DiffType::ADD | DiffType::MODIFY, "5")]
    #[case(DiffType::ALL, "15")]
    fn test_diff_type_serializes_as_bits(#[case] kind: DiffType, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        let restored: DiffType = serde_json::from_str(expected).unwrap();
        assert_eq!(restored, kind);
    }

    #[rstest]
    fn test_removed_record_json_shape() {
        let record: Diff<usize, String> = Diff::removed(IndexedValue::new(2, "delta".to_owned()), 2);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["before_value"], "delta");
        assert_eq!(json["after_index"], serde_json::Value::Null);
        assert_eq!(json["kind"], 2);
    }

    #[rstest]
    fn test_modified_record_json_roundtrip() {
        let record = Diff::modified(IndexedValue::new(0_u32, "alpha".to_owned()), 0, 1, 1, 2.0);
        let json = serde_json::to_string(&record).unwrap();
        let restored: Diff<u32, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }
}
