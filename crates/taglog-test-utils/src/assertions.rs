// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 TagLog Contributors

//! Custom test assertions for TagLog tests.
//!
//! Provides record- and tag-level assertions over a [`CaptureSink`].

use taglog::{Level, TagValue};

use crate::capture::{CaptureSink, CapturedRecord};

/// Assert that exactly one record was captured and return it.
pub fn assert_single_record(sink: &CaptureSink) -> CapturedRecord {
    let records = sink.records();
    assert_eq!(
        records.len(),
        1,
        "expected exactly one record, got {}",
        records.len()
    );
    records.into_iter().next().expect("record present")
}

/// Assert that some captured record matches `level` and `message`.
pub fn assert_logged(sink: &CaptureSink, level: Level, message: &str) {
    assert!(
        sink.records()
            .iter()
            .any(|r| r.level == level && r.message == message),
        "no {} record with message {:?} captured",
        level,
        message
    );
}

/// Assert that a record carries a tag with the expected value.
pub fn assert_tag(record: &CapturedRecord, key: &str, expected: impl Into<TagValue>) {
    let expected = expected.into();
    match record.tags.get(key) {
        Some(actual) => assert_eq!(
            actual, &expected,
            "tag {:?} is {:?}, expected {:?}",
            key, actual, expected
        ),
        None => panic!("tag {:?} missing from record {:?}", key, record),
    }
}

/// Assert that a record carries no tag with the given key.
pub fn assert_no_tag(record: &CapturedRecord, key: &str) {
    assert!(
        !record.tags.contains_key(key),
        "unexpected tag {:?} in record {:?}",
        key,
        record
    );
}

/// Assert a record's level, message and exact tag map in one shot.
#[macro_export]
macro_rules! assert_record {
    ($record:expr, $level:expr, $msg:expr, { $($key:expr => $value:expr),* $(,)? }) => {{
        let record = &$record;
        assert_eq!(record.level, $level, "record level mismatch");
        assert_eq!(record.message, $msg, "record message mismatch");
        let expected = taglog::tags! { $($key => $value),* };
        assert_eq!(record.tags, expected, "record tags mismatch");
    }};
}
