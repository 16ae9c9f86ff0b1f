#![allow(clippy::uninlined_format_args)]

use proptest::prelude::*;
use std::fs;
use ulog::{Handle, Severity};

// =============================================================================
// Filtering properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn less_urgent_messages_produce_nothing(
        threshold in -1000i32..1000,
        delta in 1i32..1000,
        message in ".{0,64}",
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.log");
        let log = Handle::open_path(&path, Severity::unnamed(threshold)).unwrap();

        let written = log.write_str(&Severity::new(threshold + delta, "LOW"), &message).unwrap();
        log.close().unwrap();

        prop_assert_eq!(written, 0);
        prop_assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn admitted_messages_produce_exactly_one_line(
        threshold in -1000i32..1000,
        delta in 0i32..1000,
        name in "[A-Z]{1,8}",
        message in "[^\n\r]{0,64}",
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admitted.log");
        let log = Handle::open_path(&path, Severity::unnamed(threshold)).unwrap();

        let severity = Severity::named(threshold - delta, name.clone());
        let written = log.write_str(&severity, &message).unwrap();
        log.close().unwrap();

        let expected = format!("{}: {}\n", name, message);
        prop_assert_eq!(written, expected.len());
        prop_assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn admits_matches_rank_comparison(threshold in any::<i32>(), rank in any::<i32>()) {
        let t = Severity::unnamed(threshold);
        prop_assert_eq!(t.admits(&Severity::unnamed(rank)), rank <= threshold);
    }
}

// =============================================================================
// Line count properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn line_count_matches_admitted_writes(ranks in prop::collection::vec(0i32..6, 0..40)) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("count.log");
        let log = Handle::open_path(&path, Severity::INFO).unwrap();

        let mut expected = 0usize;
        for (i, rank) in ranks.iter().enumerate() {
            let written = log.write_str(&Severity::unnamed(*rank), &i.to_string()).unwrap();
            if *rank <= Severity::INFO.rank() {
                expected += 1;
                prop_assert!(written > 0);
            } else {
                prop_assert_eq!(written, 0);
            }
        }
        log.close().unwrap();

        prop_assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), expected);
    }
}
