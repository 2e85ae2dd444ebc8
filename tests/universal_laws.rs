//! Property-based tests for invariants that should hold across every
//! pattern: round-tripping slices, index normalization, and membership
//! agreeing with the compiled matcher. Generation strategy follows
//! `proptest`'s own regex-structure walk in its string-generation support.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use proptest::prelude::*;
use rexseq::{Options, RegexSequence};

fn small_patterns() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("ab".to_string()),
        Just("a|b".to_string()),
        Just("a|b|c".to_string()),
        Just("[abc]".to_string()),
        Just("a[bc]d".to_string()),
        Just("a{0,3}".to_string()),
        Just("a{2,4}b".to_string()),
        Just("(ab)+".to_string()),
        Just("x|[a-c]{1,3}".to_string()),
    ]
}

proptest! {
    #[test]
    fn every_produced_string_fully_matches_the_pattern(pattern in small_patterns()) {
        let seq = RegexSequence::new(&pattern, &Options::default()).unwrap();
        let len = seq.len();
        let sample_len = num_bigint::BigUint::from(20u32).min(len.clone());
        let sample: u64 = sample_len.to_u64().unwrap_or(20);
        for i in 0..sample {
            let s = seq.get(&BigInt::from(i)).unwrap();
            prop_assert!(seq.contains(&s), "{:?} produced {:?}, not matched by itself", pattern, s);
        }
    }

    #[test]
    fn len_matches_iteration_count(pattern in small_patterns()) {
        let seq = RegexSequence::new(&pattern, &Options::default()).unwrap();
        let len = seq.len();
        if let Some(small) = len.to_u64() {
            if small <= 200 {
                prop_assert_eq!(seq.iter().count() as u64, small);
            }
        }
    }
}
