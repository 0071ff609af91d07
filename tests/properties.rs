//! Property-based tests for chain operations.
//!
//! These tests use proptest to verify the mutation and merge rules hold
//! across randomly generated chains.

use std::collections::HashMap;

use proptest::prelude::*;

use jsonchain::{Chain, ChainError};

/// Strategy for generating keys, including unicode and escapes.
fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        "[a-zA-Z0-9_\\-\\. ]{0,12}",
        "\\PC{0,6}",
        Just("quote\"and\\slash".to_string()),
    ]
}

/// Strategy for generating chains of string values.
fn chain() -> impl Strategy<Value = Chain<String, String>> {
    prop::collection::hash_map(key(), "\\PC{0,16}", 0..16).prop_map(Chain::from)
}

/// Strategy for generating chains of integer values.
fn int_chain() -> impl Strategy<Value = Chain<String, i64>> {
    prop::collection::hash_map(key(), any::<i64>(), 0..16).prop_map(Chain::from)
}

proptest! {
    /// A set value can always be read back.
    #[test]
    fn set_then_get(k in key(), v in "\\PC{0,16}") {
        prop_assert_eq!(Chain::<String, String>::new().set(k.clone(), v.clone()).get(&k), v);
    }

    /// set_with_error claims fresh keys once and never overwrites.
    #[test]
    fn set_with_error_never_overwrites(mut c in chain(), k in key(), v1 in ".*", v2 in ".*") {
        c.remove(&k);
        prop_assert!(c.set_with_error(k.clone(), v1.clone()).is_ok());
        prop_assert_eq!(c.get(&k), v1.clone());

        let result = c.set_with_error(k.clone(), v2);
        prop_assert_eq!(result.err(), Some(ChainError::KeyAlreadyExist(k.clone())));
        prop_assert_eq!(c.get(&k), v1);
    }

    /// Clones are equal and independent.
    #[test]
    fn clone_is_equal_and_detached(c in chain(), k in key(), v in ".*") {
        let original = c.clone();
        let mut clone = c.clone();
        prop_assert!(c.equal(&clone));

        clone.set(k.clone(), format!("{}-changed", v));
        prop_assert_eq!(clone.get(&k), format!("{}-changed", v));
        prop_assert!(c.equal(&original));
        prop_assert_eq!(c.get(&k), original.get(&k));
    }

    /// to_json then load_from_bytes reproduces the chain.
    #[test]
    fn json_round_trip(c in chain(), n in int_chain()) {
        let mut restored: Chain<String, String> = Chain::new();
        restored.load_from_bytes(c.to_json().unwrap().as_bytes()).unwrap();
        prop_assert_eq!(&restored, &c);

        let mut restored: Chain<String, i64> = Chain::new();
        restored.load_from_bytes(&n.to_json().unwrap()).unwrap();
        prop_assert_eq!(&restored, &n);
    }

    /// Pretty output decodes to the same chain.
    #[test]
    fn pretty_round_trip(c in int_chain()) {
        let pretty = c.to_json().unwrap().pretty();
        let mut restored: Chain<String, i64> = Chain::new();
        restored.load_from_bytes(pretty.as_bytes()).unwrap();
        prop_assert_eq!(restored, c);
    }

    /// append keeps existing values, copy replaces them.
    #[test]
    fn merge_policies(base in int_chain(), addend in int_chain()) {
        let mut appended = base.clone();
        appended.append(&addend);

        let mut copied = base.clone();
        copied.copy(&addend);

        let mut expected_append: HashMap<String, i64> = addend.clone().into_inner();
        expected_append.extend(base.clone());
        let mut expected_copy: HashMap<String, i64> = base.clone().into_inner();
        expected_copy.extend(addend.clone());

        prop_assert_eq!(appended, Chain::from(expected_append));
        prop_assert_eq!(copied.clone(), Chain::from(expected_copy));

        // append_from_bytes follows decode semantics: incoming keys win
        let mut decoded = base.clone();
        decoded.append_from_bytes(addend.to_json().unwrap().as_bytes()).unwrap();
        prop_assert_eq!(decoded, copied);
    }

    /// clear leaves nothing behind.
    #[test]
    fn clear_empties(mut c in int_chain(), k in key()) {
        prop_assert!(c.clear().is_empty());
        prop_assert_eq!(c.get(&k), 0);
        prop_assert!(c.get_with_error(&k).is_err());
    }
}
