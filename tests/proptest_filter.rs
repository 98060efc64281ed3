//! Property-based tests for the primary type filter
//!
//! These tests check the ordering, deduplication and precedence
//! guarantees of the filter using randomized resource type names.

use azure_primary_types::filter::{resource_segment, Classification, FilterPolicy};
use proptest::prelude::*;
use std::collections::HashSet;

/// Generate a provider namespace like `Microsoft.Compute`
fn arb_namespace() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Microsoft.Compute".to_string()),
        Just("Microsoft.Network".to_string()),
        Just("Microsoft.Web".to_string()),
        Just("Microsoft.Cache".to_string()),
        "Microsoft\\.[A-Z][a-zA-Z]{2,12}",
    ]
}

/// Generate a resource segment, sometimes built from known pattern words
fn arb_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z]{1,20}",
        "[a-zA-Z]{1,10}/[a-zA-Z]{1,10}",
        Just("virtualMachines".to_string()),
        Just("virtualMachines/operations".to_string()),
        Just("servers/databases".to_string()),
        Just("locations".to_string()),
        Just("redisEnterprise".to_string()),
    ]
}

/// Generate a full resource type name, occasionally without a separator
fn arb_resource_type() -> impl Strategy<Value = String> {
    prop_oneof![
        9 => (arb_namespace(), arb_segment()).prop_map(|(ns, seg)| format!("{}/{}", ns, seg)),
        1 => "[a-zA-Z]{1,20}",
    ]
}

fn arb_resource_types() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_resource_type(), 0..200)
}

proptest! {
    /// Filtering the output again yields the same output
    #[test]
    fn filter_is_idempotent(names in arb_resource_types()) {
        let policy = FilterPolicy::default();
        let once = policy.apply(&names).types;
        let twice = policy.apply(&once).types;
        prop_assert_eq!(once, twice);
    }

    /// Output is strictly increasing, which also rules out duplicates
    #[test]
    fn output_is_sorted_and_unique(names in arb_resource_types()) {
        let types = FilterPolicy::default().apply(&names).types;
        for pair in types.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Duplicated input gives the same output as the deduplicated set
    #[test]
    fn duplicates_do_not_change_output(names in arb_resource_types()) {
        let policy = FilterPolicy::default();
        let set: HashSet<String> = names.iter().cloned().collect();
        let doubled: Vec<String> = names.iter().chain(names.iter()).cloned().collect();
        prop_assert_eq!(policy.apply(&set).types, policy.apply(&doubled).types);
    }

    /// Every output entry came from the input
    #[test]
    fn output_is_subset_of_input(names in arb_resource_types()) {
        let input: HashSet<&String> = names.iter().collect();
        for name in FilterPolicy::default().apply(&names).types {
            prop_assert!(input.contains(&name));
        }
    }

    /// Allow-listed names survive even when their segment hits a skip indicator
    #[test]
    fn allow_list_is_supreme(segment in "[a-z]{0,8}", skip in "[a-z]{1,4}") {
        let name = format!("Contoso.Test/{}{}", segment, skip);
        let policy = FilterPolicy::new([name.as_str()], [skip.as_str()], [segment.as_str()]);
        prop_assert_eq!(policy.classify(&name), Classification::Allowed);
        prop_assert_eq!(policy.apply(&vec![name.clone()]).types, vec![name]);
    }

    /// A segment containing both a skip indicator and an include pattern is excluded
    #[test]
    fn skip_precedes_include(prefix in "[a-z]{0,6}", include in "[a-z]{1,6}", skip in "[a-z]{1,6}") {
        let name = format!("Contoso.Test/{}{}{}", prefix, include, skip);
        let policy = FilterPolicy::new(Vec::<&str>::new(), [skip.as_str()], [include.as_str()]);
        prop_assert!(!policy.is_primary(&name));
    }

    /// Heuristics only ever look at the segment after the first separator
    #[test]
    fn namespace_does_not_affect_heuristics(ns in "[A-Za-z.]{1,20}", segment in "[a-zA-Z/]{0,20}") {
        let policy = FilterPolicy::default();
        let name = format!("{}/{}", ns, segment);
        prop_assert_eq!(resource_segment(&name), segment.as_str());
        if !policy.allow_list.contains(&name) {
            let other = format!("Other.Namespace/{}", segment);
            if !policy.allow_list.contains(&other) {
                prop_assert_eq!(policy.classify(&name), policy.classify(&other));
            }
        }
    }

    /// Case of the input does not change the heuristic verdict
    #[test]
    fn heuristics_are_case_insensitive(segment in "[a-zA-Z]{1,20}") {
        let policy = FilterPolicy::new(Vec::<&str>::new(), ["operations"], ["servers"]);
        let lower = format!("X.Y/{}", segment.to_lowercase());
        let upper = format!("X.Y/{}", segment.to_uppercase());
        prop_assert_eq!(policy.classify(&lower), policy.classify(&upper));
    }
}
