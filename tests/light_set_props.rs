use lightvisor::LightSet;
use proptest::prelude::*;

fn concrete() -> impl Strategy<Value = LightSet> {
    prop::collection::btree_set(1u32..40, 0..8).prop_map(LightSet::new)
}

fn any_set() -> impl Strategy<Value = LightSet> {
    prop_oneof![
        1 => Just(LightSet::All),
        6 => concrete(),
    ]
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in any_set(), b in any_set()) {
        prop_assert_eq!(a.overlaps_with(&b), b.overlaps_with(&a));
    }

    #[test]
    fn intersection_commutes(a in any_set(), b in any_set()) {
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    #[test]
    fn union_is_all_iff_either_is(a in any_set(), b in any_set()) {
        prop_assert_eq!(a.union(&b).is_all(), a.is_all() || b.is_all());
    }

    #[test]
    fn subtracting_then_intersecting_leaves_nothing(a in concrete(), b in concrete()) {
        let rest = a.subtract(&b).unwrap();
        prop_assert!(!rest.overlaps_with(&b));
        prop_assert!(rest.intersect(&b).is_none());
    }

    #[test]
    fn all_refuses_subtract_and_merge(other in any_set()) {
        prop_assert!(LightSet::All.subtract(&other).is_err());
        let mut all = LightSet::All;
        prop_assert!(all.merge(&other).is_err());
        prop_assert!(all.is_all());
    }

    #[test]
    fn text_round_trips(ids in prop::collection::btree_set(1u32..1000, 1..10)) {
        let set = LightSet::new(ids);
        let parsed: LightSet = set.to_string().parse().unwrap();
        prop_assert_eq!(parsed, set);
    }

    #[test]
    fn parsing_ignores_order_and_duplicates(mut ids in prop::collection::vec(1u32..50, 1..12)) {
        let text = ids.iter().map(u32::to_string).collect::<Vec<_>>().join(", ");
        let parsed: LightSet = text.parse().unwrap();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(parsed.ids(), Some(ids));
    }
}
