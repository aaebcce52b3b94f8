use std::collections::BTreeMap;

use avlmap::{AvlTreeMap, Reverse};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u16),
    Remove(u8),
    PopFirst,
    PopLast,
    RemoveRange(u8, u8),
    Retain(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => any::<u8>().prop_map(Op::Remove),
        1 => Just(Op::PopFirst),
        1 => Just(Op::PopLast),
        1 => (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::RemoveRange(a.min(b), a.max(b))),
        1 => (2..8u8).prop_map(Op::Retain),
    ]
}

fn apply(map: &mut AvlTreeMap<u8, u16>, model: &mut BTreeMap<u8, u16>, op: &Op) {
    match *op {
        Op::Insert(key, value) => {
            let (pos, inserted) = map.insert(key, value);
            assert_eq!(inserted, !model.contains_key(&key));
            let expected = *model.entry(key).or_insert(value);
            assert_eq!(map.entry_at(pos), Some((&key, &expected)));
        }
        Op::Remove(key) => assert_eq!(map.remove(&key), model.remove(&key)),
        Op::PopFirst => assert_eq!(map.pop_first(), model.pop_first()),
        Op::PopLast => assert_eq!(map.pop_last(), model.pop_last()),
        Op::RemoveRange(low, high) => {
            let (first, last) = (map.lower_bound(&low), map.lower_bound(&high));
            let doomed: Vec<u8> = model.range(low..high).map(|(&key, _)| key).collect();
            assert_eq!(map.remove_range(first, last), doomed.len());
            for key in doomed {
                model.remove(&key);
            }
        }
        Op::Retain(modulus) => {
            map.retain(|&key, _| key % modulus != 0);
            model.retain(|&key, _| key % modulus != 0);
        }
    }
}

proptest! {
    #[test]
    fn prop_matches_btree_map(ops in prop::collection::vec(op(), 0..200)) {
        let mut map = AvlTreeMap::new();
        let mut model = BTreeMap::new();
        for op in &ops {
            apply(&mut map, &mut model, op);
            prop_assert_eq!(map.len(), model.len());
            prop_assert_eq!(map.first_key_value(), model.first_key_value());
            prop_assert_eq!(map.last_key_value(), model.last_key_value());
        }
        prop_assert!(map.iter().eq(model.iter()));
        prop_assert!(map.iter().rev().eq(model.iter().rev()));
    }

    #[test]
    fn prop_sorted_and_balanced(keys in prop::collection::vec(any::<i32>(), 0..500)) {
        let map: AvlTreeMap<_, _> = keys.iter().map(|&key| (key, ())).collect();
        let collected: Vec<i32> = map.keys().copied().collect();
        prop_assert!(collected.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(collected.len(), map.len());

        // An AVL tree with n nodes is at most ~1.44 log2(n) high
        let bound = (1.45 * ((map.len() + 2) as f64).log2()) as usize;
        prop_assert!(map.height() <= bound);
    }

    #[test]
    fn prop_bounds(keys in prop::collection::btree_set(any::<i16>(), 0..100), probe: i16) {
        let map: AvlTreeMap<_, _> = keys.iter().map(|&key| (key, ())).collect();
        let lower = map.entry_at(map.lower_bound(&probe)).map(|(&key, _)| key);
        let upper = map.entry_at(map.upper_bound(&probe)).map(|(&key, _)| key);
        prop_assert_eq!(lower, keys.range(probe..).next().copied());
        prop_assert_eq!(upper, keys.range((std::ops::Bound::Excluded(probe), std::ops::Bound::Unbounded)).next().copied());
    }

    #[test]
    fn prop_positions_ring(keys in prop::collection::btree_set(any::<u8>(), 0..64)) {
        let map: AvlTreeMap<_, _> = keys.iter().map(|&key| (key, ())).collect();
        let mut pos = map.end();
        let mut forward = Vec::new();
        loop {
            pos = map.successor(pos);
            if pos.is_end() {
                break;
            }
            forward.push(*map.entry_at(pos).unwrap().0);
        }
        prop_assert!(forward.iter().eq(keys.iter()));

        let mut backward = Vec::new();
        loop {
            pos = map.predecessor(pos);
            if pos == map.end() {
                break;
            }
            backward.push(*map.entry_at(pos).unwrap().0);
        }
        prop_assert!(backward.iter().eq(keys.iter().rev()));
    }

    #[test]
    fn prop_reverse_order(keys in prop::collection::vec(any::<u8>(), 0..100)) {
        let mut map = AvlTreeMap::with_comparator(Reverse);
        for &key in &keys {
            map.insert(key, ());
        }
        let mut expected: Vec<u8> = keys.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        expected.dedup();
        prop_assert!(map.keys().copied().eq(expected));
    }
}
