#![cfg(test)]

// Property tests for SymTable kept inside the crate so they can check the
// structural invariants through crate-private accessors.

use crate::hash::KeyHasher;
use crate::sym_table::{PutOutcome, SymTable};
use crate::SymTableBuilder;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, usize),
    Remove(usize),
    Take(usize),
    Get(usize),
    Contains(String),
    Iterate,
    Stats,
}

// Values live in a fixed arena so the table can borrow them for the whole case.
static VALUES: [i32; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), 0..VALUES.len()).prop_map(|(i, v)| OpI::Put(i, v)),
            1 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Take),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Stats),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives `sut` and a BTreeMap model through the same operations.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected and keep the first value.
// - `get`/`contains` agree with the model; `remove`/`take` report presence.
// - `iter` yields each live binding exactly once.
// - Stats add up to `len`; structural invariants hold after every op.
fn run_state_machine<H: KeyHasher>(
    mut sut: SymTable<'static, i32, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: BTreeMap<String, i32> = BTreeMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                match sut.put(k, &VALUES[v]) {
                    Ok(PutOutcome::Inserted) => {
                        prop_assert!(!already, "put must not insert a duplicate");
                        model.insert(k.clone(), VALUES[v]);
                    }
                    Ok(PutOutcome::AlreadyPresent) => {
                        prop_assert!(already, "duplicate reported only when key exists");
                        prop_assert_eq!(sut.get(k), model.get(k));
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {}", e),
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k).is_some());
                prop_assert!(!sut.contains(k));
            }
            OpI::Take(i) => {
                let k = &pool[i];
                let got = sut.take(k);
                let expected = model.remove(k);
                prop_assert_eq!(got.as_ref().map(|(kk, _)| kk.as_str()), expected.map(|_| k.as_str()));
                prop_assert_eq!(got.map(|(_, v)| *v), expected);
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
                prop_assert_eq!(sut.contains(k), model.contains_key(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
            }
            OpI::Iterate => {
                let seen: Vec<(String, i32)> = sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                let unique: BTreeSet<&String> = seen.iter().map(|(k, _)| k).collect();
                prop_assert_eq!(unique.len(), seen.len(), "binding visited twice");
                let as_map: BTreeMap<String, i32> = seen.into_iter().collect();
                prop_assert_eq!(&as_map, &model);
            }
            OpI::Stats => {
                let s = sut.stats();
                prop_assert_eq!(s.binding_count, model.len());
                prop_assert_eq!(s.bucket_count, sut.bucket_count());
                prop_assert!(s.min_chain <= s.max_chain);
                prop_assert_eq!(s.average_chain.is_none(), model.is_empty());
            }
        }

        sut.check_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: state-machine equivalence against a BTreeMap with the default table.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(SymTable::new(), &pool, ops)?;
    }
}

// Property: same invariants with a tiny schedule so that growth and the
// maximum-size regime are both reached by short op sequences.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_small_schedule((pool, ops) in arb_scenario()) {
        let sut = SymTableBuilder::new()
            .bucket_counts(&[1, 2, 3, 5])
            .unwrap()
            .build();
        run_state_machine(sut, &pool, ops)?;
    }
}

#[derive(Clone, Copy, Default)]
struct ConstHasher;
impl KeyHasher for ConstHasher {
    fn accumulate(&self, _key: &str) -> u32 {
        0
    }
}

// Property: worst-case collisions (constant hasher) across resizes.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = SymTableBuilder::new()
            .bucket_counts(&[2, 3, 7])
            .unwrap()
            .hasher(ConstHasher)
            .build();
        run_state_machine(sut, &pool, ops)?;
    }
}

// Property: any set of distinct keys round-trips, across every resize of a
// compressed schedule, and iteration covers exactly those keys.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_distinct_keys_round_trip(keys in proptest::collection::btree_set("[a-zA-Z_][a-zA-Z0-9_]{0,7}", 0..200)) {
        let vals: Vec<usize> = (0..keys.len()).collect();
        let mut t = SymTableBuilder::new().bucket_counts(&[3, 7, 17, 31, 61]).unwrap().build();
        for (k, v) in keys.iter().zip(&vals) {
            prop_assert_eq!(t.put(k, v), Ok(PutOutcome::Inserted));
            for (kk, vv) in keys.iter().zip(&vals).take(*v + 1) {
                prop_assert_eq!(t.get(kk), Some(vv));
            }
        }
        prop_assert_eq!(t.len(), keys.len());
        let seen: BTreeSet<&str> = t.iter().map(|(k, _)| k).collect();
        let expected: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
        prop_assert_eq!(seen, expected);
        t.check_invariants();
    }
}
