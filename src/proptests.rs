use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Check every structural invariant of `t`, panicking on the first violation.
pub(crate) fn validate_tree<K: Ord + std::fmt::Debug, V>(t: &AvlTree<K, V>) {
    fn walk<K, V>(t: &AvlTree<K, V>, at: Option<NodeId>, inorder: &mut Vec<NodeId>) -> i32 {
        let Some(id) = at else {
            return -1;
        };
        let node = &t.nodes[id];
        let left = walk(t, node.left, inorder);
        inorder.push(id);
        let right = walk(t, node.right.child(), inorder);

        assert!(
            (left - right).abs() <= 1,
            "node {} is out of balance: left {left}, right {right}",
            id.index()
        );
        assert_eq!(
            node.height,
            1 + left.max(right),
            "stored height of node {} must match children",
            id.index()
        );
        node.height
    }

    let mut inorder = Vec::new();
    let height = walk(t, t.root, &mut inorder);
    assert_eq!(height, t.height());
    assert_eq!(inorder.len(), t.size(), "reachable node count must match size");
    assert_eq!(t.nodes.len(), t.size(), "arena must not hold unreachable nodes");

    for pair in inorder.windows(2) {
        assert!(
            t.nodes[pair[0]].key < t.nodes[pair[1]].key,
            "keys must be strictly increasing: {:?} then {:?}",
            t.nodes[pair[0]].key,
            t.nodes[pair[1]].key
        );
    }

    for (i, &id) in inorder.iter().enumerate() {
        let expected = inorder.get(i + 1).copied();
        match t.nodes[id].right {
            Right::Child(_) => {}
            Right::Thread(next) => assert_eq!(
                Some(next),
                expected,
                "thread of {:?} must point at its successor",
                t.nodes[id].key
            ),
            Right::Absent => assert_eq!(
                expected,
                None,
                "only the greatest key may lack a successor, not {:?}",
                t.nodes[id].key
            ),
        }
    }
}

#[derive(proptest_derive::Arbitrary, Clone, Debug)]
enum Op {
    Insert(#[proptest(strategy = "0u16..512")] u16, u32),
    Search(#[proptest(strategy = "0u16..512")] u16),
    Range(
        #[proptest(strategy = "0u16..512")] u16,
        #[proptest(strategy = "0u16..512")] u16,
    ),
    CloneTree,
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let mut t: AvlTree<u16, u32> = AvlTree::new();
        let mut m: BTreeMap<u16, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let added = !m.contains_key(&key);
                    m.entry(key).or_insert(value);
                    prop_assert_eq!(t.insert(key, value), added);
                }
                Op::Search(key) => {
                    prop_assert_eq!(t.search(&key), m.get(&key));
                    prop_assert_eq!(t.next_key(&key), m.contains_key(&key).then(|| {
                        m.range(key + 1..).next().map(|(k, _)| k)
                    }).flatten());
                }
                Op::Range(a, b) => {
                    let got = t.range_search(&a, &b);
                    let expected: Vec<u16> = if a <= b {
                        m.range(a..=b).map(|(k, _)| *k).collect()
                    } else {
                        Vec::new()
                    };
                    prop_assert_eq!(got, expected);
                }
                Op::CloneTree => {
                    let copy = t.clone();
                    prop_assert_eq!(copy.dump_to_string(), t.dump_to_string());
                    t = copy;
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<(u16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, u32)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(got, expected);

        let mut keys = Vec::new();
        t.begin();
        while let Some(key) = t.next().unwrap() {
            keys.push(*key);
        }
        prop_assert_eq!(keys, m.keys().copied().collect::<Vec<_>>());
    }

    #[test]
    fn prop_copy_is_independent(
        base in prop::collection::vec(any::<u16>(), 0..200),
        extra in prop::collection::vec(any::<u16>(), 1..50),
    ) {
        let source: AvlTree<u16, u16> = base.iter().map(|&k| (k, k)).collect();
        let before = source.dump_to_string();

        let mut copy = source.clone();
        validate_tree(&copy);
        prop_assert_eq!(copy.dump_to_string(), before.clone());

        copy.extend(extra.iter().map(|&k| (k, k)));
        validate_tree(&copy);
        prop_assert_eq!(source.dump_to_string(), before);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<u8> = (1..=7).collect();

    for_each_permutation(&keys, |perm| {
        let mut t: AvlTree<u8, u8> = AvlTree::new();
        for &k in &perm {
            assert!(t.insert(k, k));
            validate_tree(&t);
        }

        assert_eq!(t.keys().copied().collect::<Vec<_>>(), keys);
        assert!(t.height() <= 3, "order {perm:?} gave height {}", t.height());
        for lower in 0..=8u8 {
            for upper in lower..=8u8 {
                let expected: Vec<u8> = (lower..=upper).filter(|k| (1..=7).contains(k)).collect();
                assert_eq!(t.range_search(&lower, &upper), expected);
            }
        }
    });
}

#[test]
fn exhaustive_copy_small_set() {
    let keys: Vec<u8> = (1..=6).collect();

    for_each_permutation(&keys, |perm| {
        let t: AvlTree<u8, u8> = perm.iter().map(|&k| (k, k)).collect();
        let copy = t.clone();
        validate_tree(&copy);
        assert_eq!(copy.dump_to_string(), t.dump_to_string());
    });
}
