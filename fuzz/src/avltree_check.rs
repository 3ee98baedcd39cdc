#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use avltree::AvlTree;

#[derive(Arbitrary, Debug)]
enum TreeMethod {
    Insert { key: u16 },
    Remove { key: u16 },
    PopMin,
    Contains { key: u16 },
}

fuzz_target!(|methods: Vec<TreeMethod>| {
    let mut tree = AvlTree::<u16>::new();
    // Key -> number of copies, so duplicates are modelled too.
    let mut bt_map = BTreeMap::<u16, usize>::new();

    for m_c in methods.chunks(1024) {
        for m in m_c {
            match m {
                TreeMethod::Insert { key } => {
                    tree.insert(*key);
                    *bt_map.entry(*key).or_default() += 1;
                }
                TreeMethod::Remove { key } => {
                    let expected = match bt_map.get_mut(key) {
                        Some(n) => {
                            *n -= 1;
                            if *n == 0 {
                                bt_map.remove(key);
                            }
                            Some(*key)
                        }
                        None => None,
                    };
                    let removed = tree.remove(key);
                    eprintln!("Remove: {:?} {:?}", key, removed);
                    assert_eq!(removed, expected);
                }
                TreeMethod::PopMin => {
                    let expected = bt_map.first_key_value().map(|(k, _)| *k);
                    if let Some(k) = expected {
                        let n = bt_map.get_mut(&k).unwrap();
                        *n -= 1;
                        if *n == 0 {
                            bt_map.remove(&k);
                        }
                    }
                    assert_eq!(tree.pop_min(), expected);
                }
                TreeMethod::Contains { key } => {
                    assert_eq!(tree.contains(key), bt_map.contains_key(key));
                }
            }
        }
        if let Err(e) = tree.validate() {
            panic!("invariant violated after chunk: {e}");
        }
    }

    let expected: Vec<u16> = bt_map
        .iter()
        .flat_map(|(k, n)| std::iter::repeat_n(*k, *n))
        .collect();
    assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), expected);
    assert_eq!(tree.len(), expected.len());
});
