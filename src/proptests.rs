use std::collections::{HashMap, VecDeque};

use proptest::prelude::*;

use crate::{Error, HashTable, LinkedList, MAX_LOAD_FACTOR};

proptest! {
    #[test]
    fn set_then_get(entries in prop::collection::vec((any::<u16>(), any::<i32>()), 0..200)) {
        let mut table = HashTable::new();
        let mut model = HashMap::new();

        for (k, v) in entries {
            let before = table.bucket_count();
            prop_assert_eq!(model.insert(k, v), table.set(k, v));
            prop_assert_eq!(Ok(&v), table.get(&k));
            prop_assert!(table.load_factor() <= MAX_LOAD_FACTOR);
            prop_assert!(table.bucket_count() >= before);
        }

        prop_assert_eq!(model.len(), table.len());
        for (k, v) in &model {
            prop_assert_eq!(Ok(v), table.get(k));
        }
    }

    #[test]
    fn setting_twice_keeps_size(k in any::<u8>(), v in any::<u8>(), n in 1usize..20) {
        let mut table: HashTable<u8, u8> = HashTable::with_buckets(n).unwrap();

        table.set(k, v);
        let size = table.len();
        table.set(k, v);

        prop_assert_eq!(size, table.len());
        prop_assert_eq!(Ok(&v), table.get(&k));
    }

    #[test]
    fn resize_keeps_every_entry(keys in prop::collection::hash_set(any::<u32>(), 1..150)) {
        let mut table = HashTable::with_buckets(1).unwrap();
        let mut inserted = Vec::new();

        for k in keys {
            let before = table.bucket_count();
            table.set(k, !k);
            inserted.push(k);

            if table.bucket_count() != before {
                prop_assert!(table.bucket_count() > before);
                for k in &inserted {
                    let expected = !*k;
                    prop_assert_eq!(Ok(&expected), table.get(k));
                }
            }
        }
    }

    #[test]
    fn delete_matches_model(
        keys in prop::collection::vec(0u8..64, 0..100),
        doomed in prop::collection::vec(0u8..64, 0..100),
    ) {
        let mut table: HashTable<u8, u8> = keys.iter().map(|k| (*k, *k)).collect();
        let mut model: HashMap<u8, u8> = keys.iter().map(|k| (*k, *k)).collect();

        for k in doomed {
            let size = table.len();
            match model.remove(&k) {
                Some(v) => {
                    prop_assert_eq!(Ok(v), table.delete(&k));
                    prop_assert_eq!(size - 1, table.len());
                }
                None => {
                    prop_assert_eq!(Err(Error::KeyNotFound), table.delete(&k));
                    prop_assert_eq!(size, table.len());
                }
            }
            prop_assert!(!table.contains(&k));
        }

        prop_assert_eq!(model.len(), table.length());
    }

    #[test]
    fn list_keeps_insertion_order(ops in prop::collection::vec((any::<bool>(), any::<i16>()), 0..100)) {
        let mut list = LinkedList::new();
        let mut model = VecDeque::new();

        for (front, item) in ops {
            if front {
                list.prepend(item);
                model.push_front(item);
            } else {
                list.append(item);
                model.push_back(item);
            }
        }

        prop_assert_eq!(model.len(), list.len());
        prop_assert!(list.iter().eq(model.iter()));
        prop_assert_eq!(model.back(), list.tail());
    }
}
