use core::cmp::Ordering;
use std::sync::Arc;
use std::thread;

use unicode_collation_tests::{collator_with, root_collator};
use unicode_collator::{Collator, FrozenCollator, SortKey};

const WORDS: [&str; 16] = [
    "apple", "Apple", "résumé", "resume", "co-op", "coop", "file10", "file9", "αβγ", "кот", "ก",
    "あいう", "アイウ", "가나다", "一二三", "",
];

fn assert_send_sync<T: Send + Sync>() {}
fn assert_send<T: Send>() {}

#[test]
fn thread_safety()
{
    assert_send_sync::<FrozenCollator>();
    assert_send_sync::<SortKey>();
    assert_send::<Collator>();
}

/// результаты одного потока для сравнения с многопоточными
fn expected(collator: &Collator) -> (Vec<Ordering>, Vec<SortKey>)
{
    let orderings = WORDS
        .iter()
        .flat_map(|left| WORDS.iter().map(move |right| (left, right)))
        .map(|(left, right)| collator.compare(left, right))
        .collect();

    let keys = WORDS.iter().map(|word| collator.sort_key(word)).collect();

    (orderings, keys)
}

#[test]
fn frozen_collator_is_shared()
{
    let collator = collator_with("ka-shifted-ks-level4-kn-true");
    let (orderings, keys) = expected(&collator);
    let frozen = Arc::new(collator.freeze());

    thread::scope(|scope| {
        for _ in 0 .. 8 {
            let frozen = Arc::clone(&frozen);
            let (orderings, keys) = (&orderings, &keys);

            scope.spawn(move || {
                for _ in 0 .. 20 {
                    let mut index = 0;

                    for left in WORDS {
                        for right in WORDS {
                            assert_eq!(frozen.compare(left, right), orderings[index]);
                            index += 1;
                        }
                    }

                    for (word, key) in WORDS.iter().zip(keys) {
                        assert_eq!(&frozen.sort_key(word), key);
                    }
                }
            });
        }
    });
}

#[test]
fn thawed_copies_are_independent()
{
    let frozen = root_collator().freeze();

    thread::scope(|scope| {
        for keywords in ["ks-level1", "kf-upper", "kb-true", "kr-grek"] {
            let mut thawed = frozen.thaw();

            scope.spawn(move || {
                thawed.apply_keywords(keywords).unwrap();

                let reference = collator_with(keywords);
                let (orderings, keys) = expected(&reference);

                assert_eq!(expected(&thawed), (orderings, keys), "{keywords}");
            });
        }
    });

    // исходный сопоставитель не изменился
    assert_eq!(frozen.compare("a", "A"), Ordering::Less);
    assert_eq!(frozen.settings(), &*frozen.table().defaults());
}

#[test]
fn clones_share_table()
{
    let collator = root_collator();
    let copy = collator.clone();

    assert!(Arc::ptr_eq(collator.table(), copy.table()));

    thread::spawn(move || {
        assert_eq!(copy.compare("b", "a"), Ordering::Greater);
    })
    .join()
    .unwrap();
}
