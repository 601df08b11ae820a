use core::cmp::Ordering;

use proptest::prelude::*;
use unicode_normalization::UnicodeNormalization;

use unicode_collation_tests::{collator_with, utf16};

/// символы разных групп, диакритика, чамо, игнорируемые, разделитель слияния
const ALPHABET: &[char] = &[
    'a', 'A', 'b', 'e', 'é', 'h', 'o', 'ö', 'ø', 'ß', 'z', '\u{301}', '\u{302}', '\u{308}', '\u{323}',
    ' ', '-', '.', '$', '1', '2', '9', '\u{661}', 'α', 'Ω', 'я', 'ก', 'เ', '\u{E48}', 'あ', 'ア',
    'が', '\u{3099}', '가', '\u{1100}', '\u{1161}', '\u{11A8}', '一', '\u{200B}', '\u{FFFE}',
];

const KEYWORDS: &[&str] = &[
    "",
    "ks-level1",
    "ks-level2-kb-true",
    "kf-upper",
    "ks-level1-kc-true",
    "ka-shifted",
    "ka-shifted-ks-level4",
    "ks-identic",
    "kn-true",
    "kh-true-ks-level4",
    "kr-grek-cyrl",
    "ka-shifted-kv-space-kf-lower-kc-true-kb-true-ks-level4",
];

fn text() -> impl Strategy<Value = String>
{
    prop::collection::vec(prop::sample::select(ALPHABET), 0 .. 8).prop_map(|chars| chars.into_iter().collect())
}

fn keyword_sets() -> impl Strategy<Value = &'static str>
{
    prop::sample::select(KEYWORDS)
}

proptest! {
    #[test]
    fn keys_agree_with_compare(left in text(), right in text(), keywords in keyword_sets())
    {
        let collator = collator_with(keywords);

        prop_assert_eq!(
            collator.sort_key(&left).cmp(&collator.sort_key(&right)),
            collator.compare(&left, &right)
        );
    }

    #[test]
    fn compare_is_antisymmetric(left in text(), right in text(), keywords in keyword_sets())
    {
        let collator = collator_with(keywords);

        prop_assert_eq!(collator.compare(&left, &right), collator.compare(&right, &left).reverse());
        prop_assert_eq!(collator.compare(&left, &left), Ordering::Equal);
    }

    #[test]
    fn compare_is_transitive(mut texts in prop::collection::vec(text(), 3 .. 12), keywords in keyword_sets())
    {
        let collator = collator_with(keywords);

        texts.sort_by_cached_key(|text| collator.sort_key(text));

        for pair in texts.windows(2) {
            prop_assert_ne!(collator.compare(&pair[0], &pair[1]), Ordering::Greater);
        }

        for (index, left) in texts.iter().enumerate() {
            for right in &texts[index ..] {
                prop_assert_ne!(collator.compare(left, right), Ordering::Greater);
            }
        }
    }

    #[test]
    fn canonical_equivalents_are_equal(input in text(), keywords in prop::sample::select(&KEYWORDS[.. 8]))
    {
        let collator = collator_with(keywords);
        let nfd: String = input.nfd().collect();
        let nfc: String = input.nfc().collect();

        prop_assert_eq!(collator.compare(&input, &nfd), Ordering::Equal);
        prop_assert_eq!(collator.compare(&nfc, &nfd), Ordering::Equal);
        prop_assert_eq!(collator.sort_key(&input), collator.sort_key(&nfc));
    }

    #[test]
    fn utf16_and_buffer_outputs_agree(left in text(), right in text(), keywords in keyword_sets())
    {
        let collator = collator_with(keywords);
        let mut out = vec![0xFF; 3];

        collator.sort_key_into(&left, &mut out);
        let key = collator.sort_key(&left);

        prop_assert_eq!(out.as_slice(), key.as_bytes());
        prop_assert_eq!(collator.sort_key_utf16(&utf16(&left)), collator.sort_key(&left));
        prop_assert_eq!(
            collator.compare_utf16(&utf16(&left), &utf16(&right)),
            collator.compare(&left, &right)
        );
    }

    #[test]
    fn keys_are_well_formed(input in text(), keywords in keyword_sets())
    {
        let collator = collator_with(keywords);
        let key = collator.sort_key(&input);
        let bytes = key.as_bytes();

        // нулевой байт - только завершающий
        prop_assert_eq!(bytes.last(), Some(&0));
        prop_assert!(!bytes[.. bytes.len() - 1].contains(&0));
    }

    #[test]
    fn frozen_and_mutable_agree(left in text(), right in text(), keywords in keyword_sets())
    {
        let collator = collator_with(keywords);
        let frozen = collator.clone().freeze();

        prop_assert_eq!(frozen.compare(&left, &right), collator.compare(&left, &right));
        prop_assert_eq!(frozen.sort_key(&left), collator.sort_key(&left));
        prop_assert_eq!(frozen.elements(&left), collator.elements(&left));
    }
}

fn latin1() -> impl Strategy<Value = String>
{
    prop::collection::vec(prop::char::range('\u{9}', '\u{FF}'), 0 .. 12).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1024))]

    #[test]
    fn fast_path_matches_general_path(left in latin1(), right in latin1())
    {
        // сравнение по ключам не использует быстрый путь
        let collator = collator_with("");
        prop_assert!(collator.settings().fast_path());

        prop_assert_eq!(
            collator.compare(&left, &right),
            collator.sort_key(&left).cmp(&collator.sort_key(&right))
        );

        let upper = collator_with("kf-upper");
        prop_assert_eq!(
            upper.compare(&left, &right),
            upper.sort_key(&left).cmp(&upper.sort_key(&right))
        );
    }

    #[test]
    fn sort_keys_are_pure(text in latin1(), keywords in keyword_sets())
    {
        let collator = collator_with(keywords);
        let first = collator.sort_key(&text);

        let _ = collator.compare(&text, "z");

        prop_assert_eq!(collator.sort_key(&text), first);
    }
}
