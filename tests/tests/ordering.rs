use core::cmp::Ordering;

use unicode_collation_tests::{assert_ascending, assert_equal, root_collator, utf16};

#[test]
fn groups()
{
    let collator = root_collator();

    // пробел, пунктуация, символы, валюта, цифры, письменности, хань, прочие
    assert_ascending(&collator, &[
        " ", "_", "-", ",", "!", "?", ".", "'", "(", "@", "&", "%", "`", "^", "+", "<", "=", ">",
        "$", "€", "0", "1", "9", "a", "z", "α", "ω", "а", "я", "ก", "ກ", "あ", "ん", "ᄀ", "가",
        "一", "丁", "ա",
    ]);
}

#[test]
fn latin_levels()
{
    let collator = root_collator();

    assert_ascending(&collator, &["a", "A", "á", "Á", "à", "ab", "Ab", "b"]);
    assert_ascending(&collator, &["cote", "coté", "côte", "côté"]);
    assert_ascending(&collator, &["resume", "Resume", "résumé", "Résumé"]);
    assert_ascending(&collator, &["o", "ø", "p"]);
    assert_ascending(&collator, &["ss", "ß", "st"]);
    assert_ascending(&collator, &["ae", "az", "æ", "b"]);
}

#[test]
fn canonical_equivalence()
{
    let collator = root_collator();

    assert_equal(&collator, "\u{E9}", "e\u{301}");
    assert_equal(&collator, "\u{1EC7}", "e\u{323}\u{302}");
    assert_equal(&collator, "e\u{302}\u{323}", "e\u{323}\u{302}");
    assert_equal(&collator, "\u{212B}", "\u{C5}");
    assert_equal(&collator, "가", "\u{1100}\u{1161}");
    assert_equal(&collator, "각", "\u{1100}\u{1161}\u{11A8}");
}

#[test]
fn ignorables()
{
    let collator = root_collator();

    assert_equal(&collator, "ab", "a\u{200B}b");
    assert_equal(&collator, "ab", "a\u{AD}b");
    assert_equal(&collator, "", "\u{0}\u{FEFF}");
    assert_ascending(&collator, &["", "a"]);
}

#[test]
fn digits_and_variants()
{
    let collator = root_collator();

    // цифры разных письменностей равны, надстрочные - отличаются третичным весом
    assert_equal(&collator, "1", "\u{661}");
    assert_equal(&collator, "12", "\u{FF11}\u{FF12}");
    assert_ascending(&collator, &["1", "\u{B9}", "2"]);
    assert_ascending(&collator, &["1/2", "1\u{2044}2", "\u{BD}"]);
    assert_ascending(&collator, &["10", "2"]);

    assert_ascending(&collator, &["σ", "ς", "Σ"]);
    assert_ascending(&collator, &["a b", "a\u{A0}b", "ab"]);
}

#[test]
fn thai_prevowels()
{
    let collator = root_collator();

    // предшествующая гласная сортируется после согласной
    assert_ascending(&collator, &["ก", "กา", "เก", "ข"]);
    assert_ascending(&collator, &["ก", "ก\u{E48}", "ก\u{E49}", "กา"]);
}

#[test]
fn kana()
{
    let collator = root_collator();

    assert_ascending(&collator, &["ぁ", "あ", "ァ", "ア", "い"]);
    assert_ascending(&collator, &["か", "が", "き"]);
    assert_equal(&collator, "が", "か\u{3099}");
}

#[test]
fn han_and_implicit()
{
    let collator = root_collator();

    assert_ascending(&collator, &["一", "丁", "龥", "\u{3400}", "\u{20000}", "\u{E000}", "\u{10FFFD}"]);
}

#[test]
fn merge_separator()
{
    let collator = root_collator();

    // разделитель меньше любого другого веса: поля сравниваются по очереди
    assert_ascending(&collator, &["a\u{FFFE}z", "ab", "ab\u{FFFE}a"]);
    assert_ascending(&collator, &["A\u{FFFE}b", "a b\u{FFFE}a"]);
}

#[test]
fn utf16_input()
{
    let collator = root_collator();

    for (left, right) in [("a", "b"), ("résumé", "resume"), ("가", "一"), ("\u{10400}", "\u{20000}")] {
        assert_eq!(
            collator.compare_utf16(&utf16(left), &utf16(right)),
            collator.compare(left, right)
        );
        assert_eq!(collator.sort_key_utf16(&utf16(left)), collator.sort_key(left));
    }

    // одиночные суррогаты получают вычисляемые веса и не нарушают порядок
    let lone = [0xD800];
    let trailing = [0x61, 0xDC00];

    assert_eq!(collator.compare_utf16(&lone, &lone), Ordering::Equal);
    assert_eq!(collator.compare_utf16(&utf16("a"), &trailing), Ordering::Less);
    assert_eq!(collator.compare_utf16(&utf16("一"), &lone), Ordering::Less);
    assert_eq!(
        collator.sort_key_utf16(&trailing).cmp(&collator.sort_key_utf16(&lone)),
        collator.compare_utf16(&trailing, &lone)
    );
}

#[test]
fn predicates()
{
    let collator = root_collator();

    assert!(collator.equals("e\u{301}", "\u{E9}"));
    assert!(!collator.equals("a", "A"));
    assert!(collator.greater("b", "a"));
    assert!(!collator.greater("a", "a"));
    assert!(collator.greater_or_equal("a", "a"));
    assert!(!collator.greater_or_equal("a", "b"));
}

#[test]
fn sorting_by_keys_and_by_compare_agree()
{
    let collator = root_collator();
    let mut by_compare = vec![
        "Zebra", "apple", "Äpfel", "zebra", "Apple", "äpfel", "co-op", "coop", "Co-op", "1", "10",
        "2", "ω", "Ω", "я", "あ", "ア", "一", "", " ", "a\u{300}", "\u{E0}",
    ];
    let mut by_keys = by_compare.clone();

    by_compare.sort_by(|left, right| collator.compare(left, right));
    by_keys.sort_by_cached_key(|text| collator.sort_key(text));

    for (left, right) in by_compare.iter().zip(&by_keys) {
        assert_eq!(collator.compare(left, right), Ordering::Equal, "{left:?} vs {right:?}");
    }

    assert_eq!(by_compare.first(), Some(&""));
}
