use std::sync::Arc;

use unicode_collation_tests::{assert_ascending, assert_equal, init_tracing};
use unicode_collator::{
    root, Case, Ce, Collator, ConfigError, Group, Settings, TableBuilder, TableError, WeightTable,
};

fn primary(builder: &TableBuilder, c: char) -> u16
{
    builder.get(c as u32).unwrap()[0].primary()
}

fn collator(builder: &TableBuilder) -> Collator
{
    init_tracing();
    Collator::new(Arc::new(builder.build().unwrap()))
}

#[test]
fn contraction_between_letters()
{
    let mut builder = TableBuilder::from_root();
    let ch = primary(&builder, 'h') + 2;

    builder
        .contraction("ch", &[Ce::new(ch, 0x05, Case::Lower, 0x05)])
        .contraction("Ch", &[Ce::new(ch, 0x05, Case::Upper, 0x0B)]);

    let collator = collator(&builder);

    assert_ascending(&collator, &["c", "cz", "h", "ch", "Ch", "cha", "i"]);
    // сокращение не образуется через разделяющий диакритический знак
    assert_ascending(&collator, &["c\u{301}h", "ch"]);
}

#[test]
fn remapped_letter()
{
    // ö после z, как в шведском
    let mut builder = TableBuilder::from_root();
    let z = primary(&builder, 'z');

    builder.map('ö' as u32, &[Ce::new(z + 4, 0x05, Case::Lower, 0x05)]);
    builder.map('Ö' as u32, &[Ce::new(z + 4, 0x05, Case::Upper, 0x0B)]);

    let collator = collator(&builder);

    assert_ascending(&collator, &["o", "z", "ö", "Ö"]);
    assert_equal(&collator, "ö", "o\u{308}");

    // корневая таблица не изменилась
    let root = Collator::root().unwrap();
    assert_ascending(&root, &["o", "ö", "z"]);
}

#[test]
fn table_defaults()
{
    let mut builder = TableBuilder::from_root();
    builder.defaults(Settings::from_keywords("ks-level2-kn-true").unwrap());

    let collator = collator(&builder);

    assert_equal(&collator, "a", "A");
    assert_ascending(&collator, &["a9", "a10"]);
    assert!(collator.settings().numeric());

    builder.defaults(Settings::from_keywords("kr-latn-latn").unwrap());
    assert_eq!(
        builder.build().err(),
        Some(TableError::InvalidDefaults(ConfigError::DuplicateReorderCode(Group::Latin)))
    );
}

#[test]
fn hiragana_on_fourth_level()
{
    // катакана с теми же весами, что и хирагана: различие только на 4-м уровне
    let mut builder = TableBuilder::from_root();
    let a = builder.get('あ' as u32).unwrap().to_vec();
    builder.map('ア' as u32, &a);

    let mut collator = collator(&builder);
    assert_equal(&collator, "あ", "ア");

    collator.apply_keywords("kh-true-ks-level4").unwrap();
    assert_ascending(&collator, &["あ", "ア"]);

    collator.apply_keywords("kh-false").unwrap();
    assert_equal(&collator, "あ", "ア");
}

#[test]
fn invalid_elements()
{
    let cases: [(Ce, fn(&TableError) -> bool); 5] = [
        (Ce::new(0x2004, 0x20, Case::Lower, 0x05), |e| {
            matches!(e, TableError::SecondaryWeight { weight: 0x20, .. })
        }),
        (Ce::new(0x2004, 0x05, Case::Lower, 0x02), |e| {
            matches!(e, TableError::TertiaryWeight { weight: 0x02, .. })
        }),
        (Ce::new(0xF104, 0x05, Case::Lower, 0x05), |e| {
            matches!(e, TableError::ReservedLeadByte { lead: 0xF1, .. })
        }),
        (Ce::new(0x30FF, 0x05, Case::Lower, 0x05), |e| {
            matches!(e, TableError::CompressibleSecondByte { byte: 0xFF, .. })
        }),
        (Ce::new(0x2004, 0x00, Case::Lower, 0x05), |e| {
            matches!(e, TableError::IllFormedElement { .. })
        }),
    ];

    for (ce, expected) in cases {
        let mut builder = TableBuilder::from_root();
        builder.map(0xE000, &[ce]);

        let error = builder.build().unwrap_err();
        assert!(expected(&error), "{ce:?}: {error}");
    }

    // продолжение после сжимаемого первичного веса
    let mut builder = TableBuilder::new();
    builder.map(0xE000, &[Ce::new(0x3004, 0x05, Case::Lower, 0x05), Ce::continuation(0x0404, 0, 0)]);

    assert!(matches!(builder.build(), Err(TableError::MisplacedContinuation { code: 0xE000 })));
}

#[test]
fn empty_table_uses_implicit_weights()
{
    init_tracing();

    let table: WeightTable = TableBuilder::new().build().unwrap();
    let collator = Collator::new(Arc::new(table));

    // без явных весов: хань, затем остальные кодпоинты по порядку
    assert_ascending(&collator, &["\u{4E00}", "a", "b", "z", "\u{3042}"]);

    // корневая таблица собирается один раз
    let collator = Collator::root().unwrap();
    assert!(Arc::ptr_eq(&root().unwrap(), collator.table()));
}
