use core::cmp::Ordering;

use unicode_collation_tests::{assert_ascending, assert_equal, collator_with, root_collator, settings_with};
use unicode_collator::{
    root, AlternateHandling, CaseFirst, Collator, ConfigError, Group, Settings, Strength,
};

#[test]
fn strength()
{
    let primary = collator_with("ks-level1");
    assert_equal(&primary, "a", "Á");
    assert_equal(&primary, "resume", "Résumé");
    assert_ascending(&primary, &["a", "b"]);

    let secondary = collator_with("ks-level2");
    assert_equal(&secondary, "a", "A");
    assert_ascending(&secondary, &["A", "á"]);

    let identical = collator_with("ks-identic");
    assert_equal(&identical, "\u{E9}", "e\u{301}");
    assert_ascending(&identical, &["ab", "a\u{200B}b"]);
    assert_ascending(&identical, &["1", "\u{661}"]);
}

#[test]
fn case_first_and_case_level()
{
    let upper = collator_with("kf-upper");
    assert_ascending(&upper, &["A", "a", "Ab", "ab", "b"]);

    let lower = collator_with("kf-lower");
    assert_ascending(&lower, &["a", "A", "ab", "Ab"]);

    // регистр различается даже на первом уровне, диакритика - нет
    let case_level = collator_with("ks-level1-kc-true");
    assert_ascending(&case_level, &["a", "A"]);
    assert_equal(&case_level, "a", "á");

    let upper_case_level = collator_with("ks-level1-kc-true-kf-upper");
    assert_ascending(&upper_case_level, &["A", "a"]);
}

#[test]
fn french_secondaries()
{
    let collator = collator_with("kb-true");

    assert_ascending(&collator, &["cote", "côte", "coté", "côté"]);
    assert_ascending(&collator, &["cote", "Cote", "côte"]);
}

#[test]
fn shifted_variables()
{
    let tertiary = collator_with("ka-shifted");
    assert_equal(&tertiary, "co-op", "coop");
    assert_equal(&tertiary, "a b", "ab");
    // валюта не входит в переменные веса по умолчанию
    assert_ascending(&tertiary, &["a$b", "ab"]);

    let quaternary = collator_with("ka-shifted-ks-level4");
    assert_ascending(&quaternary, &["co-op", "coop"]);
    assert_ascending(&quaternary, &["a b", "a-b", "ab"]);

    let spaces_only = collator_with("ka-shifted-kv-space");
    assert_equal(&spaces_only, "a b", "ab");
    assert_ascending(&spaces_only, &["co-op", "coop"]);

    let currency = collator_with("ka-shifted-kv-currency");
    assert_equal(&currency, "a$b", "ab");

    let non_ignorable = root_collator();
    assert_ascending(&non_ignorable, &["a b", "a-b", "ab"]);
}

#[test]
fn numeric()
{
    let plain = root_collator();
    assert_ascending(&plain, &["file10", "file9"]);

    let numeric = collator_with("kn-true");
    assert_ascending(&numeric, &["file1", "file2", "file9", "file10", "file100", "fileA"]);
    assert_ascending(&numeric, &["0", "1", "99", "100", "9999999999999999999999"]);
    assert_equal(&numeric, "a007", "a7");
    assert_equal(&numeric, "a\u{661}\u{662}", "a12");
    assert_ascending(&numeric, &["1.5", "1.10"]);
}

#[test]
fn hiragana_quaternary()
{
    let collator = collator_with("kh-true-ks-level4");

    assert_ascending(&collator, &["あ", "ア"]);
    assert!(collator.settings().hiragana_quaternary());

    // на третьем уровне отдельный вес хираганы не учитывается
    let tertiary = collator_with("kh-true");
    assert_ascending(&tertiary, &["ぁ", "あ", "ァ", "ア"]);
}

#[test]
fn reordering()
{
    let greek = collator_with("kr-grek");
    assert_ascending(&greek, &[" ", ".", "α", "ω", "a", "z", "я"]);

    let scripts = collator_with("kr-cyrl-grek-latn");
    assert_ascending(&scripts, &["я", "α", "a", "あ"]);
    assert_eq!(scripts.settings().reorder_codes(), &[Group::Cyrillic, Group::Greek, Group::Latin]);

    // сжатие первичных весов сохраняет порядок и после перестановки
    assert_ascending(&greek, &["αβ", "αγ", "β", "a"]);
}

#[test]
fn setters()
{
    let mut collator = root_collator();

    collator.set_strength(Strength::Secondary);
    assert_eq!(collator.compare("a", "A"), Ordering::Equal);

    collator.set_strength_level(3).unwrap();
    assert_eq!(collator.compare("a", "A"), Ordering::Less);

    collator.set_case_first(CaseFirst::Upper);
    assert_eq!(collator.compare("a", "A"), Ordering::Greater);

    collator.set_case_level(true);
    collator.set_french(true);
    collator.set_numeric(true);
    collator.set_hiragana_quaternary(true);
    collator.set_alternate(AlternateHandling::Shifted);
    collator.set_max_variable(Group::Symbol).unwrap();
    collator.set_reorder_codes(&[Group::Greek]).unwrap();

    let settings = collator.settings();
    assert!(settings.case_level() && settings.french() && settings.numeric());
    assert!(settings.hiragana_quaternary());
    assert_eq!(settings.alternate(), AlternateHandling::Shifted);
    assert_eq!(settings.max_variable(), Group::Symbol);
    assert_eq!(settings.reorder_codes(), &[Group::Greek]);

    collator.reset_settings();
    assert_eq!(collator.settings(), &*collator.table().defaults());
}

#[test]
fn variable_top()
{
    let mut collator = root_collator();
    let space = collator.elements(" ")[0].l1;
    let dollar = collator.elements("$")[0].l1;

    collator.set_alternate(AlternateHandling::Shifted);

    collator.set_variable_top(space).unwrap();
    assert_eq!(collator.settings().max_variable(), Group::Space);
    assert_eq!(collator.compare("a-b", "ab"), Ordering::Less);

    collator.set_variable_top(dollar).unwrap();
    assert_eq!(collator.settings().max_variable(), Group::Currency);
    assert_eq!(collator.compare("a$b", "ab"), Ordering::Equal);

    let letter = collator.elements("a")[0].l1;
    assert_eq!(collator.set_variable_top(letter), Err(ConfigError::InvalidVariableTop(letter)));
    assert_eq!(collator.settings().max_variable(), Group::Currency);
}

#[test]
fn rejected_values()
{
    let mut collator = root_collator();

    assert_eq!(collator.set_strength_level(0), Err(ConfigError::InvalidStrength(0)));
    assert_eq!(collator.set_max_variable(Group::Digit), Err(ConfigError::InvalidMaxVariable(Group::Digit)));
    assert_eq!(
        collator.set_reorder_codes(&[Group::Space]),
        Err(ConfigError::ReorderVariableGroup(Group::Space))
    );
    assert_eq!(
        collator.set_reorder_codes(&[Group::Greek, Group::Greek]),
        Err(ConfigError::DuplicateReorderCode(Group::Greek))
    );
    assert_eq!(
        collator.apply_keywords("kr-grek-zzzz"),
        Err(ConfigError::UnknownGroup("zzzz".into()))
    );
    assert!(matches!(
        collator.apply_keywords("ks-level2-kb-maybe"),
        Err(ConfigError::InvalidKeywordValue { .. })
    ));

    // отклоненные изменения не применяются частично
    assert_eq!(collator.settings(), &*collator.table().defaults());
}

#[test]
fn explicit_settings()
{
    let table = root().unwrap();
    let settings = Settings::from_keywords("ks-level1-kn-true").unwrap();
    let collator = Collator::with_settings(table.clone(), settings).unwrap();

    assert_equal(&collator, "A2", "a02");
    assert_ascending(&collator, &["a2", "a10"]);

    assert_eq!(
        Collator::with_settings(table, Settings::from_keywords("kr-grek-grek").unwrap()).err(),
        Some(ConfigError::DuplicateReorderCode(Group::Greek))
    );

    assert_eq!(settings_with("ks-level4").strength(), Strength::Quaternary);
    assert_eq!(Settings::default().strength(), Strength::Tertiary);
}
