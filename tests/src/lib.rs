//! общие функции интеграционных тестов сопоставителя

use core::cmp::Ordering;
use std::sync::Once;

use unicode_collator::{Collator, Settings};

static TRACING: Once = Once::new();

/// вывод трассировки тестов; уровень задается переменной RUST_LOG
pub fn init_tracing()
{
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// сопоставитель корневой таблицы
pub fn root_collator() -> Collator
{
    init_tracing();

    match Collator::root() {
        Ok(collator) => collator,
        Err(error) => panic!("root table is invalid: {error}"),
    }
}

/// сопоставитель корневой таблицы с ключевыми словами UTS #35
pub fn collator_with(keywords: &str) -> Collator
{
    let mut collator = root_collator();

    if let Err(error) = collator.apply_keywords(keywords) {
        panic!("keywords {keywords:?} rejected: {error}");
    }

    collator
}

/// настройки корневой таблицы с ключевыми словами
pub fn settings_with(keywords: &str) -> Settings
{
    collator_with(keywords).settings().clone()
}

pub fn utf16(text: &str) -> Vec<u16>
{
    text.encode_utf16().collect()
}

/// строки идут строго по возрастанию: и при сравнении, и по ключам сортировки
pub fn assert_ascending(collator: &Collator, texts: &[&str])
{
    for pair in texts.windows(2) {
        let (left, right) = (pair[0], pair[1]);

        assert_eq!(collator.compare(left, right), Ordering::Less, "{left:?} < {right:?}");
        assert_eq!(collator.compare(right, left), Ordering::Greater, "{right:?} > {left:?}");
        assert!(
            collator.sort_key(left) < collator.sort_key(right),
            "key {left:?} [{}] < key {right:?} [{}]",
            collator.sort_key(left),
            collator.sort_key(right)
        );
    }
}

/// строки равны и при сравнении, и по ключам сортировки
pub fn assert_equal(collator: &Collator, left: &str, right: &str)
{
    assert_eq!(collator.compare(left, right), Ordering::Equal, "{left:?} = {right:?}");
    assert_eq!(collator.sort_key(left), collator.sort_key(right), "key {left:?} = key {right:?}");
}
