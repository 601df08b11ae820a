// сравнение строк без построения ключей
//
// общий префикс пропускается (с отступом назад до безопасной кодовой единицы), затем строки
// сравниваются по таблице быстрого пути или по уровням: на каждом уровне итераторы элементов
// запускаются заново и сравниваются последовательности весов этого уровня

use core::cmp::Ordering;

use tracing::trace;

use crate::buffers::WorkBuffers;
use crate::elements::{is_unsafe_unit, Elements};
use crate::options::Settings;
use crate::table::WeightTable;
use crate::weights::levels::{french_secondaries, Classifier, Level, Weigher};

pub mod fast;
mod identical;

pub use identical::for_each_nfd_code;

/// сравнить строки UTF-16
pub fn compare(
    table: &WeightTable,
    settings: &Settings,
    left: &[u16],
    right: &[u16],
    work: &mut WorkBuffers,
) -> Ordering
{
    let equal = common_prefix(left, right);

    if equal == left.len() && equal == right.len() {
        return Ordering::Equal;
    }

    // при французской сортировке вторичные веса префикса участвуют в сравнении
    let offset = match settings.french() {
        true => 0,
        false => safe_offset(table, settings, left, right, equal),
    };

    let (left, right) = (&left[offset ..], &right[offset ..]);
    let weigher = Weigher::new(settings, table.constants());

    let fast = match settings.fast_path() {
        true => table.fast_latin(),
        false => None,
    };

    let ordering = match fast.and_then(|fast| fast.compare(&weigher, left, right)) {
        Some(ordering) => ordering,
        None => {
            if fast.is_some() {
                trace!(offset, "fast path bail-out");
            }

            compare_levels(table, settings, &weigher, left, right, work)
        }
    };

    match ordering == Ordering::Equal && weigher.identical {
        true => identical::compare(left, right, &mut work.left_codes, &mut work.right_codes),
        false => ordering,
    }
}

/// сравнение по уровням
fn compare_levels(
    table: &WeightTable,
    settings: &Settings,
    weigher: &Weigher,
    left: &[u16],
    right: &[u16],
    work: &mut WorkBuffers,
) -> Ordering
{
    for level in weigher.levels() {
        let ordering = match level == Level::Secondary && weigher.french {
            true => compare_french(table, settings, weigher, left, right, work),
            false => compare_level(table, settings, weigher, level, left, right, work),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// сравнить последовательности весов уровня
fn compare_level(
    table: &WeightTable,
    settings: &Settings,
    weigher: &Weigher,
    level: Level,
    left: &[u16],
    right: &[u16],
    work: &mut WorkBuffers,
) -> Ordering
{
    let mut left_classifier = Classifier::new(settings);
    let mut right_classifier = Classifier::new(settings);

    let left = Elements::new(table, settings, left, &mut work.left)
        .filter_map(|element| weigher.weight(level, left_classifier.classify(element.ce), element));
    let right = Elements::new(table, settings, right, &mut work.right)
        .filter_map(|element| weigher.weight(level, right_classifier.classify(element.ce), element));

    left.cmp(right)
}

/// вторичный уровень при французской сортировке
fn compare_french(
    table: &WeightTable,
    settings: &Settings,
    weigher: &Weigher,
    left: &[u16],
    right: &[u16],
    work: &mut WorkBuffers,
) -> Ordering
{
    french_secondaries(
        weigher,
        &mut Classifier::new(settings),
        Elements::new(table, settings, left, &mut work.left),
        &mut work.left_weights,
    );
    french_secondaries(
        weigher,
        &mut Classifier::new(settings),
        Elements::new(table, settings, right, &mut work.right),
        &mut work.right_weights,
    );

    work.left_weights.cmp(&work.right_weights)
}

/// длина общего префикса
#[inline]
fn common_prefix(left: &[u16], right: &[u16]) -> usize
{
    left.iter()
        .zip(right.iter())
        .take_while(|(l, r)| l == r)
        .count()
}

/// отступить от конца общего префикса до кодовой единицы, с которой можно начать сравнение
fn safe_offset(table: &WeightTable, settings: &Settings, left: &[u16], right: &[u16], equal: usize) -> usize
{
    let is_unsafe = |unit: u16| is_unsafe_unit(table, settings, unit);

    let boundary_unsafe = left.get(equal).is_some_and(|&unit| is_unsafe(unit))
        || right.get(equal).is_some_and(|&unit| is_unsafe(unit));

    let mut offset = equal;

    if offset > 0 && boundary_unsafe {
        offset -= 1;

        while offset > 0 && is_unsafe(left[offset]) {
            offset -= 1;
        }
    }

    offset
}
