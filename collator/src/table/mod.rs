use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::collation_element::{Ce, TableValue};
use crate::compare::fast::FastLatin;
use crate::options::Settings;
use crate::trie::{CodepointTrie, Contractions};
use crate::weights::KeyConstants;

mod builder;
mod groups;

pub use builder::{TableBuilder, MERGE_SEPARATOR_CE};
pub use groups::{Group, Reordering, MERGE_SEPARATOR_LEAD, MERGE_SEPARATOR_PRIMARY};

/// таблица весов: неизменяемые данные, разделяемые всеми сопоставителями
#[derive(Debug)]
pub struct WeightTable
{
    /// значения для кодпоинтов
    trie: CodepointTrie,
    /// расширения: несколько CE подряд
    expansions: Vec<Ce>,
    /// сокращения
    contractions: Contractions,
    /// "небезопасные" кодежиты UTF-16: с них не может начинаться сравнение после общего префикса
    unsafe_units: UnitSet,
    /// хирагана (для 4-го уровня)
    hiragana: Vec<RangeInclusive<u32>>,
    /// сжимаемые старшие байты первичных весов
    compressible: [bool; 256],
    /// последний первичный вес каждой группы
    group_last: [u16; Group::COUNT],
    /// таблица быстрого пути
    fast: Option<FastLatin>,
    /// константы кодирования ключа
    constants: KeyConstants,
    /// настройки по умолчанию
    defaults: Arc<Settings>,
}

impl WeightTable
{
    /// значение для кодпоинта
    #[inline(always)]
    pub fn lookup(&self, code: u32) -> TableValue
    {
        TableValue::from_raw(self.trie.get(code))
    }

    /// CE расширения
    #[inline(always)]
    pub fn expansion(&self, offset: u32, len: u8) -> &[Ce]
    {
        let start = offset as usize;

        self.expansions.get(start .. start + len as usize).unwrap_or(&[])
    }

    #[inline(always)]
    pub fn contractions(&self) -> &Contractions
    {
        &self.contractions
    }

    /// может ли сравнение начинаться с этой кодовой единицы (без учета цифр)
    #[inline(always)]
    pub fn is_unsafe(&self, unit: u16) -> bool
    {
        self.unsafe_units.contains(unit)
    }

    /// является ли кодпоинт десятичной цифрой
    #[inline]
    pub fn is_digit(&self, code: u32) -> bool
    {
        matches!(self.lookup(code), TableValue::Digit { .. })
    }

    #[inline]
    pub fn is_hiragana(&self, code: u32) -> bool
    {
        self.hiragana.iter().any(|range| range.contains(&code))
    }

    /// сжимаемость старшего байта (до перестановки групп)
    #[inline(always)]
    pub fn is_compressible(&self, lead: u8) -> bool
    {
        self.compressible[lead as usize]
    }

    pub fn group_last_primary(&self, group: Group) -> u16
    {
        self.group_last[group as usize]
    }

    pub fn fast_latin(&self) -> Option<&FastLatin>
    {
        self.fast.as_ref()
    }

    pub fn constants(&self) -> &KeyConstants
    {
        &self.constants
    }

    /// разделяемые настройки по умолчанию
    pub fn defaults(&self) -> Arc<Settings>
    {
        Arc::clone(&self.defaults)
    }
}

/// множество кодовых единиц UTF-16
#[derive(Clone)]
pub(crate) struct UnitSet
{
    bits: Vec<u64>,
}

impl UnitSet
{
    pub fn new() -> Self
    {
        Self {
            bits: vec![0; 0x10000 / 64],
        }
    }

    #[inline(always)]
    pub fn contains(&self, unit: u16) -> bool
    {
        self.bits[unit as usize >> 6] & (1 << (unit & 63)) != 0
    }

    pub fn insert(&mut self, unit: u16)
    {
        self.bits[unit as usize >> 6] |= 1 << (unit & 63);
    }

    pub fn len(&self) -> usize
    {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }
}

impl core::fmt::Debug for UnitSet
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        write!(f, "UnitSet({} units)", self.len())
    }
}
