use core::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// группа первичных весов: специальные группы (пробелы, пунктуация, символы, валюта, цифры)
/// и письменности. каждая группа занимает непрерывный диапазон старших байтов первичного веса
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Group
{
    Space,
    Punctuation,
    Symbol,
    Currency,
    Digit,
    Latin,
    Greek,
    Cyrillic,
    Thai,
    Lao,
    Kana,
    Hangul,
    Han,
}

/// старший байт первичного веса разделителя слияния (U+FFFE)
pub const MERGE_SEPARATOR_LEAD: u8 = 0x02;
/// первичный вес разделителя слияния
pub const MERGE_SEPARATOR_PRIMARY: u16 = 0x0202;
/// первый старший байт, который может участвовать в перестановке групп
const FIRST_REORDERABLE_LEAD: u8 = 0x0A;

impl Group
{
    pub const ALL: [Group; 13] = [
        Group::Space,
        Group::Punctuation,
        Group::Symbol,
        Group::Currency,
        Group::Digit,
        Group::Latin,
        Group::Greek,
        Group::Cyrillic,
        Group::Thai,
        Group::Lao,
        Group::Kana,
        Group::Hangul,
        Group::Han,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// диапазон старших байтов группы; диапазоны идут подряд и покрывают 03 ..= FF
    pub const fn leads(self) -> RangeInclusive<u8>
    {
        match self {
            Group::Space => 0x03 ..= 0x03,
            Group::Punctuation => 0x04 ..= 0x05,
            Group::Symbol => 0x06 ..= 0x06,
            Group::Currency => 0x07 ..= 0x09,
            Group::Digit => 0x0A ..= 0x1F,
            Group::Latin => 0x20 ..= 0x2F,
            Group::Greek => 0x30 ..= 0x30,
            Group::Cyrillic => 0x31 ..= 0x39,
            Group::Thai => 0x3A ..= 0x3A,
            Group::Lao => 0x3B ..= 0x3F,
            Group::Kana => 0x40 ..= 0x47,
            Group::Hangul => 0x48 ..= 0xEF,
            Group::Han => 0xF0 ..= 0xFF,
        }
    }

    /// старший байт, с которого начинаются веса группы в корневой таблице
    pub const fn first_lead(self) -> u8
    {
        *self.leads().start()
    }

    /// переменные группы - могут быть сдвинуты на 4-й уровень
    pub const fn is_variable(self) -> bool
    {
        matches!(
            self,
            Group::Space | Group::Punctuation | Group::Symbol | Group::Currency
        )
    }

    /// сжимаемые по умолчанию группы: веса в пределах одного старшего байта кодируются
    /// в ключе без повторения этого байта
    pub const fn is_compressible(self) -> bool
    {
        matches!(
            self,
            Group::Greek | Group::Cyrillic | Group::Thai | Group::Lao | Group::Kana | Group::Hangul
        )
    }

    /// группа, к которой относится старший байт первичного веса
    pub fn of_lead(lead: u8) -> Option<Group>
    {
        Self::ALL.iter().copied().find(|group| group.leads().contains(&lead))
    }

    /// код группы / письменности (ISO 15924 или специальный код UTS #35)
    pub const fn code(self) -> &'static str
    {
        match self {
            Group::Space => "space",
            Group::Punctuation => "punct",
            Group::Symbol => "symbol",
            Group::Currency => "currency",
            Group::Digit => "digit",
            Group::Latin => "Latn",
            Group::Greek => "Grek",
            Group::Cyrillic => "Cyrl",
            Group::Thai => "Thai",
            Group::Lao => "Laoo",
            Group::Kana => "Hira",
            Group::Hangul => "Hang",
            Group::Han => "Hani",
        }
    }

    /// группа по коду; регистр не учитывается, синонимы письменностей допускаются
    pub fn from_code(code: &str) -> Result<Group, ConfigError>
    {
        let lower = code.to_ascii_lowercase();

        let group = match lower.as_str() {
            "space" => Group::Space,
            "punct" => Group::Punctuation,
            "symbol" => Group::Symbol,
            "currency" => Group::Currency,
            "digit" => Group::Digit,
            "latn" => Group::Latin,
            "grek" => Group::Greek,
            "cyrl" => Group::Cyrillic,
            "thai" => Group::Thai,
            "laoo" => Group::Lao,
            "hira" | "kana" | "hrkt" => Group::Kana,
            "hang" | "kore" => Group::Hangul,
            "hani" | "hans" | "hant" => Group::Han,
            _ => return Err(ConfigError::UnknownGroup(code.to_owned())),
        };

        Ok(group)
    }
}

/// перестановка старших байтов первичных весов
#[derive(Clone, PartialEq, Eq)]
pub struct Reordering
{
    /// исходный байт -> переставленный
    forward: [u8; 256],
    /// переставленный байт -> исходный (для проверки сжимаемости)
    inverse: [u8; 256],
}

impl Reordering
{
    /// перестановка, при которой указанные группы идут первыми (после специальных групп),
    /// а остальные переставляемые - за ними, в исходном порядке.
    /// пустой список - отсутствие перестановки
    pub fn new(codes: &[Group]) -> Result<Option<Self>, ConfigError>
    {
        if codes.is_empty() {
            return Ok(None);
        }

        let mut order: Vec<Group> = Vec::with_capacity(Group::COUNT);

        for &group in codes {
            if group.is_variable() {
                return Err(ConfigError::ReorderVariableGroup(group));
            }
            if order.contains(&group) {
                return Err(ConfigError::DuplicateReorderCode(group));
            }

            order.push(group);
        }

        for group in Group::ALL {
            if !group.is_variable() && !order.contains(&group) {
                order.push(group);
            }
        }

        let mut forward = [0u8; 256];
        let mut inverse = [0u8; 256];

        for lead in 0 .. FIRST_REORDERABLE_LEAD {
            forward[lead as usize] = lead;
            inverse[lead as usize] = lead;
        }

        let mut next = FIRST_REORDERABLE_LEAD as usize;

        for group in order {
            for lead in group.leads() {
                forward[lead as usize] = next as u8;
                inverse[next] = lead;
                next += 1;
            }
        }

        Ok(Some(Self { forward, inverse }))
    }

    /// переставленный старший байт
    #[inline(always)]
    pub fn apply(&self, lead: u8) -> u8
    {
        self.forward[lead as usize]
    }

    /// исходный старший байт
    #[inline(always)]
    pub fn revert(&self, lead: u8) -> u8
    {
        self.inverse[lead as usize]
    }
}

impl core::fmt::Debug for Reordering
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        let moved: Vec<_> = Group::ALL
            .iter()
            .filter(|group| self.apply(group.first_lead()) != group.first_lead())
            .map(|group| (group.code(), self.apply(group.first_lead())))
            .collect();

        f.debug_struct("Reordering").field("moved", &moved).finish()
    }
}
