// элемент сопоставления (CE), упакованный в u32:
//
//     pppp pppp  pppp pppp    ssss ssss  cctt tttt
//
//  p - первичный вес (2 байта), s - вторичный, c - регистр, t - третичный
//  cc = 11 - продолжение (continuation): хвост расширения / многобайтного первичного веса,
//  у продолжения третичный вес хранится без регистра

use core::fmt::Debug;

/// маска битов регистра
pub const CASE_MASK: u32 = 0xC0;
/// маркер продолжения в битах регистра
pub const CONTINUATION_MARKER: u32 = 0xC0;
/// маска третичного веса (без регистра)
pub const TERTIARY_MASK: u32 = 0x3F;

/// регистр символа, как он записан в CE
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Case
{
    /// строчные и символы без регистра
    Lower = 0,
    /// смешанный регистр (например, лигатура "Dž")
    Mixed = 1,
    /// прописные
    Upper = 2,
}

/// упакованный элемент сопоставления
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ce(pub u32);

impl Ce
{
    /// полностью игнорируемый элемент
    pub const IGNORABLE: Self = Self(0);

    /// собрать CE из весов
    #[inline]
    pub const fn new(primary: u16, secondary: u8, case: Case, tertiary: u8) -> Self
    {
        Self(
            ((primary as u32) << 16)
                | ((secondary as u32) << 8)
                | ((case as u32) << 6)
                | (tertiary as u32 & TERTIARY_MASK),
        )
    }

    /// продолжение - хвост предыдущего CE
    #[inline]
    pub const fn continuation(primary: u16, secondary: u8, tertiary: u8) -> Self
    {
        Self(
            ((primary as u32) << 16)
                | ((secondary as u32) << 8)
                | CONTINUATION_MARKER
                | (tertiary as u32 & TERTIARY_MASK),
        )
    }

    #[inline]
    pub const fn primary(self) -> u16
    {
        (self.0 >> 16) as u16
    }

    /// старший байт первичного веса
    #[inline]
    pub const fn lead_byte(self) -> u8
    {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn secondary(self) -> u8
    {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn tertiary(self) -> u8
    {
        (self.0 & TERTIARY_MASK) as u8
    }

    /// регистр; для продолжения - строчный
    #[inline]
    pub fn case(self) -> Case
    {
        match (self.0 & CASE_MASK) >> 6 {
            1 => Case::Mixed,
            2 => Case::Upper,
            _ => Case::Lower,
        }
    }

    #[inline]
    pub const fn is_continuation(self) -> bool
    {
        (self.0 & CASE_MASK) == CONTINUATION_MARKER
    }

    #[inline]
    pub const fn is_ignorable(self) -> bool
    {
        self.0 == 0
    }

    /// заменить старший байт первичного веса (переупорядочивание скриптов)
    #[inline]
    pub const fn with_lead_byte(self, lead: u8) -> Self
    {
        Self((self.0 & 0x00FF_FFFF) | ((lead as u32) << 24))
    }
}

impl Debug for Ce
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        let marker = match self.is_continuation() {
            true => '+',
            false => '.',
        };

        write!(
            f,
            "[{}{:04X}.{:02X}.{:02X}]",
            marker,
            self.primary(),
            self.secondary(),
            self.tertiary()
        )
    }
}

// значения в боре кодпоинтов: либо обычный CE, либо специальное значение
//
//     1111 tttt  xxxx xxxx    xxxx xxxx  xxxx xxxx
//
//  t - тег, x - данные тега

/// маркер специального значения
const SPECIAL_MARKER: u32 = 0xF000_0000;

const TAG_IMPLICIT: u32 = 0;
const TAG_EXPANSION: u32 = 1;
const TAG_CONTRACTION: u32 = 2;
const TAG_DIGIT: u32 = 3;
const TAG_HANGUL: u32 = 4;
const TAG_LEAD_SURROGATE: u32 = 5;
const TAG_DECOMPOSITION: u32 = 6;

/// максимальная длина расширения, помещающаяся в упакованное значение
pub const MAX_EXPANSION_LEN: usize = 0xF;
/// максимальное смещение в таблицах расширений / сокращений
pub const MAX_PAYLOAD_OFFSET: usize = 0xF_FFFF;

/// разобранное значение из бора
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableValue
{
    /// одиночный CE
    Ce(Ce),
    /// веса вычисляются по кодпоинту
    Implicit,
    /// несколько CE подряд в таблице расширений
    Expansion
    {
        offset: u32, len: u8
    },
    /// начало сокращения - индекс узла в таблице сокращений
    Contraction(u32),
    /// десятичная цифра: значение и позиция обычного CE в таблице расширений
    Digit
    {
        value: u8, offset: u32
    },
    /// слог хангыль - раскладывается на чамо алгоритмически
    Hangul,
    /// ведущий суррогат: смещение блоков дополнительных плоскостей в индексе бора
    LeadSurrogate(u32),
    /// кодпоинт раскладывается канонически, веса берутся по декомпозиции
    Decomposition,
}

impl TableValue
{
    /// распаковать значение из бора
    #[inline]
    pub fn from_raw(raw: u32) -> Self
    {
        if raw & SPECIAL_MARKER != SPECIAL_MARKER {
            return Self::Ce(Ce(raw));
        }

        let payload = raw & 0x00FF_FFFF;

        match (raw >> 24) & 0xF {
            TAG_EXPANSION => Self::Expansion {
                offset: payload >> 4,
                len: (payload & 0xF) as u8,
            },
            TAG_CONTRACTION => Self::Contraction(payload),
            TAG_DIGIT => Self::Digit {
                value: (payload & 0xF) as u8,
                offset: payload >> 4,
            },
            TAG_HANGUL => Self::Hangul,
            TAG_LEAD_SURROGATE => Self::LeadSurrogate(payload),
            TAG_DECOMPOSITION => Self::Decomposition,
            _ => Self::Implicit,
        }
    }

    /// упаковать значение для записи в бор
    #[inline]
    pub fn to_raw(self) -> u32
    {
        let special = |tag: u32, payload: u32| SPECIAL_MARKER | (tag << 24) | (payload & 0x00FF_FFFF);

        match self {
            Self::Ce(ce) => ce.0,
            Self::Implicit => special(TAG_IMPLICIT, 0),
            Self::Expansion { offset, len } => special(TAG_EXPANSION, (offset << 4) | len as u32),
            Self::Contraction(index) => special(TAG_CONTRACTION, index),
            Self::Digit { value, offset } => special(TAG_DIGIT, (offset << 4) | value as u32),
            Self::Hangul => special(TAG_HANGUL, 0),
            Self::LeadSurrogate(offset) => special(TAG_LEAD_SURROGATE, offset),
            Self::Decomposition => special(TAG_DECOMPOSITION, 0),
        }
    }

    /// может ли обычный CE быть записан в бор без конфликта со специальными значениями
    #[inline]
    pub fn is_storable_ce(ce: Ce) -> bool
    {
        ce.0 & SPECIAL_MARKER != SPECIAL_MARKER
    }
}
