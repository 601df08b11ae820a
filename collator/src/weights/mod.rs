use core::fmt::Debug;

use crate::collation_element::Ce;

pub mod levels;

/// общий (common) вторичный и третичный вес
pub const COMMON_WEIGHT: u8 = 0x05;
/// минимальное значение байта продолжения первичного веса
pub const MIN_TAIL_BYTE: u8 = 0x04;
/// разделитель уровней в ключе
pub const LEVEL_SEPARATOR: u8 = 0x01;
/// завершение ключа
pub const KEY_TERMINATOR: u8 = 0x00;
/// вес разделителя слияния на вторичном / третичном / 4-м уровнях
pub const MERGE_SEPARATOR_WEIGHT: u8 = 0x02;

/// параметры сжатия последовательностей общих весов уровня
///
/// N общих весов подряд записываются одним байтом: low + (N - 1), если за ними следует
/// меньший вес (или конец уровня), high - (N - 1), если больший. длинные последовательности
/// разбиваются на куски по max_count, каждый кусок - байт middle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compression
{
    pub low: u8,
    pub middle: u8,
    pub high: u8,
    pub max_count: u8,
}

impl Compression
{
    /// параметры с границей снизу low и количеством значений в одну сторону max_count
    pub const fn new(low: u8, max_count: u8) -> Self
    {
        Self {
            low,
            middle: low + max_count - 1,
            high: low + 2 * (max_count - 1),
            max_count,
        }
    }
}

/// константы кодирования ключа; зависят от версии таблицы и хранятся вместе с ней
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyConstants
{
    pub secondary: Compression,
    pub case: Compression,
    /// третичный уровень без регистра
    pub tertiary: Compression,
    /// третичный уровень с регистром, строчные первыми
    pub tertiary_lower_first: Compression,
    /// третичный уровень с регистром, прописные первыми
    pub tertiary_upper_first: Compression,
    pub quaternary: Compression,
    /// маркер сжатия первичных весов: следующий вес меньше предыдущего
    pub primary_compression_low: u8,
    /// маркер сжатия первичных весов: следующий вес больше предыдущего
    pub primary_compression_high: u8,
    /// вес хираганы на 4-м уровне
    pub hiragana_quaternary: u8,
    /// регистр на отдельном уровне, строчные первыми
    pub case_mixed: u8,
    pub case_upper: u8,
    /// регистр на отдельном уровне, прописные первыми
    pub case_upper_first_upper: u8,
    pub case_upper_first_mixed: u8,
}

impl KeyConstants
{
    /// старшие байты сдвинутых первичных весов должны быть меньше этого значения
    pub const fn quaternary_shifted_limit(&self) -> u8
    {
        self.quaternary.low - 1
    }
}

impl Default for KeyConstants
{
    fn default() -> Self
    {
        Self {
            secondary: Compression::new(COMMON_WEIGHT, 0x21),
            case: Compression::new(COMMON_WEIGHT, 0x21),
            tertiary: Compression::new(COMMON_WEIGHT, 0x61),
            tertiary_lower_first: Compression::new(COMMON_WEIGHT, 0x21),
            tertiary_upper_first: Compression::new(COMMON_WEIGHT + 0x80, 0x21),
            quaternary: Compression::new(0x1C, 0x71),
            primary_compression_low: 0x03,
            primary_compression_high: 0xFF,
            hiragana_quaternary: 0x1B,
            case_mixed: 0x80,
            case_upper: 0xC0,
            case_upper_first_upper: 0x03,
            case_upper_first_mixed: 0x04,
        }
    }
}

/// веса элемента сопоставления в удобном для отладки виде
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Weights
{
    pub l1: u16,
    pub l2: u8,
    pub l3: u8,
    pub is_variable: bool,
    pub is_continuation: bool,
}

impl Weights
{
    /// веса CE; переменный ли вес - определяется верхней границей переменных весов
    pub fn new(ce: Ce, variable_top: u16) -> Self
    {
        let l1 = ce.primary();

        Self {
            l1,
            l2: ce.secondary(),
            l3: ce.tertiary(),
            is_variable: !ce.is_continuation()
                && (ce.lead_byte() > crate::table::MERGE_SEPARATOR_LEAD)
                && l1 <= variable_top,
            is_continuation: ce.is_continuation(),
        }
    }

    /// в виде, близком к записи в allkeys
    pub fn format(&self) -> String
    {
        let marker = match (self.is_variable, self.is_continuation) {
            (true, _) => '*',
            (false, true) => '+',
            (false, false) => '.',
        };

        format!("[{}{:04X}.{:02X}.{:02X}]", marker, self.l1, self.l2, self.l3)
    }
}

impl Debug for Weights
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.write_str(self.format().as_str())
    }
}
