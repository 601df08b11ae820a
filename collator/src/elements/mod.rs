// итератор элементов сопоставления строки

use std::collections::VecDeque;

use crate::buffers::{IterBuffers, Work};
use crate::codepoint::{decomposition, CodepointsIter};
use crate::collation_element::{Ce, TableValue};
use crate::hangul::{decompose_syllable, is_hangul_syllable};
use crate::implicit::implicit_elements;
use crate::options::Settings;
use crate::table::{Reordering, WeightTable};

mod contraction;
mod cursor;
mod numeric;

pub use cursor::CollationElements;

/// элемент сопоставления с признаком хираганы (для 4-го уровня)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element
{
    pub ce: Ce,
    pub hiragana: bool,
}

/// единица UTF-16, с которой нельзя начинать чтение элементов: она может продолжать сокращение,
/// перестановку гласной, последовательность цифр или суррогатную пару предыдущего кодпоинта
#[inline]
pub fn is_unsafe_unit(table: &WeightTable, settings: &Settings, unit: u16) -> bool
{
    table.is_unsafe(unit) || (settings.numeric() && table.is_digit(unit as u32))
}

/// ближайшая безопасная граница не правее offset
pub fn safe_boundary(table: &WeightTable, settings: &Settings, units: &[u16], offset: usize) -> usize
{
    let mut offset = offset.min(units.len());

    while offset > 0 && offset < units.len() && is_unsafe_unit(table, settings, units[offset]) {
        offset -= 1;
    }

    offset
}

/// элементы сопоставления строки с учетом настроек: числовой режим, перестановка групп
pub struct Elements<'a>
{
    table: &'a WeightTable,
    numeric: bool,
    hiragana: bool,
    reordering: Option<&'a Reordering>,
    codes: CodepointsIter<'a>,
    ces: &'a mut VecDeque<Element>,
    work: &'a mut Work,
}

impl<'a> Elements<'a>
{
    pub fn new(
        table: &'a WeightTable,
        settings: &'a Settings,
        units: &'a [u16],
        buffers: &'a mut IterBuffers,
    ) -> Self
    {
        let IterBuffers { pending, ces, work } = buffers;
        ces.clear();

        Self {
            table,
            numeric: settings.numeric(),
            hiragana: settings.hiragana_quaternary(),
            reordering: settings.reordering(),
            codes: CodepointsIter::new(units, pending),
            ces,
            work,
        }
    }

    /// вычислить элементы кодпоинта
    fn push_code(&mut self, code: u32)
    {
        let hiragana = self.hiragana && self.table.is_hiragana(code);

        self.push_value(code, self.table.lookup(code), hiragana);
    }

    fn push_value(&mut self, code: u32, value: TableValue, hiragana: bool)
    {
        let table = self.table;

        match value {
            TableValue::Ce(ce) => self.emit(ce, hiragana),
            TableValue::Implicit | TableValue::LeadSurrogate(_) => self.push_implicit(code),
            TableValue::Expansion { offset, len } => {
                for &ce in table.expansion(offset, len) {
                    self.emit(ce, hiragana);
                }
            }
            TableValue::Contraction(node) => match self.match_contraction(node) {
                // вложенных сокращений не бывает
                TableValue::Contraction(_) => self.push_implicit(code),
                value => self.push_value(code, value, hiragana),
            },
            TableValue::Digit { value, offset } => match self.numeric {
                true => self.push_number(value),
                false => {
                    for &ce in table.expansion(offset, 1) {
                        self.emit(ce, false);
                    }
                }
            },
            TableValue::Hangul => match is_hangul_syllable(code) {
                true => {
                    let (jamo, len) = decompose_syllable(code);
                    self.codes.unread(&jamo[.. len]);
                }
                false => self.push_implicit(code),
            },
            TableValue::Decomposition => match decomposition(code) {
                Some(decomposition) => self.codes.unread(&decomposition),
                None => self.push_implicit(code),
            },
        }
    }

    fn push_implicit(&mut self, code: u32)
    {
        for ce in implicit_elements(code) {
            self.emit(ce, false);
        }
    }

    /// добавить элемент в очередь, переставив группу первичного веса
    #[inline]
    fn emit(&mut self, ce: Ce, hiragana: bool)
    {
        if ce.is_ignorable() {
            return;
        }

        let ce = match self.reordering {
            Some(reordering) if !ce.is_continuation() && ce.primary() != 0 => {
                ce.with_lead_byte(reordering.apply(ce.lead_byte()))
            }
            _ => ce,
        };

        self.ces.push_back(Element { ce, hiragana });
    }
}

impl Iterator for Elements<'_>
{
    type Item = Element;

    #[inline]
    fn next(&mut self) -> Option<Element>
    {
        loop {
            if let Some(element) = self.ces.pop_front() {
                return Some(element);
            }

            let code = self.codes.next()?;
            self.push_code(code);
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::collation_element::Case;
    use crate::table::{Group, TableBuilder};
    use crate::weights::COMMON_WEIGHT;

    fn letter(primary: u16) -> Ce
    {
        Ce::new(primary, COMMON_WEIGHT, Case::Lower, COMMON_WEIGHT)
    }

    fn collect(table: &WeightTable, settings: &Settings, text: &str) -> Vec<Ce>
    {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut buffers = IterBuffers::default();

        Elements::new(table, settings, &units, &mut buffers)
            .map(|element| element.ce)
            .collect()
    }

    #[test]
    fn mappings_and_implicit_weights()
    {
        let mut builder = TableBuilder::new();
        builder.map(0x61, &[letter(0x2004)]);
        builder.map(0x62, &[letter(0x2008), letter(0x200C)]);
        let table = builder.build().unwrap();
        let settings = table.defaults();

        assert_eq!(collect(&table, &settings, "ab"), vec![letter(0x2004), letter(0x2008), letter(0x200C)]);
        assert_eq!(collect(&table, &settings, "\u{4E00}"), implicit_elements(0x4E00).to_vec());
    }

    #[test]
    fn hangul_syllables_are_decomposed()
    {
        let mut builder = TableBuilder::new();
        builder.map(0x1100, &[letter(0x4804)]);
        builder.map(0x1161, &[letter(0x4884)]);
        builder.map(0x11A8, &[letter(0x48C4)]);
        let table = builder.build().unwrap();
        let settings = table.defaults();

        assert_eq!(
            collect(&table, &settings, "\u{AC01}"),
            vec![letter(0x4804), letter(0x4884), letter(0x48C4)]
        );
    }

    #[test]
    fn reordering_moves_lead_bytes()
    {
        let mut builder = TableBuilder::new();
        builder.map(0x3B1, &[letter(0x3004)]);
        let table = builder.build().unwrap();

        let mut settings = (*table.defaults()).clone();
        settings.reorder_codes = vec![Group::Greek];
        settings.refresh(&table).unwrap();

        assert_eq!(collect(&table, &settings, "\u{3B1}"), vec![letter(0x0A04)]);
    }
}
