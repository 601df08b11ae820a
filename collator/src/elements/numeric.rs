// числовой режим: последовательность десятичных цифр сортируется по значению числа
//
// первый CE: первичный вес 0A(80 + количество пар цифр), затем продолжения с байтами пар
// (6 + 2 * значение пары) по два на CE, недостающий байт - 03. при нечетном количестве цифр
// первая "пара" состоит из одной цифры. числа длиннее 254 цифр разбиваются на части

use crate::collation_element::{Case, Ce, TableValue};
use crate::weights::COMMON_WEIGHT;

use super::Elements;

/// старший байт первичного веса чисел
const NUMERIC_LEAD: u16 = 0x0A00;
/// смещение количества пар во втором байте первичного веса
const PAIRS_BASE: u16 = 0x80;
/// максимальное количество цифр в одной части
const MAX_DIGITS: usize = 254;
/// заполнитель последнего CE при нечетном количестве байтов пар
const PAD_BYTE: u8 = 0x03;

impl Elements<'_>
{
    /// прочитать число, начинающееся с цифры first, и добавить его элементы
    pub(super) fn push_number(&mut self, first: u8)
    {
        let mut digits = core::mem::take(&mut self.work.digits);

        digits.clear();
        digits.push(first);

        while let Some(code) = self.codes.next() {
            match self.table.lookup(code) {
                TableValue::Digit { value, .. } => digits.push(value),
                _ => {
                    self.codes.unread(&[code]);
                    break;
                }
            }
        }

        // ведущие нули не учитываются, но число из одних нулей - это ноль
        let start = digits
            .iter()
            .position(|&digit| digit != 0)
            .unwrap_or(digits.len() - 1);

        for chunk in digits[start ..].chunks(MAX_DIGITS) {
            self.push_number_chunk(chunk);
        }

        self.work.digits = digits;
    }

    fn push_number_chunk(&mut self, digits: &[u8])
    {
        let pairs = (digits.len() + 1) / 2;

        self.emit(
            Ce::new(NUMERIC_LEAD | (PAIRS_BASE + pairs as u16), COMMON_WEIGHT, Case::Lower, COMMON_WEIGHT),
            false,
        );

        let (head, rest) = digits.split_at(digits.len() % 2);
        let bytes = head
            .iter()
            .copied()
            .chain(rest.chunks(2).map(|pair| pair[0] * 10 + pair[1]))
            .map(|value| 6 + 2 * value);

        let mut high = None;

        for byte in bytes {
            match high.take() {
                None => high = Some(byte),
                Some(first) => self.emit(Ce::continuation(u16::from_be_bytes([first, byte]), 0, 0), false),
            }
        }

        if let Some(first) = high {
            self.emit(Ce::continuation(u16::from_be_bytes([first, PAD_BYTE]), 0, 0), false);
        }
    }
}
