use std::collections::VecDeque;

use tracing::trace;

use super::{fcd_values, for_each_nfd, next_code};

/// тайские и лаосские гласные, которые пишутся перед согласной, а сортируются после нее
#[inline]
fn is_prevowel(code: u32) -> bool
{
    matches!(code, 0x0E40 ..= 0x0E44 | 0x0EC0 ..= 0x0EC4)
}

/// согласная, с которой переставляется предшествующая гласная
#[inline]
fn is_swap_consonant(prevowel: u32, code: u32) -> bool
{
    match prevowel < 0x0E80 {
        true => (0x0E01 ..= 0x0E2E).contains(&code),
        false => (0x0E81 ..= 0x0EAE).contains(&code),
    }
}

/// итератор кодпоинтов строки UTF-16
///
/// текст проверяется на FCD по сегментам (от стартера до следующего кодпоинта с нулевым
/// ведущим классом комбинирования), сегменты не в FCD нормализуются в NFD. возвращенные
/// обратно кодпоинты (и результат нормализации) читаются из очереди раньше текста
pub struct CodepointsIter<'a>
{
    units: &'a [u16],
    /// позиция в тексте
    pos: usize,
    /// текст до этой позиции проверен на FCD
    fcd_limit: usize,
    /// очередь кодпоинтов, читаемых перед текстом
    pending: &'a mut VecDeque<u32>,
}

impl<'a> CodepointsIter<'a>
{
    pub fn new(units: &'a [u16], pending: &'a mut VecDeque<u32>) -> Self
    {
        pending.clear();

        Self {
            units,
            pos: 0,
            fcd_limit: 0,
            pending,
        }
    }

    /// вернуть кодпоинты: они будут прочитаны следующими, в том же порядке
    #[inline]
    pub fn unread(&mut self, codes: &[u32])
    {
        for &code in codes.iter().rev() {
            self.pending.push_front(code);
        }
    }

    /// прочитать кодпоинт из текста
    #[inline]
    fn fill(&mut self) -> Option<u32>
    {
        if self.pos >= self.fcd_limit && !self.check_segment() {
            return self.pending.pop_front();
        }

        let (code, len) = next_code(self.units, self.pos)?;
        self.pos += len;

        if is_prevowel(code) {
            if let Some((next, next_len)) = next_code(self.units, self.pos) {
                if is_swap_consonant(code, next) {
                    self.pos += next_len;
                    self.pending.push_back(code);

                    return Some(next);
                }
            }
        }

        Some(code)
    }

    /// проверить сегмент с текущей позиции; если он не в FCD - поместить в очередь его NFD
    fn check_segment(&mut self) -> bool
    {
        let start = self.pos;
        let mut end = start;
        let mut prev_trail = 0;
        let mut fcd = true;

        while let Some((code, len)) = next_code(self.units, end) {
            let (lead, trail) = fcd_values(code);

            if end != start && lead == 0 {
                break;
            }

            if lead != 0 && lead < prev_trail {
                fcd = false;
            }

            prev_trail = trail;
            end += len;
        }

        self.fcd_limit = end;

        if !fcd {
            trace!(start, end, "normalizing non-FCD segment");

            let pending = &mut *self.pending;
            for_each_nfd(&self.units[start .. end], |code| pending.push_back(code));

            self.pos = end;
        }

        fcd
    }
}

impl Iterator for CodepointsIter<'_>
{
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32>
    {
        match self.pending.pop_front() {
            Some(code) => Some(code),
            None => self.fill(),
        }
    }
}
