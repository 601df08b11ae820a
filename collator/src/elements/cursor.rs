// элементы строки с произвольной позиции
//
// строка читается отрезками между безопасными границами: сокращение, перестановка тайской
// гласной, число в числовом режиме и суррогатная пара не пересекают безопасную единицу, поэтому
// элементы отрезков совпадают с элементами всей строки

use std::borrow::Cow;
use std::collections::VecDeque;

use super::{is_unsafe_unit, safe_boundary, Elements};
use crate::buffers::IterBuffers;
use crate::options::Settings;
use crate::table::WeightTable;
use crate::weights::Weights;

/// итератор весов строки с возможностью перезапуска с заданного смещения (в единицах UTF-16)
pub struct CollationElements<'a>
{
    table: &'a WeightTable,
    settings: &'a Settings,
    units: Cow<'a, [u16]>,
    /// начало прочитанного отрезка
    start: usize,
    /// конец прочитанного отрезка и начало следующего
    end: usize,
    ready: VecDeque<Weights>,
    buffers: IterBuffers,
}

impl<'a> CollationElements<'a>
{
    pub(crate) fn new(table: &'a WeightTable, settings: &'a Settings, units: Cow<'a, [u16]>, offset: usize) -> Self
    {
        let mut elements = Self {
            table,
            settings,
            units,
            start: 0,
            end: 0,
            ready: VecDeque::new(),
            buffers: IterBuffers::default(),
        };

        elements.set_offset(offset);
        elements
    }

    /// смещение, с которого вычислены еще не прочитанные элементы
    pub fn offset(&self) -> usize
    {
        match self.ready.is_empty() {
            true => self.end,
            false => self.start,
        }
    }

    /// перейти к смещению; если оно внутри сокращения, числа или суррогатной пары,
    /// чтение начнется с ближайшей безопасной границы перед ним
    pub fn set_offset(&mut self, offset: usize)
    {
        let offset = safe_boundary(self.table, self.settings, &self.units, offset);

        self.start = offset;
        self.end = offset;
        self.ready.clear();
    }

    /// начать с начала строки
    pub fn reset(&mut self)
    {
        self.set_offset(0);
    }

    /// конец отрезка, начинающегося с безопасной единицы start
    fn segment_end(&self, start: usize) -> usize
    {
        let mut end = start + 1;

        while end < self.units.len() && is_unsafe_unit(self.table, self.settings, self.units[end]) {
            end += 1;
        }

        end
    }

    fn read_segment(&mut self)
    {
        self.start = self.end;
        self.end = self.segment_end(self.start);

        let variable_top = self.settings.variable_top();
        let segment = &self.units[self.start .. self.end];

        for element in Elements::new(self.table, self.settings, segment, &mut self.buffers) {
            self.ready.push_back(Weights::new(element.ce, variable_top));
        }
    }
}

impl Iterator for CollationElements<'_>
{
    type Item = Weights;

    fn next(&mut self) -> Option<Weights>
    {
        loop {
            if let Some(weights) = self.ready.pop_front() {
                return Some(weights);
            }

            if self.end >= self.units.len() {
                return None;
            }

            self.read_segment();
        }
    }
}
