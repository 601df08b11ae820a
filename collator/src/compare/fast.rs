// быстрый путь сравнения: таблица CE для начала латиницы
//
// покрываются кодпоинты до U+0180, которые можно сравнивать по одному: безопасные, не начинающие
// сокращений и не раскладывающиеся, с не более чем двумя CE без продолжений. если в строке
// встречается непокрытая кодовая единица, сравнение передается общему алгоритму

use core::cmp::Ordering;

use crate::collation_element::{Ce, TableValue};
use crate::elements::Element;
use crate::table::WeightTable;
use crate::weights::levels::{Kind, Level, Weigher};

/// граница покрываемого диапазона
const LATIN_LIMIT: usize = 0x180;

/// CE покрытого кодпоинта
#[derive(Debug, Clone, Copy, Default)]
struct FastEntry
{
    ces: [Ce; 2],
    len: u8,
}

impl FastEntry
{
    fn new(ces: &[Ce]) -> Option<Self>
    {
        let mut entry = Self::default();

        for &ce in ces.iter().filter(|ce| !ce.is_ignorable()) {
            if ce.is_continuation() || entry.len as usize == entry.ces.len() {
                return None;
            }

            entry.ces[entry.len as usize] = ce;
            entry.len += 1;
        }

        Some(entry)
    }

    #[inline(always)]
    fn ces(&self) -> &[Ce]
    {
        &self.ces[.. self.len as usize]
    }
}

/// таблица быстрого пути
#[derive(Debug, Clone)]
pub struct FastLatin
{
    entries: Vec<Option<FastEntry>>,
}

impl FastLatin
{
    /// таблица для весов; None - ни один кодпоинт не покрыт
    pub fn build(table: &WeightTable) -> Option<Self>
    {
        let entries: Vec<Option<FastEntry>> = (0 .. LATIN_LIMIT as u32)
            .map(|code| match table.is_unsafe(code as u16) {
                true => None,
                false => match table.lookup(code) {
                    TableValue::Ce(ce) => FastEntry::new(&[ce]),
                    TableValue::Expansion { offset, len } => FastEntry::new(table.expansion(offset, len)),
                    TableValue::Digit { offset, .. } => FastEntry::new(table.expansion(offset, 1)),
                    _ => None,
                },
            })
            .collect();

        match entries.iter().any(Option::is_some) {
            true => Some(Self { entries }),
            false => None,
        }
    }

    /// количество покрытых кодпоинтов
    pub fn coverage(&self) -> usize
    {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    #[inline(always)]
    fn entry(&self, unit: u16) -> Option<FastEntry>
    {
        self.entries.get(unit as usize).copied().flatten()
    }

    /// сравнить строки; None - встретилась непокрытая кодовая единица
    pub fn compare(&self, weigher: &Weigher, left: &[u16], right: &[u16]) -> Option<Ordering>
    {
        for level in weigher.levels() {
            match self.compare_level(weigher, level, left, right)? {
                Ordering::Equal => continue,
                ordering => return Some(ordering),
            }
        }

        Some(Ordering::Equal)
    }

    /// сравнить веса уровня; первое различие окончательно
    fn compare_level(&self, weigher: &Weigher, level: Level, left: &[u16], right: &[u16]) -> Option<Ordering>
    {
        let mut left = FastWeights::new(self, weigher, level, left);
        let mut right = FastWeights::new(self, weigher, level, right);

        loop {
            match (left.next(), right.next()) {
                (None, None) => return Some(Ordering::Equal),
                (Some(l), None) => return l.map(|_| Ordering::Greater),
                (None, Some(r)) => return r.map(|_| Ordering::Less),
                (Some(l), Some(r)) => {
                    let (l, r) = (l?, r?);

                    if l != r {
                        return Some(l.cmp(&r));
                    }
                }
            }
        }
    }
}

/// веса уровня строки по таблице быстрого пути; элемент None - непокрытая кодовая единица
struct FastWeights<'a>
{
    table: &'a FastLatin,
    weigher: &'a Weigher<'a>,
    level: Level,
    units: core::slice::Iter<'a, u16>,
    current: FastEntry,
    index: usize,
}

impl<'a> FastWeights<'a>
{
    fn new(table: &'a FastLatin, weigher: &'a Weigher<'a>, level: Level, units: &'a [u16]) -> Self
    {
        Self {
            table,
            weigher,
            level,
            units: units.iter(),
            current: FastEntry::default(),
            index: 0,
        }
    }
}

impl Iterator for FastWeights<'_>
{
    type Item = Option<u16>;

    #[inline]
    fn next(&mut self) -> Option<Option<u16>>
    {
        loop {
            if let Some(&ce) = self.current.ces().get(self.index) {
                self.index += 1;

                let element = Element { ce, hiragana: false };

                match self.weigher.weight(self.level, Kind::Regular, element) {
                    Some(weight) => return Some(Some(weight)),
                    None => continue,
                }
            }

            let &unit = self.units.next()?;

            match self.table.entry(unit) {
                Some(entry) => {
                    self.current = entry;
                    self.index = 0;
                }
                None => return Some(None),
            }
        }
    }
}
