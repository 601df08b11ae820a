// сжатие уровней ключа
//
// первичный уровень: веса сжимаемых групп с тем же старшим байтом записываются одним младшим
// байтом; при смене старшего байта записывается маркер направления (03 - вниз, FF - вверх).
// остальные уровни: последовательность из N общих весов записывается одним байтом, зависящим
// от следующего веса

use crate::table::MERGE_SEPARATOR_LEAD;
use crate::weights::{Compression, KeyConstants};

/// запись первичных весов
pub struct PrimaryWriter
{
    low: u8,
    high: u8,
    /// первый вес текущей сжимаемой последовательности; 0 - последовательности нет
    previous: u16,
}

impl PrimaryWriter
{
    pub fn new(constants: &KeyConstants) -> Self
    {
        Self {
            low: constants.primary_compression_low,
            high: constants.primary_compression_high,
            previous: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, primary: u16, compressible: bool, out: &mut Vec<u8>)
    {
        let [lead, second] = primary.to_be_bytes();

        if self.previous == 0 || lead != (self.previous >> 8) as u8 {
            if self.previous != 0 {
                match primary < self.previous {
                    // в конце сегмента (перед разделителем слияния) маркер не нужен
                    true => {
                        if lead > MERGE_SEPARATOR_LEAD {
                            out.push(self.low);
                        }
                    }
                    false => out.push(self.high),
                }
            }

            out.push(lead);

            self.previous = match compressible {
                true => primary,
                false => 0,
            };
        }

        out.push(second);
    }
}

/// запись уровня со сжатием общих весов
pub struct LevelWriter<'a>
{
    compression: Compression,
    /// количество еще не записанных общих весов
    count: usize,
    out: &'a mut Vec<u8>,
}

impl<'a> LevelWriter<'a>
{
    pub fn new(compression: Compression, out: &'a mut Vec<u8>) -> Self
    {
        out.clear();

        Self {
            compression,
            count: 0,
            out,
        }
    }

    /// однобайтовый вес
    #[inline]
    pub fn push(&mut self, weight: u8)
    {
        match weight == self.compression.low {
            true => self.count += 1,
            false => {
                self.flush(weight < self.compression.low);
                self.out.push(weight);
            }
        }
    }

    /// многобайтовый вес, меньший общего
    #[inline]
    pub fn push_below(&mut self, bytes: &[u8])
    {
        self.flush(true);
        self.out.extend_from_slice(bytes);
    }

    /// записать оставшиеся общие веса
    pub fn finish(mut self)
    {
        self.flush(true);
    }

    fn flush(&mut self, below: bool)
    {
        if self.count == 0 {
            return;
        }

        let Compression {
            low,
            middle,
            high,
            max_count,
        } = self.compression;

        let mut count = self.count - 1;

        while count >= max_count as usize {
            self.out.push(middle);
            count -= max_count as usize;
        }

        self.out.push(match below {
            true => low + count as u8,
            false => high - count as u8,
        });

        self.count = 0;
    }
}
